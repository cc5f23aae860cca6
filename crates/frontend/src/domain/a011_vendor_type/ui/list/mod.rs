use crate::shared::components::MasterDataPage;
use crate::shared::master_data::MasterDataModule;
use crate::shared::services::AppServices;
use contracts::domain::a011_vendor_type::aggregate::VendorType;
use leptos::prelude::*;

#[component]
pub fn VendorTypeList(services: AppServices) -> impl IntoView {
    let module = MasterDataModule::<VendorType>::new(&services);
    view! { <MasterDataPage services=services module=module /> }
}
