use crate::shared::components::MasterDataPage;
use crate::shared::master_data::MasterDataModule;
use crate::shared::services::AppServices;
use contracts::domain::a012_vendor::aggregate::Vendor;
use leptos::prelude::*;

#[component]
pub fn VendorList(services: AppServices) -> impl IntoView {
    let module = MasterDataModule::<Vendor>::new(&services);
    view! { <MasterDataPage services=services module=module /> }
}
