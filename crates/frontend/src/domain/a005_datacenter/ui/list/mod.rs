use crate::shared::components::MasterDataPage;
use crate::shared::master_data::MasterDataModule;
use crate::shared::services::AppServices;
use contracts::domain::a005_datacenter::aggregate::Datacenter;
use leptos::prelude::*;

#[component]
pub fn DatacenterList(services: AppServices) -> impl IntoView {
    let module = MasterDataModule::<Datacenter>::new(&services);
    view! { <MasterDataPage services=services module=module /> }
}
