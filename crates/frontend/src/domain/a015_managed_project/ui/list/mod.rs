use crate::shared::components::MasterDataPage;
use crate::shared::master_data::MasterDataModule;
use crate::shared::services::AppServices;
use contracts::domain::a015_managed_project::aggregate::ManagedProject;
use leptos::prelude::*;

#[component]
pub fn ManagedProjectList(services: AppServices) -> impl IntoView {
    let module = MasterDataModule::<ManagedProject>::new(&services);
    view! { <MasterDataPage services=services module=module /> }
}
