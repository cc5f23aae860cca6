use crate::shared::components::MasterDataPage;
use crate::shared::master_data::MasterDataModule;
use crate::shared::services::AppServices;
use contracts::domain::a004_location::aggregate::Location;
use leptos::prelude::*;

#[component]
pub fn LocationList(services: AppServices) -> impl IntoView {
    let module = MasterDataModule::<Location>::new(&services);
    view! { <MasterDataPage services=services module=module /> }
}
