use crate::shared::components::MasterDataPage;
use crate::shared::master_data::MasterDataModule;
use crate::shared::services::AppServices;
use contracts::domain::a002_state::aggregate::State;
use leptos::prelude::*;

#[component]
pub fn StateList(services: AppServices) -> impl IntoView {
    let module = MasterDataModule::<State>::new(&services);
    view! { <MasterDataPage services=services module=module /> }
}
