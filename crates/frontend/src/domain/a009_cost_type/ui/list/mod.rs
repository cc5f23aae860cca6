use crate::shared::components::MasterDataPage;
use crate::shared::master_data::MasterDataModule;
use crate::shared::services::AppServices;
use contracts::domain::a009_cost_type::aggregate::CostType;
use leptos::prelude::*;

#[component]
pub fn CostTypeList(services: AppServices) -> impl IntoView {
    let module = MasterDataModule::<CostType>::new(&services);
    view! { <MasterDataPage services=services module=module /> }
}
