use crate::shared::components::MasterDataPage;
use crate::shared::master_data::MasterDataModule;
use crate::shared::services::AppServices;
use contracts::domain::a010_cost_item::aggregate::CostItem;
use leptos::prelude::*;

#[component]
pub fn CostItemList(services: AppServices) -> impl IntoView {
    let module = MasterDataModule::<CostItem>::new(&services);
    view! { <MasterDataPage services=services module=module /> }
}
