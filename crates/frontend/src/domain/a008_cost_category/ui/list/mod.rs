use crate::shared::components::MasterDataPage;
use crate::shared::master_data::MasterDataModule;
use crate::shared::services::AppServices;
use contracts::domain::a008_cost_category::aggregate::CostCategory;
use leptos::prelude::*;

#[component]
pub fn CostCategoryList(services: AppServices) -> impl IntoView {
    let module = MasterDataModule::<CostCategory>::new(&services);
    view! { <MasterDataPage services=services module=module /> }
}
