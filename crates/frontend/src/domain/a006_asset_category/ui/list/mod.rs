use crate::shared::components::MasterDataPage;
use crate::shared::master_data::MasterDataModule;
use crate::shared::services::AppServices;
use contracts::domain::a006_asset_category::aggregate::AssetCategory;
use leptos::prelude::*;

#[component]
pub fn AssetCategoryList(services: AppServices) -> impl IntoView {
    let module = MasterDataModule::<AssetCategory>::new(&services);
    view! { <MasterDataPage services=services module=module /> }
}
