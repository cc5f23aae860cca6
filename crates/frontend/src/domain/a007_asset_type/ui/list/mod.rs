use crate::shared::components::MasterDataPage;
use crate::shared::master_data::MasterDataModule;
use crate::shared::services::AppServices;
use contracts::domain::a007_asset_type::aggregate::AssetType;
use leptos::prelude::*;

#[component]
pub fn AssetTypeList(services: AppServices) -> impl IntoView {
    let module = MasterDataModule::<AssetType>::new(&services);
    view! { <MasterDataPage services=services module=module /> }
}
