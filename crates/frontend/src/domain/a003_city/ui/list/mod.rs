use crate::shared::components::MasterDataPage;
use crate::shared::master_data::MasterDataModule;
use crate::shared::services::AppServices;
use contracts::domain::a003_city::aggregate::City;
use leptos::prelude::*;

#[component]
pub fn CityList(services: AppServices) -> impl IntoView {
    let module = MasterDataModule::<City>::new(&services);
    view! { <MasterDataPage services=services module=module /> }
}
