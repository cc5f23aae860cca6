use crate::shared::components::MasterDataPage;
use crate::shared::master_data::MasterDataModule;
use crate::shared::services::AppServices;
use contracts::domain::a001_bank::aggregate::Bank;
use leptos::prelude::*;

#[component]
pub fn BankList(services: AppServices) -> impl IntoView {
    let module = MasterDataModule::<Bank>::new(&services);
    view! { <MasterDataPage services=services module=module /> }
}
