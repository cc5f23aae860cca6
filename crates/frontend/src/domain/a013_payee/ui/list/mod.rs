use crate::shared::components::MasterDataPage;
use crate::shared::master_data::MasterDataModule;
use crate::shared::services::AppServices;
use contracts::domain::a013_payee::aggregate::Payee;
use leptos::prelude::*;

#[component]
pub fn PayeeList(services: AppServices) -> impl IntoView {
    let module = MasterDataModule::<Payee>::new(&services);
    view! { <MasterDataPage services=services module=module /> }
}
