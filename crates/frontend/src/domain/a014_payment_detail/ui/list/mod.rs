use crate::shared::components::MasterDataPage;
use crate::shared::master_data::MasterDataModule;
use crate::shared::services::AppServices;
use contracts::domain::a014_payment_detail::aggregate::PaymentDetail;
use leptos::prelude::*;

#[component]
pub fn PaymentDetailList(services: AppServices) -> impl IntoView {
    let module = MasterDataModule::<PaymentDetail>::new(&services);
    view! { <MasterDataPage services=services module=module /> }
}
