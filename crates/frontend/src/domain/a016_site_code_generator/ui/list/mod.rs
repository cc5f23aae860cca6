use super::site_code::{format_preview, site_code_panel};
use crate::shared::components::MasterDataPage;
use crate::shared::master_data::MasterDataModule;
use crate::shared::services::AppServices;
use contracts::domain::a016_site_code_generator::aggregate::SiteCodeGenerator;
use leptos::prelude::*;

#[component]
pub fn SiteCodeGeneratorList(services: AppServices) -> impl IntoView {
    let module = MasterDataModule::<SiteCodeGenerator>::new(&services);
    view! {
        <MasterDataPage
            services=services
            module=module
            page_extras=site_code_panel
            form_extras=format_preview
        />
    }
}
