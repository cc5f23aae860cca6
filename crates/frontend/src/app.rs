use crate::domain::registry::link_references;
use crate::routes::routes::AppRoutes;
use crate::shared::config::ClientConfig;
use crate::shared::gloo_transport::GlooTransport;
use crate::shared::notifications::{NotificationHost, Notifier};
use crate::shared::services::AppServices;
use leptos::prelude::*;
use std::sync::Arc;

#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    let notifier = Notifier::new(config.notifications.timeout_ms);
    let transport = Arc::new(GlooTransport::new(config.api_base()));
    let services = AppServices::new(transport, config, notifier);
    link_references(&services.cache);

    view! {
        <AppRoutes services=services />
        <NotificationHost notifier=notifier />
    }
}
