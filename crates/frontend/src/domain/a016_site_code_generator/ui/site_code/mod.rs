//! Next-code preview and generation for a project + state, and the format
//! preview shown in the rule drawer.

use crate::shared::components::foreign_key_combobox::ForeignKeyCombobox;
use crate::shared::master_data::latest_request::LatestRequest;
use crate::shared::master_data::notification::{error_message, Notification};
use crate::shared::master_data::{ApiError, MasterDataModule, ResourceClient};
use crate::shared::services::AppServices;
use crate::system::auth::guard::PermissionGuard;
use contracts::domain::a002_state::aggregate::State;
use contracts::domain::a016_site_code_generator::aggregate::{
    generate_path, preview_path, GeneratedSiteCode, SiteCodeGenerator, SiteCodeGeneratorForm,
    SiteCodePreview, SiteCodeRequest, COLLECTION,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Both halves of the key are needed before the server can be asked
pub fn site_code_request(project_id: Option<i64>, state_id: Option<i64>) -> Option<SiteCodeRequest> {
    Some(SiteCodeRequest {
        project_id: project_id?,
        state_id: state_id?,
    })
}

pub async fn fetch_preview(
    client: &ResourceClient<SiteCodeGenerator>,
    request: SiteCodeRequest,
) -> Result<SiteCodePreview, ApiError> {
    client.get_json(&preview_path(), &request).await
}

/// Generating advances the rule's last sequence, so the collection is invalidated
pub async fn generate_code(
    client: &ResourceClient<SiteCodeGenerator>,
    request: SiteCodeRequest,
) -> Result<GeneratedSiteCode, ApiError> {
    let generated: GeneratedSiteCode = client.post_json(&generate_path(), &request).await?;
    client.invalidate();
    Ok(generated)
}

pub fn site_code_panel(services: AppServices, reload: Callback<()>) -> AnyView {
    view! { <SiteCodePanel services=services on_generated=reload /> }.into_any()
}

pub fn format_preview(services: AppServices, form: RwSignal<SiteCodeGeneratorForm>) -> AnyView {
    view! { <FormatPreview services=services form=form /> }.into_any()
}

#[component]
fn SiteCodePanel(services: AppServices, on_generated: Callback<()>) -> impl IntoView {
    let client = StoredValue::new(
        MasterDataModule::<SiteCodeGenerator>::new(&services)
            .client()
            .clone(),
    );
    let notifier = services.notifier;
    let enforce = services.config.auth.enforce_permissions;
    let project_id = RwSignal::new(None::<i64>);
    let state_id = RwSignal::new(None::<i64>);
    let preview = RwSignal::new(None::<SiteCodePreview>);
    let generated = RwSignal::new(None::<GeneratedSiteCode>);
    let (preview_error, set_preview_error) = signal(None::<String>);
    let (generating, set_generating) = signal(false);
    let revision = RwSignal::new(0u64);
    let latest = LatestRequest::new();

    {
        let latest = latest.clone();
        Effect::new(move |_| {
            revision.track();
            let request = site_code_request(project_id.get(), state_id.get());
            preview.set(None);
            set_preview_error.set(None);
            let Some(request) = request else {
                latest.cancel();
                return;
            };
            let client = client.get_value();
            let latest = latest.clone();
            spawn_local(async move {
                let Some(result) = latest.run(fetch_preview(&client, request)).await else {
                    return;
                };
                match result {
                    Ok(next) => {
                        preview.try_set(Some(next));
                    }
                    Err(err) => {
                        log::warn!("site code preview failed: {}", err);
                        set_preview_error.try_set(Some(error_message(&err)));
                    }
                }
            });
        });
    }

    on_cleanup(move || latest.cancel());

    let generate = move |_| {
        let Some(request) = site_code_request(project_id.get_untracked(), state_id.get_untracked())
        else {
            return;
        };
        if generating.get_untracked() {
            return;
        }
        set_generating.set(true);
        let client = client.get_value();
        spawn_local(async move {
            match generate_code(&client, request).await {
                Ok(code) => {
                    log::info!("site code {} generated (sequence {})", code.site_code, code.sequence);
                    notifier.push(Notification::success(format!("Site code {} generated", code.site_code)));
                    generated.try_set(Some(code));
                    revision.try_update(|n| *n += 1);
                    on_generated.run(());
                }
                Err(err) => notifier.push(Notification::from_error(&err)),
            }
            set_generating.try_set(false);
        });
    };

    let can_generate = move || {
        !generating.get() && site_code_request(project_id.get(), state_id.get()).is_some()
    };

    view! {
        <section class="site-code-panel">
            <h2 class="site-code-panel__title">"Generate site code"</h2>
            <div class="site-code-panel__fields">
                <div class="form__group">
                    <label class="form__label" for="site-code-project">"Project"</label>
                    <ForeignKeyCombobox
                        services=services.clone()
                        collection="managed-projects"
                        selected=project_id
                        on_select=Callback::new(move |id| project_id.set(id))
                        invalid=false
                        disabled=generating
                        id="site-code-project"
                    />
                </div>
                <div class="form__group">
                    <label class="form__label" for="site-code-state">"State"</label>
                    <ForeignKeyCombobox
                        services=services
                        collection="states"
                        selected=state_id
                        on_select=Callback::new(move |id| state_id.set(id))
                        invalid=false
                        disabled=generating
                        id="site-code-state"
                    />
                </div>
            </div>

            <div class="site-code-panel__preview">
                {move || match (preview.get(), preview_error.get()) {
                    (Some(next), _) => view! {
                        <span>"Next code: "<strong>{next.next_code}</strong></span>
                        <span class="text-muted">{format!(" (sequence {})", next.next_sequence)}</span>
                    }.into_any(),
                    (None, Some(e)) => view! { <span class="text-error">{e}</span> }.into_any(),
                    (None, None) => view! {
                        <span class="text-muted">"Choose a project and a state to preview the next code"</span>
                    }.into_any(),
                }}
            </div>

            <PermissionGuard permission=COLLECTION.write_permission() enforce=enforce>
                <button
                    class="button button--primary"
                    disabled=move || !can_generate()
                    on:click=generate
                >
                    {move || if generating.get() { "Generating..." } else { "Generate" }}
                </button>
            </PermissionGuard>

            {move || generated.get().map(|code| view! {
                <div class="site-code-panel__result">
                    "Generated: "
                    <code>{code.site_code}</code>
                    {code.generated_at.map(|at| view! { <span class="text-muted">{format!(" at {}", at)}</span> })}
                </div>
            })}
        </section>
    }
}

#[component]
fn FormatPreview(services: AppServices, form: RwSignal<SiteCodeGeneratorForm>) -> impl IntoView {
    let states = StoredValue::new(MasterDataModule::<State>::new(&services).client().clone());
    let state_code = RwSignal::new(String::new());
    let state_id = Memo::new(move |_| form.with(|f| f.state_id));
    let latest = LatestRequest::new();

    {
        let latest = latest.clone();
        Effect::new(move |_| {
            let Some(id) = state_id.get() else {
                latest.cancel();
                state_code.set(String::new());
                return;
            };
            let states = states.get_value();
            let latest = latest.clone();
            spawn_local(async move {
                match latest.run(states.get_by_id(id)).await {
                    Some(Ok(state)) => {
                        state_code.try_set(state.state_code);
                    }
                    Some(Err(err)) => {
                        log::warn!("state {} lookup for the format preview failed: {}", id, err);
                        state_code.try_set(String::new());
                    }
                    None => {}
                }
            });
        });
    }

    on_cleanup(move || latest.cancel());

    view! {
        <div class="site-code-preview">
            <span class="form__label">"Format preview"</span>
            <code class="site-code-preview__value">
                {move || {
                    let code = state_code.get();
                    form.with(|f| f.format_preview(&code))
                        .unwrap_or_else(|| "Enter a prefix to see the format".to_string())
                }}
            </code>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::master_data::client::ClientSettings;
    use crate::shared::master_data::query_cache::QueryCache;
    use crate::shared::master_data::testing::FakeBackend;
    use futures::executor::block_on;
    use std::sync::Arc;

    fn client(backend: &FakeBackend) -> ResourceClient<SiteCodeGenerator> {
        ResourceClient::new(
            Arc::new(backend.clone()),
            QueryCache::new(),
            ClientSettings::default(),
        )
    }

    #[test]
    fn test_request_needs_project_and_state() {
        assert_eq!(site_code_request(Some(3), None), None);
        assert_eq!(site_code_request(None, Some(7)), None);
        assert_eq!(
            site_code_request(Some(3), Some(7)),
            Some(SiteCodeRequest { project_id: 3, state_id: 7 })
        );
    }

    #[test]
    fn test_preview_sends_project_and_state() {
        let backend = FakeBackend::new().with_collection("/api/site-code-generators", vec![]);
        let request = SiteCodeRequest { project_id: 3, state_id: 7 };

        let preview = block_on(fetch_preview(&client(&backend), request)).unwrap();

        assert_eq!(preview.next_code, "ATM-MH-00001");
        let sent = backend.requests().pop().unwrap();
        assert_eq!(sent.path, "/api/site-code-generators/preview");
        assert_eq!(sent.query.as_deref(), Some("projectId=3&stateId=7"));
    }

    #[test]
    fn test_generate_invalidates_rules() {
        let backend = FakeBackend::new().with_collection("/api/site-code-generators", vec![]);
        let client = client(&backend);
        let before = client.cache().revision(COLLECTION.key);

        let generated =
            block_on(generate_code(&client, SiteCodeRequest { project_id: 3, state_id: 7 })).unwrap();

        assert_eq!(generated.site_code, "ATM-MH-00001");
        assert!(client.cache().revision(COLLECTION.key) > before);
        let sent = backend.requests().pop().unwrap();
        assert_eq!(sent.method, "POST");
        assert_eq!(sent.path, "/api/site-code-generators/generate");
    }
}
