//! One generic page per master-data collection.
//!
//! Toolbar, server-paginated table, create/edit drawer, delete confirmation
//! and bulk upload all run against the [`MasterDataModule`] handed in by the
//! collection's list page.

use crate::shared::components::bulk_upload_dialog::BulkUploadDialog;
use crate::shared::components::delete_dialog::DeleteDialog;
use crate::shared::components::drawer::Drawer;
use crate::shared::components::entity_form::EntityForm;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::export::download_file;
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_aria_sort, get_sort_indicator, SearchInput};
use crate::shared::master_data::latest_request::LatestRequest;
use crate::shared::master_data::mutation::{
    delete_entity, submit_form, FormMode, MutationHost, MutationStatus,
};
use crate::shared::master_data::notification::{error_message, Notification};
use crate::shared::master_data::table_state::TableQuery;
use crate::shared::master_data::ui_state::{ModuleUiState, Overlay};
use crate::shared::master_data::{MasterDataModule, ResourceClient};
use crate::shared::notifications::Notifier;
use crate::shared::services::AppServices;
use crate::system::auth::guard::{is_allowed, PermissionGuard};
use crate::system::auth::storage::get_user_info;
use contracts::domain::common::AggregateRoot;
use contracts::shared::api::PageResult;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::BTreeMap;

/// Extra page content below the table (e.g. the site-code panel); the
/// callback reloads the table
pub type PageExtras = fn(AppServices, Callback<()>) -> AnyView;

/// Extra drawer content below the generated fields
pub type FormExtras<F> = fn(AppServices, RwSignal<F>) -> AnyView;

/// The signals a mutation reports back into
struct PageHost<E: AggregateRoot> {
    client: ResourceClient<E>,
    notifier: Notifier,
    status: RwSignal<MutationStatus>,
    refresh: RwSignal<u64>,
    ui: RwSignal<ModuleUiState<E>>,
    form: RwSignal<E::Form>,
    field_errors: RwSignal<BTreeMap<String, String>>,
}

impl<E: AggregateRoot> Clone for PageHost<E> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            notifier: self.notifier,
            status: self.status,
            refresh: self.refresh,
            ui: self.ui,
            form: self.form,
            field_errors: self.field_errors,
        }
    }
}

impl<E: AggregateRoot> MutationHost for PageHost<E> {
    fn status(&self) -> MutationStatus {
        self.status.get_untracked()
    }

    fn set_status(&self, status: MutationStatus) {
        self.status.try_set(status);
    }

    fn invalidate(&self) {
        self.client.invalidate();
        self.refresh.try_update(|n| *n += 1);
    }

    fn notify(&self, notification: Notification) {
        self.notifier.push(notification);
    }

    fn close(&self) {
        self.ui.try_update(|ui| ui.close());
    }

    fn reset_form(&self) {
        self.form.try_set(E::Form::default());
        self.field_errors.try_set(BTreeMap::new());
    }
}

fn table_status(loading: bool, error: Option<String>, empty: bool, list_name: &str) -> Option<String> {
    if let Some(error) = error {
        return Some(error);
    }
    if loading && empty {
        return Some("Loading...".to_string());
    }
    if empty {
        return Some(format!("No {} found", list_name.to_lowercase()));
    }
    None
}

#[component]
pub fn MasterDataPage<E: AggregateRoot>(
    services: AppServices,
    module: MasterDataModule<E>,
    #[prop(optional)] page_extras: Option<PageExtras>,
    #[prop(optional)] form_extras: Option<FormExtras<E::Form>>,
) -> impl IntoView {
    let collection = module.collection();
    let notifier = services.notifier;
    let page_size_options = module.page_size_options();
    let write_permission = module.write_permission();
    let enforce = services.config.auth.enforce_permissions;
    let can_write = is_allowed(enforce, get_user_info().as_ref(), &write_permission);

    let query = RwSignal::new(module.initial_query());
    let ui = RwSignal::new(module.initial_ui_state());
    let refresh = RwSignal::new(0u64);
    let page = RwSignal::new(None::<PageResult<E>>);
    let (loading, set_loading) = signal(false);
    let (load_error, set_load_error) = signal(None::<String>);
    let status = RwSignal::new(MutationStatus::Idle);
    let form = RwSignal::new(E::Form::default());
    let field_errors = RwSignal::new(BTreeMap::<String, String>::new());
    let pending = Signal::derive(move || status.get().is_pending());

    let host = StoredValue::new(PageHost {
        client: module.client().clone(),
        notifier,
        status,
        refresh,
        ui,
        form,
        field_errors,
    });
    let client = StoredValue::new(module.client().clone());
    let latest = LatestRequest::new();
    // A newly mounted page asks the server instead of showing a cached page
    let mounted_fresh = StoredValue::new(true);

    {
        let latest = latest.clone();
        Effect::new(move |_| {
            let current: TableQuery = query.get();
            refresh.track();
            let client = client.get_value();
            let latest = latest.clone();
            let fresh = mounted_fresh.get_value();
            mounted_fresh.set_value(false);
            set_loading.set(true);
            spawn_local(async move {
                let request = current.page_request();
                let term = current.search_term.as_str();
                let fetched = if fresh {
                    latest.run(client.search_fresh(term, &request)).await
                } else {
                    latest.run(client.search(term, &request)).await
                };
                let Some(result) = fetched else {
                    return;
                };
                set_loading.try_set(false);
                match result {
                    Ok(result) => {
                        let mut clamped = current.clone();
                        clamped.clamp_page(result.total_pages);
                        set_load_error.try_set(None);
                        page.try_set(Some(result));
                        if clamped.page != current.page {
                            log::debug!("{}: page {} out of range, showing {}", collection.key, current.page, clamped.page);
                            query.try_update(|q| q.page = clamped.page);
                        }
                    }
                    Err(err) => {
                        log::error!("{}: loading page failed: {}", collection.key, err);
                        set_load_error.try_set(Some(error_message(&err)));
                    }
                }
            });
        });
    }

    on_cleanup(move || latest.cancel());

    let open_create = move || {
        form.set(E::Form::default());
        field_errors.set(BTreeMap::new());
        ui.update(|ui| ui.open_create());
    };

    let open_edit = move |entity: E| {
        form.set(entity.to_form());
        field_errors.set(BTreeMap::new());
        ui.update(|ui| ui.open_edit(entity));
    };

    let close_overlay = Callback::new(move |_: ()| {
        if status.get_untracked().is_pending() {
            return;
        }
        ui.update(|ui| ui.close());
    });

    let submit = Callback::new(move |_: ()| {
        // unparsable input is only known to the field that received it
        if field_errors.with_untracked(|errors| !errors.is_empty()) {
            notifier.push(Notification::warning("Correct the highlighted fields first"));
            return;
        }
        let host = host.get_value();
        let mode = ui.with_untracked(|ui| match ui.selected() {
            Some(entity) => FormMode::Edit(entity.id()),
            None => FormMode::Create,
        });
        let current = form.get_untracked();
        spawn_local(async move {
            if let Err(err) = submit_form(&host, &host.client, mode, current).await {
                let errors = err.field_errors();
                if !errors.is_empty() {
                    host.field_errors.try_set(errors);
                }
            }
        });
    });

    let confirm_delete = Callback::new(move |_: ()| {
        let Some(entity) = ui.with_untracked(|ui| ui.selected().cloned()) else {
            return;
        };
        let host = host.get_value();
        spawn_local(async move {
            // failures are already reported as a toast
            let _ = delete_entity(&host, &host.client, &entity).await;
        });
    });

    let export = move |_| {
        let client = client.get_value();
        spawn_local(async move {
            match client.export().await {
                Ok(file) => {
                    if let Err(e) = download_file(&file) {
                        log::error!("{}", e);
                        notifier.push(Notification::error(e));
                    }
                }
                Err(err) => notifier.push(Notification::from_error(&err)),
            }
        });
    };

    let columns = E::list_fields();
    let column_count = columns.len() + usize::from(can_write);

    let header_cells = columns
        .iter()
        .map(|field| {
            let name = field.name;
            let label = field.ui.label;
            if !field.ui.sortable {
                return view! { <th class="table__header-cell">{label}</th> }.into_any();
            }
            let ascending = move || query.with(|q| q.sort_direction.is_ascending());
            view! {
                <th
                    class="table__header-cell table__header-cell--sortable"
                    aria-sort=move || query.with(|q| get_aria_sort(&q.sort_field, name, ascending()))
                    on:click=move |_| query.update(|q| q.toggle_sort(name))
                >
                    {label}
                    <span class="table__sort-indicator">
                        {move || query.with(|q| get_sort_indicator(&q.sort_field, name, ascending()))}
                    </span>
                </th>
            }
            .into_any()
        })
        .collect_view();

    let rows = move || {
        let entities = page.with(|p| p.as_ref().map(|p| p.content.clone()).unwrap_or_default());
        entities
            .into_iter()
            .map(|entity| {
                let cells = E::list_fields()
                    .into_iter()
                    .map(|field| view! { <td class="table__cell">{entity.cell_value(field.name)}</td> })
                    .collect_view();
                let for_edit = entity.clone();
                let for_delete = entity.clone();
                view! {
                    <tr class="table__row">
                        {cells}
                        {can_write.then(|| view! {
                            <td class="table__cell table__cell--actions">
                                <button
                                    class="button button--icon"
                                    title="Edit"
                                    on:click=move |_| open_edit(for_edit.clone())
                                >
                                    {icon("edit")}
                                </button>
                                <button
                                    class="button button--icon button--danger"
                                    title="Delete"
                                    on:click=move |_| {
                                        let entity = for_delete.clone();
                                        ui.update(|ui| ui.open_delete(entity));
                                    }
                                >
                                    {icon("delete")}
                                </button>
                            </td>
                        })}
                    </tr>
                }
            })
            .collect_view()
    };

    let status_row = move || {
        let empty = page.with(|p| p.as_ref().map_or(true, |p| p.content.is_empty()));
        table_status(loading.get(), load_error.get(), empty, collection.list_name).map(|message| {
            view! {
                <tr class="table__row table__row--status">
                    <td class="table__cell" colspan=column_count.to_string()>{message}</td>
                </tr>
            }
        })
    };

    let overlay = {
        let services = services.clone();
        move || match ui.with(|ui| ui.overlay().clone()) {
            Overlay::None => ().into_any(),
            Overlay::Drawer(selected) => {
                let services = services.clone();
                let editing = selected.is_some();
                let title = match &selected {
                    Some(entity) => format!("Edit {}: {}", collection.element_name, entity.display_name()),
                    None => format!("New {}", collection.element_name),
                };
                let submit_label = if editing { "Save" } else { "Create" };
                let extras = form_extras.map(|extras| extras(services.clone(), form));
                view! {
                    <Drawer title=title on_close=close_overlay locked=pending>
                        <EntityForm
                            services=services.clone()
                            form=form
                            field_errors=field_errors
                            pending=pending
                            submit_label=submit_label.to_string()
                            on_submit=submit
                            on_cancel=close_overlay
                        >
                            {extras}
                        </EntityForm>
                    </Drawer>
                }
                .into_any()
            }
            Overlay::DeleteDialog(entity) => view! {
                <DeleteDialog
                    element_name=collection.element_name
                    target=entity.display_name()
                    pending=pending
                    on_confirm=confirm_delete
                    on_cancel=close_overlay
                />
            }
            .into_any(),
            Overlay::BulkUploadDialog => view! {
                <BulkUploadDialog
                    client=client.get_value()
                    notifier=notifier
                    on_uploaded=Callback::new(move |_| refresh.update(|n| *n += 1))
                    on_close=close_overlay
                />
            }
            .into_any(),
        }
    };

    let reload_table = Callback::new(move |_: ()| {
        client.with_value(|c| c.invalidate());
        refresh.update(|n| *n += 1);
    });
    let extras = page_extras.map(|extras| extras(services.clone(), reload_table));

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{collection.list_name}</h1>
                    <span class="header__subtitle">
                        {move || page.with(|p| p.as_ref().map(|p| format!("{} records", p.total_elements)))}
                    </span>
                </div>
                <div class="header__actions">
                    <SearchInput
                        value=Signal::derive(move || query.with(|q| q.search_term.clone()))
                        on_change=Callback::new(move |term: String| query.update(|q| q.set_search(&term)))
                        placeholder=format!("Search {}...", collection.list_name.to_lowercase())
                    />
                    <PermissionGuard permission=write_permission.clone() enforce=enforce>
                        <button class="button button--primary" on:click=move |_| open_create()>
                            {icon("plus")}
                            {format!(" New {}", collection.element_name)}
                        </button>
                        {collection.supports_bulk_upload().then(|| view! {
                            <button
                                class="button button--secondary"
                                on:click=move |_| ui.update(|ui| ui.open_bulk_upload())
                            >
                                {icon("upload")}
                                " Bulk upload"
                            </button>
                        })}
                    </PermissionGuard>
                    {collection.exportable.then(|| view! {
                        <button class="button button--secondary" on:click=export>
                            {icon("download")}
                            " Export"
                        </button>
                    })}
                    <button class="button button--secondary" title="Reload" on:click=move |_| reload_table.run(())>
                        {icon("refresh")}
                    </button>
                </div>
            </div>

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            {header_cells}
                            {can_write.then(|| view! { <th class="table__header-cell table__header-cell--actions">"Actions"</th> })}
                        </tr>
                    </thead>
                    <tbody>
                        {status_row}
                        {rows}
                    </tbody>
                </table>
            </div>

            <PaginationControls
                current_page=Signal::derive(move || query.with(|q| q.page))
                total_pages=Signal::derive(move || page.with(|p| p.as_ref().map(|p| p.total_pages).unwrap_or(0)))
                total_count=Signal::derive(move || page.with(|p| p.as_ref().map(|p| p.total_elements).unwrap_or(0)))
                shown=Signal::derive(move || page.with(|p| p.as_ref().map(|p| p.content.len()).unwrap_or(0)))
                page_size=Signal::derive(move || query.with(|q| q.size))
                on_page_change=Callback::new(move |p: u32| query.update(|q| q.set_page(p)))
                on_page_size_change=Callback::new(move |size: u32| query.update(|q| q.set_page_size(size)))
                page_size_options=page_size_options
            />

            {extras}
            {overlay}
        </div>
    }
}
