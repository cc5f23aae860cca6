use crate::domain::registry::reference_options;
use crate::shared::list_utils::SearchInput;
use crate::shared::master_data::latest_request::LatestRequest;
use crate::shared::master_data::notification::error_message;
use crate::shared::master_data::resolver::ReferenceOption;
use crate::shared::services::AppServices;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Value of the `<select>` for an optional id
fn option_value(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

/// Searchable picker of a record in another collection.
///
/// Candidates are reloaded whenever the (debounced) term changes. The current
/// selection is always among the options even when it is not on the first
/// page of results.
#[component]
pub fn ForeignKeyCombobox(
    services: AppServices,
    /// Key of the referenced collection, e.g. `"states"`
    collection: &'static str,
    #[prop(into)] selected: Signal<Option<i64>>,
    on_select: Callback<Option<i64>>,
    /// Offer an explicit "no value" entry
    #[prop(optional)]
    optional: bool,
    #[prop(into)] invalid: Signal<bool>,
    #[prop(into)] disabled: Signal<bool>,
    #[prop(optional, into)] id: String,
) -> impl IntoView {
    let term = RwSignal::new(String::new());
    let options = RwSignal::new(Vec::<ReferenceOption>::new());
    let (loading, set_loading) = signal(false);
    let (load_error, set_load_error) = signal(None::<String>);
    let latest = LatestRequest::new();

    {
        let latest = latest.clone();
        Effect::new(move |_| {
            let term = term.get();
            let services = services.clone();
            let latest = latest.clone();
            let selected = selected.get_untracked();
            set_loading.set(true);
            spawn_local(async move {
                let result = latest
                    .run(reference_options(&services, collection, &term, selected))
                    .await;
                // superseded or unmounted
                let Some(result) = result else {
                    return;
                };
                set_loading.try_set(false);
                match result {
                    Ok(found) => {
                        set_load_error.try_set(None);
                        options.try_set(found);
                    }
                    Err(err) => {
                        log::warn!("{}: combobox candidates failed: {}", collection, err);
                        set_load_error.try_set(Some(error_message(&err)));
                    }
                }
            });
        });
    }

    on_cleanup(move || latest.cancel());

    let empty_label = if optional { "(none)" } else { "Select..." };

    view! {
        <div class="combobox" class:combobox--invalid=move || invalid.get()>
            <SearchInput
                value=Signal::derive(move || term.get())
                on_change=Callback::new(move |value: String| term.set(value))
                placeholder="Type to search..."
            />
            <select
                id=id
                class="form__select"
                disabled=move || disabled.get()
                prop:value=move || option_value(selected.get())
                on:change=move |ev| {
                    let raw = event_target_value(&ev);
                    on_select.run(raw.trim().parse::<i64>().ok());
                }
            >
                <option value="" selected=move || selected.get().is_none()>{empty_label}</option>
                {move || options.get().into_iter().map(|option| {
                    let id = option.id;
                    view! {
                        <option value=id.to_string() selected=move || selected.get() == Some(id)>
                            {option.label}
                        </option>
                    }
                }).collect_view()}
            </select>
            {move || loading.get().then(|| view! { <span class="combobox__status">"Loading..."</span> })}
            {move || load_error.get().map(|e| view! { <span class="combobox__status text-error">{e}</span> })}
        </div>
    }
}
