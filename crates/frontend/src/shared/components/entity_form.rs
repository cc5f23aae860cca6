use crate::shared::components::foreign_key_combobox::ForeignKeyCombobox;
use crate::shared::services::AppServices;
use contracts::shared::form::{FieldValue, FormData};
use contracts::shared::metadata::{FieldMetadata, FieldType};
use leptos::prelude::*;
use std::collections::BTreeMap;

/// Fields of `F` rendered in the drawer, in declaration order
pub fn form_fields<F: FormData>() -> Vec<&'static FieldMetadata> {
    F::field_metadata()
        .iter()
        .filter(|f| f.visible_in_form())
        .collect()
}

fn input_id(field: &FieldMetadata) -> String {
    format!("field-{}", field.name)
}

/// Drawer form generated from the field metadata of `F`.
///
/// Editing a field clears its error. Both buttons are disabled while the
/// submission is pending.
#[component]
pub fn EntityForm<F: FormData>(
    services: AppServices,
    form: RwSignal<F>,
    field_errors: RwSignal<BTreeMap<String, String>>,
    #[prop(into)] pending: Signal<bool>,
    #[prop(into)] submit_label: Signal<String>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
    /// Extra content below the fields
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView {
    let fields = form_fields::<F>()
        .into_iter()
        .map(|field| view! { <FormField services=services.clone() field=field form=form field_errors=field_errors pending=pending /> })
        .collect_view();

    view! {
        <form
            class="form"
            novalidate=true
            on:submit=move |ev| {
                ev.prevent_default();
                if !pending.get_untracked() {
                    on_submit.run(());
                }
            }
        >
            {fields}
            {children.map(|c| c())}
            <div class="form__actions">
                <button
                    type="button"
                    class="button button--secondary"
                    disabled=move || pending.get()
                    on:click=move |_| on_cancel.run(())
                >
                    "Cancel"
                </button>
                <button type="submit" class="button button--primary" disabled=move || pending.get()>
                    {move || if pending.get() { "Saving...".to_string() } else { submit_label.get() }}
                </button>
            </div>
        </form>
    }
}

#[component]
fn FormField<F: FormData>(
    services: AppServices,
    field: &'static FieldMetadata,
    form: RwSignal<F>,
    field_errors: RwSignal<BTreeMap<String, String>>,
    pending: Signal<bool>,
) -> impl IntoView {
    let name = field.name;
    let id = input_id(field);
    let error = move || field_errors.with(|errors| errors.get(name).cloned());
    let has_error = Signal::derive(move || field_errors.with(|errors| errors.contains_key(name)));
    let text = move || form.with(|f| f.value(name).to_input_string());
    let placeholder = field.ui.placeholder.unwrap_or_default();

    let set_raw = move |raw: String| {
        let mut applied = Ok(());
        form.update(|f| applied = f.apply_input(name, &raw));
        match applied {
            Err(message) => field_errors.update(|errors| {
                errors.insert(name.to_string(), message);
            }),
            Ok(()) if field_errors.with_untracked(|errors| errors.contains_key(name)) => {
                field_errors.update(|errors| {
                    errors.remove(name);
                })
            }
            Ok(()) => {}
        }
    };

    let control = match (field.field_type, field.referenced_aggregate()) {
        (FieldType::AggregateRef, Some(collection)) => {
            let selected = Signal::derive(move || {
                form.with(|f| match f.value(name) {
                    FieldValue::Reference(id) => id,
                    _ => None,
                })
            });
            view! {
                <ForeignKeyCombobox
                    services=services
                    collection=collection
                    selected=selected
                    on_select=Callback::new(move |id: Option<i64>| {
                        set_raw(id.map(|id| id.to_string()).unwrap_or_default())
                    })
                    optional=field.is_optional()
                    invalid=has_error
                    disabled=pending
                    id=id.clone()
                />
            }
            .into_any()
        }
        (FieldType::LongText, _) => view! {
            <textarea
                id=id.clone()
                class="form__textarea"
                class:form__input--invalid=move || has_error.get()
                rows=3
                placeholder=placeholder
                disabled=move || pending.get()
                prop:value=text
                on:input=move |ev| set_raw(event_target_value(&ev))
            ></textarea>
        }
        .into_any(),
        (FieldType::Enum, _) => {
            let values = field.enum_values.unwrap_or_default();
            view! {
                <select
                    id=id.clone()
                    class="form__select"
                    class:form__input--invalid=move || has_error.get()
                    disabled=move || pending.get()
                    prop:value=text
                    on:change=move |ev| set_raw(event_target_value(&ev))
                >
                    <option value="">{if field.is_optional() { "(none)" } else { "Select..." }}</option>
                    {values.iter().map(|v| {
                        let v = *v;
                        view! { <option value=v selected=move || text() == v>{v}</option> }
                    }).collect_view()}
                </select>
            }
            .into_any()
        }
        _ => view! {
            <input
                id=id.clone()
                class="form__input"
                class:form__input--invalid=move || has_error.get()
                type=field.field_type.input_type()
                step=(field.field_type == FieldType::Number).then_some("any")
                placeholder=placeholder
                disabled=move || pending.get()
                prop:value=text
                on:input=move |ev| set_raw(event_target_value(&ev))
            />
        }
        .into_any(),
    };

    view! {
        <div class="form__group">
            <label class="form__label" for=id>
                {field.ui.label}
                {field.validation.required.then(|| view! { <span class="form__required">" *"</span> })}
            </label>
            {control}
            {field.ui.hint.map(|hint| view! { <span class="form__hint">{hint}</span> })}
            {move || error().map(|e| view! { <span class="form__error" role="alert">{e}</span> })}
        </div>
    }
}
