//! List toolbar helpers: debounced search box and sort indicators
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// Delay between the last keystroke and the search request
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Search box with debounce and a clear button
#[component]
pub fn SearchInput(
    /// Current applied term (for highlighting the box)
    #[prop(into)]
    value: Signal<String>,
    /// Called with the term once typing pauses
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(value.get_untracked());

    // Dropping a pending Timeout cancels it
    let pending = StoredValue::new_local(None::<Timeout>);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        let timeout = Timeout::new(SEARCH_DEBOUNCE_MS, move || {
            on_change.run(new_value);
        });
        pending.set_value(Some(timeout));
    };

    let is_filter_active = move || !value.get().trim().is_empty();

    let clear_filter = move |_| {
        pending.set_value(None);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="search"
                class="search-input__field"
                class:search-input__field--active=is_filter_active
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            {move || (!input_value.get().is_empty()).then(|| view! {
                <button class="search-input__clear" on:click=clear_filter title="Clear">
                    {crate::shared::icons::icon("x")}
                </button>
            })}
        </div>
    }
}

/// Sort indicator of a column header
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending { " ▲" } else { " ▼" }
    } else {
        " ⇅"
    }
}

/// `aria-sort` value of a column header
pub fn get_aria_sort(current_field: &str, field: &str, ascending: bool) -> &'static str {
    match (current_field == field, ascending) {
        (false, _) => "none",
        (true, true) => "ascending",
        (true, false) => "descending",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("bankName", "bankName", true), " ▲");
        assert_eq!(get_sort_indicator("bankName", "bankName", false), " ▼");
        assert_eq!(get_sort_indicator("bankName", "createdAt", true), " ⇅");
        assert_eq!(get_aria_sort("bankName", "createdAt", true), "none");
        assert_eq!(get_aria_sort("bankName", "bankName", false), "descending");
    }
}
