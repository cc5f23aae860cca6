use crate::shared::icons::icon;
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Right-hand side panel over a dimmed overlay.
///
/// Closes on a click that both starts and ends on the overlay, so selecting
/// text inside the panel and releasing outside keeps it open. Closing is
/// refused while `locked` (a submission is in flight).
#[component]
pub fn Drawer(
    #[prop(into)] title: Signal<String>,
    on_close: Callback<()>,
    #[prop(into)] locked: Signal<bool>,
    children: Children,
) -> impl IntoView {
    let overlay_mouse_down = RwSignal::new(false);

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    let request_close = move || {
        if locked.get_untracked() {
            return;
        }
        // Next tick: the overlay must not be removed during its own click dispatch
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            on_close.run(());
        });
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close = overlay_mouse_down.get() && is_direct_overlay_event(&ev);
        overlay_mouse_down.set(false);
        if should_close {
            request_close();
        }
    };

    view! {
        <div
            class="drawer-overlay"
            on:mousedown=move |ev| overlay_mouse_down.set(is_direct_overlay_event(&ev))
            on:click=handle_overlay_click
        >
            <aside class="drawer" role="dialog" aria-modal="true" on:click=|ev| ev.stop_propagation()>
                <header class="drawer__header">
                    <h2 class="drawer__title">{move || title.get()}</h2>
                    <button
                        class="drawer__close"
                        title="Close"
                        disabled=move || locked.get()
                        on:click=move |_| request_close()
                    >
                        {icon("x")}
                    </button>
                </header>
                <div class="drawer__body">{children()}</div>
            </aside>
        </div>
    }
}
