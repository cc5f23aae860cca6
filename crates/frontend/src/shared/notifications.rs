//! Toast notifications.
//!
//! The [`Notifier`] is created once by the app and handed to every page as
//! part of [`AppServices`](crate::shared::services::AppServices).

use crate::shared::icons::icon;
use crate::shared::master_data::notification::{Notification, NotificationKind};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
}

#[derive(Clone, Copy)]
pub struct Notifier {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
    timeout_ms: u32,
}

impl Notifier {
    /// `timeout_ms == 0` keeps toasts until dismissed
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
            timeout_ms,
        }
    }

    pub fn push(&self, notification: Notification) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        match notification.kind {
            NotificationKind::Error => log::debug!("toast #{} (error): {}", id, notification.message),
            _ => log::debug!("toast #{}: {}", id, notification.message),
        }
        self.toasts.update(|t| t.push(Toast { id, notification }));

        if self.timeout_ms > 0 {
            let this = *self;
            let timeout = self.timeout_ms;
            spawn_local(async move {
                TimeoutFuture::new(timeout).await;
                this.dismiss(id);
            });
        }
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.try_update(|t| t.retain(|toast| toast.id != id));
    }

    pub fn toasts(&self) -> Signal<Vec<Toast>> {
        self.toasts.into()
    }
}

fn toast_class(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "toast toast--success",
        NotificationKind::Info => "toast toast--info",
        NotificationKind::Warning => "toast toast--warning",
        NotificationKind::Error => "toast toast--error",
    }
}

/// Stack of live toasts, rendered once at the app root
#[component]
pub fn NotificationHost(notifier: Notifier) -> impl IntoView {
    view! {
        <div class="toast-stack" role="status" aria-live="polite">
            <For
                each=move || notifier.toasts().get()
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast_class(toast.notification.kind)>
                            <span class="toast__text">{toast.notification.message}</span>
                            <button
                                class="toast__close"
                                title="Dismiss"
                                on:click=move |_| notifier.dismiss(id)
                            >
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
