use leptos::prelude::*;
use thaw::*;

/// Confirmation of a delete; mounted only while the dialog is open.
///
/// Dismissing (Esc, backdrop, Cancel) is ignored while the delete is pending.
#[component]
pub fn DeleteDialog(
    element_name: &'static str,
    /// Display name of the record being deleted
    #[prop(into)]
    target: String,
    #[prop(into)] pending: Signal<bool>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let open = RwSignal::new(true);

    Effect::new(move |_| {
        if !open.get() {
            if pending.get_untracked() {
                open.set(true);
            } else {
                on_cancel.run(());
            }
        }
    });

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>{format!("Delete {}", element_name)}</DialogTitle>
                    <DialogContent>
                        <p>
                            "Are you sure you want to delete "
                            <strong>{target}</strong>
                            "? This action cannot be undone."
                        </p>
                    </DialogContent>
                    <DialogActions>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            disabled=pending
                            on_click=move |_| open.set(false)
                        >
                            "Cancel"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=pending
                            on_click=move |_| on_confirm.run(())
                        >
                            {move || if pending.get() { "Deleting..." } else { "Delete" }}
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}
