use crate::shared::export::download_file;
use crate::shared::icons::icon;
use crate::shared::master_data::notification::{error_message, Notification};
use crate::shared::master_data::ResourceClient;
use crate::shared::notifications::Notifier;
use contracts::domain::common::AggregateRoot;
use contracts::shared::api::BulkUploadReport;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;

/// Only spreadsheets produced from the template are accepted
pub fn is_spreadsheet(file_name: &str) -> bool {
    let lower = file_name.to_ascii_lowercase();
    lower.ends_with(".xlsx") || lower.ends_with(".xls")
}

async fn read_file(file: &web_sys::File) -> Result<Vec<u8>, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read file: {:?}", e))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Template download, file upload and the resulting row report
#[component]
pub fn BulkUploadDialog<E: AggregateRoot>(
    client: ResourceClient<E>,
    notifier: Notifier,
    /// Called after an upload that imported at least one row
    on_uploaded: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let collection = E::collection();
    let open = RwSignal::new(true);
    let (file, set_file) = signal_local(None::<web_sys::File>);
    let (report, set_report) = signal(None::<BulkUploadReport>);
    let (error, set_error) = signal(None::<String>);
    let (uploading, set_uploading) = signal(false);
    let client = StoredValue::new(client);

    Effect::new(move |_| {
        if !open.get() {
            if uploading.get_untracked() {
                open.set(true);
            } else {
                on_close.run(());
            }
        }
    });

    let handle_file_select = move |ev: leptos::ev::Event| {
        let input = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());
        let selected = input.and_then(|i| i.files()).and_then(|files| files.get(0));
        set_report.set(None);
        match selected {
            Some(f) if !is_spreadsheet(&f.name()) => {
                set_error.set(Some("Please choose an .xlsx file".to_string()));
                set_file.set(None);
            }
            other => {
                set_error.set(None);
                set_file.set(other);
            }
        }
    };

    let download = move |errors_only: bool| {
        let client = client.get_value();
        spawn_local(async move {
            let result = if errors_only {
                client.download_upload_errors().await
            } else {
                client.download_template().await
            };
            match result {
                Ok(downloaded) => {
                    if let Err(e) = download_file(&downloaded) {
                        log::error!("{}", e);
                        notifier.push(Notification::error(e));
                    }
                }
                Err(err) => notifier.push(Notification::from_error(&err)),
            }
        });
    };

    let upload = move |_| {
        let Some(selected) = file.get_untracked() else {
            return;
        };
        if uploading.get_untracked() {
            return;
        }
        set_uploading.set(true);
        set_error.set(None);
        let client = client.get_value();
        spawn_local(async move {
            let outcome = match read_file(&selected).await {
                Ok(bytes) => client
                    .bulk_upload(&selected.name(), &bytes)
                    .await
                    .map_err(|e| error_message(&e)),
                Err(e) => Err(e),
            };
            set_uploading.try_set(false);
            match outcome {
                Ok(result) => {
                    if result.success_count > 0 {
                        client.invalidate();
                        on_uploaded.run(());
                    }
                    let summary = result.summary();
                    if result.has_errors() {
                        notifier.push(Notification::warning(summary));
                    } else {
                        notifier.push(Notification::success(summary));
                    }
                    set_report.try_set(Some(result));
                }
                Err(message) => {
                    log::error!("{}: bulk upload failed: {}", collection.key, message);
                    set_error.try_set(Some(message));
                }
            }
        });
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>{format!("Bulk upload {}", collection.list_name)}</DialogTitle>
                    <DialogContent>
                        <div class="bulk-upload">
                            <p class="bulk-upload__hint">
                                "Fill in the template and upload it. Rows that fail validation are reported below."
                            </p>
                            <Button appearance=ButtonAppearance::Subtle on_click=move |_| download(false)>
                                {icon("download")}
                                " Download template"
                            </Button>

                            <label class="button button--secondary bulk-upload__file-btn" for="bulk-upload-file">
                                {icon("file")}
                                " Choose file"
                            </label>
                            <input
                                id="bulk-upload-file"
                                type="file"
                                accept=".xlsx,.xls"
                                class="hidden"
                                on:change=handle_file_select
                            />
                            <span class="bulk-upload__file-name">
                                {move || file.get().map(|f| f.name()).unwrap_or_else(|| "No file selected".to_string())}
                            </span>

                            {move || error.get().map(|e| view! {
                                <div class="warning-box warning-box--error">
                                    <span class="warning-box__icon">"⚠"</span>
                                    <span class="warning-box__text">{e}</span>
                                </div>
                            })}

                            {move || report.get().map(|r| {
                                let has_errors = r.has_errors();
                                view! {
                                    <div class="bulk-upload__report">
                                        <div class="bulk-upload__counts">
                                            <span>{format!("Total: {}", r.total_rows)}</span>
                                            <span class="text-success">{format!("Imported: {}", r.success_count)}</span>
                                            <span class="text-error">{format!("Failed: {}", r.failure_count)}</span>
                                        </div>
                                        {(!r.errors.is_empty()).then(|| view! {
                                            <table class="table__data table--compact">
                                                <thead>
                                                    <tr>
                                                        <th>"Row"</th>
                                                        <th>"Field"</th>
                                                        <th>"Error"</th>
                                                    </tr>
                                                </thead>
                                                <tbody>
                                                    {r.errors.into_iter().map(|e| view! {
                                                        <tr>
                                                            <td>{e.row}</td>
                                                            <td>{e.field.unwrap_or_else(|| "-".to_string())}</td>
                                                            <td>{e.message}</td>
                                                        </tr>
                                                    }).collect_view()}
                                                </tbody>
                                            </table>
                                        })}
                                        {has_errors.then(|| view! {
                                            <Button appearance=ButtonAppearance::Subtle on_click=move |_| download(true)>
                                                {icon("download")}
                                                " Download error report"
                                            </Button>
                                        })}
                                    </div>
                                }
                            })}
                        </div>
                    </DialogContent>
                    <DialogActions>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            disabled=uploading
                            on_click=move |_| open.set(false)
                        >
                            "Close"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || uploading.get() || file.with(|f| f.is_none()))
                            on_click=upload
                        >
                            {move || if uploading.get() { "Uploading..." } else { "Upload" }}
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_spreadsheet() {
        assert!(is_spreadsheet("Bank_BulkUpload_Template.xlsx"));
        assert!(is_spreadsheet("legacy.XLS"));
        assert!(!is_spreadsheet("banks.csv"));
    }
}
