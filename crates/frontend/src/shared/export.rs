//! Browser side of spreadsheet downloads
use crate::shared::master_data::download::{DownloadedFile, XLSX_MIME};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Wrap raw bytes into a `Blob` of the given MIME type
pub fn bytes_to_blob(bytes: &[u8], mime: &str) -> Result<Blob, JsValue> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);

    let properties = BlobPropertyBag::new();
    properties.set_type(mime);

    Blob::new_with_u8_array_sequence_and_options(&parts, &properties)
}

/// Hand a downloaded spreadsheet to the browser as a file save
pub fn download_file(file: &DownloadedFile) -> Result<(), String> {
    let blob = bytes_to_blob(&file.bytes, XLSX_MIME)
        .map_err(|e| format!("Failed to create blob: {:?}", e))?;
    download_blob(&blob, &file.file_name)
}

/// Click a temporary `<a download>` pointing at the blob
fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .set_attribute("style", "display: none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    log::info!("downloaded {} ({} bytes)", filename, blob.size());
    Ok(())
}
