//! Client-side downloads through a temporary object URL.

use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use super::file::js_error;
use crate::types::{AppError, AppResult};

/// Offer `bytes` to the user as a file called `file_name`.
pub fn download_bytes(bytes: &[u8], file_name: &str, mime: &str) -> AppResult<()> {
    let parts = Array::of1(&Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| AppError::Browser(js_error(&e)))?;

    let url = Url::create_object_url_with_blob(&blob).map_err(|e| AppError::Browser(js_error(&e)))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| AppError::Browser("no document".to_string()))?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| AppError::Browser(js_error(&e)))?
        .dyn_into()
        .map_err(|_| AppError::Browser("could not create link".to_string()))?;

    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    Url::revoke_object_url(&url).map_err(|e| AppError::Browser(js_error(&e)))?;
    log::info!("Downloaded {} ({} bytes)", file_name, bytes.len());
    Ok(())
}
