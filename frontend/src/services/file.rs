//! Reading user-selected files.

use js_sys::Uint8Array;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{DragEvent, File, HtmlInputElement};

use crate::config::MAX_FILE_SIZE;
use crate::types::{AppError, AppResult};

/// Readable text for a JS exception.
pub fn js_error(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| js_sys::JSON::stringify(value).ok().and_then(|s| s.as_string()))
        .unwrap_or_else(|| "unknown error".to_string())
}

/// First file of a drop event, if any.
pub fn dropped_file(ev: &DragEvent) -> Option<File> {
    ev.data_transfer()?.files()?.get(0)
}

/// First file selected in a file input, if any.
pub fn selected_file(input: &HtmlInputElement) -> Option<File> {
    input.files()?.get(0)
}

/// Read the whole file into memory.
pub async fn read_file(file: &File) -> AppResult<Vec<u8>> {
    let size = file.size();
    if size > MAX_FILE_SIZE as f64 {
        return Err(AppError::File(format!(
            "{} is {:.0} bytes, the limit is {}",
            file.name(),
            size,
            MAX_FILE_SIZE
        )));
    }

    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| AppError::File(js_error(&e)))?;
    let bytes = Uint8Array::new(&buffer).to_vec();

    log::debug!("Read {} bytes from {}", bytes.len(), file.name());
    Ok(bytes)
}
