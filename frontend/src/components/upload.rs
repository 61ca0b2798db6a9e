//! CSV drop zone with drag & drop support.
//!
//! Clicking the zone opens the file picker. The chosen file is handed to the
//! parent through `on_file`; parsing happens there.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Event, HtmlInputElement};

use crate::config::FILE_INPUT_ID;
use crate::services::{dropped_file, selected_file};
use crate::types::StatusMessage;

#[component]
pub fn UploadSection(
    on_file: Callback<web_sys::File>,
    file_name: ReadSignal<Option<String>>,
    status: ReadSignal<Option<StatusMessage>>,
) -> impl IntoView {
    let (drag_over, set_drag_over) = create_signal(false);

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = selected_file(&input) {
            on_file.call(file);
        }
        // Same file picked twice still fires `change`
        input.set_value("");
    };

    let on_drag_over = move |ev: DragEvent| {
        ev.prevent_default();
        set_drag_over.set(true);
    };

    let on_drag_leave = move |_: DragEvent| set_drag_over.set(false);

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_drag_over.set(false);
        if let Some(file) = dropped_file(&ev) {
            on_file.call(file);
        }
    };

    let trigger_file_input = move |_| {
        if let Some(window) = web_sys::window() {
            if let Some(document) = window.document() {
                if let Some(input) = document.get_element_by_id(FILE_INPUT_ID) {
                    if let Some(html_input) = input.dyn_ref::<HtmlInputElement>() {
                        html_input.click();
                    }
                }
            }
        }
    };

    view! {
        <div
            class="upload-section"
            class:drag-over=move || drag_over.get()
            id="uploadZone"
            on:click=trigger_file_input
            on:dragover=on_drag_over
            on:dragleave=on_drag_leave
            on:drop=on_drop
        >
            <div class="upload-icon">"📦"</div>
            <div class="upload-text">
                {move || match file_name.get() {
                    Some(name) => format!("Loaded: {}", name),
                    None => "Drop a shipments CSV here".to_string(),
                }}
            </div>
            <div class="upload-hint">"or click to choose a file"</div>

            <input
                type="file"
                id=FILE_INPUT_ID
                accept=".csv,text/csv"
                style="display:none"
                on:click=|ev| ev.stop_propagation()
                on:change=on_file_change
            />
        </div>

        <Show
            when=move || status.get().is_some()
            fallback=|| view! { }
        >
            <div class=move || {
                let class = status.get().map(|s| s.css_class()).unwrap_or_default();
                format!("status-line {}", class)
            }>
                {move || status.get().map(|s| s.text).unwrap_or_default()}
            </div>
        </Show>
    }
}
