//! Hero section component

use leptos::*;

use crate::config::APP_NAME;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>{APP_NAME}</h1>
            <p class="subtitle">
                "Upload a CSV of shipments, check every label, then download a print-ready PDF. "
                "Everything runs in your browser."
            </p>
        </div>
    }
}
