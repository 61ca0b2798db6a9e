//! Footer component

use leptos::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer>
            <div>
                "Required columns: "
                <code>{shiplabel::REQUIRED_FIELDS.join(", ")}</code>
            </div>
            <div>"Powered by " <span class="rust-badge">"🦀 Rust + Leptos"</span></div>
        </footer>
    }
}
