//! Transient notification.

use leptos::*;

use crate::types::ToastMessage;

#[component]
pub fn Toast(toast: ReadSignal<Option<ToastMessage>>) -> impl IntoView {
    view! {
        <div class="toast" class:show=move || toast.with(Option::is_some)>
            {move || toast.get().map(|t| t.text).unwrap_or_default()}
        </div>
    }
}
