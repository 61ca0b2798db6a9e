use leptos::*;

#[component]
pub fn Header(record_count: Signal<usize>) -> impl IntoView {
    view! {
        <header>
            <div class="header-left">
                <a href="#" class="logo">"SHIPLABEL"</a>
                <span class="badge">
                    {move || match record_count.get() {
                        0 => "No CSV".to_string(),
                        1 => "1 label".to_string(),
                        n => format!("{} labels", n),
                    }}
                </span>
            </div>
        </header>
    }
}
