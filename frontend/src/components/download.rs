//! Page format picker and download buttons.

use leptos::*;
use shiplabel::PageFormat;

#[component]
pub fn DownloadSection(
    format: ReadSignal<PageFormat>,
    set_format: WriteSignal<PageFormat>,
    has_records: Signal<bool>,
    on_generate: Callback<()>,
    on_sample: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="download-section">
            <label class="format-picker">
                "Page format"
                <select
                    id="formatSelect"
                    on:change=move |ev| set_format.set(PageFormat::from_selector(&event_target_value(&ev)))
                >
                    {PageFormat::ALL
                        .into_iter()
                        .map(|f| view! {
                            <option value=f.as_str() selected=move || format.get() == f>
                                {f.label()}
                            </option>
                        })
                        .collect_view()}
                </select>
            </label>

            <button
                class="btn btn-primary"
                id="generateBtn"
                disabled=move || !has_records.get()
                on:click=move |_| on_generate.call(())
            >
                "⬇️ Download labels.pdf"
            </button>

            <button class="btn btn-secondary" id="sampleBtn" on:click=move |_| on_sample.call(())>
                "Download sample.csv"
            </button>
        </div>
    }
}
