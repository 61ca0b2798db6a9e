//! Label preview grid.

use leptos::*;
use shiplabel::{Preview, PreviewCard};

#[component]
pub fn PreviewSection(
    preview: ReadSignal<Option<Preview>>,
    count_pop: ReadSignal<bool>,
) -> impl IntoView {
    let total = move || preview.with(|p| p.as_ref().map_or(0, |p| p.total));
    let flagged = move || preview.with(|p| p.as_ref().map_or(0, Preview::flagged_count));
    // Keyed by (upload, sequence) so a new file never reuses old cards
    let cards = move || preview.with(|p| p.as_ref().map(Preview::keyed_cards).unwrap_or_default());

    view! {
        <div class="preview-section show" id="previewSection">
            <div class="preview-header">
                <div class="preview-title">
                    <span class="label-count" class:count-pop=move || count_pop.get()>
                        {move || format!("{} Labels Loaded", total())}
                    </span>
                </div>
                <Show
                    when=move || { flagged() > 0 }
                    fallback=|| view! { }
                >
                    <span class="badge badge-warning">
                        {move || format!("⚠️ {} flagged", flagged())}
                    </span>
                </Show>
            </div>

            <div class="label-grid">
                <For
                    each=cards
                    key=|(key, _)| *key
                    children=move |(_, card)| view! { <LabelCard card=card/> }
                />
            </div>
        </div>
    }
}

#[component]
fn LabelCard(card: PreviewCard) -> impl IntoView {
    let mut reasons = Vec::new();
    if card.flags.duplicate_tracking {
        reasons.push("Duplicate tracking");
    }
    if card.flags.missing_field {
        reasons.push("Missing field");
    }
    let reasons = reasons.join(" · ");
    let flags_json = serde_json::to_string(&card.flags).unwrap_or_default();

    view! {
        <div class="label-card" class:flagged=card.flagged data-flags=flags_json>
            <div class="label-card-title">{card.title}</div>
            <div class="label-block">
                <div class="label-caption">"FROM:"</div>
                <div>{card.from_name}</div>
                <div class="label-address">{card.from_address}</div>
            </div>
            <div class="label-barcode" inner_html=card.barcode_svg></div>
            <div class="label-tracking">{card.tracking}</div>
            <div class="label-block">
                <div class="label-caption">"TO:"</div>
                <div>{card.to_name}</div>
                <div class="label-address">{card.to_address}</div>
            </div>
            {card.flagged.then(|| view! { <div class="label-flags">{reasons}</div> })}
        </div>
    }
}
