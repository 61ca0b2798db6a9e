//! Shiplabel - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend that turns a CSV of shipments into printable
//! labels. Parsing, validation and PDF layout all run in the browser through
//! `shiplabel`; nothing is sent to a server.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (label count)                                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                    LabelSession (StoredValue)   │
//! │  ├── Hero                                                    │
//! │  ├── UploadSection (drop zone, status line)                  │
//! │  ├── DownloadSection (format, labels.pdf, sample.csv)        │
//! │  └── PreviewSection (when records loaded)                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                             Toast    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Common types (StatusMessage, AppError, etc.)
//! - [`components`] - UI components (Upload, Preview, Download, etc.)
//! - [`services`] - Browser services (file reading, downloads)

use gloo_timers::future::TimeoutFuture;
use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;
use shiplabel::{LabelSession, PageFormat, PdfOptions, Preview, SessionError, SAMPLE_CSV};
use web_sys::File;

// =============================================================================
// Module declarations
// =============================================================================

pub mod components;
pub mod config;
pub mod services;
pub mod types;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{AppError, AppResult, StatusLevel, StatusMessage, ToastMessage};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// Install logging and mount the application on `<body>`.
pub fn mount() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("📦 Shiplabel - Starting Leptos App");

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_NAME/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    // The loaded records live here, outside the reactive graph
    let session = store_value(LabelSession::new());

    let (file_name, set_file_name) = create_signal(None::<String>);
    let (status, set_status) = create_signal(None::<StatusMessage>);
    let (preview, set_preview) = create_signal(None::<Preview>);
    let (count_pop, set_count_pop) = create_signal(false);
    let (toast, set_toast) = create_signal(None::<ToastMessage>);
    let (format, set_format) = create_signal(PageFormat::default());

    let record_count = Signal::derive(move || preview.with(|p| p.as_ref().map_or(0, |p| p.total)));
    let has_records = Signal::derive(move || record_count.get() > 0);

    let toast_counter = store_value(0u64);
    let show_toast = move |text: String| {
        let id = toast_counter.with_value(|n| n + 1);
        toast_counter.set_value(id);
        set_toast.set(Some(ToastMessage { id, text }));
        spawn_local(async move {
            TimeoutFuture::new(TOAST_MS).await;
            set_toast.update(|t| {
                if t.as_ref().map(|t| t.id) == Some(id) {
                    *t = None;
                }
            });
        });
    };

    let on_file = Callback::new(move |file: File| {
        let name = file.name();
        let Some(ticket) = session.try_update_value(|s| s.begin_upload(name.clone())) else {
            return;
        };

        set_file_name.set(Some(name));
        set_status.set(Some(StatusMessage::info("Processing CSV…")));
        show_toast(LOADED_TOAST.to_string());

        spawn_local(async move {
            let bytes = match read_file(&file).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    log::error!("❌ {}", e);
                    if session.with_value(|s| s.is_current(ticket)) {
                        set_status.set(Some(StatusMessage::error(e.to_string())));
                        set_preview.set(None);
                    }
                    return;
                }
            };

            TimeoutFuture::new(PARSE_DELAY_MS).await;

            let outcome = session.try_update_value(|s| {
                s.complete_upload(ticket, &bytes).map(|records| records.len())
            });
            let Some(outcome) = outcome else {
                return;
            };

            match outcome {
                Err(SessionError::Stale { ticket, current }) => {
                    log::debug!("Upload #{} superseded by #{}", ticket, current);
                    return;
                }
                Ok(count) => log::info!("✅ {} records loaded", count),
                Err(e) => log::warn!("⚠️ {}", AppError::from(e)),
            }

            let (csv_status, next_preview) = session.with_value(|s| (s.status().cloned(), s.preview()));
            set_status.set(csv_status.as_ref().map(StatusMessage::from));
            set_preview.set(next_preview);

            if has_records.get_untracked() {
                set_count_pop.set(true);
                TimeoutFuture::new(COUNT_POP_MS).await;
                set_count_pop.set(false);
            }
        });
    });

    let on_generate = Callback::new(move |_: ()| {
        let selected = format.get_untracked();
        let options = PdfOptions {
            title: format!("{} - {}", APP_NAME, selected.label()),
            creation_date: None,
        };
        let result = session
            .with_value(|s| s.generate(selected, &options))
            .map_err(AppError::from)
            .and_then(|bytes| download_bytes(&bytes, OUTPUT_FILENAME, PDF_MIME));

        if let Err(e) = result {
            log::error!("❌ {}", e);
            set_status.set(Some(StatusMessage::error(e.to_string())));
        }
    });

    let on_sample = Callback::new(move |_: ()| {
        if let Err(e) = download_bytes(SAMPLE_CSV.as_bytes(), SAMPLE_FILENAME, CSV_MIME) {
            log::error!("❌ {}", e);
            show_toast(e.to_string());
        }
    });

    view! {
        <Header record_count=record_count/>

        <div class="container">
            <Hero/>

            <UploadSection on_file=on_file file_name=file_name status=status/>

            <DownloadSection
                format=format
                set_format=set_format
                has_records=has_records
                on_generate=on_generate
                on_sample=on_sample
            />

            // Preview section (appears once a CSV is accepted)
            <Show
                when=move || has_records.get()
                fallback=|| view! { }
            >
                <PreviewSection preview=preview count_pop=count_pop/>
            </Show>
        </div>

        <Toast toast=toast/>
        <Footer/>
    }
}
