//! Background dataset loading

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use parking_lot::Mutex;
use tracing::{debug, error, info};

use dv_core::{load_dataset, Dataset, DimensionConfig, RecordSource};
use dv_data::CsvSource;

/// Where the load task leaves its result for the UI thread
type LoadSlot = Arc<Mutex<Option<Result<Dataset>>>>;

/// Runs dataset loads on a tokio runtime so the UI never blocks on I/O.
///
/// Only the most recently started load may deliver a result; a slower,
/// older load finishing later is discarded.
pub struct Loader {
    runtime: tokio::runtime::Runtime,
    slot: LoadSlot,
    generation: Arc<AtomicU64>,
}

impl Loader {
    pub fn new() -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
        Ok(Self {
            runtime,
            slot: Arc::new(Mutex::new(None)),
            generation: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Start loading `path`; the UI is woken through `ctx` when done
    pub fn start(&self, path: PathBuf, dimensions: Vec<DimensionConfig>, ctx: egui::Context) {
        info!("Opening {}", path.display());
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let latest = self.generation.clone();
        let slot = self.slot.clone();

        // A superseded result must not linger until the newer one lands
        self.slot.lock().take();

        self.runtime.spawn(async move {
            let source: Box<dyn RecordSource> = Box::new(CsvSource::from_path(&path));
            let result = load_dataset(source.as_ref(), &dimensions)
                .await
                .with_context(|| format!("Failed to load {}", path.display()));

            let mut slot = slot.lock();
            if latest.load(Ordering::SeqCst) != generation {
                debug!("Dropping superseded load of {}", path.display());
                return;
            }
            if let Err(e) = &result {
                error!("{:#}", e);
            }
            *slot = Some(result);
            ctx.request_repaint();
        });
    }

    /// The finished load, if any; each result is handed out once
    pub fn take(&self) -> Option<Result<Dataset>> {
        self.slot.lock().take()
    }
}
