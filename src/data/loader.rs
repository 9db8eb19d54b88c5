use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use eframe::egui;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Dataset, RawVariance, VarianceRecord};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Where a dataset comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{url}"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Load a dataset from either source, blocking the calling thread.
pub fn load(source: &DataSource) -> Result<Dataset, LoadError> {
    match source {
        DataSource::Url(url) => fetch_dataset(url),
        DataSource::File(path) => load_file(path),
    }
}

// ---------------------------------------------------------------------------
// Fetch / read
// ---------------------------------------------------------------------------

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// GET `url` and parse the body as a temperature dataset.
pub fn fetch_dataset(url: &str) -> Result<Dataset, LoadError> {
    let agent: ureq::Agent = ureq::Agent::config_builder()
        .timeout_global(Some(FETCH_TIMEOUT))
        .build()
        .into();

    let mut response = agent
        .get(url)
        .call()
        .map_err(|e| LoadError::Network(e.to_string()))?;
    let text = response
        .body_mut()
        .read_to_string()
        .map_err(|e| LoadError::Network(e.to_string()))?;

    parse_dataset(&text)
}

/// Read a local JSON file with the same shape as the remote dataset.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_dataset(&text)
}

// ---------------------------------------------------------------------------
// Parse + normalize
// ---------------------------------------------------------------------------

/// Top-level wire shape. Entries stay untyped so that one bad entry does not
/// reject the whole document.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDataset {
    base_temperature: f64,
    monthly_variance: Vec<JsonValue>,
}

/// Expected JSON schema:
///
/// ```json
/// {
///   "baseTemperature": 8.66,
///   "monthlyVariance": [
///     { "year": 1753, "month": 1, "variance": -1.366 },
///     ...
///   ]
/// }
/// ```
///
/// Entries with missing or mistyped fields, or a month outside 1..=12, are
/// skipped with a warning.
pub fn parse_dataset(text: &str) -> Result<Dataset, LoadError> {
    let raw: RawDataset =
        serde_json::from_str(text).map_err(|e| LoadError::Parse(e.to_string()))?;
    let base = raw.base_temperature;

    let mut records = Vec::with_capacity(raw.monthly_variance.len());
    let mut skipped = 0usize;

    for (i, entry) in raw.monthly_variance.into_iter().enumerate() {
        let normalized = serde_json::from_value::<RawVariance>(entry)
            .map_err(|e| e.to_string())
            .and_then(|rv| {
                VarianceRecord::from_raw(&rv, base)
                    .ok_or_else(|| format!("month {} out of range", rv.month))
            });
        match normalized {
            Ok(record) => records.push(record),
            Err(reason) => {
                log::warn!("Skipping monthlyVariance[{i}]: {reason}");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        log::warn!("Skipped {skipped} malformed records");
    }

    Ok(Dataset {
        base_temperature: base,
        records,
    })
}

// ---------------------------------------------------------------------------
// Background loading
// ---------------------------------------------------------------------------

/// A load running on a worker thread. Polled once per frame.
pub struct PendingLoad {
    pub generation: u64,
    pub source: DataSource,
    rx: Receiver<Result<Dataset, LoadError>>,
}

impl PendingLoad {
    /// `None` while the worker is still running.
    pub fn poll(&self) -> Option<Result<Dataset, LoadError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(LoadError::Network(
                "loader thread exited without a result".to_string(),
            ))),
        }
    }
}

/// Start loading `source` in the background. The UI is woken once the result
/// is available. If the receiving side is gone by then the result is dropped.
pub fn spawn_fetch(source: DataSource, generation: u64, ctx: &egui::Context) -> PendingLoad {
    let (tx, rx) = mpsc::channel();
    let ctx = ctx.clone();
    let worker_source = source.clone();

    thread::spawn(move || {
        let result = load(&worker_source);
        if tx.send(result).is_err() {
            log::debug!("Load of {worker_source} finished after its receiver was dropped");
            return;
        }
        ctx.request_repaint();
    });

    PendingLoad {
        generation,
        source,
        rx,
    }
}
