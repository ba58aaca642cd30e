//! One-shot background dataset load, so the first frame (the loading
//! indicator) is drawn before any parsing happens.

use std::path::PathBuf;

use tokio::sync::mpsc;

use crate::core::dataset::{Dataset, DatasetError};

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// The asset compiled into the binary.
    Bundled,
    /// A JSON file on disk.
    File(PathBuf),
}

impl DataSource {
    pub fn load(&self) -> Result<Dataset, DatasetError> {
        match self {
            DataSource::Bundled => Dataset::bundled(),
            DataSource::File(path) => Dataset::from_path(path),
        }
    }
}

pub struct LoadUpdate {
    pub source: DataSource,
    pub result: Result<Dataset, DatasetError>,
}

pub fn spawn_dataset_load(tx: mpsc::UnboundedSender<LoadUpdate>, source: DataSource) {
    std::thread::spawn(move || {
        let t0 = std::time::Instant::now();
        let result = source.load();
        tracing::debug!(?source, ok = result.is_ok(), "dataset load: {:.2?}", t0.elapsed());
        deliver(&tx, LoadUpdate { source, result });
    });
}

/// Send the load result; returns `false` when the UI has already gone away.
fn deliver(tx: &mpsc::UnboundedSender<LoadUpdate>, update: LoadUpdate) -> bool {
    let delivered = tx.send(update).is_ok();
    if !delivered {
        tracing::debug!("dataset load finished after the receiver was dropped");
    }
    delivered
}
