//! Zone-of-inhibition diameter reference data.
//!
//! Measured disk diameters come from a CSV reference file that is loaded once
//! at startup and installed into a [`DiameterRegistry`]. Request handlers then
//! look up the diameters for an image by its original filename.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod loader;

pub use loader::load_diameters_map;

/// A single inhibition-zone measurement around one antibiotic disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diameter {
    /// Disk position on the plate, 1-based.
    pub disk: u32,
    /// Measured zone diameter in millimeters.
    pub diameter_mm: f64,
}

/// Mapping from image filename (with suffix) to its per-disk measurements,
/// ordered by ascending disk number.
pub type DiameterMap = HashMap<String, Vec<Diameter>>;

#[derive(Debug, Error)]
pub enum DiameterError {
    #[error("File not found")]
    FileNotFound,

    #[error(transparent)]
    Stream(#[from] csv::Error),

    #[error("Diameters map not loaded")]
    NotLoaded,
}

/// Parse options for the CSV reference file.
///
/// The CSV stores image names without an extension; `image_suffix` is appended
/// to form lookup keys. Disk columns beyond `max_disks` are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct DiameterSettings {
    pub image_suffix: String,
    pub max_disks: u32,
}

impl Default for DiameterSettings {
    fn default() -> Self {
        Self {
            image_suffix: ".png".to_string(),
            max_disks: 6,
        }
    }
}

/// Process-wide holder of the most recently loaded diameter map.
///
/// Cloneable handle around a single shared slot, injected through `AppState`.
/// Loading and installing are separate steps: [`load_diameters_map`] is a pure
/// function and [`DiameterRegistry::set_map`] replaces the slot wholesale.
#[derive(Clone, Default)]
pub struct DiameterRegistry {
    inner: Arc<RwLock<Option<DiameterMap>>>,
}

impl DiameterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current map unconditionally. Passing `None` resets the
    /// registry to its uninitialized state.
    pub fn set_map(&self, map: Option<DiameterMap>) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = map;
    }

    /// Looks up the diameters recorded for `image_name`.
    ///
    /// Returns `Err(DiameterError::NotLoaded)` if no map was ever installed —
    /// a startup-sequencing defect that must surface rather than default to
    /// "no diameters". An absent key is `Ok(None)`; a key installed with an
    /// empty list is `Ok(Some(vec![]))`, distinguishable from absence.
    pub fn get(&self, image_name: &str) -> Result<Option<Vec<Diameter>>, DiameterError> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let map = guard.as_ref().ok_or(DiameterError::NotLoaded)?;
        Ok(map.get(image_name).cloned())
    }
}
