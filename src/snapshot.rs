use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use log::debug;
use crate::errors::SnapshotError;
use crate::models::forecast::{decimal, Forecast};

/// Keeps track of what was last drawn on the display so that unchanged forecasts
/// don't cause a (slow and visible) e-ink refresh.
pub struct ChangeDetector {
    path: PathBuf,
}

impl ChangeDetector {
    /// Returns a new ChangeDetector
    ///
    /// # Arguments
    ///
    /// * 'path' - the snapshot file
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    /// Returns true if there is no snapshot or if the snapshot differs from the forecast
    ///
    /// # Arguments
    ///
    /// * 'forecast' - freshly fetched forecast
    pub fn has_changed(&self, forecast: &Forecast) -> Result<bool, SnapshotError> {
        match self.read()? {
            Some(previous) => {
                let current = canonical_string(forecast);
                debug!("snapshot: previous {:?}, current {:?}", previous.trim_end(), current.trim_end());
                Ok(previous != current)
            },
            None => {
                debug!("no snapshot at {}", self.path.display());
                Ok(true)
            },
        }
    }

    /// Saves the forecast as the new snapshot
    ///
    /// # Arguments
    ///
    /// * 'forecast' - the forecast to save
    /// * 'only_if_absent' - leave any existing snapshot as is
    pub fn persist(&self, forecast: &Forecast, only_if_absent: bool) -> Result<(), SnapshotError> {
        if only_if_absent && self.exists()? {
            return Ok(());
        }

        fs::write(&self.path, canonical_string(forecast))
            .map_err(|e| SnapshotError::Write { path: self.path.display().to_string(), source: e })
    }

    fn exists(&self) -> Result<bool, SnapshotError> {
        self.path.try_exists()
            .map_err(|e| SnapshotError::Read { path: self.path.display().to_string(), source: e })
    }

    /// Reads the snapshot, None if there is no such file
    fn read(&self) -> Result<Option<String>, SnapshotError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SnapshotError::Read { path: self.path.display().to_string(), source: e }),
        }
    }
}

/// Serializes the fields shown on the display into a single line. Two forecasts are the
/// same for display purposes exactly when their canonical strings are equal.
///
/// # Arguments
///
/// * 'forecast' - the forecast to serialize
pub fn canonical_string(forecast: &Forecast) -> String {
    let pop = forecast.current_precip_probability
        .map_or("none".to_string(), decimal);

    format!("{}|{}|pop:{}|low:{}|high:{}|uv:{}\n",
            forecast.coordinates,
            forecast.summary_key,
            pop,
            forecast.low_temp,
            forecast.high_temp,
            forecast.uv_index)
}
