use std::fs;
use std::path::{Path, PathBuf};
use log::info;
use crate::config::{DisplayParameters, SinkKind};
use crate::errors::DisplayError;
use crate::models::frame::Frame;

/// Something that can put a finished frame on the panel
pub trait DisplaySink {
    /// Commits the frame, blocking until done
    ///
    /// # Arguments
    ///
    /// * 'frame' - the frame to show
    fn show(&mut self, frame: &Frame) -> Result<(), DisplayError>;
}

/// Hands frames to the panel driver through a spool file.
///
/// The frame is written next to the spool file and then renamed into place so the
/// driver never picks up a half written frame.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Returns a new FileSink
    ///
    /// # Arguments
    ///
    /// * 'path' - the spool file the panel driver watches
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl DisplaySink for FileSink {
    fn show(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        let json = serde_json::to_string_pretty(frame)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");

        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        info!("frame with {} labels spooled to {}", frame.labels.len(), self.path.display());

        Ok(())
    }
}

/// Discards frames, for running without a panel attached
pub struct NullSink;

impl DisplaySink for NullSink {
    fn show(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        info!("null display, dropping {}x{} frame:", frame.width, frame.height);
        for label in &frame.labels {
            info!("  ({:>4},{:>4}) {:?} {:?}", label.x, label.y, label.font, label.text);
        }

        Ok(())
    }
}

/// Returns the sink selected in configuration
///
/// # Arguments
///
/// * 'display' - display parameters
pub fn select_sink(display: &DisplayParameters) -> Box<dyn DisplaySink> {
    match display.sink {
        SinkKind::File => Box::new(FileSink::new(&display.output)),
        SinkKind::Null => Box::new(NullSink),
    }
}
