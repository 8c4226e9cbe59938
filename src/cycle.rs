use std::fmt;
use std::fmt::Formatter;
use log::info;
use crate::display::DisplaySink;
use crate::errors::CycleError;
use crate::layout::Layout;
use crate::manager_forecast::WeatherSource;
use crate::models::forecast::{Coordinates, WarningThresholds};
use crate::snapshot::ChangeDetector;

/// What a display cycle ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Rendered,
    Unchanged,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Outcome::Rendered  => write!(f, "display updated"),
            Outcome::Unchanged => write!(f, "forecast unchanged, display left as is"),
        }
    }
}

/// Everything a display cycle needs
pub struct Cycle<'a> {
    pub source: &'a dyn WeatherSource,
    pub detector: &'a ChangeDetector,
    pub layout: &'a Layout<'a>,
    pub sink: &'a mut dyn DisplaySink,
}

/// Runs one display cycle: fetch, compare with the last drawn forecast, draw if changed
/// and save the snapshot.
///
/// A failed fetch aborts before anything is drawn or saved, leaving the panel showing
/// whatever it showed before. The snapshot is only replaced once the panel took the frame.
///
/// # Arguments
///
/// * 'cycle' - source, change detector, layout and sink to use
/// * 'coordinates' - the point to show weather for
/// * 'thresholds' - warning thresholds
/// * 'force' - draw even if the forecast is unchanged
pub fn run(cycle: Cycle, coordinates: Coordinates, thresholds: WarningThresholds, force: bool) -> Result<Outcome, CycleError> {
    let forecast = cycle.source.fetch(coordinates, thresholds)?;
    info!("fetched forecast from {}: {} now {} (feels like {}) high {} low {} uv {} pop {:?}",
        cycle.source.name(),
        forecast.summary_key,
        forecast.current_temp,
        forecast.feels_like,
        forecast.high_temp,
        forecast.low_temp,
        forecast.uv_index,
        forecast.current_precip_probability);

    if !force && !cycle.detector.has_changed(&forecast)? {
        cycle.detector.persist(&forecast, true)?;
        return Ok(Outcome::Unchanged);
    }

    let frame = cycle.layout.render(&forecast);
    cycle.sink.show(&frame)?;
    cycle.detector.persist(&forecast, false)?;

    Ok(Outcome::Rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fs;
    use crate::config::DisplayParameters;
    use crate::display::tests::RecordingSink;
    use crate::errors::{FetchError, WeatherError};
    use crate::layout::CellMetrics;
    use crate::models::forecast::Forecast;
    use crate::models::forecast::tests::sample_forecast;
    use crate::snapshot::canonical_string;
    use tempfile::tempdir;

    /// Hands out a fixed forecast, or a server error if none, and counts calls
    struct StubSource {
        forecast: Option<Forecast>,
        calls: Cell<u32>,
    }

    impl StubSource {
        fn new(forecast: Option<Forecast>) -> Self {
            Self { forecast, calls: Cell::new(0) }
        }
    }

    impl WeatherSource for StubSource {
        fn fetch(&self, _coordinates: Coordinates, _thresholds: WarningThresholds) -> Result<Forecast, WeatherError> {
            self.calls.set(self.calls.get() + 1);
            self.forecast.clone().ok_or(WeatherError::Fetch(FetchError::Status {
                status: 500,
                url: "https://api.example/forecast".to_string(),
            }))
        }

        fn name(&self) -> &'static str {
            "stub"
        }
    }

    fn run_with(source: &StubSource, detector: &ChangeDetector, sink: &mut RecordingSink, force: bool) -> Result<Outcome, CycleError> {
        let display = DisplayParameters::default();
        let layout = Layout::new(&display, &CellMetrics, false);
        let cycle = Cycle { source, detector, layout: &layout, sink };
        let forecast = sample_forecast();

        run(cycle, forecast.coordinates, forecast.thresholds, force)
    }

    #[test]
    fn test_first_run_renders_then_skips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.txt");
        let detector = ChangeDetector::new(&path);
        let source = StubSource::new(Some(sample_forecast()));
        let mut sink = RecordingSink::default();

        assert_eq!(run_with(&source, &detector, &mut sink, false).unwrap(), Outcome::Rendered);
        assert_eq!(sink.frames.len(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), canonical_string(&sample_forecast()));

        assert_eq!(run_with(&source, &detector, &mut sink, false).unwrap(), Outcome::Unchanged);
        assert_eq!(sink.frames.len(), 1);
        assert_eq!(source.calls.get(), 2);
    }

    #[test]
    fn test_force_renders_unchanged() {
        let dir = tempdir().unwrap();
        let detector = ChangeDetector::new(dir.path().join("snapshot.txt"));
        let source = StubSource::new(Some(sample_forecast()));
        let mut sink = RecordingSink::default();

        run_with(&source, &detector, &mut sink, false).unwrap();
        assert_eq!(run_with(&source, &detector, &mut sink, true).unwrap(), Outcome::Rendered);
        assert_eq!(sink.frames.len(), 2);
    }

    #[test]
    fn test_changed_forecast_renders_and_replaces_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.txt");
        let detector = ChangeDetector::new(&path);
        let mut sink = RecordingSink::default();

        run_with(&StubSource::new(Some(sample_forecast())), &detector, &mut sink, false).unwrap();

        let mut warmer = sample_forecast();
        warmer.high_temp = 80;
        let outcome = run_with(&StubSource::new(Some(warmer.clone())), &detector, &mut sink, false).unwrap();

        assert_eq!(outcome, Outcome::Rendered);
        assert_eq!(sink.frames.len(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), canonical_string(&warmer));
    }

    #[test]
    fn test_fetch_error_aborts() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.txt");
        let detector = ChangeDetector::new(&path);
        let mut sink = RecordingSink::default();

        let err = run_with(&StubSource::new(None), &detector, &mut sink, false).unwrap_err();

        assert!(matches!(err, CycleError::Weather(WeatherError::Fetch(FetchError::Status { status: 500, .. }))));
        assert!(sink.frames.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_sink_error_keeps_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.txt");
        let detector = ChangeDetector::new(&path);
        let mut sink = RecordingSink { frames: vec![], fail: true };

        let err = run_with(&StubSource::new(Some(sample_forecast())), &detector, &mut sink, false).unwrap_err();

        assert!(matches!(err, CycleError::Display(_)));
        assert!(!path.exists());
    }
}
