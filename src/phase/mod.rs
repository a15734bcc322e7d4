mod classifier;
mod filter;

pub use classifier::{AltitudeClassifier, AltitudeOrientationClassifier, PhaseClassifier};
pub use filter::{DirectionWindow, PhaseFilter};

/// Classified flight regime, recomputed on every sampling tick from the
/// trailing altitude history. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlightPhase {
    #[default]
    Unknown,
    Rising,
    Falling,
}
