use super::{FlightPhase, PhaseFilter};
use crate::common::Ts;
use crate::datatypes::{AltitudeSample, OrientationSample};
use crate::params::FlightParams;

/// Seam between the poll loop and whichever classification stack the build
/// wires in, selected at construction time rather than by conditional
/// compilation.
pub trait PhaseClassifier {
    /// Feeds one raw altitude reading through the filter stage and returns
    /// the resulting sample.
    fn update_altitude(&mut self, raw_m: f32) -> AltitudeSample;

    /// Phase classified as of the latest tick.
    fn phase(&self) -> FlightPhase;

    /// Offers the newest motion-processor output. Implementations that do
    /// not consume orientation ignore it.
    fn observe_orientation(&mut self, _sample: Ts<OrientationSample>) {}
}

/// Classification from the barometric altitude trend alone.
pub struct AltitudeClassifier {
    filter: PhaseFilter,
}

impl AltitudeClassifier {
    pub fn new(params: &FlightParams) -> Self {
        AltitudeClassifier {
            filter: PhaseFilter::new(params),
        }
    }
}

impl PhaseClassifier for AltitudeClassifier {
    fn update_altitude(&mut self, raw_m: f32) -> AltitudeSample {
        self.filter.tick(raw_m)
    }

    fn phase(&self) -> FlightPhase {
        self.filter.phase()
    }
}

/// Altitude classification with the motion-processor feed wired in.
///
/// The inner-product fall/rise heuristic over gravity and linear
/// acceleration is deliberately not active: the latest orientation sample is
/// only retained for telemetry and inspection, and the phase stays
/// altitude-driven.
pub struct AltitudeOrientationClassifier {
    filter: PhaseFilter,
    last_orientation: Option<Ts<OrientationSample>>,
}

impl AltitudeOrientationClassifier {
    pub fn new(params: &FlightParams) -> Self {
        AltitudeOrientationClassifier {
            filter: PhaseFilter::new(params),
            last_orientation: None,
        }
    }

    pub fn last_orientation(&self) -> Option<&Ts<OrientationSample>> {
        self.last_orientation.as_ref()
    }
}

impl PhaseClassifier for AltitudeOrientationClassifier {
    fn update_altitude(&mut self, raw_m: f32) -> AltitudeSample {
        self.filter.tick(raw_m)
    }

    fn phase(&self) -> FlightPhase {
        self.filter.phase()
    }

    fn observe_orientation(&mut self, sample: Ts<OrientationSample>) {
        self.last_orientation = Some(sample);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{UnitQuaternion, Vector3};

    #[test]
    fn test_altitude_classifier_follows_filter() {
        let params = FlightParams {
            smoothing_alpha: 0.5,
            rising_threshold_m_s: 50.0,
            falling_threshold_m_s: -50.0,
            ..FlightParams::default()
        };
        let mut classifier = AltitudeClassifier::new(&params);

        for raw in [0.0, 100.0, 200.0, 300.0] {
            classifier.update_altitude(raw);
        }

        assert_eq!(classifier.phase(), FlightPhase::Rising);
    }

    #[test]
    fn test_orientation_is_retained_but_inert() {
        let params = FlightParams::default();
        let mut classifier = AltitudeOrientationClassifier::new(&params);

        assert!(classifier.last_orientation().is_none());

        let sample = OrientationSample::from_parts(
            UnitQuaternion::identity(),
            Vector3::new(0.0, 0.0, -30.0),
        );
        classifier.observe_orientation(Ts::from_millis(120, sample));
        classifier.update_altitude(150.0);

        let kept = classifier.last_orientation().unwrap();
        assert_eq!(kept.t, crate::Instant::from_ticks(120));
        assert_eq!(kept.v, sample);
        // A violent downward acceleration alone never drives the phase
        assert_eq!(classifier.phase(), FlightPhase::Unknown);
    }
}
