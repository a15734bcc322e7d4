use super::FlightPhase;
use crate::datatypes::AltitudeSample;
use crate::params::FlightParams;

const CONFIRM_MASK: u8 = 0b0111;

/// Debounce window over one direction criterion: an 8-bit shift register
/// that collects one comparison bit per tick. A direction is confirmed when
/// the last three consecutive ticks all satisfied the criterion, which
/// filters single-sample noise spikes. Older bits age out on their own, so
/// confirmation lapses as soon as the evidence stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionWindow {
    bits: u8,
}

impl DirectionWindow {
    /// Records this tick's comparison bit and reports whether the window is
    /// confirmed, then ages the history by one tick.
    pub fn push(&mut self, hit: bool) -> bool {
        self.bits |= hit as u8;
        let confirmed = self.bits & CONFIRM_MASK == CONFIRM_MASK;
        self.bits <<= 1;
        confirmed
    }
}

/// Altitude trend classifier: EWMA smoothing, climb rate estimation and the
/// debounced per-direction windows.
///
/// All cross-tick state lives in the struct itself, owned by whoever drives
/// the tick, so independent instances can run side by side. There is no
/// reset operation: the phase is a pure function of the trailing sample
/// history.
#[derive(Debug, Clone)]
pub struct PhaseFilter {
    alpha: f32,
    rising_threshold: f32,
    falling_threshold: f32,
    period_s: f32,
    filtered: Option<f32>,
    rising: DirectionWindow,
    falling: DirectionWindow,
    phase: FlightPhase,
}

impl PhaseFilter {
    pub fn new(params: &FlightParams) -> Self {
        PhaseFilter {
            alpha: params.smoothing_alpha,
            rising_threshold: params.rising_threshold_m_s,
            falling_threshold: params.falling_threshold_m_s,
            period_s: params.sampling_period_ms as f32 / 1000.0,
            filtered: None,
            rising: DirectionWindow::default(),
            falling: DirectionWindow::default(),
            phase: FlightPhase::Unknown,
        }
    }

    /// Runs one sampling tick. Total over all inputs; never fails.
    pub fn tick(&mut self, raw_m: f32) -> AltitudeSample {
        let (filtered, derivative) = match self.filtered {
            // The first reading seeds the average directly, so there is no
            // smoothing lag toward zero at cold start and no prior value to
            // differentiate against.
            None => (raw_m, 0.0),
            Some(prev) => {
                let filtered = self.alpha * prev + (1.0 - self.alpha) * raw_m;
                (filtered, (filtered - prev) / self.period_s)
            }
        };
        self.filtered = Some(filtered);

        let rising_confirmed = self.rising.push(derivative > self.rising_threshold);
        let falling_confirmed = self.falling.push(derivative < self.falling_threshold);

        // Rising is evaluated first: should both windows ever confirm in the
        // same tick (possible only with overlapping thresholds), RISING wins.
        self.phase = if rising_confirmed {
            FlightPhase::Rising
        } else if falling_confirmed {
            FlightPhase::Falling
        } else {
            FlightPhase::Unknown
        };

        AltitudeSample {
            raw_m,
            filtered_m: filtered,
            derivative_m_s: derivative,
        }
    }

    pub fn phase(&self) -> FlightPhase {
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params(rising: f32, falling: f32, alpha: f32) -> FlightParams {
        FlightParams {
            smoothing_alpha: alpha,
            rising_threshold_m_s: rising,
            falling_threshold_m_s: falling,
            sampling_period_ms: 20,
            ..FlightParams::default()
        }
    }

    #[test]
    fn test_window_confirms_on_three_consecutive_hits() {
        let mut window = DirectionWindow::default();

        assert!(!window.push(true));
        assert!(!window.push(true));
        assert!(window.push(true));
    }

    #[test]
    fn test_window_miss_breaks_the_streak() {
        let mut window = DirectionWindow::default();

        window.push(true);
        window.push(true);
        assert!(!window.push(false));
        assert!(!window.push(true));
        assert!(!window.push(true));
        assert!(window.push(true));
    }

    #[test]
    fn test_first_tick_seeds_filter_exactly() {
        let mut filter = PhaseFilter::new(&params(5.0, -5.0, 0.9));

        let sample = filter.tick(437.25);

        assert_eq!(sample.filtered_m, 437.25);
        assert_eq!(sample.derivative_m_s, 0.0);
        assert_eq!(filter.phase(), FlightPhase::Unknown);
    }

    #[test]
    fn test_rising_confirmed_on_third_tick_not_earlier() {
        let mut filter = PhaseFilter::new(&params(50.0, -50.0, 0.5));

        // Steep ramp: every tick after the first has a climb rate far above
        // threshold (half of 100 m over 20 ms is 2500 m/s)
        filter.tick(0.0);
        assert_eq!(filter.phase(), FlightPhase::Unknown);

        filter.tick(100.0);
        assert_eq!(filter.phase(), FlightPhase::Unknown);

        filter.tick(200.0);
        assert_eq!(filter.phase(), FlightPhase::Unknown);

        filter.tick(300.0);
        assert_eq!(filter.phase(), FlightPhase::Rising);
    }

    #[test]
    fn test_falling_confirmed_on_third_tick() {
        let mut filter = PhaseFilter::new(&params(50.0, -50.0, 0.5));

        filter.tick(1000.0);
        assert_eq!(filter.phase(), FlightPhase::Unknown);
        filter.tick(900.0);
        assert_eq!(filter.phase(), FlightPhase::Unknown);
        filter.tick(800.0);
        assert_eq!(filter.phase(), FlightPhase::Unknown);
        filter.tick(700.0);
        assert_eq!(filter.phase(), FlightPhase::Falling);
    }

    #[test]
    fn test_rising_wins_when_both_windows_confirm() {
        // Overlapping thresholds are rejected by FlightParams::validate, but
        // the tie-break must still be deterministic if they slip through:
        // with rising < falling a zero climb rate satisfies both criteria.
        let mut filter = PhaseFilter::new(&params(-1.0, 1.0, 0.9));

        for _ in 0..4 {
            filter.tick(100.0);
        }

        assert_eq!(filter.phase(), FlightPhase::Rising);
    }

    #[test]
    fn test_confirmation_lapses_without_evidence() {
        let mut filter = PhaseFilter::new(&params(50.0, -50.0, 0.5));

        filter.tick(0.0);
        filter.tick(100.0);
        filter.tick(200.0);
        let sample = filter.tick(300.0);
        assert_eq!(filter.phase(), FlightPhase::Rising);

        // Pin the input to the current filtered value: the climb rate drops
        // to zero and the streak breaks on the next tick
        filter.tick(sample.filtered_m);
        assert_eq!(filter.phase(), FlightPhase::Unknown);
    }

    #[test]
    fn test_ewma_tracks_toward_input() {
        let mut filter = PhaseFilter::new(&params(5.0, -5.0, 0.9));

        filter.tick(100.0);
        let sample = filter.tick(110.0);

        assert_relative_eq!(sample.filtered_m, 101.0, max_relative = 1e-5);
        // 1 m over 20 ms
        assert_relative_eq!(sample.derivative_m_s, 50.0, max_relative = 1e-5);
    }
}
