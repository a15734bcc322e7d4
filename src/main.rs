use std::env;

use anyhow::Result;
use log::{debug, info};

use strato::logging::{EventLogger, LogLevel};
use strato::params::FlightParams;
use strato::phase::{AltitudeClassifier, FlightPhase, PhaseClassifier};
use strato::telemetry::{FrameMode, TelemetryFrame, Transport};
use strato::Instant;

/// Stand-in for the radio driver: counts frames and traces them out.
#[derive(Default)]
struct RadioStub {
    frames_sent: usize,
}

impl Transport for RadioStub {
    fn send(&mut self, frame: &[u8]) {
        self.frames_sent += 1;
        debug!("radio <- {frame:02x?}");
    }
}

/// Synthetic hop: parabolic ascent to a 200 m apogee at t = 5 s, back on the
/// ground at t = 10 s.
fn profile_altitude_m(t_s: f32) -> f32 {
    (200.0 - 8.0 * (t_s - 5.0) * (t_s - 5.0)).max(0.0)
}

fn main() -> Result<()> {
    // Default log level to "info"
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let params = FlightParams::default();
    params.validate()?;

    let log_dir = env::temp_dir().join("strato-demo");
    std::fs::create_dir_all(&log_dir)?;

    let mut classifier = AltitudeClassifier::new(&params);
    let mut radio = RadioStub::default();

    let mut logger = EventLogger::new();
    let status = logger.init(&log_dir, &params);
    logger.log_code(Instant::from_ticks(0), status, LogLevel::Info);
    radio.send(&TelemetryFrame::info(Instant::from_ticks(0), status.code(), 0).to_bytes());

    let period_s = params.sampling_period_ms as f32 / 1000.0;
    let mut phase = FlightPhase::Unknown;

    // Replay a full flight through the pipeline, standing in for the
    // on-board poll loop
    for tick in 0..600u64 {
        let t = Instant::from_ticks(tick * u64::from(params.sampling_period_ms));
        let raw = profile_altitude_m(tick as f32 * period_s);

        let sample = classifier.update_altitude(raw);
        radio.send(&TelemetryFrame::float(FrameMode::Altitude, t, sample.filtered_m).to_bytes());

        if classifier.phase() != phase {
            phase = classifier.phase();
            info!(
                "phase {phase:?} at {:.1} m ({:+.1} m/s)",
                sample.filtered_m, sample.derivative_m_s
            );
            logger.log(t, LogLevel::Info, &format!("phase {phase:?}"));
        }
    }

    info!("flight replay done, {} frames sent", radio.frames_sent);
    if let Some(path) = logger.target_path() {
        info!("event log written to {}", path.display());
    }

    Ok(())
}
