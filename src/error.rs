use thiserror::Error;

/// Numeric status codes shared by the event log and the info telemetry
/// frame. Initialization failures are reported through these and logged;
/// they never abort the caller. A failed subsystem only disables its own
/// feature: a dead motion processor leaves altitude classification running,
/// a dead storage sink leaves console logging running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[repr(u8)]
pub enum ErrorCode {
    #[error("no error")]
    Ok = 0,
    #[error("inertial sensor initialization failed")]
    SensorInitFailed = 1,
    #[error("motion processor initialization failed")]
    MotionProcessorInitFailed = 2,
    #[error("barometer initialization failed")]
    BarometerInitFailed = 3,
    #[error("log storage initialization failed")]
    StorageInitFailed = 4,
}

impl ErrorCode {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_ok(self) -> bool {
        self == ErrorCode::Ok
    }
}
