use nalgebra::{UnitQuaternion, Vector3};

/// One barometric altitude reading after a pass through the phase filter.
///
/// `raw_m` is the sea-level-corrected reading as delivered by the barometer
/// driver (the correction itself happens outside the core). `filtered_m` is
/// the smoothed value and `derivative_m_s` its climb rate estimate over the
/// configured sampling period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AltitudeSample {
    pub raw_m: f32,
    pub filtered_m: f32,
    pub derivative_m_s: f32,
}

/// Orientation and gravity-free acceleration as computed by the external
/// motion co-processor. The core only ever reads these out of the shared
/// buffer the co-processor fills.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationSample {
    pub quat: UnitQuaternion<f32>,
    pub linear_accel_m_s2: Vector3<f32>,
    pub accel_magnitude_m_s2: f32,
}

impl OrientationSample {
    pub fn from_parts(quat: UnitQuaternion<f32>, linear_accel_m_s2: Vector3<f32>) -> Self {
        OrientationSample {
            quat,
            linear_accel_m_s2,
            accel_magnitude_m_s2: linear_accel_m_s2.norm(),
        }
    }
}
