mod sensors;

pub use sensors::{AltitudeSample, OrientationSample};
