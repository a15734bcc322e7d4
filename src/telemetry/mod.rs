mod frame;

pub use frame::{
    FrameError, FrameMode, TelemetryFrame, DATA3_FRAME_LEN, FLOAT_FRAME_LEN, INFO_FRAME_LEN,
};

/// Radio driver seam. A send is fire and forget and assumed to block for a
/// bounded duration; retry policy belongs to the transport, not the core.
pub trait Transport {
    fn send(&mut self, frame: &[u8]);
}
