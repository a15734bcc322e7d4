use bytes::{Buf, BufMut};
use thiserror::Error;

use crate::Instant;

pub const DATA3_FRAME_LEN: usize = 8;
pub const FLOAT_FRAME_LEN: usize = 6;
pub const INFO_FRAME_LEN: usize = 4;

/// Only the low 12 bits of the millisecond timestamp go over the air, a
/// ~4 s rolling window. The receiver reconstructs absolute time out-of-band
/// from arrival order and its own coarse clock.
const TIMESTAMP_MASK: u16 = 0x0FFF;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("Frame is {got} bytes, expected {expected}")]
    BadLength { expected: usize, got: usize },

    #[error("Unknown frame mode {0}")]
    UnknownMode(u8),
}

/// Semantic channel of a frame, packed into the top four bits of the id
/// word. Frames are not self-describing: the receiving peer knows which
/// layout to expect from the mode convention alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FrameMode {
    Info = 0,
    Altitude = 1,
    Attitude = 2,
}

impl FrameMode {
    pub fn from_raw(raw: u8) -> Result<Self, FrameError> {
        match raw {
            0 => Ok(FrameMode::Info),
            1 => Ok(FrameMode::Altitude),
            2 => Ok(FrameMode::Attitude),
            _ => Err(FrameError::UnknownMode(raw)),
        }
    }
}

/// One fixed-size binary record for the radio link.
///
/// There is no length prefix and no checksum; integrity is delegated to the
/// radio transport. Encoding is pure and deterministic, and decoding inverts
/// it bit-for-bit given the expected variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TelemetryFrame {
    /// Three signed 16-bit channels behind a 16-bit id word.
    Data3 {
        mode: FrameMode,
        timestamp_ms: u16,
        values: [i16; 3],
    },
    /// One 32-bit float channel behind the same id word.
    Float {
        mode: FrameMode,
        timestamp_ms: u16,
        value: f32,
    },
    /// Status/error report: a numeric code plus a one-byte attachment.
    Info {
        mode: FrameMode,
        timestamp_ms: u16,
        code: u8,
        value: u8,
    },
}

fn low12(t: Instant) -> u16 {
    (t.duration_since_epoch().ticks() as u16) & TIMESTAMP_MASK
}

fn pack_id(mode: FrameMode, timestamp_ms: u16) -> u16 {
    ((mode as u16) << 12) | (timestamp_ms & TIMESTAMP_MASK)
}

impl TelemetryFrame {
    pub fn data3(mode: FrameMode, t: Instant, values: [i16; 3]) -> Self {
        TelemetryFrame::Data3 {
            mode,
            timestamp_ms: low12(t),
            values,
        }
    }

    pub fn float(mode: FrameMode, t: Instant, value: f32) -> Self {
        TelemetryFrame::Float {
            mode,
            timestamp_ms: low12(t),
            value,
        }
    }

    pub fn info(t: Instant, code: u8, value: u8) -> Self {
        TelemetryFrame::Info {
            mode: FrameMode::Info,
            timestamp_ms: low12(t),
            code,
            value,
        }
    }

    pub fn encoded_len(&self) -> usize {
        match self {
            TelemetryFrame::Data3 { .. } => DATA3_FRAME_LEN,
            TelemetryFrame::Float { .. } => FLOAT_FRAME_LEN,
            TelemetryFrame::Info { .. } => INFO_FRAME_LEN,
        }
    }

    /// Serializes into `buf`, which must have room for
    /// [`encoded_len`](TelemetryFrame::encoded_len) bytes.
    pub fn encode(&self, buf: &mut impl BufMut) {
        match *self {
            TelemetryFrame::Data3 {
                mode,
                timestamp_ms,
                values,
            } => {
                buf.put_u16_le(pack_id(mode, timestamp_ms));
                for v in values {
                    buf.put_i16_le(v);
                }
            }
            TelemetryFrame::Float {
                mode,
                timestamp_ms,
                value,
            } => {
                buf.put_u16_le(pack_id(mode, timestamp_ms));
                buf.put_f32_le(value);
            }
            TelemetryFrame::Info {
                mode,
                timestamp_ms,
                code,
                value,
            } => {
                let ts = timestamp_ms & TIMESTAMP_MASK;
                buf.put_u8(((mode as u8) << 4) | (ts >> 8) as u8);
                buf.put_u8(ts as u8);
                buf.put_u8(code);
                buf.put_u8(value);
            }
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode(&mut buf);
        buf
    }

    pub fn decode_data3(mut frame: &[u8]) -> Result<Self, FrameError> {
        if frame.len() != DATA3_FRAME_LEN {
            return Err(FrameError::BadLength {
                expected: DATA3_FRAME_LEN,
                got: frame.len(),
            });
        }

        let id = frame.get_u16_le();
        let mut values = [0i16; 3];
        for v in &mut values {
            *v = frame.get_i16_le();
        }

        Ok(TelemetryFrame::Data3 {
            mode: FrameMode::from_raw((id >> 12) as u8)?,
            timestamp_ms: id & TIMESTAMP_MASK,
            values,
        })
    }

    pub fn decode_float(mut frame: &[u8]) -> Result<Self, FrameError> {
        if frame.len() != FLOAT_FRAME_LEN {
            return Err(FrameError::BadLength {
                expected: FLOAT_FRAME_LEN,
                got: frame.len(),
            });
        }

        let id = frame.get_u16_le();
        let value = frame.get_f32_le();

        Ok(TelemetryFrame::Float {
            mode: FrameMode::from_raw((id >> 12) as u8)?,
            timestamp_ms: id & TIMESTAMP_MASK,
            value,
        })
    }

    pub fn decode_info(frame: &[u8]) -> Result<Self, FrameError> {
        if frame.len() != INFO_FRAME_LEN {
            return Err(FrameError::BadLength {
                expected: INFO_FRAME_LEN,
                got: frame.len(),
            });
        }

        Ok(TelemetryFrame::Info {
            mode: FrameMode::from_raw(frame[0] >> 4)?,
            timestamp_ms: u16::from(frame[0] & 0x0F) << 8 | u16::from(frame[1]),
            code: frame[2],
            value: frame[3],
        })
    }
}
