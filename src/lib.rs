//! Core of a rocket-flight avionics computer: altitude-driven flight-phase
//! classification, fixed-size radio telemetry framing and the on-board event
//! log.
//!
//! Hardware bring-up, bus drivers and the boot/poll loop live outside this
//! crate and talk to it through the seams each module exposes: the poll loop
//! feeds raw readings into a [`phase::PhaseClassifier`], serializes events
//! with [`telemetry::TelemetryFrame`] and records them through
//! [`logging::EventLogger`]. Interrupt contexts touch nothing but
//! [`handoff::SampleReadyFlag`].

pub mod common;
pub mod datatypes;
pub mod error;
pub mod handoff;
pub mod logging;
pub mod params;
pub mod phase;
pub mod telemetry;

pub use error::ErrorCode;

/// Milliseconds since boot, the only clock the core knows about.
pub type Instant = fugit::Instant<u64, 1, 1000>;

pub type Duration = fugit::Duration<u64, 1, 1000>;
