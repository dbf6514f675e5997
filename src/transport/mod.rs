// src/transport/mod.rs

//! Concrete [`FrameTransport`](crate::FrameTransport) implementations.
//!
//! - `impl-hal`: any embedded-hal 1.0 `SpiDevice`.
//! - `impl-linux`: `/dev/spidevB.C` through linux-embedded-hal.
//!
//! Without either feature, supply your own transport (or a closure opener).

#[cfg(feature = "impl-hal")]
mod hal;
#[cfg(feature = "impl-hal")]
pub use hal::HalTransport;

#[cfg(feature = "impl-linux")]
mod linux;
#[cfg(feature = "impl-linux")]
pub use linux::{SpidevOpener, SpidevTransport};
