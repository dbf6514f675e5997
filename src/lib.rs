// src/lib.rs

#![cfg_attr(not(any(feature = "std", test)), no_std)] // no_std unless the host opts in

pub mod common;
pub mod coordinator;
pub mod sensor;
pub mod transport;

// Re-export key types for convenience
pub use common::{
    decode, BusAddress, BusConfig, CachePolicy, Clock, ConfigError, FrameDiagnostics,
    FrameTransport, Max6675Error, RawFrame, SensorConfig, SensorName, TemperatureReading,
    TransportOpener,
};
pub use coordinator::Coordinator;
pub use sensor::{SensorState, SensorUnit};

#[cfg(feature = "std")]
pub use common::StdClock;
#[cfg(feature = "std")]
pub use coordinator::SharedCoordinator;
