// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod address;
pub mod config;
pub mod error;
pub mod frame;
pub mod hal_traits;
pub mod reading;
pub mod timing;

#[cfg(test)]
pub(crate) mod mock;

// --- Re-export key types/traits/functions for easier access ---

// From address.rs
pub use address::{BusAddress, SensorName, NAME_CAPACITY};

// From config.rs
pub use config::{BusConfig, CachePolicy, SensorConfig, SpiMode};

// From error.rs
pub use error::{ConfigError, Max6675Error};

// From frame.rs
pub use frame::{decode, FrameDiagnostics, RawFrame, FRAME_LEN};

// From hal_traits.rs
pub use hal_traits::{Clock, FrameTransport, TransportOpener};
#[cfg(feature = "std")]
pub use hal_traits::StdClock;

// From reading.rs
pub use reading::{celsius_to_fahrenheit, TemperatureReading, TransportMessage};

// From timing.rs (constants - users can access via common::timing::*)
// No re-exports by default.
