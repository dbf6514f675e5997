// src/common/error.rs

use super::address::{BusAddress, SensorName};
use super::config::SpiMode;

/// Problems with how a sensor or coordinator was configured.
///
/// All of these are raised at construction time, before any bus access.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The bus index was not specified.
    #[error("Bus index was not specified")]
    MissingBus,

    /// The chip-select index was not specified.
    #[error("Chip-select index was not specified")]
    MissingChipSelect,

    /// Two sensors were configured on the same bus line.
    #[error("Bus address {0} is assigned to more than one sensor")]
    DuplicateAddress(BusAddress),

    /// Two sensors were configured with the same name.
    #[error("Sensor name '{0}' is registered more than once")]
    DuplicateName(SensorName),

    #[error("Sensor name is empty")]
    EmptyName,

    #[error("Sensor name exceeds {max} bytes")]
    NameTooLong { max: usize },

    #[error("Clock rate must be non-zero")]
    ZeroClock,

    /// Requested clock exceeds what the converter can shift out reliably.
    #[error("Clock rate {requested_hz} Hz exceeds the {max_hz} Hz limit")]
    ClockTooFast { requested_hz: u32, max_hz: u32 },

    /// The converter only speaks SPI mode 0.
    #[error("Unsupported SPI mode {0:?}, the MAX6675 requires mode 0")]
    UnsupportedMode(SpiMode),

    /// More sensors were configured than the coordinator can hold.
    #[error("Coordinator holds at most {capacity} sensors")]
    TooManySensors { capacity: usize },
}

/// Top-level error for driver operations.
///
/// `E` is the transport's open error. Read errors never show up here; they
/// are folded into [`TemperatureReading::TransportError`](super::TemperatureReading).
#[derive(Debug, thiserror::Error)]
pub enum Max6675Error<E = ()>
where
    E: core::fmt::Debug, // Debug is all the Open(E) message needs
{
    /// Invalid configuration, detected before any bus access.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The bus transport could not be opened.
    #[error("Failed to open bus transport: {0:?}")]
    Open(E),

    /// No sensor with this name is registered.
    #[error("Unknown sensor: '{0}'")]
    UnknownSensor(SensorName),
}

impl<E: core::fmt::Debug> Max6675Error<E> {
    /// Re-types an error that carries no transport payload.
    ///
    /// Only `Open` depends on `E`, so this is lossless for the other variants.
    pub fn widen<F: core::fmt::Debug>(self, f: impl FnOnce(E) -> F) -> Max6675Error<F> {
        match self {
            Max6675Error::Config(e) => Max6675Error::Config(e),
            Max6675Error::Open(e) => Max6675Error::Open(f(e)),
            Max6675Error::UnknownSensor(name) => Max6675Error::UnknownSensor(name),
        }
    }
}
