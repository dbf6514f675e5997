// src/common/config.rs

use super::address::{BusAddress, SensorName};
use super::error::ConfigError;
use super::timing;
use core::time::Duration;

/// Fastest clock the converter is driven at. The datasheet rates the part for
/// 4.3 MHz, 5 MHz has proven reliable on short wiring.
pub const MAX_CLOCK_HZ: u32 = 5_000_000;

/// Default clock rate, the datasheet maximum.
pub const DEFAULT_CLOCK_HZ: u32 = 4_300_000;

/// SPI clock polarity / phase combinations.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiMode {
    /// Clock idle low, data sampled on the leading edge.
    #[default]
    Mode0,
    Mode1,
    Mode2,
    Mode3,
}

/// Serial peripheral settings for one chip-select line.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BusConfig {
    pub clock_hz: u32,
    pub mode: SpiMode,
}

impl Default for BusConfig {
    fn default() -> Self {
        BusConfig {
            clock_hz: DEFAULT_CLOCK_HZ,
            mode: SpiMode::Mode0,
        }
    }
}

impl BusConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clock_hz == 0 {
            return Err(ConfigError::ZeroClock);
        }
        if self.clock_hz > MAX_CLOCK_HZ {
            return Err(ConfigError::ClockTooFast {
                requested_hz: self.clock_hz,
                max_hz: MAX_CLOCK_HZ,
            });
        }
        if self.mode != SpiMode::Mode0 {
            return Err(ConfigError::UnsupportedMode(self.mode));
        }
        Ok(())
    }
}

/// When a sensor goes back to the bus instead of returning its stored reading.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CachePolicy {
    /// Every call reads the bus (lifetime zero).
    #[default]
    AlwaysRefresh,
    /// Reuse the stored reading until this much time has passed.
    RefreshAfter(Duration),
}

impl CachePolicy {
    /// Maps a cache lifetime onto a policy; zero means always refresh.
    pub const fn from_lifetime(lifetime: Duration) -> Self {
        if lifetime.is_zero() {
            CachePolicy::AlwaysRefresh
        } else {
            CachePolicy::RefreshAfter(lifetime)
        }
    }

    /// Never poll faster than the chip converts.
    pub const fn conversion_limited() -> Self {
        CachePolicy::RefreshAfter(timing::CONVERSION_TIME)
    }

    pub const fn lifetime(&self) -> Duration {
        match self {
            CachePolicy::AlwaysRefresh => Duration::ZERO,
            CachePolicy::RefreshAfter(lifetime) => *lifetime,
        }
    }

    /// Whether a reading this old must be refreshed.
    pub fn is_expired(&self, elapsed: Duration) -> bool {
        elapsed >= self.lifetime()
    }
}

/// Everything needed to bring up one sensor.
///
/// Bus and chip-select have no defaults; leaving either unset fails
/// [`SensorConfig::address`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorConfig {
    pub name: SensorName,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bus: Option<u8>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub chip_select: Option<u8>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cache: CachePolicy,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bus_config: BusConfig,
}

impl SensorConfig {
    pub fn new(name: SensorName) -> Self {
        SensorConfig {
            name,
            bus: None,
            chip_select: None,
            cache: CachePolicy::default(),
            bus_config: BusConfig::default(),
        }
    }

    pub fn bus(mut self, bus: u8) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn chip_select(mut self, chip_select: u8) -> Self {
        self.chip_select = Some(chip_select);
        self
    }

    /// Sets bus and chip-select together.
    pub fn at(self, address: BusAddress) -> Self {
        self.bus(address.bus()).chip_select(address.chip_select())
    }

    pub fn cache(mut self, cache: CachePolicy) -> Self {
        self.cache = cache;
        self
    }

    pub fn clock_hz(mut self, clock_hz: u32) -> Self {
        self.bus_config.clock_hz = clock_hz;
        self
    }

    pub fn address(&self) -> Result<BusAddress, ConfigError> {
        BusAddress::from_parts(self.bus, self.chip_select)
    }

    /// Checks the whole configuration, returning the resolved address.
    pub fn validate(&self) -> Result<BusAddress, ConfigError> {
        let address = self.address()?;
        self.bus_config.validate()?;
        Ok(address)
    }
}
