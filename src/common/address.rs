// src/common/address.rs

use super::error::ConfigError;
use arrayvec::ArrayString;
use core::fmt;
use core::ops::Deref;

/// Maximum length of a sensor name, in bytes.
pub const NAME_CAPACITY: usize = 32;

/// One physical serial-select line: a bus index plus a chip-select index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusAddress {
    bus: u8,
    chip_select: u8,
}

impl BusAddress {
    pub const fn new(bus: u8, chip_select: u8) -> Self {
        BusAddress { bus, chip_select }
    }

    /// Builds an address from optionally-specified parts.
    ///
    /// Neither part has a default: a missing bus or chip-select is a
    /// configuration error, reported bus first.
    pub fn from_parts(bus: Option<u8>, chip_select: Option<u8>) -> Result<Self, ConfigError> {
        let bus = bus.ok_or(ConfigError::MissingBus)?;
        let chip_select = chip_select.ok_or(ConfigError::MissingChipSelect)?;
        Ok(Self::new(bus, chip_select))
    }

    #[inline]
    pub const fn bus(&self) -> u8 {
        self.bus
    }

    #[inline]
    pub const fn chip_select(&self) -> u8 {
        self.chip_select
    }

    /// Device node of this line under the Linux spidev driver.
    #[cfg(feature = "std")]
    pub fn spidev_path(&self) -> std::path::PathBuf {
        std::path::PathBuf::from(format!("/dev/spidev{}.{}", self.bus, self.chip_select))
    }
}

impl From<(u8, u8)> for BusAddress {
    fn from((bus, chip_select): (u8, u8)) -> Self {
        Self::new(bus, chip_select)
    }
}

impl fmt::Display for BusAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spi{}.{}", self.bus, self.chip_select)
    }
}

/// Friendly name of a sensor, stored inline.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ArrayString<NAME_CAPACITY>"))]
pub struct SensorName(ArrayString<NAME_CAPACITY>);

impl SensorName {
    /// Creates a name, rejecting empty strings and strings longer than
    /// [`NAME_CAPACITY`] bytes.
    pub fn new(name: &str) -> Result<Self, ConfigError> {
        if name.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        ArrayString::from(name)
            .map(SensorName)
            .map_err(|_| ConfigError::NameTooLong { max: NAME_CAPACITY })
    }

    /// Creates a name from the longest prefix of `name` that fits, cutting on
    /// a char boundary. Used for echoing caller input back in errors.
    pub(crate) fn truncated(name: &str) -> Self {
        let mut out = ArrayString::new();
        for c in name.chars() {
            if out.try_push(c).is_err() {
                break;
            }
        }
        SensorName(out)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for SensorName {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<&str> for SensorName {
    type Error = ConfigError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<ArrayString<NAME_CAPACITY>> for SensorName {
    type Error = ConfigError;

    fn try_from(value: ArrayString<NAME_CAPACITY>) -> Result<Self, Self::Error> {
        if value.is_empty() {
            Err(ConfigError::EmptyName)
        } else {
            Ok(SensorName(value))
        }
    }
}

impl fmt::Display for SensorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
