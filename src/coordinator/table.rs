// src/coordinator/table.rs

use super::{check_unique, validate_configs};
use crate::common::{
    address::SensorName,
    config::SensorConfig,
    error::{ConfigError, Max6675Error},
    hal_traits::{Clock, FrameTransport, TransportOpener},
    reading::TemperatureReading,
};
use crate::sensor::SensorUnit;
use arrayvec::ArrayVec;

/// Sensors a [`Coordinator`] holds unless told otherwise.
pub const DEFAULT_CAPACITY: usize = 8;

/// One `(name, reading)` pair per sensor, in configuration order.
pub type ReadAll<const N: usize> = ArrayVec<(SensorName, TemperatureReading), N>;

/// Up to `N` sensors, each on its own chip-select line, in configuration
/// order.
///
/// Every method takes `&mut self`, so a single owner drives all bus traffic.
/// Wrap it in a [`SharedCoordinator`](super::SharedCoordinator) (feature
/// `std`) to serve concurrent callers.
#[derive(Debug)]
pub struct Coordinator<T, C, const N: usize = DEFAULT_CAPACITY> {
    units: ArrayVec<SensorUnit<T, C>, N>,
}

impl<T, C, const N: usize> Coordinator<T, C, N>
where
    T: FrameTransport,
    C: Clock,
{
    /// Validates the whole list, then opens one transport per entry.
    ///
    /// Nothing is opened if any entry is invalid, two entries share a name or
    /// address, or there are more than `N`. If an open fails part-way, the
    /// transports already opened are closed again.
    pub fn open<O>(
        configs: &[SensorConfig],
        opener: &mut O,
        clock: C,
    ) -> Result<Self, Max6675Error<O::Error>>
    where
        O: TransportOpener<Transport = T>,
        C: Clone,
    {
        validate_configs(configs, N)?;
        let mut units = ArrayVec::new();
        for config in configs {
            units.push(SensorUnit::open(config, opener, clock.clone())?);
        }
        Ok(Coordinator { units })
    }

    /// Collects already-built units, applying the same uniqueness and
    /// capacity rules as [`Coordinator::open`].
    pub fn from_units(
        units: impl IntoIterator<Item = SensorUnit<T, C>>,
    ) -> Result<Self, ConfigError> {
        let mut table = ArrayVec::<SensorUnit<T, C>, N>::new();
        for unit in units {
            check_unique(
                table.iter().map(|u| (u.name(), u.address())),
                unit.name(),
                unit.address(),
            )?;
            table
                .try_push(unit)
                .map_err(|_| ConfigError::TooManySensors { capacity: N })?;
        }
        Ok(Coordinator { units: table })
    }

    /// Reads every sensor in configuration order.
    ///
    /// Each entry stands alone: a fault or bus error on one sensor shows up in
    /// its own reading and does not stop the others from being read.
    pub fn read_all(&mut self) -> ReadAll<N> {
        self.units
            .iter_mut()
            .map(|unit| (*unit.name(), unit.temperature()))
            .collect()
    }

    /// Reads one sensor by name. Unknown names touch no transport.
    pub fn read_one(&mut self, name: &str) -> Result<TemperatureReading, Max6675Error> {
        self.get_mut(name)
            .map(SensorUnit::temperature)
            .ok_or_else(|| Max6675Error::UnknownSensor(SensorName::truncated(name)))
    }
}

impl<T, C, const N: usize> Coordinator<T, C, N> {
    /// Sensor names in configuration order.
    pub fn names(&self) -> impl Iterator<Item = &SensorName> + '_ {
        self.units.iter().map(SensorUnit::name)
    }

    pub fn get(&self, name: &str) -> Option<&SensorUnit<T, C>> {
        self.units.iter().find(|unit| unit.name().as_str() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut SensorUnit<T, C>> {
        self.units.iter_mut().find(|unit| unit.name().as_str() == name)
    }

    /// Units in configuration order.
    pub fn units(&self) -> &[SensorUnit<T, C>] {
        &self.units
    }

    pub fn units_mut(&mut self) -> &mut [SensorUnit<T, C>] {
        &mut self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Gives up ownership of the units, in configuration order.
    pub fn into_units(self) -> impl Iterator<Item = SensorUnit<T, C>> {
        self.units.into_iter()
    }

    /// Closes every transport.
    pub fn close(self) {
        drop(self);
    }
}
