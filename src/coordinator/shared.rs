// src/coordinator/shared.rs

use super::{validate_configs, Coordinator};
use crate::common::{
    address::SensorName,
    config::SensorConfig,
    error::Max6675Error,
    hal_traits::{Clock, FrameTransport, TransportOpener},
    reading::TemperatureReading,
};
use crate::sensor::SensorUnit;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Coordinator for concurrent callers, such as a request handler pool.
///
/// Each sensor sits behind its own lock, so at most one transaction is in
/// flight per chip-select line while different lines are read in parallel.
/// Build it once at startup and hand an `Arc` of it to whoever serves reads.
#[derive(Debug)]
pub struct SharedCoordinator<T, C> {
    names: Vec<SensorName>,
    units: Vec<Mutex<SensorUnit<T, C>>>,
}

impl<T, C> SharedCoordinator<T, C>
where
    T: FrameTransport,
    C: Clock,
{
    /// Same validation and open order as [`Coordinator::open`], without a
    /// capacity limit.
    pub fn open<O>(
        configs: &[SensorConfig],
        opener: &mut O,
        clock: C,
    ) -> Result<Self, Max6675Error<O::Error>>
    where
        O: TransportOpener<Transport = T>,
        C: Clone,
    {
        validate_configs(configs, usize::MAX)?;
        let units = configs
            .iter()
            .map(|config| SensorUnit::open(config, opener, clock.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_validated(units))
    }

    /// Reads every sensor in configuration order, one lock at a time.
    pub fn read_all(&self) -> Vec<(SensorName, TemperatureReading)> {
        self.names
            .iter()
            .zip(&self.units)
            .map(|(name, unit)| (*name, lock(unit).temperature()))
            .collect()
    }

    /// Reads one sensor by name. Unknown names take no lock.
    pub fn read_one(&self, name: &str) -> Result<TemperatureReading, Max6675Error> {
        self.with_unit(name, SensorUnit::temperature)
    }
}

impl<T, C> SharedCoordinator<T, C> {
    fn from_validated(units: Vec<SensorUnit<T, C>>) -> Self {
        SharedCoordinator {
            names: units.iter().map(|unit| *unit.name()).collect(),
            units: units.into_iter().map(Mutex::new).collect(),
        }
    }

    /// Sensor names in configuration order. Takes no lock.
    pub fn names(&self) -> &[SensorName] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Runs `f` with exclusive access to one sensor.
    pub fn with_unit<R>(
        &self,
        name: &str,
        f: impl FnOnce(&mut SensorUnit<T, C>) -> R,
    ) -> Result<R, Max6675Error> {
        let index = self
            .names
            .iter()
            .position(|n| n.as_str() == name)
            .ok_or_else(|| Max6675Error::UnknownSensor(SensorName::truncated(name)))?;
        let mut unit = lock(&self.units[index]);
        Ok(f(&mut *unit))
    }

    /// Closes every transport.
    pub fn close(self) {
        drop(self);
    }
}

impl<T, C, const N: usize> From<Coordinator<T, C, N>> for SharedCoordinator<T, C> {
    fn from(coordinator: Coordinator<T, C, N>) -> Self {
        Self::from_validated(coordinator.into_units().collect())
    }
}

/// A panic while a sensor was locked cannot leave it half-updated: a refresh
/// replaces its stored reading in one assignment. So poisoning is ignored.
fn lock<U>(unit: &Mutex<U>) -> MutexGuard<'_, U> {
    unit.lock().unwrap_or_else(PoisonError::into_inner)
}
