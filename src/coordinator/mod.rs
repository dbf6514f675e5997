// src/coordinator/mod.rs

// Fixed-capacity, single-owner coordinator (no_std).
mod table;
pub use table::{Coordinator, ReadAll, DEFAULT_CAPACITY};

// Lock-per-sensor coordinator for concurrent callers.
#[cfg(feature = "std")]
mod shared;
#[cfg(feature = "std")]
pub use shared::SharedCoordinator;

use crate::common::{
    address::{BusAddress, SensorName},
    config::SensorConfig,
    error::ConfigError,
};

/// Checks a sensor list as a whole: every entry valid, no shared name or
/// address, and no more than `capacity` entries.
///
/// Runs before any transport is opened.
pub(crate) fn validate_configs(configs: &[SensorConfig], capacity: usize) -> Result<(), ConfigError> {
    if configs.len() > capacity {
        return Err(ConfigError::TooManySensors { capacity });
    }
    for (i, config) in configs.iter().enumerate() {
        let address = config.validate()?;
        for earlier in &configs[..i] {
            if earlier.name == config.name {
                return Err(ConfigError::DuplicateName(config.name));
            }
            // Earlier entries already passed validation.
            if earlier.address().ok() == Some(address) {
                return Err(ConfigError::DuplicateAddress(address));
            }
        }
    }
    Ok(())
}

/// Same checks for a unit joining an existing set.
pub(crate) fn check_unique<'a>(
    mut existing: impl Iterator<Item = (&'a SensorName, BusAddress)>,
    name: &SensorName,
    address: BusAddress,
) -> Result<(), ConfigError> {
    existing.try_for_each(|(other_name, other_address)| {
        if other_name == name {
            Err(ConfigError::DuplicateName(*name))
        } else if other_address == address {
            Err(ConfigError::DuplicateAddress(address))
        } else {
            Ok(())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(name: &str, bus: u8, cs: u8) -> SensorConfig {
        SensorConfig::new(SensorName::new(name).unwrap()).bus(bus).chip_select(cs)
    }

    #[test]
    fn test_validate_configs_accepts_distinct_sensors() {
        let configs = [config("tc1", 0, 0), config("tc2", 0, 1), config("tc3", 1, 0)];
        assert_eq!(validate_configs(&configs, 3), Ok(()));
    }

    #[test]
    fn test_validate_configs_rejects_shared_address() {
        let configs = [config("tc1", 0, 0), config("tc2", 0, 1), config("tc3", 0, 1)];
        assert_eq!(
            validate_configs(&configs, 8),
            Err(ConfigError::DuplicateAddress(BusAddress::new(0, 1)))
        );
    }

    #[test]
    fn test_validate_configs_rejects_shared_name() {
        let configs = [config("tc1", 0, 0), config("tc1", 0, 1)];
        assert_eq!(
            validate_configs(&configs, 8),
            Err(ConfigError::DuplicateName(SensorName::new("tc1").unwrap()))
        );
    }

    #[test]
    fn test_validate_configs_capacity_and_missing_parts() {
        let configs = [config("tc1", 0, 0), config("tc2", 0, 1)];
        assert_eq!(
            validate_configs(&configs, 1),
            Err(ConfigError::TooManySensors { capacity: 1 })
        );

        let missing = [config("tc1", 0, 0), SensorConfig::new(SensorName::new("tc2").unwrap()).bus(0)];
        assert_eq!(validate_configs(&missing, 8), Err(ConfigError::MissingChipSelect));
    }
}
