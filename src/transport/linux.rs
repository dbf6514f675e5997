// src/transport/linux.rs

use super::HalTransport;
use crate::common::{
    address::BusAddress,
    config::{BusConfig, SpiMode},
    hal_traits::TransportOpener,
};
use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
use linux_embedded_hal::{SPIError, SpidevDevice};
use std::path::{Path, PathBuf};

/// A MAX6675 behind the Linux spidev driver.
pub type SpidevTransport = HalTransport<SpidevDevice>;

/// Opens `/dev/spidev<bus>.<cs>` (or the same name under another directory).
///
/// The device node closes when the transport is dropped.
#[derive(Debug, Clone)]
pub struct SpidevOpener {
    dev_dir: PathBuf,
}

impl Default for SpidevOpener {
    fn default() -> Self {
        SpidevOpener {
            dev_dir: PathBuf::from("/dev"),
        }
    }
}

impl SpidevOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks for device nodes under `dir` instead of `/dev`.
    pub fn with_dev_dir(dir: impl AsRef<Path>) -> Self {
        SpidevOpener {
            dev_dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn device_path(&self, address: BusAddress) -> PathBuf {
        self.dev_dir
            .join(format!("spidev{}.{}", address.bus(), address.chip_select()))
    }
}

fn mode_flags(mode: SpiMode) -> SpiModeFlags {
    match mode {
        SpiMode::Mode0 => SpiModeFlags::SPI_MODE_0,
        SpiMode::Mode1 => SpiModeFlags::SPI_MODE_1,
        SpiMode::Mode2 => SpiModeFlags::SPI_MODE_2,
        SpiMode::Mode3 => SpiModeFlags::SPI_MODE_3,
    }
}

impl TransportOpener for SpidevOpener {
    type Transport = SpidevTransport;
    type Error = SPIError;

    fn open(&mut self, address: BusAddress, config: &BusConfig) -> Result<SpidevTransport, SPIError> {
        let mut device = SpidevDevice::open(self.device_path(address))?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(config.clock_hz)
            .mode(mode_flags(config.mode))
            .build();
        device.configure(&options).map_err(SPIError::from)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(%address, clock_hz = config.clock_hz, "configured spidev");

        Ok(HalTransport::new(device))
    }
}
