// src/sensor/unit.rs

use crate::common::{
    address::{BusAddress, SensorName},
    config::{CachePolicy, SensorConfig},
    error::Max6675Error,
    frame::{decode, FrameDiagnostics},
    hal_traits::{Clock, FrameTransport, TransportOpener},
    reading::TemperatureReading,
};
use core::fmt;
use core::time::Duration;

/// Caller-supplied callback run on every frame fetched from the bus.
pub type DiagnosticHook = fn(&SensorName, &FrameDiagnostics);

/// Where a unit is in its read cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorState {
    AwaitingFirstRead,
    Valid,
    /// Open thermocouple or zero frame.
    Fault,
    TransportError,
}

/// One MAX6675 on its own chip-select line.
///
/// Owns the transport handle; dropping the unit closes it.
pub struct SensorUnit<T, C> {
    name: SensorName,
    address: BusAddress,
    cache: CachePolicy,
    transport: T,
    clock: C,
    last_reading: Option<TemperatureReading>,
    last_refresh: Option<Duration>,
    bus_reads: u32,
    diagnostics: Option<DiagnosticHook>,
}

impl<T, C> SensorUnit<T, C>
where
    T: FrameTransport,
    C: Clock,
{
    /// Validates `config` and opens its transport.
    ///
    /// Configuration problems are reported before `opener` is called.
    pub fn open<O>(
        config: &SensorConfig,
        opener: &mut O,
        clock: C,
    ) -> Result<Self, Max6675Error<O::Error>>
    where
        O: TransportOpener<Transport = T>,
    {
        let address = config.validate()?;
        let transport = opener
            .open(address, &config.bus_config)
            .map_err(Max6675Error::Open)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sensor = %config.name,
            %address,
            clock_hz = config.bus_config.clock_hz,
            "opened sensor"
        );

        Ok(Self::new(config.name, address, config.cache, transport, clock))
    }

    /// Wraps an already-open transport.
    pub fn new(
        name: SensorName,
        address: BusAddress,
        cache: CachePolicy,
        transport: T,
        clock: C,
    ) -> Self {
        SensorUnit {
            name,
            address,
            cache,
            transport,
            clock,
            last_reading: None,
            last_refresh: None,
            bus_reads: 0,
            diagnostics: None,
        }
    }

    /// The current reading, from the bus if the stored one is stale.
    pub fn temperature(&mut self) -> TemperatureReading {
        if !self.is_stale() {
            if let Some(reading) = &self.last_reading {
                return reading.clone();
            }
        }
        self.refresh()
    }

    /// True before the first read, and once the cache lifetime has run out.
    pub fn is_stale(&self) -> bool {
        match self.last_refresh {
            None => true,
            Some(at) => self.cache.is_expired(self.clock.now().saturating_sub(at)),
        }
    }

    /// Reads and decodes a frame regardless of the cache, and stores it.
    ///
    /// Bus errors end up in the returned reading, never as a panic.
    pub fn refresh(&mut self) -> TemperatureReading {
        self.bus_reads = self.bus_reads.saturating_add(1);
        let reading = match self.transport.read_frame() {
            Ok(frame) => {
                if let Some(hook) = self.diagnostics {
                    hook(&self.name, &FrameDiagnostics::from(frame));
                }
                decode(frame)
            }
            Err(e) => TemperatureReading::transport_error(&e),
        };
        self.last_refresh = Some(self.clock.now());
        self.trace(&reading);
        self.last_reading = Some(reading.clone());
        reading
    }

    /// One uncached bus read, fully broken down. Stored state is untouched.
    pub fn read_raw_debug(&mut self) -> Result<FrameDiagnostics, T::Error> {
        self.bus_reads = self.bus_reads.saturating_add(1);
        self.transport.read_frame().map(FrameDiagnostics::from)
    }

    #[cfg(feature = "tracing")]
    fn trace(&self, reading: &TemperatureReading) {
        match reading {
            TemperatureReading::Valid { celsius, raw_code } => tracing::debug!(
                sensor = %self.name,
                address = %self.address,
                celsius = *celsius,
                raw_code = *raw_code,
                "refreshed"
            ),
            TemperatureReading::FaultOpenCircuit => tracing::warn!(
                sensor = %self.name,
                address = %self.address,
                "thermocouple not connected"
            ),
            TemperatureReading::FaultZeroFrame => tracing::warn!(
                sensor = %self.name,
                address = %self.address,
                "frame read back as zero, check wiring"
            ),
            TemperatureReading::TransportError(message) => tracing::warn!(
                sensor = %self.name,
                address = %self.address,
                error = %message,
                "bus read failed"
            ),
        }
    }

    #[cfg(not(feature = "tracing"))]
    #[inline]
    fn trace(&self, _reading: &TemperatureReading) {}
}

impl<T, C> SensorUnit<T, C> {
    #[inline]
    pub fn name(&self) -> &SensorName {
        &self.name
    }

    #[inline]
    pub fn address(&self) -> BusAddress {
        self.address
    }

    #[inline]
    pub fn cache_policy(&self) -> CachePolicy {
        self.cache
    }

    /// Takes effect from the next `temperature()` call.
    pub fn set_cache_policy(&mut self, cache: CachePolicy) {
        self.cache = cache;
    }

    pub fn set_diagnostics(&mut self, hook: Option<DiagnosticHook>) {
        self.diagnostics = hook;
    }

    pub fn last_reading(&self) -> Option<&TemperatureReading> {
        self.last_reading.as_ref()
    }

    /// Clock time of the last refresh.
    pub fn last_refresh(&self) -> Option<Duration> {
        self.last_refresh
    }

    /// Bus transactions performed so far.
    pub fn bus_reads(&self) -> u32 {
        self.bus_reads
    }

    pub fn state(&self) -> SensorState {
        match &self.last_reading {
            None => SensorState::AwaitingFirstRead,
            Some(TemperatureReading::Valid { .. }) => SensorState::Valid,
            Some(TemperatureReading::FaultOpenCircuit | TemperatureReading::FaultZeroFrame) => {
                SensorState::Fault
            }
            Some(TemperatureReading::TransportError(_)) => SensorState::TransportError,
        }
    }

    /// Hands the transport back without closing it.
    pub fn release(self) -> T {
        self.transport
    }

    /// Closes the transport now.
    pub fn close(self) {
        drop(self);
    }
}

impl<T, C> fmt::Debug for SensorUnit<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SensorUnit")
            .field("name", &self.name)
            .field("address", &self.address)
            .field("cache", &self.cache)
            .field("last_reading", &self.last_reading)
            .field("last_refresh", &self.last_refresh)
            .field("bus_reads", &self.bus_reads)
            .finish_non_exhaustive()
    }
}
