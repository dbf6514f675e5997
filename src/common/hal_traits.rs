// src/common/hal_traits.rs

use super::address::BusAddress;
use super::config::BusConfig;
use super::frame::RawFrame;
use core::fmt::Debug;
use core::time::Duration;

/// An open handle on one chip-select line.
///
/// Dropping the handle closes it. Ownership makes that happen exactly once,
/// on normal return and on unwind alike.
pub trait FrameTransport {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Reads one frame in a single chip-select transaction.
    ///
    /// Blocks until both bytes have been clocked in. Implementations must
    /// never hand back a partial frame; a short read is an error.
    fn read_frame(&mut self) -> Result<RawFrame, Self::Error>;
}

impl<T: FrameTransport + ?Sized> FrameTransport for &mut T {
    type Error = T::Error;

    fn read_frame(&mut self) -> Result<RawFrame, Self::Error> {
        (**self).read_frame()
    }
}

/// Opens transports for bus addresses.
///
/// Any `FnMut(BusAddress, &BusConfig) -> Result<T, E>` closure qualifies,
/// which is how embedded targets hand over pre-built SPI devices.
pub trait TransportOpener {
    type Transport: FrameTransport;
    type Error: Debug;

    fn open(
        &mut self,
        address: BusAddress,
        config: &BusConfig,
    ) -> Result<Self::Transport, Self::Error>;
}

impl<F, T, E> TransportOpener for F
where
    F: FnMut(BusAddress, &BusConfig) -> Result<T, E>,
    T: FrameTransport,
    E: Debug,
{
    type Transport = T;
    type Error = E;

    fn open(&mut self, address: BusAddress, config: &BusConfig) -> Result<T, E> {
        self(address, config)
    }
}

/// Monotonic time source for cache expiry.
pub trait Clock {
    /// Time since an arbitrary, fixed epoch. Must never go backwards.
    fn now(&self) -> Duration;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// [`Clock`] backed by `std::time::Instant`, with the epoch at construction.
#[cfg(feature = "std")]
#[derive(Debug, Copy, Clone)]
pub struct StdClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    pub fn new() -> Self {
        StdClock {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}
