// src/common/mock.rs

//! Simulated bus and clock shared by the unit tests.

use super::address::BusAddress;
use super::config::BusConfig;
use super::frame::RawFrame;
use super::hal_traits::{Clock, FrameTransport};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockBusError;

#[derive(Debug, Default)]
struct BusState {
    script: Mutex<VecDeque<Result<[u8; 2], MockBusError>>>,
    /// Returned once the script runs dry.
    fallback: Mutex<Option<[u8; 2]>>,
    reads: AtomicU32,
    opens: AtomicU32,
    closes: AtomicU32,
    in_flight: AtomicBool,
    overlapped: AtomicBool,
    read_delay: Mutex<Duration>,
}

/// Test-side handle on one simulated chip-select line.
#[derive(Debug, Clone, Default)]
pub struct MockBus {
    state: Arc<BusState>,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// A bus that answers every read with `bytes`.
    pub fn constant(bytes: [u8; 2]) -> Self {
        let bus = Self::new();
        bus.set_fallback(bytes);
        bus
    }

    /// A bus whose every read fails.
    pub fn failing() -> Self {
        Self::new()
    }

    pub fn push_frame(&self, bytes: [u8; 2]) {
        self.state.script.lock().unwrap().push_back(Ok(bytes));
    }

    pub fn push_error(&self) {
        self.state.script.lock().unwrap().push_back(Err(MockBusError));
    }

    pub fn set_fallback(&self, bytes: [u8; 2]) {
        *self.state.fallback.lock().unwrap() = Some(bytes);
    }

    /// Makes each read take this long, to widen race windows.
    pub fn set_read_delay(&self, delay: Duration) {
        *self.state.read_delay.lock().unwrap() = delay;
    }

    pub fn reads(&self) -> u32 {
        self.state.reads.load(Ordering::SeqCst)
    }

    pub fn opens(&self) -> u32 {
        self.state.opens.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> u32 {
        self.state.closes.load(Ordering::SeqCst)
    }

    /// Whether two reads were ever in progress at the same time.
    pub fn overlapped(&self) -> bool {
        self.state.overlapped.load(Ordering::SeqCst)
    }

    pub fn open(&self) -> MockTransport {
        self.state.opens.fetch_add(1, Ordering::SeqCst);
        MockTransport { bus: self.clone() }
    }

    /// Opener that serves `buses` by address and fails for anything else.
    pub fn opener(
        buses: Vec<(BusAddress, MockBus)>,
    ) -> impl FnMut(BusAddress, &BusConfig) -> Result<MockTransport, MockBusError> {
        move |address: BusAddress, _config: &BusConfig| {
            buses
                .iter()
                .find(|(a, _)| *a == address)
                .map(|(_, bus)| bus.open())
                .ok_or(MockBusError)
        }
    }
}

/// Open handle; dropping it counts as a close.
#[derive(Debug)]
pub struct MockTransport {
    bus: MockBus,
}

impl FrameTransport for MockTransport {
    type Error = MockBusError;

    fn read_frame(&mut self) -> Result<RawFrame, MockBusError> {
        let state = &self.bus.state;
        if state.in_flight.swap(true, Ordering::SeqCst) {
            state.overlapped.store(true, Ordering::SeqCst);
        }
        state.reads.fetch_add(1, Ordering::SeqCst);

        let delay = *state.read_delay.lock().unwrap();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }

        let next = state.script.lock().unwrap().pop_front();
        let result = match next {
            Some(scripted) => scripted,
            None => state.fallback.lock().unwrap().ok_or(MockBusError),
        };
        state.in_flight.store(false, Ordering::SeqCst);
        result.map(RawFrame::new)
    }
}

impl Drop for MockTransport {
    fn drop(&mut self) {
        self.bus.state.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Manually advanced clock.
#[derive(Debug, Clone, Default)]
pub struct MockClock {
    now_us: Arc<AtomicU64>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now_us.fetch_add(by.as_micros() as u64, Ordering::SeqCst);
    }
}

impl Clock for MockClock {
    fn now(&self) -> Duration {
        Duration::from_micros(self.now_us.load(Ordering::SeqCst))
    }
}
