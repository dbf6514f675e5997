// src/common/timing.rs

use core::time::Duration;

// Values are from the MAX6675 datasheet (Electrical Characteristics and
// Serial Interface Timing). Implementations should treat them as minimums
// to wait, not as exact periods.

// === Conversion ===

/// Maximum time the chip takes to finish one temperature conversion.
/// Reading more often than this returns the previous conversion again.
pub const CONVERSION_TIME: Duration = Duration::from_millis(220);

// === Serial Interface ===

/// Chip-select fall to output enable.
pub const CS_TO_OUTPUT_ENABLE_MAX: Duration = Duration::from_nanos(100);
/// Minimum time chip-select must stay high between transactions.
pub const CS_INACTIVE_MIN: Duration = Duration::from_nanos(200);
/// Clock high and low time, each.
pub const CLOCK_PHASE_MIN: Duration = Duration::from_nanos(100);

/// Bits clocked out per transaction.
pub const FRAME_BITS: u32 = 16;

/// Time spent shifting one frame at `clock_hz`, excluding chip-select setup.
pub const fn frame_duration(clock_hz: u32) -> Duration {
    if clock_hz == 0 {
        return Duration::ZERO;
    }
    Duration::from_nanos(FRAME_BITS as u64 * 1_000_000_000 / clock_hz as u64)
}
