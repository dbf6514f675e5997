// src/common/frame.rs

//! MAX6675 frame layout and decoding.
//!
//! One transaction clocks out 16 bits, MSB first:
//!
//! ```text
//!  15 | 14 ........................ 3 |  2  |  1  |  0
//!  0  |  12-bit temperature, 0.25 °C  | T/C |  ID | tri
//! ```
//!
//! Bit 15 is a dummy sign bit that is always zero, bit 2 goes high when no
//! thermocouple is attached, bits 1 and 0 carry no temperature information.

use super::reading::TemperatureReading;
use core::fmt;

/// Bytes per transaction.
pub const FRAME_LEN: usize = 2;

/// Thermocouple-open flag, in the second (low) byte.
pub const OPEN_CIRCUIT_MASK: u8 = 0x04;

/// Status bits below the temperature code.
pub const TEMPERATURE_SHIFT: u32 = 3;

/// Resolution of one temperature count.
pub const DEGREES_PER_COUNT: f32 = 0.25;

/// The raw bit pattern of one bus transaction, first byte = MSB.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawFrame([u8; FRAME_LEN]);

impl RawFrame {
    #[inline]
    pub const fn new(bytes: [u8; FRAME_LEN]) -> Self {
        RawFrame(bytes)
    }

    #[inline]
    pub const fn from_word(word: u16) -> Self {
        RawFrame(word.to_be_bytes())
    }

    #[inline]
    pub const fn bytes(&self) -> [u8; FRAME_LEN] {
        self.0
    }

    /// Both bytes combined, `(byte0 << 8) | byte1`.
    #[inline]
    pub const fn word(&self) -> u16 {
        u16::from_be_bytes(self.0)
    }

    #[inline]
    pub const fn is_open_circuit(&self) -> bool {
        self.0[1] & OPEN_CIRCUIT_MASK != 0
    }

    /// The word with the three status bits shifted out.
    #[inline]
    pub const fn temperature_code(&self) -> u16 {
        self.word() >> TEMPERATURE_SHIFT
    }
}

impl From<[u8; FRAME_LEN]> for RawFrame {
    fn from(bytes: [u8; FRAME_LEN]) -> Self {
        Self::new(bytes)
    }
}

/// Classifies one frame.
///
/// An all-zero frame is reported as [`TemperatureReading::FaultZeroFrame`]
/// before anything else. The chip never produces it on a working bus, so it
/// points at a stuck data line or missing clock rather than 0 °C. This is a
/// heuristic, not part of the chip's protocol.
///
/// The open-circuit bit wins over whatever the temperature bits say.
pub fn decode(frame: RawFrame) -> TemperatureReading {
    if frame.word() == 0 {
        return TemperatureReading::FaultZeroFrame;
    }
    if frame.is_open_circuit() {
        return TemperatureReading::FaultOpenCircuit;
    }
    let raw_code = frame.temperature_code();
    TemperatureReading::Valid {
        celsius: f32::from(raw_code) * DEGREES_PER_COUNT,
        raw_code,
    }
}

/// Every field of a frame, decoded or not, for troubleshooting wiring.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct FrameDiagnostics {
    pub bytes: [u8; FRAME_LEN],
    pub combined: u16,
    pub open_circuit: bool,
    pub temperature_code: u16,
    /// What the temperature bits would mean, even if the frame is a fault.
    pub celsius: f32,
}

impl From<RawFrame> for FrameDiagnostics {
    fn from(frame: RawFrame) -> Self {
        let temperature_code = frame.temperature_code();
        FrameDiagnostics {
            bytes: frame.bytes(),
            combined: frame.word(),
            open_circuit: frame.is_open_circuit(),
            temperature_code,
            celsius: f32::from(temperature_code) * DEGREES_PER_COUNT,
        }
    }
}

impl FrameDiagnostics {
    /// What the decoder makes of the same frame.
    pub fn reading(&self) -> TemperatureReading {
        decode(RawFrame::new(self.bytes))
    }
}

impl fmt::Display for FrameDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "raw 0x{:02X} 0x{:02X}, combined 0x{:04X}, T/C bit {}, code {} (0x{:03X}), {:.2} °C",
            self.bytes[0],
            self.bytes[1],
            self.combined,
            u8::from(self.open_circuit),
            self.temperature_code,
            self.temperature_code,
            self.celsius,
        )
    }
}
