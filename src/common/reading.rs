// src/common/reading.rs

use arrayvec::ArrayString;
use core::fmt::{self, Write};

/// Capacity of a stored transport error message, in bytes.
pub const MESSAGE_CAPACITY: usize = 64;

/// Transport error text, truncated to fit.
pub type TransportMessage = ArrayString<MESSAGE_CAPACITY>;

/// Outcome of one sensor refresh.
///
/// Faults are ordinary values here: the caller decides whether to log,
/// alert or retry.
#[derive(Debug, Clone, PartialEq)]
pub enum TemperatureReading {
    /// A good conversion. `celsius == raw_code as f32 * 0.25`.
    Valid { celsius: f32, raw_code: u16 },
    /// The chip reports no thermocouple attached.
    FaultOpenCircuit,
    /// All sixteen bits read back zero (stuck data line, no clock, short).
    FaultZeroFrame,
    /// The bus read itself failed.
    TransportError(TransportMessage),
}

impl TemperatureReading {
    /// Captures a transport error as a reading, keeping as much of its
    /// `Debug` text as fits.
    pub fn transport_error<E: fmt::Debug>(error: &E) -> Self {
        let mut message = TransportMessage::new();
        // Truncation is the only possible failure.
        let _ = write!(Truncating(&mut message), "{:?}", error);
        TemperatureReading::TransportError(message)
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self, TemperatureReading::Valid { .. })
    }

    /// Open-circuit or zero-frame.
    #[inline]
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            TemperatureReading::FaultOpenCircuit | TemperatureReading::FaultZeroFrame
        )
    }

    pub fn celsius(&self) -> Option<f32> {
        match self {
            TemperatureReading::Valid { celsius, .. } => Some(*celsius),
            _ => None,
        }
    }

    pub fn fahrenheit(&self) -> Option<f32> {
        self.celsius().map(celsius_to_fahrenheit)
    }

    pub fn raw_code(&self) -> Option<u16> {
        match self {
            TemperatureReading::Valid { raw_code, .. } => Some(*raw_code),
            _ => None,
        }
    }

    /// Absolute difference in °C, only when both readings are valid.
    pub fn difference(a: &Self, b: &Self) -> Option<f32> {
        let delta = a.celsius()? - b.celsius()?;
        Some(if delta < 0.0 { -delta } else { delta })
    }
}

impl fmt::Display for TemperatureReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemperatureReading::Valid { celsius, .. } => write!(f, "{:.2} °C", celsius),
            TemperatureReading::FaultOpenCircuit => f.write_str("thermocouple open"),
            TemperatureReading::FaultZeroFrame => f.write_str("zero frame"),
            TemperatureReading::TransportError(message) => {
                write!(f, "transport error: {}", message)
            }
        }
    }
}

pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Pushes chars until the buffer is full, then reports an error.
struct Truncating<'a, const CAP: usize>(&'a mut ArrayString<CAP>);

impl<const CAP: usize> Write for Truncating<'_, CAP> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            self.0.try_push(c).map_err(|_| fmt::Error)?;
        }
        Ok(())
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn valid(celsius: f32) -> TemperatureReading {
        TemperatureReading::Valid { celsius, raw_code: (celsius * 4.0) as u16 }
    }

    fn render(reading: &TemperatureReading) -> heapless::String<96> {
        let mut out = heapless::String::new();
        core::fmt::write(&mut out, format_args!("{reading}")).unwrap();
        out
    }

    #[test]
    fn test_fahrenheit() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert_eq!(valid(200.0).fahrenheit(), Some(392.0));
        assert_eq!(TemperatureReading::FaultOpenCircuit.fahrenheit(), None);
    }

    #[test]
    fn test_accessors() {
        let reading = valid(25.5);
        assert!(reading.is_valid());
        assert!(!reading.is_fault());
        assert_eq!(reading.celsius(), Some(25.5));
        assert_eq!(reading.raw_code(), Some(102));

        assert!(TemperatureReading::FaultZeroFrame.is_fault());
        assert!(TemperatureReading::FaultOpenCircuit.is_fault());
        let err = TemperatureReading::transport_error(&"boom");
        assert!(!err.is_fault());
        assert!(!err.is_valid());
        assert_eq!(err.celsius(), None);
    }

    #[test]
    fn test_difference_needs_two_valid_readings() {
        assert_eq!(TemperatureReading::difference(&valid(20.0), &valid(25.5)), Some(5.5));
        assert_eq!(TemperatureReading::difference(&valid(25.5), &valid(20.0)), Some(5.5));
        assert_eq!(
            TemperatureReading::difference(&valid(20.0), &TemperatureReading::FaultZeroFrame),
            None
        );
    }

    #[test]
    fn test_transport_error_message() {
        #[derive(Debug)]
        #[allow(dead_code)]
        struct BusFault(i32);

        let reading = TemperatureReading::transport_error(&BusFault(-5));
        assert_eq!(
            reading,
            TemperatureReading::TransportError(TransportMessage::from("BusFault(-5)").unwrap())
        );
    }

    #[test]
    fn test_transport_error_message_truncates() {
        let long = "é".repeat(40); // 80 bytes, plus quotes from Debug
        let TemperatureReading::TransportError(message) = TemperatureReading::transport_error(&long)
        else {
            panic!("expected a transport error");
        };
        // Opening quote (1 byte) plus 31 two-byte chars; the 32nd would overflow.
        assert_eq!(message.len(), 63);
        assert!(message.starts_with("\"é"));
    }

    #[test]
    fn test_display() {
        assert_eq!(render(&valid(200.0)).as_str(), "200.00 °C");
        assert_eq!(render(&TemperatureReading::FaultOpenCircuit).as_str(), "thermocouple open");
        assert_eq!(render(&TemperatureReading::FaultZeroFrame).as_str(), "zero frame");
        assert_eq!(
            render(&TemperatureReading::transport_error(&"EIO")).as_str(),
            "transport error: \"EIO\""
        );
    }
}
