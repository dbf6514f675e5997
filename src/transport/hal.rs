// src/transport/hal.rs

use crate::common::{
    frame::{RawFrame, FRAME_LEN},
    hal_traits::FrameTransport,
};
use embedded_hal::spi::SpiDevice;

/// Frame transport over an embedded-hal SPI device.
///
/// The device owns chip-select, so each `read` is one complete transaction:
/// CS low, 16 clocks, CS high. The MAX6675 needs nothing written.
#[derive(Debug)]
pub struct HalTransport<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> HalTransport<SPI> {
    pub fn new(spi: SPI) -> Self {
        HalTransport { spi }
    }

    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiDevice> FrameTransport for HalTransport<SPI> {
    type Error = SPI::Error;

    fn read_frame(&mut self) -> Result<RawFrame, Self::Error> {
        let mut buf = [0u8; FRAME_LEN];
        self.spi.read(&mut buf)?;
        Ok(RawFrame::new(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{decode, TemperatureReading};
    use embedded_hal::spi::{ErrorKind, ErrorType, Operation};

    struct FakeSpi {
        response: Result<[u8; FRAME_LEN], ErrorKind>,
        transactions: usize,
    }

    impl ErrorType for FakeSpi {
        type Error = ErrorKind;
    }

    impl SpiDevice for FakeSpi {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), ErrorKind> {
            self.transactions += 1;
            let bytes = self.response?;
            for op in operations.iter_mut() {
                match op {
                    Operation::Read(buf) => buf.copy_from_slice(&bytes),
                    _ => panic!("MAX6675 reads must not write or delay"),
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_read_frame_is_one_transaction() {
        let mut transport = HalTransport::new(FakeSpi { response: Ok([0x19, 0x00]), transactions: 0 });
        let frame = transport.read_frame().unwrap();
        assert_eq!(decode(frame), TemperatureReading::Valid { celsius: 200.0, raw_code: 800 });
        assert_eq!(transport.release().transactions, 1);
    }

    #[test]
    fn test_read_frame_propagates_bus_error() {
        let mut transport = HalTransport::new(FakeSpi { response: Err(ErrorKind::Overrun), transactions: 0 });
        assert_eq!(transport.read_frame(), Err(ErrorKind::Overrun));
    }
}
