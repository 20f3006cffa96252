//! AT24C32 style I2C EEPROM with two address bytes.

use defmt::warn;
use drumbrain_core::io::NvStorage;
use embedded_hal::blocking::i2c::{Write, WriteRead};

pub struct At24c<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C, E> At24c<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    /// Bounds the busy wait after a write, a page write takes at most 5 ms.
    const WRITE_POLLS: usize = 200;
    const READ_ATTEMPTS: usize = 3;

    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// The chip does not acknowledge its address while it is still programming.
    fn wait_written(&mut self, address: u16) {
        for _ in 0..Self::WRITE_POLLS {
            if self.i2c.write(self.address, &address.to_be_bytes()).is_ok() {
                return;
            }
        }

        warn!("EEPROM still busy after writing {}", address);
    }
}

impl<I2C, E> NvStorage for At24c<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    fn read(&mut self, address: u16) -> Option<u8> {
        let mut value = [0];

        for _ in 0..Self::READ_ATTEMPTS {
            if self
                .i2c
                .write_read(self.address, &address.to_be_bytes(), &mut value)
                .is_ok()
            {
                return Some(value[0]);
            }
        }

        warn!("EEPROM read at {} failed", address);
        None
    }

    fn write(&mut self, address: u16, value: u8) {
        let [high, low] = address.to_be_bytes();

        if self.i2c.write(self.address, &[high, low, value]).is_err() {
            warn!("EEPROM write at {} failed", address);
            return;
        }

        self.wait_written(address);
    }
}
