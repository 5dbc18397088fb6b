//! 24Cxx I²C EEPROM as the persistent log region.
//!
//! The log's `NvStore` view is a flat run of bytes. Any bus error
//! latches the store invalid for the rest of the session; the device
//! then behaves like a factory-fresh unit and never half-persists.

use eeprom24x::{addr_size, page_size, unique_serial, Eeprom24x, SlaveAddr};
use embassy_time::{block_for, Duration};

use crate::config::EEPROM_SIZE;
use crate::store::NvStore;

/// 24C32 write-cycle time.
const WRITE_CYCLE_MS: u64 = 5;

pub struct EepromStore<I2C> {
    eeprom: Eeprom24x<I2C, page_size::B32, addr_size::TwoBytes, unique_serial::No>,
    valid: bool,
}

impl<I2C> EepromStore<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Probe the chip; a silent bus means the session runs volatile.
    pub fn new(i2c: I2C) -> Self {
        let mut eeprom = Eeprom24x::new_24x32(i2c, SlaveAddr::default());
        let valid = eeprom.read_byte(0).is_ok();
        if !valid {
            defmt::warn!("EEPROM not responding, persistence disabled");
        }
        Self { eeprom, valid }
    }
}

impl<I2C> NvStore for EepromStore<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn is_valid(&self) -> bool {
        self.valid
    }

    fn capacity(&self) -> usize {
        EEPROM_SIZE
    }

    fn read(&mut self, addr: usize) -> u8 {
        if !self.valid {
            return 0;
        }
        match self.eeprom.read_byte(addr as u32) {
            Ok(byte) => byte,
            Err(_) => {
                defmt::warn!("EEPROM read failed at {}, persistence disabled", addr);
                self.valid = false;
                0
            }
        }
    }

    fn write(&mut self, addr: usize, byte: u8) {
        if !self.valid {
            return;
        }
        if self.eeprom.write_byte(addr as u32, byte).is_err() {
            defmt::warn!("EEPROM write failed at {}, persistence disabled", addr);
            self.valid = false;
            return;
        }
        block_for(Duration::from_millis(WRITE_CYCLE_MS));
    }
}
