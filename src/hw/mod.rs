//! Hardware shims (embedded builds only).
//!
//! Thin, stateless adapters between the core traits and the real
//! peripherals:
//!
//! - **Display**: SSD1306 128×64 OLED via I²C
//! - **Controls**: 3 tactile switches (active-low, pull-up) + SAADC
//!   battery probe + uptime clock
//! - **Store**: 24Cxx I²C EEPROM holding the counting log

pub mod controls;
pub mod display;
pub mod eeprom;

pub use controls::Controls;
pub use display::Oled;
pub use eeprom::EepromStore;
