//! Application-wide constants and compile-time configuration.
//!
//! All timing parameters, widget capacities, and layout constants
//! live here so they can be tuned in one place.

// Buttons

/// Number of physical buttons on the device.
pub const NUM_BUTTONS: usize = 3;

/// Press duration (ms) at which a press stops being contact bounce and
/// counts as a short press.
pub const SHORT_PRESS_MS: u32 = 50;

/// Press duration (ms) at which a press becomes a long press.
pub const LONG_PRESS_MS: u32 = 1000;

/// Hold duration (ms) before a scroll button starts autorepeating.
pub const REPEAT_DELAY_MS: u32 = 800;

/// Autorepeat cadence (ms) once the delay has elapsed.
pub const REPEAT_INTERVAL_MS: u32 = 200;

// Display layout
//
// The UI is laid out on a 6x8 px character cell grid (128x64 OLED).

/// Character cell width in pixels.
pub const CHAR_W: i32 = 6;

/// Character cell height in pixels.
pub const CHAR_H: i32 = 8;

/// Height of the bottom button-label panel.
pub const LOWER_PANEL_H: i32 = 11;

/// Largest font scale used for the counter digits.
pub const COUNTER_FONT_MAX: i32 = 6;

/// Width of the counter column on the main and delta screens
/// (two digits at the largest font scale).
pub const COUNTER_COL_W: i32 = 2 * COUNTER_FONT_MAX * CHAR_W;

// Lists & history

/// Longest stored list entry, in characters.
pub const MAX_ITEM_CHARS: usize = 21;

/// A rendered list row: selector glyph + entry.
pub const ROW_CHARS: usize = MAX_ITEM_CHARS + 1;

/// Rolling history shown next to the counter on the main screen.
pub const SHORT_HISTORY_LEN: usize = 8;

/// Rolling full history behind the menu.
pub const FULL_HISTORY_LEN: usize = 128;

/// Menu entry slots (four are used).
pub const MENU_LEN: usize = 5;

// Navigation

/// Maximum navigation stack depth (root + nested screens).
pub const NAV_DEPTH: usize = 5;

// Frame loop

/// Poll interval of the main loop (ms).
pub const FRAME_INTERVAL_MS: u64 = 25;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Button LEFT    → P0.11
//   Button MIDDLE  → P0.12
//   Button RIGHT   → P0.24
//   OLED I²C SDA   → P0.26
//   OLED I²C SCL   → P0.27
//   EEPROM SDA     → P1.08
//   EEPROM SCL     → P1.09
//   Battery probe  → P0.02 (AIN0)

/// I²C address of the 24Cxx EEPROM holding the counting log.
pub const EEPROM_I2C_ADDR: u8 = 0x50;

/// Size of the EEPROM log region in bytes (24C32).
pub const EEPROM_SIZE: usize = 4096;

/// ADC resolution used for the battery probe.
pub const BATTERY_ADC_BITS: u8 = 12;

/// Supply voltage the battery probe divider is referenced to.
pub const BATTERY_ADC_VCC: f32 = 3.3;
