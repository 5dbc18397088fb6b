//! Tally counter firmware core.
//!
//! Everything that makes the device tick - the button state machines,
//! widgets, screens, navigation, and the crash-consistent counting log -
//! lives in this library and runs on the host: `cargo test` exercises
//! the full interaction machine against in-memory doubles, no hardware
//! required.
//!
//! The embedded binary (`src/main.rs`, behind the `embedded` feature)
//! adds the thin hardware shims: SSD1306 canvas, GPIO/ADC inputs, and
//! the 24Cxx EEPROM store.
//!
//! Data flow per frame: the loop samples one [`input::FrameInput`],
//! [`app::App::tick`] feeds it through the active screen's widgets and
//! dispatches the resulting events (persisting each state-changing
//! action to [`log::EventLog`] *before* applying it), then
//! [`app::App::draw`] renders the active screen onto a [`canvas::Canvas`].

#![cfg_attr(not(test), no_std)]

pub mod app;
pub mod button;
pub mod canvas;
pub mod config;
pub mod input;
pub mod log;
pub mod nav;
pub mod ring;
pub mod screens;
pub mod sim;
pub mod store;
pub mod widgets;

#[cfg(feature = "embedded")]
pub mod hw;

pub use app::App;
pub use canvas::Canvas;
pub use input::{ButtonId, FrameInput};
pub use log::{EventLog, LogCommand};
pub use store::{MemStore, NvStore};
