//! UI building blocks.
//!
//! A widget owns its screen offset and its own input state machines; it
//! borrows nothing long-lived. Each frame the owning screen feeds every
//! widget the [`FrameInput`] snapshot and collects typed events - there
//! are no callbacks.
//!
//! ## Components
//!
//! - **Buttons**: short/long-press pair, single press, autorepeat
//! - **Label**: formatted text with alignment and auto font scale
//! - **Lists**: rolling history, menu with selection cursor
//! - **Battery**: charge indicator glyph

pub mod battery;
pub mod buttons;
pub mod label;
pub mod list;

use crate::canvas::Canvas;
use crate::input::FrameInput;

/// Outcome of one widget update.
pub struct Update<E> {
    /// Whether the widget's visual state changed this frame. Computed
    /// for all widgets; the frame loop currently redraws regardless.
    pub changed: bool,
    pub event: Option<E>,
}

impl<E> Update<E> {
    pub fn new(changed: bool, event: Option<E>) -> Self {
        Self { changed, event }
    }

    pub fn idle() -> Self {
        Self {
            changed: false,
            event: None,
        }
    }

    pub fn changed(changed: bool) -> Self {
        Self {
            changed,
            event: None,
        }
    }
}

/// Capability set shared by every widget.
pub trait Widget {
    /// Event emitted by this widget, if any
    /// (`core::convert::Infallible` for purely visual widgets).
    type Event;

    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn set_pos(&mut self, x: i32, y: i32);
    fn reset(&mut self);
    fn update(&mut self, input: &FrameInput) -> Update<Self::Event>;
    fn draw(&self, canvas: &mut dyn Canvas);
}
