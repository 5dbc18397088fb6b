//! Button widgets: label + press affordance over a [`ButtonFsm`].

use heapless::String;

use crate::button::{ButtonFsm, RepeatFsm};
use crate::canvas::Canvas;
use crate::config::{
    CHAR_H, CHAR_W, LONG_PRESS_MS, MAX_ITEM_CHARS, REPEAT_DELAY_MS, REPEAT_INTERVAL_MS,
    SHORT_PRESS_MS,
};
use crate::input::{ButtonId, FrameInput};
use crate::widgets::{Update, Widget};

/// Release classification of a two-action button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressKind {
    Short,
    Long,
}

/// "short/long" button: a short press triggers the first action, a hold
/// past the long milestone the second. Draws the pair as one label,
/// underlines the armed half and a progress bar while held.
pub struct ThreeStateButton {
    short_label: &'static str,
    long_label: &'static str,
    button: ButtonId,
    fsm: ButtonFsm<2>,
    x: i32,
    y: i32,
}

impl ThreeStateButton {
    pub fn new(short_label: &'static str, long_label: &'static str, button: ButtonId) -> Self {
        Self {
            short_label,
            long_label,
            button,
            fsm: ButtonFsm::new([SHORT_PRESS_MS, LONG_PRESS_MS]),
            x: 0,
            y: 0,
        }
    }
}

impl Widget for ThreeStateButton {
    type Event = PressKind;

    fn width(&self) -> i32 {
        (self.short_label.len() + self.long_label.len() + 1) as i32 * CHAR_W
    }

    fn height(&self) -> i32 {
        CHAR_H + 3
    }

    fn set_pos(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    fn reset(&mut self) {
        self.fsm.reset();
    }

    fn update(&mut self, input: &FrameInput) -> Update<PressKind> {
        let pressed = input.is_pressed(self.button);
        let old_progress = self.fsm.progress();
        let released_state = self.fsm.update(input.now_ms, pressed);
        let changed = self.fsm.progress() != old_progress || pressed || released_state > 0;
        let event = match released_state {
            1 => Some(PressKind::Short),
            2 => Some(PressKind::Long),
            _ => None,
        };
        Update::new(changed, event)
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let short_px = self.short_label.len() as i32 * CHAR_W;
        let long_px = self.long_label.len() as i32 * CHAR_W;

        let mut label: String<MAX_ITEM_CHARS> = String::new();
        let _ = label.push_str(self.short_label);
        let _ = label.push('/');
        let _ = label.push_str(self.long_label);
        canvas.text(self.x, self.y, 1, &label);

        match self.fsm.state() {
            1 => canvas.hline(self.x, self.y + CHAR_H, short_px),
            2 => canvas.hline(self.x + short_px + CHAR_W, self.y + CHAR_H, long_px),
            _ => {}
        }

        let progress = self.fsm.progress();
        if progress > 0.0 {
            let full_px = short_px + CHAR_W + long_px;
            canvas.hline(self.x, self.y + CHAR_H + 2, (full_px as f32 * progress) as i32);
        }
    }
}

/// Single-action button; emits on any release past the bounce milestone.
pub struct TwoStateButton {
    label: &'static str,
    button: ButtonId,
    fsm: ButtonFsm<1>,
    x: i32,
    y: i32,
}

impl TwoStateButton {
    pub fn new(label: &'static str, button: ButtonId) -> Self {
        Self {
            label,
            button,
            fsm: ButtonFsm::new([SHORT_PRESS_MS]),
            x: 0,
            y: 0,
        }
    }
}

impl Widget for TwoStateButton {
    type Event = ();

    fn width(&self) -> i32 {
        self.label.len() as i32 * CHAR_W
    }

    fn height(&self) -> i32 {
        CHAR_H + 1
    }

    fn set_pos(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    fn reset(&mut self) {
        self.fsm.reset();
    }

    fn update(&mut self, input: &FrameInput) -> Update<()> {
        let pressed = input.is_pressed(self.button);
        let old_progress = self.fsm.progress();
        let released_state = self.fsm.update(input.now_ms, pressed);
        let changed = self.fsm.progress() != old_progress || pressed || released_state > 0;
        Update::new(changed, (released_state == 1).then_some(()))
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.text(self.x, self.y, 1, self.label);
        if self.fsm.state() == 1 {
            canvas.hline(self.x, self.y + CHAR_H, self.width());
        }
    }
}

/// Scroll button: one step on press, then autorepeat while held.
pub struct RepeatingButton {
    label: &'static str,
    button: ButtonId,
    fsm: RepeatFsm,
    x: i32,
    y: i32,
}

impl RepeatingButton {
    pub fn new(label: &'static str, button: ButtonId) -> Self {
        Self {
            label,
            button,
            fsm: RepeatFsm::new(REPEAT_DELAY_MS, REPEAT_INTERVAL_MS),
            x: 0,
            y: 0,
        }
    }
}

impl Widget for RepeatingButton {
    type Event = ();

    fn width(&self) -> i32 {
        self.label.len() as i32 * CHAR_W
    }

    fn height(&self) -> i32 {
        CHAR_H + 1
    }

    fn set_pos(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    fn reset(&mut self) {
        self.fsm.reset();
    }

    fn update(&mut self, input: &FrameInput) -> Update<()> {
        let was_held = self.fsm.is_held();
        let step = self.fsm.update(input.now_ms, input.is_pressed(self.button));
        let changed = step || was_held != self.fsm.is_held();
        Update::new(changed, step.then_some(()))
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.text(self.x, self.y, 1, self.label);
        if self.fsm.is_held() {
            canvas.hline(self.x, self.y + CHAR_H, self.width());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NUM_BUTTONS;

    fn frame(now_ms: u32, button: ButtonId, pressed: bool) -> FrameInput {
        let mut levels = [false; NUM_BUTTONS];
        levels[button.index()] = pressed;
        FrameInput {
            now_ms,
            pressed: levels,
            battery: 0.5,
        }
    }

    #[test]
    fn three_state_classifies_short_and_long() {
        let mut btn = ThreeStateButton::new("+1", "-1", ButtonId::Left);

        btn.update(&frame(0, ButtonId::Left, true));
        btn.update(&frame(60, ButtonId::Left, true));
        let up = btn.update(&frame(70, ButtonId::Left, false));
        assert_eq!(up.event, Some(PressKind::Short));

        btn.update(&frame(100, ButtonId::Left, true));
        btn.update(&frame(1200, ButtonId::Left, true));
        let up = btn.update(&frame(1210, ButtonId::Left, false));
        assert_eq!(up.event, Some(PressKind::Long));
    }

    #[test]
    fn three_state_ignores_bounce() {
        let mut btn = ThreeStateButton::new("+1", "-1", ButtonId::Left);
        btn.update(&frame(0, ButtonId::Left, true));
        let up = btn.update(&frame(20, ButtonId::Left, false));
        assert!(up.event.is_none());
    }

    #[test]
    fn three_state_ignores_other_buttons() {
        let mut btn = ThreeStateButton::new("+1", "-1", ButtonId::Left);
        btn.update(&frame(0, ButtonId::Right, true));
        btn.update(&frame(100, ButtonId::Right, true));
        let up = btn.update(&frame(110, ButtonId::Right, false));
        assert!(up.event.is_none());
        assert!(!up.changed);
    }

    #[test]
    fn two_state_fires_on_release() {
        let mut btn = TwoStateButton::new("menu", ButtonId::Right);
        btn.update(&frame(0, ButtonId::Right, true));
        btn.update(&frame(60, ButtonId::Right, true));
        let up = btn.update(&frame(70, ButtonId::Right, false));
        assert_eq!(up.event, Some(()));
    }

    #[test]
    fn repeating_steps_while_held() {
        let mut btn = RepeatingButton::new("\u{1f}", ButtonId::Middle);
        let mut steps = 0;
        for now in [0u32, 100, 500, 799, 800, 801, 999, 1000, 1001, 1200] {
            if btn.update(&frame(now, ButtonId::Middle, true)).event.is_some() {
                steps += 1;
            }
        }
        // press, 800ms delay, then every 200ms: 0, 800, 1000, 1200
        assert_eq!(steps, 4);
        let up = btn.update(&frame(1300, ButtonId::Middle, false));
        assert!(up.event.is_none());
    }
}
