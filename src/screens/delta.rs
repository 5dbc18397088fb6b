//! Delta screen: accumulate a pending adjustment, then commit or drop.

use crate::canvas::Canvas;
use crate::config::{CHAR_H, COUNTER_COL_W};
use crate::input::{ButtonId, FrameInput};
use crate::screens::panel_y;
use crate::widgets::buttons::{PressKind, ThreeStateButton};
use crate::widgets::label::{HAlign, Label};
use crate::widgets::{Update, Widget};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeltaEvent {
    /// Apply the accumulated adjustment; `value` is the new counter.
    Commit { value: i32 },
    /// Discard the adjustment.
    Cancel,
}

pub struct DeltaScreen {
    adjust_one: ThreeStateButton,
    adjust_five: ThreeStateButton,
    confirm: ThreeStateButton,
    counter: Label,
    delta: Label,
    total: Label,
    base: i32,
    delta_value: i32,
}

impl DeltaScreen {
    pub fn new(w: i32, h: i32) -> Self {
        let py = panel_y(h);

        let mut adjust_one = ThreeStateButton::new("+1", "-1", ButtonId::Left);
        adjust_one.set_pos(0, py);
        let mut adjust_five = ThreeStateButton::new("+5", "-5", ButtonId::Middle);
        adjust_five.set_pos((w - adjust_five.width()) / 2, py);
        let mut confirm = ThreeStateButton::new("ok", "drop", ButtonId::Right);
        confirm.set_pos(w - confirm.width(), py);

        let mut counter = Label::new(COUNTER_COL_W, py, HAlign::Left, "");
        counter.set_pos(0, 0);
        let mut delta = Label::new(w - COUNTER_COL_W, CHAR_H, HAlign::Left, "");
        delta.set_pos(COUNTER_COL_W, 0);
        let mut total = Label::new(w - COUNTER_COL_W, CHAR_H, HAlign::Left, "");
        total.set_pos(COUNTER_COL_W, CHAR_H);

        Self {
            adjust_one,
            adjust_five,
            confirm,
            counter,
            delta,
            total,
            base: 0,
            delta_value: 0,
        }
    }

    /// Seed the screen with the current counter and the opening step.
    pub fn begin(&mut self, base: i32, delta: i32) {
        self.base = base;
        self.counter.set_fmt(format_args!("{base}"));
        self.set_delta(delta);
    }

    pub fn delta(&self) -> i32 {
        self.delta_value
    }

    fn set_delta(&mut self, delta: i32) {
        self.delta_value = delta;
        if delta >= 0 {
            self.delta.set_fmt(format_args!("+{delta}"));
        } else {
            self.delta.set_fmt(format_args!("{delta}"));
        }
        self.total.set_fmt(format_args!("={}", self.base + delta));
    }

    pub fn update(&mut self, input: &FrameInput) -> Update<DeltaEvent> {
        let one = self.adjust_one.update(input);
        let five = self.adjust_five.update(input);
        let confirm = self.confirm.update(input);
        let mut changed = one.changed
            | five.changed
            | confirm.changed
            | self.counter.update(input).changed
            | self.delta.update(input).changed
            | self.total.update(input).changed;

        let step = |kind: PressKind, step: i32| match kind {
            PressKind::Short => step,
            PressKind::Long => -step,
        };
        if let Some(kind) = one.event {
            self.set_delta(self.delta_value + step(kind, 1));
            changed = true;
        }
        if let Some(kind) = five.event {
            self.set_delta(self.delta_value + step(kind, 5));
            changed = true;
        }

        let event = confirm.event.map(|kind| match kind {
            PressKind::Short => DeltaEvent::Commit {
                value: self.base + self.delta_value,
            },
            PressKind::Long => DeltaEvent::Cancel,
        });
        Update::new(changed, event)
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.adjust_one.draw(canvas);
        self.adjust_five.draw(canvas);
        self.confirm.draw(canvas);
        self.counter.draw(canvas);
        self.delta.draw(canvas);
        self.total.draw(canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NUM_BUTTONS;

    fn click(screen: &mut DeltaScreen, button: ButtonId, hold_ms: u32, start: u32) -> Option<DeltaEvent> {
        let mut event = None;
        for (offset, pressed) in [(0, true), (hold_ms, true), (hold_ms + 10, false)] {
            let mut levels = [false; NUM_BUTTONS];
            levels[button.index()] = pressed;
            let input = FrameInput {
                now_ms: start + offset,
                pressed: levels,
                battery: 0.5,
            };
            event = event.or(screen.update(&input).event);
        }
        event
    }

    #[test]
    fn adjustments_accumulate_into_the_labels() {
        let mut screen = DeltaScreen::new(128, 64);
        screen.begin(10, 1);
        assert_eq!(screen.delta(), 1);
        assert_eq!(screen.total.text(), "=11");

        assert!(click(&mut screen, ButtonId::Middle, 1100, 0).is_none());
        assert_eq!(screen.delta(), -4);
        assert_eq!(screen.delta.text(), "-4");
        assert_eq!(screen.total.text(), "=6");

        assert!(click(&mut screen, ButtonId::Left, 60, 2000).is_none());
        assert_eq!(screen.delta(), -3);
    }

    #[test]
    fn confirm_button_commits_or_cancels() {
        let mut screen = DeltaScreen::new(128, 64);
        screen.begin(3, 5);
        assert_eq!(
            click(&mut screen, ButtonId::Right, 60, 0),
            Some(DeltaEvent::Commit { value: 8 })
        );

        screen.begin(3, 5);
        assert_eq!(
            click(&mut screen, ButtonId::Right, 1100, 5000),
            Some(DeltaEvent::Cancel)
        );
    }
}
