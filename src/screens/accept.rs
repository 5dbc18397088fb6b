//! Confirmation screen guarding the destructive menu actions.

use crate::canvas::Canvas;
use crate::config::CHAR_H;
use crate::input::{ButtonId, FrameInput};
use crate::screens::panel_y;
use crate::widgets::buttons::TwoStateButton;
use crate::widgets::label::{HAlign, Label};
use crate::widgets::{Update, Widget};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AcceptEvent {
    Confirm,
    Cancel,
}

pub struct AcceptScreen {
    prompt: Label,
    detail: Label,
    ok: TwoStateButton,
    cancel: TwoStateButton,
}

impl AcceptScreen {
    pub fn new(w: i32, h: i32, message: &str) -> Self {
        let py = panel_y(h);

        let mut prompt = Label::new(w, CHAR_H, HAlign::Middle, "confirm to");
        prompt.set_pos(0, CHAR_H);
        let mut detail = Label::new(w, CHAR_H, HAlign::Middle, message);
        detail.set_pos(0, CHAR_H * 3);

        let mut ok = TwoStateButton::new("ok", ButtonId::Left);
        ok.set_pos(0, py);
        let mut cancel = TwoStateButton::new("cancel", ButtonId::Right);
        cancel.set_pos(w - cancel.width(), py);

        Self {
            prompt,
            detail,
            ok,
            cancel,
        }
    }

    pub fn update(&mut self, input: &FrameInput) -> Update<AcceptEvent> {
        let ok = self.ok.update(input);
        let cancel = self.cancel.update(input);
        let changed = ok.changed
            | cancel.changed
            | self.prompt.update(input).changed
            | self.detail.update(input).changed;

        let event = ok
            .event
            .map(|_| AcceptEvent::Confirm)
            .or(cancel.event.map(|_| AcceptEvent::Cancel));
        Update::new(changed, event)
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.prompt.draw(canvas);
        self.detail.draw(canvas);
        self.ok.draw(canvas);
        self.cancel.draw(canvas);
    }
}
