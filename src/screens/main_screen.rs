//! Main screen: big counter, rolling short history, adjust buttons.

use crate::canvas::Canvas;
use crate::config::{COUNTER_COL_W, SHORT_HISTORY_LEN};
use crate::input::{ButtonId, FrameInput};
use crate::screens::panel_y;
use crate::widgets::buttons::{PressKind, ThreeStateButton, TwoStateButton};
use crate::widgets::label::{HAlign, Label};
use crate::widgets::list::OverwritingList;
use crate::widgets::{Update, Widget};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MainEvent {
    /// Open the delta screen seeded with this signed step.
    Adjust(i32),
    OpenMenu,
}

pub struct MainScreen {
    adjust_one: ThreeStateButton,
    adjust_five: ThreeStateButton,
    menu: TwoStateButton,
    counter: Label,
    history: OverwritingList<SHORT_HISTORY_LEN>,
    value: i32,
}

impl MainScreen {
    pub fn new(w: i32, h: i32) -> Self {
        let py = panel_y(h);

        let mut adjust_one = ThreeStateButton::new("+1", "-1", ButtonId::Left);
        adjust_one.set_pos(0, py);
        let mut adjust_five = ThreeStateButton::new("+5", "-5", ButtonId::Middle);
        adjust_five.set_pos((w - adjust_five.width()) / 2, py);
        let mut menu = TwoStateButton::new("menu", ButtonId::Right);
        menu.set_pos(w - menu.width(), py);

        let mut counter = Label::new(COUNTER_COL_W, py, HAlign::Left, "0");
        counter.set_pos(0, 0);
        let mut history = OverwritingList::new(w - COUNTER_COL_W, py);
        history.set_pos(COUNTER_COL_W, 0);

        Self {
            adjust_one,
            adjust_five,
            menu,
            counter,
            history,
            value: 0,
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn set_value(&mut self, value: i32) {
        self.value = value;
        self.counter.set_fmt(format_args!("{value}"));
    }

    pub fn push_history(&mut self, entry: &str) {
        self.history.push(entry);
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn update(&mut self, input: &FrameInput) -> Update<MainEvent> {
        let one = self.adjust_one.update(input);
        let five = self.adjust_five.update(input);
        let menu = self.menu.update(input);
        let changed = one.changed
            | five.changed
            | menu.changed
            | self.counter.update(input).changed
            | self.history.update(input).changed;

        let step = |kind: PressKind, step: i32| match kind {
            PressKind::Short => step,
            PressKind::Long => -step,
        };
        let event = one
            .event
            .map(|kind| MainEvent::Adjust(step(kind, 1)))
            .or(five.event.map(|kind| MainEvent::Adjust(step(kind, 5))))
            .or(menu.event.map(|_| MainEvent::OpenMenu));
        Update::new(changed, event)
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.adjust_one.draw(canvas);
        self.adjust_five.draw(canvas);
        self.menu.draw(canvas);
        self.counter.draw(canvas);
        self.history.draw(canvas);
    }
}
