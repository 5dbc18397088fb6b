//! Full-history screen: scrollable rolling list of every change.

use crate::canvas::Canvas;
use crate::config::{FULL_HISTORY_LEN, LOWER_PANEL_H};
use crate::input::{ButtonId, FrameInput};
use crate::screens::panel_y;
use crate::widgets::buttons::{RepeatingButton, TwoStateButton};
use crate::widgets::list::OverwritingList;
use crate::widgets::{Update, Widget};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryEvent {
    Back,
}

pub struct HistoryScreen {
    items: OverwritingList<FULL_HISTORY_LEN>,
    up: RepeatingButton,
    down: RepeatingButton,
    back: TwoStateButton,
}

impl HistoryScreen {
    pub fn new(w: i32, h: i32) -> Self {
        let py = panel_y(h);

        let mut items = OverwritingList::new(w, h - LOWER_PANEL_H);
        items.set_pos(0, 0);

        let mut up = RepeatingButton::new("\u{1e}", ButtonId::Left);
        up.set_pos(0, py);
        let mut down = RepeatingButton::new("\u{1f}", ButtonId::Middle);
        down.set_pos((w - down.width()) / 2, py);
        let mut back = TwoStateButton::new("back", ButtonId::Right);
        back.set_pos(w - back.width(), py);

        Self { items, up, down, back }
    }

    pub fn push_entry(&mut self, entry: &str) {
        self.items.push(entry);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Current `(first_visible, visible_rows)` window.
    pub fn window(&self) -> (usize, usize) {
        self.items.window()
    }

    pub fn update(&mut self, input: &FrameInput) -> Update<HistoryEvent> {
        let up = self.up.update(input);
        let down = self.down.update(input);
        let back = self.back.update(input);
        let mut changed = up.changed | down.changed | back.changed;

        if up.event.is_some() {
            self.items.scroll_up();
        }
        if down.event.is_some() {
            self.items.scroll_down();
        }
        changed |= self.items.update(input).changed;

        Update::new(changed, back.event.map(|_| HistoryEvent::Back))
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.items.draw(canvas);
        self.up.draw(canvas);
        self.down.draw(canvas);
        self.back.draw(canvas);
    }
}
