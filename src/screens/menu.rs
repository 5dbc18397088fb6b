//! Menu screen: selector list over the device's four actions.

use crate::canvas::Canvas;
use crate::config::{LOWER_PANEL_H, MENU_LEN};
use crate::input::{ButtonId, FrameInput};
use crate::screens::panel_y;
use crate::widgets::buttons::{PressKind, RepeatingButton, ThreeStateButton};
use crate::widgets::list::SelectorList;
use crate::widgets::{Update, Widget};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEntry {
    BackToMain,
    ShowHistory,
    NewCount,
    DropHistory,
}

const ENTRIES: [(MenuEntry, &str); 4] = [
    (MenuEntry::BackToMain, "go to main screen"),
    (MenuEntry::ShowHistory, "show full history"),
    (MenuEntry::NewCount, "start new counting"),
    (MenuEntry::DropHistory, "drop full history"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEvent {
    Activate(MenuEntry),
    Back,
}

pub struct MenuScreen {
    items: SelectorList<MENU_LEN>,
    up: RepeatingButton,
    down: RepeatingButton,
    select: ThreeStateButton,
}

impl MenuScreen {
    pub fn new(w: i32, h: i32) -> Self {
        let py = panel_y(h);

        let mut items = SelectorList::new(w, h - LOWER_PANEL_H);
        items.set_pos(0, 0);
        for (_, label) in ENTRIES {
            items.push(label);
        }

        let mut up = RepeatingButton::new("\u{1e}", ButtonId::Left);
        up.set_pos(0, py);
        let mut down = RepeatingButton::new("\u{1f}", ButtonId::Middle);
        down.set_pos((w - down.width()) / 2, py);
        let mut select = ThreeStateButton::new("sel", "back", ButtonId::Right);
        select.set_pos(w - select.width(), py);

        Self {
            items,
            up,
            down,
            select,
        }
    }

    pub fn selected(&self) -> usize {
        self.items.selected()
    }

    pub fn update(&mut self, input: &FrameInput) -> Update<MenuEvent> {
        let up = self.up.update(input);
        let down = self.down.update(input);
        let select = self.select.update(input);
        let mut changed = up.changed | down.changed | select.changed;

        if up.event.is_some() {
            self.items.select_up();
        }
        if down.event.is_some() {
            self.items.select_down();
        }
        changed |= self.items.update(input).changed;

        let event = select.event.map(|kind| match kind {
            PressKind::Short => MenuEvent::Activate(ENTRIES[self.items.selected()].0),
            PressKind::Long => MenuEvent::Back,
        });
        Update::new(changed, event)
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.items.draw(canvas);
        self.up.draw(canvas);
        self.down.draw(canvas);
        self.select.draw(canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NUM_BUTTONS;

    fn click(screen: &mut MenuScreen, button: ButtonId, hold_ms: u32, start: u32) -> Option<MenuEvent> {
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
    fn short_press_activates_the_selected_entry() {
        let mut screen = MenuScreen::new(128, 64);
        assert_eq!(
            click(&mut screen, ButtonId::Right, 60, 0),
            Some(MenuEvent::Activate(MenuEntry::BackToMain))
        );

        let _ = click(&mut screen, ButtonId::Middle, 60, 1000);
        let _ = click(&mut screen, ButtonId::Middle, 60, 2000);
        assert_eq!(screen.selected(), 2);
        assert_eq!(
            click(&mut screen, ButtonId::Right, 60, 3000),
            Some(MenuEvent::Activate(MenuEntry::NewCount))
        );
    }

    #[test]
    fn long_press_is_back() {
        let mut screen = MenuScreen::new(128, 64);
        assert_eq!(click(&mut screen, ButtonId::Right, 1100, 0), Some(MenuEvent::Back));
    }

    #[test]
    fn selection_wraps_through_the_entries() {
        let mut screen = MenuScreen::new(128, 64);
        for _ in 0..4 {
            let _ = click(&mut screen, ButtonId::Middle, 60, 0);
        }
        assert_eq!(screen.selected(), 0);
        let _ = click(&mut screen, ButtonId::Left, 60, 0);
        assert_eq!(screen.selected(), 3);
    }
}
