//! Application context: screens, navigation, counters, and the log.
//!
//! Owns every screen instance plus the navigation stack and dispatches
//! screen events per the interaction state machine. State-changing
//! actions follow write-ahead ordering: the intent record is appended
//! to the persistent log before any in-memory or display state
//! changes, so an interrupted action is lost whole, never half
//! applied.

use core::fmt::Write as _;

use crate::canvas::Canvas;
use crate::input::FrameInput;
use crate::log::{EventLog, LogCommand};
use crate::nav::NavStack;
use crate::screens::{
    AcceptEvent, AcceptScreen, DeltaEvent, DeltaScreen, HistoryEvent, HistoryScreen, MainEvent,
    MainScreen, MenuEntry, MenuEvent, MenuScreen, ScreenId,
};
use crate::store::NvStore;
use crate::widgets::battery::BatteryWidget;
use crate::widgets::list::ItemText;
use crate::widgets::Widget;

pub struct App<S: NvStore> {
    log: EventLog<S>,
    nav: NavStack,
    main: MainScreen,
    delta: DeltaScreen,
    menu: MenuScreen,
    history: HistoryScreen,
    confirm_new_count: AcceptScreen,
    confirm_drop_history: AcceptScreen,
    battery: BatteryWidget,
    // display numbering; short resets on new count, full only on wipe
    short_seq: u32,
    full_seq: u32,
}

impl<S: NvStore> App<S> {
    /// Build the UI over `store` and replay whatever the log holds.
    pub fn new(store: S, w: i32, h: i32) -> Self {
        let mut battery = BatteryWidget::new();
        battery.set_pos(w - battery.width(), 0);

        let mut app = Self {
            log: EventLog::new(store),
            nav: NavStack::new(),
            main: MainScreen::new(w, h),
            delta: DeltaScreen::new(w, h),
            menu: MenuScreen::new(w, h),
            history: HistoryScreen::new(w, h),
            confirm_new_count: AcceptScreen::new(w, h, "start new count"),
            confirm_drop_history: AcceptScreen::new(w, h, "delete history"),
            battery,
            short_seq: 0,
            full_seq: 0,
        };
        app.restore();
        app
    }

    pub fn counter(&self) -> i32 {
        self.main.value()
    }

    pub fn active_screen(&self) -> ScreenId {
        self.nav.active()
    }

    pub fn nav_depth(&self) -> usize {
        self.nav.depth()
    }

    /// Whether user actions reach persistent memory this session.
    pub fn is_persistent(&self) -> bool {
        self.log.is_persistent()
    }

    pub fn into_store(self) -> S {
        self.log.into_store()
    }

    /// Advance the UI by one frame. The returned flag mirrors the
    /// widgets' dirty state; the frame loop redraws regardless.
    pub fn tick(&mut self, input: &FrameInput) -> bool {
        let mut changed = self.battery.update(input).changed;

        match self.nav.active() {
            ScreenId::Main => {
                let up = self.main.update(input);
                changed |= up.changed;
                match up.event {
                    Some(MainEvent::Adjust(step)) => {
                        self.delta.begin(self.main.value(), step);
                        self.nav.goto(ScreenId::Delta);
                    }
                    Some(MainEvent::OpenMenu) => self.nav.goto(ScreenId::Menu),
                    None => {}
                }
            }
            ScreenId::Delta => {
                let up = self.delta.update(input);
                changed |= up.changed;
                match up.event {
                    Some(DeltaEvent::Commit { value }) => {
                        self.nav.pop();
                        self.commit_value(value);
                    }
                    Some(DeltaEvent::Cancel) => self.nav.pop(),
                    None => {}
                }
            }
            ScreenId::Menu => {
                let up = self.menu.update(input);
                changed |= up.changed;
                match up.event {
                    Some(MenuEvent::Activate(MenuEntry::BackToMain)) | Some(MenuEvent::Back) => {
                        self.nav.pop()
                    }
                    Some(MenuEvent::Activate(MenuEntry::ShowHistory)) => {
                        self.nav.goto(ScreenId::History)
                    }
                    Some(MenuEvent::Activate(MenuEntry::NewCount)) => {
                        self.nav.goto(ScreenId::ConfirmNewCount)
                    }
                    Some(MenuEvent::Activate(MenuEntry::DropHistory)) => {
                        self.nav.goto(ScreenId::ConfirmDropHistory)
                    }
                    None => {}
                }
            }
            ScreenId::History => {
                let up = self.history.update(input);
                changed |= up.changed;
                if let Some(HistoryEvent::Back) = up.event {
                    self.nav.pop();
                }
            }
            ScreenId::ConfirmNewCount => {
                let up = self.confirm_new_count.update(input);
                changed |= up.changed;
                match up.event {
                    Some(AcceptEvent::Confirm) => {
                        self.log.record_start_new_count();
                        let Self {
                            main,
                            history,
                            short_seq,
                            ..
                        } = self;
                        Self::start_new_count(main, history, short_seq);
                        self.nav.pop();
                    }
                    Some(AcceptEvent::Cancel) => self.nav.pop(),
                    None => {}
                }
            }
            ScreenId::ConfirmDropHistory => {
                let up = self.confirm_drop_history.update(input);
                changed |= up.changed;
                match up.event {
                    Some(AcceptEvent::Confirm) => {
                        self.log.record_clear_history();
                        let Self {
                            main,
                            history,
                            short_seq,
                            full_seq,
                            ..
                        } = self;
                        Self::clear_history(main, history, short_seq, full_seq);
                        self.nav.pop();
                    }
                    Some(AcceptEvent::Cancel) => self.nav.pop(),
                    None => {}
                }
            }
        }

        changed
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        match self.nav.active() {
            ScreenId::Main => self.main.draw(canvas),
            ScreenId::Delta => self.delta.draw(canvas),
            ScreenId::Menu => self.menu.draw(canvas),
            ScreenId::History => self.history.draw(canvas),
            ScreenId::ConfirmNewCount => self.confirm_new_count.draw(canvas),
            ScreenId::ConfirmDropHistory => self.confirm_drop_history.draw(canvas),
        }
        self.battery.draw(canvas);
    }

    fn restore(&mut self) {
        let Self {
            log,
            main,
            history,
            short_seq,
            full_seq,
            ..
        } = self;
        for command in log.restore() {
            match command {
                LogCommand::ValueChanged { value, delta } => {
                    Self::apply_change(main, history, short_seq, full_seq, value, delta)
                }
                LogCommand::CountStarted => Self::start_new_count(main, history, short_seq),
                LogCommand::HistoryCleared => {
                    Self::clear_history(main, history, short_seq, full_seq)
                }
            }
        }
    }

    fn commit_value(&mut self, value: i32) {
        let delta = value - self.main.value();
        // log first, apply second
        self.log.record_new_value(value);
        let Self {
            main,
            history,
            short_seq,
            full_seq,
            ..
        } = self;
        Self::apply_change(main, history, short_seq, full_seq, value, delta);
    }

    fn apply_change(
        main: &mut MainScreen,
        history: &mut HistoryScreen,
        short_seq: &mut u32,
        full_seq: &mut u32,
        value: i32,
        delta: i32,
    ) {
        let old = value - delta;
        let sign = if delta >= 0 { '+' } else { '-' };
        let magnitude = delta.unsigned_abs();

        *short_seq += 1;
        let mut entry = ItemText::new();
        let _ = write!(entry, "{short_seq}.{sign}{magnitude}");
        main.push_history(&entry);

        *full_seq += 1;
        entry.clear();
        let _ = write!(entry, "{full_seq}. {value}={old}{sign}{magnitude}");
        history.push_entry(&entry);

        main.set_value(value);
    }

    fn start_new_count(main: &mut MainScreen, history: &mut HistoryScreen, short_seq: &mut u32) {
        history.push_entry("------");
        *short_seq = 0;
        main.set_value(0);
        main.clear_history();
    }

    fn clear_history(
        main: &mut MainScreen,
        history: &mut HistoryScreen,
        short_seq: &mut u32,
        full_seq: &mut u32,
    ) {
        Self::start_new_count(main, history, short_seq);
        history.clear();
        *full_seq = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::EventLog;
    use crate::sim::TraceCanvas;
    use crate::store::MemStore;

    #[test]
    fn boot_replays_the_log_into_the_ui() {
        let mut log = EventLog::new(MemStore::<256>::new());
        log.restore().count();
        log.record_new_value(1);
        log.record_new_value(3);
        log.record_start_new_count();
        log.record_new_value(4);

        let app = App::new(log.into_store(), 128, 64);
        assert_eq!(app.counter(), 4);
        assert_eq!(app.active_screen(), ScreenId::Main);

        let mut canvas = TraceCanvas::new(128, 64);
        app.draw(&mut canvas);
        // short history restarted after the new-count marker
        assert!(canvas.has_text("1.+4"));
        assert!(!canvas.has_text("1.+1"));
    }

    #[test]
    fn replayed_history_numbering_spans_count_boundaries() {
        let mut log = EventLog::new(MemStore::<256>::new());
        log.restore().count();
        log.record_new_value(2);
        log.record_start_new_count();
        log.record_new_value(5);

        let app = App::new(log.into_store(), 128, 64);
        assert_eq!(app.counter(), 5);

        let mut canvas = TraceCanvas::new(128, 64);
        app.history.draw(&mut canvas);
        assert!(canvas.has_text("1. 2=0+2"));
        assert!(canvas.has_text("------"));
        assert!(canvas.has_text("2. 5=0+5"));
    }

    #[test]
    fn fresh_store_boots_to_zero() {
        let app = App::new(MemStore::<256>::new(), 128, 64);
        assert_eq!(app.counter(), 0);
        assert!(app.is_persistent());
    }

    #[test]
    fn invalid_store_still_boots() {
        let app = App::new(MemStore::<256>::invalid(), 128, 64);
        assert_eq!(app.counter(), 0);
        assert!(!app.is_persistent());
    }
}
