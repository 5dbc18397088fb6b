//! List widgets: rolling history and menu-with-selector.
//!
//! Both widgets store fixed-capacity rows and expose a window of
//! `height / CHAR_H` visible rows onto them. The shared row renderer
//! consumes the [`ListModel`] trait so the two storage policies stay
//! independent of the drawing.

use core::convert::Infallible;

use heapless::String;

use crate::canvas::Canvas;
use crate::config::{CHAR_H, CHAR_W, MAX_ITEM_CHARS, ROW_CHARS};
use crate::input::FrameInput;
use crate::widgets::{Update, Widget};

/// Stored list entry.
pub type ItemText = String<MAX_ITEM_CHARS>;

/// Rendered row (selector glyph + entry).
pub type RowText = String<ROW_CHARS>;

/// Row access used by the windowed renderer.
pub trait ListModel {
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Write row `index` (0 = oldest/top) into `out`, including any
    /// selection decoration.
    fn row(&self, index: usize, out: &mut RowText);
}

/// Draw the rows visible in a `w x h` box at (x, y), starting from
/// `first_visible`. Rows are clipped to the box width.
fn draw_rows(model: &dyn ListModel, first_visible: usize, x: i32, y: i32, w: i32, h: i32, canvas: &mut dyn Canvas) {
    let rows = (h / CHAR_H).max(0) as usize;
    let count = rows.min(model.len().saturating_sub(first_visible));
    let max_chars = ((w / CHAR_W).max(0) as usize).min(ROW_CHARS);
    let mut row = RowText::new();
    for i in 0..count {
        row.clear();
        model.row(first_visible + i, &mut row);
        row.truncate(max_chars);
        canvas.text(x, y + i as i32 * CHAR_H, 1, &row);
    }
}

fn copy_truncated(item: &str) -> ItemText {
    let mut text = ItemText::new();
    for c in item.chars().take(MAX_ITEM_CHARS) {
        let _ = text.push(c);
    }
    text
}

/// Rolling list: once `M` entries are stored, each push silently
/// overwrites the oldest surviving entry.
pub struct OverwritingList<const M: usize> {
    entries: [ItemText; M],
    len: usize,
    // next slot to write
    cursor: usize,
    first_visible: usize,
    updated: bool,
    w: i32,
    h: i32,
    x: i32,
    y: i32,
}

impl<const M: usize> OverwritingList<M> {
    pub fn new(w: i32, h: i32) -> Self {
        Self {
            entries: core::array::from_fn(|_| ItemText::new()),
            len: 0,
            cursor: 0,
            first_visible: 0,
            updated: true,
            w,
            h,
            x: 0,
            y: 0,
        }
    }

    pub fn push(&mut self, item: &str) {
        self.entries[self.cursor] = copy_truncated(item);
        if self.len < M {
            self.len += 1;
        }
        self.cursor = (self.cursor + 1) % M;
        self.updated = true;
    }

    /// Entry `index`, oldest first.
    pub fn get(&self, index: usize) -> &str {
        debug_assert!(index < self.len);
        let first_slot = (self.cursor + M - self.len) % M;
        &self.entries[(first_slot + index) % M]
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.cursor = 0;
        self.first_visible = 0;
        self.updated = true;
    }

    fn visible_rows(&self) -> usize {
        (self.h / CHAR_H).max(0) as usize
    }

    fn max_first(&self) -> usize {
        self.len.saturating_sub(self.visible_rows())
    }

    /// Scroll the window one row down, wrapping back to the top.
    pub fn scroll_down(&mut self) {
        if self.first_visible < self.max_first() {
            self.first_visible += 1;
        } else {
            self.first_visible = 0;
        }
        self.updated = true;
    }

    /// Scroll the window one row up, wrapping to the bottom.
    pub fn scroll_up(&mut self) {
        if self.first_visible > 0 {
            self.first_visible -= 1;
        } else {
            self.first_visible = self.max_first();
        }
        self.updated = true;
    }

    /// Current `(first_visible, visible_rows)` window.
    pub fn window(&self) -> (usize, usize) {
        (self.first_visible, self.visible_rows())
    }
}

impl<const M: usize> ListModel for OverwritingList<M> {
    fn len(&self) -> usize {
        self.len
    }

    fn row(&self, index: usize, out: &mut RowText) {
        let _ = out.push_str(self.get(index));
    }
}

impl<const M: usize> Widget for OverwritingList<M> {
    type Event = Infallible;

    fn width(&self) -> i32 {
        self.w
    }

    fn height(&self) -> i32 {
        self.h
    }

    fn set_pos(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    fn reset(&mut self) {
        self.clear();
    }

    fn update(&mut self, _input: &FrameInput) -> Update<Infallible> {
        let changed = self.updated;
        self.updated = false;
        Update::changed(changed)
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        draw_rows(self, self.first_visible, self.x, self.y, self.w, self.h, canvas);
    }
}

/// Fixed menu list with a selection cursor. Append-only up to capacity:
/// pushing past `M` is a programming error (menus are static), asserted
/// in debug and ignored in release.
pub struct SelectorList<const M: usize> {
    entries: [ItemText; M],
    len: usize,
    selected: usize,
    first_visible: usize,
    updated: bool,
    w: i32,
    h: i32,
    x: i32,
    y: i32,
}

impl<const M: usize> SelectorList<M> {
    pub fn new(w: i32, h: i32) -> Self {
        Self {
            entries: core::array::from_fn(|_| ItemText::new()),
            len: 0,
            selected: 0,
            first_visible: 0,
            updated: true,
            w,
            h,
            x: 0,
            y: 0,
        }
    }

    pub fn push(&mut self, item: &str) {
        debug_assert!(self.len < M, "selector list is full");
        if self.len == M {
            return;
        }
        self.entries[self.len] = copy_truncated(item);
        self.len += 1;
        self.updated = true;
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn visible_rows(&self) -> usize {
        (self.h / CHAR_H).max(0) as usize
    }

    // Restore `first_visible <= selected <= first_visible + rows - 1`,
    // keeping a row of context beyond the selection where the list
    // allows it.
    fn follow_selection(&mut self) {
        let rows = self.visible_rows().max(1);
        let max_first = self.len.saturating_sub(rows);
        let lowest = (self.selected + 2).saturating_sub(rows).min(max_first);
        let highest = self.selected.saturating_sub(1).min(max_first).max(lowest);
        self.first_visible = self.first_visible.clamp(lowest, highest);
    }

    /// Move the selection up one entry, wrapping to the last.
    pub fn select_up(&mut self) {
        if self.len == 0 {
            return;
        }
        self.selected = if self.selected > 0 {
            self.selected - 1
        } else {
            self.len - 1
        };
        self.follow_selection();
        self.updated = true;
    }

    /// Move the selection down one entry, wrapping to the first.
    pub fn select_down(&mut self) {
        if self.len == 0 {
            return;
        }
        self.selected = if self.selected + 1 < self.len {
            self.selected + 1
        } else {
            0
        };
        self.follow_selection();
        self.updated = true;
    }

    /// Current `(first_visible, visible_rows)` window.
    pub fn window(&self) -> (usize, usize) {
        (self.first_visible, self.visible_rows())
    }
}

impl<const M: usize> ListModel for SelectorList<M> {
    fn len(&self) -> usize {
        self.len
    }

    fn row(&self, index: usize, out: &mut RowText) {
        let _ = out.push(if index == self.selected { '\u{1a}' } else { ' ' });
        let _ = out.push_str(&self.entries[index]);
    }
}

impl<const M: usize> Widget for SelectorList<M> {
    type Event = Infallible;

    fn width(&self) -> i32 {
        self.w
    }

    fn height(&self) -> i32 {
        self.h
    }

    fn set_pos(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    // Entries are static; reset only rewinds selection and window.
    fn reset(&mut self) {
        self.selected = 0;
        self.first_visible = 0;
        self.updated = true;
    }

    fn update(&mut self, _input: &FrameInput) -> Update<Infallible> {
        let changed = self.updated;
        self.updated = false;
        Update::changed(changed)
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        draw_rows(self, self.first_visible, self.x, self.y, self.w, self.h, canvas);
    }
}
