//! Battery indicator widget and probe-value conversion.

use core::convert::Infallible;

use crate::canvas::Canvas;
use crate::input::FrameInput;
use crate::widgets::{Update, Widget};

/// Nominal voltage of one cell.
const CELL_VOLTS: f32 = 1.4;

/// Probe voltage above which the pack is assumed to hold two cells.
const TWO_CELL_THRESHOLD_VOLTS: f32 = 2.0;

/// Probe voltage below which no battery is assumed present.
const NO_BATTERY_VOLTS: f32 = 0.2;

/// Convert a raw ADC reading of the battery probe into a level in
/// 0..=1, or -1.0 when no battery is detected. Detects whether one or
/// two cells are installed from the probe voltage.
pub fn level_from_adc(raw: u16, resolution_bits: u8, vcc: f32) -> f32 {
    let full_scale = (1u32 << resolution_bits) as f32;
    let volts = raw as f32 / full_scale * vcc;
    if volts < NO_BATTERY_VOLTS {
        return -1.0;
    }
    let cells = if volts > TWO_CELL_THRESHOLD_VOLTS { 2.0 } else { 1.0 };
    let level = volts / (cells * CELL_VOLTS);
    if level > 1.0 {
        1.0
    } else {
        level
    }
}

/// 16x7 px battery glyph, top-right of every screen: a crossed-out
/// battery outline when no battery is detected, otherwise 0-3 bars.
pub struct BatteryWidget {
    // -2 = not yet sampled, -1 = no battery, 0..=3 bars
    state: i8,
    x: i32,
    y: i32,
}

impl BatteryWidget {
    pub fn new() -> Self {
        Self { state: -2, x: 0, y: 0 }
    }

    fn quantize(level: f32) -> i8 {
        if level < 0.0 {
            return -1;
        }
        let mut bars = 0;
        if level > 0.25 {
            bars += 1;
        }
        if level > 0.5 {
            bars += 1;
        }
        if level > 0.75 {
            bars += 1;
        }
        bars
    }
}

impl Default for BatteryWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for BatteryWidget {
    type Event = Infallible;

    fn width(&self) -> i32 {
        16
    }

    fn height(&self) -> i32 {
        7
    }

    fn set_pos(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    fn reset(&mut self) {
        self.state = -2;
    }

    fn update(&mut self, input: &FrameInput) -> Update<Infallible> {
        let state = Self::quantize(input.battery);
        if state != self.state {
            self.state = state;
            return Update::changed(true);
        }
        Update::idle()
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let (x, y) = (self.x, self.y);
        if self.state == -1 {
            // disconnected battery: plug, gap, contacts
            canvas.hline(x, y + 1, 3);
            canvas.hline(x, y + 3, 3);
            canvas.hline(x + 8, y + 2, 3);
            canvas.rect(x + 3, y, 3, 5);
            canvas.rect(x + 6, y + 1, 2, 3);
        } else {
            canvas.rect(x + 1, y, 15, 7);
            canvas.vline(x, y + 1, 5);
            if self.state > 2 {
                canvas.fill_rect(x + 3, y + 2, 3, 3);
            }
            if self.state > 1 {
                canvas.fill_rect(x + 7, y + 2, 3, 3);
            }
            if self.state > 0 {
                canvas.fill_rect(x + 11, y + 2, 3, 3);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::TraceCanvas;

    fn battery_frame(level: f32) -> FrameInput {
        FrameInput {
            battery: level,
            ..FrameInput::idle(0)
        }
    }

    #[test]
    fn adc_conversion_detects_cell_count() {
        let vcc = 3.3;
        let close = |a: f32, b: f32| (a - b).abs() < 1e-3;

        assert_eq!(level_from_adc(0, 12, vcc), -1.0);

        // one cell
        assert!(close(level_from_adc(1024, 12, vcc), 1024.0 / 4096.0 * vcc / 1.4));
        assert!(close(level_from_adc(1600, 12, vcc), 1600.0 / 4096.0 * vcc / 1.4));
        assert!(close(level_from_adc(2000, 12, vcc), 1.0));

        // two cells
        assert!(close(level_from_adc(2600, 12, vcc), 2600.0 / 4096.0 * vcc / 2.8));
        assert!(close(level_from_adc(3000, 12, vcc), 3000.0 / 4096.0 * vcc / 2.8));
        assert!(close(level_from_adc(3500, 12, vcc), 1.0));
    }

    #[test]
    fn level_quantizes_to_bars() {
        let mut widget = BatteryWidget::new();
        assert!(widget.update(&battery_frame(-1.0)).changed);
        assert!(!widget.update(&battery_frame(-1.0)).changed);
        assert!(widget.update(&battery_frame(0.1)).changed);
        assert!(!widget.update(&battery_frame(0.25)).changed);
        assert!(widget.update(&battery_frame(0.3)).changed);
        assert!(widget.update(&battery_frame(0.8)).changed);
    }

    #[test]
    fn full_battery_draws_three_bars() {
        let mut widget = BatteryWidget::new();
        widget.set_pos(112, 0);
        widget.update(&battery_frame(0.9));

        let mut canvas = TraceCanvas::new(128, 64);
        widget.draw(&mut canvas);
        let fills = canvas.ops.iter().filter(|op| op.is_fill_rect()).count();
        assert_eq!(fills, 3);
    }
}
