//! Button, battery, and clock sampling.
//!
//! Three physical buttons (active-low with internal pull-up) plus the
//! SAADC battery probe are read once per frame into a [`FrameInput`]
//! snapshot; debounce and press classification happen in the core's
//! button state machines.

use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_nrf::saadc::Saadc;
use embassy_time::Instant;

use crate::config::{BATTERY_ADC_BITS, BATTERY_ADC_VCC, NUM_BUTTONS};
use crate::input::FrameInput;
use crate::widgets::battery::level_from_adc;

pub struct Controls<'d> {
    buttons: [Input<'d>; NUM_BUTTONS],
    adc: Saadc<'d, 1>,
}

impl<'d> Controls<'d> {
    pub fn new(left: AnyPin, middle: AnyPin, right: AnyPin, adc: Saadc<'d, 1>) -> Self {
        Self {
            buttons: [
                Input::new(left, Pull::Up),
                Input::new(middle, Pull::Up),
                Input::new(right, Pull::Up),
            ],
            adc,
        }
    }

    /// Sample every input source once.
    pub async fn sample(&mut self) -> FrameInput {
        let mut pressed = [false; NUM_BUTTONS];
        for (level, button) in pressed.iter_mut().zip(self.buttons.iter()) {
            *level = button.is_low();
        }

        let mut probe = [0i16; 1];
        self.adc.sample(&mut probe).await;
        let raw = probe[0].max(0) as u16;

        FrameInput {
            now_ms: Instant::now().as_millis() as u32,
            pressed,
            battery: level_from_adc(raw, BATTERY_ADC_BITS, BATTERY_ADC_VCC),
        }
    }
}
