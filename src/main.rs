//! tallypad firmware entry point (nRF52840).
//!
//! Single cooperative poll loop: sample the buttons/battery/clock once
//! per frame, advance the interaction machine, redraw. Persistence is
//! handled inside the core - every confirmed action hits the EEPROM
//! before the UI state changes.

#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_nrf::gpio::Pin as _;
use embassy_nrf::{bind_interrupts, peripherals, saadc, twim};
use embassy_time::{Duration, Ticker};
use panic_probe as _;

use tallypad::app::App;
use tallypad::canvas::Canvas as _;
use tallypad::config::FRAME_INTERVAL_MS;
use tallypad::hw::{Controls, EepromStore, Oled};

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    SPIM1_SPIS1_TWIM1_TWIS1_SPI1_TWI1 => twim::InterruptHandler<peripherals::TWISPI1>;
    SAADC => saadc::InterruptHandler;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("tallypad boot");

    // OLED on its own I²C bus
    let display_i2c = twim::Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let mut canvas = Oled::new(display_i2c);

    // EEPROM on the second bus
    let eeprom_i2c = twim::Twim::new(p.TWISPI1, Irqs, p.P1_08, p.P1_09, twim::Config::default());
    let store = EepromStore::new(eeprom_i2c);

    // battery probe on AIN0
    let mut adc_config = saadc::Config::default();
    adc_config.resolution = saadc::Resolution::_12BIT;
    let channel = saadc::ChannelConfig::single_ended(p.P0_02);
    let adc = saadc::Saadc::new(p.SAADC, Irqs, adc_config, [channel]);

    let mut controls = Controls::new(
        p.P0_11.degrade(),
        p.P0_12.degrade(),
        p.P0_24.degrade(),
        adc,
    );

    let mut app = App::new(store, canvas.width(), canvas.height());
    info!(
        "restored state: counter={} persistent={}",
        app.counter(),
        app.is_persistent()
    );

    let mut ticker = Ticker::every(Duration::from_millis(FRAME_INTERVAL_MS));
    loop {
        let frame = controls.sample().await;
        app.tick(&frame);

        canvas.clear();
        app.draw(&mut canvas);
        canvas.flush();

        ticker.next().await;
    }
}
