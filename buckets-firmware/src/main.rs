//! Bucket timer firmware
//!
//! Main firmware binary for the RP2040 bucket. Brings up the peripherals,
//! applies the boot gate and hands the pins to the device task, which runs
//! the game engine.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{Config as I2cConfig, I2c, InterruptHandler as I2cInterruptHandler};
use embassy_rp::peripherals::{I2C0, PIO0, UART1};
use embassy_rp::pio::Pio;
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use buckets_core::config::{parse_config, DeviceConfig};
use buckets_core::runtime::boot_allowed;
use buckets_protocol::AudioCommand;

use crate::board::{ActiveLow, TeamLedPins};
use crate::tasks::DeviceParts;

/// Embedded device configuration (compiled into firmware)
/// Edit bucket.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../bucket.toml");

/// Radio bridge baud rate
const BRIDGE_BAUD: u32 = 115_200;

/// Serial MP3 module baud rate
const AUDIO_BAUD: u32 = 9600;

mod board;
mod channels;
mod display;
mod tasks;

bind_interrupts!(struct Irqs {
    UART1_IRQ => BufferedInterruptHandler<UART1>;
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
    PIO0_IRQ_0 => embassy_rp::pio::InterruptHandler<PIO0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Bucket firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Holding the encoder button at power-on keeps the engine stopped
    let confirm = Input::new(p.PIN_12, Pull::Up);
    if !boot_allowed(confirm.is_low()) {
        warn!("Encoder button held at boot, engine stopped");
        loop {
            embassy_time::Timer::after_secs(60).await;
            trace!("Maintenance heartbeat");
        }
    }

    // I2C0 for the LCD backpack
    let i2c = I2c::new_async(p.I2C0, p.PIN_21, p.PIN_20, Irqs, I2cConfig::default());

    // PIO0 state machine 0 drives the WS2812 strip
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let strip = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_16, &program);
    info!("PIO WS2812 initialized");

    // Serial MP3 module on UART0, only told its volume
    if config.audio.enabled {
        let mut audio_config = UartConfig::default();
        audio_config.baudrate = AUDIO_BAUD;
        let mut audio = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, audio_config);
        let frame = AudioCommand::SetVolume(config.audio.volume).encode();
        match audio.blocking_write(&frame) {
            Ok(()) => info!("Audio volume set to {}", config.audio.volume),
            Err(e) => warn!("Audio module unavailable: {:?}", e),
        }
    }

    let parts = DeviceParts {
        config,
        red: ActiveLow(Input::new(p.PIN_7, Pull::Up)),
        blue: ActiveLow(Input::new(p.PIN_4, Pull::Up)),
        confirm: ActiveLow(confirm),
        leds: TeamLedPins {
            red: Output::new(p.PIN_6, Level::Low),
            blue: Output::new(p.PIN_5, Level::Low),
        },
        seed: boot_seed(),
    };
    let encoder_a = Input::new(p.PIN_14, Pull::Up);
    let encoder_b = Input::new(p.PIN_13, Pull::Up);

    // Spawn tasks
    spawner.spawn(tasks::device_task(parts)).unwrap();
    spawner.spawn(tasks::encoder_task(encoder_a, encoder_b)).unwrap();
    spawner
        .spawn(tasks::lcd_task(i2c, config.display.addresses))
        .unwrap();
    spawner.spawn(tasks::led_task(strip)).unwrap();

    if config.peer.enabled {
        // Radio bridge on UART1 (GPIO8 TX, GPIO9 RX)
        let mut bridge_config = UartConfig::default();
        bridge_config.baudrate = BRIDGE_BAUD;
        let tx_buf = TX_BUF.init([0u8; 64]);
        let rx_buf = RX_BUF.init([0u8; 256]);
        let uart = Uart::new_blocking(p.UART1, p.PIN_8, p.PIN_9, bridge_config);
        let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
        let (tx, rx) = uart.split();
        spawner
            .spawn(tasks::radio_task(tx, rx, config.peer.channel))
            .unwrap();
    } else {
        info!("Peer link disabled");
    }

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Parse the embedded configuration, falling back to defaults
fn load_config() -> DeviceConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            // build.rs validates bucket.toml, so this only trips on a parser mismatch
            error!("Failed to parse embedded config: {}", e);
            error!("Using default configuration");
            DeviceConfig::default()
        }
    }
}

/// Seed for the splash quips, from the ring oscillator's jitter bit
fn boot_seed() -> u64 {
    (0..64).fold(0u64, |seed, _| {
        let bit = embassy_rp::pac::ROSC.randombit().read().randombit();
        (seed << 1) | u64::from(bit)
    })
}
