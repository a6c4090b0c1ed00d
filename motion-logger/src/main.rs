use std::process;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use clap::Parser;
use i2cdev::linux::LinuxI2CDevice;
use log::{error, info};
use rppal::gpio::{Gpio, Trigger};

mod capture;
mod cli;
mod indicator;
mod logging;

use capture::{CaptureTask, Watch};
use cli::Cli;
use indicator::{IndicatorOutput, LedIndicator};
use mma8452::{DeviceConfig, Mma8452};

/// How often the idle loop drops the indicator back low.
const INDICATOR_CLEAR_PERIOD: Duration = Duration::from_secs(5);

fn main() {
    let args = Cli::parse();
    logging::init(args.log_file.as_deref());

    let i2c = LinuxI2CDevice::new(&args.bus, args.address).expect("could not open i2c bus");
    let mut device = Mma8452::new(i2c);

    let config = DeviceConfig {
        range: args.range,
        axis: args.axis,
        threshold_g: args.threshold,
        debounce: args.debounce,
        ..DeviceConfig::default()
    };
    if let Err(e) = device.configure(&config) {
        // A partially configured sensor must not be left running unattended
        error!("sensor configuration failed: {e}");
        process::exit(1);
    }
    info!(
        "sensor armed: {:.3}g threshold on {} axis, +/-{}g range",
        args.threshold,
        args.axis,
        args.range.full_scale()
    );

    let gpio = Gpio::new().expect("GPIO unavailable");
    let mut interrupt_pin = gpio
        .get(args.interrupt_pin)
        .expect("could not claim interrupt pin")
        .into_input_pullup();
    let indicator = args.led_pin.map(|pin| {
        let led = gpio
            .get(pin)
            .expect("could not claim LED pin")
            .into_output_low();
        Arc::new(Mutex::new(LedIndicator::new(led)))
    });

    let device = Arc::new(Mutex::new(device));
    let watch = Watch {
        axis: args.axis,
        range: args.range,
        threshold_g: args.threshold,
    };
    let (task, event_tx) = CaptureTask::new(Arc::clone(&device), indicator.clone(), watch);
    task.spawn();

    interrupt_pin
        .set_async_interrupt(Trigger::FallingEdge, None, move |_event| {
            let _ = event_tx.try_send(SystemTime::now());
        })
        .expect("could not register edge callback");

    let (stop_tx, stop_rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = stop_tx.send(());
    })
    .expect("could not install shutdown handler");

    info!("waiting for movement events");
    loop {
        match stop_rx.recv_timeout(INDICATOR_CLEAR_PERIOD) {
            Err(RecvTimeoutError::Timeout) => {
                if let Some(indicator) = &indicator {
                    if let Ok(mut led) = indicator.lock() {
                        led.set(false);
                    }
                }
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    info!("shutting down");
    // Claimed pins are released when the rppal handles drop
}
