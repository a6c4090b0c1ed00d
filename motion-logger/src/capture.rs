use std::fmt;
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::SystemTime;

use i2cdev::core::I2CDevice;
use log::{debug, error, warn};
use mma8452::{sample_to_g, Axis, Error, Mma8452, Range};

use crate::indicator::IndicatorOutput;

/// Edge notifications the GPIO callback can queue before the consumer falls
/// behind. Extras are dropped; the hardware keeps the event latched.
const EVENT_QUEUE_DEPTH: usize = 16;

/// A single qualifying motion event. Lives for one log record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionEvent {
    pub at: SystemTime,
    pub raw: i16,
    pub value_g: f32,
}

impl MotionEvent {
    pub fn new(at: SystemTime, raw: i16, range: Range) -> Self {
        MotionEvent {
            at,
            raw,
            value_g: sample_to_g(raw, range),
        }
    }
}

impl fmt::Display for MotionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} raw: {} value: {:.4}g",
            humantime::format_rfc3339_millis(self.at),
            self.raw,
            self.value_g
        )
    }
}

/// What the capture thread watches for. Mirrors the armed device configuration.
#[derive(Debug, Clone, Copy)]
pub struct Watch {
    pub axis: Axis,
    pub range: Range,
    pub threshold_g: f32,
}

/// Single consumer of the edge-notification queue. Draining the queue on one
/// thread keeps bus transactions serialized with the idle loop's mutex use;
/// the interrupt callback itself never touches the bus.
pub struct CaptureTask<I, L> {
    events: Receiver<SystemTime>,
    device: Arc<Mutex<Mma8452<I>>>,
    indicator: Option<Arc<Mutex<L>>>,
    watch: Watch,
}

impl<I, L> CaptureTask<I, L>
where
    I: I2CDevice + Send + 'static,
    L: IndicatorOutput + 'static,
{
    /// Builds the task and the bounded sender the GPIO callback pushes into.
    pub fn new(
        device: Arc<Mutex<Mma8452<I>>>,
        indicator: Option<Arc<Mutex<L>>>,
        watch: Watch,
    ) -> (Self, SyncSender<SystemTime>) {
        let (event_tx, event_rx) = sync_channel(EVENT_QUEUE_DEPTH);
        let task = CaptureTask {
            events: event_rx,
            device,
            indicator,
            watch,
        };
        (task, event_tx)
    }

    /// Drains edge notifications sequentially until every sender is gone.
    pub fn spawn(self) -> JoinHandle<()> {
        thread::spawn(move || {
            while let Ok(at) = self.events.recv() {
                self.handle(at);
            }
        })
    }

    /// One threshold-crossing interrupt. Bus faults are logged and contained
    /// here; a failed event must not take down the capture loop.
    fn handle(&self, at: SystemTime) {
        warn!(
            "movement above {:.3}g threshold on {} axis",
            self.watch.threshold_g, self.watch.axis
        );

        match self.read_event(at) {
            Ok(Some(event)) => warn!("{event}"),
            Ok(None) => debug!("interrupt fired without fresh sample data"),
            Err(e) => error!("event capture failed: {e}"),
        }

        if let Some(indicator) = &self.indicator {
            if let Ok(mut led) = indicator.lock() {
                led.set(true);
            }
        }
    }

    fn read_event(&self, at: SystemTime) -> Result<Option<MotionEvent>, Error<I::Error>> {
        let mut device = match self.device.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        // Reading the source flags also un-latches the event in hardware
        if let Ok(source) = device.transient_source() {
            debug!("transient source: {source:?}");
        }

        if !device.data_ready()? {
            return Ok(None);
        }

        let samples = device.read_axes()?;
        let raw = samples[self.watch.axis.index()];
        Ok(Some(MotionEvent::new(at, raw, self.watch.range)))
    }
}
