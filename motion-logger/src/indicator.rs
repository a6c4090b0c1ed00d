use rppal::gpio::OutputPin;

/// Output level of the visual indicator. A trait so capture tests can run
/// without claiming real pins.
pub trait IndicatorOutput: Send {
    fn set(&mut self, on: bool);
}

/// LED on a GPIO output, behind a series resistor.
pub struct LedIndicator {
    pin: OutputPin,
}

impl LedIndicator {
    pub fn new(pin: OutputPin) -> Self {
        LedIndicator { pin }
    }
}

impl IndicatorOutput for LedIndicator {
    fn set(&mut self, on: bool) {
        if on {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
    }
}
