use std::path::PathBuf;

use clap::Parser;
use mma8452::{registers::DEFAULT_ADDRESS, Axis, Range};

/// Log transient motion events from an MMA8452Q accelerometer.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// I2C bus device path
    #[arg(long, default_value = "/dev/i2c-1")]
    pub bus: String,

    /// Sensor address on the bus
    #[arg(long, default_value_t = DEFAULT_ADDRESS)]
    pub address: u16,

    /// Axis watched for transient events
    #[arg(long, default_value = "z", value_parser = parse_axis)]
    pub axis: Axis,

    /// Detection threshold in g
    #[arg(long, default_value_t = 0.5)]
    pub threshold: f32,

    /// Full-scale range in g
    #[arg(long, default_value = "8", value_parser = parse_range)]
    pub range: Range,

    /// Consecutive qualifying samples before the interrupt asserts
    #[arg(long, default_value_t = 0)]
    pub debounce: u8,

    /// BCM pin wired to the sensor's INT1 line
    #[arg(long, default_value_t = 14)]
    pub interrupt_pin: u8,

    /// BCM pin driving the indicator LED; no indicator when absent
    #[arg(long)]
    pub led_pin: Option<u8>,

    /// Append log records to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

fn parse_axis(s: &str) -> Result<Axis, String> {
    match s.to_ascii_lowercase().as_str() {
        "x" => Ok(Axis::X),
        "y" => Ok(Axis::Y),
        "z" => Ok(Axis::Z),
        _ => Err(format!("unknown axis '{s}', expected x, y or z")),
    }
}

fn parse_range(s: &str) -> Result<Range, String> {
    match s {
        "2" => Ok(Range::G2),
        "4" => Ok(Range::G4),
        "8" => Ok(Range::G8),
        _ => Err(format!("unsupported range '{s}g', expected 2, 4 or 8")),
    }
}
