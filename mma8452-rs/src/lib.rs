//! Driver for the NXP MMA8452Q 3-axis accelerometer on a Linux I2C bus.
//!
//! The part's transient-detection engine raises a hardware interrupt when
//! acceleration on a selected axis exceeds a programmed threshold, so the
//! host only touches the bus when something actually moved. The driver is
//! generic over [`i2cdev::core::I2CDevice`] and can run against a mock bus
//! in tests.

pub(crate) mod config;
pub(crate) mod device;
pub(crate) mod error;

/// Module for the register map
pub mod registers;

pub use config::*;
pub use device::*;
pub use error::Error;
