use i2cdev::core::I2CDevice;
use log::debug;

use crate::config::{DeviceConfig, Range};
use crate::error::Error;
use crate::registers::*;

/// Owned connection to one MMA8452Q. Opened once at startup and held for the
/// process lifetime; dropping the bus handle releases it.
pub struct Mma8452<I> {
    i2c: I,
}

impl<I: I2CDevice> Mma8452<I> {
    pub fn new(i2c: I) -> Self {
        Mma8452 { i2c }
    }

    /// Get the inner bus handle as a ref
    pub fn inner_mut(&mut self) -> &mut I {
        &mut self.i2c
    }

    /// Checks WHO_AM_I against the product identity. A mismatch means the
    /// wrong part (or nothing) answered at this address; callers must not
    /// issue any configuration traffic after that.
    pub fn probe(&mut self) -> Result<(), Error<I::Error>> {
        let found = self.read_register(WHO_AM_I)?;
        if found != DEVICE_ID {
            return Err(Error::IdentityMismatch {
                found,
                expected: DEVICE_ID,
            });
        }
        Ok(())
    }

    /// Brings the device from standby into an armed, active state.
    ///
    /// The register order is fixed: the device only accepts configuration
    /// writes while in standby, and only raises interrupts once the active
    /// bit is set, so the active-mode write must come last. A failure part
    /// way through leaves the device partially configured; there is no
    /// rollback and callers should treat it as fatal.
    pub fn configure(&mut self, config: &DeviceConfig) -> Result<(), Error<I::Error>> {
        self.probe()?;

        // Standby, with the output and sleep data rates
        self.write_register(CTRL_REG1, config.ctrl_reg1_standby())?;

        // Full-scale selection, preserving the filter bits
        let data_cfg = self.read_register(XYZ_DATA_CFG)?;
        let data_cfg = (data_cfg & !XYZ_DATA_CFG_FS_MASK) | config.range.bits();
        self.write_register(XYZ_DATA_CFG, data_cfg)?;

        // Transient engine: watched axis, threshold, debounce
        self.write_register(TRANSIENT_CFG, config.axis.transient_mask())?;
        self.write_register(TRANSIENT_THS, config.threshold_counts())?;
        self.write_register(TRANSIENT_COUNT, config.debounce)?;

        // Enable the transient interrupt and route it to INT1
        self.write_register(CTRL_REG4, CTRL_REG4_INT_EN_TRANS)?;
        self.write_register(CTRL_REG5, CTRL_REG5_INT_CFG_TRANS)?;

        // Active mode. Interrupts start firing after this write.
        let ctrl = self.read_register(CTRL_REG1)?;
        self.write_register(CTRL_REG1, ctrl | CTRL_REG1_ACTIVE)?;

        debug!("sensor armed: {:?}", config);
        Ok(())
    }

    /// Whether a fresh sample sits behind the output registers. An interrupt
    /// with this clear is a stale flag, not an error; skip the data read.
    pub fn data_ready(&mut self) -> Result<bool, Error<I::Error>> {
        let status = self.read_register(STATUS)?;
        Ok(status & STATUS_ZYXDR != 0)
    }

    /// One contiguous block read of all three axes, MSB/LSB pairs in X, Y, Z
    /// order, decoded to 12-bit signed samples.
    pub fn read_axes(&mut self) -> Result<[i16; 3], Error<I::Error>> {
        let block = self
            .i2c
            .smbus_read_i2c_block_data(OUT_X_MSB, 6)
            .map_err(Error::Bus)?;
        if block.len() < 6 {
            return Err(Error::ShortRead {
                expected: 6,
                got: block.len(),
            });
        }

        let mut samples = [0i16; 3];
        for (i, sample) in samples.iter_mut().enumerate() {
            *sample = decode_sample(block[2 * i], block[2 * i + 1]);
        }
        Ok(samples)
    }

    /// Reads the latched transient-event flags. The read itself clears the
    /// latch and releases the interrupt line.
    pub fn transient_source(&mut self) -> Result<TransientSource, Error<I::Error>> {
        Ok(TransientSource::from(self.read_register(TRANSIENT_SRC)?))
    }

    fn read_register(&mut self, register: u8) -> Result<u8, Error<I::Error>> {
        self.i2c.smbus_read_byte_data(register).map_err(Error::Bus)
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Error<I::Error>> {
        self.i2c
            .smbus_write_byte_data(register, value)
            .map_err(Error::Bus)
    }
}

/// Decoded TRANSIENT_SRC flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransientSource {
    pub active: bool,
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl From<u8> for TransientSource {
    fn from(value: u8) -> Self {
        TransientSource {
            active: value & TRANSIENT_SRC_EA != 0,
            x: value & 0x02 != 0,
            y: value & 0x08 != 0,
            z: value & 0x20 != 0,
        }
    }
}

/// Decodes one axis from its MSB/LSB pair. The device outputs a 12-bit
/// left-justified big-endian sample; the arithmetic shift sign-extends the
/// two's-complement value.
pub fn decode_sample(msb: u8, lsb: u8) -> i16 {
    ((((msb as u16) << 8) | lsb as u16) as i16) >> 4
}

/// Converts a 12-bit signed sample to g at the given full-scale range.
pub fn sample_to_g(sample: i16, range: Range) -> f32 {
    sample as f32 / 2048.0 * range.full_scale()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DeviceConfig, Range};
    use std::collections::HashMap;
    use std::io;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Op {
        Read(u8),
        Write(u8, u8),
        Block(u8, u8),
    }

    /// Bus double that serves reads from a register table and records every
    /// transaction in order.
    struct MockBus {
        regs: HashMap<u8, u8>,
        block: Vec<u8>,
        ops: Vec<Op>,
        fail_block_read: bool,
    }

    impl MockBus {
        fn new() -> Self {
            MockBus {
                regs: HashMap::new(),
                block: Vec::new(),
                ops: Vec::new(),
                fail_block_read: false,
            }
        }

        fn with_identity() -> Self {
            let mut bus = Self::new();
            bus.regs.insert(WHO_AM_I, DEVICE_ID);
            bus
        }

        fn writes(&self) -> Vec<(u8, u8)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Write(register, value) => Some((*register, *value)),
                    _ => None,
                })
                .collect()
        }
    }

    impl I2CDevice for MockBus {
        type Error = io::Error;

        fn read(&mut self, _data: &mut [u8]) -> Result<(), Self::Error> {
            unimplemented!()
        }

        fn write(&mut self, _data: &[u8]) -> Result<(), Self::Error> {
            unimplemented!()
        }

        fn smbus_write_quick(&mut self, _bit: bool) -> Result<(), Self::Error> {
            unimplemented!()
        }

        fn smbus_read_byte_data(&mut self, register: u8) -> Result<u8, Self::Error> {
            self.ops.push(Op::Read(register));
            Ok(self.regs.get(&register).copied().unwrap_or(0))
        }

        fn smbus_write_byte_data(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
            self.ops.push(Op::Write(register, value));
            self.regs.insert(register, value);
            Ok(())
        }

        fn smbus_read_block_data(&mut self, _register: u8) -> Result<Vec<u8>, Self::Error> {
            unimplemented!()
        }

        fn smbus_read_i2c_block_data(
            &mut self,
            register: u8,
            len: u8,
        ) -> Result<Vec<u8>, Self::Error> {
            self.ops.push(Op::Block(register, len));
            if self.fail_block_read {
                return Err(io::Error::new(io::ErrorKind::Other, "missing acknowledgment"));
            }
            Ok(self.block.iter().copied().take(len as usize).collect())
        }

        fn smbus_write_block_data(
            &mut self,
            _register: u8,
            _values: &[u8],
        ) -> Result<(), Self::Error> {
            unimplemented!()
        }

        fn smbus_write_i2c_block_data(
            &mut self,
            _register: u8,
            _values: &[u8],
        ) -> Result<(), Self::Error> {
            unimplemented!()
        }

        fn smbus_process_block(
            &mut self,
            _register: u8,
            _values: &[u8],
        ) -> Result<Vec<u8>, Self::Error> {
            unimplemented!()
        }
    }

    #[test]
    fn test_decode_sample_reference_table() {
        assert_eq!(decode_sample(0x12, 0x34), 291);
        assert_eq!(decode_sample(0x00, 0x00), 0);
        assert_eq!(decode_sample(0x7F, 0xF0), 2047);
        assert_eq!(decode_sample(0x80, 0x00), -2048);
        assert_eq!(decode_sample(0xFF, 0xF0), -1);
    }

    #[test]
    fn test_sample_to_g_is_monotonic() {
        let samples = [-2048i16, -1024, -1, 0, 1, 291, 1024, 2047];
        let values: Vec<f32> = samples
            .iter()
            .map(|s| sample_to_g(*s, Range::G8))
            .collect();
        for pair in values.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_g_conversion_round_trips() {
        // Encode a known value to raw counts and decode it back
        let value_g = 1.0f32;
        let raw = (value_g * Range::G8.counts_per_g()).round() as i16;
        let decoded = sample_to_g(raw, Range::G8);
        assert!((decoded - value_g).abs() <= 1.0 / Range::G8.counts_per_g());
    }

    #[test]
    fn test_configure_write_order() {
        let mut device = Mma8452::new(MockBus::with_identity());
        device.configure(&DeviceConfig::default()).unwrap();

        let writes = device.inner_mut().writes();
        let registers: Vec<u8> = writes.iter().map(|(register, _)| *register).collect();
        assert_eq!(
            registers,
            vec![
                CTRL_REG1,
                XYZ_DATA_CFG,
                TRANSIENT_CFG,
                TRANSIENT_THS,
                TRANSIENT_COUNT,
                CTRL_REG4,
                CTRL_REG5,
                CTRL_REG1,
            ]
        );

        // The active bit appears exactly once, in the last write
        let (register, value) = *writes.last().unwrap();
        assert_eq!(register, CTRL_REG1);
        assert_eq!(value, 0x98 | CTRL_REG1_ACTIVE);
        for (register, value) in &writes[..writes.len() - 1] {
            if *register == CTRL_REG1 {
                assert_eq!(value & CTRL_REG1_ACTIVE, 0);
            }
        }
    }

    #[test]
    fn test_configure_values() {
        let mut device = Mma8452::new(MockBus::with_identity());
        device.configure(&DeviceConfig::default()).unwrap();

        let writes = device.inner_mut().writes();
        assert!(writes.contains(&(TRANSIENT_CFG, 0b100))); // Z axis
        assert!(writes.contains(&(TRANSIENT_THS, 8))); // 0.5 g at 0.063 g/count
        assert!(writes.contains(&(TRANSIENT_COUNT, 0)));
        assert!(writes.contains(&(CTRL_REG4, CTRL_REG4_INT_EN_TRANS)));
        assert!(writes.contains(&(CTRL_REG5, CTRL_REG5_INT_CFG_TRANS)));
    }

    #[test]
    fn test_configure_preserves_data_cfg_bits() {
        let mut bus = MockBus::with_identity();
        // High-pass filter enabled, scale previously at +/-4g
        bus.regs.insert(XYZ_DATA_CFG, 0x11);

        let mut device = Mma8452::new(bus);
        device.configure(&DeviceConfig::default()).unwrap();
        assert!(device.inner_mut().writes().contains(&(XYZ_DATA_CFG, 0x12)));
    }

    #[test]
    fn test_identity_mismatch_aborts_without_writes() {
        let mut bus = MockBus::new();
        bus.regs.insert(WHO_AM_I, 0x1A);

        let mut device = Mma8452::new(bus);
        let err = device.configure(&DeviceConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::IdentityMismatch {
                found: 0x1A,
                expected: DEVICE_ID
            }
        ));
        assert!(device.inner_mut().writes().is_empty());
    }

    #[test]
    fn test_data_ready_flag() {
        let mut bus = MockBus::new();
        bus.regs.insert(STATUS, STATUS_ZYXDR);
        let mut device = Mma8452::new(bus);
        assert!(device.data_ready().unwrap());

        device.inner_mut().regs.insert(STATUS, 0x00);
        assert!(!device.data_ready().unwrap());
    }

    #[test]
    fn test_read_axes_decodes_block() {
        let mut bus = MockBus::new();
        bus.block = vec![0x01, 0x00, 0xFF, 0xF0, 0x12, 0x34];
        let mut device = Mma8452::new(bus);

        let samples = device.read_axes().unwrap();
        assert_eq!(samples, [16, -1, 291]);
        assert_eq!(
            device.inner_mut().ops,
            vec![Op::Block(OUT_X_MSB, 6)]
        );
    }

    #[test]
    fn test_read_axes_bus_failure() {
        let mut bus = MockBus::new();
        bus.fail_block_read = true;
        let mut device = Mma8452::new(bus);
        assert!(matches!(device.read_axes(), Err(Error::Bus(_))));
    }

    #[test]
    fn test_read_axes_short_block() {
        let mut bus = MockBus::new();
        bus.block = vec![0x01, 0x00];
        let mut device = Mma8452::new(bus);
        assert!(matches!(
            device.read_axes(),
            Err(Error::ShortRead { expected: 6, got: 2 })
        ));
    }

    #[test]
    fn test_transient_source_decode() {
        let mut bus = MockBus::new();
        bus.regs.insert(TRANSIENT_SRC, TRANSIENT_SRC_EA | 0x20);
        let mut device = Mma8452::new(bus);

        let source = device.transient_source().unwrap();
        assert!(source.active);
        assert!(source.z);
        assert!(!source.x);
        assert!(!source.y);
    }
}
