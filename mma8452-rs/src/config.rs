use core::fmt;

/// Step size of the transient threshold register, in g per count.
pub const TRANSIENT_THS_STEP_G: f32 = 0.063;

/// Output data rate, CTRL_REG1 bits 5:3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputDataRate {
    Hz800 = 0b000,
    Hz400 = 0b001,
    Hz200 = 0b010,
    Hz100 = 0b011,
    Hz50 = 0b100,
    Hz12_5 = 0b101,
    Hz6_25 = 0b110,
    Hz1_56 = 0b111,
}

/// Sleep-mode data rate, CTRL_REG1 bits 7:6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SleepRate {
    Hz50 = 0b00,
    Hz12_5 = 0b01,
    Hz6_25 = 0b10,
    Hz1_56 = 0b11,
}

/// Full-scale measurement range, XYZ_DATA_CFG bits 1:0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Range {
    G2 = 0b00,
    G4 = 0b01,
    G8 = 0b10,
}

impl Range {
    /// The field value for XYZ_DATA_CFG
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Maximum representable magnitude in g
    pub fn full_scale(self) -> f32 {
        match self {
            Range::G2 => 2.0,
            Range::G4 => 4.0,
            Range::G8 => 8.0,
        }
    }

    /// Counts per g of the 12-bit signed sample
    pub fn counts_per_g(self) -> f32 {
        2048.0 / self.full_scale()
    }
}

/// The axis watched for transient events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    /// TRANSIENT_CFG enable bit for this axis
    pub fn transient_mask(self) -> u8 {
        1 << (self as u8)
    }

    /// Position of this axis in a decoded output block
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
            Axis::Z => write!(f, "Z"),
        }
    }
}

/// Everything written to the device during the arming sequence.
#[derive(Debug, Clone, Copy)]
pub struct DeviceConfig {
    pub odr: OutputDataRate,
    pub sleep_rate: SleepRate,
    pub range: Range,
    pub axis: Axis,
    /// Detection threshold in g, encoded to raw counts on write
    pub threshold_g: f32,
    /// Consecutive qualifying samples before the interrupt asserts; 0 fires immediately
    pub debounce: u8,
}

impl DeviceConfig {
    /// CTRL_REG1 byte selecting the data rates with the active bit clear.
    pub fn ctrl_reg1_standby(&self) -> u8 {
        ((self.sleep_rate as u8) << 6) | ((self.odr as u8) << 3)
    }

    /// Threshold in raw counts, saturating at the register's limits.
    pub fn threshold_counts(&self) -> u8 {
        (self.threshold_g / TRANSIENT_THS_STEP_G).round().clamp(0.0, 255.0) as u8
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        DeviceConfig {
            odr: OutputDataRate::Hz100,
            sleep_rate: SleepRate::Hz6_25,
            range: Range::G8,
            axis: Axis::Z,
            threshold_g: 0.5,
            debounce: 0,
        }
    }
}
