//! MMA8452Q register map and bit constants.

/// Default 7-bit bus address with the SA0 line pulled high
pub const DEFAULT_ADDRESS: u16 = 0x1D;
/// Product identity reported by WHO_AM_I
pub const DEVICE_ID: u8 = 0x2A;

pub const STATUS: u8 = 0x00;
pub const OUT_X_MSB: u8 = 0x01;
pub const OUT_X_LSB: u8 = 0x02;
pub const OUT_Y_MSB: u8 = 0x03;
pub const OUT_Y_LSB: u8 = 0x04;
pub const OUT_Z_MSB: u8 = 0x05;
pub const OUT_Z_LSB: u8 = 0x06;
pub const SYSMOD: u8 = 0x0B;
pub const INT_SOURCE: u8 = 0x0C;
pub const WHO_AM_I: u8 = 0x0D;
pub const XYZ_DATA_CFG: u8 = 0x0E;
pub const HP_FILTER_CUTOFF: u8 = 0x0F;
pub const TRANSIENT_CFG: u8 = 0x1D;
pub const TRANSIENT_SRC: u8 = 0x1E;
pub const TRANSIENT_THS: u8 = 0x1F;
pub const TRANSIENT_COUNT: u8 = 0x20;
pub const CTRL_REG1: u8 = 0x2A;
pub const CTRL_REG2: u8 = 0x2B;
pub const CTRL_REG3: u8 = 0x2C;
pub const CTRL_REG4: u8 = 0x2D;
pub const CTRL_REG5: u8 = 0x2E;

/// STATUS: new sample ready on X, Y and Z
pub const STATUS_ZYXDR: u8 = 0x08;
/// XYZ_DATA_CFG: full-scale selector field
pub const XYZ_DATA_CFG_FS_MASK: u8 = 0x03;
/// CTRL_REG1: active-mode bit. Configuration registers are read-only once set.
pub const CTRL_REG1_ACTIVE: u8 = 0x01;
/// CTRL_REG4: transient-detection interrupt enable
pub const CTRL_REG4_INT_EN_TRANS: u8 = 0x20;
/// CTRL_REG5: route the transient interrupt to the INT1 pin
pub const CTRL_REG5_INT_CFG_TRANS: u8 = 0x20;
/// TRANSIENT_SRC: event-active flag
pub const TRANSIENT_SRC_EA: u8 = 0x40;
