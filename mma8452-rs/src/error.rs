use thiserror::Error;

/// Driver errors, generic over the bus transport's own error type.
#[derive(Debug, Error)]
pub enum Error<E: std::error::Error> {
    /// A register transaction failed on the bus
    #[error("bus transaction failed: {0}")]
    Bus(#[source] E),
    /// The bus returned fewer bytes than the block read asked for
    #[error("short block read: expected {expected} bytes, got {got}")]
    ShortRead { expected: usize, got: usize },
    /// Wrong or absent device at the expected address. Fatal at startup.
    #[error("unexpected device identity {found:#04x}, expected {expected:#04x}")]
    IdentityMismatch { found: u8, expected: u8 },
}
