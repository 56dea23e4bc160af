use thiserror::Error;

/// Why a byte buffer could not be read as a frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("pixel buffer is empty")]
    EmptyBuffer,
    #[error("frame has a zero dimension ({width}x{height})")]
    ZeroDimension { width: u32, height: u32 },
    #[error("frame dimensions {width}x{height} overflow the addressable buffer size")]
    DimensionOverflow { width: u32, height: u32 },
    #[error("expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Rejected classifier policy values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("luminance cutoff must be a finite value within 0..=255, got {0}")]
    CutoffOutOfRange(f64),
    #[error("dark pixel budget must be a finite fraction within 0..=1, got {0}")]
    BudgetOutOfRange(f64),
}
