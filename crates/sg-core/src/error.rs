use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    SizeMismatch {
        expected: usize,
        actual: usize,
    },
    EmptyImage {
        width: usize,
        height: usize,
    },
    OutOfBounds,
    InvalidStride,
    InvalidMaskValue {
        x: usize,
        y: usize,
        value: u8,
    },
    OutOfRange {
        what: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

impl Error {
    /// True for errors caused by invalid grid dimensions or contents.
    pub fn is_shape_error(&self) -> bool {
        !self.is_range_error()
    }

    /// True for errors caused by a scalar parameter outside its bounds.
    pub fn is_range_error(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::EmptyImage { width, height } => {
                write!(f, "empty image: {width}x{height}")
            }
            Self::OutOfBounds => write!(f, "out of bounds"),
            Self::InvalidStride => write!(f, "invalid stride"),
            Self::InvalidMaskValue { x, y, value } => {
                write!(f, "invalid mask value {value} at ({x}, {y}): expected 0 or 255")
            }
            Self::OutOfRange {
                what,
                value,
                min,
                max,
            } => write!(f, "{what} out of range: {value} not in [{min}, {max}]"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn classification_splits_shape_and_range() {
        let range = Error::OutOfRange {
            what: "threshold",
            value: 256,
            min: 0,
            max: 255,
        };
        assert!(range.is_range_error());
        assert!(!range.is_shape_error());
        assert_eq!(
            range.to_string(),
            "threshold out of range: 256 not in [0, 255]"
        );

        let empty = Error::EmptyImage {
            width: 0,
            height: 4,
        };
        assert!(empty.is_shape_error());
        assert_eq!(empty.to_string(), "empty image: 0x4");
    }
}
