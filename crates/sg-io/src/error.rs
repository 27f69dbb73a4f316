use core::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum IoError {
    NotFound { path: PathBuf },
    Decode { path: PathBuf, message: String },
    Write { path: PathBuf, message: String },
    UnsupportedFormat { token: String },
    Core(sg_core::Error),
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "file not found: {}", path.display()),
            Self::Decode { path, message } => {
                write!(f, "cannot decode image {}: {message}", path.display())
            }
            Self::Write { path, message } => {
                write!(f, "cannot write {}: {message}", path.display())
            }
            Self::UnsupportedFormat { token } => write!(
                f,
                "unsupported matrix format '{token}', expected one of: text, csv, binary"
            ),
            Self::Core(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Core(err) => Some(err),
            _ => None,
        }
    }
}

impl From<sg_core::Error> for IoError {
    fn from(err: sg_core::Error) -> Self {
        Self::Core(err)
    }
}
