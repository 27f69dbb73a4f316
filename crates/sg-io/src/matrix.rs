use core::str::FromStr;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::debug;
use sg_core::ImageView;

use crate::IoError;

const RULE_WIDTH: usize = 80;
const NPY_MAGIC: &[u8] = b"\x93NUMPY";
const NPY_ALIGN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixFormat {
    /// Human-readable, one grid row per line.
    Text,
    /// Comma-separated raw values, no header.
    Csv,
    /// NumPy `.npy` v1.0, dtype `|u1`, shape `(height, width)`.
    Binary,
}

impl MatrixFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Csv => "csv",
            Self::Binary => "npy",
        }
    }
}

impl FromStr for MatrixFormat {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" | "txt" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            "binary" | "npy" => Ok(Self::Binary),
            other => Err(IoError::UnsupportedFormat {
                token: other.to_string(),
            }),
        }
    }
}

/// Selects the text layout; CSV and binary output are identical for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixKind {
    Luma,
    Mask,
}

pub fn encode_matrix<W: Write>(
    out: &mut W,
    src: &ImageView<'_, u8>,
    format: MatrixFormat,
    kind: MatrixKind,
) -> io::Result<()> {
    match format {
        MatrixFormat::Text => encode_text(out, src, kind),
        MatrixFormat::Csv => encode_csv(out, src),
        MatrixFormat::Binary => encode_npy(out, src),
    }
}

pub fn write_matrix(
    path: &Path,
    src: &ImageView<'_, u8>,
    format: MatrixFormat,
    kind: MatrixKind,
) -> Result<(), IoError> {
    let write_err = |err: io::Error| IoError::Write {
        path: path.to_path_buf(),
        message: err.to_string(),
    };

    let file = File::create(path).map_err(write_err)?;
    let mut out = BufWriter::new(file);
    encode_matrix(&mut out, src, format, kind).map_err(write_err)?;
    out.flush().map_err(write_err)?;

    debug!(
        "{:?} matrix {}x{} written as {:?} to {}",
        kind,
        src.width(),
        src.height(),
        format,
        path.display()
    );
    Ok(())
}

fn encode_text<W: Write>(out: &mut W, src: &ImageView<'_, u8>, kind: MatrixKind) -> io::Result<()> {
    match kind {
        MatrixKind::Luma => {
            writeln!(out, "luma matrix ({}x{})", src.height(), src.width())?;
        }
        MatrixKind::Mask => {
            writeln!(out, "binary matrix ({}x{})", src.height(), src.width())?;
            writeln!(out, "0 = background, 1 = foreground")?;
        }
    }
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out)?;

    for row in src.rows() {
        let line = match kind {
            MatrixKind::Luma => row
                .iter()
                .map(|v| format!("{v:3}"))
                .collect::<Vec<_>>()
                .join(" "),
            MatrixKind::Mask => row
                .iter()
                .map(|&v| if v == 255 { "1" } else { "0" })
                .collect::<Vec<_>>()
                .join(" "),
        };
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn encode_csv<W: Write>(out: &mut W, src: &ImageView<'_, u8>) -> io::Result<()> {
    for row in src.rows() {
        let line = row
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn encode_npy<W: Write>(out: &mut W, src: &ImageView<'_, u8>) -> io::Result<()> {
    let dict = format!(
        "{{'descr': '|u1', 'fortran_order': False, 'shape': ({}, {}), }}",
        src.height(),
        src.width()
    );

    // magic + version (2) + header length (2), then the padded dict ending in '\n'.
    let prefix_len = NPY_MAGIC.len() + 4;
    let unpadded = prefix_len + dict.len() + 1;
    let padding = (NPY_ALIGN - unpadded % NPY_ALIGN) % NPY_ALIGN;
    let header_len = dict.len() + padding + 1;
    let header_len = u16::try_from(header_len)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "npy header too long"))?;

    out.write_all(NPY_MAGIC)?;
    out.write_all(&[1, 0])?;
    out.write_all(&header_len.to_le_bytes())?;
    out.write_all(dict.as_bytes())?;
    out.write_all(" ".repeat(padding).as_bytes())?;
    out.write_all(b"\n")?;

    for row in src.rows() {
        out.write_all(row)?;
    }
    Ok(())
}
