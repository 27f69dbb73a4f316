use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use sg_gap::EdgeProfile;

use crate::IoError;

const RULE_WIDTH: usize = 80;

/// Text bar chart of every column with at least one transition.
pub fn encode_edge_report<W: Write>(out: &mut W, profile: &EdgeProfile) -> io::Result<()> {
    writeln!(out, "edge transition analysis")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out)?;
    writeln!(out, "column | transitions")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

    for col in profile.nonzero() {
        writeln!(
            out,
            "{:8} | {:4} | {}",
            col.x,
            col.count,
            "█".repeat(col.count)
        )?;
    }

    let best = profile.argmax().unwrap_or_default();
    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "max transitions: {}", best.count)?;
    writeln!(out, "max position: x = {}", best.x)?;
    Ok(())
}

pub fn write_edge_report(path: &Path, profile: &EdgeProfile) -> Result<(), IoError> {
    let write_err = |err: io::Error| IoError::Write {
        path: path.to_path_buf(),
        message: err.to_string(),
    };

    let file = File::create(path).map_err(write_err)?;
    let mut out = BufWriter::new(file);
    encode_edge_report(&mut out, profile).map_err(write_err)?;
    out.flush().map_err(write_err)
}

#[cfg(test)]
mod tests {
    use sg_gap::EdgeProfile;

    use crate::encode_edge_report;

    #[test]
    fn report_lists_nonzero_columns_with_bars() {
        let profile = EdgeProfile::from_counts(vec![0, 3, 0, 5, 5]);
        let mut buf = Vec::new();
        encode_edge_report(&mut buf, &profile).expect("encode into vec");
        let text = String::from_utf8(buf).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[3], "column | transitions");
        assert_eq!(lines[5], "       1 |    3 | ███");
        assert_eq!(lines[6], "       3 |    5 | █████");
        assert_eq!(lines[7], "       4 |    5 | █████");
        assert_eq!(lines[10], "max transitions: 5");
        assert_eq!(lines[11], "max position: x = 3");
        assert_eq!(lines.len(), 12);
    }
}
