//! Report files and console rendering.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use netmetrics_core::DegreeDistribution;

use super::commands::{CliError, MetricRow, RunSummary};

const TITLE_WIDTH: usize = 45;
const VALUE_WIDTH: usize = 30;

pub(super) fn create_output(path: &Path) -> Result<BufWriter<File>, CliError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Writes one `degree,fraction` line per observed degree, ascending.
pub(super) fn write_degree_distribution<W: Write>(
    mut writer: W,
    distribution: &DegreeDistribution,
) -> io::Result<()> {
    for (degree, fraction) in distribution.fractions() {
        writeln!(writer, "{degree},{fraction}")?;
    }
    Ok(())
}

/// Writes one `title,value` line per row.
pub(super) fn write_metric_rows<W: Write>(mut writer: W, rows: &[MetricRow]) -> io::Result<()> {
    for row in rows {
        writeln!(writer, "{},{}", row.title, row.value)?;
    }
    Ok(())
}

/// Formats `elapsed` as `hh:mm:ss.ff`.
pub(super) fn format_elapsed(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs();
    let hundredths = elapsed.subsec_millis() / 10;
    format!(
        "{:02}:{:02}:{:02}.{hundredths:02}",
        seconds / 3600,
        seconds / 60 % 60,
        seconds % 60,
    )
}

/// Renders the metrics table and the elapsed time to `writer`.
///
/// Titles are left-aligned in 45 columns and values right-aligned in 30.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &RunSummary, mut writer: impl Write) -> io::Result<()> {
    for row in summary.metric_rows() {
        writeln!(
            writer,
            "{:<TITLE_WIDTH$}{:>VALUE_WIDTH$}",
            row.title, row.value
        )?;
    }
    writeln!(writer)?;
    writeln!(
        writer,
        "runtime of application: {}",
        format_elapsed(summary.elapsed)
    )?;
    Ok(())
}
