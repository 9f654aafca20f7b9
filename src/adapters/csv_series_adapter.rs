//! CSV export of a compound projection series.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::domain::compound::Projection;
use crate::domain::error::PortalError;

pub const HEADER: [&str; 4] = [
    "period",
    "total_contributed",
    "total_value",
    "total_interest",
];

fn export_err(e: impl std::fmt::Display) -> PortalError {
    PortalError::Export {
        reason: format!("CSV write error: {e}"),
    }
}

/// Write the series to any writer, one row per sampled period.
pub fn write_series<W: Write>(writer: W, series: &[Projection]) -> Result<(), PortalError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER).map_err(export_err)?;
    for point in series {
        wtr.write_record([
            point.period_count.to_string(),
            format!("{:.2}", point.total_contributed),
            format!("{:.2}", point.total_value),
            format!("{:.2}", point.total_interest),
        ])
        .map_err(export_err)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the series to `path`, creating parent directories.
pub fn write_series_file(path: &Path, series: &[Projection]) -> Result<(), PortalError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    write_series(file, series)
}
