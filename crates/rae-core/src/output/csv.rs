//! CSV Output
//!
//! Semicolon-separated rows `iteration;avgHonest;avgStrategic;avgF`, no header.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::SimulationConfig;
use crate::error::RaeError;
use crate::output::stats::SimulationStatistics;

/// Write every iteration of `stats` to `writer`.
pub fn write_csv<W: Write>(stats: &SimulationStatistics, writer: &mut W) -> Result<(), RaeError> {
    for row in stats.rows()? {
        writeln!(writer, "{}", row.to_csv_line())?;
    }
    Ok(())
}

/// Write `result_<file_stem>.csv` into `dir`, creating it if needed.
pub fn write_csv_file(
    stats: &SimulationStatistics,
    dir: impl AsRef<Path>,
    config: &SimulationConfig,
) -> Result<PathBuf, RaeError> {
    // Check before touching the filesystem so a bad series leaves nothing behind
    stats.len()?;

    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("result_{}.csv", config.file_stem()));

    let mut writer = BufWriter::new(File::create(&path)?);
    write_csv(stats, &mut writer)?;
    writer.flush()?;
    Ok(path)
}
