use super::{replace_file, WriteError};
use crate::analysis::DepartmentStat;
use std::fs;
use std::path::Path;
use tracing::info;

pub const DEPARTMENT_CSV_HEADER: [&str; 2] = ["Department", "high_satisfaction_percentage"];

/// Writes the stats to exactly one CSV file at `path`, creating missing parent
/// directories. A previous file is replaced only once every row is written.
pub fn write_department_stats(path: &Path, stats: &[DepartmentStat]) -> Result<(), WriteError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| WriteError::io(path, err))?;
    }

    replace_file(path, |staged| {
        let csv_error = |source| WriteError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut writer = csv::Writer::from_writer(staged);
        writer.write_record(DEPARTMENT_CSV_HEADER).map_err(csv_error)?;
        for stat in stats {
            let percentage = format!("{:.2}", stat.high_satisfaction_percentage);
            writer
                .write_record([stat.department.as_str(), percentage.as_str()])
                .map_err(csv_error)?;
        }
        writer.flush().map_err(|err| WriteError::io(path, err))
    })?;

    info!(path = %path.display(), rows = stats.len(), "department satisfaction written");
    Ok(())
}
