use std::{fs, path::Path};

use crate::{
    config::{tmp_path, write_atomic},
    errors::PlannerError,
    export::CalendarExport,
};

/// Writes the export to disk atomically by staging to a temporary file.
pub fn save_export_to_file(export: &CalendarExport, path: &Path) -> Result<(), PlannerError> {
    let tmp = tmp_path(path);
    write_atomic(&tmp, export.as_str())?;
    fs::rename(&tmp, path)?;
    tracing::info!(path = %path.display(), events = export.event_count(), "saved calendar export");
    Ok(())
}
