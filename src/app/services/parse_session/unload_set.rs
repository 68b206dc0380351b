//! The immutable result of a completed parse session

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::{DataFrame, ParquetWriter};
use tracing::info;

use crate::app::models::{Diagnostic, RecordFamily};
use crate::app::services::frame_builder::SessionStats;
use crate::app::services::schema_registry;
use crate::{Error, Result};

/// Every table produced by a completed pass, keyed by the record type's
/// well-known name, plus the pass statistics and diagnostics log.
///
/// Construction consumes the builder's buffers, so nothing can append to a
/// table once the set exists; accessors hand out shared references only.
#[derive(Debug)]
pub struct UnloadSet {
    family: RecordFamily,
    tables: BTreeMap<String, DataFrame>,
    stats: SessionStats,
    diagnostics: Vec<Diagnostic>,
}

impl UnloadSet {
    pub(crate) fn new(
        family: RecordFamily,
        tables: BTreeMap<String, DataFrame>,
        stats: SessionStats,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            family,
            tables,
            stats,
            diagnostics,
        }
    }

    pub fn family(&self) -> RecordFamily {
        self.family
    }

    /// Fetch a table by well-known name (`GPBD`, `USBD`, `D`, ...) or by
    /// type code (`0100`, `0200`, ...).
    pub fn table(&self, code_or_name: &str) -> Result<&DataFrame> {
        if let Some(frame) = self.tables.get(code_or_name) {
            return Ok(frame);
        }
        schema_registry::name_for(self.family, code_or_name)
            .and_then(|name| self.tables.get(name))
            .ok_or_else(|| Error::missing_table(code_or_name))
    }

    /// Non-erroring variant of [`table`](Self::table)
    pub fn get_table(&self, code_or_name: &str) -> Option<&DataFrame> {
        self.table(code_or_name).ok()
    }

    /// Iterate (name, table) pairs in name order
    pub fn tables(&self) -> impl Iterator<Item = (&str, &DataFrame)> {
        self.tables.iter().map(|(name, frame)| (name.as_str(), frame))
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Per-record anomalies recorded during the pass, in file order
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Export every non-empty table as `<prefix><NAME>.parquet` under `dir`.
    ///
    /// Returns the written paths. The set itself is unchanged; frames are
    /// cloned for the writer's mutable handle (polars clones are cheap,
    /// column buffers are shared).
    pub fn export_parquet(&self, dir: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir).map_err(|e| {
            Error::io(format!("failed to create export directory '{}'", dir.display()), e)
        })?;

        let mut written = Vec::new();
        for (name, frame) in &self.tables {
            if frame.height() == 0 {
                continue;
            }
            let path = dir.join(format!("{prefix}{name}.parquet"));
            let file = File::create(&path)
                .map_err(|e| Error::export(path.display().to_string(), e.to_string()))?;
            let mut frame = frame.clone();
            ParquetWriter::new(file)
                .finish(&mut frame)
                .map_err(|e| Error::export(path.display().to_string(), e.to_string()))?;
            info!("exported table '{}' to {}", name, path.display());
            written.push(path);
        }
        Ok(written)
    }
}
