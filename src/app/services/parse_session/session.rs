//! Session orchestration: validation, the blocking pass, cancellation

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::app::models::RecordFamily;
use crate::app::services::frame_builder::FrameBuilder;
use crate::app::services::schema_registry;
use crate::app::services::unload_reader::UnloadReader;
use crate::config::ParseOptions;
use crate::{Error, Result};

use super::status::StatusCell;
use super::{ParseStatus, UnloadSet};

/// Cheap cloneable handle for polling status, usable after the session
/// itself has been consumed by [`ParseSession::wait`].
#[derive(Clone)]
pub struct StatusProbe {
    cell: Arc<StatusCell>,
}

impl StatusProbe {
    pub fn status(&self) -> ParseStatus {
        self.cell.snapshot()
    }
}

/// A running (or finished) background parse of one unload file.
///
/// Created by [`ParseSession::start`], which validates the configuration,
/// flips the status to Running, and hands the pass to a blocking task.
/// The caller polls [`status`](Self::status) concurrently and finally
/// resolves the session with [`wait`](Self::wait).
pub struct ParseSession {
    family: RecordFamily,
    status: Arc<StatusCell>,
    cancel: CancellationToken,
    handle: JoinHandle<Result<UnloadSet>>,
}

impl ParseSession {
    /// Validate and launch a session. Must be called within a tokio runtime.
    ///
    /// Configuration problems — an unreadable input path or a filter naming
    /// a type code the registry does not know — are returned here, before
    /// the session ever reaches Running.
    pub fn start(
        path: impl AsRef<Path>,
        family: RecordFamily,
        options: ParseOptions,
    ) -> Result<Self> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let metadata = std::fs::metadata(&path).map_err(|e| {
            Error::configuration(format!("input path '{}' is not readable: {e}", path.display()))
        })?;
        if !metadata.is_file() {
            return Err(Error::configuration(format!(
                "input path '{}' is not a file",
                path.display()
            )));
        }
        let filter = resolve_filter(family, &options)?;

        let status = Arc::new(StatusCell::new(metadata.len()));
        let cancel = CancellationToken::new();
        status.mark_running();
        info!(
            "starting {} parse of '{}' ({} bytes)",
            family,
            path.display(),
            metadata.len()
        );

        let handle = {
            let status = Arc::clone(&status);
            let cancel = cancel.clone();
            tokio::task::spawn_blocking(move || {
                run_pass(&path, family, filter, &options, &status, &cancel)
            })
        };

        Ok(Self {
            family,
            status,
            cancel,
            handle,
        })
    }

    pub fn family(&self) -> RecordFamily {
        self.family
    }

    /// A consistent snapshot of progress; safe to call at any time, from
    /// any task, concurrently with the running pass.
    pub fn status(&self) -> ParseStatus {
        self.status.snapshot()
    }

    /// Request cooperative cancellation. The pass stops at the next record
    /// boundary and the session resolves to the Cancelled terminal state.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Token observed by the pass; clone to wire external shutdown signals.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Detachable status handle that survives [`wait`](Self::wait)
    pub fn status_probe(&self) -> StatusProbe {
        StatusProbe {
            cell: Arc::clone(&self.status),
        }
    }

    /// Resolve the session: the completed tables on Ready, the terminal
    /// error otherwise.
    pub async fn wait(self) -> Result<UnloadSet> {
        match self.handle.await {
            Ok(result) => result,
            Err(join_error) => {
                let detail = format!("parse task did not complete: {join_error}");
                self.status.finish_failed(&detail);
                Err(Error::background(detail))
            }
        }
    }
}

/// Resolve the configured filter (codes or well-known names) to canonical
/// type codes, rejecting anything the registry does not know.
fn resolve_filter(
    family: RecordFamily,
    options: &ParseOptions,
) -> Result<Option<BTreeSet<String>>> {
    let Some(requested) = &options.type_filter else {
        return Ok(None);
    };
    let mut resolved = BTreeSet::new();
    for entry in requested {
        match schema_registry::resolve_type(family, entry) {
            Some(code) => {
                resolved.insert(code.to_string());
            }
            None => {
                return Err(Error::configuration(format!(
                    "type filter names unknown {family} record type '{entry}'"
                )));
            }
        }
    }
    Ok(Some(resolved))
}

/// The blocking full-file pass. Sole writer of the status cell.
fn run_pass(
    path: &Path,
    family: RecordFamily,
    filter: Option<BTreeSet<String>>,
    options: &ParseOptions,
    status: &StatusCell,
    cancel: &CancellationToken,
) -> Result<UnloadSet> {
    let mut reader = match UnloadReader::open(path, family) {
        Ok(reader) => reader,
        Err(error) => {
            status.finish_failed(error.to_string());
            return Err(error);
        }
    };

    let mut builder = FrameBuilder::new(family, filter, options);
    let mut records: u64 = 0;
    let mut bytes: u64 = 0;

    loop {
        // checked between records, never mid-decode: no half-appended rows
        if cancel.is_cancelled() {
            let error = Error::cancelled(records, bytes);
            warn!("parse cancelled after {records} records");
            status.finish_cancelled(error.to_string());
            return Err(error);
        }

        match reader.next_record() {
            Ok(Some(record)) => {
                records += 1;
                bytes += record.consumed;
                builder.ingest(&record);
                status.progress(records, bytes, builder.diagnostic_count());
            }
            Ok(None) => break,
            Err(error) => {
                status.finish_failed(error.to_string());
                return Err(error);
            }
        }
    }

    match builder.finish() {
        Ok((tables, stats, diagnostics)) => {
            info!("parse complete: {}", stats.summary());
            let set = UnloadSet::new(family, tables, stats, diagnostics);
            status.finish_ready();
            Ok(set)
        }
        Err(error) => {
            status.finish_failed(error.to_string());
            Err(error)
        }
    }
}
