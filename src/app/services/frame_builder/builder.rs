//! Per-record dispatch state machine and column buffers
//!
//! Rows are fully staged before any column is touched, so a table never
//! holds a partial row. Tables are keyed by the type's well-known name and
//! their column set is derived from the newest registered schema version;
//! rows decoded under an older version pad their missing trailing columns
//! with nulls (versions extend each other, see the registry tests).

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use polars::prelude::{DataFrame, DateChunked, IntoColumn, IntoSeries, NamedFrom, Series};
use tracing::{debug, warn};

use crate::app::models::{Diagnostic, RawRecord, RecordFamily, Value};
use crate::app::services::field_decoder;
use crate::app::services::schema_registry::{self, ColumnSpec, ColumnType};
use crate::config::{FieldFailurePolicy, ParseOptions, VersionSelection};
use crate::Result;

use super::stats::SessionStats;

/// Terminal outcome of one record's trip through the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Appended,
    Skipped,
    Errored,
}

enum ColumnBuffer {
    Text { name: String, values: Vec<Option<String>> },
    Int { name: String, values: Vec<Option<i64>> },
    Date { name: String, values: Vec<Option<NaiveDate>> },
    Bool { name: String, values: Vec<Option<bool>> },
}

impl ColumnBuffer {
    fn new(spec: &ColumnSpec) -> Self {
        let name = spec.name.clone();
        match spec.dtype {
            ColumnType::Text => Self::Text { name, values: Vec::new() },
            ColumnType::Int => Self::Int { name, values: Vec::new() },
            ColumnType::Date => Self::Date { name, values: Vec::new() },
            ColumnType::Bool => Self::Bool { name, values: Vec::new() },
        }
    }

    fn push(&mut self, value: Option<Value>) {
        match self {
            Self::Text { values, .. } => values.push(match value {
                Some(Value::Text(text)) => Some(text),
                _ => None,
            }),
            Self::Int { values, .. } => values.push(match value {
                Some(Value::Int(n)) => Some(n),
                _ => None,
            }),
            Self::Date { values, .. } => values.push(match value {
                Some(Value::Date(date)) => Some(date),
                _ => None,
            }),
            Self::Bool { values, .. } => values.push(match value {
                Some(Value::Bool(flag)) => Some(flag),
                _ => None,
            }),
        }
    }

    fn into_series(self) -> Series {
        match self {
            Self::Text { name, values } => Series::new(name.as_str().into(), values),
            Self::Int { name, values } => Series::new(name.as_str().into(), values),
            Self::Date { name, values } => {
                DateChunked::from_naive_date_options(name.as_str().into(), values).into_series()
            }
            Self::Bool { name, values } => Series::new(name.as_str().into(), values),
        }
    }
}

struct TableBuffer {
    columns: Vec<ColumnBuffer>,
    rows: u64,
}

impl TableBuffer {
    fn new(plan: &[ColumnSpec]) -> Self {
        Self {
            columns: plan.iter().map(ColumnBuffer::new).collect(),
            rows: 0,
        }
    }

    /// Append one staged row; short rows (older schema versions) pad with
    /// nulls so every column keeps the same length.
    fn append(&mut self, mut values: Vec<Option<Value>>) {
        values.resize(self.columns.len(), None);
        for (column, value) in self.columns.iter_mut().zip(values) {
            column.push(value);
        }
        self.rows += 1;
    }

    fn into_frame(self) -> Result<DataFrame> {
        let columns = self
            .columns
            .into_iter()
            .map(|column| column.into_series().into_column())
            .collect();
        DataFrame::new(columns).map_err(Into::into)
    }
}

/// Accumulates one table per encountered record type over a parse pass.
pub struct FrameBuilder {
    family: RecordFamily,
    /// Type filter resolved to canonical codes
    filter: Option<BTreeSet<String>>,
    failure_policy: FieldFailurePolicy,
    version_selection: VersionSelection,
    tables: BTreeMap<String, TableBuffer>,
    stats: SessionStats,
    diagnostics: Vec<Diagnostic>,
}

impl FrameBuilder {
    pub fn new(
        family: RecordFamily,
        filter: Option<BTreeSet<String>>,
        options: &ParseOptions,
    ) -> Self {
        Self {
            family,
            filter,
            failure_policy: options.field_failure_policy,
            version_selection: options.version_selection,
            tables: BTreeMap::new(),
            stats: SessionStats::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Number of diagnostics recorded so far
    pub fn diagnostic_count(&self) -> u64 {
        self.diagnostics.len() as u64
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Route one record through Read -> Classified -> SchemaResolved ->
    /// Decoded -> Appended, or to a Skipped/Errored terminal state.
    pub fn ingest(&mut self, record: &RawRecord) -> RecordOutcome {
        self.stats.records_seen += 1;
        let counts = self.stats.per_type.entry(record.type_code.clone()).or_default();
        counts.seen += 1;

        if let Some(filter) = &self.filter {
            if !filter.contains(&record.type_code) {
                self.stats.records_skipped_filtered += 1;
                return RecordOutcome::Skipped;
            }
        }

        let Some(schema) = schema_registry::lookup(
            self.family,
            &record.type_code,
            record.payload.len(),
            self.version_selection,
        ) else {
            self.stats.records_skipped_unrecognized += 1;
            self.diagnostics
                .push(Diagnostic::unrecognized_type(record.offset, &record.type_code));
            debug!(
                "skipping unrecognized type '{}' at offset {}",
                record.type_code, record.offset
            );
            return RecordOutcome::Skipped;
        };

        let decoded = field_decoder::decode_record(schema, &record.payload, self.family);
        self.stats.field_failures += decoded.failures.len() as u64;
        for failure in &decoded.failures {
            self.diagnostics.push(Diagnostic::field_failure(
                record.offset,
                &record.type_code,
                failure.field.clone(),
                failure.detail.clone(),
            ));
        }

        if self.failure_policy == FieldFailurePolicy::RecordFatal && !decoded.failures.is_empty() {
            self.stats.records_errored += 1;
            self.diagnostics.push(Diagnostic::record_dropped(
                record.offset,
                &record.type_code,
                decoded.failures.len(),
            ));
            warn!(
                "dropping record at offset {}: {} field failure(s)",
                record.offset,
                decoded.failures.len()
            );
            return RecordOutcome::Errored;
        }

        // Column set comes from the newest schema version for the type, so
        // rows from older versions fit with trailing nulls.
        let table = self.tables.entry(schema.name.to_string()).or_insert_with(|| {
            let newest =
                schema_registry::newest(self.family, &record.type_code).unwrap_or(schema);
            debug!("creating table '{}' for type '{}'", newest.name, record.type_code);
            TableBuffer::new(&newest.column_plan())
        });
        table.append(decoded.values);

        self.stats.records_appended += 1;
        self.stats
            .per_type
            .entry(record.type_code.clone())
            .or_default()
            .appended += 1;
        RecordOutcome::Appended
    }

    /// Finalize every table into an immutable DataFrame.
    ///
    /// Consumes the builder: after this point no further mutation of the
    /// tables is possible.
    pub fn finish(self) -> Result<(BTreeMap<String, DataFrame>, SessionStats, Vec<Diagnostic>)> {
        let mut frames = BTreeMap::new();
        for (name, table) in self.tables {
            let rows = table.rows;
            let frame = table.into_frame()?;
            debug!("finalized table '{name}' with {rows} rows");
            frames.insert(name, frame);
        }
        Ok((frames, self.stats, self.diagnostics))
    }
}
