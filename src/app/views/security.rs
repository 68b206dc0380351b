//! Derived views over a completed security unload

use std::collections::HashSet;

use polars::prelude::{BooleanChunked, ChunkCompareEq, DataFrame};

use crate::app::models::RecordFamily;
use crate::app::services::parse_session::UnloadSet;
use crate::{Error, Result};

use super::pattern::compile_generic;

/// Identifiers that appear on access lists without being principals
const ACCESS_LIST_PSEUDO_IDS: &[&str] = &["*", "&RACUID"];

/// Attribute filters, point lookups, and cross-table checks over the user,
/// group, dataset, and general-resource tables of one security unload.
pub struct SecurityViews<'a> {
    set: &'a UnloadSet,
}

impl<'a> SecurityViews<'a> {
    pub fn new(set: &'a UnloadSet) -> Result<Self> {
        if set.family() != RecordFamily::SecurityUnload {
            return Err(Error::configuration(format!(
                "security views require a security unload, got a {} set",
                set.family()
            )));
        }
        Ok(Self { set })
    }

    fn frame(&self, name: &str) -> Result<&DataFrame> {
        self.set.table(name)
    }

    fn filter_equals(frame: &DataFrame, column: &str, value: &str) -> Result<DataFrame> {
        let mask = frame
            .column(column)?
            .as_materialized_series()
            .str()?
            .equal(value);
        frame.filter(&mask).map_err(Into::into)
    }

    /// Users holding the SPECIAL attribute
    pub fn specials(&self) -> Result<DataFrame> {
        Self::filter_equals(self.frame("USBD")?, "USBD_SPECIAL", "YES")
    }

    /// Users holding the OPERATIONS attribute
    pub fn operations(&self) -> Result<DataFrame> {
        Self::filter_equals(self.frame("USBD")?, "USBD_OPER", "YES")
    }

    /// Users holding the AUDITOR attribute
    pub fn auditors(&self) -> Result<DataFrame> {
        Self::filter_equals(self.frame("USBD")?, "USBD_AUDITOR", "YES")
    }

    /// Revoked users
    pub fn revoked(&self) -> Result<DataFrame> {
        Self::filter_equals(self.frame("USBD")?, "USBD_REVOKE", "YES")
    }

    /// The USBD row for one user id (empty frame if absent)
    pub fn user(&self, user_id: &str) -> Result<DataFrame> {
        Self::filter_equals(self.frame("USBD")?, "USBD_NAME", user_id)
    }

    /// The GPBD row for one group (empty frame if absent)
    pub fn group(&self, group: &str) -> Result<DataFrame> {
        Self::filter_equals(self.frame("GPBD")?, "GPBD_NAME", group)
    }

    /// Groups with no connected users
    pub fn empty_groups(&self) -> Result<DataFrame> {
        let groups = self.frame("GPBD")?;
        let connects = self.frame("USCON")?;

        let connected: HashSet<String> = connects
            .column("USCON_GRP_ID")?
            .as_materialized_series()
            .str()?
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect();

        let names = groups.column("GPBD_NAME")?.as_materialized_series().str()?;
        let mask: BooleanChunked = names
            .into_iter()
            .map(|name| Some(name.map(|n| !connected.contains(n)).unwrap_or(false)))
            .collect();
        groups.filter(&mask).map_err(Into::into)
    }

    /// Dataset profiles whose universal access is at least the given level
    /// (exact match on the UACC text, e.g. `READ`, `UPDATE`, `ALTER`)
    pub fn uacc_datasets(&self, level: &str) -> Result<DataFrame> {
        Self::filter_equals(self.frame("DSBD")?, "DSBD_UACC", level)
    }

    /// Access-list entries whose authority id no longer exists as a user or
    /// group. Returns (dataset orphans, general-resource orphans).
    pub fn orphans(&self) -> Result<(DataFrame, DataFrame)> {
        let mut known: HashSet<String> = HashSet::new();
        for (table, column) in [("USBD", "USBD_NAME"), ("GPBD", "GPBD_NAME")] {
            if let Some(frame) = self.set.get_table(table) {
                known.extend(
                    frame
                        .column(column)?
                        .as_materialized_series()
                        .str()?
                        .into_iter()
                        .flatten()
                        .map(str::to_string),
                );
            }
        }

        let dataset = self.orphan_entries(self.frame("DSACC")?, "DSACC_AUTH_ID", &known)?;
        let general = self.orphan_entries(self.frame("GRACC")?, "GRACC_AUTH_ID", &known)?;
        Ok((dataset, general))
    }

    fn orphan_entries(
        &self,
        access: &DataFrame,
        column: &str,
        known: &HashSet<String>,
    ) -> Result<DataFrame> {
        let ids = access.column(column)?.as_materialized_series().str()?;
        let mask: BooleanChunked = ids
            .into_iter()
            .map(|id| {
                Some(
                    id.map(|id| !known.contains(id) && !ACCESS_LIST_PSEUDO_IDS.contains(&id))
                        .unwrap_or(false),
                )
            })
            .collect();
        access.filter(&mask).map_err(Into::into)
    }

    /// Dataset profiles whose name matches a RACF generic pattern
    pub fn datasets_matching(&self, pattern: &str) -> Result<DataFrame> {
        let regex = compile_generic(pattern, false)?;
        let datasets = self.frame("DSBD")?;
        let names = datasets.column("DSBD_NAME")?.as_materialized_series().str()?;
        let mask: BooleanChunked = names
            .into_iter()
            .map(|name| Some(name.map(|n| regex.is_match(n)).unwrap_or(false)))
            .collect();
        datasets.filter(&mask).map_err(Into::into)
    }
}
