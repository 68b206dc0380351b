//! Derived views over a completed storage collection

use polars::prelude::{ChunkCompareEq, DataFrame, IntoColumn, NamedFrom, Series};

use crate::app::models::RecordFamily;
use crate::app::services::parse_session::UnloadSet;
use crate::{Error, Result};

/// Scale applied to space figures on cylinder-managed volumes
const CYLINDER_MANAGED_SCALE: i64 = 1024;

/// Volume and dataset queries over the `D` and `V` tables of one storage
/// collection.
pub struct StorageViews<'a> {
    set: &'a UnloadSet,
}

impl<'a> StorageViews<'a> {
    pub fn new(set: &'a UnloadSet) -> Result<Self> {
        if set.family() != RecordFamily::StorageCollection {
            return Err(Error::configuration(format!(
                "storage views require a storage collection, got a {} set",
                set.family()
            )));
        }
        Ok(Self { set })
    }

    /// Sorted names of every dataset on one volume.
    ///
    /// The volume serial must exist in the volume table; asking about an
    /// unknown volser is an error rather than an empty answer.
    pub fn datasets_on_volume(&self, volser: &str) -> Result<Vec<String>> {
        let volumes = self.set.table("V")?;
        let known = volumes
            .column("DCVVOLSR")?
            .as_materialized_series()
            .str()?
            .into_iter()
            .flatten()
            .any(|candidate| candidate == volser);
        if !known {
            return Err(Error::configuration(format!("volser '{volser}' not found")));
        }

        let datasets = self.set.table("D")?;
        let on_volume = datasets
            .column("DCDVOLSR")?
            .as_materialized_series()
            .str()?
            .equal(volser);
        let matching = datasets.filter(&on_volume)?;

        let mut names: Vec<String> = matching
            .column("DCDDSNAM")?
            .as_materialized_series()
            .str()?
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect();
        names.sort();
        Ok(names)
    }

    /// Volume space figures in kilobytes: free, allocated, and capacity,
    /// scaled up for cylinder-managed volumes (whose raw counters are in
    /// megabyte units).
    pub fn volume_space(&self) -> Result<DataFrame> {
        let volumes = self.set.table("V")?;

        let volsers = volumes.column("DCVVOLSR")?.as_materialized_series().str()?;
        let cylinder = volumes.column("DCVCYLMG")?.as_materialized_series().bool()?;
        let free = volumes.column("DCVFRESP")?.as_materialized_series().i64()?;
        let alloc = volumes.column("DCVALLOC")?.as_materialized_series().i64()?;
        let capacity = volumes.column("DCVVLCAP")?.as_materialized_series().i64()?;

        let scale = |raw: Option<i64>, managed: Option<bool>| {
            raw.map(|kb| {
                if managed.unwrap_or(false) {
                    kb * CYLINDER_MANAGED_SCALE
                } else {
                    kb
                }
            })
        };

        let mut names = Vec::with_capacity(volumes.height());
        let mut free_kb = Vec::with_capacity(volumes.height());
        let mut alloc_kb = Vec::with_capacity(volumes.height());
        let mut capacity_kb = Vec::with_capacity(volumes.height());
        for i in 0..volumes.height() {
            let managed = cylinder.get(i);
            names.push(volsers.get(i).map(str::to_string));
            free_kb.push(scale(free.get(i), managed));
            alloc_kb.push(scale(alloc.get(i), managed));
            capacity_kb.push(scale(capacity.get(i), managed));
        }

        DataFrame::new(vec![
            Series::new("DCVVOLSR".into(), names).into_column(),
            Series::new("FREE_KB".into(), free_kb).into_column(),
            Series::new("ALLOCATED_KB".into(), alloc_kb).into_column(),
            Series::new("CAPACITY_KB".into(), capacity_kb).into_column(),
        ])
        .map_err(Into::into)
    }
}
