//! CatalogQueryAdapter - from a WHERE clause to resolved part rows
//!
//! Mirrors the control flow of the original surface: determine the table
//! set from the collected predicates, fetch part versions at the
//! snapshot, prune, resolve, emit rows. Resolution stays pure; this is
//! the layer that does I/O and logging.

use crate::config::SystemPartsConfig;
use crate::gc::{GcClassifier, TxnWatermark};
use crate::observability::{Event, Logger};
use crate::parts::{PartId, PartStore, TxnTimestamp};
use crate::pruner::{collect_where_or_clause_predicates, PartitionPruner, WhereExpr};
use crate::visibility::{Resolution, VisibilityResolver};

use super::{CatalogError, CatalogResult, PartCatalog, SystemPartsRow, TableMeta};

/// Query adapter over a `PartCatalog`.
pub struct CatalogQueryAdapter<'a, C: PartCatalog> {
    catalog: &'a C,
    config: SystemPartsConfig,
}

impl<'a, C: PartCatalog> CatalogQueryAdapter<'a, C> {
    /// Creates an adapter over a catalog.
    pub fn new(catalog: &'a C, config: SystemPartsConfig) -> Self {
        Self { catalog, config }
    }

    /// Answers "all part rows matching `where_expr`, as of `snapshot`".
    ///
    /// Per PART_VISIBILITY.md §8, predicates narrow the fetch when one
    /// branch pins a table and/or partition. A query that pins no single
    /// table scans the whole catalog, but only when multi-table scans
    /// are enabled; otherwise it is rejected as a configuration error.
    ///
    /// Rows come out in catalog fetch order; callers re-sort as needed.
    pub fn query(
        &self,
        where_expr: &WhereExpr,
        snapshot: TxnTimestamp,
    ) -> CatalogResult<Vec<SystemPartsRow>> {
        let branches = collect_where_or_clause_predicates(where_expr);
        let tables = self.select_tables(&branches)?;
        let partition = PartitionPruner::partition_filter(&branches);

        let count = tables.len().to_string();
        Logger::info(Event::TablesSelected, &[("tables", &count)]);

        let mut rows = Vec::new();
        for table in &tables {
            let (store, resolution) = self.resolve_table(table, partition.as_deref(), snapshot)?;
            for id in store.ids() {
                // Every fetched part was classified; resolution errors
                // would have aborted the table above.
                let Some(state) = resolution.state(id) else {
                    continue;
                };
                let previous_mutation = store
                    .try_get_previous_part(id)
                    .map_or(0, |prev| store.get(prev).info().mutation);
                rows.push(SystemPartsRow::from_part(
                    table,
                    store.get(id),
                    state,
                    previous_mutation,
                ));
            }
        }
        Ok(rows)
    }

    /// Fetches and resolves one table's part set at a snapshot.
    ///
    /// Exposed for the GC path and for callers that want the raw
    /// resolution instead of rows.
    pub fn resolve_table(
        &self,
        table: &TableMeta,
        partition: Option<&str>,
        snapshot: TxnTimestamp,
    ) -> CatalogResult<(PartStore, Resolution)> {
        let parts = match partition {
            Some(partition_id) => self.catalog.get_part_versions_in_partitions(
                table,
                &[partition_id.to_string()],
                snapshot,
            )?,
            None => self.catalog.get_all_part_versions(table, snapshot)?,
        };

        let fetched = parts.len().to_string();
        let table_ref = format!("{}.{}", table.database, table.name);
        Logger::info(
            Event::PartsFetched,
            &[("table", &table_ref), ("parts", &fetched)],
        );

        let store = PartStore::from_parts(parts);
        let ids: Vec<PartId> = store.ids().collect();
        let resolution = match VisibilityResolver::calc_visible_parts(&store, &ids) {
            Ok(resolution) => resolution,
            Err(fault) => {
                let detail = fault.to_string();
                Logger::error(
                    Event::ConsistencyFault,
                    &[("table", &table_ref), ("detail", &detail)],
                );
                return Err(fault.into());
            }
        };

        let visible = resolution.visible().len().to_string();
        Logger::info(
            Event::ResolveComplete,
            &[("table", &table_ref), ("visible", &visible)],
        );
        Ok((store, resolution))
    }

    /// Runs one GC classification pass over a table and returns the
    /// names of deletion candidates.
    ///
    /// The watermark is read inside the pass (PART_GC.md §2).
    pub fn gc_candidates<W: TxnWatermark>(
        &self,
        database: &str,
        table_name: &str,
        snapshot: TxnTimestamp,
        watermark: &W,
    ) -> CatalogResult<Vec<String>> {
        let table = self.named_table(database, table_name)?;
        let (store, resolution) = self.resolve_table(&table, None, snapshot)?;

        let candidates = GcClassifier::run_pass(&store, &resolution, watermark);
        let names: Vec<String> = candidates
            .iter()
            .map(|id| store.get(*id).name().to_string())
            .collect();

        let count = names.len().to_string();
        let table_ref = format!("{database}.{table_name}");
        Logger::info(
            Event::GcPassComplete,
            &[("table", &table_ref), ("candidates", &count)],
        );
        Ok(names)
    }

    /// Resolves the table set for a query.
    fn select_tables(&self, branches: &[crate::pruner::PredicateMap]) -> CatalogResult<Vec<TableMeta>> {
        if let Some((database, name)) = PartitionPruner::table_filter(branches) {
            return Ok(vec![self.named_table(&database, &name)?]);
        }

        if !self.config.enable_multiple_tables {
            return Err(CatalogError::MultipleTablesDisabled);
        }

        let mut tables = Vec::new();
        for table in self.catalog.list_tables()? {
            if !PartitionPruner::branches_match_table(branches, &table.database, &table.name) {
                continue;
            }
            if !table.has_parts() {
                // During a scan, foreign engines are skipped rather than
                // rejected; only naming one explicitly is an error.
                let table_ref = format!("{}.{}", table.database, table.name);
                Logger::info(
                    Event::TableSkipped,
                    &[("table", &table_ref), ("engine", table.engine.name())],
                );
                continue;
            }
            tables.push(table);
        }
        Ok(tables)
    }

    fn named_table(&self, database: &str, name: &str) -> CatalogResult<TableMeta> {
        let table = self.catalog.get_table(database, name)?.ok_or_else(|| {
            CatalogError::TableNotFound {
                database: database.to_string(),
                table: name.to_string(),
            }
        })?;
        if !table.has_parts() {
            return Err(CatalogError::UnsupportedEngine(
                table.engine.name().to_string(),
            ));
        }
        Ok(table)
    }
}
