//! Parts-Surface End-to-End Tests
//!
//! Exercises the full path from a WHERE clause to emitted rows: table
//! selection, the multi-table gate, partition pruning, row shape, and
//! snapshot-file loading (docs/PART_VISIBILITY.md §7-§8).

use std::io::Write as _;

use stratodb::catalog::{
    CatalogError, CatalogQueryAdapter, CatalogSnapshot, MemoryCatalog, SystemPartsRow, TableMeta,
};
use stratodb::config::SystemPartsConfig;
use stratodb::gc::FixedWatermark;
use stratodb::parts::{DataPart, PartInfo, PartStats, TxnTimestamp};
use stratodb::pruner::WhereExpr;
use stratodb::visibility::PartClass;

// =============================================================================
// Helper Functions
// =============================================================================

fn data(partition: &str, min: i64, max: i64, level: u32, commit: u64) -> DataPart {
    DataPart::with_data(
        PartInfo::new(partition, min, max, level, 0),
        TxnTimestamp::new(commit),
    )
}

fn tombstone(partition: &str, min: i64, max: i64, level: u32, commit: u64) -> DataPart {
    DataPart::with_tombstone(
        PartInfo::new(partition, min, max, level, 0),
        TxnTimestamp::new(commit),
    )
}

fn drop_range(partition: &str, min: i64, max: i64, commit: u64) -> DataPart {
    DataPart::with_tombstone(
        PartInfo::drop_range(partition, min, max),
        TxnTimestamp::new(commit),
    )
}

fn pinned(database: &str, table: &str) -> WhereExpr {
    WhereExpr::and(vec![
        WhereExpr::eq("database", database),
        WhereExpr::eq("table", table),
    ])
}

/// Two part tables plus a foreign-engine table, with mixed histories.
fn seeded_catalog() -> MemoryCatalog {
    let events = TableMeta::cloud_merge_tree("db", "events");
    let metrics = TableMeta::cloud_merge_tree("db", "metrics");

    let mut catalog = MemoryCatalog::new();
    catalog.add_table(events.clone());
    catalog.add_table(metrics.clone());
    catalog.add_table(TableMeta::with_engine("db", "dict", "Dictionary"));

    catalog.add_part(&events, data("2024", 1, 1, 0, 10));
    catalog.add_part(&events, data("2024", 1, 1, 1, 20));
    catalog.add_part(&events, data("2025", 2, 2, 0, 30));
    catalog.add_part(&events, tombstone("2025", 3, 3, 1, 40));

    catalog.add_part(&metrics, data("2024", 1, 1, 0, 10));
    catalog.add_part(&metrics, drop_range("2024", 0, 100, 50));
    catalog
}

fn query(
    catalog: &MemoryCatalog,
    config: SystemPartsConfig,
    expr: &WhereExpr,
    at: u64,
) -> Result<Vec<SystemPartsRow>, CatalogError> {
    CatalogQueryAdapter::new(catalog, config).query(expr, TxnTimestamp::new(at))
}

// =============================================================================
// Table Selection
// =============================================================================

#[test]
fn test_pinned_table_emits_only_that_table() {
    let catalog = seeded_catalog();
    let rows = query(
        &catalog,
        SystemPartsConfig::default(),
        &pinned("db", "events"),
        100,
    )
    .unwrap();

    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|r| r.table == "events"));
}

#[test]
fn test_unpinned_scan_needs_the_config_flag() {
    let catalog = seeded_catalog();
    let err = query(
        &catalog,
        SystemPartsConfig::default(),
        &WhereExpr::Unsupported,
        100,
    )
    .unwrap_err();
    assert!(matches!(err, CatalogError::MultipleTablesDisabled));
}

#[test]
fn test_unpinned_scan_covers_every_part_table() {
    let catalog = seeded_catalog();
    let rows = query(
        &catalog,
        SystemPartsConfig::with_multiple_tables(),
        &WhereExpr::Unsupported,
        100,
    )
    .unwrap();

    assert_eq!(rows.len(), 6);
    // The foreign-engine table is skipped, never surfaced.
    assert!(rows.iter().all(|r| r.table != "dict"));
}

/// An OR over two pinned tables falls back to a filtered scan.
#[test]
fn test_disjunction_over_two_tables_scans_both() {
    let catalog = seeded_catalog();
    let expr = WhereExpr::or(vec![pinned("db", "events"), pinned("db", "metrics")]);
    let rows = query(
        &catalog,
        SystemPartsConfig::with_multiple_tables(),
        &expr,
        100,
    )
    .unwrap();

    assert_eq!(rows.len(), 6);
    assert!(rows.iter().any(|r| r.table == "events"));
    assert!(rows.iter().any(|r| r.table == "metrics"));
}

#[test]
fn test_naming_a_foreign_engine_is_an_error() {
    let catalog = seeded_catalog();
    let err = query(
        &catalog,
        SystemPartsConfig::default(),
        &pinned("db", "dict"),
        100,
    )
    .unwrap_err();
    assert!(matches!(err, CatalogError::UnsupportedEngine(_)));
}

#[test]
fn test_naming_a_missing_table_is_an_error() {
    let catalog = seeded_catalog();
    let err = query(
        &catalog,
        SystemPartsConfig::default(),
        &pinned("db", "absent"),
        100,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::TableNotFound { .. }
    ));
}

// =============================================================================
// Partition Pruning and Snapshots
// =============================================================================

#[test]
fn test_partition_predicate_narrows_the_fetch() {
    let catalog = seeded_catalog();
    let expr = WhereExpr::and(vec![
        pinned("db", "events"),
        WhereExpr::eq("partition_id", "2024"),
    ]);
    let rows = query(&catalog, SystemPartsConfig::default(), &expr, 100).unwrap();

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.partition_id == "2024"));
}

#[test]
fn test_snapshot_hides_later_commits() {
    let catalog = seeded_catalog();
    let rows = query(
        &catalog,
        SystemPartsConfig::default(),
        &pinned("db", "events"),
        25,
    )
    .unwrap();

    // Commits at 10 and 20 are in; 30 and 40 are not yet durable here.
    assert_eq!(rows.len(), 2);
    let visible: Vec<_> = rows.iter().filter(|r| r.visible).collect();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].part_type, PartClass::VisiblePart);
}

// =============================================================================
// Row Shape
// =============================================================================

/// Each emitted row carries a classification, and the sets are disjoint
/// across the whole surface.
#[test]
fn test_rows_carry_disjoint_classifications() {
    let catalog = seeded_catalog();
    let rows = query(
        &catalog,
        SystemPartsConfig::with_multiple_tables(),
        &WhereExpr::Unsupported,
        100,
    )
    .unwrap();

    let visible = rows.iter().filter(|r| r.part_type == PartClass::VisiblePart);
    for row in visible {
        assert!(row.visible);
        assert!(!row.outdated);
    }
    let dropped = rows
        .iter()
        .filter(|r| r.part_type == PartClass::DroppedPart || r.part_type == PartClass::DropRange);
    for row in dropped {
        assert!(!row.visible);
        assert!(row.outdated);
    }
}

#[test]
fn test_superseded_version_links_back_via_previous_version() {
    let events = TableMeta::cloud_merge_tree("db", "events");
    let mut catalog = MemoryCatalog::new();
    catalog.add_table(events.clone());
    // A mutation chain: the head's row reports its predecessor's
    // mutation hint.
    catalog.add_part(
        &events,
        DataPart::with_data(PartInfo::new("p", 1, 1, 1, 3), TxnTimestamp::new(10)),
    );
    catalog.add_part(
        &events,
        DataPart::with_data(PartInfo::new("p", 1, 1, 1, 7), TxnTimestamp::new(20)),
    );

    let rows = query(
        &catalog,
        SystemPartsConfig::default(),
        &pinned("db", "events"),
        100,
    )
    .unwrap();

    let head = rows.iter().find(|r| r.visible).unwrap();
    assert_eq!(head.previous_version, 3);
    let tail = rows.iter().find(|r| !r.visible).unwrap();
    assert_eq!(tail.previous_version, 0);
}

#[test]
fn test_stats_flow_through_to_rows() {
    let events = TableMeta::cloud_merge_tree("db", "events");
    let mut catalog = MemoryCatalog::new();
    catalog.add_table(events.clone());
    catalog.add_part(
        &events,
        data("p", 1, 1, 0, 10).with_stats(PartStats {
            bytes_on_disk: 4096,
            rows_count: 128,
            columns: "ts, value".to_string(),
            marks_count: 2,
            index_granularity: vec![64, 64],
        }),
    );

    let rows = query(
        &catalog,
        SystemPartsConfig::default(),
        &pinned("db", "events"),
        100,
    )
    .unwrap();

    assert_eq!(rows[0].bytes(), 4096);
    assert_eq!(rows[0].rows(), 128);
    assert_eq!(rows[0].columns, "ts, value");
    assert_eq!(rows[0].index_granularity, vec![64, 64]);
}

// =============================================================================
// GC Through the Adapter
// =============================================================================

#[test]
fn test_gc_candidates_respect_the_watermark() {
    let catalog = seeded_catalog();
    let adapter = CatalogQueryAdapter::new(&catalog, SystemPartsConfig::default());

    // metrics: a drop range committed at 50 beside a still-visible
    // data chain. Only the drop range can ever become a candidate.
    let blocked = adapter
        .gc_candidates(
            "db",
            "metrics",
            TxnTimestamp::new(100),
            &FixedWatermark::new(TxnTimestamp::new(5)),
        )
        .unwrap();
    assert!(blocked.is_empty());

    let cleared = adapter
        .gc_candidates(
            "db",
            "metrics",
            TxnTimestamp::new(100),
            &FixedWatermark::new(TxnTimestamp::new(60)),
        )
        .unwrap();
    assert_eq!(cleared.len(), 1);
    assert!(cleared[0].contains("2024"));
}

// =============================================================================
// Snapshot Files
// =============================================================================

/// Round trip through a snapshot file, the way the CLI loads catalogs.
#[test]
fn test_catalog_loads_from_a_snapshot_file() {
    let events = TableMeta::cloud_merge_tree("db", "events");
    let mut snapshot = CatalogSnapshot::default();
    snapshot.tables.push(events.clone());
    snapshot
        .parts
        .insert("db.events".to_string(), vec![data("p", 1, 1, 0, 10)]);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&snapshot).unwrap().as_bytes())
        .unwrap();

    let json = std::fs::read_to_string(file.path()).unwrap();
    let catalog = MemoryCatalog::from_json(&json).unwrap();

    let rows = query(
        &catalog,
        SystemPartsConfig::default(),
        &pinned("db", "events"),
        100,
    )
    .unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].visible);
}

#[test]
fn test_malformed_snapshot_is_a_parse_error() {
    assert!(MemoryCatalog::from_json("{not json").is_err());
}
