#[allow(dead_code)]
mod common;

use std::fs;

use ndarray::{s, Array2};

use afm_core::error::AfmError;
use afm_core::minmax::aggregate::{aggregate_positions, kind_total, ExtremumKind};
use afm_core::minmax::export::{counts_file_name, flattened_file_name, write_counts};
use afm_core::minmax::extremum::{locate_extrema, Position};
use afm_core::minmax::loader::trim_to_grid;
use afm_core::minmax::partition::partition;
use afm_core::minmax::{analyze_grid, process_file};

// ---------------------------------------------------------------------------
// Partitioning
// ---------------------------------------------------------------------------

#[test]
fn test_partition_reconstructs_grid() {
    let data = common::scrambled_array(9, 9);
    let blocks: Vec<_> = partition(data.view(), 3).unwrap().collect();
    assert_eq!(blocks.len(), 9);

    let mut rebuilt = Array2::<f64>::zeros((9, 9));
    for (index, block) in blocks.iter().enumerate() {
        let (br, bc) = (index / 3, index % 3);
        rebuilt
            .slice_mut(s![br * 3..br * 3 + 3, bc * 3..bc * 3 + 3])
            .assign(block);
    }
    assert_eq!(rebuilt, data);
}

#[test]
fn test_partition_is_row_major() {
    let data = common::sequential_array(6, 6);
    let firsts: Vec<f64> = partition(data.view(), 3)
        .unwrap()
        .map(|b| b[[0, 0]])
        .collect();
    assert_eq!(firsts, vec![0.0, 3.0, 18.0, 21.0]);
}

#[test]
fn test_partition_reports_exact_size() {
    let data = common::sequential_array(8, 8);
    let mut blocks = partition(data.view(), 2).unwrap();
    assert_eq!(blocks.len(), 16);
    blocks.next();
    assert_eq!(blocks.len(), 15);
}

#[test]
fn test_partition_rejects_non_square() {
    let data = common::sequential_array(6, 9);
    assert!(matches!(
        partition(data.view(), 3),
        Err(AfmError::Dimension { .. })
    ));
}

#[test]
fn test_partition_rejects_indivisible_side() {
    let data = common::sequential_array(7, 7);
    assert!(matches!(
        partition(data.view(), 3),
        Err(AfmError::Dimension { .. })
    ));
}

#[test]
fn test_partition_rejects_zero_block_size() {
    let data = common::sequential_array(3, 3);
    assert!(matches!(
        partition(data.view(), 0),
        Err(AfmError::InvalidBlockSize(0))
    ));
}

#[test]
fn test_grid_blocks_can_be_walked_twice() {
    let grid = trim_to_grid(&common::table(common::scrambled_array(6, 6)), 2).unwrap();
    let first: Vec<_> = grid.blocks().map(|b| b.to_owned()).collect();
    let second: Vec<_> = grid.blocks().map(|b| b.to_owned()).collect();
    assert_eq!(first, second);
}

// ---------------------------------------------------------------------------
// Extremum location and aggregation
// ---------------------------------------------------------------------------

#[test]
fn test_locate_extrema_in_block() {
    let block = ndarray::array![[5.0, 1.0, 7.0], [3.0, 9.0, 2.0], [4.0, 6.0, 8.0]];
    let record = locate_extrema(&block.view()).unwrap();
    assert_eq!(record.min, Position::new(0, 1));
    assert_eq!(record.max, Position::new(1, 1));
    assert_eq!(record.min_value, 1.0);
    assert_eq!(record.max_value, 9.0);
}

#[test]
fn test_aggregate_orders_min_before_max() {
    let blocks = [
        ndarray::array![[1.0, 2.0], [3.0, 4.0]],
        ndarray::array![[4.0, 3.0], [2.0, 1.0]],
        ndarray::array![[1.0, 4.0], [3.0, 2.0]],
    ];
    let records = blocks.iter().map(|b| locate_extrema(&b.view()).unwrap());
    let counts = aggregate_positions(records);

    let rows: Vec<(usize, usize, usize, ExtremumKind)> = counts
        .iter()
        .map(|c| (c.row, c.col, c.count, c.kind))
        .collect();
    assert_eq!(
        rows,
        vec![
            (0, 0, 2, ExtremumKind::Min),
            (1, 1, 1, ExtremumKind::Min),
            (0, 0, 1, ExtremumKind::Max),
            (0, 1, 1, ExtremumKind::Max),
            (1, 1, 1, ExtremumKind::Max),
        ]
    );
}

// ---------------------------------------------------------------------------
// Whole-grid analysis
// ---------------------------------------------------------------------------

#[test]
fn test_sequential_grid_counts() {
    let grid = trim_to_grid(&common::table(common::sequential_array(6, 6)), 3).unwrap();
    let report = analyze_grid(&grid).unwrap();

    assert_eq!(report.block_count, 4);
    assert_eq!(report.counts.len(), 2);
    assert_eq!(
        (report.counts[0].row, report.counts[0].col, report.counts[0].count),
        (0, 0, 4)
    );
    assert_eq!(report.counts[0].kind, ExtremumKind::Min);
    assert_eq!(
        (report.counts[1].row, report.counts[1].col, report.counts[1].count),
        (2, 2, 4)
    );
    assert_eq!(report.counts[1].kind, ExtremumKind::Max);

    let mut buf = Vec::new();
    write_counts(&report.counts, &mut buf).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "r,c,count,kind\n0,0,4,min\n2,2,4,max\n"
    );
}

#[test]
fn test_flattened_rows_follow_block_order() {
    let grid = trim_to_grid(&common::table(common::sequential_array(6, 6)), 3).unwrap();
    let report = analyze_grid(&grid).unwrap();

    assert_eq!(report.flattened.data.dim(), (4, 9));
    let first: Vec<f64> = report.flattened.data.row(0).to_vec();
    assert_eq!(first, vec![0.0, 1.0, 2.0, 6.0, 7.0, 8.0, 12.0, 13.0, 14.0]);
    let last: Vec<f64> = report.flattened.data.row(3).to_vec();
    assert_eq!(last, vec![21.0, 22.0, 23.0, 27.0, 28.0, 29.0, 33.0, 34.0, 35.0]);

    let names = report.flattened.column_names();
    assert_eq!(names.first().map(String::as_str), Some("ri_0_ci_0"));
    assert_eq!(names.last().map(String::as_str), Some("ri_2_ci_2"));
}

#[test]
fn test_kind_totals_equal_block_count() {
    for n in [1, 2, 3, 4] {
        let grid = trim_to_grid(&common::table(common::scrambled_array(12, 12)), n).unwrap();
        let report = analyze_grid(&grid).unwrap();
        assert_eq!(report.block_count, (12 / n) * (12 / n));
        assert_eq!(kind_total(&report.counts, ExtremumKind::Min), report.block_count);
        assert_eq!(report.kind_total(ExtremumKind::Max), report.block_count);
    }
}

#[test]
fn test_block_size_one_puts_everything_at_origin() {
    let grid = trim_to_grid(&common::table(common::scrambled_array(5, 5)), 1).unwrap();
    let report = analyze_grid(&grid).unwrap();
    assert_eq!(report.counts.len(), 2);
    assert!(report.counts.iter().all(|c| c.row == 0 && c.col == 0 && c.count == 25));
}

#[test]
fn test_analysis_is_deterministic() {
    let grid = trim_to_grid(&common::table(common::scrambled_array(9, 9)), 3).unwrap();
    let a = analyze_grid(&grid).unwrap();
    let b = analyze_grid(&grid).unwrap();
    assert_eq!(a.counts, b.counts);
    assert_eq!(a.flattened, b.flattened);
}

// ---------------------------------------------------------------------------
// File processing
// ---------------------------------------------------------------------------

#[test]
fn test_process_file_writes_both_tables() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_scan_csv(dir.path(), "scan.csv", &common::sequential_array(6, 6));

    let (report, outputs) = process_file(&input, 3, None).unwrap();
    assert_eq!(report.block_count, 4);
    assert_eq!(outputs.counts, dir.path().join(counts_file_name(3)));
    assert_eq!(outputs.flattened, dir.path().join(flattened_file_name(3)));

    let counts = fs::read_to_string(&outputs.counts).unwrap();
    assert_eq!(counts, "r,c,count,kind\n0,0,4,min\n2,2,4,max\n");

    let flattened = fs::read_to_string(&outputs.flattened).unwrap();
    let mut lines = flattened.lines();
    assert_eq!(
        lines.next(),
        Some("ri_0_ci_0,ri_0_ci_1,ri_0_ci_2,ri_1_ci_0,ri_1_ci_1,ri_1_ci_2,ri_2_ci_0,ri_2_ci_1,ri_2_ci_2")
    );
    assert_eq!(lines.next(), Some("0,1,2,6,7,8,12,13,14"));
    assert_eq!(lines.count(), 3);
}

#[test]
fn test_process_file_trims_seven_by_seven() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_scan_csv(dir.path(), "scan.csv", &common::sequential_array(7, 7));
    let (report, _) = process_file(&input, 3, None).unwrap();
    assert_eq!(report.rows_to_drop, 1);
    assert_eq!(report.block_count, 4);
}

#[test]
fn test_process_file_non_square_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_scan_csv(dir.path(), "scan.csv", &common::sequential_array(6, 7));

    let err = process_file(&input, 3, None).unwrap_err();
    assert!(matches!(err, AfmError::Dimension { .. }));
    assert!(!dir.path().join(counts_file_name(3)).exists());
    assert!(!dir.path().join(flattened_file_name(3)).exists());
}

#[test]
fn test_process_file_into_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_scan_csv(dir.path(), "scan.csv", &common::sequential_array(4, 4));
    let out = dir.path().join("results");

    let (_, outputs) = process_file(&input, 2, Some(&out)).unwrap();
    assert!(outputs.counts.starts_with(&out));
    assert!(outputs.counts.exists());
    assert!(outputs.flattened.exists());
}

#[test]
fn test_process_file_too_small_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_scan_csv(dir.path(), "scan.csv", &common::sequential_array(2, 2));

    let err = process_file(&input, 3, None).unwrap_err();
    assert!(matches!(err, AfmError::Dimension { .. }));
    assert!(!dir.path().join(counts_file_name(3)).exists());
    assert!(!dir.path().join(flattened_file_name(3)).exists());
}
