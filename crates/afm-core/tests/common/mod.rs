use std::fs;
use std::path::{Path, PathBuf};

use ndarray::Array2;

use afm_core::io::table_io::save_height_table;
use afm_core::table::HeightTable;

/// `rows×cols` grid holding `0, 1, 2, ...` in row-major order.
pub fn sequential_array(rows: usize, cols: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |(r, c)| (r * cols + c) as f64)
}

/// Deterministic, non-monotonic values so extrema land in varied positions.
pub fn scrambled_array(rows: usize, cols: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |(r, c)| ((r * 7 + c * 13 + r * c) % 17) as f64)
}

pub fn table(data: Array2<f64>) -> HeightTable {
    HeightTable::from_array(data, "test.csv")
}

/// Write `data` as a converted scan CSV at `dir/name`.
pub fn write_scan_csv(dir: &Path, name: &str, data: &Array2<f64>) -> PathBuf {
    let path = dir.join(name);
    save_height_table(data, &path).expect("write scan csv");
    path
}

/// Write a raw instrument scan: four header lines then whitespace-separated rows.
pub fn write_raw_txt(dir: &Path, name: &str, data: &Array2<f64>) -> PathBuf {
    let mut text = String::from("# Channel: Height\n# Width: 1 um\n# Height: 1 um\n# Value units: m\n");
    for row in data.rows() {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        text.push_str(&line.join("\t"));
        text.push('\n');
    }
    let path = dir.join(name);
    fs::write(&path, text).expect("write raw txt");
    path
}
