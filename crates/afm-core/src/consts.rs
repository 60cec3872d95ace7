/// Name of the row-index column written by the converter.
pub const ROW_INDEX_COLUMN: &str = "DataLine";

/// Prefix of the value column names written by the converter (`Pos = 0`, ...).
pub const POSITION_COLUMN_PREFIX: &str = "Pos = ";

/// Number of instrument header lines at the top of a raw `.txt` scan.
pub const DEFAULT_HEADER_LINES: usize = 4;

/// Scale applied to raw heights on conversion (metres to nanometres).
pub const DEFAULT_MULTIPLY_CONST: f64 = 1e9;

/// Default side length of the square blocks used by the min/max analysis.
pub const DEFAULT_BLOCK_SIZE: usize = 3;

/// Default sampling interval between neighbouring scan points, in µm.
/// Scales the lag axis of the autocorrelation table.
pub const DEFAULT_WIDTH_LINE: f64 = 0.0196;

/// Horizontal guide drawn on the autocorrelation plot.
pub const ACF_REFERENCE_LEVEL: f64 = 0.1;

/// Filename suffixes skipped when collecting CSV inputs.
pub const DEFAULT_EXCLUDE_SUFFIXES: [&str; 4] =
    ["(3x3).csv", "_auto.csv", "output.csv", "autocorr.csv"];

/// File written by the autocorrelation analysis.
pub const AUTOCORR_TABLE_FILE: &str = "autocorr.csv";

/// Plot written by the autocorrelation analysis.
pub const AUTOCORR_PLOT_FILE: &str = "autocorr_function.svg";

/// Pixel size of the autocorrelation plot.
pub const PLOT_WIDTH: u32 = 1050;
pub const PLOT_HEIGHT: u32 = 750;
