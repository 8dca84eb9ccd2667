use std::path::PathBuf;

use clap::{Parser, ValueEnum};

// ---------------------------------------------------------------------------
// Command-line interface
// ---------------------------------------------------------------------------

/// Get sample statistics for files with a certain extension.
/// Each file must contain a single number and nothing else.
#[derive(Parser, Debug)]
#[command(name = "ess", version)]
pub struct Cli {
    /// The file extension to sample from (leading dot optional).
    #[arg(value_name = "EXT")]
    pub extension: String,

    /// Overwrite the output file without prompting.
    #[arg(short, long)]
    pub force: bool,

    /// Log per-file reads and skip reasons.
    #[arg(short, long)]
    pub verbose: bool,

    /// The type of plot to render. Single-letter shorthands are accepted.
    #[arg(
        short = 'p',
        long = "plot-type",
        value_enum,
        default_value_t = PlotKind::None,
        ignore_case = true,
        value_name = "KIND"
    )]
    pub plot_type: PlotKind,

    /// Where to write the rendered plot.
    #[arg(short, long, default_value = "x.png", value_name = "FILE")]
    pub output_path: PathBuf,

    /// The title of the plot.
    #[arg(short, long, default_value = "distribution")]
    pub title: String,

    /// The x-axis label.
    #[arg(short, long, default_value = "values", value_name = "LABEL")]
    pub x_label: String,

    /// The y-axis label (left off the plot when not given).
    #[arg(short, long, value_name = "LABEL")]
    pub y_label: Option<String>,

    /// The raster backend used for plot generation.
    #[arg(short, long, default_value = "bitmap")]
    pub backend: String,
}

impl Cli {
    /// Extension with a single leading dot stripped, if present.
    pub fn normalized_extension(&self) -> &str {
        self.extension
            .strip_prefix('.')
            .unwrap_or(&self.extension)
    }
}

/// Which chart to draw, if any.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlotKind {
    /// Print statistics only, no image output.
    #[value(alias = "n")]
    None,
    /// Default-binned frequency histogram.
    #[value(alias = "h")]
    Histogram,
    /// Single horizontal box-and-whisker summary.
    #[value(alias = "b")]
    Boxplot,
}
