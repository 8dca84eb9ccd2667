use std::io;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::cli::PlotKind;
use crate::error::AppError;

// ---------------------------------------------------------------------------
// Plot configuration and in-memory figure
// ---------------------------------------------------------------------------

/// Everything the renderer needs, fixed once from the invocation arguments.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub kind: PlotKind,
    pub title: String,
    pub x_label: String,
    /// Only applied to the chart when supplied.
    pub y_label: Option<String>,
    pub output_path: PathBuf,
}

/// A rasterized figure. Rendering produces one of these; writing it to disk
/// is a separate, separately-gated step.
pub struct Figure {
    width: u32,
    height: u32,
    /// Tightly packed RGB8 rows.
    pixels: Vec<u8>,
}

const FIGURE_WIDTH: u32 = 800;
const FIGURE_HEIGHT: u32 = 600;
const HISTOGRAM_BINS: usize = 10;

// ---------------------------------------------------------------------------
// Backend precondition
// ---------------------------------------------------------------------------

/// Fail fast if the requested backend is not available in this build.
/// Only the in-memory bitmap backend is compiled in.
pub fn ensure_backend(name: &str) -> Result<(), AppError> {
    if name.eq_ignore_ascii_case("bitmap") {
        Ok(())
    } else {
        Err(AppError::UnsupportedBackend(name.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Figure rendering
// ---------------------------------------------------------------------------

/// Draw the configured chart over the sample set into an RGB buffer.
///
/// Callers never invoke this for [`PlotKind::None`], and the sample set is
/// known to be non-empty by the time a chart is requested.
pub fn render(config: &PlotConfig, samples: &[f64]) -> Result<Figure> {
    debug_assert!(!samples.is_empty());

    let mut pixels = vec![0u8; (FIGURE_WIDTH * FIGURE_HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (FIGURE_WIDTH, FIGURE_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        match config.kind {
            PlotKind::Histogram => draw_histogram(&root, config, samples)?,
            PlotKind::Boxplot => draw_boxplot(&root, config, samples)?,
            PlotKind::None => bail!("render called without a plot kind"),
        }

        root.present().map_err(chart_err)?;
    }

    Ok(Figure {
        width: FIGURE_WIDTH,
        height: FIGURE_HEIGHT,
        pixels,
    })
}

/// Frequency histogram with equal-width default binning.
fn draw_histogram<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    config: &PlotConfig,
    samples: &[f64],
) -> Result<()> {
    let (bins, max_count) = bin_samples(samples, HISTOGRAM_BINS);
    let x_lo = bins.first().map(|b| b.0).unwrap_or(0.0);
    let x_hi = bins.last().map(|b| b.1).unwrap_or(1.0);

    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(44)
        .y_label_area_size(48)
        .build_cartesian_2d(x_lo..x_hi, 0u32..max_count + 1)
        .map_err(chart_err)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(config.x_label.as_str());
    if let Some(y_label) = &config.y_label {
        mesh.y_desc(y_label.as_str());
    }
    mesh.draw().map_err(chart_err)?;

    chart
        .draw_series(bins.iter().map(|&(lo, hi, count)| {
            Rectangle::new([(lo, 0), (hi, count)], BLUE.mix(0.55).filled())
        }))
        .map_err(chart_err)?;

    Ok(())
}

/// Single horizontal box-and-whisker over the whole sample set.
fn draw_boxplot<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    config: &PlotConfig,
    samples: &[f64],
) -> Result<()> {
    let quartiles = Quartiles::new(samples);
    let fences = quartiles.values();
    let (lo, hi) = (fences[0], fences[4]);
    let pad = ((hi - lo) * 0.05).max(0.5);

    let labels = ["samples"];
    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(44)
        .y_label_area_size(48)
        .build_cartesian_2d((lo - pad)..(hi + pad), labels[..].into_segmented())
        .map_err(chart_err)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(config.x_label.as_str());
    if let Some(y_label) = &config.y_label {
        mesh.y_desc(y_label.as_str());
    }
    mesh.draw().map_err(chart_err)?;

    chart
        .draw_series([
            Boxplot::new_horizontal(SegmentValue::CenterOf(&labels[0]), &quartiles).width(40)
        ])
        .map_err(chart_err)?;

    Ok(())
}

/// Equal-width bins over [min, max] with counts per bin; the top value lands
/// in the last bin. A degenerate (all-equal) sample gets half a unit of
/// padding on each side so the single bar still has width.
fn bin_samples(samples: &[f64], bins: usize) -> (Vec<(f64, f64, u32)>, u32) {
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if (max - min).abs() < f64::EPSILON {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0u32; bins];
    for &value in samples {
        let idx = (((value - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    let max_count = counts.iter().copied().max().unwrap_or(0);
    let edges = counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            (
                lo + i as f64 * width,
                lo + (i + 1) as f64 * width,
                count,
            )
        })
        .collect();
    (edges, max_count)
}

/// Plotters error types carry the backend error and are awkward to thread
/// through anyhow; flatten them to a message at the boundary.
fn chart_err<E: std::fmt::Display>(err: E) -> anyhow::Error {
    anyhow!("chart rendering failed: {err}")
}

// ---------------------------------------------------------------------------
// Write step with overwrite confirmation
// ---------------------------------------------------------------------------

/// Encode the figure to `path`, returning whether a file was written.
///
/// When `path` already holds a file and `force` is not set, `confirm` decides
/// whether to proceed; declining skips the write and is not an error. The
/// callback is injected so the decision logic stays testable without a TTY.
pub fn write_figure<F>(figure: &Figure, path: &Path, force: bool, confirm: F) -> Result<bool>
where
    F: FnOnce(&Path) -> io::Result<bool>,
{
    if path.is_file() && !force {
        let proceed = confirm(path).context("reading overwrite confirmation")?;
        if !proceed {
            info!("kept existing {}", path.display());
            return Ok(false);
        }
    }

    image::save_buffer(
        path,
        &figure.pixels,
        figure.width,
        figure.height,
        image::ExtendedColorType::Rgb8,
    )
    .map_err(|source| AppError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })?;
    info!("saved plot at {}", path.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn blank_figure() -> Figure {
        Figure {
            width: 4,
            height: 3,
            pixels: vec![255; 4 * 3 * 3],
        }
    }

    fn config(kind: PlotKind) -> PlotConfig {
        PlotConfig {
            kind,
            title: "distribution".into(),
            x_label: "values".into(),
            y_label: None,
            output_path: PathBuf::from("x.png"),
        }
    }

    #[test]
    fn only_the_bitmap_backend_is_supported() {
        assert!(ensure_backend("bitmap").is_ok());
        assert!(ensure_backend("BITMAP").is_ok());
        assert!(matches!(
            ensure_backend("cairo"),
            Err(AppError::UnsupportedBackend(_))
        ));
    }

    #[test]
    fn binning_covers_the_full_range() {
        let samples = [1.0, 2.0, 3.0, 4.0, 10.0];
        let (bins, max_count) = bin_samples(&samples, 10);
        assert_eq!(bins.len(), 10);
        assert!((bins[0].0 - 1.0).abs() < 1e-9);
        assert!((bins[9].1 - 10.0).abs() < 1e-9);
        // Every sample lands somewhere, including the max in the last bin.
        let total: u32 = bins.iter().map(|b| b.2).sum();
        assert_eq!(total, 5);
        assert_eq!(bins[9].2, 1);
        assert_eq!(max_count, bins.iter().map(|b| b.2).max().unwrap());
    }

    #[test]
    fn degenerate_sample_still_gets_a_bin_width() {
        let (bins, max_count) = bin_samples(&[5.0, 5.0, 5.0], 10);
        assert!(bins[0].0 < bins[9].1);
        assert_eq!(max_count, 3);
        assert_eq!(bins.iter().map(|b| b.2).sum::<u32>(), 3);
    }

    #[test]
    fn histogram_renders_into_the_buffer() {
        let figure = render(&config(PlotKind::Histogram), &[1.0, 2.0, 2.0, 3.0]).unwrap();
        assert_eq!(
            figure.pixels.len(),
            (FIGURE_WIDTH * FIGURE_HEIGHT * 3) as usize
        );
        // Something other than the white background must have been drawn.
        assert!(figure.pixels.chunks(3).any(|px| px != [255, 255, 255]));
    }

    #[test]
    fn boxplot_renders_into_the_buffer() {
        let figure = render(&config(PlotKind::Boxplot), &[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!(figure.pixels.chunks(3).any(|px| px != [255, 255, 255]));
    }

    #[test]
    fn declined_overwrite_leaves_the_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.png");
        fs::write(&path, b"sentinel").unwrap();

        let written = write_figure(&blank_figure(), &path, false, |_| Ok(false)).unwrap();
        assert!(!written);
        assert_eq!(fs::read(&path).unwrap(), b"sentinel");
    }

    #[test]
    fn accepted_overwrite_replaces_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.png");
        fs::write(&path, b"sentinel").unwrap();

        let written = write_figure(&blank_figure(), &path, false, |_| Ok(true)).unwrap();
        assert!(written);
        // PNG signature, not the sentinel.
        assert!(fs::read(&path).unwrap().starts_with(b"\x89PNG"));
    }

    #[test]
    fn force_never_asks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.png");
        fs::write(&path, b"sentinel").unwrap();

        let written =
            write_figure(&blank_figure(), &path, true, |_| panic!("prompted under --force"))
                .unwrap();
        assert!(written);
    }

    #[test]
    fn fresh_path_never_asks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.png");

        let written =
            write_figure(&blank_figure(), &path, false, |_| panic!("prompted for a new file"))
                .unwrap();
        assert!(written);
        assert!(path.is_file());
    }

    #[test]
    fn unknown_output_format_is_a_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.tga");

        let err = write_figure(&blank_figure(), &path, false, |_| {
            panic!("prompted for a new file")
        })
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AppError>(),
            Some(AppError::WriteFailed { .. })
        ));
    }
}
