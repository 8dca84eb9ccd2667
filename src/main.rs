mod cli;
mod crashlog;
mod data;
mod error;
mod render;
mod stats;

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use log::info;

use cli::{Cli, PlotKind};
use error::AppError;
use render::PlotConfig;
use stats::Summary;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli, Path::new("."), confirm_overwrite) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<AppError>() {
            // Known failure: report and exit with its status.
            Some(app_err) => {
                eprintln!("error: {err:#}");
                ExitCode::from(app_err.exit_code())
            }
            // Anything else is a bug: dump it into fp<N>.log.
            None => {
                match crashlog::dump(Path::new("."), &err) {
                    Ok(path) => {
                        eprintln!("error: dumped unhandled error into {}", path.display())
                    }
                    Err(log_err) => eprintln!("error: {err:#} (crash log failed: {log_err:#})"),
                }
                ExitCode::FAILURE
            }
        },
    }
}

/// Default to warn-level output, info when `--verbose`; `RUST_LOG` wins.
fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

/// The four-stage pipeline. The sampled directory and the overwrite
/// confirmation come in as parameters so the whole run is drivable from
/// tests without touching the process CWD or stdin.
fn run<F>(cli: &Cli, dir: &Path, confirm: F) -> Result<()>
where
    F: FnOnce(&Path) -> io::Result<bool>,
{
    render::ensure_backend(&cli.backend)?;

    let ext = cli.normalized_extension();
    info!("sampling from files with the extension .{ext}");

    let files = data::select_files(dir, ext)?;
    let samples = data::load_samples(&files)?;

    let summary =
        Summary::from_samples(&samples).ok_or_else(|| AppError::NoSamples(ext.to_string()))?;
    println!("{summary}");

    if cli.plot_type == PlotKind::None {
        return Ok(());
    }

    let config = PlotConfig {
        kind: cli.plot_type,
        title: cli.title.clone(),
        x_label: cli.x_label.clone(),
        y_label: cli.y_label.clone(),
        output_path: cli.output_path.clone(),
    };
    let figure = render::render(&config, &samples)?;
    render::write_figure(&figure, &config.output_path, cli.force, confirm)?;

    Ok(())
}

/// Blocking yes/no prompt on stdin; repeats until it gets a y/n token.
/// End of input counts as declining.
fn confirm_overwrite(path: &Path) -> io::Result<bool> {
    let shown = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("overwrite {}? [y/n] ", shown.display());
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(false);
        }
        match line.trim() {
            "y" | "Y" => return Ok(true),
            "n" | "N" => return Ok(false),
            _ => {}
        }
    }
}
