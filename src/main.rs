use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use x_screenshot::config::ShotConfig;
use x_screenshot::error::{FAILURE_EXIT_CODE, ShotError};
use x_screenshot::logging::init_tracing;
use x_screenshot::processing::Schedule;

/// Screenshot an X11 window as PNG, shrunk to fit the given bounds.
#[derive(Parser, Debug)]
#[command(name = "x-screenshot", disable_version_flag = true)]
#[command(about = "Screenshot an X11 window (or the whole screen) as PNG")]
#[command(long_about = "Screenshot an X11 window (or the whole screen) and write it as PNG.
The image is shrunk with a box filter to fit within --width and --height while
keeping its aspect ratio; it is never enlarged. The PNG goes to stdout unless
--output is given.")]
struct Args {
    /// The window ID (decimal or 0x-prefixed hex); omit for the root window
    #[arg(value_parser = parse_window_id)]
    id: Option<u32>,

    /// The max width of the result
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// The max height of the result
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Write the PNG to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Shrink the color channels one after another instead of in parallel
    #[arg(long)]
    sequential: bool,

    /// Log debug details to stderr
    #[arg(long)]
    verbose: bool,

    /// Show the version and exit
    #[arg(short = 'v', long)]
    version: bool,
}

impl Args {
    fn to_config(&self) -> ShotConfig {
        let schedule = if self.sequential {
            Schedule::Sequential
        } else {
            Schedule::Parallel
        };
        ShotConfig::new(self.id, self.width, self.height, self.output.clone(), schedule)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    if args.version {
        println!("{}", version_line());
        return ExitCode::SUCCESS;
    }
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err
                .downcast_ref::<ShotError>()
                .map_or(FAILURE_EXIT_CODE, ShotError::exit_code);
            if err.downcast_ref::<ShotError>().is_some_and(ShotError::is_internal) {
                tracing::error!("internal invariant violated: {err:#}");
            }
            eprintln!("x-screenshot: {err:#}");
            ExitCode::from(code)
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.to_config();
    config.validate()?;
    tracing::debug!(?config, "starting");

    x_screenshot::screenshot(&config).context("screenshot failed")?;
    Ok(())
}

fn version_line() -> String {
    format!("Version {} (x-screenshot)", env!("CARGO_PKG_VERSION"))
}

/// Parse a window id like `12345` or `0x3a00007`, as printed by `xwininfo`.
fn parse_window_id(id: &str) -> Result<u32> {
    let parsed = match id.strip_prefix("0x").or_else(|| id.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => id.parse::<u32>(),
    };
    parsed.map_err(|_| anyhow!("Invalid window id: {}", id))
}
