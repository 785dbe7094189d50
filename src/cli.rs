// ============================================================================
// canvasfe CLI — one image in, one edited image out
// ============================================================================
//
// Usage examples:
//   canvasfe extend                          (input.png -> extended.png)
//   canvasfe extend -i photo.jpg -o tall.png --show
//   canvasfe blackout -i photo.jpg -o redacted.jpg   (format from output ext)
//   canvasfe -vv --log-file session.log blackout
//
// All processing runs synchronously; rayon is only used inside the pixel fills.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::error::Result;
use crate::io::{SaveFormat, load_rgba, save};
use crate::ops::canvas_ops::blackout_corner;
use crate::ops::transform::extend_bottom;

pub const DEFAULT_INPUT: &str = "input.png";
pub const DEFAULT_EXTEND_OUTPUT: &str = "extended.png";
pub const DEFAULT_BLACKOUT_OUTPUT: &str = "blackout.png";

// ============================================================================
// CLI argument definition (clap Derive)
// ============================================================================

/// canvasfe headless image editor.
#[derive(Parser, Debug)]
#[command(
    name = "canvasfe",
    version,
    about = "Extend an image's canvas or black out its bottom-right corner",
    long_about = "Load one image, apply a fixed pixel edit and write the result.\n\n\
                  extend   appends 100 rows of opaque black below the image (PNG output)\n\
                  blackout paints a 200x100 opaque black box in the bottom-right corner\n\
                  \x20        (output format inferred from the file extension)"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Mirror log output to this file (truncated at each launch).
    #[arg(long, value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Grow the canvas downward, padding with opaque black.
    Extend(ExtendArgs),
    /// Overwrite the bottom-right corner with opaque black.
    Blackout(BlackoutArgs),
}

#[derive(Args, Debug)]
pub struct ExtendArgs {
    /// Image to load.
    #[arg(short, long, default_value = DEFAULT_INPUT, value_name = "FILE")]
    pub input: PathBuf,

    /// Where to write the result. Always encoded as PNG.
    #[arg(short, long, default_value = DEFAULT_EXTEND_OUTPUT, value_name = "FILE")]
    pub output: PathBuf,

    /// Open the saved result in the system viewer.
    #[arg(long)]
    pub show: bool,
}

#[derive(Args, Debug)]
pub struct BlackoutArgs {
    /// Image to load.
    #[arg(short, long, default_value = DEFAULT_INPUT, value_name = "FILE")]
    pub input: PathBuf,

    /// Where to write the result. The encoder is picked from the extension.
    #[arg(short, long, default_value = DEFAULT_BLACKOUT_OUTPUT, value_name = "FILE")]
    pub output: PathBuf,
}

// ============================================================================
// Public entry point
// ============================================================================

/// Run the selected edit and return an OS exit code.
pub fn run(args: CliArgs) -> ExitCode {
    let start = Instant::now();

    let result = match &args.command {
        Command::Extend(a) => run_extend(&a.input, &a.output, a.show),
        Command::Blackout(a) => run_blackout(&a.input, &a.output),
    };

    match result {
        Ok(()) => {
            log::info!("done in {:.0}ms", start.elapsed().as_secs_f64() * 1000.0);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", error_chain(&e));
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// Edits
// ============================================================================

/// Canvas extension: load, append the black band, save as PNG.
pub fn run_extend(input: &Path, output: &Path, show: bool) -> Result<()> {
    match SaveFormat::from_path(output) {
        Ok(SaveFormat::Png) => {}
        _ => log::warn!(
            "'{}' will be written as {} regardless of its extension",
            output.display(),
            SaveFormat::Png.extension()
        ),
    }

    let image = load_rgba(input)?;
    let extended = extend_bottom(&image)?;
    save(&extended, output, SaveFormat::Png)?;

    if show {
        show_in_viewer(output);
    }
    Ok(())
}

/// Rectangular blackout: load, paint the corner, save in the format the
/// output extension names.
pub fn run_blackout(input: &Path, output: &Path) -> Result<()> {
    // Reject an unknown extension before doing any work
    let format = SaveFormat::from_path(output)?;

    let mut image = load_rgba(input)?;
    let region = blackout_corner(&mut image)?;
    log::info!(
        "blacked out {}x{} at ({}, {})",
        region.width, region.height, region.x, region.y
    );
    save(&image, output, format)
}

// ============================================================================
// Helpers
// ============================================================================

/// Hand the saved file to the platform viewer. Failures are only logged.
fn show_in_viewer(path: &Path) {
    let target = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    let target = target.to_string_lossy();
    match webbrowser::open(&target) {
        Ok(()) => log::info!("opened '{}' for inspection", target),
        Err(e) => log::warn!("could not open a viewer for '{}': {}", target, e),
    }
}

/// `error: top-level message` followed by one `  caused by:` line per source.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = format!("error: {}", err);
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(&format!("\n  caused by: {}", cause));
        source = cause.source();
    }
    out
}
