// ============================================================================
// Breville CLI — one-shot render of the brushed-metal button
// ============================================================================
//
// Usage examples:
//   breville                                  (writes breville.png)
//   breville -o knob.jpg --quality 95         (format inferred from output ext)
//   breville --seed 7 --dump-glow debug/      (reproducible, plus glow stages)
//
// Geometry is fixed; the flags only control output, logging and threading.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use crate::config::SceneConfig;
use crate::error::{RenderError, Result};
use crate::io::{SaveFormat, encode_and_write, save_rgba_png};
use crate::noise::NoiseTable;
use crate::pipeline::render_stages;
use crate::{log_err, log_info, log_warn};

// ============================================================================
// CLI argument definition (clap Derive)
// ============================================================================

/// Render a brushed-metal "Breville" button with a glowing red ring.
#[derive(Parser, Debug)]
#[command(
    name = "breville",
    about = "Render a brushed-metal button with a glowing ring to an image file",
    long_about = "Render an 11x14 inch, 300 DPI image of a brushed-metal button\n\
                  surrounded by a softly glowing red ring.\n\n\
                  Example:\n  \
                  breville -o breville.png\n  \
                  breville --seed 42 --dump-glow debug/"
)]
pub struct CliArgs {
    /// Output file path.
    #[arg(short, long, default_value = "breville.png", value_name = "FILE")]
    pub output: PathBuf,

    /// Output format: png, jpeg, bmp, tiff.
    /// When omitted, the format is inferred from --output's extension, defaulting to png.
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// JPEG quality (1–100, default 90).
    #[arg(short, long, default_value_t = 90, value_name = "1-100")]
    pub quality: u8,

    /// Seed for the brush-grain noise. Omit for a fresh pattern each run.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Worker threads for rendering (default: one per core).
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Also write the glow source (before.png) and processed glow (after.png) here.
    #[arg(long, value_name = "DIR")]
    pub dump_glow: Option<PathBuf>,

    /// Mirror log output to this file (truncated each run).
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Print progress and timing information.
    #[arg(short, long)]
    pub verbose: bool,
}

// ============================================================================
// Public entry point
// ============================================================================

/// Run the render and return an OS exit code.
pub fn run(args: CliArgs) -> ExitCode {
    match run_render(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_err!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_render(args: &CliArgs) -> Result<()> {
    let start = Instant::now();
    let format = parse_format(args.format.as_deref(), &args.output)?;

    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| RenderError::Config(format!("could not start {} worker threads: {}", n, e)))?;
    }

    let config = SceneConfig::reference();
    config.validate()?;

    let noise = match args.seed {
        Some(seed) => {
            log_info!("noise seed {}", seed);
            NoiseTable::seeded(config.noise_size, seed)
        }
        None => NoiseTable::random(config.noise_size),
    };

    log_info!(
        "rendering {}x{} (button r={}, light r={}) on {} threads",
        config.width,
        config.height,
        config.button_radius,
        config.light_radius,
        rayon::current_num_threads()
    );
    let stages = render_stages(&config, &noise)?;

    if let Some(dir) = &args.dump_glow {
        std::fs::create_dir_all(dir)?;
        save_rgba_png(&stages.glow_source, &dir.join("before.png"), config.dpi)?;
        save_rgba_png(&stages.glow, &dir.join("after.png"), config.dpi)?;
        log_info!("glow stages written to {}", dir.display());
    }

    encode_and_write(&stages.image, &args.output, format, args.quality, config.dpi)?;
    log_info!(
        "→ {} ({:.0}ms)",
        args.output.display(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// Choose the [`SaveFormat`] from the `--format` string or infer it from the
/// output file extension. Defaults to PNG when the extension is unknown; an
/// unknown `--format` is an error.
fn parse_format(format_arg: Option<&str>, output: &Path) -> Result<SaveFormat> {
    if let Some(f) = format_arg {
        let format = SaveFormat::from_name(f)
            .ok_or_else(|| RenderError::Config(format!("unknown output format '{}'", f)))?;
        if SaveFormat::from_path(output) != Some(format) {
            log_warn!(
                "writing {} data to {} despite its extension",
                format.extension(),
                output.display()
            );
        }
        return Ok(format);
    }
    Ok(SaveFormat::from_path(output).unwrap_or_default())
}
