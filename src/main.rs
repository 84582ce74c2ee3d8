// Import the clap Parser derive macro for CLI argument parsing
use clap::Parser;

// Import our library types
use sierpinski::config::parse_hex_color;
use sierpinski::generation::triangle_count;
use sierpinski::{render_to_file, RenderConfig};

// Import indicatif for progress bars
use indicatif::{ProgressBar, ProgressStyle};

use std::path::PathBuf;

/// Sierpinski triangle renderer
///
/// Starts from one equilateral triangle, splits every triangle into its three
/// corner triangles (dropping the middle one) a number of times, and paints
/// whatever is left into an image file.
///
/// Every option falls back to the value in `--config` if given, and to the
/// built-in default otherwise.
#[derive(Parser)]
#[command(name = "sierpinski")]
#[command(about = "Render a Sierpinski triangle", long_about = None)]
#[command(version)]
struct Args {
    /// JSON file with base settings (any subset of the fields)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of subdivision rounds (default 8)
    ///
    /// The image holds 3^iterations triangles.
    #[arg(short, long)]
    iterations: Option<u32>,

    /// Canvas width in pixels (default 1000)
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels (default 1000)
    #[arg(long)]
    height: Option<u32>,

    /// Side length of the seed triangle (default 900)
    #[arg(long)]
    side: Option<f64>,

    /// X coordinate of the seed's apex (default 500)
    #[arg(long, allow_negative_numbers = true)]
    offset_x: Option<f64>,

    /// Y coordinate of the seed's apex (default 50)
    #[arg(long, allow_negative_numbers = true)]
    offset_y: Option<f64>,

    /// Background colour as hex RRGGBB (default ffffff)
    #[arg(long)]
    background: Option<String>,

    /// Triangle colour as hex RRGGBB (default 000000)
    #[arg(long)]
    fill: Option<String>,

    /// Output image; the format follows the extension (default sierpinski.png)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Subdivide each generation on all CPU cores
    #[arg(long)]
    parallel: bool,

    /// Number of threads for parallel processing
    ///
    /// Limits Rayon's thread pool size. By default, uses all available CPU cores.
    /// Only meaningful together with --parallel.
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// Also write the final generation's triangles to this JSON file
    #[arg(long)]
    dump_triangles: Option<PathBuf>,
}

impl Args {
    /// Layer CLI flags over the config file (or the defaults)
    fn into_config(self) -> Result<RenderConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::from_json_file(path)?,
            None => RenderConfig::default(),
        };

        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(side) = self.side {
            config.side = side;
        }
        if let Some(x) = self.offset_x {
            config.offset_x = x;
        }
        if let Some(y) = self.offset_y {
            config.offset_y = y;
        }
        if let Some(background) = &self.background {
            config.background = parse_hex_color(background)?;
        }
        if let Some(fill) = &self.fill {
            config.fill = parse_hex_color(fill)?;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        config.parallel |= self.parallel;
        if let Some(path) = self.dump_triangles {
            config.dump_triangles = Some(path);
        }

        Ok(config)
    }
}

/// Main entry point for the CLI application
fn main() {
    // If parsing fails (invalid args), clap automatically prints help and exits
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Render the fractal with the given arguments
fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    // Configure Rayon thread pool if thread limit is specified
    if let Some(num_threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
    }

    let config = args.into_config()?;

    // Validate up front so a bad config is reported before any output
    config.validate()?;

    println!("Rendering Sierpinski triangle...");
    println!("  Canvas: {}x{}", config.width, config.height);
    println!(
        "  Seed: side {} with apex at ({}, {})",
        config.side, config.offset_x, config.offset_y
    );
    println!(
        "  Iterations: {} ({} triangles)",
        config.iterations,
        triangle_count(config.iterations)
    );
    if config.parallel {
        println!("  Subdivision: parallel");
    }

    // One tick per generation
    let pb = ProgressBar::new(config.iterations as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} | {msg}")?
            .progress_chars("=>-"),
    );

    let summary = render_to_file(&config, |generation| {
        pb.set_message(format!("{} triangles", generation.len()));
        pb.inc(1);
    })?;

    pb.finish_with_message("done");

    println!("\nResults:");
    println!("  Triangles drawn: {}", summary.triangles);
    println!("  Filled pixels: {}", summary.filled_pixels);
    println!("  Output: {}", summary.output.display());
    if let Some(path) = &config.dump_triangles {
        println!("  Triangles: {}", path.display());
    }

    Ok(())
}
