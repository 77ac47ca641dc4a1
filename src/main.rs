use clap::{Parser, Subcommand};
use rasterize::batch::{BatchEvent, BatchRequest, run_batch};
use rasterize::convert::{self, OutputFormat};
use rasterize::decode::{self, ImageInfo};
use rasterize::filters;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rasterize")]
#[command(about = "Raster filters and image format conversion")]
#[command(long_about = "\
Raster filters and image format conversion

Decodes an image into a normalized RGBA raster, optionally applies one of
the built-in per-pixel filters, and persists the result in the requested
format. Formats whose encoder cannot handle the raster fall back to a PNG
at the same base name; the written extension is authoritative.

Filters:   black and white, sepia, blur, sharpen, color invert,
           flip image, contrast, brightness, saturate (case-insensitive)
Formats:   PNG, JPG, GIF, TIFF, PDF, SVG, HEIF (case-insensitive)

Run 'rasterize filters' or 'rasterize formats' for the exact lists.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available filters
    Filters,
    /// List the supported output formats
    Formats,
    /// Show file and container properties of an image
    Info {
        file: PathBuf,
        /// Emit the properties as JSON
        #[arg(long)]
        json: bool,
    },
    /// Apply a filter and write the result as PNG
    Apply {
        file: PathBuf,
        /// Filter name, e.g. "sepia" or "black and white"
        #[arg(long)]
        filter: String,
        /// Output directory
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Convert an image to another format
    Convert {
        file: PathBuf,
        /// Target format token, e.g. "png" or "PDF"
        #[arg(long)]
        format: String,
        /// Filter to apply before converting
        #[arg(long)]
        filter: Option<String>,
        /// Output directory
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Convert many images in parallel
    Batch {
        files: Vec<PathBuf>,
        /// Target format token for every image
        #[arg(long)]
        format: String,
        /// Filter to apply to every image before converting
        #[arg(long)]
        filter: Option<String>,
        /// Output directory
        #[arg(long, default_value = "converted")]
        out_dir: PathBuf,
        /// Worker threads (capped at the number of CPU cores)
        #[arg(long)]
        threads: Option<usize>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Filters => {
            for name in filters::list_filters() {
                println!("{name}");
            }
        }
        Command::Formats => {
            for token in convert::list_formats() {
                println!("{token}");
            }
        }
        Command::Info { file, json } => {
            let info = ImageInfo::probe(&file)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for (label, value) in info.properties() {
                    println!("{label}: {value}");
                }
            }
        }
        Command::Apply {
            file,
            filter,
            out_dir,
        } => {
            let filter = filters::create(&filter)?;
            let raster = decode::decode(&file)?;
            let filtered = filter.apply(&raster);
            let base_name = format!("{}-{}", file_stem(&file)?, slug(filter.name()));
            let result = convert::convert_to(&filtered, OutputFormat::Png, &out_dir, &base_name)?;
            println!("Wrote {}", result.path.display());
        }
        Command::Convert {
            file,
            format,
            filter,
            out_dir,
        } => {
            let filter = filter.map(|name| filters::create(&name)).transpose()?;
            let raster = decode::decode(&file)?;
            let raster = match filter {
                Some(filter) => filter.apply(&raster),
                None => raster,
            };
            let result = convert::convert(&raster, &format, &out_dir, &file_stem(&file)?)?;
            if result.fell_back {
                println!("Wrote {} (PNG fallback)", result.path.display());
            } else {
                println!("Wrote {}", result.path.display());
            }
        }
        Command::Batch {
            files,
            format,
            filter,
            out_dir,
            threads,
        } => {
            let format = OutputFormat::parse(&format)?;
            let filter = filter.map(|name| filters::create(&name)).transpose()?;
            init_thread_pool(threads);

            let requests: Vec<BatchRequest> = files
                .into_iter()
                .map(|source| BatchRequest {
                    source,
                    filter,
                    format,
                })
                .collect();

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    match event {
                        BatchEvent::Started { source } => {
                            println!("  {}", source.display());
                        }
                        BatchEvent::Converted {
                            output, fell_back, ..
                        } => {
                            if fell_back {
                                println!("  -> {} (PNG fallback)", output.display());
                            } else {
                                println!("  -> {}", output.display());
                            }
                        }
                        BatchEvent::Failed { source, message } => {
                            eprintln!("  !! {}: {message}", source.display());
                        }
                    }
                }
            });

            let summary = run_batch(&requests, &out_dir, &tx);
            drop(tx);
            printer.join().expect("printer thread panicked");

            println!(
                "Converted {} ({} via PNG fallback), {} failed",
                summary.converted, summary.fallbacks, summary.failed
            );
            if summary.failed > 0 {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool for batch conversion.
///
/// Caps at the number of available CPU cores — user can constrain down,
/// not up.
fn init_thread_pool(requested: Option<usize>) {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let threads = requested.map_or(cores, |t| t.clamp(1, cores));
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

/// Base name of the source file, without its extension.
fn file_stem(path: &std::path::Path) -> Result<String, Box<dyn std::error::Error>> {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| format!("No file name in {}", path.display()).into())
}

/// Filter display name as a filename-safe suffix ("Black and White" ->
/// "black-and-white").
fn slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}
