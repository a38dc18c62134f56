//! # Naranja CLI
//!
//! Command-line interface for BVR/ESR payment-slip generation.
//!
//! ## Usage
//!
//! ```bash
//! # Print the 27-digit reference for a payment context
//! naranja reference context.json
//!
//! # Print the reference grouped for display
//! naranja reference --grouped context.json
//!
//! # Print the OCR scan line (or its positioned markup)
//! naranja scan-line context.json
//! naranja scan-line --markup context.json
//!
//! # Check that a context is printable
//! naranja validate context.json
//!
//! # Render the slip image (reads fonts/templates from --assets)
//! naranja render --assets ./assets --out slip.png context.json
//! ```
//!
//! The context file holds a JSON [`PaymentContext`]; `-` reads it from
//! standard input.

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use naranja::assets::FsAssets;
use naranja::{PaymentContext, Slip, SlipError, scanline};

/// Naranja - Swiss BVR/ESR payment slip utility
#[derive(Parser, Debug)]
#[command(name = "naranja")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the 27-digit structured reference
    Reference {
        /// Payment context JSON file ('-' for stdin)
        context: PathBuf,

        /// Group digits in blocks for display
        #[arg(long)]
        grouped: bool,
    },

    /// Print the OCR scan line
    ScanLine {
        /// Payment context JSON file ('-' for stdin)
        context: PathBuf,

        /// Emit the positioned overlay markup instead of the plain line
        #[arg(long)]
        markup: bool,
    },

    /// Check that the context is printable
    Validate {
        /// Payment context JSON file ('-' for stdin)
        context: PathBuf,
    },

    /// Render the slip image as PNG
    Render {
        /// Payment context JSON file ('-' for stdin)
        context: PathBuf,

        /// Directory holding the OCR-B font and slip templates
        #[arg(long, default_value = "assets")]
        assets: PathBuf,

        /// Output PNG path
        #[arg(long, value_name = "FILE", default_value = "slip.png")]
        out: PathBuf,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), SlipError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Reference { context, grouped } => {
            let ctx = read_context(&context)?;
            let slip = Slip::compute(&ctx);
            if slip.reference.is_empty() {
                eprintln!("Line {} is not eligible for a BVR reference", ctx.line_id);
            } else if grouped {
                println!("{}", scanline::group(&slip.reference, 5));
            } else {
                println!("{}", slip.reference);
            }
        }

        Commands::ScanLine { context, markup } => {
            let ctx = read_context(&context)?;
            let slip = Slip::compute(&ctx);
            if slip.scan_line.is_empty() {
                eprintln!("Line {} is not eligible for a scan line", ctx.line_id);
            } else if markup {
                println!("{}", slip.scan_line_markup);
            } else {
                println!("{}", slip.scan_line);
            }
        }

        Commands::Validate { context } => {
            let ctx = read_context(&context)?;
            naranja::validate(&ctx)?;
            println!("Line {} is printable", ctx.line_id);
        }

        Commands::Render {
            context,
            assets,
            out,
        } => {
            let ctx = read_context(&context)?;
            let provider = FsAssets::new(assets);
            let slip = Slip::compute(&ctx);
            let png = slip.render_image(&ctx, &provider)?;
            std::fs::write(&out, png)?;
            println!("Saved to {}", out.display());
        }
    }

    Ok(())
}

/// Read and parse a payment context from a file, or stdin for `-`.
fn read_context(path: &PathBuf) -> Result<PaymentContext, SlipError> {
    let data = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };

    serde_json::from_str(&data)
        .map_err(|e| SlipError::Context(format!("{}: {}", path.display(), e)))
}
