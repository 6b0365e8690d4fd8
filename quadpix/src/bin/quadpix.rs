//! # quadpix command-line driver
//!
//! ```bash
//! # Approximate an image and write both outputs
//! quadpix build photo.ppm --max-rmse 12 --ppm approx.ppm --preorder tree.qt
//!
//! # Render a stored tree
//! quadpix render tree.qt approx.ppm
//!
//! # Steganography
//! quadpix hide-message cover.ppm stego.ppm "meet at noon"
//! quadpix reveal-message stego.ppm
//! quadpix hide-image cover.ppm logo.ppm stego.ppm
//! quadpix reveal-image stego.ppm logo_out.ppm
//! ```
//!
//! Logging goes to stderr. `-v` raises the level to debug, `-vv` to
//! trace; `RUST_LOG` overrides both.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::LevelFilter;
use std::path::PathBuf;

use quadpix::region::{PreorderFormat, QuadTree, QuadtreeOptions, SplitPolicy};
use quadpix::{io, region, stego};

#[derive(Parser, Debug)]
#[command(name = "quadpix")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a quadtree from a PPM image
    Build {
        /// Input image (plain PPM)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Largest RMSE a leaf region may have
        #[arg(long, default_value = "0")]
        max_rmse: f64,

        /// Write the rendered approximation here
        #[arg(long, value_name = "OUT")]
        ppm: Option<PathBuf>,

        /// Write the preorder dump here
        #[arg(long, value_name = "OUT")]
        preorder: Option<PathBuf>,

        /// Write six-field lines without child masks
        #[arg(long)]
        plain: bool,

        /// Split single rows/columns into first-slot pairs
        #[arg(long)]
        linear_pairs: bool,
    },

    /// Render a preorder dump to PPM
    Render {
        #[arg(value_name = "PREORDER")]
        preorder: PathBuf,
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },

    /// Hide a text message in a cover image
    HideMessage {
        #[arg(value_name = "COVER")]
        cover: PathBuf,
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
        #[arg(value_name = "MESSAGE")]
        message: String,
    },

    /// Print the message hidden in an image
    RevealMessage {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Hide a small image inside a cover image
    HideImage {
        #[arg(value_name = "COVER")]
        cover: PathBuf,
        #[arg(value_name = "SECRET")]
        secret: PathBuf,
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },

    /// Extract a hidden image
    RevealImage {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    match args.command {
        Command::Build {
            input,
            max_rmse,
            ppm,
            preorder,
            plain,
            linear_pairs,
        } => {
            let image = io::read_image(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let split = if linear_pairs {
                SplitPolicy::LinearPairs
            } else {
                SplitPolicy::Quadrants
            };
            let options = QuadtreeOptions::new(max_rmse).with_split(split);
            let tree = region::build_quadtree_with_options(&image, &options)?;
            println!(
                "{}x{}: {} nodes, {} leaves, depth {}",
                tree.width(),
                tree.height(),
                tree.node_count(),
                tree.leaf_count(),
                tree.depth()
            );

            if let Some(path) = ppm {
                region::flatten_to_ppm(&tree, &path)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
            if let Some(path) = preorder {
                let format = if plain {
                    PreorderFormat::Plain
                } else {
                    PreorderFormat::Masked
                };
                tree.write_preorder_to_file(&path, format)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
        }
        Command::Render { preorder, output } => {
            let tree = QuadTree::read_preorder_from_file(&preorder)
                .with_context(|| format!("failed to load {}", preorder.display()))?;
            region::flatten_to_ppm(&tree, &output)
                .with_context(|| format!("failed to write {}", output.display()))?;
        }
        Command::HideMessage {
            cover,
            output,
            message,
        } => {
            let hidden = stego::hide_message_file(&message, &cover, &output)?;
            println!("hid {} of {} bytes", hidden, message.len());
        }
        Command::RevealMessage { input } => {
            let message = stego::reveal_message_file(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            println!("{message}");
        }
        Command::HideImage {
            cover,
            secret,
            output,
        } => {
            stego::hide_image_file(&secret, &cover, &output)?;
        }
        Command::RevealImage { input, output } => {
            stego::reveal_image_file(&input, &output)?;
        }
    }

    Ok(())
}
