use chameleon::quantize::unpack_argb;
use chameleon::{Chameleon, KeyColorParams};
use clap::{Parser, ValueEnum};
use image::ImageReader;
use std::error::Error;
use std::io::{stdout, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    /// Opaque photographs and artwork
    Image,
    /// Icons and semi-transparent art
    Icon,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Role name, color and luminance
    Text,
    /// Color only
    Hex,
}

/// Extract key theme colors from an image
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Input image path
    img: PathBuf,

    /// Selection weights
    #[arg(long, value_enum, default_value_t = Preset::Image)]
    preset: Preset,

    /// Skip mostly transparent pixels
    #[arg(long)]
    alpha: bool,

    /// Keep the selected foregrounds even when they lack contrast
    #[arg(long)]
    no_contrast: bool,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log pipeline details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let img = ImageReader::open(&args.img)?.decode()?.to_rgba8();
    info!(width = img.width(), height = img.height(), "decoded image");

    let params = match args.preset {
        Preset::Image => KeyColorParams::IMAGE,
        Preset::Icon => KeyColorParams::ICON,
    };
    let mut chameleon = Chameleon::new()?;
    chameleon.process_rgba_image(&img, args.alpha)?;
    chameleon.find_key_colors(&params, !args.no_contrast);

    let mut stdout = stdout().lock();
    for (role, color) in chameleon.palette() {
        let [r, g, b, _] = unpack_argb(color).0;
        match args.format {
            Format::Text => writeln!(
                stdout,
                "{:<12}#{r:02x}{g:02x}{b:02x} {:.3}",
                role.name(),
                chameleon.luminance(role)
            )?,
            Format::Hex => writeln!(stdout, "#{r:02x}{g:02x}{b:02x}")?,
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("{}: {e}", args.img.to_string_lossy());
        std::process::exit(1);
    }
}
