use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use facade_style::pipeline::orchestration::{
    catalog_listing, ensure_style_offered, write_composite,
};
use facade_style::{
    AppError, Configuration, DesignPipelineBuilder, DesignReport, MaskDirectorySegmenter,
    StyleCatalog,
};
use tracing::{error, info, Level};

#[derive(Parser, Debug)]
#[command(name = "facade-style", about = "Restyle the segmented elements of a house exterior")]
struct CliArgs {
    /// Configuration file (defaults to ./facade-style.toml when present)
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a design style to an image and its masks
    Apply(ApplyArgs),
    /// Print the styles and regions offered by a style library
    ListStyles {
        /// Style library JSON
        #[clap(long)]
        style_library: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ApplyArgs {
    /// Path to the input image
    #[clap(long)]
    pub input: PathBuf,

    /// Where to save the fully styled image
    #[clap(long)]
    pub output_styled: PathBuf,

    /// Where to save the blend of original and styled images
    #[clap(long)]
    pub output_blended: PathBuf,

    /// Design style to apply
    #[clap(long)]
    pub style: String,

    /// Style library JSON
    #[clap(long)]
    pub style_library: PathBuf,

    /// Directory of mask images exported by the segmentation model
    #[clap(long)]
    pub masks: PathBuf,

    /// Weight of the styled image in the blend, 0.0 to 1.0 (default 0.5)
    #[clap(long)]
    pub blend_alpha: Option<f32>,

    /// Seed for style selection; unseeded runs pick differently each time
    #[clap(long)]
    pub seed: Option<u64>,

    /// Optional JSON report of the chosen styles
    #[clap(long)]
    pub report: Option<PathBuf>,
}

fn init_logging(log_level: &str) {
    let level = Level::from_str(log_level).unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();
}

fn main() -> Result<(), AppError> {
    let cli_args = CliArgs::parse();
    let configuration = Configuration::load(cli_args.config.as_deref())?;
    init_logging(&configuration.log_level);

    let result = match cli_args.command {
        Command::Apply(args) => apply(args, configuration),
        Command::ListStyles { style_library } => list_styles(style_library),
    };
    if let Err(e) = &result {
        error!("Processing failed: {}", e);
    }
    result
}

fn list_styles(style_library: PathBuf) -> Result<(), AppError> {
    let catalog = StyleCatalog::load(&style_library)?;
    println!("{}", catalog_listing(&catalog));
    Ok(())
}

fn apply(args: ApplyArgs, configuration: Configuration) -> Result<(), AppError> {
    info!("Loading style library from {}", args.style_library.display());
    let catalog = Arc::new(StyleCatalog::load(&args.style_library)?);
    ensure_style_offered(&catalog, &args.style)?;

    let blend_alpha = args.blend_alpha.unwrap_or(configuration.blend_alpha);
    let seed = args.seed.or(configuration.seed);
    if seed.is_none() {
        info!("No seed given, style selection will differ between runs");
    }

    let mut pipeline = DesignPipelineBuilder::new(configuration)
        .catalog(catalog.clone())
        .blend_alpha(blend_alpha)
        .seed(seed)
        .build()?;

    info!("Processing input image: {}", args.input.display());
    let image = image::open(&args.input)?.to_rgb8();

    let segmenter = MaskDirectorySegmenter::new(args.masks);
    let outcome = pipeline.process(&segmenter, &image, &args.style)?;

    write_composite(&outcome.composite, &args.output_styled, &args.output_blended)?;

    if let Some(report_path) = args.report {
        DesignReport::new(&outcome, &catalog, blend_alpha).write_to(&report_path)?;
        info!("Saved design report to {}", report_path.display());
    }

    info!("Processing completed successfully.");
    Ok(())
}
