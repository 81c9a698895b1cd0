//! Command-line interface for huemri medical image pseudo-coloring.

use clap::{Args, Parser, Subcommand, ValueEnum};
use huemri::{
    fit_to_preview, has_supported_extension, load_grayscale, Colorizer, Modality,
    ModalityProfile, ProcessingParams, SubType, DEFAULT_PREVIEW_SIZE,
};
use std::path::PathBuf;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "huemri")]
#[command(about = "Pseudo-color enhancement for grayscale MRI, X-ray and CT images")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Colorize an image.
    Colorize(CliColorizeArgs),

    /// List the palettes offered for each modality.
    Colormaps {
        /// Only list palettes for this modality.
        #[arg(long, value_enum)]
        modality: Option<ModalityArg>,
    },

    /// Print the per-modality enhancement table.
    Profiles,
}

#[derive(Debug, Clone, Args)]
struct CliColorizeArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Path to write the colorized image (format from extension).
    #[arg(long)]
    out: PathBuf,

    /// Parameters file (JSON). Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Imaging modality. Switching modality resets the sub-type to its default.
    #[arg(long, value_enum)]
    modality: Option<ModalityArg>,

    /// Acquisition sub-type; must belong to the modality.
    #[arg(long, value_enum)]
    sub_type: Option<SubTypeArg>,

    /// Palette name (crystal, medical, gray, bone, hot, cool, copper,
    /// viridis, plasma, inferno, magma).
    #[arg(long)]
    colormap: Option<String>,

    /// Weight of the enhanced gray image in the output, clamped to [0, 1].
    #[arg(long)]
    blend: Option<f64>,

    /// Gamma before the modality multiplier, clamped to [0.1, 3.0].
    #[arg(long)]
    gamma: Option<f64>,

    /// Skip contrast enhancement where the sub-type allows it.
    #[arg(long)]
    no_enhance: bool,

    /// Path to write the processing report (JSON).
    #[arg(long)]
    report: Option<PathBuf>,

    /// Path to write a downscaled preview image.
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Longest side of the preview in pixels.
    #[arg(long, default_value_t = DEFAULT_PREVIEW_SIZE)]
    preview_size: u32,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModalityArg {
    Mri,
    Xray,
    Ct,
}

impl ModalityArg {
    fn to_core(self) -> Modality {
        match self {
            Self::Mri => Modality::Mri,
            Self::Xray => Modality::Xray,
            Self::Ct => Modality::Ct,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SubTypeArg {
    #[value(name = "1.5t", alias = "1.5T")]
    Field1_5T,
    #[value(name = "3t", alias = "3T")]
    Field3T,
    Standard,
    Highres,
    Lowdose,
}

impl SubTypeArg {
    fn to_core(self) -> SubType {
        match self {
            Self::Field1_5T => SubType::Field1_5T,
            Self::Field3T => SubType::Field3T,
            Self::Standard => SubType::Standard,
            Self::Highres => SubType::HighRes,
            Self::Lowdose => SubType::LowDose,
        }
    }
}

impl CliColorizeArgs {
    fn to_params(&self) -> CliResult<ProcessingParams> {
        let mut params = match &self.config {
            Some(path) => ProcessingParams::from_json_file(path)?,
            None => ProcessingParams::default(),
        };

        if let Some(m) = self.modality {
            let m = m.to_core();
            if m != params.modality {
                params.modality = m;
                params.sub_type = m.default_sub_type();
            }
        }
        if let Some(s) = self.sub_type {
            params.sub_type = s.to_core();
        }
        if let Some(name) = &self.colormap {
            params.colormap = name.parse()?;
        }
        if let Some(blend) = self.blend {
            params.blend = blend;
        }
        if let Some(gamma) = self.gamma {
            params.gamma = gamma;
        }
        if self.no_enhance {
            params.enhance = false;
        }

        Ok(params.validated()?)
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Colorize(args) => run_colorize(&args),
        Commands::Colormaps { modality } => run_colormaps(modality.map(ModalityArg::to_core)),
        Commands::Profiles => run_profiles(),
    }
}

// ── colormaps ──────────────────────────────────────────────────────────

fn run_colormaps(only: Option<Modality>) -> CliResult<()> {
    let modalities: Vec<Modality> = match only {
        Some(m) => vec![m],
        None => Modality::ALL.to_vec(),
    };
    for m in modalities {
        let names: Vec<&str> = m.colormaps().iter().map(|c| c.name()).collect();
        println!("{m}");
        println!("  palettes:  {}", names.join(", "));
        println!("  {}", m.crystal_description());
    }
    Ok(())
}

// ── profiles ───────────────────────────────────────────────────────────

fn run_profiles() -> CliResult<()> {
    println!(
        "{:<8} {:<10} {:>10} {:>12} {:>16}",
        "modality", "sub-type", "clip", "gamma x", "always enhance"
    );
    for m in Modality::ALL {
        for &s in m.sub_types() {
            let p = ModalityProfile::lookup(m, s)?;
            println!(
                "{:<8} {:<10} {:>10.2} {:>12.1} {:>16}",
                m.to_string(),
                s.to_string(),
                p.clip_limit,
                p.gamma_scale,
                if p.always_enhance { "yes" } else { "no" }
            );
        }
    }
    Ok(())
}

// ── colorize ───────────────────────────────────────────────────────────

fn run_colorize(args: &CliColorizeArgs) -> CliResult<()> {
    let params = args.to_params()?;

    if !has_supported_extension(&args.image) {
        tracing::warn!(
            "{} does not have a recognized image extension; trying anyway",
            args.image.display()
        );
    }
    tracing::info!("Loading image: {}", args.image.display());
    let gray = load_grayscale(&args.image)?;
    let (w, h) = gray.dimensions();
    tracing::info!("Image size: {}x{}", w, h);

    let processed = Colorizer::with_params(params).process(&gray)?;

    processed.image.save(&args.out)?;
    tracing::info!("Colorized image written to {}", args.out.display());

    if let Some(report_path) = &args.report {
        let json = serde_json::to_string_pretty(&processed.report)?;
        std::fs::write(report_path, &json)?;
        tracing::info!("Report written to {}", report_path.display());
    }

    if let Some(preview_path) = &args.preview {
        let preview = fit_to_preview(&processed.image, args.preview_size);
        preview.save(preview_path)?;
        tracing::info!(
            "Preview ({}x{}) written to {}",
            preview.width(),
            preview.height(),
            preview_path.display()
        );
    }

    Ok(())
}
