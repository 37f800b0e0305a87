use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use photo_restore_lib::{
    build_restore_prompt, read_image_as_data_url, restore_photo, save_data_url, swap_faces, Age,
    Flow, Gender, Preset, RestoreSettings, ServiceConfig, Smile, MAX_RESULTS, MIN_RESULTS,
};

#[derive(Parser)]
#[command(
    name = "photo-restore",
    about = "Restore old photographs and swap faces with the Gemini image model",
    version,
    after_help = "The API key is read from API_KEY (or GEMINI_API_KEY), optionally via a .env file."
)]
struct Cli {
    /// Override the Gemini models endpoint
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Override the image model
    #[arg(long, global = true)]
    model: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Restore an old or damaged photo
    Restore(RestoreArgs),
    /// Put the face from one photo onto the person in another
    Swap {
        /// Photo with the face to use
        source: PathBuf,
        /// Photo whose body and background are kept
        target: PathBuf,
        /// Directory the result is written to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },
}

#[derive(Args)]
#[allow(clippy::struct_excessive_bools)]
struct RestoreArgs {
    /// Photo to restore
    image: PathBuf,

    /// Directory results are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Start from a JSON settings file instead of blank settings
    #[arg(long, conflicts_with = "recommended")]
    settings: Option<PathBuf>,

    /// Start from the recommended settings
    #[arg(long)]
    recommended: bool,

    /// Apply a preset on top of the starting settings
    #[arg(long)]
    preset: Option<Preset>,

    #[arg(long)]
    colorize: bool,
    #[arg(long)]
    high_quality: bool,
    #[arg(long)]
    redraw_hair: bool,
    #[arg(long)]
    sharpen_background: bool,
    #[arg(long)]
    stick_to_face: bool,
    #[arg(long)]
    sharpen_wrinkles: bool,
    /// Subjects are likely Vietnamese
    #[arg(long)]
    vietnamese: bool,
    #[arg(long)]
    redraw_clothing: bool,
    #[arg(long)]
    sharpen: bool,

    /// Automatic, Male or Female
    #[arg(long)]
    gender: Option<Gender>,
    /// Automatic, Child, young-adult, Adult or Senior
    #[arg(long)]
    age: Option<Age>,
    /// Automatic, add-smile or Neutral
    #[arg(long)]
    smile: Option<Smile>,

    /// Free-text request appended to the prompt
    #[arg(long)]
    prompt: Option<String>,

    /// Number of results to generate (1-5)
    #[arg(long)]
    results: Option<u8>,

    /// Print the generated prompt and exit without calling the API
    #[arg(long)]
    print_prompt: bool,
}

impl RestoreArgs {
    fn to_settings(&self) -> anyhow::Result<RestoreSettings> {
        let mut settings = match &self.settings {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Unable to read settings file '{}'", path.display()))?;
                serde_json::from_str(&raw).with_context(|| {
                    format!("Unable to parse settings file '{}'", path.display())
                })?
            }
            None if self.recommended => RestoreSettings::recommended(),
            None => RestoreSettings::default(),
        };

        if let Some(preset) = self.preset {
            settings = settings.apply_preset(preset);
        }

        settings.colorize |= self.colorize;
        settings.high_quality |= self.high_quality;
        settings.redraw_hair |= self.redraw_hair;
        settings.sharpen_background |= self.sharpen_background;
        settings.stick_to_face_details |= self.stick_to_face;
        settings.sharpen_wrinkles |= self.sharpen_wrinkles;
        settings.is_vietnamese |= self.vietnamese;
        settings.redraw_clothing |= self.redraw_clothing;
        settings.sharpen |= self.sharpen;

        if let Some(gender) = self.gender {
            settings.gender = gender;
        }
        if let Some(age) = self.age {
            settings.age = age;
        }
        if let Some(smile) = self.smile {
            settings.smile = smile;
        }
        if let Some(prompt) = &self.prompt {
            settings.advanced_prompt = prompt.clone();
        }
        if let Some(results) = self.results {
            settings = settings.with_num_results(results);
            if settings.num_results != results {
                tracing::warn!(
                    requested = results,
                    using = settings.num_results,
                    "--results is limited to {MIN_RESULTS}..={MAX_RESULTS}"
                );
            }
        }

        Ok(settings)
    }
}

fn service_config(cli: &Cli) -> ServiceConfig {
    let mut config = ServiceConfig::from_env();
    if let Some(endpoint) = &cli.endpoint {
        config = config.with_endpoint(endpoint);
    }
    if let Some(model) = &cli.model {
        config = config.with_model(model);
    }
    config
}

async fn run_restore(config: &ServiceConfig, args: &RestoreArgs) -> anyhow::Result<()> {
    let settings = args.to_settings()?;

    if args.print_prompt {
        println!("{}", build_restore_prompt(&settings));
        return Ok(());
    }

    let image = read_image_as_data_url(&args.image).await?;
    let count = settings.result_count();

    for attempt in 1..=count {
        tracing::info!(attempt, count, image = %args.image.display(), "restoring photo");
        let result = restore_photo(config, &image, &settings).await?;
        let path = save(&args.output_dir, Flow::Restore, &result).await?;
        println!("{}", path.display());
    }
    Ok(())
}

async fn run_swap(
    config: &ServiceConfig,
    source: &Path,
    target: &Path,
    output_dir: &Path,
) -> anyhow::Result<()> {
    let source_image = read_image_as_data_url(source).await?;
    let target_image = read_image_as_data_url(target).await?;

    tracing::info!(source = %source.display(), target = %target.display(), "swapping faces");
    let result = swap_faces(config, &source_image, &target_image).await?;
    let path = save(output_dir, Flow::FaceSwap, &result).await?;
    println!("{}", path.display());
    Ok(())
}

async fn save(output_dir: &Path, flow: Flow, data_url: &str) -> anyhow::Result<PathBuf> {
    Ok(save_data_url(output_dir, flow.download_file_name(), data_url).await?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG, when set, replaces the defaults entirely.
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "photo_restore={level},photo_restore_lib={level},llmapi={level}"
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = service_config(&cli);

    match &cli.command {
        Commands::Restore(args) => run_restore(&config, args).await,
        Commands::Swap {
            source,
            target,
            output_dir,
        } => run_swap(&config, source, target, output_dir).await,
    }
}
