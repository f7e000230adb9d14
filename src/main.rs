use accident_severity::session::{insights_section, model_load_message, render_outcome};
use accident_severity::{Config, ModelArtifact, Predictor, RawSelections, Session, encode};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::{LevelFilter, error, info};
use std::io;
use std::path::{Path, PathBuf};

/// Command-line arguments
#[derive(Parser)]
#[command(
    name = "accident-severity",
    about = "🚗 Accident Severity Prediction System",
    long_about = "Predict how severe an accident could be based on various real-world factors, \
                  using a pre-trained classifier, and summarize the accident dataset."
)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Model artifact path, overrides the configuration file
    #[arg(short, long, value_name = "FILE")]
    model: Option<PathBuf>,

    /// Accident dataset path, overrides the configuration file
    #[arg(short, long, value_name = "FILE")]
    dataset: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Prompt for accident details and predict repeatedly (default)
    Interactive,
    /// Predict once from command-line flags
    Predict(PredictArgs),
    /// Print the dataset insights only
    Insights,
}

#[derive(Args)]
struct PredictArgs {
    /// Day of week (Monday..Sunday)
    #[arg(long)]
    day: String,

    /// Light conditions (Daylight or Darkness)
    #[arg(long)]
    light: String,

    /// Sex of driver (0=Male, 1=Female)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=1))]
    sex: u8,

    /// Vehicle type
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
    vehicle: u8,

    /// Speed limit in km/h
    #[arg(long, value_parser = clap::value_parser!(u16).range(20..=120))]
    speed: u16,

    /// Pedestrian crossing
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=5))]
    pedestrian: u8,

    /// Road type
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=6))]
    road: u8,

    /// Special conditions at site
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=3))]
    special: u8,

    /// Number of passengers
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    passengers: u8,
}

impl From<PredictArgs> for RawSelections {
    fn from(args: PredictArgs) -> Self {
        RawSelections {
            day: args.day,
            light: args.light,
            sex_of_driver: args.sex,
            vehicle_type: args.vehicle,
            speed_limit: args.speed,
            pedestrian_crossing: args.pedestrian,
            road_type: args.road,
            special_conditions: args.special,
            number_of_passengers: args.passengers,
        }
    }
}

/// Loads the model once; without it no prediction can be served, so the
/// process stops here.
fn load_predictor(path: &Path) -> Predictor<ModelArtifact> {
    println!("📦 Loading model from {:?}", path);
    match ModelArtifact::load_from_file(path) {
        Ok(model) => Predictor::new(model),
        Err(e) => {
            error!("Failed to load model from {:?}: {}", path, e);
            println!("{}", model_load_message(path, &e));
            std::process::exit(1);
        }
    }
}

fn show_insights(path: &Path) {
    println!("\n{}", "-".repeat(60));
    println!("{}", insights_section(path));
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let mut config =
        Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(model) = cli.model {
        config.model_path = model;
    }
    if let Some(dataset) = cli.dataset {
        config.dataset_path = dataset;
    }
    info!("Using model {:?} and dataset {:?}", config.model_path, config.dataset_path);

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Insights => show_insights(&config.dataset_path),
        Command::Predict(args) => {
            let predictor = load_predictor(&config.model_path);
            let features = encode(&args.into()).context("Invalid accident details")?;
            let outcome = predictor.predict(&features);
            println!("{}", render_outcome(&outcome));
            show_insights(&config.dataset_path);
            if outcome.is_err() {
                std::process::exit(1);
            }
        }
        Command::Interactive => {
            let predictor = load_predictor(&config.model_path);
            println!("🚗 Accident Severity Prediction System");
            println!("Predict how severe an accident could be based on various real-world factors.");
            show_insights(&config.dataset_path);

            let stdin = io::stdin();
            let mut session = Session::new(stdin.lock(), io::stdout(), config.default_speed_limit);
            let served = session.run(&predictor)?;
            info!("Served {} predictions", served);
        }
    }

    Ok(())
}
