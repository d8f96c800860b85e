//! nutrilens: food photo nutrition CLI
//!
//! Classifies food photos and prints goal-aware nutrition advice.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args as ClapArgs, Parser, Subcommand};
use nutrilens::catalog;
use nutrilens::{
    Config, ConsumedState, GoalKind, ImageInput, NutritionPredictor, PredictionEnvelope,
    SuggestionKind, SuggestionReport,
};

/// Nutrilens CLI
#[derive(Parser)]
#[command(name = "nutrilens")]
#[command(version = nutrilens::PKG_VERSION)]
#[command(about = "Food photo recognition with goal-aware nutrition advice")]
struct Args {
    /// Config file (default: ~/.nutrilens/config.toml, then /etc/nutrilens/config.toml)
    #[arg(short, long, env = "NUTRILENS_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a food photo and build its report
    Predict {
        /// Image file (PNG, JPEG or BMP)
        image: PathBuf,
        #[command(flatten)]
        intake: Intake,
    },

    /// Build the report for a known food
    Suggest {
        /// Food category (see `nutrilens foods`)
        food: String,
        #[command(flatten)]
        intake: Intake,
    },

    /// List recognised foods and their nutrition per serving
    Foods,

    /// List dietary goals
    Goals,
}

/// Goal and what was already eaten today.
#[derive(ClapArgs)]
struct Intake {
    /// Dietary goal: weight_loss, maintenance or muscle_gain (default from config)
    #[arg(short, long)]
    goal: Option<String>,
    /// Calories consumed so far today
    #[arg(long, default_value_t = 0.0)]
    calories: f64,
    /// Protein consumed so far today, in grams
    #[arg(long, default_value_t = 0.0)]
    protein: f64,
    /// Carbohydrates consumed so far today, in grams
    #[arg(long, default_value_t = 0.0)]
    carbs: f64,
    /// Fat consumed so far today, in grams
    #[arg(long, default_value_t = 0.0)]
    fat: f64,
}

impl Intake {
    fn consumed(&self) -> ConsumedState {
        ConsumedState {
            calories: self.calories,
            protein_g: self.protein,
            carbs_g: self.carbs,
            fat_g: self.fat,
        }
    }

    fn goal(&self, config: &Config) -> String {
        self.goal.clone().unwrap_or_else(|| config.defaults.goal.clone())
    }
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!(
        version = %nutrilens::version_string(),
        built = nutrilens::version::BUILD_TIMESTAMP,
        local_inference = nutrilens::version::local_inference_enabled(),
        "starting"
    );

    match args.command {
        Command::Foods => print_foods(args.json)?,
        Command::Goals => print_goals(args.json)?,

        Command::Predict { image, intake } => {
            let (config, predictor) = load(args.config.as_deref())?;
            let consumed = intake.consumed();
            let envelope = predictor.predict(
                &ImageInput::Path(image),
                &intake.goal(&config),
                Some(consumed),
            )?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&envelope)?);
            } else {
                print_envelope(&envelope, &consumed);
            }
            if !envelope.success {
                return Ok(ExitCode::FAILURE);
            }
        }

        Command::Suggest { food, intake } => {
            let (config, predictor) = load(args.config.as_deref())?;
            let consumed = intake.consumed();
            let Some(report) =
                predictor.dietary_suggestions(&food, &intake.goal(&config), Some(consumed))?
            else {
                eprintln!("unknown food: {food} (see `nutrilens foods`)");
                return Ok(ExitCode::FAILURE);
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report, &consumed);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Config and predictor for the commands that run the pipeline.
fn load(path: Option<&Path>) -> nutrilens::Result<(Config, NutritionPredictor)> {
    let config = Config::load(path)?;
    let predictor = NutritionPredictor::from_config(&config)?;
    Ok((config, predictor))
}

fn print_foods(json: bool) -> serde_json::Result<()> {
    if json {
        let table: serde_json::Map<String, serde_json::Value> = catalog::nutrition_table()
            .iter()
            .map(|(name, profile)| Ok(((*name).to_string(), serde_json::to_value(profile)?)))
            .collect::<serde_json::Result<_>>()?;
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }
    println!(
        "{:<10} {:>8} {:>9} {:>8} {:>7} {:>7}",
        "food", "kcal", "protein", "carbs", "fat", "fiber"
    );
    for (name, p) in catalog::nutrition_table() {
        println!(
            "{:<10} {:>8.0} {:>8.1}g {:>7.1}g {:>6.1}g {:>6.1}g",
            name, p.calories, p.protein_g, p.carbs_g, p.fat_g, p.fiber_g
        );
    }
    Ok(())
}

fn print_goals(json: bool) -> serde_json::Result<()> {
    if json {
        let goals: serde_json::Map<String, serde_json::Value> = GoalKind::ALL
            .iter()
            .map(|goal| Ok((goal.name().to_string(), serde_json::to_value(goal.profile())?)))
            .collect::<serde_json::Result<_>>()?;
        println!("{}", serde_json::to_string_pretty(&goals)?);
        return Ok(());
    }
    for goal in GoalKind::ALL {
        let p = goal.profile();
        println!(
            "{:<12} {:>5} kcal  protein {:>3.0}%  carbs {:>3.0}%  fat {:>3.0}%  {}",
            goal.name(),
            p.daily_calories,
            p.protein_ratio * 100.0,
            p.carbs_ratio * 100.0,
            p.fat_ratio * 100.0,
            p.description
        );
    }
    Ok(())
}

fn print_envelope(envelope: &PredictionEnvelope, consumed: &ConsumedState) {
    if !envelope.success {
        println!(
            "error: {}",
            envelope.error.as_deref().unwrap_or("prediction failed")
        );
        return;
    }
    println!(
        "food: {} ({:.1}% confidence)",
        envelope.food_type.as_deref().unwrap_or("unknown"),
        envelope.confidence.unwrap_or(0.0) * 100.0
    );
    match &envelope.suggestions {
        Some(report) => print_report(report, consumed),
        None => println!("no nutrition data for this food"),
    }
}

fn print_report(report: &SuggestionReport, consumed: &ConsumedState) {
    let n = &report.nutrition;
    println!(
        "{}: {:.0} kcal, protein {:.1}g, carbs {:.1}g, fat {:.1}g, fiber {:.1}g",
        report.food_type, n.calories, n.protein_g, n.carbs_g, n.fat_g, n.fiber_g
    );
    println!("goal: {} ({})", report.goal, report.goal_description);

    // Unknown goals were reported against the maintenance targets.
    let goal = GoalKind::from_name(&report.goal).unwrap_or_default().profile();
    println!(
        "before meal: {:.0} kcal left, {:.0}% of daily target",
        goal.remaining_before_meal(consumed),
        goal.progress(consumed) * 100.0
    );
    println!(
        "after meal: {:.0} / {} kcal, {:.0}% of daily target",
        report.after_meal.calories,
        report.daily_target,
        goal.progress(&report.after_meal) * 100.0
    );
    let r = &report.remaining;
    println!(
        "remaining: {:.0} kcal, protein {:.1}g, carbs {:.1}g, fat {:.1}g",
        r.calories, r.protein_g, r.carbs_g, r.fat_g
    );
    for line in &report.suggestions {
        println!("[{}] {line}", SuggestionKind::classify(line).tag());
    }
}
