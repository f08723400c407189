use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use gluco_core::*;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "sugarpilot")]
#[command(about = "AI-assisted insulin dose calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate an insulin dose for a meal
    Dose {
        /// Free-text meal description
        #[arg(required = true)]
        meal: Vec<String>,

        /// Pre-meal blood glucose in mg/dL
        #[arg(long)]
        glucose: Option<i64>,

        /// Manual carb grams (repeatable); skips the AI meal parser
        #[arg(long, value_name = "GRAMS")]
        carbs: Vec<f64>,

        /// Compute without recording to history
        #[arg(long)]
        dry_run: bool,

        /// Print the shareable summary block
        #[arg(long)]
        share: bool,
    },

    /// Inspect or manage past calculations
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },

    /// Inspect or change the dosing profile
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List recorded calculations, newest first (default)
    List,
    /// Remove one entry by id
    Remove { id: Uuid },
    /// Remove all entries
    Clear,
    /// Export history to a CSV file
    Export { path: PathBuf },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show the current profile
    Show,
    /// Update numeric constants
    Set {
        /// Total daily dose in units
        #[arg(long)]
        tdd: Option<f64>,

        /// CCR numerator constant
        #[arg(long)]
        ccr: Option<f64>,

        /// ISF numerator constant
        #[arg(long)]
        isf: Option<f64>,
    },
    /// Switch insulin type (resets the ISF constant to its preset)
    Insulin { kind: InsulinArg },
    /// Set the UI theme flag
    Theme { theme: ThemeArg },
}

#[derive(Clone, Copy, ValueEnum)]
enum InsulinArg {
    Rapid,
    Regular,
}

impl From<InsulinArg> for InsulinType {
    fn from(arg: InsulinArg) -> Self {
        match arg {
            InsulinArg::Rapid => InsulinType::Rapid,
            InsulinArg::Regular => InsulinType::Regular,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    gluco_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);

    let mut session = Session::open(data_dir)?;

    match cli.command {
        Some(Commands::Dose {
            meal,
            glucose,
            carbs,
            dry_run,
            share,
        }) => cmd_dose(&mut session, &config, meal, glucose, carbs, dry_run, share),
        Some(Commands::History { action }) => cmd_history(&mut session, action),
        Some(Commands::Settings { action }) => cmd_settings(&mut session, action),
        None => {
            cmd_status(&session);
            Ok(())
        }
    }
}

fn cmd_dose(
    session: &mut Session,
    config: &Config,
    meal: Vec<String>,
    glucose: Option<i64>,
    carbs: Vec<f64>,
    dry_run: bool,
    share: bool,
) -> Result<()> {
    let meal_text = meal.join(" ");

    // Manual carbs skip the LLM entirely; otherwise the Gemini parser needs
    // an API key from the environment.
    let parser: Box<dyn MealParser> = if carbs.is_empty() {
        Box::new(GeminiMealParser::from_env(config.llm.model.clone())?)
    } else {
        Box::new(ManualMealParser::from_carbs(&carbs))
    };

    let result = if dry_run {
        match session.preview(parser.as_ref(), &meal_text, glucose) {
            Ok(result) => result,
            Err(e) => return surface_user_error(e),
        }
    } else {
        match session.calculate(parser.as_ref(), &meal_text, glucose) {
            Ok(item) => item.result,
            Err(e) => return surface_user_error(e),
        }
    };

    display_breakdown(&result);

    if dry_run {
        println!("\n[Dry run - not recorded]");
    } else {
        println!("\n✓ Recorded to history");
    }

    if share {
        println!();
        println!(
            "{}",
            format_summary(
                &meal_text,
                glucose.map(|g| g.to_string()).as_deref(),
                &result,
                &session.settings,
                Utc::now(),
            )
        );
    }

    Ok(())
}

/// Print soft, user-caused errors plainly and fail the command.
fn surface_user_error(e: Error) -> Result<()> {
    match e {
        Error::Validation(msg) | Error::Upstream(msg) => {
            eprintln!("✗ {}", msg);
            std::process::exit(1);
        }
        other => Err(other),
    }
}

fn cmd_history(session: &mut Session, action: Option<HistoryAction>) -> Result<()> {
    match action.unwrap_or(HistoryAction::List) {
        HistoryAction::List => {
            if session.history.is_empty() {
                println!("No calculations recorded yet.");
                return Ok(());
            }

            for item in session.history.items() {
                let glucose = item.glucose.as_deref().unwrap_or("N/A");
                println!(
                    "{}  {:>5} U  {:>6}g  BG {:>4}  {}",
                    item.timestamp.format("%b %e %H:%M"),
                    item.result.final_dose,
                    item.result.total_carbs,
                    glucose,
                    item.meal_text,
                );
                println!("    id: {}", item.id);
            }
        }

        HistoryAction::Remove { id } => {
            if session.remove_history(&id)? {
                println!("✓ Entry removed");
            } else {
                println!("No entry with id {} (nothing removed)", id);
            }
        }

        HistoryAction::Clear => {
            session.clear_history()?;
            println!("✓ History cleared");
        }

        HistoryAction::Export { path } => {
            let count = gluco_core::export::history_to_csv(&session.history, &path)?;
            println!("✓ Exported {} entries to {}", count, path.display());
        }
    }

    Ok(())
}

fn cmd_settings(session: &mut Session, action: SettingsAction) -> Result<()> {
    match action {
        SettingsAction::Show => display_profile(session),

        SettingsAction::Set { tdd, ccr, isf } => {
            session.update_settings(|s| {
                if let Some(tdd) = tdd {
                    s.set_tdd(tdd);
                }
                if let Some(ccr) = ccr {
                    s.set_ccr_constant(ccr);
                }
                if let Some(isf) = isf {
                    s.set_isf_constant(isf);
                }
            })?;
            println!("✓ Settings updated\n");
            display_profile(session);
        }

        SettingsAction::Insulin { kind } => {
            session.set_insulin_type(kind.into())?;
            println!(
                "✓ Insulin type set to {} (ISF constant reset to {})",
                session.settings.insulin_type, session.settings.isf_constant
            );
        }

        SettingsAction::Theme { theme } => {
            session.set_theme(theme.into())?;
            println!("✓ Theme set to {}", session.theme);
        }
    }

    Ok(())
}

fn cmd_status(session: &Session) {
    display_profile(session);

    println!();
    if session.history.is_empty() {
        println!("No calculations recorded yet.");
    } else {
        println!("Recent calculations:");
        for item in session.history.items().iter().take(5) {
            println!(
                "  {}  {:>5} U  {}",
                item.timestamp.format("%b %e %H:%M"),
                item.result.final_dose,
                item.meal_text,
            );
        }
    }
}

fn display_profile(session: &Session) {
    let s = &session.settings;
    println!("Profile:");
    println!("  TDD:           {} U", s.tdd);
    println!("  Insulin type:  {}", s.insulin_type);
    println!("  CCR constant:  {}", s.ccr_constant);
    println!("  ISF constant:  {}", s.isf_constant);
    println!("  1 unit covers: {:.1}g carbs", s.ccr_constant / s.tdd);
    println!("  1 unit drops:  {:.1} mg/dL", s.isf_constant / s.tdd);
    println!("  Theme:         {}", session.theme);
}

fn display_breakdown(result: &CalculationResult) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  RECOMMENDED DOSE: {} U", result.final_dose);
    println!("╰─────────────────────────────────────────╯");
    println!();

    for item in &result.foods {
        println!("  {} ({})  +{}g", item.food, item.quantity, item.carbs);
    }
    println!("  Total carbs: {}g", result.total_carbs);
    println!();

    println!("  Carb insulin: {:.1} U", result.carb_insulin);
    let correction = if result.correction_insulin > 0.0 {
        format!("+{}", result.correction_insulin)
    } else {
        format!("{}", result.correction_insulin)
    };
    println!("  Correction:   {} U", correction);
    println!("  Ratios: CCR 1:{:.1}, CF 1:{:.1}", result.ccr, result.cf);
}
