use clap::{Parser, Subcommand, ValueEnum};
use lift_core::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lift")]
#[command(about = "Strength training calculators and set log", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate a one-rep max from a set
    E1rm {
        /// Load lifted (kg)
        #[arg(long)]
        load: f64,

        /// Reps completed
        #[arg(long)]
        reps: u32,

        /// Reps left in reserve
        #[arg(long, default_value_t = 0)]
        rir: u32,

        /// Formula (defaults to the configured one)
        #[arg(long, value_enum)]
        formula: Option<FormulaArg>,
    },

    /// Show the plates to load on each side of the bar
    Plates {
        /// Target total load (kg)
        #[arg(long)]
        target: f64,

        /// Override bar weight (kg)
        #[arg(long)]
        bar: Option<f64>,
    },

    /// Generate warmup sets for a working weight
    Warmup {
        /// Working set load (kg)
        #[arg(long)]
        working: f64,
    },

    /// Append a set to the log
    Log {
        /// Exercise ID from the catalog
        #[arg(long)]
        exercise: String,

        #[arg(long)]
        load: f64,

        #[arg(long)]
        reps: u32,

        /// Reps left in reserve (0-5)
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=5))]
        rir: u32,

        /// Perceived effort (0-10)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
        effort: Option<u8>,

        /// Perceived pump (0-10)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
        pump: Option<u8>,

        /// Perceived soreness (0-10)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
        soreness: Option<u8>,
    },

    /// Report exercises whose e1RM has stopped improving
    Plateau {
        /// Only report this exercise
        #[arg(long)]
        exercise: Option<String>,

        /// Sessions that make a plateau (defaults to the configured one)
        #[arg(long)]
        threshold: Option<usize>,
    },

    /// Suggest substitutes for an exercise
    Substitute {
        /// Exercise ID from the catalog
        #[arg(long)]
        exercise: String,

        /// Available equipment, comma separated (defaults to the configured list)
        #[arg(long, value_delimiter = ',')]
        equipment: Vec<String>,
    },

    /// List the exercise catalog
    Exercises,

    /// Write a config file holding the defaults
    InitConfig {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Archive the set log to CSV
    Rollup {
        /// Remove processed logs after rollup
        #[arg(long)]
        cleanup: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormulaArg {
    Epley,
    Brzycki,
}

impl From<FormulaArg> for E1rmFormula {
    fn from(arg: FormulaArg) -> Self {
        match arg {
            FormulaArg::Epley => E1rmFormula::Epley,
            FormulaArg::Brzycki => E1rmFormula::Brzycki,
        }
    }
}

/// Locations of the set log and archive under a data directory
struct DataPaths {
    log_dir: PathBuf,
    log: PathBuf,
    csv: PathBuf,
}

impl DataPaths {
    fn new(data_dir: &Path) -> Self {
        let log_dir = data_dir.join("log");
        Self {
            log: log_dir.join("sets.log"),
            csv: data_dir.join("sets.csv"),
            log_dir,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        lift_core::logging::init_with_level("debug");
    } else {
        lift_core::logging::init();
    }

    if let Commands::InitConfig { force } = cli.command {
        return cmd_init_config(cli.config.as_deref(), force);
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.data.data_dir.clone());
    let paths = DataPaths::new(&data_dir);
    tracing::debug!("Using data directory {:?}", data_dir);

    match cli.command {
        Commands::E1rm {
            load,
            reps,
            rir,
            formula,
        } => cmd_e1rm(load, reps, rir, formula.map_or(config.e1rm.formula, Into::into)),
        Commands::Plates { target, bar } => cmd_plates(target, bar, &config),
        Commands::Warmup { working } => cmd_warmup(working, &config),
        Commands::Log {
            exercise,
            load,
            reps,
            rir,
            effort,
            pump,
            soreness,
        } => {
            let mut set = SetRecord::new(load, reps, rir, chrono::Utc::now());
            set.perceived_effort = effort;
            set.perceived_pump = pump;
            set.perceived_soreness = soreness;
            cmd_log(&paths, &exercise, set)
        }
        Commands::Plateau {
            exercise,
            threshold,
        } => cmd_plateau(
            &paths,
            exercise.as_deref(),
            threshold.unwrap_or(config.plateau.threshold),
        ),
        Commands::Substitute {
            exercise,
            equipment,
        } => {
            let available: BTreeSet<String> = if equipment.is_empty() {
                config.equipment.available.clone()
            } else {
                equipment.into_iter().map(|e| e.trim().to_string()).collect()
            };
            cmd_substitute(&exercise, &available)
        }
        Commands::Exercises => cmd_exercises(),
        Commands::Rollup { cleanup } => cmd_rollup(&paths, cleanup),
        Commands::InitConfig { force } => cmd_init_config(cli.config.as_deref(), force),
    }
}

/// Format a weight without trailing zeros (102.5, 20, 41.25)
fn kg(weight: f64) -> String {
    let formatted = format!("{:.2}", weight);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

fn formula_name(formula: E1rmFormula) -> &'static str {
    match formula {
        E1rmFormula::Epley => "Epley",
        E1rmFormula::Brzycki => "Brzycki",
    }
}

fn cmd_e1rm(load: f64, reps: u32, rir: u32, formula: E1rmFormula) -> Result<()> {
    let e1rm = formula.estimate(load, reps, rir);

    println!("Estimated 1RM: {} kg", kg(e1rm));
    println!(
        "  {} over {} effective reps ({} done + {} in reserve)",
        formula_name(formula),
        reps.saturating_add(rir),
        reps,
        rir
    );
    Ok(())
}

fn print_loadout(loadout: &PlateLoadout) {
    if loadout.plates.is_empty() {
        println!("  Empty bar");
        return;
    }
    for plate in &loadout.plates {
        println!("  {} x {} kg", plate.count, kg(plate.weight));
    }
}

fn cmd_plates(target: f64, bar: Option<f64>, config: &Config) -> Result<()> {
    let mut prefs = config.plates.preferences();
    if let Some(bar) = bar {
        prefs.bar_weight = bar;
    }

    let loadout = solve_plates(target, &prefs);
    let total = loadout.total_load(prefs.bar_weight);

    println!("Per side ({} kg bar):", kg(prefs.bar_weight));
    print_loadout(&loadout);
    println!();
    println!("Per side: {} kg", kg(loadout.per_side_weight));
    if loadout.is_exact {
        println!("Total: {} kg (exact)", kg(total));
    } else {
        println!(
            "Total: {} kg (closest loadable, {} kg short)",
            kg(total),
            kg(target - total)
        );
    }
    Ok(())
}

fn cmd_warmup(working: f64, config: &Config) -> Result<()> {
    let prefs = config.plates.preferences();
    let sets = generate_warmups(working, &prefs, &config.warmup);

    if sets.is_empty() {
        println!("No warmup sets needed for {} kg.", kg(working));
        return Ok(());
    }

    println!("Warmup for {} kg:", kg(working));
    for set in &sets {
        let plates: Vec<String> = set
            .loadout
            .plates
            .iter()
            .map(|p| format!("{}x{}", p.count, kg(p.weight)))
            .collect();
        let plates = if plates.is_empty() {
            "bar".to_string()
        } else {
            plates.join(" + ")
        };
        println!("  {:>7} kg x {:<2}  [{}]", kg(set.load), set.reps, plates);
    }
    Ok(())
}

fn cmd_log(paths: &DataPaths, exercise_id: &str, set: SetRecord) -> Result<()> {
    let exercise = find_exercise(get_default_catalog(), exercise_id)?;

    let entry = LoggedSet::new(&exercise.id, set);
    let mut log = JsonlSetLog::new(&paths.log);
    log.append(&entry)?;

    println!(
        "✓ Logged {}: {} kg x {} ({} RIR), e1RM {} kg",
        exercise.name,
        kg(entry.set.load),
        entry.set.completed_reps,
        entry.set.reps_in_reserve,
        kg(entry.set.e1rm())
    );
    Ok(())
}

fn cmd_plateau(paths: &DataPaths, exercise: Option<&str>, threshold: usize) -> Result<()> {
    if let Some(id) = exercise {
        find_exercise(get_default_catalog(), id)?;
    }

    let mut history = load_set_history(&paths.log, &paths.csv)?;
    if let Some(id) = exercise {
        history.retain(|entry| entry.exercise_id == id);
    }

    if history.is_empty() {
        println!("No sets logged yet.");
        return Ok(());
    }

    let report = detect_plateaus_by_exercise(&history, threshold);
    for (exercise_id, status) in &report {
        let marker = if status.is_plateaued { "PLATEAU" } else { "ok" };
        println!(
            "{:<28} {:<8} {} sessions without improvement",
            exercise_id, marker, status.sessions_without_improvement
        );
    }
    Ok(())
}

fn cmd_substitute(exercise_id: &str, available: &BTreeSet<String>) -> Result<()> {
    let catalog = get_default_catalog();
    let target = find_exercise(catalog, exercise_id)?;
    let substitutes = suggest_substitutes(target, available, catalog);

    if substitutes.is_empty() {
        println!("No close substitutes for {}.", target.name);
        return Ok(());
    }

    println!("Substitutes for {}:", target.name);
    for substitute in &substitutes {
        println!(
            "  {:>3}  {} ({})",
            substitute.score, substitute.exercise.name, substitute.exercise.id
        );
    }
    Ok(())
}

fn cmd_exercises() -> Result<()> {
    let catalog = get_default_catalog();
    let errors = catalog::validate_catalog(catalog);
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    for exercise in catalog {
        println!(
            "{:<28} {:<30} {:<12} {}",
            exercise.id,
            exercise.name,
            exercise.prime_muscle,
            MovementPattern::classify(&exercise.name)
        );
    }
    Ok(())
}

fn cmd_init_config(path: Option<&Path>, force: bool) -> Result<()> {
    let target = path.map_or_else(Config::default_config_path, Path::to_path_buf);
    if target.exists() && !force {
        return Err(Error::Config(format!(
            "{} already exists (pass --force to overwrite)",
            target.display()
        )));
    }

    let config = Config::default();
    match path {
        Some(path) => config.save_to(path)?,
        None => config.save()?,
    }

    println!("✓ Wrote default config to {}", target.display());
    Ok(())
}

fn cmd_rollup(paths: &DataPaths, cleanup: bool) -> Result<()> {
    if !paths.log.exists() {
        println!("No set log found - nothing to roll up.");
        return Ok(());
    }

    let count = archive::log_to_csv_and_archive(&paths.log, &paths.csv)?;

    println!("✓ Rolled up {} sets to CSV", count);
    println!("  CSV: {}", paths.csv.display());

    if cleanup {
        let cleaned = archive::cleanup_processed_logs(&paths.log_dir)?;
        if cleaned > 0 {
            println!("✓ Cleaned up {} processed logs", cleaned);
        }
    }

    Ok(())
}
