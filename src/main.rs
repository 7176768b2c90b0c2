//! Terminal demo for the Game of Life engine

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use game_of_life_engine::{
    config::{CliOverrides, OutputFormat, Settings},
    game_of_life::RuleTemplate,
    utils::{ColorOutput, GridFormatter},
    Grid, SimulationClock,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "game_of_life_engine")]
#[command(about = "Toroidal Game of Life simulation engine")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation and print generations to the terminal
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Grid width (overrides config)
        #[arg(long)]
        width: Option<usize>,

        /// Grid height (overrides config)
        #[arg(long)]
        height: Option<usize>,

        /// Tick interval in milliseconds (overrides config)
        #[arg(short, long)]
        speed: Option<u64>,

        /// Rule string such as B3/S23, or a template name (overrides config)
        #[arg(short, long)]
        rules: Option<String>,

        /// Number of generations to display
        #[arg(short, long, default_value = "20")]
        generations: usize,

        /// Start paused and advance by explicit single steps
        #[arg(long)]
        step: bool,

        /// Print JSON snapshots instead of text
        #[arg(long)]
        json: bool,

        /// Render cell ages instead of alive/dead glyphs
        #[arg(long)]
        ages: bool,
    },

    /// List the rule template catalog
    Templates,

    /// Create example configuration files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            width,
            height,
            speed,
            rules,
            generations,
            step,
            json,
            ages,
        } => {
            let overrides = CliOverrides {
                width,
                height,
                speed_ms: speed,
                rule: rules.as_deref().map(resolve_rule),
                start_paused: step.then_some(true),
                format: json.then_some(OutputFormat::Json),
            };
            run_command(config, overrides, generations, ages)
        }
        Commands::Templates => templates_command(),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

/// Accept either a template name ("Seeds") or a raw rule string ("B2/S").
fn resolve_rule(text: &str) -> String {
    match RuleTemplate::find(text) {
        Some(template) => template.rules().to_string(),
        None => text.to_string(),
    }
}

fn run_command(
    config_path: PathBuf,
    overrides: CliOverrides,
    generations: usize,
    show_ages: bool,
) -> Result<()> {
    let mut settings = if config_path.exists() {
        Settings::from_file(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Settings::default()
    };

    settings.merge_with_cli(&overrides);
    if show_ages {
        settings.output.show_ages = true;
    }
    settings.validate().context("Configuration validation failed")?;

    println!(
        "{}",
        ColorOutput::info(&format!(
            "Running {} on a {}x{} torus, {}ms per generation",
            settings.rules.rule,
            settings.grid.width,
            settings.grid.height,
            settings.clock.tick_interval_ms
        ))
    );

    let clock = SimulationClock::spawn(&settings)?;
    let snapshots = clock.subscribe();
    let stepping = settings.clock.start_paused;

    let initial = snapshots
        .recv()
        .context("Snapshot stream ended before the initial grid")?;
    print_snapshot(0, &initial, &settings)?;

    for generation in 1..=generations {
        if stepping {
            clock.step_once()?;
        }
        let grid = snapshots
            .recv()
            .context("Snapshot stream ended unexpectedly")?;
        print_snapshot(generation, &grid, &settings)?;
        if grid.is_empty() {
            println!("{}", ColorOutput::warning("Grid died out"));
            break;
        }
    }

    clock.shutdown()?;
    println!("{}", ColorOutput::success("Done"));
    Ok(())
}

fn print_snapshot(generation: usize, grid: &Grid, settings: &Settings) -> Result<()> {
    println!(
        "{}",
        ColorOutput::info(&format!(
            "Generation {} ({} living)",
            generation,
            grid.living_count()
        ))
    );
    match settings.output.format {
        OutputFormat::Json => println!("{}", GridFormatter::to_json(grid)?),
        OutputFormat::Text if settings.output.show_ages => {
            print!("{}", GridFormatter::format_with_ages(grid));
        }
        OutputFormat::Text => print!("{}", GridFormatter::format_compact(grid)),
    }
    Ok(())
}

fn templates_command() -> Result<()> {
    println!("Rule templates:");
    for template in RuleTemplate::ALL {
        let marker = if template.is_default() { " (default)" } else { "" };
        println!("  {:<10} {}{}", template.name(), template.rules(), marker);
    }
    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up configuration files..."));

    let config_dir = directory.join("config");
    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create directory {}", config_dir.display()))?;

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    let mut seeds_config = Settings::default();
    seeds_config.rules.rule = RuleTemplate::Seeds.rules().to_string();
    seeds_config.clock.tick_interval_ms = 200;
    seeds_config.to_file(&examples_dir.join("seeds.yaml"))?;

    let mut stepping_config = Settings::default();
    stepping_config.clock.start_paused = true;
    stepping_config.grid.width = 25;
    stepping_config.grid.height = 25;
    stepping_config.to_file(&examples_dir.join("stepping.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());
    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- run --config config/default.yaml");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "game_of_life_engine",
            "run",
            "--width",
            "30",
            "--speed",
            "100",
            "--rules",
            "HighLife",
        ]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_resolve_rule() {
        assert_eq!(resolve_rule("Seeds"), "B2/S");
        assert_eq!(resolve_rule("B45/S45"), "B45/S45");
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("config/examples/seeds.yaml").exists());
    }
}
