use std::{io::Write, path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Select, Text};
use tracing::info;
use weatherpane_core::{
    Config, DarkSkyProvider, FileConfigSource, Language, RefreshScheduler, StateStore, Units,
    format_clock,
    icon::{DirectoryCatalog, IconCatalog},
};

use crate::panel;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherpane", version, about = "Always-on weather display")]
pub struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set API key, location, units and language.
    Configure,

    /// Fetch once and print the panels.
    Show {
        /// Directory holding `<icon>.png` assets.
        #[arg(long)]
        icons: Option<PathBuf>,
    },

    /// Keep the display running, refreshing on schedule, until Ctrl-C.
    Run {
        /// Directory holding `<icon>.png` assets.
        #[arg(long)]
        icons: Option<PathBuf>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let source = match self.config {
            Some(path) => FileConfigSource::new(path),
            None => FileConfigSource::default_location()?,
        };

        match self.command {
            Command::Configure => configure(&source),
            Command::Show { icons } => show(source, icons).await,
            Command::Run { icons } => run_display(source, icons).await,
        }
    }
}

fn configure(source: &FileConfigSource) -> anyhow::Result<()> {
    let mut cfg = Config::load_from(source.path())?;

    let api_key = cfg.api_key.clone();
    cfg.api_key = Text::new("API key:")
        .with_initial_value(&api_key)
        .prompt()
        .context("Failed to read API key")?;
    cfg.latitude = CustomType::<f64>::new("Latitude:")
        .with_default(cfg.latitude)
        .with_error_message("Please enter a number, e.g. 47.6")
        .prompt()
        .context("Failed to read latitude")?;
    cfg.longitude = CustomType::<f64>::new("Longitude:")
        .with_default(cfg.longitude)
        .with_error_message("Please enter a number, e.g. -122.3")
        .prompt()
        .context("Failed to read longitude")?;

    let units: Vec<Units> = Units::all().to_vec();
    let current_units = cfg.units().unwrap_or_default();
    let start = units.iter().position(|u| *u == current_units).unwrap_or(0);
    cfg.units = Select::new("Units:", units)
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read units")?
        .to_string();

    let languages: Vec<Language> = Language::all().to_vec();
    let current_lang = cfg.language().unwrap_or_default();
    let start = languages.iter().position(|l| *l == current_lang).unwrap_or(0);
    cfg.lang = Select::new("Language:", languages)
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read language")?
        .to_string();

    cfg.save_to(source.path())?;
    println!("Saved configuration to {}", source.path().display());

    Ok(())
}

fn scheduler(source: FileConfigSource) -> anyhow::Result<RefreshScheduler> {
    let provider = DarkSkyProvider::new().context("Failed to build HTTP client")?;
    Ok(RefreshScheduler::new(Arc::new(provider), Arc::new(source), StateStore::new()))
}

async fn show(source: FileConfigSource, icons: Option<PathBuf>) -> anyhow::Result<()> {
    let scheduler = scheduler(source)?;
    scheduler.refresh_once().await?;

    let catalog = icons.map(DirectoryCatalog::new);
    let now = format_clock(chrono::Local::now().naive_local());
    print!(
        "{}",
        panel::render(
            &now,
            &scheduler.store().weather().get(),
            catalog.as_ref().map(|c| c as &dyn IconCatalog)
        )
    );

    Ok(())
}

async fn run_display(source: FileConfigSource, icons: Option<PathBuf>) -> anyhow::Result<()> {
    let scheduler = scheduler(source)?;
    let store = scheduler.store().clone();
    let catalog = icons.map(DirectoryCatalog::new);

    let mut weather_rx = store.weather().subscribe();
    let mut time_rx = store.current_time_text().subscribe();

    scheduler.start().context("Failed to start scheduler")?;
    info!("Display running, press Ctrl-C to exit");

    loop {
        tokio::select! {
            res = tokio::signal::ctrl_c() => {
                res.context("Failed to listen for Ctrl-C")?;
                break;
            }
            res = weather_rx.changed() => {
                if res.is_err() {
                    break;
                }
                let snapshot = weather_rx.borrow_and_update().clone();
                let now = time_rx.borrow_and_update().clone();
                let icons = catalog.as_ref().map(|c| c as &dyn IconCatalog);
                print!("\n{}", panel::render(&now, &snapshot, icons));
            }
            res = time_rx.changed() => {
                if res.is_err() {
                    break;
                }
                // Redraw only the clock line between weather updates.
                print!("\r{}", *time_rx.borrow_and_update());
                std::io::stdout().flush().context("Failed to write to stdout")?;
            }
        }
    }

    scheduler.stop().await;
    Ok(())
}
