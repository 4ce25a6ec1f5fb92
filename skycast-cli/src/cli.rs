use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, Select};
use skycast_core::{
    CitySelection, Config, IpLocator, ScreenController, WeatherApiProvider,
};

use crate::view;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather for your location or any city")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com API key in the config file.
    Configure,

    /// Show current weather for this device's location.
    Here,

    /// Show current weather for a city by name.
    Show {
        /// City name, e.g. "London".
        city: String,
    },

    /// Search for a city and pick one from the matches.
    Search {
        /// Partial or full city name.
        query: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Here => here().await,
            Command::Show { city } => show(&city).await,
            Command::Search { query } => search(&query).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let api_key = Password::new("WeatherAPI.com API key:")
        .without_confirmation()
        .prompt()
        .context("No API key entered")?;

    let path = Config::save_api_key(api_key.trim())?;
    println!("API key saved to {}", path.display());
    Ok(())
}

/// Build a screen controller from the resolved configuration.
fn screen() -> anyhow::Result<ScreenController> {
    let config = Config::load()?;
    let provider = Arc::new(WeatherApiProvider::new(config.api_key));
    let locator = Arc::new(IpLocator::new());
    Ok(ScreenController::new(provider, locator))
}

async fn here() -> anyhow::Result<()> {
    let mut screen = screen()?;
    screen.initialize().await;
    screen.settle().await;
    view::render(screen.state());
    Ok(())
}

async fn show(city: &str) -> anyhow::Result<()> {
    let mut screen = screen()?;
    screen.set_searching(true);
    screen.query_changed(city);
    screen.settle().await;

    if let Some(err) = screen.state().error_message.as_deref() {
        anyhow::bail!(err.to_string());
    }

    let Some(first) = screen.state().filtered_cities.first().cloned() else {
        anyhow::bail!("No city found matching '{city}'");
    };

    screen.select_city(CitySelection::from(first));
    screen.settle().await;
    view::render(screen.state());
    Ok(())
}

async fn search(query: &str) -> anyhow::Result<()> {
    let mut screen = screen()?;
    screen.set_searching(true);
    screen.query_changed(query);
    screen.settle().await;

    if let Some(err) = screen.state().error_message.as_deref() {
        anyhow::bail!(err.to_string());
    }

    let matches = screen.state().filtered_cities.clone();
    if matches.is_empty() {
        println!("No cities matching '{query}'.");
        return Ok(());
    }

    let options: Vec<String> =
        matches.iter().map(|c| format!("{}, {}", c.name, c.country)).collect();
    let picked = Select::new("Pick a city:", options.clone())
        .prompt()
        .context("No city selected")?;
    let index = options.iter().position(|o| *o == picked).unwrap_or(0);

    screen.select_city(CitySelection::from(matches[index].clone()));
    screen.settle().await;
    view::render(screen.state());
    Ok(())
}
