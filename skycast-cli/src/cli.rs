use anyhow::Context;
use clap::{Parser, Subcommand};
use skycast_core::{
    Config, GeoDirectClient, OpenWeatherClient, SearchController, client::clients_from_config,
};

use crate::view;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Terminal weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key used for all requests.
    Configure,

    /// Render the dashboard once for a place and exit.
    Show {
        /// City or place name.
        place: String,
    },

    /// Interactive dashboard: search with autocomplete suggestions.
    Dashboard,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { place } => show(&place).await,
            Command::Dashboard => dashboard().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key);

    config.save()?;
    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}

async fn show(place: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    let (weather, _geo) = clients_from_config(&config)?;

    let mut controller = SearchController::new(config.suggestion_limit);
    if let Some(ticket) = controller.submit_place(place) {
        controller.drive_submit(ticket, &weather).await;
    }

    view::render(&controller, config.chart_points);
    Ok(())
}

async fn dashboard() -> anyhow::Result<()> {
    let config = Config::load()?;
    let (weather, geo) = clients_from_config(&config)?;

    let mut controller = SearchController::new(config.suggestion_limit);

    // Bootstrap: fetch the configured default place before any search.
    if let Some(ticket) = controller.submit_place(&config.default_place) {
        controller.drive_submit(ticket, &weather).await;
    }
    view::render(&controller, config.chart_points);

    loop {
        let Some(line) = inquire::Text::new("Search location:")
            .with_help_message("type a city name; empty input or Esc quits")
            .prompt_skippable()
            .context("Failed to read search input")?
        else {
            break;
        };

        if line.trim().is_empty() {
            break;
        }

        if !run_search(&mut controller, &line, &weather, &geo).await? {
            continue;
        }
        view::render(&controller, config.chart_points);
    }

    Ok(())
}

/// One search round trip: suggestions for the typed term, then either a
/// suggestion selection, a search-as-typed, or a dismissal. Returns false
/// when the user dismissed without submitting.
async fn run_search(
    controller: &mut SearchController,
    line: &str,
    weather: &OpenWeatherClient,
    geo: &GeoDirectClient,
) -> anyhow::Result<bool> {
    controller.drive_input(line, geo).await;

    let ticket = if controller.suggestions().is_empty() {
        controller.submit()
    } else {
        let mut options: Vec<String> = controller
            .suggestions()
            .iter()
            .map(ToString::to_string)
            .collect();
        let suggestion_count = options.len();
        options.push(format!("Search \"{line}\" as typed"));

        let choice = inquire::Select::new("Did you mean:", options)
            .raw_prompt_skippable()
            .context("Failed to read selection")?;

        match choice {
            Some(picked) if picked.index < suggestion_count => {
                controller.select_suggestion(picked.index)
            }
            Some(_) => controller.submit(),
            None => {
                // Esc plays the role of the outside click: close the list,
                // keep the query.
                controller.dismiss_suggestions();
                return Ok(false);
            }
        }
    };

    if let Some(ticket) = ticket {
        controller.drive_submit(ticket, weather).await;
    }
    Ok(true)
}
