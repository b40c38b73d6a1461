use clap::{Parser, Subcommand};
use dialoguer::Select;
use std::path::PathBuf;
use std::process;
use thiserror::Error;
use tv_lookup::{
    BrowserEvent, ClientConfig, ConfigError, EpisodeRecord, Outcome, ShowBrowser, ShowRecord,
    TvLookupError, TvMazeError,
};

#[derive(Parser)]
#[command(name = "tv_lookup", version)]
#[command(about = "Search TV shows and list their episodes using TVMaze", long_about = None)]
struct Cli {
    /// Path to a TOML config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Override the artwork URL used for shows without an image
    #[arg(long, global = true)]
    default_image: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search shows matching a term
    Search {
        /// Search term; multiple words are joined with spaces
        #[arg(required = true)]
        term: Vec<String>,

        /// Print the normalized records as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all episodes of a show
    Episodes {
        /// TVMaze show id
        show_id: u64,

        /// Print the normalized records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search shows and pick one interactively to list its episodes
    Browse {
        /// Search term; multiple words are joined with spaces
        #[arg(required = true)]
        term: Vec<String>,
    },
}

/// Errors surfaced by the command line interface
#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Lookup(#[from] TvLookupError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("TVMaze error: {0}")]
    Api(#[from] TvMazeError),

    #[error("Failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Interactive prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// The failure was already printed by the event handler
    #[error("request failed")]
    Reported,
}

/// Converts summary HTML into plain terminal text
fn summary_text(summary: &str) -> String {
    nanohtml2text::html2text(summary).trim().to_string()
}

fn print_shows(shows: &[ShowRecord]) {
    println!("Found {} show(s)\n", shows.len());

    for (index, show) in shows.iter().enumerate() {
        println!("[{}] {} (id {})", index + 1, show.name, show.id);
        println!("    Image: {}", show.image);
        println!("    {}", summary_text(&show.summary));
        println!();
    }
}

fn print_episodes(episodes: &[EpisodeRecord]) {
    for episode in episodes {
        println!(
            "S{:02}E{:02} - {}",
            episode.season, episode.number, episode.name
        );
    }
}

/// Handles browser events and prints formatted output to stdout
fn handle_browser_event(event: BrowserEvent) {
    match event {
        BrowserEvent::SearchStarted { term } => {
            println!("Searching TVMaze for '{}'...", term);
        }
        BrowserEvent::EpisodesHidden => {}
        BrowserEvent::ShowsFound { shows } => print_shows(&shows),
        BrowserEvent::NoShowsFound { term } => {
            println!("No shows found for '{}'.", term);
        }
        BrowserEvent::EpisodesRequested { show_id } => {
            println!("\n=== Episodes of show {} ===", show_id);
        }
        BrowserEvent::EpisodesFound { episodes, .. } => print_episodes(&episodes),
        BrowserEvent::NoEpisodesFound { show_id } => {
            println!("No episodes listed for show {}.", show_id);
        }
        BrowserEvent::RequestFailed { message } => {
            eprintln!("Request failed: {}", message);
        }
    }
}

/// Marks an error as already shown to the user by [`handle_browser_event`]
fn reported<T>(result: Result<T, TvMazeError>) -> Result<T, CliError> {
    result.map_err(|_| CliError::Reported)
}

fn print_json<T: serde::Serialize>(outcome: Outcome<T>) -> Result<(), CliError> {
    if let Outcome::Published(records) = outcome {
        println!("{}", serde_json::to_string_pretty(&records)?);
    }
    Ok(())
}

/// Builds the client configuration from the config file and CLI overrides
fn resolve_config(cli: &Cli) -> Result<ClientConfig, CliError> {
    let mut config = ClientConfig::load_or_default(cli.config.as_deref())?;

    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(default_image) = &cli.default_image {
        config.default_image_url = default_image.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }

    config.validate()?;
    Ok(config)
}

/// Lets the user pick shows from the result list until they cancel
fn browse(browser: &ShowBrowser, shows: &[ShowRecord]) -> Result<(), CliError> {
    let labels: Vec<String> = shows
        .iter()
        .map(|show| format!("{} (id {})", show.name, show.id))
        .collect();

    loop {
        let selection = Select::new()
            .with_prompt("Show episodes for (Esc to quit)")
            .items(&labels)
            .default(0)
            .interact_opt()?;

        let Some(index) = selection else {
            return Ok(());
        };

        reported(browser.show_episodes(shows[index].id, handle_browser_event))?;
        println!();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = resolve_config(&cli)?;
    let browser = ShowBrowser::from_config(&config)?;

    match cli.command {
        Commands::Search { term, json: true } => {
            let outcome = browser.search_and_display(&term.join(" "), |_| {})?;
            print_json(outcome)
        }
        Commands::Search { term, json: false } => {
            reported(browser.search_and_display(&term.join(" "), handle_browser_event))?;
            Ok(())
        }
        Commands::Episodes { show_id, json: true } => {
            let outcome = browser.show_episodes(show_id, |_| {})?;
            print_json(outcome)
        }
        Commands::Episodes {
            show_id,
            json: false,
        } => {
            reported(browser.show_episodes(show_id, handle_browser_event))?;
            Ok(())
        }
        Commands::Browse { term } => {
            let outcome =
                reported(browser.search_and_display(&term.join(" "), handle_browser_event))?;

            match outcome {
                Outcome::Published(shows) if !shows.is_empty() => browse(&browser, &shows),
                _ => Ok(()),
            }
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => {}
        Err(CliError::Reported) => process::exit(1),
        Err(e) => {
            eprintln!("\nError: {}", e);
            process::exit(1);
        }
    }
}
