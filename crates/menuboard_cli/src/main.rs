//! `menuboard` command-line host.
//!
//! # Responsibility
//! - Wire configuration, logging, storage and the core components together.
//! - Expose display resolution, override management and menu editing to
//!   operators without a browser.

mod edit;

use clap::{Parser, Subcommand};
use log::warn;
use menuboard_core::{
    init_logging, parse_selection, BoardConfig, DayOfWeek, Daypart, DaypartResolver, DisplayState,
    JsonFileMenuRepository, JsonFileStore, MenuScreen, MenuService, QueryParams, SlideRotator,
    SystemClock, Ticker,
};
use serde_json::json;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

type CliResult<T> = Result<T, Box<dyn Error>>;

const WATCH_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Parser)]
#[command(name = "menuboard", version, about = "Menu board display and content tools")]
struct Cli {
    /// Config file (defaults to ./menuboard.json when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Overrides the configured data directory.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve and print the current display state.
    Resolve {
        /// Raw query string, e.g. `?daypart=breakfast&day=friday`.
        #[arg(long)]
        query: Option<String>,
        /// Shorthand for a `daypart` query parameter.
        #[arg(long)]
        daypart: Option<String>,
        /// Shorthand for a `day` query parameter.
        #[arg(long)]
        day: Option<String>,
    },
    /// Set or clear a persisted override (`auto` clears).
    Override {
        #[command(subcommand)]
        axis: OverrideAxis,
    },
    /// Re-resolve on the refresh interval and print every resolution.
    Watch {
        /// Stop after this many resolutions.
        #[arg(long)]
        ticks: Option<u32>,
    },
    /// Print the slide index of a multi-slide screen as it rotates.
    Rotate {
        #[arg(value_parser = parse_screen)]
        screen: MenuScreen,
        /// Stop after this many slide changes.
        #[arg(long)]
        ticks: Option<u32>,
    },
    /// Print the stored document for a screen (seeding the default).
    Show {
        #[arg(value_parser = parse_screen)]
        screen: MenuScreen,
    },
    /// Overwrite a screen's document with the JSON in `file`.
    Save {
        #[arg(value_parser = parse_screen)]
        screen: MenuScreen,
        file: PathBuf,
    },
    /// Interactive editing session with undo/redo.
    Edit {
        #[arg(value_parser = parse_screen)]
        screen: MenuScreen,
    },
}

#[derive(Debug, Subcommand)]
enum OverrideAxis {
    /// `breakfast`, `regular` or `auto`.
    Daypart { value: String },
    /// A weekday name or `auto`.
    Day { value: String },
}

fn parse_screen(value: &str) -> Result<MenuScreen, String> {
    MenuScreen::parse(value).ok_or_else(|| format!("unknown screen `{value}`; expected s2|s3|s4"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let mut config = match &cli.config {
        Some(path) => BoardConfig::load(path)?,
        None => BoardConfig::load_or_default(menuboard_core::config::DEFAULT_CONFIG_FILE)?,
    };
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
        config.validate()?;
    }

    let base_dir = std::env::current_dir()?;
    if let Err(err) = init_logging(&config.log_level, config.resolved_log_dir(&base_dir)) {
        eprintln!("warning: file logging disabled: {err}");
    }

    match cli.command {
        Command::Resolve {
            query,
            daypart,
            day,
        } => {
            let query = build_query(query.as_deref(), daypart, day);
            let resolver = open_resolver(&config, &query);
            print_state(&config, &resolver.state())
        }
        Command::Override { axis } => {
            let mut resolver = open_resolver(&config, &QueryParams::default());
            let state = match axis {
                OverrideAxis::Daypart { value } => {
                    let selection = parse_selection(&value, Daypart::parse).ok_or_else(|| {
                        format!("unknown daypart `{value}`; expected breakfast|regular|auto")
                    })?;
                    resolver.set_daypart_override(selection)
                }
                OverrideAxis::Day { value } => {
                    let selection = parse_selection(&value, DayOfWeek::parse).ok_or_else(|| {
                        format!("unknown day `{value}`; expected a weekday name or auto")
                    })?;
                    resolver.set_day_override(selection)
                }
            };
            print_state(&config, &state)
        }
        Command::Watch { ticks } => watch(&config, ticks),
        Command::Rotate { screen, ticks } => rotate(&config, screen, ticks),
        Command::Show { screen } => {
            let service = MenuService::new(JsonFileMenuRepository::new(&config.data_dir));
            let document = service.get_document(screen)?;
            println!("{}", serde_json::to_string_pretty(&document)?);
            Ok(())
        }
        Command::Save { screen, file } => {
            let raw = std::fs::read_to_string(&file)?;
            let document: serde_json::Value = serde_json::from_str(&raw)
                .map_err(|err| format!("`{}` is not valid JSON: {err}", file.display()))?;
            let service = MenuService::new(JsonFileMenuRepository::new(&config.data_dir));
            let ack = service.save_document(screen, &document)?;
            println!("{}", serde_json::to_string(&ack)?);
            Ok(())
        }
        Command::Edit { screen } => {
            let service = MenuService::new(JsonFileMenuRepository::new(&config.data_dir));
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            edit::run_session(&service, screen, stdin.lock(), stdout.lock())
        }
    }
}

/// Explicit flags come first so they win over the same key in `--query`.
fn build_query(raw: Option<&str>, daypart: Option<String>, day: Option<String>) -> QueryParams {
    let mut pairs: Vec<(String, String)> = Vec::new();
    if let Some(daypart) = daypart {
        pairs.push(("daypart".to_string(), daypart));
    }
    if let Some(day) = day {
        pairs.push(("day".to_string(), day));
    }
    if let Some(raw) = raw {
        let parsed = QueryParams::parse(raw);
        for key in ["daypart", "day"] {
            if let Some(value) = parsed.get(key) {
                pairs.push((key.to_string(), value.to_string()));
            }
        }
    }
    pairs.into_iter().collect()
}

fn open_resolver(
    config: &BoardConfig,
    query: &QueryParams,
) -> DaypartResolver<JsonFileStore, SystemClock> {
    DaypartResolver::new(
        JsonFileStore::open(config.client_storage_path()),
        SystemClock,
        query,
        config.resolver_settings(),
    )
}

fn watch(config: &BoardConfig, ticks: Option<u32>) -> CliResult<()> {
    let mut resolver = open_resolver(config, &QueryParams::default());
    let schedule_config = config.clone();
    print_state(config, &resolver.state())?;
    if ticks == Some(0) {
        return Ok(());
    }

    let mut remaining = ticks;
    let ticker = Ticker::start("menuboard-watch", WATCH_POLL_INTERVAL, move || {
        let Some(state) = resolver.poll() else {
            return true;
        };
        if let Err(err) = print_state(&schedule_config, &state) {
            warn!("event=watch_print module=cli status=error error={err}");
        }
        match remaining.as_mut() {
            Some(left) => {
                *left = left.saturating_sub(1);
                *left > 0
            }
            None => true,
        }
    })?;
    ticker.join();
    Ok(())
}

fn rotate(config: &BoardConfig, screen: MenuScreen, ticks: Option<u32>) -> CliResult<()> {
    let mut rotator = SlideRotator::new(SystemClock, screen.slide_count(), config.slide_interval());
    println!("{screen} slide {}/{}", rotator.current() + 1, rotator.slide_count());
    if ticks == Some(0) || rotator.slide_count() < 2 {
        return Ok(());
    }

    let mut remaining = ticks;
    let ticker = Ticker::start("menuboard-rotate", WATCH_POLL_INTERVAL, move || {
        let Some(current) = rotator.poll() else {
            return true;
        };
        println!("{screen} slide {}/{}", current + 1, rotator.slide_count());
        match remaining.as_mut() {
            Some(left) => {
                *left = left.saturating_sub(1);
                *left > 0
            }
            None => true,
        }
    })?;
    ticker.join();
    Ok(())
}

fn print_state(config: &BoardConfig, state: &DisplayState) -> CliResult<()> {
    let schedule = &config.schedule;
    let day = state.resolved_day;
    let report = json!({
        "is_breakfast": state.is_breakfast,
        "resolved_day": day,
        "daypart_source": state.daypart_source,
        "day_source": state.day_source,
        "day_name_fr": schedule.day_name_fr(day),
        "layout": schedule.layout_for(day),
        "pizza_promo": schedule.is_pizza_promo_day(day),
        "special": schedule.special_for(day),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{build_query, parse_screen, Cli};
    use clap::CommandFactory;
    use menuboard_core::MenuScreen;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_take_precedence_over_raw_query() {
        let query = build_query(
            Some("?daypart=regular&day=monday"),
            Some("breakfast".to_string()),
            None,
        );
        assert_eq!(query.get("daypart"), Some("breakfast"));
        assert_eq!(query.get("day"), Some("monday"));
    }

    #[test]
    fn screen_argument_is_case_insensitive() {
        assert_eq!(parse_screen("S2"), Ok(MenuScreen::S2));
        assert!(parse_screen("s9").is_err());
    }
}
