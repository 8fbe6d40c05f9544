use anyhow::{Context, bail};
use clap::{ArgAction, Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use std::{path::PathBuf, process::ExitCode};
use weather_core::{Conditions, Config, Lookup, LookupError, ViewState};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather for a city")]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather for a city.
    Show {
        /// City name; several words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,

        /// Print the view as JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Directory holding `images/<condition>.png`.
        #[arg(long)]
        assets_dir: Option<PathBuf>,
    },

    /// Prompt for the OpenWeather API key and save it to the config file.
    Configure,

    /// Print where the config file lives.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Show { city, json, assets_dir } => show(&city.join(" "), json, assets_dir).await,
            Command::Configure => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

async fn show(city: &str, json: bool, assets_dir: Option<PathBuf>) -> anyhow::Result<ExitCode> {
    let mut config = Config::load()?;
    if assets_dir.is_some() {
        config.assets_dir = assets_dir;
    }

    let mut lookup = Lookup::from_config(&config)?;
    let outcome = lookup.search(city).await;

    print!("{}", render_view(lookup.view(), json)?);

    if is_clean_exit(&outcome) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// "City not found" is an ordinary answer; anything else is a failed run.
fn is_clean_exit(outcome: &Result<Conditions, LookupError>) -> bool {
    match outcome {
        Ok(_) => true,
        Err(err) => err.is_not_found(),
    }
}

/// Text or pretty JSON, always newline-terminated.
fn render_view(view: &ViewState, json: bool) -> anyhow::Result<String> {
    if json {
        let out = serde_json::to_string_pretty(view).context("Failed to serialize view to JSON")?;
        Ok(format!("{out}\n"))
    } else {
        Ok(view.to_string())
    }
}

fn configure() -> anyhow::Result<()> {
    let path = Config::config_file_path()?;
    let mut config = Config::load_from(&path)?;

    let key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let key = key.trim();
    if key.is_empty() {
        bail!("API key must not be empty");
    }

    config.set_api_key(key.to_string());
    config.save()?;

    println!("Saved API key to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_core::{NOT_FOUND_MESSAGE, WeatherResult};

    fn london() -> Conditions {
        Conditions {
            result: WeatherResult {
                city: "London".into(),
                temperature_c: 16,
                humidity_pct: 70,
                wind_speed: 4.1,
                description: "Few Clouds".into(),
                condition: "clouds".into(),
            },
            icon: PathBuf::from("/opt/weather/assets/images/clouds.png"),
        }
    }

    #[test]
    fn found_and_not_found_exit_cleanly() {
        assert!(is_clean_exit(&Ok(london())));
        assert!(is_clean_exit(&Err(LookupError::LookupFailed { status: 404 })));
        assert!(is_clean_exit(&Err(LookupError::LookupFailed { status: 500 })));
        assert!(is_clean_exit(&Err(LookupError::EmptyCity)));
    }

    #[test]
    fn other_failures_exit_with_error() {
        let decode = serde_json::from_str::<u8>("nope").unwrap_err();
        assert!(!is_clean_exit(&Err(LookupError::MalformedResponse(decode))));
        assert!(!is_clean_exit(&Err(LookupError::MissingIcon {
            path: PathBuf::from("images/snow.png"),
        })));
        assert!(!is_clean_exit(&Err(LookupError::InvalidCondition { condition: "..".into() })));
    }

    #[test]
    fn json_output_for_found_city() {
        let mut view = ViewState::default();
        view.render(Ok(&london()));

        let out = render_view(&view, true).unwrap();
        assert!(out.ends_with('\n'));

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "city": "London",
                "temperature": "16°c | Few Clouds",
                "humidity": "70%",
                "wind": "4.1km/h",
                "icon": "/opt/weather/assets/images/clouds.png",
            })
        );
    }

    #[test]
    fn json_output_for_unknown_city() {
        let mut view = ViewState::default();
        view.render(Err(&LookupError::LookupFailed { status: 404 }));

        let value: serde_json::Value =
            serde_json::from_str(&render_view(&view, true).unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({ "message": NOT_FOUND_MESSAGE }));
    }

    #[test]
    fn text_output_matches_display() {
        let mut view = ViewState::default();
        view.render(Err(&LookupError::LookupFailed { status: 404 }));
        assert_eq!(render_view(&view, false).unwrap(), "City not found. Please try again.\n");
    }

    #[test]
    fn show_joins_city_words() {
        let cli = Cli::try_parse_from(["weather", "show", "New", "York", "--json"]).unwrap();

        match cli.command {
            Command::Show { city, json, assets_dir } => {
                assert_eq!(city.join(" "), "New York");
                assert!(json);
                assert_eq!(assets_dir, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_requires_a_city() {
        assert!(Cli::try_parse_from(["weather", "show"]).is_err());
    }

    #[test]
    fn verbosity_is_counted_globally() {
        let cli = Cli::try_parse_from(["weather", "show", "Oslo", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn assets_dir_flag() {
        let cli =
            Cli::try_parse_from(["weather", "show", "Oslo", "--assets-dir", "/tmp/icons"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Show { assets_dir: Some(ref dir), .. } if dir == &PathBuf::from("/tmp/icons")
        ));
    }

    #[test]
    fn configure_and_config_path_parse() {
        assert!(matches!(
            Cli::try_parse_from(["weather", "configure"]).unwrap().command,
            Command::Configure
        ));
        assert!(matches!(
            Cli::try_parse_from(["weather", "config-path"]).unwrap().command,
            Command::ConfigPath
        ));
    }

    #[test]
    fn clap_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
