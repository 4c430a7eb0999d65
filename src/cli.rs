//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::input_store::{DEFAULT_STORAGE_KEY, InputStore};
use crate::adapters::json_file_store::JsonFileStore;
use crate::adapters::summary_report::{render_fields, render_inputs, render_json, render_summary};
use crate::domain::error::PricingError;
use crate::domain::inputs::{InputField, PricingInputs};
use crate::domain::quote::compute_all;
use crate::ports::config_port::ConfigPort;
use crate::ports::store_port::KeyValueStore;

#[derive(Parser, Debug)]
#[command(
    name = "print3d-pricing",
    about = "Suggested sale price and profitability for 3D-printed objects"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Price the current inputs
    Quote {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Temporary override, not saved (repeatable)
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        overrides: Vec<String>,
        #[arg(long)]
        json: bool,
        /// Start from the defaults and ignore the saved record
        #[arg(long)]
        ephemeral: bool,
    },
    /// Change one input, save it, and price the result
    Set {
        #[arg(short, long)]
        config: Option<PathBuf>,
        field: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[arg(long)]
        json: bool,
    },
    /// Print the current inputs as JSON
    Show {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Forget the saved inputs and go back to the defaults
    Reset {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List input fields with units and defaults
    Fields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    File,
    Sqlite,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreSettings {
    pub backend: StoreBackend,
    /// `None` means the backend's default location.
    pub path: Option<PathBuf>,
    pub key: String,
    pub pool_size: u32,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            backend: StoreBackend::File,
            path: None,
            key: DEFAULT_STORAGE_KEY.to_string(),
            pool_size: 1,
        }
    }
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Quote {
            config,
            overrides,
            json,
            ephemeral,
        } => run_quote(config.as_ref(), &overrides, json, ephemeral),
        Command::Set {
            config,
            field,
            value,
            json,
        } => run_set(config.as_ref(), &field, &value, json),
        Command::Show { config } => run_show(config.as_ref()),
        Command::Reset { config } => run_reset(config.as_ref()),
        Command::Fields => {
            print!("{}", render_fields());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, PricingError> {
    FileConfigAdapter::from_file(path).map_err(|e| PricingError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

pub fn build_store_settings(config: Option<&dyn ConfigPort>) -> Result<StoreSettings, PricingError> {
    let mut settings = StoreSettings::default();
    let Some(config) = config else {
        return Ok(settings);
    };

    if let Some(backend) = config.get_string("store", "backend") {
        settings.backend = match backend.trim().to_lowercase().as_str() {
            "file" | "json" => StoreBackend::File,
            "sqlite" => StoreBackend::Sqlite,
            other => {
                return Err(PricingError::ConfigInvalid {
                    section: "store".into(),
                    key: "backend".into(),
                    reason: format!("unknown backend '{other}' (expected file or sqlite)"),
                });
            }
        };
    }

    settings.path = config
        .get_string("store", "path")
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .map(PathBuf::from);

    if settings.backend == StoreBackend::Sqlite && settings.path.is_none() {
        return Err(PricingError::ConfigMissing {
            section: "store".into(),
            key: "path".into(),
        });
    }

    if let Some(key) = config
        .get_string("store", "key")
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
    {
        settings.key = key;
    }

    let pool_size = config.get_int("store", "pool_size", 1);
    settings.pool_size = u32::try_from(pool_size)
        .ok()
        .filter(|&n| n >= 1)
        .ok_or_else(|| PricingError::ConfigInvalid {
            section: "store".into(),
            key: "pool_size".into(),
            reason: format!("pool_size must be between 1 and {}, got {pool_size}", u32::MAX),
        })?;

    Ok(settings)
}

pub fn open_store(settings: &StoreSettings) -> Result<Box<dyn KeyValueStore>, PricingError> {
    match settings.backend {
        StoreBackend::File => {
            let store = match &settings.path {
                Some(path) => JsonFileStore::new(path.clone()),
                None => JsonFileStore::default_location()?,
            };
            tracing::debug!(path = %store.path().display(), "using json file store");
            Ok(Box::new(store))
        }
        StoreBackend::Sqlite => open_sqlite(settings),
    }
}

#[cfg(feature = "sqlite")]
fn open_sqlite(settings: &StoreSettings) -> Result<Box<dyn KeyValueStore>, PricingError> {
    use crate::adapters::sqlite_store::SqliteStore;

    let path = settings
        .path
        .as_ref()
        .ok_or_else(|| PricingError::ConfigMissing {
            section: "store".into(),
            key: "path".into(),
        })?;
    Ok(Box::new(SqliteStore::open(path, settings.pool_size)?))
}

#[cfg(not(feature = "sqlite"))]
fn open_sqlite(_settings: &StoreSettings) -> Result<Box<dyn KeyValueStore>, PricingError> {
    Err(PricingError::ConfigInvalid {
        section: "store".into(),
        key: "backend".into(),
        reason: "sqlite feature is required for the sqlite backend".into(),
    })
}

/// Stock defaults, with any `[defaults]` entries from the config applied on top.
pub fn base_inputs(config: Option<&dyn ConfigPort>) -> PricingInputs {
    let mut inputs = PricingInputs::defaults();
    if let Some(config) = config {
        for field in InputField::ALL {
            if let Some(raw) = config.get_string("defaults", field.name()) {
                inputs.set(field, raw);
            }
        }
    }
    inputs
}

/// Split `FIELD=VALUE`. The value is left raw for coercion.
pub fn parse_assignment(raw: &str) -> Result<(InputField, String), PricingError> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| PricingError::InvalidAssignment {
            raw: raw.to_string(),
        })?;
    let field: InputField = name.parse()?;
    Ok((field, value.trim().to_string()))
}

pub fn apply_overrides(inputs: &mut PricingInputs, overrides: &[String]) -> Result<(), PricingError> {
    for raw in overrides {
        let (field, value) = parse_assignment(raw)?;
        inputs.set(field, value);
    }
    Ok(())
}

struct Session {
    config: Option<FileConfigAdapter>,
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl Session {
    fn open(config_path: Option<&PathBuf>) -> Result<Self, PricingError> {
        let config = match config_path {
            Some(path) => {
                eprintln!("Loading config from {}", path.display());
                Some(load_config(path)?)
            }
            None => None,
        };
        let settings = build_store_settings(config.as_ref().map(|c| c as &dyn ConfigPort))?;
        let store = open_store(&settings)?;
        Ok(Self {
            config,
            store,
            key: settings.key,
        })
    }

    fn inputs(&self) -> InputStore<'_> {
        InputStore::with_key(self.store.as_ref(), &self.key)
    }

    fn defaults(&self) -> PricingInputs {
        base_inputs(self.config.as_ref().map(|c| c as &dyn ConfigPort))
    }

    fn current(&self) -> Result<PricingInputs, PricingError> {
        self.inputs().load_or(self.defaults())
    }
}

fn print_quote(inputs: &PricingInputs, json: bool) -> Result<(), PricingError> {
    let quote = compute_all(inputs);
    if json {
        println!("{}", render_json(&quote)?);
    } else {
        print!("{}", render_summary(inputs, &quote));
    }
    Ok(())
}

fn run_quote(
    config_path: Option<&PathBuf>,
    overrides: &[String],
    json: bool,
    ephemeral: bool,
) -> Result<(), PricingError> {
    let session = Session::open(config_path)?;
    let mut inputs = if ephemeral {
        session.defaults()
    } else {
        session.current()?
    };
    apply_overrides(&mut inputs, overrides)?;
    print_quote(&inputs, json)
}

fn run_set(
    config_path: Option<&PathBuf>,
    field: &str,
    value: &str,
    json: bool,
) -> Result<(), PricingError> {
    let field: InputField = field.parse()?;
    let session = Session::open(config_path)?;
    let mut inputs = session.current()?;
    inputs.set(field, value);
    session.inputs().save(&inputs)?;
    eprintln!("Saved {} = {}", field, inputs.get(field));
    print_quote(&inputs, json)
}

fn run_show(config_path: Option<&PathBuf>) -> Result<(), PricingError> {
    let session = Session::open(config_path)?;
    println!("{}", render_inputs(&session.current()?)?);
    Ok(())
}

fn run_reset(config_path: Option<&PathBuf>) -> Result<(), PricingError> {
    let session = Session::open(config_path)?;
    session.inputs().clear()?;
    eprintln!("Saved inputs cleared; back to defaults");
    println!("{}", render_inputs(&session.defaults())?);
    Ok(())
}
