use std::collections::HashMap;
use std::env;
use std::fs;
use std::io::ErrorKind;

use tracing::{info, warn};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.json";
const FALLBACK_CONFIG_FILE: &str = "_config.json";

const DEFAULT_NUM_ELEVATORS: u8 = 2;
const DEFAULT_NUM_FLOORS: u8 = 10;
const DEFAULT_CAPACITY: u8 = 5;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub elevator: HashMap<String, u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElevatorConfig {
    pub num_elevators: u8,
    pub num_floors: u8,
    pub capacity: u8,
}

impl Default for ElevatorConfig {
    fn default() -> Self {
        ElevatorConfig {
            num_elevators: DEFAULT_NUM_ELEVATORS,
            num_floors: DEFAULT_NUM_FLOORS,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl ElevatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("num_elevators", self.num_elevators),
            ("num_floors", self.num_floors),
            ("capacity", self.capacity),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid { key: key.to_string(), value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationConfig {
    pub elevator: ElevatorConfig,
}

impl SimulationConfig {
    /// Reads `config.json`, then `_config.json`, then falls back to the
    /// built-in defaults. Command line pairs override whatever was read.
    pub fn get() -> Result<Self, ConfigError> {
        let config_file = read_config_file()?;
        let args: Vec<String> = env::args().skip(1).collect();
        let config = SimulationConfig {
            elevator: parse_env_args(&args, from_config_file(&config_file)),
        };
        config.elevator.validate()?;
        Ok(config)
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let config_file: ConfigFile = serde_json::from_str(contents)?;
        let config = SimulationConfig {
            elevator: from_config_file(&config_file),
        };
        config.elevator.validate()?;
        Ok(config)
    }
}

fn read_config_file() -> Result<ConfigFile, ConfigError> {
    for path in [CONFIG_FILE, FALLBACK_CONFIG_FILE] {
        match fs::read_to_string(path) {
            Ok(contents) => {
                info!(path, "loaded configuration");
                return Ok(serde_json::from_str(&contents)?)
            },
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(e) => return Err(ConfigError::Io { path: path.to_string(), source: e }),
        }
    }
    info!("No configuration file provided, using default settings...");
    Ok(ConfigFile::default())
}

fn from_config_file(config_file: &ConfigFile) -> ElevatorConfig {
    let defaults = ElevatorConfig::default();
    let value = |key: &str, default: u8| config_file.elevator.get(key).copied().unwrap_or(default);
    ElevatorConfig {
        num_elevators: value("num_elevators", defaults.num_elevators),
        num_floors: value("num_floors", defaults.num_floors),
        capacity: value("capacity", defaults.capacity),
    }
}

fn parse_env_args(args: &[String], mut config: ElevatorConfig) -> ElevatorConfig {
    for arg_pair in args.chunks(2) {
        let target = match arg_pair[0].as_str() {
            "--elevators" => &mut config.num_elevators,
            "--floors" => &mut config.num_floors,
            "--capacity" => &mut config.capacity,
            _ => {
                warn!("illegal argument {}, skipping...", arg_pair[0]);
                continue
            },
        };
        match arg_pair.get(1).map(|value| value.parse::<u8>()) {
            Some(Ok(num)) => *target = num,
            Some(Err(_)) => warn!("{} {} is not a number, skipping...", arg_pair[0], arg_pair[1]),
            None => warn!("{} is missing a value, skipping...", arg_pair[0]),
        }
    }
    config
}
