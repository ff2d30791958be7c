use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("configuration value {key}={value} is out of range, must be at least 1")]
    Invalid { key: String, value: u8 },
}

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("invalid floor {floor}, please enter a floor between 0 and {}", .num_floors.saturating_sub(1))]
    InvalidFloor { floor: i32, num_floors: u8 },

    #[error("could not start movement worker: {0}")]
    WorkerSpawn(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
