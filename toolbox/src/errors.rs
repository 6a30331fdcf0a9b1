use subsurface_toolbox_core::errors::DurationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file `{0}` could not be read")]
    Read(String, #[source] std::io::Error),
    #[error("Configuration file `{0}` is not valid")]
    Parse(String, #[source] serde_yml::Error),
    #[error("Invalid time shift in configuration")]
    Duration(#[from] DurationError),
}

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Input file `{0}` could not be opened")]
    Input(String, #[source] std::io::Error),
    #[error("Output file `{0}` could not be created")]
    Output(String, #[source] std::io::Error),
    #[error("File or directory `{0}` is not accessible")]
    Inaccessible(String),
}
