//! Configuration for MAGMA.
//!
//! Settings are read from `~/.magma/config.ini`. A missing file means
//! defaults; a present file only needs the keys it wants to change:
//!
//! ```ini
//! [panorama]
//! api_key = AIza...
//! wide_radius = 8000
//! ```
//!
//! Individual keys can be read and written by name through [`ConfigKey`].

mod defaults;
mod file;
mod keys;
mod parser;
mod settings;
mod writer;

pub use defaults::DEFAULT_LOG_FILE_NAME;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use keys::{ConfigKey, ConfigKeyError};
pub use settings::{
    ConfigFile, DescriptionSettings, GeologySettings, LoggingSettings, NetworkSettings,
    PanoramaSettings, API_KEY_ENV_VAR,
};
