//! Shared support for the clock face: wall-clock angles, config persistence
//! and logger setup.

pub mod config;
pub mod logging;
pub mod time_engine;

pub use config::{config_dir, config_path, load_config, save_config, ConfigError};
pub use logging::{init_logging, LoggingConfig};
pub use time_engine::{parse_timezone, wall_clock, TimeAngles};
