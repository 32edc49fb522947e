pub mod config;

pub use config::{config_dir, default_store_path, CONFIG_DIR_ENV};
