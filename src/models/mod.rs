pub mod config;
pub mod picbed;

pub use config::{LogConfig, LogFormat, LogLevel, LogOutput};
pub use picbed::{
    PicBedType, ProviderListing, UploaderConfigItem, UploaderProfile, DEFAULT_CONFIG_NAME,
    PINNED_PICBED_TYPE,
};
