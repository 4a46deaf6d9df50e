pub mod config;
pub mod error;
pub mod icons;
pub mod templates;

pub use config::{Config, DragonConfig};
pub use error::ConfigError;
pub use icons::IconRegistry;
