pub mod config;
pub mod errors;

pub use self::config::Settings;
pub use self::errors::PipelineError;
