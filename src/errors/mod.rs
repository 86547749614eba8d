//! Errores de la capa de host.

mod config_error;
mod workflow_error;

pub use config_error::ConfigError;
pub use workflow_error::WorkflowError;
