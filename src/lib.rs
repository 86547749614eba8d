//! ContentFlow Rust Library
//!
//! Este crate actúa como la capa de host de ContentFlow:
//! - Expone `config` para cargar los ajustes desde el entorno (.env).
//! - Expone `registry` con el trait async `Workflow` y el registro de
//!   workflows disponibles.
//! - Expone `errors` con los errores de configuración y de ejecución.
//!
//! Puede usarse desde el binario `contentflow` (crate content-cli) o por otros
//! crates/clientes.

pub mod config;
pub mod errors;
pub mod registry;

pub use config::Config;
pub use errors::{ConfigError, WorkflowError};
pub use registry::{Workflow, WorkflowRegistry};
