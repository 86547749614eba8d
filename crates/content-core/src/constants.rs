//! Constantes del motor core.
//!
//! Valores estáticos que participan en el cálculo de fingerprints. Cambiar
//! `ENGINE_VERSION` invalida los fingerprints previos aunque la definición y
//! los datos no cambien.

/// Versión lógica del motor. Entra en cada fingerprint de step y de flujo.
pub const ENGINE_VERSION: &str = "CF1.0";

/// Identificador usado en errores de esquema producidos en la entrada del flujo
/// (antes de ejecutar cualquier step).
pub const ENTRY_BOUNDARY_ID: &str = "$entry";

/// Identificador usado en errores de esquema producidos a la salida del flujo.
pub const EXIT_BOUNDARY_ID: &str = "$exit";
