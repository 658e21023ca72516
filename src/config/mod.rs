//! Configuración del proyecto
//!
//! Variables de entorno y constantes de configuración del sistema.

pub mod environment;

pub use environment::*;
