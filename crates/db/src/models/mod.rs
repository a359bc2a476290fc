//! Row structs and DTOs.
//!
//! Entity structs derive `FromRow`; the ones returned to clients also derive
//! `Serialize`. Write-side inputs are plain structs built by handlers.

pub mod distrito;
pub mod estadistica;
pub mod foto;
pub mod mesa;
pub mod partido;
pub mod recinto;
pub mod resultado;
pub mod session;
pub mod status;
pub mod user;
