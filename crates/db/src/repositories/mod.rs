//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument.

pub mod distrito_repo;
pub mod estadistica_repo;
pub mod foto_repo;
pub mod mesa_repo;
pub mod partido_repo;
pub mod recinto_repo;
pub mod resultado_repo;
pub mod role_repo;
pub mod session_repo;
pub mod user_repo;

pub use distrito_repo::DistritoRepo;
pub use estadistica_repo::EstadisticaRepo;
pub use foto_repo::FotoRepo;
pub use mesa_repo::MesaRepo;
pub use partido_repo::PartidoRepo;
pub use recinto_repo::RecintoRepo;
pub use resultado_repo::{ResultadoRepo, SubmitOutcome};
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
