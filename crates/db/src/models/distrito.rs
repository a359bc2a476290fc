//! District model.

use escrutinio_core::navigator::DistrictRecord;
use escrutinio_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `distritos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Distrito {
    pub id: DbId,
    pub nombre: String,
}

impl From<Distrito> for DistrictRecord {
    fn from(d: Distrito) -> Self {
        Self {
            id: d.id,
            nombre: d.nombre,
        }
    }
}
