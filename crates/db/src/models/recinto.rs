//! Polling place ("recinto") model.

use escrutinio_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;
use ts_rs::TS;

/// A row from the `recintos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Recinto {
    pub id: DbId,
    pub nombre: String,
    pub distrito_id: DbId,
}

/// A venue joined with its district, as offered by the upload page's picker.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct RecintoConDistrito {
    pub id: DbId,
    pub nombre: String,
    pub distrito_id: DbId,
    pub distrito_nombre: String,
}

impl RecintoConDistrito {
    /// Picker label: `"{venue} — {district}"`.
    pub fn label(&self) -> String {
        format!("{} — {}", self.nombre, self.distrito_nombre)
    }
}
