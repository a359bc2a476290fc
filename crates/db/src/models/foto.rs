//! Tally sheet photo model.

use escrutinio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use ts_rs::TS;

/// A row from the `fotos_mesa` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct FotoMesa {
    pub id: DbId,
    pub mesa_id: DbId,
    pub usuario_id: DbId,
    pub origen: String,
    pub storage_path: String,
    pub created_at: Timestamp,
}

/// DTO for recording an uploaded photo.
#[derive(Debug)]
pub struct CreateFotoMesa {
    pub mesa_id: DbId,
    pub usuario_id: DbId,
    pub origen: String,
    pub storage_path: String,
}
