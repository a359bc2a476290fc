//! Polling table ("mesa") models.

use escrutinio_core::navigator::TableRecord;
use escrutinio_core::tally::TableMeta;
use escrutinio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use ts_rs::TS;

use super::status::{MesaStatus, StatusId};

/// A row from the `mesas` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Mesa {
    pub id: DbId,
    pub recinto_id: DbId,
    pub numero_mesa: i32,
    pub habilitados: Option<i32>,
    pub es_prioridad: bool,
    pub estado_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A table with its venue and district names, as the vote entry form shows it.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct MesaDetalle {
    pub id: DbId,
    pub numero_mesa: i32,
    pub habilitados: Option<i32>,
    pub es_prioridad: bool,
    pub estado_id: StatusId,
    pub recinto_id: DbId,
    pub recinto_nombre: String,
    pub distrito_id: DbId,
    pub distrito_nombre: String,
}

impl MesaDetalle {
    pub fn registrada(&self) -> bool {
        MesaStatus::is_registered(self.estado_id)
    }

    /// Facts the submission guard needs. A stored `habilitados` of 0 means
    /// the roll was never loaded, so it imposes no bound.
    pub fn meta(&self) -> TableMeta {
        TableMeta {
            mesa_id: self.id,
            numero_mesa: self.numero_mesa,
            habilitados: self
                .habilitados
                .and_then(|h| u32::try_from(h).ok())
                .filter(|h| *h > 0),
            registrada: self.registrada(),
        }
    }
}

/// Minimal table listing used by the upload page's table picker.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct MesaOpcion {
    pub id: DbId,
    pub numero_mesa: i32,
}

/// One flat navigator row: a table joined with venue and district and
/// flagged with whether it has results and photos.
#[derive(Debug, Clone, FromRow)]
pub struct MesaNavegacion {
    pub mesa_id: DbId,
    pub numero_mesa: i32,
    pub es_prioridad: bool,
    pub estado_id: StatusId,
    pub digitada: bool,
    pub con_foto: bool,
    pub recinto_id: DbId,
    pub recinto_nombre: String,
    pub distrito_id: DbId,
    pub distrito_nombre: String,
}

impl From<MesaNavegacion> for TableRecord {
    fn from(row: MesaNavegacion) -> Self {
        Self {
            mesa_id: row.mesa_id,
            numero_mesa: row.numero_mesa,
            es_prioridad: row.es_prioridad,
            registrada: MesaStatus::is_registered(row.estado_id),
            digitada: row.digitada,
            con_foto: row.con_foto,
            recinto_id: row.recinto_id,
            recinto_nombre: row.recinto_nombre,
            distrito_id: row.distrito_id,
            distrito_nombre: row.distrito_nombre,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detalle(estado_id: StatusId, habilitados: Option<i32>) -> MesaDetalle {
        MesaDetalle {
            id: 5,
            numero_mesa: 12,
            habilitados,
            es_prioridad: false,
            estado_id,
            recinto_id: 1,
            recinto_nombre: "Escuela".into(),
            distrito_id: 2,
            distrito_nombre: "DISTRITO 2".into(),
        }
    }

    #[test]
    fn meta_reflects_status_and_capacity() {
        let m = detalle(MesaStatus::Registrado.id(), Some(220)).meta();
        assert!(m.registrada);
        assert_eq!(m.habilitados, Some(220));
        assert_eq!(m.numero_mesa, 12);
    }

    #[test]
    fn missing_capacity_stays_unknown() {
        let m = detalle(MesaStatus::Pendiente.id(), None).meta();
        assert!(!m.registrada);
        assert_eq!(m.habilitados, None);
    }

    #[test]
    fn zero_capacity_imposes_no_bound() {
        let m = detalle(MesaStatus::Pendiente.id(), Some(0)).meta();
        assert_eq!(m.habilitados, None);
    }
}
