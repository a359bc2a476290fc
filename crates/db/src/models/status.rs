//! Polling table status, mirroring the `mesa_estados` lookup table.

/// `mesa_estados.id` is a SMALLINT.
pub type StatusId = i16;

/// A table starts `Pendiente` and becomes `Registrado` when its tally is
/// committed. It never goes back.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MesaStatus {
    Pendiente = 1,
    Registrado = 2,
}

impl MesaStatus {
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// Whether a stored `estado_id` means the tally is in.
    pub fn is_registered(estado_id: StatusId) -> bool {
        estado_id == MesaStatus::Registrado.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_seed_order() {
        assert_eq!(MesaStatus::Pendiente.id(), 1);
        assert_eq!(MesaStatus::Registrado.id(), 2);
    }

    #[test]
    fn only_registrado_counts_as_registered() {
        assert!(MesaStatus::is_registered(2));
        assert!(!MesaStatus::is_registered(1));
        assert!(!MesaStatus::is_registered(0));
    }
}
