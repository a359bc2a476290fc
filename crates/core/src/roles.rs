//! Account roles.
//!
//! Names must match the seed rows in `20260301000002_create_users.sql`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    Admin,
    /// Transcribes tally sheets into vote counts.
    Operador,
    /// Photographs and uploads tally sheets.
    Voluntario,
    /// Reads the dashboards.
    Observador,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Operador, Role::Voluntario, Role::Observador];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Operador => "operador",
            Role::Voluntario => "voluntario",
            Role::Observador => "observador",
        }
    }

    /// May transcribe vote counts and view any uploaded acta.
    pub fn can_digitize(self) -> bool {
        matches!(self, Role::Admin | Role::Operador)
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown role '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn names_parse_back() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert_matches!("jefe".parse::<Role>(), Err(CoreError::Validation(_)));
        assert_matches!("Admin".parse::<Role>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn only_operators_and_admins_digitize() {
        let digitizers: Vec<Role> = Role::ALL.into_iter().filter(|r| r.can_digitize()).collect();
        assert_eq!(digitizers, vec![Role::Admin, Role::Operador]);
    }

    #[test]
    fn serializes_as_seed_name() {
        assert_eq!(serde_json::to_string(&Role::Voluntario).unwrap(), "\"voluntario\"");
    }
}
