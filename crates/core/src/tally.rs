//! Vote tally for a single polling table (mesa).
//!
//! The tally holds per-party counts plus null and blank votes. Every total
//! is derived on demand from that state, never accumulated, so the
//! eligible-voter check can be evaluated in isolation at any point:
//!
//! - `valid_total`  = sum of party counts (absent parties count as zero)
//! - `grand_total`  = `valid_total` + nulls + blanks
//! - `exceeds`      = `grand_total` > eligible voters, only when that bound is known

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ballot::BallotParty;
use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Raw form input
// ---------------------------------------------------------------------------

/// A raw count as typed into a form field.
///
/// Clients may send either a JSON number or the field's text. Empty text is
/// an untouched field and counts as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CountInput {
    Number(i64),
    Text(String),
}

impl Default for CountInput {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl CountInput {
    /// Resolve the input into a non-negative count.
    ///
    /// `field` names the input in the validation message.
    pub fn resolve(&self, field: &str) -> Result<u32, CoreError> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(0);
                }
                trimmed.parse::<i64>().map_err(|_| {
                    CoreError::Validation(format!("{field} must be a whole number, got '{trimmed}'"))
                })?
            }
        };

        if value < 0 {
            return Err(CoreError::Validation(format!(
                "{field} must not be negative"
            )));
        }
        u32::try_from(value)
            .map_err(|_| CoreError::Validation(format!("{field} is out of range")))
    }
}

/// Vote entry form as posted by the client.
///
/// `votos` is keyed by party id; parties missing from the map were left empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoteForm {
    #[serde(default)]
    pub votos: BTreeMap<DbId, CountInput>,
    #[serde(default)]
    pub nulos: CountInput,
    #[serde(default)]
    pub blancos: CountInput,
}

// ---------------------------------------------------------------------------
// Tally
// ---------------------------------------------------------------------------

/// Per-party counts plus null and blank votes for one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteTally {
    votes: BTreeMap<DbId, u32>,
    nulls: u32,
    blanks: u32,
}

impl VoteTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a posted form. Any malformed field rejects the whole form.
    pub fn from_form(form: &VoteForm) -> Result<Self, CoreError> {
        let mut tally = Self::new();
        for (party_id, input) in &form.votos {
            let count = input.resolve(&format!("Votes for party {party_id}"))?;
            tally.set_votes(*party_id, count);
        }
        tally.set_nulls(form.nulos.resolve("Null votes")?);
        tally.set_blanks(form.blancos.resolve("Blank votes")?);
        Ok(tally)
    }

    pub fn set_votes(&mut self, party_id: DbId, count: u32) {
        self.votes.insert(party_id, count);
    }

    pub fn set_nulls(&mut self, count: u32) {
        self.nulls = count;
    }

    pub fn set_blanks(&mut self, count: u32) {
        self.blanks = count;
    }

    /// Count for one party; untouched parties are zero.
    pub fn votes_for(&self, party_id: DbId) -> u32 {
        self.votes.get(&party_id).copied().unwrap_or(0)
    }

    pub fn nulls(&self) -> u32 {
        self.nulls
    }

    pub fn blanks(&self) -> u32 {
        self.blanks
    }

    /// Party ids that carry an entry, in ascending order.
    pub fn party_ids(&self) -> impl Iterator<Item = DbId> + '_ {
        self.votes.keys().copied()
    }

    pub fn valid_total(&self) -> u64 {
        self.votes.values().map(|v| u64::from(*v)).sum()
    }

    pub fn grand_total(&self) -> u64 {
        self.valid_total() + u64::from(self.nulls) + u64::from(self.blanks)
    }

    /// Whether the grand total overflows the eligible-voter bound.
    ///
    /// With no known bound nothing is enforced.
    pub fn exceeds(&self, habilitados: Option<u32>) -> bool {
        habilitados.is_some_and(|limit| self.grand_total() > u64::from(limit))
    }

    /// Snapshot of every derived figure, as shown in the form's summary panel.
    pub fn totals(&self, habilitados: Option<u32>) -> TallyTotals {
        TallyTotals {
            votos_validos: self.valid_total(),
            votos_nulos: self.nulls,
            votos_blancos: self.blanks,
            total_general: self.grand_total(),
            habilitados,
            excede_habilitados: self.exceeds(habilitados),
        }
    }
}

/// Derived totals for the summary panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct TallyTotals {
    pub votos_validos: u64,
    pub votos_nulos: u32,
    pub votos_blancos: u32,
    pub total_general: u64,
    pub habilitados: Option<u32>,
    pub excede_habilitados: bool,
}

// ---------------------------------------------------------------------------
// Submission guard
// ---------------------------------------------------------------------------

/// The table facts the submission guard needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMeta {
    pub mesa_id: DbId,
    pub numero_mesa: i32,
    pub habilitados: Option<u32>,
    pub registrada: bool,
}

/// Whether the submit action is enabled for the current form state.
///
/// Disabled until the table metadata has loaded, and whenever the grand
/// total exceeds the eligible voters.
pub fn can_submit(meta: Option<&TableMeta>, tally: &VoteTally) -> bool {
    meta.is_some_and(|m| !tally.exceeds(m.habilitados))
}

/// Reject a submission that must not reach the data service.
pub fn check_submission(meta: Option<&TableMeta>, tally: &VoteTally) -> Result<(), CoreError> {
    let meta = meta.ok_or_else(|| {
        CoreError::Validation("Table information has not been loaded".into())
    })?;

    if meta.registrada {
        return Err(CoreError::AlreadyRegistered {
            numero_mesa: meta.numero_mesa,
        });
    }

    if tally.exceeds(meta.habilitados) {
        return Err(CoreError::ExceedsEligible {
            total: tally.grand_total(),
            habilitados: meta.habilitados.unwrap_or_default(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Submission plan
// ---------------------------------------------------------------------------

/// One `resultados_mesa` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyResult {
    pub partido_id: DbId,
    pub votos: i32,
}

/// The single `resultados_mesa_totales` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableTotals {
    pub votos_validos: i32,
    pub votos_nulos: i32,
    pub votos_blancos: i32,
}

/// Everything written for one accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPlan {
    pub mesa_id: DbId,
    pub results: Vec<PartyResult>,
    pub totals: TableTotals,
    pub registrado_por: DbId,
}

impl SubmissionPlan {
    /// Build the rows for a guarded submission.
    ///
    /// Produces one result per active party in ballot order, zero-valued
    /// ones included. Counts for parties outside the active set are rejected.
    pub fn build(
        meta: &TableMeta,
        parties: &[BallotParty],
        tally: &VoteTally,
        registrado_por: DbId,
    ) -> Result<Self, CoreError> {
        check_submission(Some(meta), tally)?;

        let active: HashSet<DbId> = parties.iter().map(|p| p.id).collect();
        if let Some(unknown) = tally.party_ids().find(|id| !active.contains(id)) {
            return Err(CoreError::Validation(format!(
                "Party {unknown} is not an active party"
            )));
        }

        let mut ordered: Vec<&BallotParty> = parties.iter().collect();
        ordered.sort_by_key(|p| (p.orden, p.id));

        let results = ordered
            .into_iter()
            .map(|p| {
                Ok(PartyResult {
                    partido_id: p.id,
                    votos: to_column(u64::from(tally.votes_for(p.id)))?,
                })
            })
            .collect::<Result<Vec<_>, CoreError>>()?;

        Ok(Self {
            mesa_id: meta.mesa_id,
            results,
            totals: TableTotals {
                votos_validos: to_column(tally.valid_total())?,
                votos_nulos: to_column(u64::from(tally.nulls()))?,
                votos_blancos: to_column(u64::from(tally.blanks()))?,
            },
            registrado_por,
        })
    }
}

/// Narrow a count to the INTEGER column width.
fn to_column(value: u64) -> Result<i32, CoreError> {
    i32::try_from(value).map_err(|_| CoreError::Validation(format!("Count {value} is too large")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
