//! Ballot layout for the vote entry form.
//!
//! Parties are laid out in two columns by `orden`: the first
//! [`LEFT_COLUMN_SIZE`] in the left column, the rest in the right one.
//! Inputs are indexed in visual order (left column top to bottom, then the
//! right column) and the advance key moves to the next index.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::DbId;

/// Number of parties in the left column.
pub const LEFT_COLUMN_SIZE: usize = 7;

/// The party facts the form renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BallotParty {
    pub id: DbId,
    pub codigo: String,
    pub nombre: String,
    pub orden: i32,
}

/// One input slot of the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct BallotField {
    /// Position in visual (focus) order.
    pub index: usize,
    pub party: BallotParty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct BallotLayout {
    pub left: Vec<BallotField>,
    pub right: Vec<BallotField>,
}

impl BallotLayout {
    /// Lay out `parties` sorted by `orden` (ties by id).
    pub fn from_parties(parties: &[BallotParty]) -> Self {
        let mut sorted = parties.to_vec();
        sorted.sort_by_key(|p| (p.orden, p.id));

        let fields: Vec<BallotField> = sorted
            .into_iter()
            .enumerate()
            .map(|(index, party)| BallotField { index, party })
            .collect();

        let split = fields.len().min(LEFT_COLUMN_SIZE);
        let mut left = fields;
        let right = left.split_off(split);
        Self { left, right }
    }

    pub fn len(&self) -> usize {
        self.left.len() + self.right.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fields in focus order: the whole left column, then the right one.
    pub fn visual_order(&self) -> impl Iterator<Item = &BallotField> {
        self.left.iter().chain(self.right.iter())
    }

    /// Index that receives focus when the advance key is pressed on `index`.
    ///
    /// `None` on the last field; focus stays where it is.
    pub fn next_field(&self, index: usize) -> Option<usize> {
        let next = index.checked_add(1)?;
        (next < self.len()).then_some(next)
    }

    /// Party bound to a field index.
    pub fn party_at(&self, index: usize) -> Option<&BallotParty> {
        self.visual_order()
            .find(|f| f.index == index)
            .map(|f| &f.party)
    }
}

/// What the vote entry page is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "state", rename_all = "snake_case")]
#[ts(export)]
pub enum EntryView {
    Editing,
    /// Results stored; offers navigation back to the district's table list.
    Saved { distrito_id: DbId },
}

impl EntryView {
    /// Transition after a successful submission.
    pub fn saved(self, distrito_id: DbId) -> Self {
        match self {
            Self::Editing => Self::Saved { distrito_id },
            saved @ Self::Saved { .. } => saved,
        }
    }

    /// Route of the table list the saved view links back to.
    pub fn return_route(&self) -> Option<String> {
        match self {
            Self::Editing => None,
            Self::Saved { distrito_id } => Some(format!("/digitacion/{distrito_id}")),
        }
    }
}
