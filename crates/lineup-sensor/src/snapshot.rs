//! Published snapshot types.
//!
//! A [`Snapshot`] is the display string plus attribute map the host sees
//! after a successful refresh. It is built once as a value and never mutated.

use anyhow::{Context, Result};
use serde::Serialize;

/// One player as published in `starting_xi` or `substitutes`.
///
/// `grid` is always serialized; `None` becomes `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerEntry {
    /// Player name.
    pub name: Option<String>,
    /// Player ID.
    #[serde(rename = "ID")]
    pub id: Option<u64>,
    /// Position code.
    pub position: Option<String>,
    /// Shirt number.
    pub number: Option<u32>,
    /// Grid position.
    pub grid: Option<String>,
}

/// One team's lineup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineupAttributes {
    /// Head coach name.
    pub coach: Option<String>,
    /// Formation string.
    pub formation: Option<String>,
    /// Starting eleven, provider order.
    pub starting_xi: Vec<PlayerEntry>,
    /// Substitutes, provider order.
    pub substitutes: Vec<PlayerEntry>,
}

/// A side's lineup in a both-sides snapshot; `{}` when the provider sent
/// no block for that side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SideLineup {
    /// Lineup block found.
    Present(LineupAttributes),
    /// No block for this side.
    Missing {},
}

impl SideLineup {
    /// Returns the lineup if present.
    #[must_use]
    pub const fn as_lineup(&self) -> Option<&LineupAttributes> {
        match self {
            Self::Present(lineup) => Some(lineup),
            Self::Missing {} => None,
        }
    }
}

/// Attributes of a both-sides snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchAttributes {
    /// Home team display name.
    pub home_team: String,
    /// Home lineup or `{}`.
    pub home_team_lineup: SideLineup,
    /// Away team display name.
    pub away_team: String,
    /// Away lineup or `{}`.
    pub away_team_lineup: SideLineup,
    /// Kickoff as ISO-8601.
    pub fixture_date: String,
}

/// Attribute map of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Attributes {
    /// Single-team mode.
    Team(LineupAttributes),
    /// Both-sides mode.
    Match(MatchAttributes),
}

/// Display state plus attributes from one refresh cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Display string, e.g. `Barcelona lineup`.
    pub state: String,
    /// Attribute map.
    pub attributes: Attributes,
}

impl Snapshot {
    /// Serializes the snapshot as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("failed to serialize snapshot")
    }
}
