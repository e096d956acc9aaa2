//! API-Football response types.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Provider-assigned fixture identifier.
pub type FixtureId = u64;

/// Envelope shared by every endpoint: `{ "response": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    /// Result items.
    pub response: Vec<T>,
    /// Item count reported by the provider.
    #[serde(default)]
    pub results: u32,
    /// Provider-side errors (`[]` when none, an object keyed by cause otherwise).
    #[serde(default)]
    pub errors: Value,
}

impl<T> ApiResponse<T> {
    /// Returns the first result, if any.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.response.first()
    }

    /// Returns `true` if the provider reported errors in the envelope.
    ///
    /// API-Football answers bad keys and exhausted quotas with HTTP 200,
    /// an empty `response` and a populated `errors` field.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        match &self.errors {
            Value::Null => false,
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
            Value::String(s) => !s.is_empty(),
            Value::Bool(_) | Value::Number(_) => true,
        }
    }
}

// --- Fixtures ---

/// A single item of the `fixtures` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureEntry {
    /// Fixture metadata.
    pub fixture: FixtureDetail,
    /// Home and away teams.
    pub teams: Option<FixtureTeams>,
}

/// Fixture metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureDetail {
    /// Fixture ID.
    pub id: FixtureId,
    /// Kickoff as ISO-8601 (e.g. `2024-03-10T20:00:00+00:00`).
    pub date: Option<String>,
    /// Kickoff as unix seconds.
    pub timestamp: Option<i64>,
}

/// Both participating teams.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureTeams {
    /// Home side.
    pub home: TeamRef,
    /// Away side.
    pub away: TeamRef,
}

/// Team identifier and display name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TeamRef {
    /// Team ID.
    pub id: u64,
    /// Display name.
    pub name: String,
}

// --- Lineups ---

/// One team's block of the `fixtures/lineups` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamLineup {
    /// Team the lineup belongs to.
    pub team: TeamRef,
    /// Head coach.
    pub coach: Coach,
    /// Formation string (e.g. `4-3-3`).
    pub formation: Option<String>,
    /// Starting eleven, in provider order.
    #[serde(rename = "startXI")]
    pub start_xi: Vec<PlayerSlot>,
    /// Substitutes, in provider order.
    pub substitutes: Vec<PlayerSlot>,
}

/// Head coach.
#[derive(Debug, Clone, Deserialize)]
pub struct Coach {
    /// Coach ID.
    pub id: Option<u64>,
    /// Coach name.
    pub name: Option<String>,
}

/// Wrapper object around each lineup player (`{ "player": {...} }`).
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerSlot {
    /// Player entry.
    pub player: LineupPlayer,
}

/// A lineup player.
#[derive(Debug, Clone, Deserialize)]
pub struct LineupPlayer {
    /// Player ID.
    pub id: Option<u64>,
    /// Player name (`null` for some unregistered players).
    pub name: Option<String>,
    /// Shirt number.
    pub number: Option<u32>,
    /// Position code (`G`, `D`, `M`, `F`).
    pub pos: Option<String>,
    /// On-field grid position.
    #[serde(default)]
    pub grid: Grid,
}

/// The `grid` field of a lineup player.
///
/// Keeps the distinction between a missing key and an explicit `null`,
/// which the provider uses differently for starters and substitutes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Grid {
    /// Key absent from the payload.
    #[default]
    Missing,
    /// Key present with a `null` value.
    Null,
    /// Key present with a value (e.g. `1:1`).
    Value(String),
}

impl Grid {
    /// Returns the value, treating both `Missing` and `Null` as absent.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Value(v) => Some(v),
            Self::Missing | Self::Null => None,
        }
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?.map_or(Self::Null, Self::Value))
    }
}
