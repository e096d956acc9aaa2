//! Lineup sensor pipeline for football-lineup.
//!
//! Each refresh resolves the latest fixture, optionally resolves its home and
//! away teams, fetches the lineups and publishes them as one immutable
//! [`Snapshot`].

/// Fixture and fixture-detail resolution.
pub mod resolver;
/// Sensor entity and refresh orchestration.
pub mod sensor;
/// Published snapshot types.
pub mod snapshot;
/// Lineup payload to snapshot transformation.
pub mod transform;

pub use resolver::{FixtureInfo, resolve_fixture_info, resolve_latest_fixture};
pub use sensor::{DEFAULT_NAME, LineupSensor, Mode, RefreshOutcome};
pub use snapshot::{
    Attributes, LineupAttributes, MatchAttributes, PlayerEntry, SideLineup, Snapshot,
};
pub use transform::{LineupTarget, both_sides_snapshot, fetch_and_transform, single_team_snapshot};

#[cfg(test)]
mod testing;
