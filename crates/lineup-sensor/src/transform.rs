//! Lineup Fetcher/Transformer.
#![allow(clippy::future_not_send)]

use anyhow::{Context, Result, bail};
use lineup_api::apifootball::{FixtureId, Grid, LineupPlayer, LocalFootballApi, TeamLineup};
use tracing::instrument;

use crate::resolver::{FixtureInfo, warn_on_envelope_errors};
use crate::snapshot::{
    Attributes, LineupAttributes, MatchAttributes, PlayerEntry, SideLineup, Snapshot,
};

/// Whose lineup a refresh publishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineupTarget {
    /// Only the block of this team.
    Team {
        /// Team ID to pick from the response.
        team_id: u64,
    },
    /// Both sides, labelled from the fixture details.
    Match(FixtureInfo),
}

fn player_entry(player: &LineupPlayer, grid: Option<String>) -> PlayerEntry {
    PlayerEntry {
        name: player.name.clone(),
        id: player.id,
        position: player.pos.clone(),
        number: player.number,
        grid,
    }
}

/// Name for error messages, falling back to the ID when the name is `null`.
fn player_label(player: &LineupPlayer) -> String {
    match (&player.name, player.id) {
        (Some(name), _) => name.clone(),
        (None, Some(id)) => format!("#{id}"),
        (None, None) => String::from("<unnamed>"),
    }
}

/// Starters must carry a `grid` key; its value (possibly `null`) is kept.
fn starter_entry(player: &LineupPlayer) -> Result<PlayerEntry> {
    let grid = match &player.grid {
        Grid::Missing => bail!(
            "starting player {} has no grid field",
            player_label(player)
        ),
        Grid::Null => None,
        Grid::Value(grid) => Some(grid.clone()),
    };
    Ok(player_entry(player, grid))
}

/// Substitutes without a `grid` key get `null`.
fn substitute_entry(player: &LineupPlayer) -> PlayerEntry {
    player_entry(player, player.grid.value().map(String::from))
}

/// Projects one team block into its published lineup.
///
/// # Errors
///
/// Returns an error if a starting player has no `grid` field.
pub fn lineup_attributes(block: &TeamLineup) -> Result<LineupAttributes> {
    let starting_xi = block
        .start_xi
        .iter()
        .map(|slot| starter_entry(&slot.player))
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("malformed lineup for {}", block.team.name))?;
    let substitutes = block
        .substitutes
        .iter()
        .map(|slot| substitute_entry(&slot.player))
        .collect();

    Ok(LineupAttributes {
        coach: block.coach.name.clone(),
        formation: block.formation.clone(),
        starting_xi,
        substitutes,
    })
}

/// Builds a single-team snapshot from the first block of `team_id`.
///
/// Returns `Ok(None)` when the team has no block in the response.
///
/// # Errors
///
/// Returns an error if the team's block is malformed.
pub fn single_team_snapshot(blocks: &[TeamLineup], team_id: u64) -> Result<Option<Snapshot>> {
    let Some(block) = blocks.iter().find(|block| block.team.id == team_id) else {
        return Ok(None);
    };
    let lineup = lineup_attributes(block)?;

    Ok(Some(Snapshot {
        state: format!("{} lineup", block.team.name),
        attributes: Attributes::Team(lineup),
    }))
}

fn side_lineup(blocks: &[TeamLineup], team_id: u64) -> Result<SideLineup> {
    blocks
        .iter()
        .find(|block| block.team.id == team_id)
        .map_or(Ok(SideLineup::Missing {}), |block| {
            lineup_attributes(block).map(SideLineup::Present)
        })
}

/// Builds a both-sides snapshot.
///
/// A side without a block in the response is published as `{}`; names and
/// kickoff always come from `info`.
///
/// # Errors
///
/// Returns an error if a present block is malformed.
pub fn both_sides_snapshot(blocks: &[TeamLineup], info: &FixtureInfo) -> Result<Snapshot> {
    let home_team_lineup = side_lineup(blocks, info.home_team_id)?;
    let away_team_lineup = side_lineup(blocks, info.away_team_id)?;

    if home_team_lineup.as_lineup().is_none() || away_team_lineup.as_lineup().is_none() {
        tracing::debug!(
            home_present = home_team_lineup.as_lineup().is_some(),
            away_present = away_team_lineup.as_lineup().is_some(),
            "lineup response is missing a side"
        );
    }

    Ok(Snapshot {
        state: format!("{} vs {} lineups", info.home_team, info.away_team),
        attributes: Attributes::Match(MatchAttributes {
            home_team: info.home_team.clone(),
            home_team_lineup,
            away_team: info.away_team.clone(),
            away_team_lineup,
            fixture_date: info.fixture_date.clone(),
        }),
    })
}

/// Fetches the lineups of `fixture_id` and reshapes them for `target`.
///
/// Returns `Ok(None)` when the response has no blocks at all, or in
/// single-team mode when the team's block is absent.
///
/// # Errors
///
/// Returns an error if the request fails or the payload is malformed.
#[instrument(skip_all, fields(fixture_id = fixture_id))]
pub async fn fetch_and_transform(
    api: &(impl LocalFootballApi + Sync),
    fixture_id: FixtureId,
    target: &LineupTarget,
) -> Result<Option<Snapshot>> {
    let response = api
        .fixture_lineups(fixture_id)
        .await
        .with_context(|| format!("failed to fetch lineups for fixture {fixture_id}"))?;
    warn_on_envelope_errors(&response, "fixtures/lineups");

    if response.response.is_empty() {
        tracing::debug!("no lineups published yet");
        return Ok(None);
    }

    match target {
        LineupTarget::Team { team_id } => {
            let snapshot = single_team_snapshot(&response.response, *team_id)?;
            if snapshot.is_none() {
                tracing::debug!(team_id, "team not present in lineup response");
            }
            Ok(snapshot)
        }
        LineupTarget::Match(info) => both_sides_snapshot(&response.response, info).map(Some),
    }
}
