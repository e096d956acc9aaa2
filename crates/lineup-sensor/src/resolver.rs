//! Fixture Resolver and Fixture Detail Resolver.
#![allow(clippy::future_not_send)]

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat};
use lineup_api::apifootball::{
    ApiResponse, FixtureEntry, FixtureId, FixtureQuery, LocalFootballApi,
};
use serde::Serialize;
use tracing::instrument;

/// Home/away teams and kickoff of one fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixtureInfo {
    /// Home team display name.
    pub home_team: String,
    /// Home team ID.
    pub home_team_id: u64,
    /// Away team display name.
    pub away_team: String,
    /// Away team ID.
    pub away_team_id: u64,
    /// Kickoff as ISO-8601.
    pub fixture_date: String,
}

impl FixtureInfo {
    /// Extracts the teams and kickoff from a `fixtures` item.
    ///
    /// The provider's `date` string is kept verbatim. When it is absent the
    /// unix `timestamp` is rendered as RFC 3339 UTC instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the item has no `teams` object or no usable
    /// kickoff field.
    pub fn from_entry(entry: &FixtureEntry) -> Result<Self> {
        let fixture_id = entry.fixture.id;
        let teams = entry
            .teams
            .as_ref()
            .with_context(|| format!("fixture {fixture_id} has no teams"))?;
        let fixture_date = kickoff(entry)
            .with_context(|| format!("fixture {fixture_id} has no usable kickoff time"))?;

        Ok(Self {
            home_team: teams.home.name.clone(),
            home_team_id: teams.home.id,
            away_team: teams.away.name.clone(),
            away_team_id: teams.away.id,
            fixture_date,
        })
    }
}

fn kickoff(entry: &FixtureEntry) -> Option<String> {
    if let Some(date) = &entry.fixture.date {
        return Some(date.clone());
    }
    let ts = entry.fixture.timestamp?;
    DateTime::from_timestamp(ts, 0).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Logs provider-side errors carried in an otherwise successful envelope.
///
/// The refresh still treats the (empty) result list as "no data".
pub(crate) fn warn_on_envelope_errors<T>(response: &ApiResponse<T>, endpoint: &str) {
    if response.has_errors() {
        tracing::warn!(endpoint, errors = %response.errors, "API-Football reported errors");
    }
}

/// Resolves the ID of the most recent fixture matching `query`.
///
/// Returns `Ok(None)` when the provider has no matching fixture; the caller
/// should skip this cycle.
///
/// # Errors
///
/// Returns an error if the request fails or the response cannot be decoded.
#[instrument(skip_all, fields(team = query.team, league = query.league, season = query.season))]
pub async fn resolve_latest_fixture(
    api: &(impl LocalFootballApi + Sync),
    query: &FixtureQuery,
) -> Result<Option<FixtureId>> {
    let response = api
        .latest_fixtures(query)
        .await
        .context("failed to fetch latest fixture")?;
    warn_on_envelope_errors(&response, "fixtures");

    let fixture_id = response.first().map(|entry| entry.fixture.id);
    match fixture_id {
        Some(id) => tracing::debug!(fixture_id = id, "latest fixture resolved"),
        None => tracing::debug!("no fixture matches the filter"),
    }
    Ok(fixture_id)
}

/// Resolves the home/away teams and kickoff of a fixture.
///
/// Returns `Ok(None)` when the provider returns no item for the ID.
///
/// # Errors
///
/// Returns an error if the request fails, the response cannot be decoded,
/// or the item lacks its teams or kickoff.
#[instrument(skip_all, fields(fixture_id = fixture_id))]
pub async fn resolve_fixture_info(
    api: &(impl LocalFootballApi + Sync),
    fixture_id: FixtureId,
) -> Result<Option<FixtureInfo>> {
    let response = api
        .fixture_by_id(fixture_id)
        .await
        .with_context(|| format!("failed to fetch fixture {fixture_id}"))?;
    warn_on_envelope_errors(&response, "fixtures");

    let Some(entry) = response.first() else {
        tracing::debug!("fixture not found");
        return Ok(None);
    };
    let info = FixtureInfo::from_entry(entry)?;
    tracing::debug!(
        home = %info.home_team,
        away = %info.away_team,
        kickoff = %info.fixture_date,
        "fixture details resolved"
    );
    Ok(Some(info))
}
