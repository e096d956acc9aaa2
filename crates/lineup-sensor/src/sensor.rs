//! `LineupSensor` - the host-facing entity.
#![allow(clippy::future_not_send)]

use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};
use lineup_api::apifootball::{FixtureQuery, LocalFootballApi};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;

use crate::resolver::{resolve_fixture_info, resolve_latest_fixture};
use crate::snapshot::{Attributes, Snapshot};
use crate::transform::{LineupTarget, fetch_and_transform};

/// Default entity name.
pub const DEFAULT_NAME: &str = "Football Lineup";

/// Which lineups the sensor publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// The configured team's lineup only.
    #[default]
    SingleTeam,
    /// Home and away lineups of the fixture.
    BothSides,
}

impl Mode {
    /// Config name of the mode; matches the serde representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SingleTeam => "single_team",
            Self::BothSides => "both_sides",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one refresh cycle.
///
/// Only `Published` changes the held snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new snapshot replaced the previous one.
    Published,
    /// No fixture matches the filter yet.
    NoFixture,
    /// The fixture-detail lookup returned nothing.
    NoFixtureInfo,
    /// No lineup for the requested team (or no lineups at all) yet.
    TeamAbsent,
}

/// Lineup sensor entity.
///
/// Holds the latest [`Snapshot`]. A refresh either replaces it wholesale or
/// leaves it untouched; a failed or empty cycle keeps the last-known value.
#[derive(Debug)]
pub struct LineupSensor<A> {
    api: A,
    name: String,
    query: FixtureQuery,
    mode: Mode,
    snapshot: Option<Arc<Snapshot>>,
}

impl<A: LocalFootballApi + Sync> LineupSensor<A> {
    /// Creates a sensor with no snapshot yet.
    pub fn new(api: A, name: impl Into<String>, query: FixtureQuery, mode: Mode) -> Self {
        Self {
            api,
            name: name.into(),
            query,
            mode,
            snapshot: None,
        }
    }

    /// Entity name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Publishing mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Underlying API handle.
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Current display state, `None` before the first successful refresh.
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.snapshot.as_deref().map(|s| s.state.as_str())
    }

    /// Current attributes, `None` before the first successful refresh.
    #[must_use]
    pub fn attributes(&self) -> Option<&Attributes> {
        self.snapshot.as_deref().map(|s| &s.attributes)
    }

    /// Shared handle to the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.snapshot.clone()
    }

    /// Host-facing view: `{ name, state, attributes }`.
    ///
    /// Before the first successful refresh `state` is `null` and
    /// `attributes` is `{}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the attributes cannot be serialized.
    pub fn state_json(&self) -> Result<Value> {
        let attributes = match self.attributes() {
            Some(attrs) => serde_json::to_value(attrs).context("failed to serialize attributes")?,
            None => json!({}),
        };
        Ok(json!({
            "name": self.name,
            "state": self.state(),
            "attributes": attributes,
        }))
    }

    /// Runs one refresh cycle.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a malformed response. The
    /// held snapshot is left untouched in that case.
    #[instrument(skip_all, fields(sensor = %self.name, mode = %self.mode))]
    pub async fn update(&mut self) -> Result<RefreshOutcome> {
        let Some(fixture_id) = resolve_latest_fixture(&self.api, &self.query).await? else {
            return Ok(RefreshOutcome::NoFixture);
        };

        let target = match self.mode {
            Mode::SingleTeam => LineupTarget::Team {
                team_id: self.query.team,
            },
            Mode::BothSides => {
                let Some(info) = resolve_fixture_info(&self.api, fixture_id).await? else {
                    return Ok(RefreshOutcome::NoFixtureInfo);
                };
                LineupTarget::Match(info)
            }
        };

        let Some(snapshot) = fetch_and_transform(&self.api, fixture_id, &target).await? else {
            return Ok(RefreshOutcome::TeamAbsent);
        };

        tracing::info!(fixture_id, state = %snapshot.state, "lineup snapshot published");
        self.snapshot = Some(Arc::new(snapshot));
        Ok(RefreshOutcome::Published)
    }
}
