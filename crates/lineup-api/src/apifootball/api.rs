//! `FootballApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::params::FixtureQuery;
use super::types::{ApiResponse, FixtureEntry, FixtureId, TeamLineup};

/// API-Football trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(FootballApi: Send)]
pub trait LocalFootballApi {
    /// Fetches the most recent fixture matching the query (`last=1`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn latest_fixtures(&self, query: &FixtureQuery) -> Result<ApiResponse<FixtureEntry>>;

    /// Fetches a single fixture by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn fixture_by_id(&self, fixture_id: FixtureId) -> Result<ApiResponse<FixtureEntry>>;

    /// Fetches the per-team lineup blocks of a fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn fixture_lineups(&self, fixture_id: FixtureId) -> Result<ApiResponse<TeamLineup>>;
}
