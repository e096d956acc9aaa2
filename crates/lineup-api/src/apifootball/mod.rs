//! API-Football v3 client module.
//!
//! Handles authenticated requests to the `fixtures` endpoints and decodes
//! the `{ "response": [...] }` envelope shared by every endpoint.

mod api;
mod client;
mod key;
mod params;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{FootballApi, LocalFootballApi};
pub use client::{FootballClient, FootballClientBuilder};
pub use key::ApiKey;
pub use params::FixtureQuery;
pub use types::{
    ApiResponse, Coach, FixtureDetail, FixtureEntry, FixtureId, FixtureTeams, Grid, LineupPlayer,
    PlayerSlot, TeamLineup, TeamRef,
};
