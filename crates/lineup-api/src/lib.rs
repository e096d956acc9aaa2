//! API client library for football-lineup.
//!
//! Provides a client for the API-Football v3 REST API.

/// API-Football v3 client.
pub mod apifootball;
