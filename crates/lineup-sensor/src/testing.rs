//! In-memory `LocalFootballApi` used by the unit tests.
#![allow(clippy::unwrap_used)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, bail};
use lineup_api::apifootball::{
    ApiResponse, FixtureEntry, FixtureId, FixtureQuery, LocalFootballApi, TeamLineup,
};

pub const FIXTURES_LAST: &str = include_str!("../../../fixtures/api_football/fixtures_last_529.json");
pub const FIXTURES_EMPTY: &str = include_str!("../../../fixtures/api_football/fixtures_empty.json");
pub const FIXTURE_BY_ID: &str = include_str!("../../../fixtures/api_football/fixture_1038150.json");
pub const LINEUPS: &str = include_str!("../../../fixtures/api_football/lineups_1038150.json");
pub const ERROR_ENVELOPE: &str =
    include_str!("../../../fixtures/api_football/error_invalid_key.json");

/// Canned-payload API. `None` payloads simulate a transport failure.
#[derive(Debug)]
pub struct MockApi {
    latest: Mutex<Option<String>>,
    by_id: Mutex<Option<String>>,
    lineups: Mutex<Option<String>>,
    pub latest_calls: AtomicUsize,
    pub by_id_calls: AtomicUsize,
    pub lineup_calls: AtomicUsize,
}

impl MockApi {
    pub fn new(latest: &str, by_id: &str, lineups: &str) -> Self {
        Self {
            latest: Mutex::new(Some(String::from(latest))),
            by_id: Mutex::new(Some(String::from(by_id))),
            lineups: Mutex::new(Some(String::from(lineups))),
            latest_calls: AtomicUsize::new(0),
            by_id_calls: AtomicUsize::new(0),
            lineup_calls: AtomicUsize::new(0),
        }
    }

    /// Full Barcelona vs Real Madrid fixture.
    pub fn clasico() -> Self {
        Self::new(FIXTURES_LAST, FIXTURE_BY_ID, LINEUPS)
    }

    pub fn set_latest(&self, body: Option<&str>) {
        *self.latest.lock().unwrap() = body.map(String::from);
    }

    pub fn set_by_id(&self, body: Option<&str>) {
        *self.by_id.lock().unwrap() = body.map(String::from);
    }

    pub fn set_lineups(&self, body: Option<&str>) {
        *self.lineups.lock().unwrap() = body.map(String::from);
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: Option<String>) -> Result<T> {
    let Some(body) = body else {
        bail!("request failed: connection refused");
    };
    Ok(serde_json::from_str(&body)?)
}

impl LocalFootballApi for MockApi {
    async fn latest_fixtures(&self, _query: &FixtureQuery) -> Result<ApiResponse<FixtureEntry>> {
        self.latest_calls.fetch_add(1, Ordering::SeqCst);
        let body = self.latest.lock().unwrap().clone();
        decode(body)
    }

    async fn fixture_by_id(&self, _fixture_id: FixtureId) -> Result<ApiResponse<FixtureEntry>> {
        self.by_id_calls.fetch_add(1, Ordering::SeqCst);
        let body = self.by_id.lock().unwrap().clone();
        decode(body)
    }

    async fn fixture_lineups(&self, _fixture_id: FixtureId) -> Result<ApiResponse<TeamLineup>> {
        self.lineup_calls.fetch_add(1, Ordering::SeqCst);
        let body = self.lineups.lock().unwrap().clone();
        decode(body)
    }
}
