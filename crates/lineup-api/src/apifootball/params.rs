//! Query parameters for the `fixtures` endpoint.

use serde::{Deserialize, Serialize};

/// Filter selecting one team's fixtures in a competition season.
///
/// Sent with `last=1` so the provider returns only the most recent fixture.
/// Missing fields deserialize to the defaults below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureQuery {
    /// Season start year (e.g. 2023 for 2023/24).
    pub season: u16,
    /// League ID (e.g. 140 for La Liga).
    pub league: u32,
    /// Team ID (e.g. 529 for Barcelona).
    pub team: u64,
}

impl Default for FixtureQuery {
    fn default() -> Self {
        Self {
            season: 2023,
            league: 140,
            team: 529,
        }
    }
}

impl FixtureQuery {
    /// Creates a new query.
    #[must_use]
    pub const fn new(season: u16, league: u32, team: u64) -> Self {
        Self {
            season,
            league,
            team,
        }
    }

    /// Builds the query string pairs for the latest-fixture request.
    pub(crate) fn to_latest_query(self) -> Vec<(&'static str, String)> {
        vec![
            ("season", self.season.to_string()),
            ("league", self.league.to_string()),
            ("team", self.team.to_string()),
            ("last", String::from("1")),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_query_pairs() {
        // Arrange
        let query = FixtureQuery::new(2024, 39, 33);

        // Act
        let pairs = query.to_latest_query();

        // Assert
        assert_eq!(
            pairs,
            vec![
                ("season", String::from("2024")),
                ("league", String::from("39")),
                ("team", String::from("33")),
                ("last", String::from("1")),
            ]
        );
    }

    #[test]
    fn test_default_is_barcelona_la_liga() {
        // Arrange & Act
        let query = FixtureQuery::default();

        // Assert
        assert_eq!(query.team, 529);
        assert_eq!(query.league, 140);
        assert_eq!(query.season, 2023);
    }
}
