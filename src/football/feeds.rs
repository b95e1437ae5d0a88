//! Page-level reads built on the cached fetch layer

use chrono::NaiveDate;

use super::client::FootballClient;
use super::display::{self, LeagueGroup, StandingsGroup};
use super::endpoints;
use super::models::{
    LeagueSummary, Lineup, Match, MatchDetail, MatchEvent, MatchPhase, Prediction, RawEvent,
    RawFixture, RawLeagueResponse, RawLineup, RawPredictionResponse, RawStandingsResponse,
    RawTeamResponse, RawTeamStatistics, StandingRow, TeamProfile, TeamStatistics,
};
use crate::errors::Result;

impl FootballClient {
    pub async fn live_matches(&self, league: Option<u32>) -> Result<Vec<LeagueGroup>> {
        let matches: Vec<Match> = self
            .fetch_list::<RawFixture, Match>(&endpoints::live_fixtures())
            .await?;
        let matches = display::filter_live(matches);
        let matches = match league {
            Some(id) => display::filter_by_league(matches, id),
            None => matches,
        };
        Ok(display::group_by_league(matches))
    }

    pub async fn fixtures_for_date(
        &self,
        date: NaiveDate,
        league: Option<u32>,
        season: Option<u32>,
        timezone: Option<&str>,
        phase: Option<MatchPhase>,
    ) -> Result<Vec<LeagueGroup>> {
        let request = endpoints::fixtures_by_date(date, league, season, timezone);
        let matches = self.fetch_list::<RawFixture, Match>(&request).await?;
        let matches = match phase {
            Some(phase) => display::filter_by_status(matches, phase),
            None => matches,
        };
        Ok(display::group_by_league(matches))
    }

    /// Match with events, lineups and statistics; `None` for an unknown id
    pub async fn match_detail(&self, fixture: u64) -> Result<Option<MatchDetail>> {
        let fixture_request = endpoints::fixture_by_id(fixture);
        let events_request = endpoints::fixture_events(fixture);
        let lineups_request = endpoints::fixture_lineups(fixture);
        let statistics_request = endpoints::fixture_statistics(fixture);

        let (matches, events, lineups, statistics) = tokio::try_join!(
            self.fetch_list::<RawFixture, Match>(&fixture_request),
            self.fetch_list::<RawEvent, MatchEvent>(&events_request),
            self.fetch_list::<RawLineup, Lineup>(&lineups_request),
            self.fetch_list::<RawTeamStatistics, TeamStatistics>(&statistics_request),
        )?;

        Ok(matches.into_iter().next().map(|fixture| MatchDetail {
            fixture,
            events,
            lineups,
            statistics,
        }))
    }

    pub async fn prediction(&self, fixture: u64) -> Result<Option<Prediction>> {
        let predictions = self
            .fetch_list::<RawPredictionResponse, Prediction>(&endpoints::predictions(fixture))
            .await?;
        Ok(predictions.into_iter().next())
    }

    pub async fn standings(&self, league: u32, season: u32) -> Result<Vec<StandingsGroup>> {
        let responses = self
            .fetch_list::<RawStandingsResponse, RawStandingsResponse>(&endpoints::standings(
                league, season,
            ))
            .await?;

        let tables = responses
            .into_iter()
            .flat_map(|r| r.league.standings)
            .map(|table| table.into_iter().map(StandingRow::from).collect())
            .collect();
        Ok(display::standings_groups(tables))
    }

    pub async fn leagues(
        &self,
        country: Option<&str>,
        current_only: bool,
    ) -> Result<Vec<LeagueSummary>> {
        self.fetch_list::<RawLeagueResponse, LeagueSummary>(&endpoints::leagues(
            country,
            current_only,
        ))
        .await
    }

    pub async fn team(&self, team: u32) -> Result<Option<TeamProfile>> {
        let teams = self
            .fetch_list::<RawTeamResponse, TeamProfile>(&endpoints::team(team))
            .await?;
        Ok(teams.into_iter().next())
    }

    /// Previous meetings, most recent first
    pub async fn head_to_head(
        &self,
        team_a: u32,
        team_b: u32,
        last: Option<u32>,
    ) -> Result<Vec<Match>> {
        let mut matches = self
            .fetch_list::<RawFixture, Match>(&endpoints::head_to_head(team_a, team_b, last))
            .await?;
        matches.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(matches)
    }
}
