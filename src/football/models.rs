//! Football API response shapes and the normalized types served to the site
//!
//! `Raw*` structs mirror the upstream JSON; everything else is what the
//! livescore pages consume (camelCase).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Common wrapper around every API response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub response: Vec<T>,
    /// Either `[]` or an object keyed by the failing parameter
    #[serde(default)]
    pub errors: Value,
    #[serde(default)]
    pub results: u32,
    #[serde(default)]
    pub paging: Option<Paging>,
    #[serde(default)]
    pub parameters: Option<Value>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct Paging {
    pub current: u32,
    pub total: u32,
}

impl<T> ApiEnvelope<T> {
    /// Upstream reported errors in a 200 response
    pub fn error_message(&self) -> Option<String> {
        match &self.errors {
            Value::Array(items) if !items.is_empty() => Some(
                items
                    .iter()
                    .map(value_to_text)
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            Value::Object(map) if !map.is_empty() => Some(
                map.iter()
                    .map(|(k, v)| format!("{}: {}", k, value_to_text(v)))
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }
}

fn value_to_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ============ Match status ============

/// Coarse phase derived from the upstream short status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPhase {
    Live,
    Finished,
    Scheduled,
    Other,
}

impl MatchPhase {
    pub fn classify(short: &str) -> Self {
        match short {
            "1H" | "HT" | "2H" | "ET" | "BT" | "P" | "SUSP" | "INT" | "LIVE" => Self::Live,
            "FT" | "AET" | "PEN" => Self::Finished,
            "TBD" | "NS" => Self::Scheduled,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStatus {
    pub short: String,
    pub long: String,
    pub elapsed: Option<u32>,
    pub phase: MatchPhase,
}

// ============ Fixtures ============

#[derive(Debug, Clone, Deserialize)]
pub struct RawFixture {
    pub fixture: RawFixtureInfo,
    pub league: RawLeague,
    pub teams: RawTeams,
    #[serde(default)]
    pub goals: RawGoals,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawFixtureInfo {
    pub id: u64,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub referee: Option<String>,
    #[serde(default)]
    pub venue: Option<RawVenue>,
    pub status: RawStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVenue {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStatus {
    #[serde(default)]
    pub long: String,
    #[serde(default)]
    pub short: String,
    #[serde(default)]
    pub elapsed: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLeague {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub season: Option<u32>,
    #[serde(default)]
    pub round: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTeam {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTeams {
    pub home: RawTeam,
    pub away: RawTeam,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RawGoals {
    pub home: Option<u32>,
    pub away: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueInfo {
    pub id: u32,
    pub name: String,
    pub logo: Option<String>,
    pub country: Option<String>,
    pub flag: Option<String>,
    pub season: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamScore {
    pub id: u32,
    pub name: String,
    pub logo: Option<String>,
    pub goals: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: u64,
    pub status: MatchStatus,
    pub start_time: DateTime<Utc>,
    pub round: Option<String>,
    pub venue: Option<String>,
    pub referee: Option<String>,
    pub league: LeagueInfo,
    pub home: TeamScore,
    pub away: TeamScore,
}

impl Match {
    pub fn phase(&self) -> MatchPhase {
        self.status.phase
    }

    pub fn is_live(&self) -> bool {
        self.status.phase == MatchPhase::Live
    }
}

impl From<RawFixture> for Match {
    fn from(raw: RawFixture) -> Self {
        let phase = MatchPhase::classify(&raw.fixture.status.short);
        let venue = raw.fixture.venue.and_then(|v| match (v.name, v.city) {
            (Some(name), Some(city)) => Some(format!("{}, {}", name, city)),
            (name, city) => name.or(city),
        });
        Match {
            id: raw.fixture.id,
            status: MatchStatus {
                short: raw.fixture.status.short,
                long: raw.fixture.status.long,
                elapsed: raw.fixture.status.elapsed,
                phase,
            },
            start_time: raw.fixture.date,
            round: raw.league.round.clone(),
            venue,
            referee: raw.fixture.referee,
            league: LeagueInfo {
                id: raw.league.id,
                name: raw.league.name,
                logo: raw.league.logo,
                country: raw.league.country,
                flag: raw.league.flag,
                season: raw.league.season,
            },
            home: TeamScore {
                id: raw.teams.home.id,
                name: raw.teams.home.name,
                logo: raw.teams.home.logo,
                goals: raw.goals.home,
            },
            away: TeamScore {
                id: raw.teams.away.id,
                name: raw.teams.away.name,
                logo: raw.teams.away.logo,
                goals: raw.goals.away,
            },
        }
    }
}

// ============ Events / lineups / statistics ============

#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    pub time: RawEventTime,
    pub team: RawTeam,
    #[serde(default)]
    pub player: Option<RawPerson>,
    #[serde(default)]
    pub assist: Option<RawPerson>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEventTime {
    pub elapsed: Option<u32>,
    #[serde(default)]
    pub extra: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPerson {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvent {
    pub elapsed: Option<u32>,
    pub extra: Option<u32>,
    pub team_id: u32,
    pub team_name: String,
    pub player: Option<String>,
    pub assist: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub detail: String,
    pub comments: Option<String>,
}

impl From<RawEvent> for MatchEvent {
    fn from(raw: RawEvent) -> Self {
        MatchEvent {
            elapsed: raw.time.elapsed,
            extra: raw.time.extra,
            team_id: raw.team.id,
            team_name: raw.team.name,
            player: raw.player.and_then(|p| p.name),
            assist: raw.assist.and_then(|p| p.name),
            kind: raw.kind,
            detail: raw.detail,
            comments: raw.comments,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLineup {
    pub team: RawTeam,
    #[serde(default)]
    pub formation: Option<String>,
    #[serde(rename = "startXI", default)]
    pub start_xi: Vec<RawLineupEntry>,
    #[serde(default)]
    pub substitutes: Vec<RawLineupEntry>,
    #[serde(default)]
    pub coach: Option<RawPerson>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLineupEntry {
    pub player: RawLineupPlayer,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLineupPlayer {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub pos: Option<String>,
    #[serde(default)]
    pub grid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupPlayer {
    pub id: Option<u32>,
    pub name: String,
    pub number: Option<u32>,
    pub position: Option<String>,
    pub grid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lineup {
    pub team_id: u32,
    pub team_name: String,
    pub team_logo: Option<String>,
    pub formation: Option<String>,
    pub coach: Option<String>,
    pub start_xi: Vec<LineupPlayer>,
    pub substitutes: Vec<LineupPlayer>,
}

impl From<RawLineupPlayer> for LineupPlayer {
    fn from(raw: RawLineupPlayer) -> Self {
        LineupPlayer {
            id: raw.id,
            name: raw.name,
            number: raw.number,
            position: raw.pos,
            grid: raw.grid,
        }
    }
}

impl From<RawLineup> for Lineup {
    fn from(raw: RawLineup) -> Self {
        Lineup {
            team_id: raw.team.id,
            team_name: raw.team.name,
            team_logo: raw.team.logo,
            formation: raw.formation,
            coach: raw.coach.and_then(|c| c.name),
            start_xi: raw.start_xi.into_iter().map(|e| e.player.into()).collect(),
            substitutes: raw.substitutes.into_iter().map(|e| e.player.into()).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTeamStatistics {
    pub team: RawTeam,
    #[serde(default)]
    pub statistics: Vec<RawStatistic>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStatistic {
    #[serde(rename = "type")]
    pub kind: String,
    /// Number, percentage string or null
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStatistics {
    pub team_id: u32,
    pub team_name: String,
    pub statistics: Vec<StatEntry>,
}

impl From<RawTeamStatistics> for TeamStatistics {
    fn from(raw: RawTeamStatistics) -> Self {
        TeamStatistics {
            team_id: raw.team.id,
            team_name: raw.team.name,
            statistics: raw
                .statistics
                .into_iter()
                .map(|s| StatEntry {
                    kind: s.kind,
                    value: s.value,
                })
                .collect(),
        }
    }
}

/// Everything the match detail page shows
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetail {
    #[serde(rename = "match")]
    pub fixture: Match,
    pub events: Vec<MatchEvent>,
    pub lineups: Vec<Lineup>,
    pub statistics: Vec<TeamStatistics>,
}

// ============ Standings ============

#[derive(Debug, Clone, Deserialize)]
pub struct RawStandingsResponse {
    pub league: RawStandingsLeague,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStandingsLeague {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub season: Option<u32>,
    #[serde(default)]
    pub standings: Vec<Vec<RawStandingRow>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStandingRow {
    pub rank: u32,
    pub team: RawTeam,
    #[serde(default)]
    pub points: i32,
    #[serde(default)]
    pub goals_diff: i32,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub form: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub all: RawRecord,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub played: u32,
    #[serde(default)]
    pub win: u32,
    #[serde(default)]
    pub draw: u32,
    #[serde(default)]
    pub lose: u32,
    #[serde(default)]
    pub goals: RawRecordGoals,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RawRecordGoals {
    #[serde(rename = "for", default)]
    pub scored: Option<u32>,
    #[serde(default)]
    pub against: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingRow {
    pub rank: u32,
    pub team_id: u32,
    pub team_name: String,
    pub team_logo: Option<String>,
    pub points: i32,
    pub goals_diff: i32,
    pub group: Option<String>,
    pub form: Option<String>,
    pub description: Option<String>,
    pub played: u32,
    pub win: u32,
    pub draw: u32,
    pub lose: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl From<RawStandingRow> for StandingRow {
    fn from(raw: RawStandingRow) -> Self {
        StandingRow {
            rank: raw.rank,
            team_id: raw.team.id,
            team_name: raw.team.name,
            team_logo: raw.team.logo,
            points: raw.points,
            goals_diff: raw.goals_diff,
            group: raw.group,
            form: raw.form,
            description: raw.description,
            played: raw.all.played,
            win: raw.all.win,
            draw: raw.all.draw,
            lose: raw.all.lose,
            goals_for: raw.all.goals.scored.unwrap_or(0),
            goals_against: raw.all.goals.against.unwrap_or(0),
        }
    }
}

// ============ Predictions ============

#[derive(Debug, Clone, Deserialize)]
pub struct RawPredictionResponse {
    pub predictions: RawPrediction,
    #[serde(default)]
    pub comparison: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPrediction {
    #[serde(default)]
    pub winner: Option<RawPredictionWinner>,
    #[serde(default)]
    pub win_or_draw: Option<bool>,
    #[serde(default)]
    pub under_over: Option<String>,
    #[serde(default)]
    pub advice: Option<String>,
    #[serde(default)]
    pub percent: Option<RawPercent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPredictionWinner {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPercent {
    #[serde(default)]
    pub home: Option<String>,
    #[serde(default)]
    pub draw: Option<String>,
    #[serde(default)]
    pub away: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub winner_id: Option<u32>,
    pub winner_name: Option<String>,
    pub winner_comment: Option<String>,
    pub win_or_draw: Option<bool>,
    pub under_over: Option<String>,
    pub advice: Option<String>,
    pub percent_home: Option<String>,
    pub percent_draw: Option<String>,
    pub percent_away: Option<String>,
    pub comparison: Option<Value>,
}

impl From<RawPredictionResponse> for Prediction {
    fn from(raw: RawPredictionResponse) -> Self {
        let p = raw.predictions;
        let (winner_id, winner_name, winner_comment) = match p.winner {
            Some(w) => (w.id, w.name, w.comment),
            None => (None, None, None),
        };
        let (percent_home, percent_draw, percent_away) = match p.percent {
            Some(pc) => (pc.home, pc.draw, pc.away),
            None => (None, None, None),
        };
        Prediction {
            winner_id,
            winner_name,
            winner_comment,
            win_or_draw: p.win_or_draw,
            under_over: p.under_over,
            advice: p.advice,
            percent_home,
            percent_draw,
            percent_away,
            comparison: raw.comparison,
        }
    }
}

// ============ Leagues / teams ============

#[derive(Debug, Clone, Deserialize)]
pub struct RawLeagueResponse {
    pub league: RawLeagueBasic,
    #[serde(default)]
    pub country: Option<RawCountry>,
    #[serde(default)]
    pub seasons: Vec<RawSeason>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLeagueBasic {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCountry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub flag: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSeason {
    pub year: u32,
    #[serde(default)]
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueSummary {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub logo: Option<String>,
    pub country: Option<String>,
    pub flag: Option<String>,
    pub current_season: Option<u32>,
}

impl From<RawLeagueResponse> for LeagueSummary {
    fn from(raw: RawLeagueResponse) -> Self {
        let current_season = raw
            .seasons
            .iter()
            .find(|s| s.current)
            .or_else(|| raw.seasons.iter().max_by_key(|s| s.year))
            .map(|s| s.year);
        let (country, flag) = match raw.country {
            Some(c) => (c.name, c.flag),
            None => (None, None),
        };
        LeagueSummary {
            id: raw.league.id,
            name: raw.league.name,
            kind: raw.league.kind,
            logo: raw.league.logo,
            country,
            flag,
            current_season,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTeamResponse {
    pub team: RawTeamDetail,
    #[serde(default)]
    pub venue: Option<RawVenue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTeamDetail {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub founded: Option<u32>,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamProfile {
    pub id: u32,
    pub name: String,
    pub code: Option<String>,
    pub country: Option<String>,
    pub founded: Option<u32>,
    pub logo: Option<String>,
    pub venue_name: Option<String>,
    pub venue_city: Option<String>,
}

impl From<RawTeamResponse> for TeamProfile {
    fn from(raw: RawTeamResponse) -> Self {
        let venue = raw.venue.unwrap_or_default();
        TeamProfile {
            id: raw.team.id,
            name: raw.team.name,
            code: raw.team.code,
            country: raw.team.country,
            founded: raw.team.founded,
            logo: raw.team.logo,
            venue_name: venue.name,
            venue_city: venue.city,
        }
    }
}
