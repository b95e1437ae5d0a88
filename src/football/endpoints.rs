//! Request builders for the football API, each with its cache window

use std::time::Duration;

use chrono::NaiveDate;

use super::client::ApiRequest;

pub const LIVE_TTL: Duration = Duration::from_secs(30);
pub const FIXTURES_BY_DATE_TTL: Duration = Duration::from_secs(5 * 60);
pub const FIXTURE_TTL: Duration = Duration::from_secs(60);
pub const HEAD_TO_HEAD_TTL: Duration = Duration::from_secs(60 * 60);
pub const STANDINGS_TTL: Duration = Duration::from_secs(60 * 60);
pub const PREDICTIONS_TTL: Duration = Duration::from_secs(60 * 60);
pub const LEAGUES_TTL: Duration = Duration::from_secs(24 * 60 * 60);
pub const TEAM_TTL: Duration = Duration::from_secs(24 * 60 * 60);

pub fn live_fixtures() -> ApiRequest {
    ApiRequest::new("/fixtures", LIVE_TTL).param("live", "all")
}

pub fn fixtures_by_date(
    date: NaiveDate,
    league: Option<u32>,
    season: Option<u32>,
    timezone: Option<&str>,
) -> ApiRequest {
    ApiRequest::new("/fixtures", FIXTURES_BY_DATE_TTL)
        .param("date", date.format("%Y-%m-%d"))
        .param_opt("league", league)
        .param_opt("season", season)
        .param_opt("timezone", timezone)
}

pub fn fixture_by_id(fixture: u64) -> ApiRequest {
    ApiRequest::new("/fixtures", FIXTURE_TTL).param("id", fixture)
}

pub fn fixture_events(fixture: u64) -> ApiRequest {
    ApiRequest::new("/fixtures/events", FIXTURE_TTL).param("fixture", fixture)
}

pub fn fixture_lineups(fixture: u64) -> ApiRequest {
    ApiRequest::new("/fixtures/lineups", FIXTURE_TTL).param("fixture", fixture)
}

pub fn fixture_statistics(fixture: u64) -> ApiRequest {
    ApiRequest::new("/fixtures/statistics", FIXTURE_TTL).param("fixture", fixture)
}

pub fn head_to_head(team_a: u32, team_b: u32, last: Option<u32>) -> ApiRequest {
    ApiRequest::new("/fixtures/headtohead", HEAD_TO_HEAD_TTL)
        .param("h2h", format!("{}-{}", team_a, team_b))
        .param_opt("last", last)
}

pub fn standings(league: u32, season: u32) -> ApiRequest {
    ApiRequest::new("/standings", STANDINGS_TTL)
        .param("league", league)
        .param("season", season)
}

pub fn predictions(fixture: u64) -> ApiRequest {
    ApiRequest::new("/predictions", PREDICTIONS_TTL).param("fixture", fixture)
}

pub fn leagues(country: Option<&str>, current_only: bool) -> ApiRequest {
    let request = ApiRequest::new("/leagues", LEAGUES_TTL).param_opt("country", country);
    if current_only {
        request.param("current", "true")
    } else {
        request
    }
}

pub fn team(team: u32) -> ApiRequest {
    ApiRequest::new("/teams", TEAM_TTL).param("id", team)
}
