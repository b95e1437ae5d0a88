//! Page data built from the football API

use actix_web::{Responder, Result as ActixResult, web};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use crate::api::services::admin::{ErrorCode, api_result, optional_result};
use crate::football::display::limit;
use crate::football::{FootballClient, MatchPhase};

#[derive(Deserialize, Debug, Default)]
pub struct FixturesQuery {
    /// `YYYY-MM-DD`, today (UTC) when missing
    pub date: Option<NaiveDate>,
    pub league: Option<u32>,
    pub season: Option<u32>,
    pub timezone: Option<String>,
    /// `live`, `finished`, `scheduled` or `other`
    pub status: Option<MatchPhase>,
}

#[derive(Deserialize, Debug, Default)]
pub struct LiveQuery {
    pub league: Option<u32>,
}

#[derive(Deserialize, Debug)]
pub struct StandingsQuery {
    pub league: u32,
    pub season: u32,
}

#[derive(Deserialize, Debug, Default)]
pub struct LeaguesQuery {
    pub country: Option<String>,
    #[serde(default)]
    pub current: bool,
}

#[derive(Deserialize, Debug)]
pub struct HeadToHeadQuery {
    pub team1: u32,
    pub team2: u32,
    pub last: Option<u32>,
    pub limit: Option<usize>,
}

pub async fn fixtures(
    query: web::Query<FixturesQuery>,
    football: web::Data<Arc<FootballClient>>,
) -> ActixResult<impl Responder> {
    let date = query
        .date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    Ok(api_result(
        football
            .fixtures_for_date(
                date,
                query.league,
                query.season,
                query.timezone.as_deref(),
                query.status,
            )
            .await,
    ))
}

pub async fn live(
    query: web::Query<LiveQuery>,
    football: web::Data<Arc<FootballClient>>,
) -> ActixResult<impl Responder> {
    Ok(api_result(football.live_matches(query.league).await))
}

pub async fn fixture_detail(
    path: web::Path<u64>,
    football: web::Data<Arc<FootballClient>>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    Ok(optional_result(
        football.match_detail(id).await,
        ErrorCode::NotFound,
        &format!("Fixture {} not found", id),
    ))
}

pub async fn prediction(
    path: web::Path<u64>,
    football: web::Data<Arc<FootballClient>>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    Ok(optional_result(
        football.prediction(id).await,
        ErrorCode::NotFound,
        &format!("No prediction for fixture {}", id),
    ))
}

pub async fn standings(
    query: web::Query<StandingsQuery>,
    football: web::Data<Arc<FootballClient>>,
) -> ActixResult<impl Responder> {
    Ok(api_result(football.standings(query.league, query.season).await))
}

pub async fn leagues(
    query: web::Query<LeaguesQuery>,
    football: web::Data<Arc<FootballClient>>,
) -> ActixResult<impl Responder> {
    Ok(api_result(
        football
            .leagues(query.country.as_deref(), query.current)
            .await,
    ))
}

pub async fn team(
    path: web::Path<u32>,
    football: web::Data<Arc<FootballClient>>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    Ok(optional_result(
        football.team(id).await,
        ErrorCode::NotFound,
        &format!("Team {} not found", id),
    ))
}

pub async fn head_to_head(
    query: web::Query<HeadToHeadQuery>,
    football: web::Data<Arc<FootballClient>>,
) -> ActixResult<impl Responder> {
    let result = football
        .head_to_head(query.team1, query.team2, query.last)
        .await
        .map(|matches| limit(matches, query.limit));
    Ok(api_result(result))
}

pub fn football_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/fixtures", web::get().to(fixtures))
        .route("/fixtures/live", web::get().to(live))
        .route("/fixtures/{id}", web::get().to(fixture_detail))
        .route("/fixtures/{id}/predictions", web::get().to(prediction))
        .route("/standings", web::get().to(standings))
        .route("/leagues", web::get().to(leagues))
        .route("/teams/{id}", web::get().to(team))
        .route("/h2h", web::get().to(head_to_head));
}
