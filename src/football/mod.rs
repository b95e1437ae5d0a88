//! Third-party football statistics API: cached fetching, typed responses and
//! the grouping/sorting the pages apply on top

pub mod client;
pub mod display;
pub mod endpoints;
mod feeds;
pub mod models;

pub use client::{ApiRequest, FootballClient};
pub use display::{LeagueGroup, StandingsGroup};
pub use models::{Match, MatchDetail, MatchPhase};
