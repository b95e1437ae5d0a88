//! Shaping fetched fixtures and standings for the pages

use std::collections::HashMap;

use serde::Serialize;

use super::models::{LeagueInfo, Match, MatchPhase, StandingRow};

/// Leagues shown first, in this order: Thai League 1, Premier League, La Liga,
/// Serie A, Bundesliga, Ligue 1, Champions League, Europa League
pub const PRIORITY_LEAGUES: &[u32] = &[296, 39, 140, 135, 78, 61, 2, 3];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueGroup {
    pub league: LeagueInfo,
    pub matches: Vec<Match>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsGroup {
    pub name: String,
    pub rows: Vec<StandingRow>,
}

fn priority(league_id: u32) -> usize {
    PRIORITY_LEAGUES
        .iter()
        .position(|&id| id == league_id)
        .unwrap_or(PRIORITY_LEAGUES.len())
}

/// Group by league: priority leagues first, the rest by name; matches by
/// kick-off then id
pub fn group_by_league(matches: Vec<Match>) -> Vec<LeagueGroup> {
    let mut index: HashMap<u32, usize> = HashMap::new();
    let mut groups: Vec<LeagueGroup> = Vec::new();

    for m in matches {
        match index.get(&m.league.id) {
            Some(&i) => groups[i].matches.push(m),
            None => {
                index.insert(m.league.id, groups.len());
                groups.push(LeagueGroup {
                    league: m.league.clone(),
                    matches: vec![m],
                });
            }
        }
    }

    for group in &mut groups {
        group
            .matches
            .sort_by(|a, b| a.start_time.cmp(&b.start_time).then(a.id.cmp(&b.id)));
    }
    groups.sort_by(|a, b| {
        priority(a.league.id)
            .cmp(&priority(b.league.id))
            .then_with(|| a.league.name.cmp(&b.league.name))
            .then(a.league.id.cmp(&b.league.id))
    });
    groups
}

pub fn filter_by_league(matches: Vec<Match>, league_id: u32) -> Vec<Match> {
    matches
        .into_iter()
        .filter(|m| m.league.id == league_id)
        .collect()
}

pub fn filter_live(matches: Vec<Match>) -> Vec<Match> {
    filter_by_status(matches, MatchPhase::Live)
}

pub fn filter_by_status(matches: Vec<Match>, phase: MatchPhase) -> Vec<Match> {
    matches.into_iter().filter(|m| m.phase() == phase).collect()
}

/// Ascending rank; ties keep upstream order
pub fn sort_standings(mut rows: Vec<StandingRow>) -> Vec<StandingRow> {
    rows.sort_by_key(|r| r.rank);
    rows
}

/// One group per upstream table (cup group stages return several)
pub fn standings_groups(tables: Vec<Vec<StandingRow>>) -> Vec<StandingsGroup> {
    tables
        .into_iter()
        .filter(|rows| !rows.is_empty())
        .enumerate()
        .map(|(i, rows)| {
            let name = rows
                .iter()
                .find_map(|r| r.group.clone())
                .unwrap_or_else(|| format!("Group {}", i + 1));
            StandingsGroup {
                name,
                rows: sort_standings(rows),
            }
        })
        .collect()
}

/// First `n` items, or all of them
pub fn limit<T>(mut items: Vec<T>, n: Option<usize>) -> Vec<T> {
    if let Some(n) = n {
        items.truncate(n);
    }
    items
}
