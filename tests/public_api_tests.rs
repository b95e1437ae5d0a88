//! Public site API tests: proxy, tracking, ads, news, fixtures and health

mod common;

use actix_web::App;
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use chrono::Utc;
use serde_json::{Value, json};

use livescore::api::services::AppStartTime;
use livescore::runtime::modes::server::configure_app;
use livescore::storage::{AdPosition, AdSize, AdStatus, NewAdvertisement, NewsCategory, NewsDraft};

use common::{FakeTransport, test_context};

const API_ROOT: &str = "https://v3.football.api-sports.io";

macro_rules! app {
    ($context:expr) => {{
        let started = AppStartTime {
            start_datetime: Utc::now(),
        };
        test::init_service(App::new().configure(|cfg| configure_app(cfg, &$context, &started)))
            .await
    }};
}

fn ad(name: &str, position: AdPosition, status: AdStatus, image_url: &str) -> NewAdvertisement {
    NewAdvertisement {
        name: name.to_string(),
        position,
        size: AdSize::Large,
        image_url: image_url.to_string(),
        destination_url: "https://sponsor.example.com".to_string(),
        status,
        start_date: None,
        end_date: None,
        revenue: 0.0,
    }
}

// =============================================================================
// Proxy
// =============================================================================

#[actix_rt::test]
async fn test_proxy_requires_endpoint() {
    let transport = FakeTransport::new();
    let (_dir, context) = test_context(transport.clone()).await;
    let app = app!(context);

    let req = TestRequest::get().uri("/api/proxy").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Missing endpoint parameter");

    let req = TestRequest::get()
        .uri("/api/proxy?endpoint=https%3A%2F%2Fevil.example.com%2Fx")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert_eq!(transport.calls(), 0);
}

#[actix_rt::test]
async fn test_proxy_relays_body_and_rate_limit_headers() {
    let transport = FakeTransport::new();
    transport.respond(
        &format!("{}/fixtures", API_ROOT),
        200,
        vec![
            ("content-type".to_string(), "application/json".to_string()),
            ("x-ratelimit-requests-remaining".to_string(), "97".to_string()),
            ("x-unrelated".to_string(), "dropped".to_string()),
        ],
        br#"{"response":[]}"#.to_vec(),
    );
    let (_dir, context) = test_context(transport.clone()).await;
    let app = app!(context);

    let req = TestRequest::get()
        .uri("/api/proxy?endpoint=/fixtures&live=all")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("x-ratelimit-requests-remaining")
            .and_then(|v| v.to_str().ok()),
        Some("97")
    );
    assert!(resp.headers().get("x-unrelated").is_none());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "response": [] }));

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.contains("live=all"));
    assert!(!requests[0].url.contains("endpoint="));
    assert!(
        requests[0]
            .headers
            .iter()
            .any(|(_, value)| value == "test-key")
    );
}

#[actix_rt::test]
async fn test_proxy_passes_upstream_status_through() {
    let transport = FakeTransport::new();
    transport.respond_json(
        &format!("{}/standings", API_ROOT),
        429,
        json!({ "message": "Too many requests" }),
    );
    let (_dir, context) = test_context(transport).await;
    let app = app!(context);

    let req = TestRequest::get()
        .uri("/api/proxy?endpoint=/standings&league=39&season=2024")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "API request failed with status 429");
}

#[actix_rt::test]
async fn test_proxy_unreachable_upstream() {
    let (_dir, context) = test_context(FakeTransport::unreachable()).await;
    let app = app!(context);

    let req = TestRequest::get()
        .uri("/api/proxy?endpoint=/fixtures")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Failed to fetch data from API");
}

#[actix_rt::test]
async fn test_blob_proxy_rejects_foreign_hosts() {
    let transport = FakeTransport::new();
    let (_dir, context) = test_context(transport.clone()).await;
    let app = app!(context);

    let req = TestRequest::get()
        .uri("/api/blob-proxy?url=https%3A%2F%2Fevil.example.com%2Fa.png")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = TestRequest::get().uri("/api/blob-proxy").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert_eq!(transport.calls(), 0);
}

#[actix_rt::test]
async fn test_blob_proxy_relays_image() {
    let transport = FakeTransport::new();
    let blob_url = "https://abc.public.blob.vercel-storage.com/ads/banner.png";
    transport.respond(
        blob_url,
        200,
        vec![("content-type".to_string(), "image/png".to_string())],
        vec![0x89, b'P', b'N', b'G'],
    );
    let (_dir, context) = test_context(transport).await;
    let app = app!(context);

    let req = TestRequest::get()
        .uri(&format!(
            "/api/blob-proxy?url={}",
            urlencoding::encode(blob_url)
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("image/png")
    );
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], &[0x89, b'P', b'N', b'G']);
}

#[actix_rt::test]
async fn test_blob_proxy_never_serves_svg_inline() {
    let transport = FakeTransport::new();
    let blob_url = "https://abc.public.blob.vercel-storage.com/ads/logo.svg";
    transport.respond(
        blob_url,
        200,
        vec![("content-type".to_string(), "image/svg+xml".to_string())],
        b"<svg><script>alert(1)</script></svg>".to_vec(),
    );
    let (_dir, context) = test_context(transport).await;
    let app = app!(context);

    let req = TestRequest::get()
        .uri(&format!(
            "/api/blob-proxy?url={}",
            urlencoding::encode(blob_url)
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let header = |name: &str| {
        resp.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    assert_eq!(
        header("content-type").as_deref(),
        Some("application/octet-stream")
    );
    assert_eq!(header("content-disposition").as_deref(), Some("attachment"));
    assert_eq!(
        header("content-security-policy").as_deref(),
        Some("default-src 'none'; sandbox")
    );
}

// =============================================================================
// Ads
// =============================================================================

#[actix_rt::test]
async fn test_tracking_always_answers_no_content() {
    let (_dir, context) = test_context(FakeTransport::new()).await;
    let created = context
        .ads
        .create_ad(ad("Hero", AdPosition::Hero, AdStatus::Active, "/ads/a.png"))
        .await
        .unwrap();
    let app = app!(context);

    for path in [
        format!("/api/ads/{}/impression", created.id),
        format!("/api/ads/{}/impression", created.id),
        format!("/api/ads/{}/click", created.id),
        "/api/ads/9999/impression".to_string(),
        "/api/ads/9999/click".to_string(),
    ] {
        let req = TestRequest::post().uri(&path).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT, "{}", path);
    }

    let stored = context
        .ads
        .get_advertisement_by_id(created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.impressions, 2);
    assert_eq!(stored.clicks, 1);
    assert!((stored.ctr - 50.0).abs() < 1e-9);
}

#[actix_rt::test]
async fn test_public_ads_only_running_in_slot() {
    let (_dir, context) = test_context(FakeTransport::new()).await;
    let blob_image = "https://abc.public.blob.vercel-storage.com/ads/hero.png";
    let hero = context
        .ads
        .create_ad(ad("Hero", AdPosition::Hero, AdStatus::Active, blob_image))
        .await
        .unwrap();
    context
        .ads
        .create_ad(ad("Paused", AdPosition::Hero, AdStatus::Paused, "/ads/p.png"))
        .await
        .unwrap();
    context
        .ads
        .create_ad(ad("Side", AdPosition::Sidebar, AdStatus::Active, "/ads/s.png"))
        .await
        .unwrap();
    let app = app!(context);

    let req = TestRequest::get().uri("/api/ads?position=hero").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let ads = body["data"].as_array().unwrap();
    assert_eq!(ads.len(), 1);
    assert_eq!(ads[0]["id"], hero.id);
    let image = ads[0]["imageUrl"].as_str().unwrap();
    assert!(image.starts_with("/api/blob-proxy?url="));

    let req = TestRequest::get().uri("/api/ads").to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

// =============================================================================
// News and settings
// =============================================================================

#[actix_rt::test]
async fn test_public_news_and_slug_lookup() {
    let (_dir, context) = test_context(FakeTransport::new()).await;
    context
        .storage
        .upsert_news(&[NewsDraft {
            title: "ช้างศึกชนะ".to_string(),
            original_title: None,
            content: "เนื้อหา".to_string(),
            summary: None,
            image_url: None,
            published_at: Utc::now(),
            source: "Test".to_string(),
            category: NewsCategory::Thai,
            slug: "thai-win".to_string(),
            tags: vec![],
            url: None,
        }])
        .await
        .unwrap();
    let app = app!(context);

    let req = TestRequest::get().uri("/api/news?category=thai").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let req = TestRequest::get().uri("/api/news/thai-win").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["title"], "ช้างศึกชนะ");

    let req = TestRequest::get().uri("/api/news/missing").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 5000);
}

#[actix_rt::test]
async fn test_default_logo() {
    let (_dir, context) = test_context(FakeTransport::new()).await;
    let app = app!(context);

    let req = TestRequest::get().uri("/api/settings/logo").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["width"].as_u64().unwrap() > 0);
}

// =============================================================================
// Football
// =============================================================================

#[actix_rt::test]
async fn test_fixtures_grouped_by_league_and_cached() {
    let transport = FakeTransport::new();
    transport.respond_json(
        &format!("{}/fixtures", API_ROOT),
        200,
        json!({
            "response": [
                {
                    "fixture": {
                        "id": 1001,
                        "date": "2025-03-01T12:00:00+00:00",
                        "status": { "short": "NS", "long": "Not Started" }
                    },
                    "league": { "id": 39, "name": "Premier League" },
                    "teams": {
                        "home": { "id": 40, "name": "Liverpool" },
                        "away": { "id": 50, "name": "Manchester City" }
                    },
                    "goals": {}
                },
                {
                    "fixture": {
                        "id": 1002,
                        "date": "2025-03-01T11:00:00+00:00",
                        "status": { "short": "1H", "long": "First Half", "elapsed": 20 }
                    },
                    "league": { "id": 296, "name": "Thai League 1" },
                    "teams": {
                        "home": { "id": 1, "name": "Buriram United" },
                        "away": { "id": 2, "name": "Bangkok United" }
                    },
                    "goals": { "home": 1, "away": 0 }
                }
            ]
        }),
    );
    let (_dir, context) = test_context(transport.clone()).await;
    let app = app!(context);

    let req = TestRequest::get()
        .uri("/api/fixtures?date=2025-03-01")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let groups = body["data"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    // Thai League 1 ranks ahead of the Premier League
    assert_eq!(groups[0]["league"]["id"], 296);
    assert_eq!(groups[0]["matches"][0]["home"]["goals"], 1);
    assert_eq!(groups[1]["league"]["id"], 39);

    let req = TestRequest::get()
        .uri("/api/fixtures?date=2025-03-01")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(transport.calls(), 1);
}

fn fixture(id: u64, league: u32, league_name: &str, short: &str) -> Value {
    json!({
        "fixture": {
            "id": id,
            "date": "2025-03-01T15:00:00+00:00",
            "status": { "short": short, "long": short }
        },
        "league": { "id": league, "name": league_name },
        "teams": {
            "home": { "id": 33, "name": "Manchester United" },
            "away": { "id": 40, "name": "Liverpool" }
        },
        "goals": { "home": 1, "away": 1 }
    })
}

#[actix_rt::test]
async fn test_fixtures_status_filter() {
    let transport = FakeTransport::new();
    transport.respond_json(
        &format!("{}/fixtures?date=2025-03-01", API_ROOT),
        200,
        json!({
            "response": [
                fixture(1, 39, "Premier League", "2H"),
                fixture(2, 39, "Premier League", "FT"),
                fixture(3, 140, "La Liga", "NS")
            ]
        }),
    );
    let (_dir, context) = test_context(transport).await;
    let app = app!(context);

    let req = TestRequest::get()
        .uri("/api/fixtures?date=2025-03-01&status=finished")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let groups = body["data"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["matches"].as_array().unwrap().len(), 1);
    assert_eq!(groups[0]["matches"][0]["id"], 2);

    let req = TestRequest::get()
        .uri("/api/fixtures?date=2025-03-01&status=halftime")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_live_fixtures_filtered_by_league() {
    let transport = FakeTransport::new();
    transport.respond_json(
        &format!("{}/fixtures?live=all", API_ROOT),
        200,
        json!({
            "response": [
                fixture(10, 39, "Premier League", "1H"),
                fixture(11, 39, "Premier League", "NS"),
                fixture(12, 140, "La Liga", "HT"),
                fixture(13, 39, "Premier League", "ET")
            ]
        }),
    );
    let (_dir, context) = test_context(transport.clone()).await;
    let app = app!(context);

    let req = TestRequest::get().uri("/api/fixtures/live").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let groups = body["data"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    let live: usize = groups
        .iter()
        .map(|g| g["matches"].as_array().unwrap().len())
        .sum();
    assert_eq!(live, 3);

    let req = TestRequest::get()
        .uri("/api/fixtures/live?league=39")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let groups = body["data"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["league"]["id"], 39);
    let ids: Vec<u64> = groups[0]["matches"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&10) && ids.contains(&13));

    // Both reads share the cached upstream feed
    assert_eq!(transport.calls(), 1);
}

#[actix_rt::test]
async fn test_fixture_detail_and_unknown_fixture() {
    let transport = FakeTransport::new();
    transport.respond_json(
        &format!("{}/fixtures?id=1035", API_ROOT),
        200,
        json!({ "response": [fixture(1035, 39, "Premier League", "2H")] }),
    );
    transport.respond_json(
        &format!("{}/fixtures/events?fixture=1035", API_ROOT),
        200,
        json!({
            "response": [{
                "time": { "elapsed": 12, "extra": null },
                "team": { "id": 33, "name": "Manchester United" },
                "player": { "id": 909, "name": "M. Rashford" },
                "assist": { "id": null, "name": null },
                "type": "Goal",
                "detail": "Normal Goal"
            }]
        }),
    );
    transport.respond_json(
        &format!("{}/fixtures/lineups?fixture=1035", API_ROOT),
        200,
        json!({
            "response": [{
                "team": { "id": 33, "name": "Manchester United" },
                "formation": "4-2-3-1",
                "startXI": [{ "player": { "id": 1, "name": "A. Onana", "number": 24, "pos": "G" } }],
                "substitutes": []
            }]
        }),
    );
    transport.respond_json(
        &format!("{}/fixtures/statistics?fixture=1035", API_ROOT),
        200,
        json!({
            "response": [{
                "team": { "id": 33, "name": "Manchester United" },
                "statistics": [{ "type": "Ball Possession", "value": "55%" }]
            }]
        }),
    );
    for endpoint in [
        "fixtures?id=404",
        "fixtures/events?fixture=404",
        "fixtures/lineups?fixture=404",
        "fixtures/statistics?fixture=404",
    ] {
        transport.respond_json(
            &format!("{}/{}", API_ROOT, endpoint),
            200,
            json!({ "response": [] }),
        );
    }
    let (_dir, context) = test_context(transport).await;
    let app = app!(context);

    let req = TestRequest::get().uri("/api/fixtures/1035").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let detail = &body["data"];
    assert_eq!(detail["match"]["id"], 1035);
    assert_eq!(detail["match"]["status"]["phase"], "live");
    assert_eq!(detail["events"][0]["player"], "M. Rashford");
    assert_eq!(detail["events"][0]["type"], "Goal");
    assert_eq!(detail["lineups"][0]["formation"], "4-2-3-1");
    assert_eq!(detail["statistics"][0]["statistics"][0]["value"], "55%");

    let req = TestRequest::get().uri("/api/fixtures/404").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1004);
}

#[actix_rt::test]
async fn test_fixture_prediction() {
    let transport = FakeTransport::new();
    transport.respond_json(
        &format!("{}/predictions?fixture=1035", API_ROOT),
        200,
        json!({
            "response": [{
                "predictions": {
                    "winner": { "id": 40, "name": "Liverpool", "comment": "Win or draw" },
                    "win_or_draw": true,
                    "under_over": "-3.5",
                    "advice": "Double chance : Liverpool or draw",
                    "percent": { "home": "10%", "draw": "45%", "away": "45%" }
                },
                "comparison": { "form": { "home": "40%", "away": "60%" } }
            }]
        }),
    );
    transport.respond_json(
        &format!("{}/predictions?fixture=7", API_ROOT),
        200,
        json!({ "response": [] }),
    );
    let (_dir, context) = test_context(transport).await;
    let app = app!(context);

    let req = TestRequest::get()
        .uri("/api/fixtures/1035/predictions")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["winnerId"], 40);
    assert_eq!(body["data"]["winnerName"], "Liverpool");
    assert_eq!(body["data"]["advice"], "Double chance : Liverpool or draw");
    assert_eq!(body["data"]["percentDraw"], "45%");
    assert_eq!(body["data"]["comparison"]["form"]["away"], "60%");

    let req = TestRequest::get()
        .uri("/api/fixtures/7/predictions")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

fn standing(rank: u32, team: u32, name: &str, points: i32) -> Value {
    json!({
        "rank": rank,
        "team": { "id": team, "name": name },
        "points": points,
        "goalsDiff": 0,
        "group": "Premier League",
        "all": { "played": 27, "win": 0, "draw": 0, "lose": 0, "goals": { "for": 40, "against": 30 } }
    })
}

#[actix_rt::test]
async fn test_standings_sorted_by_rank() {
    let transport = FakeTransport::new();
    transport.respond_json(
        &format!("{}/standings?league=39&season=2024", API_ROOT),
        200,
        json!({
            "response": [{
                "league": {
                    "id": 39,
                    "name": "Premier League",
                    "season": 2024,
                    "standings": [[
                        standing(3, 42, "Arsenal", 54),
                        standing(1, 40, "Liverpool", 67),
                        standing(2, 50, "Manchester City", 61)
                    ]]
                }
            }]
        }),
    );
    let (_dir, context) = test_context(transport).await;
    let app = app!(context);

    let req = TestRequest::get()
        .uri("/api/standings?league=39&season=2024")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let tables = body["data"].as_array().unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0]["name"], "Premier League");
    let ranks: Vec<u64> = tables[0]["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["rank"].as_u64().unwrap())
        .collect();
    assert_eq!(ranks, vec![1, 2, 3]);
    assert_eq!(tables[0]["rows"][0]["teamName"], "Liverpool");
    assert_eq!(tables[0]["rows"][0]["goalsFor"], 40);

    // league and season are both required
    let req = TestRequest::get().uri("/api/standings?league=39").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_leagues_by_country() {
    let transport = FakeTransport::new();
    transport.respond_json(
        &format!("{}/leagues?country=Thailand&current=true", API_ROOT),
        200,
        json!({
            "response": [{
                "league": { "id": 296, "name": "Thai League 1", "type": "League", "logo": "296.png" },
                "country": { "name": "Thailand", "flag": "th.svg" },
                "seasons": [{ "year": 2023, "current": false }, { "year": 2024, "current": true }]
            }]
        }),
    );
    let (_dir, context) = test_context(transport.clone()).await;
    let app = app!(context);

    let req = TestRequest::get()
        .uri("/api/leagues?country=Thailand&current=true")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let leagues = body["data"].as_array().unwrap();
    assert_eq!(leagues.len(), 1);
    assert_eq!(leagues[0]["id"], 296);
    assert_eq!(leagues[0]["type"], "League");
    assert_eq!(leagues[0]["country"], "Thailand");
    assert_eq!(leagues[0]["currentSeason"], 2024);

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.contains("current=true"));
}

#[actix_rt::test]
async fn test_upstream_status_mapping() {
    let transport = FakeTransport::new();
    transport.respond_json(
        &format!("{}/fixtures?date=2025-03-01", API_ROOT),
        500,
        json!({ "message": "internal error" }),
    );
    transport.respond_json(
        &format!("{}/standings?league=39&season=2024", API_ROOT),
        429,
        json!({ "message": "Too many requests" }),
    );
    transport.respond_json(
        &format!("{}/leagues", API_ROOT),
        200,
        json!({ "response": [], "errors": { "token": "Error/Missing application key." } }),
    );
    let (_dir, context) = test_context(transport).await;
    let app = app!(context);

    let req = TestRequest::get()
        .uri("/api/fixtures?date=2025-03-01")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 6000);

    let req = TestRequest::get()
        .uri("/api/standings?league=39&season=2024")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 6000);

    // Errors reported inside a 200 body
    let req = TestRequest::get().uri("/api/leagues").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(resp).await;
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("Missing application key")
    );
}

// =============================================================================
// Health
// =============================================================================

#[actix_rt::test]
async fn test_health_endpoints() {
    let (_dir, context) = test_context(FakeTransport::new()).await;
    let app = app!(context);

    let req = TestRequest::get().uri("/health/live").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = TestRequest::get().uri("/health/ready").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["storage"]["status"], "healthy");
}
