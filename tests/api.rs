//! HTTP tests for the REST API: auth gating, the record-result flow and snapshot writes.

use actix_web::{http::StatusCode, test, web::Data, App};
use chrono::{Duration, Utc};
use festival_scoreboard_web::api::{self, AppState, LoginResponse};
use festival_scoreboard_web::auth::AdminCredentials;
use festival_scoreboard_web::persistence::load_snapshot;
use festival_scoreboard_web::{
    Event, EventResult, EventSchedule, Festival, IndividualRankings, Member, MemberRanking,
    PointsConfig, Team, TeamStanding, TeamStandings,
};
use serde_json::json;
use std::path::PathBuf;

fn state() -> Data<AppState> {
    state_with_file(None)
}

fn state_with_file(data_file: Option<PathBuf>) -> Data<AppState> {
    Data::new(AppState::new(
        Festival::with_default_teams(),
        AdminCredentials::new("admin", "pw"),
        data_file,
    ))
}

fn temp_file() -> PathBuf {
    std::env::temp_dir().join(format!("festival-api-{}.json", uuid::Uuid::new_v4()))
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .configure(api::configure),
        )
        .await
    };
}

macro_rules! login {
    ($app:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "username": "admin", "password": "pw" }))
            .to_request();
        let resp: LoginResponse = test::call_and_read_body_json(&$app, req).await;
        assert_eq!(resp.token_type, "bearer");
        resp.access_token
    }};
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

#[actix_web::test]
async fn health_is_public() {
    let state = state();
    let app = app!(state);
    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["ok"], json!(true));
}

#[actix_web::test]
async fn login_rejects_wrong_password() {
    let state = state();
    let app = app!(state);
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "admin", "password": "nope" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("Invalid credentials"));
}

#[actix_web::test]
async fn writes_need_a_valid_token() {
    let state = state();
    let app = app!(state);
    let team = json!({ "name": "Team Kerala", "color": "#00ff00" });

    let req = test::TestRequest::post()
        .uri("/api/teams")
        .set_json(&team)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Missing bearer token" }));

    let req = test::TestRequest::post()
        .uri("/api/teams")
        .insert_header(bearer("forged"))
        .set_json(&team)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Invalid token" }));

    let token = login!(app);
    let req = test::TestRequest::post()
        .uri("/api/teams")
        .insert_header(bearer(&token))
        .set_json(&team)
        .to_request();
    let created: Team = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created.name, "Team Kerala");

    let req = test::TestRequest::post()
        .uri("/api/auth/logout")
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/teams")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Team Late", "color": "#000" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn unknown_event_category_is_rejected() {
    let state = state();
    let app = app!(state);
    let token = login!(app);
    let req = test::TestRequest::post()
        .uri("/api/events")
        .insert_header(bearer(&token))
        .set_json(json!({
            "name": "Kabaddi",
            "event_date": Utc::now(),
            "category": "Senior",
            "event_type": "Team",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("unknown variant `Senior`"), "{}", message);
    assert!(state.festival.read().unwrap().events.is_empty());
}

#[actix_web::test]
async fn malformed_json_gets_an_error_body() {
    let state = state();
    let app = app!(state);
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"username\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn duplicate_team_is_a_conflict() {
    let state = state();
    let app = app!(state);
    let token = login!(app);
    let req = test::TestRequest::post()
        .uri("/api/teams")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "team maveli", "color": "#fff" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn recording_results_updates_every_view() {
    let state = state();
    let app = app!(state);
    let token = login!(app);
    let (maveli, vamanan) = {
        let f = state.festival.read().unwrap();
        (f.teams[0].id, f.teams[1].id)
    };

    // Team event: Vamanan wins, Maveli runner-up.
    let req = test::TestRequest::post()
        .uri("/api/events")
        .insert_header(bearer(&token))
        .set_json(json!({
            "name": "Vadamvali",
            "description": "Tug of war",
            "event_date": Utc::now() - Duration::days(1),
            "category": "Mixed",
            "event_type": "Team",
        }))
        .to_request();
    let tug: Event = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/results")
        .insert_header(bearer(&token))
        .set_json(json!({
            "event_id": tug.id,
            "winner_team_id": vamanan,
            "runner_up_team_id": maveli,
        }))
        .to_request();
    let result: EventResult = test::call_and_read_body_json(&app, req).await;
    assert_eq!((result.winner_points, result.runner_up_points), (10, 5));

    // Second result for the same event is refused.
    let req = test::TestRequest::post()
        .uri("/api/results")
        .insert_header(bearer(&token))
        .set_json(json!({ "event_id": tug.id, "winner_team_id": maveli }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    // Individual kids event.
    let req = test::TestRequest::post()
        .uri("/api/members")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Kichu", "category": "Kid", "team_id": maveli }))
        .to_request();
    let kid: Member = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/events")
        .insert_header(bearer(&token))
        .set_json(json!({
            "name": "Lemon and spoon",
            "event_date": Utc::now() - Duration::hours(2),
            "category": "Kid",
            "event_type": "Individual",
        }))
        .to_request();
    let spoon: Event = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/results")
        .insert_header(bearer(&token))
        .set_json(json!({ "event_id": spoon.id, "winner_member_id": kid.id, "winner_points": 3 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // Upcoming event with no result.
    let req = test::TestRequest::post()
        .uri("/api/events")
        .insert_header(bearer(&token))
        .set_json(json!({
            "name": "Sadya",
            "event_date": Utc::now() + Duration::days(2),
            "category": "Mixed",
            "event_type": "Team",
        }))
        .to_request();
    let sadya: Event = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get().uri("/api/scoreboard").to_request();
    let scoreboard: TeamStandings = test::call_and_read_body_json(&app, req).await;
    let rows: Vec<(&str, u64)> = scoreboard
        .teams
        .iter()
        .map(|s| (s.team.name.as_str(), s.total_points))
        .collect();
    assert_eq!(rows, vec![("Team Vamanan", 10), ("Team Maveli", 5)]);
    assert!(scoreboard.warnings.is_empty());

    let req = test::TestRequest::get().uri("/api/teams").to_request();
    let teams: Vec<TeamStanding> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(teams[0].team.name, "Team Maveli");
    assert_eq!(teams[0].total_points, 5);

    let req = test::TestRequest::get()
        .uri("/api/individual-rankings")
        .to_request();
    let rankings: IndividualRankings = test::call_and_read_body_json(&app, req).await;
    assert!(rankings.adults.is_empty());
    assert_eq!(rankings.kids[0].member.id, kid.id);
    assert_eq!(rankings.kids[0].individual_points, 3);

    let req = test::TestRequest::get()
        .uri(&format!("/api/members/team/{}", maveli))
        .to_request();
    let members: Vec<MemberRanking> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(members.len(), 1);

    let req = test::TestRequest::get().uri("/api/events/schedule").to_request();
    let schedule: EventSchedule = test::call_and_read_body_json(&app, req).await;
    let completed: Vec<_> = schedule.completed.iter().map(|e| e.id).collect();
    assert_eq!(completed, vec![spoon.id, tug.id]);
    assert_eq!(schedule.upcoming[0].id, sadya.id);
    assert!(schedule.past_pending_results.is_empty());
}

#[actix_web::test]
async fn points_config_round_trip() {
    let state = state();
    let app = app!(state);
    let token = login!(app);

    let req = test::TestRequest::put()
        .uri("/api/points-config")
        .insert_header(bearer(&token))
        .set_json(json!({ "winner_points": 25, "runner_up_points": 12 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/points-config").to_request();
    let config: PointsConfig = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        config,
        PointsConfig {
            winner_points: 25,
            runner_up_points: 12
        }
    );
}

#[actix_web::test]
async fn roster_csv_import() {
    let state = state();
    let app = app!(state);
    let token = login!(app);

    let req = test::TestRequest::post()
        .uri("/api/members/import")
        .insert_header(bearer(&token))
        .insert_header(("Content-Type", "text/csv"))
        .set_payload("name,category,team\nAnu,Adult,team maveli\nKichu,Kid,Team Vamanan\n")
        .to_request();
    let added: Vec<Member> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(added.len(), 2);

    let req = test::TestRequest::post()
        .uri("/api/members/import")
        .insert_header(bearer(&token))
        .insert_header(("Content-Type", "text/csv"))
        .set_payload("name,category,team\nBiju,Elder,Team Maveli\n")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("Row 1: Unknown category 'Elder'"));
    assert_eq!(state.festival.read().unwrap().members.len(), 2);
}

#[actix_web::test]
async fn deleting_unknown_member_is_not_found() {
    let state = state();
    let app = app!(state);
    let token = login!(app);
    let req = test::TestRequest::delete()
        .uri(&format!("/api/members/{}", uuid::Uuid::new_v4()))
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn cors_allows_configured_origin() {
    let state = state();
    let app = test::init_service(
        App::new()
            .wrap(api::cors(&["https://onam.example".to_string()]))
            .app_data(state.clone())
            .configure(api::configure),
    )
    .await;
    let req = test::TestRequest::get()
        .uri("/api/health")
        .insert_header(("Origin", "https://onam.example"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("access-control-allow-origin").unwrap(),
        "https://onam.example"
    );
}

#[actix_web::test]
async fn cors_wildcard_allows_any_origin() {
    let state = state();
    let app = test::init_service(
        App::new()
            .wrap(api::cors(&["*".to_string()]))
            .app_data(state.clone())
            .configure(api::configure),
    )
    .await;
    let req = test::TestRequest::get()
        .uri("/api/scoreboard")
        .insert_header(("Origin", "http://localhost:3000"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("access-control-allow-origin"));
}

#[actix_web::test]
async fn changes_are_saved_to_the_data_file() {
    let path = temp_file();
    let state = state_with_file(Some(path.clone()));
    let app = app!(state);
    let token = login!(app);

    let req = test::TestRequest::post()
        .uri("/api/teams")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Team Onam", "color": "#ffcc00" }))
        .to_request();
    let created: Team = test::call_and_read_body_json(&app, req).await;

    let saved = load_snapshot(&path).await.unwrap().unwrap();
    assert_eq!(saved.teams.len(), 3);
    assert!(saved.teams.iter().any(|t| t.id == created.id && t.name == "Team Onam"));

    // A rejected change leaves the file untouched.
    let before = std::fs::read(&path).unwrap();
    let req = test::TestRequest::post()
        .uri("/api/teams")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "team onam", "color": "#000" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
    assert_eq!(std::fs::read(&path).unwrap(), before);

    let _ = std::fs::remove_file(&path);
}

#[actix_web::test]
async fn unsaved_change_is_a_server_error() {
    let path = std::env::temp_dir()
        .join(format!("festival-missing-{}", uuid::Uuid::new_v4()))
        .join("festival.json");
    let state = state_with_file(Some(path.clone()));
    let app = app!(state);
    let token = login!(app);

    let req = test::TestRequest::post()
        .uri("/api/teams")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Team Onam", "color": "#ffcc00" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "error": "Change applied but could not be saved to disk" })
    );
    // The change itself is kept in memory.
    assert_eq!(state.festival.read().unwrap().teams.len(), 3);
    assert!(!path.exists());
}
