//! REST API: JSON handlers over the festival store and the scoreboard logic.
//!
//! Reads are public. Writes need `Authorization: Bearer <token>` from `/api/auth/login`.

use crate::auth::{AdminCredentials, TokenStore};
use crate::logic::{
    categorize_events, compute_individual_rankings, compute_team_standings, find_orphan_results,
    IntegrityWarning, MemberRanking,
};
use crate::models::{
    EventDraft, EventId, Festival, FestivalError, MemberDraft, MemberId, PointsConfig,
    ResultDraft, TeamDraft, TeamId,
};
use crate::persistence;
use crate::roster::parse_roster;
use actix_cors::Cors;
use actix_web::{
    delete,
    error::{InternalError, JsonPayloadError},
    get, post, put,
    web::{self, Data, Json, Path},
    HttpRequest, HttpResponse, Responder,
};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

/// Shared server state.
pub struct AppState {
    pub festival: RwLock<Festival>,
    pub credentials: AdminCredentials,
    pub tokens: TokenStore,
    /// Snapshot target; `None` keeps the festival in memory only.
    pub data_file: Option<PathBuf>,
    /// Serialises mutate-then-write so snapshots land in order.
    persist_lock: tokio::sync::Mutex<()>,
}

impl AppState {
    pub fn new(
        festival: Festival,
        credentials: AdminCredentials,
        data_file: Option<PathBuf>,
    ) -> Self {
        Self {
            festival: RwLock::new(festival),
            credentials,
            tokens: TokenStore::new(),
            data_file,
            persist_lock: tokio::sync::Mutex::new(()),
        }
    }
}

type SharedState = Data<AppState>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Deserialize)]
struct TeamPath {
    id: TeamId,
}

#[derive(Deserialize)]
struct MemberPath {
    id: MemberId,
}

#[derive(Deserialize)]
struct EventPath {
    id: EventId,
}

fn error_json(message: impl std::fmt::Display) -> serde_json::Value {
    serde_json::json!({ "error": message.to_string() })
}

fn lock_error() -> HttpResponse {
    log::error!("festival lock poisoned");
    HttpResponse::InternalServerError().json(error_json("lock error"))
}

fn festival_error(e: FestivalError) -> HttpResponse {
    match e {
        FestivalError::TeamNotFound(_)
        | FestivalError::MemberNotFound(_)
        | FestivalError::EventNotFound(_) => HttpResponse::NotFound().json(error_json(e)),
        FestivalError::DuplicateTeamName(_) | FestivalError::ResultAlreadyRecorded(_) => {
            HttpResponse::Conflict().json(error_json(e))
        }
        _ => HttpResponse::BadRequest().json(error_json(e)),
    }
}

/// A missing or malformed `Authorization` header arrives as `None`.
fn require_admin<'a>(
    state: &AppState,
    auth: &'a Option<BearerAuth>,
) -> Result<&'a BearerAuth, HttpResponse> {
    let Some(auth) = auth else {
        return Err(HttpResponse::Unauthorized().json(error_json("Missing bearer token")));
    };
    if state.tokens.is_valid(auth.token()) {
        Ok(auth)
    } else {
        log::warn!("Rejected request with unknown bearer token");
        Err(HttpResponse::Unauthorized().json(error_json("Invalid token")))
    }
}

/// Malformed or mistyped JSON bodies get the same `{"error": ..}` shape as every other failure.
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(error_json(&err));
    InternalError::from_response(err, response).into()
}

fn log_warnings(warnings: &[IntegrityWarning]) {
    for w in warnings {
        log::warn!("Integrity: {}", w);
    }
}

/// Apply `change` under the write lock, persist the snapshot, respond with the change's value.
///
/// If the snapshot cannot be written the change stays in memory and the response is 500,
/// so the admin knows the disk copy is behind.
async fn mutate<T, F>(state: &AppState, change: F) -> HttpResponse
where
    T: Serialize,
    F: FnOnce(&mut Festival) -> Result<T, FestivalError>,
{
    let _persisting = state.persist_lock.lock().await;
    let (value, snapshot) = {
        let mut g = match state.festival.write() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        let value = match change(&mut g) {
            Ok(v) => v,
            Err(e) => return festival_error(e),
        };
        let snapshot = state
            .data_file
            .as_ref()
            .map(|_| persistence::encode_snapshot(&g));
        (value, snapshot)
    };

    if let (Some(path), Some(snapshot)) = (state.data_file.as_ref(), snapshot) {
        let written = match snapshot {
            Ok(bytes) => persistence::write_snapshot(path, bytes).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            log::error!("Failed to write snapshot to {}: {}", path.display(), e);
            return HttpResponse::InternalServerError()
                .json(error_json("Change applied but could not be saved to disk"));
        }
    }
    HttpResponse::Ok().json(value)
}

/// Run `view` against a read-locked festival.
fn read<F>(state: &AppState, view: F) -> HttpResponse
where
    F: FnOnce(&Festival) -> HttpResponse,
{
    match state.festival.read() {
        Ok(g) => view(&g),
        Err(_) => lock_error(),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "festival-scoreboard",
    })
}

#[post("/api/auth/login")]
async fn api_login(state: SharedState, body: Json<LoginBody>) -> HttpResponse {
    if !state.credentials.matches(body.username.trim(), &body.password) {
        log::warn!("Failed admin login for '{}'", body.username.trim());
        return HttpResponse::Unauthorized().json(error_json("Invalid credentials"));
    }
    log::info!("Admin '{}' logged in", body.username.trim());
    HttpResponse::Ok().json(LoginResponse {
        access_token: state.tokens.issue(),
        token_type: "bearer".to_string(),
    })
}

#[post("/api/auth/logout")]
async fn api_logout(state: SharedState, auth: Option<BearerAuth>) -> HttpResponse {
    let auth = match require_admin(&state, &auth) {
        Ok(auth) => auth,
        Err(resp) => return resp,
    };
    state.tokens.revoke(auth.token());
    HttpResponse::Ok().json(serde_json::json!({ "ok": true }))
}

/// Teams in roster order, each with its derived `total_points`.
#[get("/api/teams")]
async fn api_list_teams(state: SharedState) -> HttpResponse {
    read(&state, |f| {
        let standings = compute_team_standings(&f.teams, &f.results);
        let mut by_id: HashMap<TeamId, _> = standings
            .teams
            .into_iter()
            .map(|s| (s.team.id, s))
            .collect();
        let teams: Vec<_> = f.teams.iter().filter_map(|t| by_id.remove(&t.id)).collect();
        HttpResponse::Ok().json(teams)
    })
}

#[post("/api/teams")]
async fn api_create_team(state: SharedState, auth: Option<BearerAuth>, body: Json<TeamDraft>) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &auth) {
        return resp;
    }
    mutate(&state, |f| {
        let team = f.add_team(body.into_inner())?;
        log::info!("Team created: {} ({})", team.name, team.id);
        Ok(team)
    })
    .await
}

#[put("/api/teams/{id}")]
async fn api_update_team(
    state: SharedState,
    auth: Option<BearerAuth>,
    path: Path<TeamPath>,
    body: Json<TeamDraft>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &auth) {
        return resp;
    }
    mutate(&state, |f| f.update_team(path.id, body.into_inner())).await
}

/// Delete a team and its members.
#[delete("/api/teams/{id}")]
async fn api_delete_team(state: SharedState, auth: Option<BearerAuth>, path: Path<TeamPath>) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &auth) {
        return resp;
    }
    mutate(&state, |f| {
        let removed = f.remove_team(path.id)?;
        log::info!("Team {} deleted with {} member(s)", path.id, removed.len());
        Ok(serde_json::json!({ "removed_members": removed.len() }))
    })
    .await
}

/// Members in roster order, each with its derived `individual_points`.
#[get("/api/members")]
async fn api_list_members(state: SharedState) -> HttpResponse {
    read(&state, |f| HttpResponse::Ok().json(members_with_points(f, None)))
}

#[get("/api/members/team/{id}")]
async fn api_list_team_members(state: SharedState, path: Path<TeamPath>) -> HttpResponse {
    read(&state, |f| {
        if f.team(path.id).is_none() {
            return festival_error(FestivalError::TeamNotFound(path.id));
        }
        HttpResponse::Ok().json(members_with_points(f, Some(path.id)))
    })
}

fn members_with_points(f: &Festival, team: Option<TeamId>) -> Vec<MemberRanking> {
    let rankings = compute_individual_rankings(&f.members, &f.results);
    let mut by_id: HashMap<MemberId, _> = rankings
        .adults
        .into_iter()
        .chain(rankings.kids)
        .map(|r| (r.member.id, r))
        .collect();
    f.members
        .iter()
        .filter(|m| team.map_or(true, |t| m.team_id == t))
        .filter_map(|m| by_id.remove(&m.id))
        .collect()
}

#[post("/api/members")]
async fn api_create_member(state: SharedState, auth: Option<BearerAuth>, body: Json<MemberDraft>) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &auth) {
        return resp;
    }
    mutate(&state, |f| {
        let member = f.add_member(body.into_inner())?;
        log::info!("Member created: {} ({})", member.name, member.id);
        Ok(member)
    })
    .await
}

#[delete("/api/members/{id}")]
async fn api_delete_member(state: SharedState, auth: Option<BearerAuth>, path: Path<MemberPath>) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &auth) {
        return resp;
    }
    mutate(&state, |f| {
        f.remove_member(path.id)?;
        Ok(serde_json::json!({ "message": "Member deleted successfully" }))
    })
    .await
}

/// Bulk-add members from a `name,category,team` CSV body. All or nothing.
#[post("/api/members/import")]
async fn api_import_members(state: SharedState, auth: Option<BearerAuth>, body: String) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &auth) {
        return resp;
    }
    let entries = match parse_roster(&body) {
        Ok(entries) => entries,
        Err(e) => return HttpResponse::BadRequest().json(error_json(e)),
    };
    mutate(&state, |f| {
        let added = f.import_roster(&entries)?;
        log::info!("Imported {} member(s) from roster", added.len());
        Ok(added)
    })
    .await
}

/// Events by date, earliest first.
#[get("/api/events")]
async fn api_list_events(state: SharedState) -> HttpResponse {
    read(&state, |f| {
        let mut events = f.events.clone();
        events.sort_by_key(|e| e.event_date);
        HttpResponse::Ok().json(events)
    })
}

/// Completed / upcoming / awaiting-result split as of now.
#[get("/api/events/schedule")]
async fn api_event_schedule(state: SharedState) -> HttpResponse {
    read(&state, |f| {
        HttpResponse::Ok().json(categorize_events(&f.events, &f.results, Utc::now()))
    })
}

#[post("/api/events")]
async fn api_create_event(state: SharedState, auth: Option<BearerAuth>, body: Json<EventDraft>) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &auth) {
        return resp;
    }
    mutate(&state, |f| {
        let event = f.add_event(body.into_inner())?;
        log::info!("Event created: {} ({})", event.name, event.id);
        Ok(event)
    })
    .await
}

#[put("/api/events/{id}")]
async fn api_update_event(
    state: SharedState,
    auth: Option<BearerAuth>,
    path: Path<EventPath>,
    body: Json<EventDraft>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &auth) {
        return resp;
    }
    mutate(&state, |f| f.update_event(path.id, body.into_inner())).await
}

#[delete("/api/events/{id}")]
async fn api_delete_event(state: SharedState, auth: Option<BearerAuth>, path: Path<EventPath>) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &auth) {
        return resp;
    }
    mutate(&state, |f| {
        f.remove_event(path.id)?;
        log::info!("Event {} deleted", path.id);
        Ok(serde_json::json!({ "message": "Event deleted successfully" }))
    })
    .await
}

#[get("/api/results")]
async fn api_list_results(state: SharedState) -> HttpResponse {
    read(&state, |f| HttpResponse::Ok().json(&f.results))
}

/// Record an event result. There is no update or delete.
#[post("/api/results")]
async fn api_create_result(state: SharedState, auth: Option<BearerAuth>, body: Json<ResultDraft>) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &auth) {
        return resp;
    }
    mutate(&state, |f| {
        let result = f.record_result(body.into_inner())?;
        log::info!(
            "Result recorded for event {} (+{} / +{})",
            result.event_id,
            result.winner_points,
            result.runner_up_points
        );
        Ok(result)
    })
    .await
}

#[get("/api/points-config")]
async fn api_get_points_config(state: SharedState) -> HttpResponse {
    read(&state, |f| HttpResponse::Ok().json(f.points_config))
}

/// Change default points for future results only.
#[put("/api/points-config")]
async fn api_set_points_config(state: SharedState, auth: Option<BearerAuth>, body: Json<PointsConfig>) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &auth) {
        return resp;
    }
    mutate(&state, |f| {
        f.set_points_config(body.into_inner());
        Ok(f.points_config)
    })
    .await
}

/// Ranked team standings plus any dangling references found along the way.
#[get("/api/scoreboard")]
async fn api_scoreboard(state: SharedState) -> HttpResponse {
    read(&state, |f| {
        let mut standings = compute_team_standings(&f.teams, &f.results);
        standings
            .warnings
            .extend(find_orphan_results(&f.events, &f.results));
        log_warnings(&standings.warnings);
        HttpResponse::Ok().json(standings)
    })
}

#[get("/api/individual-rankings")]
async fn api_individual_rankings(state: SharedState) -> HttpResponse {
    read(&state, |f| {
        let rankings = compute_individual_rankings(&f.members, &f.results);
        log_warnings(&rankings.warnings);
        HttpResponse::Ok().json(rankings)
    })
}

/// Register every API route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(api_health)
        .service(api_login)
        .service(api_logout)
        .service(api_list_teams)
        .service(api_create_team)
        .service(api_update_team)
        .service(api_delete_team)
        .service(api_list_members)
        .service(api_list_team_members)
        .service(api_import_members)
        .service(api_create_member)
        .service(api_delete_member)
        .service(api_event_schedule)
        .service(api_list_events)
        .service(api_create_event)
        .service(api_update_event)
        .service(api_delete_event)
        .service(api_list_results)
        .service(api_create_result)
        .service(api_get_points_config)
        .service(api_set_points_config)
        .service(api_scoreboard)
        .service(api_individual_rankings);
}

/// CORS policy for the separately hosted client. `*` in `origins` admits any origin.
pub fn cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);
    if origins.iter().any(|o| o == "*") {
        return cors.allow_any_origin();
    }
    origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
