//! Single binary REST server for the festival scoreboard.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Env: HOST, PORT, ADMIN_USERNAME, ADMIN_PASSWORD,
//! DATA_FILE (JSON snapshot, optional), SEED_DEFAULT_TEAMS (default true),
//! CORS_ORIGINS (comma-separated, default `*`).

use actix_web::{get, web::Data, App, HttpResponse, HttpServer};
use festival_scoreboard_web::api::{self, AppState};
use festival_scoreboard_web::auth::AdminCredentials;
use festival_scoreboard_web::config::Config;
use festival_scoreboard_web::persistence::load_snapshot;
use festival_scoreboard_web::Festival;

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

async fn load_festival(config: &Config) -> std::io::Result<Festival> {
    if let Some(path) = &config.data_file {
        if let Some(festival) = load_snapshot(path).await? {
            log::info!(
                "Loaded snapshot from {} ({} teams, {} events, {} results)",
                path.display(),
                festival.teams.len(),
                festival.events.len(),
                festival.results.len()
            );
            return Ok(festival);
        }
        log::info!("No snapshot at {}, starting fresh", path.display());
    }
    Ok(if config.seed_default_teams {
        Festival::with_default_teams()
    } else {
        Festival::new()
    })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    if config.uses_default_password() {
        log::warn!("ADMIN_PASSWORD not set; using the built-in default password");
    }

    let festival = load_festival(&config).await?;
    let state = Data::new(AppState::new(
        festival,
        AdminCredentials::new(&config.admin_username, &config.admin_password),
        config.data_file.clone(),
    ));

    let cors_origins = config.cors_origins.clone();
    log::info!("CORS origins: {}", cors_origins.join(", "));

    let bind = (config.host.as_str(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .wrap(api::cors(&cors_origins))
            .app_data(state.clone())
            .service(favicon)
            .configure(api::configure)
    })
    .bind(bind)?
    .run()
    .await
}
