//! Server configuration, read once from the environment.

use std::path::PathBuf;

const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub admin_username: String,
    pub admin_password: String,
    /// JSON snapshot location. `None` keeps everything in memory.
    pub data_file: Option<PathBuf>,
    /// Seed "Team Maveli" and "Team Vamanan" into an empty festival.
    pub seed_default_teams: bool,
    /// Browser origins allowed to call the API; `*` admits any.
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            admin_username: DEFAULT_ADMIN_USERNAME.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            data_file: None,
            seed_default_teams: true,
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl Config {
    /// Env: HOST, PORT, ADMIN_USERNAME, ADMIN_PASSWORD, DATA_FILE, SEED_DEFAULT_TEAMS, CORS_ORIGINS.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            host: non_empty("HOST").unwrap_or(defaults.host),
            port: non_empty("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(defaults.port),
            admin_username: non_empty("ADMIN_USERNAME").unwrap_or(defaults.admin_username),
            admin_password: non_empty("ADMIN_PASSWORD").unwrap_or(defaults.admin_password),
            data_file: non_empty("DATA_FILE").map(PathBuf::from),
            seed_default_teams: non_empty("SEED_DEFAULT_TEAMS")
                .map(|v| !v.trim().eq_ignore_ascii_case("false"))
                .unwrap_or(defaults.seed_default_teams),
            cors_origins: non_empty("CORS_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|o| !o.is_empty())
                        .map(String::from)
                        .collect::<Vec<_>>()
                })
                .filter(|origins| !origins.is_empty())
                .unwrap_or(defaults.cors_origins),
        }
    }

    /// True while the built-in admin password is in effect.
    pub fn uses_default_password(&self) -> bool {
        self.admin_password == DEFAULT_ADMIN_PASSWORD
    }
}
