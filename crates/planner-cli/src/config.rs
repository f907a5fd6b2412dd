use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};

/// Optional configuration file read from the working directory.
pub const CONFIG_FILE: &str = "planner.toml";
/// Prefix for environment overrides, e.g. `TODO_PORT`, `TODO_DBFILE`, `TODO_PASSWORD`.
pub const ENV_PREFIX: &str = "TODO_";
/// Keys whose environment values are taken verbatim instead of being parsed
/// as numbers or booleans.
const VERBATIM_KEYS: [&str; 2] = ["password", "token_secret"];

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// Port for `planner serve`
    pub port: u16,
    /// Path of the SQLite task database
    pub dbfile: String,
    /// Password protecting the HTTP API; empty or absent disables authentication
    #[serde(default, deserialize_with = "lenient_string")]
    pub password: Option<String>,
    /// HMAC key for session tokens; a random key is used per process when absent
    #[serde(default, deserialize_with = "lenient_string")]
    pub token_secret: Option<String>,
    /// Lifetime of session tokens in hours
    pub token_ttl_hours: i64,
    /// Directory with the static web front end
    pub web_dir: String,
    /// Maximum number of tasks returned by listings
    pub list_limit: u32,
    /// IANA timezone deciding what "today" is
    #[serde(default)]
    pub timezone: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 7540,
            dbfile: "scheduler.db".to_string(),
            password: None,
            token_secret: None,
            token_ttl_hours: 8,
            web_dir: "web".to_string(),
            list_limit: 50,
            timezone: None,
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    /// Defaults, then `planner.toml`, then `TODO_*` environment variables.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&VERBATIM_KEYS));

        for key in VERBATIM_KEYS {
            let var = format!("{}{}", ENV_PREFIX, key.to_uppercase());
            if let Ok(value) = std::env::var(&var) {
                figment = figment.merge(Serialized::default(key, value));
            }
        }
        figment
    }

    /// The configured password, if authentication is enabled.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

/// Unquoted TOML values such as `password = 12345` arrive as numbers; keep them as text.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Signed(i64),
        Unsigned(u64),
        Float(f64),
        Flag(bool),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|value| match value {
        Scalar::Text(s) => s,
        Scalar::Signed(n) => n.to_string(),
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Flag(b) => b.to_string(),
    }))
}
