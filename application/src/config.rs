//! [`Config`]-related definitions.

use std::{path::PathBuf, time};

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Service configuration.
    pub service: Service,

    /// Listing store configuration.
    pub store: Store,

    /// Media storage configuration.
    pub media: Media,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Service configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Service {
    /// [JWT] secret.
    ///
    /// [JWT]: https://wikipedia.org/wiki/JSON_Web_Token
    #[default("secret".to_owned())]
    pub jwt_secret: String,

    /// Admin credentials gating the listing-management surface.
    pub admin: Admin,

    /// Contact block stamped onto every published listing.
    pub contact: Contact,

    /// Service tasks configuration.
    pub tasks: Tasks,
}

impl TryFrom<Service> for service::Config {
    type Error = &'static str;

    fn try_from(value: Service) -> Result<Self, Self::Error> {
        use service::domain::{admin, listing};

        let Service {
            jwt_secret,
            admin: Admin { login, password },
            contact: Contact { name, phone, email },
            tasks: Tasks { clean_stale_drafts },
        } = value;

        let login = login.parse::<admin::Login>()?;
        let password =
            admin::Password::new(password).ok_or("invalid `Password`")?;

        Ok(Self {
            jwt_encoding_key: jsonwebtoken::EncodingKey::from_secret(
                jwt_secret.as_bytes(),
            ),
            jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(
                jwt_secret.as_bytes(),
            ),
            admin: admin::Credentials {
                login,
                password_hash: admin::PasswordHash::new(&password),
            },
            contact: listing::Contact { name, phone, email },
            clean_stale_drafts: service::task::clean_stale_drafts::Config {
                interval: clean_stale_drafts.interval,
                timeout: clean_stale_drafts.timeout,
            },
        })
    }
}

/// Admin credentials configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Admin {
    /// Login of the admin.
    #[default("admin@auto-immo.ga".to_owned())]
    pub login: String,

    /// Password of the admin.
    #[default("admin".to_owned())]
    pub password: String,
}

/// Operator contact block configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Contact {
    /// Displayed operator name.
    #[default("auto-immo (Sonny)".to_owned())]
    pub name: String,

    /// Operator phone number.
    #[default("+241 07 10 02 75".to_owned())]
    pub phone: String,

    /// Operator email address.
    #[default("contact@auto-immo.info".to_owned())]
    pub email: String,
}

/// Service tasks configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Tasks {
    /// `CleanStaleDrafts` task configuration.
    pub clean_stale_drafts: Task,
}

/// Service task configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Task {
    /// Task execution interval.
    #[default(time::Duration::from_secs(5 * 60))]
    #[serde(with = "humantime_serde")]
    pub interval: time::Duration,

    /// Timeout after which the entities will be considered stale.
    #[default(time::Duration::from_secs(60 * 60))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

/// Listing store configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Store {
    /// Path of the JSON snapshot file persisting the store across restarts.
    #[default(Some(PathBuf::from("data/listings.json")))]
    pub snapshot_file: Option<PathBuf>,
}

impl From<Store> for service::infra::memory::Config {
    fn from(value: Store) -> Self {
        let Store { snapshot_file } = value;
        Self { snapshot_file }
    }
}

/// Media storage configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Media {
    /// Root directory the media files are stored under.
    #[default(PathBuf::from("media"))]
    pub root: PathBuf,

    /// Public base URL the root directory is served at.
    #[default("/media".to_owned())]
    pub base_url: String,
}

impl From<Media> for service::infra::media::local::Config {
    fn from(value: Media) -> Self {
        let Media { root, base_url } = value;
        Self { root, base_url }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}
