//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub auth: AuthSettings,
    pub uploads: UploadSettings,
    pub bootstrap: BootstrapSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    /// Token validity window in seconds.
    pub token_expiry: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    /// bcrypt cost factor applied when hashing passwords.
    pub bcrypt_cost: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadSettings {
    /// Root directory for uploaded files, served statically under /uploads.
    pub root: String,
}

/// Fixed seed super-admin account. Checked at login before the user
/// directory; tokens minted for it carry the nil-UUID sentinel subject.
#[derive(Debug, Deserialize, Clone)]
pub struct BootstrapSettings {
    pub super_admin_email: String,
    pub super_admin_password: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 5000)?
            .set_default("app.name", "menyesha-server")?
            .set_default("database.max_connections", 10)?
            .set_default("jwt.token_expiry", super::constants::DEFAULT_TOKEN_EXPIRY)?
            .set_default("auth.bcrypt_cost", super::constants::DEFAULT_BCRYPT_COST as i64)?
            .set_default("uploads.root", "uploads")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        config.try_deserialize()
    }
}
