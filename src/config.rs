use serde::Deserialize;

/// Default token lifetime: 100 hours. Long-lived by policy; there is no
/// refresh-token flow, expiry is the only invalidation mechanism.
pub const DEFAULT_JWT_TTL_SECONDS: i64 = 360_000;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            ttl_seconds: std::env::var("JWT_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(DEFAULT_JWT_TTL_SECONDS),
        };
        Ok(Self { database_url, jwt })
    }
}
