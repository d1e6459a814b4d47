//! Common test utilities for integration tests

use modbot::{GalleryConfig, GuildUser, Infraction};
use sqlx::SqlitePool;

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Gallery config pointing at a mock server.
#[allow(dead_code)]
pub fn gallery_config(base_url: &str) -> GalleryConfig {
    let mut config = GalleryConfig::new(base_url, "test-token");
    config.timeout_secs = 5;
    config
}

#[allow(dead_code)]
pub async fn insert_user(pool: &SqlitePool, user: &GuildUser) {
    sqlx::query("INSERT INTO guild_users (id, username, nickname, last_seen) VALUES (?, ?, ?, ?)")
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.nickname)
        .bind(user.last_seen.to_rfc3339())
        .execute(pool)
        .await
        .expect("Failed to insert guild user");
}

#[allow(dead_code)]
pub async fn insert_infraction(pool: &SqlitePool, infraction: &Infraction) {
    sqlx::query(
        "INSERT INTO infractions (id, guild_id, subject_id, kind, reason, created_at, rescinded_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(infraction.id.to_string())
    .bind(infraction.guild_id)
    .bind(infraction.subject_id)
    .bind(infraction.kind.as_str())
    .bind(&infraction.reason)
    .bind(infraction.created_at.to_rfc3339())
    .bind(infraction.rescinded_at.map(|at| at.to_rfc3339()))
    .execute(pool)
    .await
    .expect("Failed to insert infraction");
}
