use sqlx::PgPool;

use crate::store::{User, UserProfile};

/// Create-or-update keyed by telegram id, returning the canonical record.
pub async fn upsert_user(pool: &PgPool, profile: &UserProfile) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO "users" ("telegram_id", "username", "first_name", "last_name")
        VALUES ($1, $2, $3, $4)
        ON CONFLICT ("telegram_id") DO UPDATE SET
            "username" = EXCLUDED."username",
            "first_name" = EXCLUDED."first_name",
            "last_name" = EXCLUDED."last_name",
            "updated_at" = NOW()
        RETURNING "id", "telegram_id", "username", "first_name", "last_name"
        "#,
    )
    .bind(profile.telegram_id)
    .bind(&profile.username)
    .bind(&profile.first_name)
    .bind(&profile.last_name)
    .fetch_one(pool)
    .await
}
