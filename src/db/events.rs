use sqlx::PgPool;

use crate::store::{EventCount, GlobalStats};

pub async fn record_event(
    pool: &PgPool,
    user_id: i64,
    kind: &str,
    detail: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"INSERT INTO "usage_events" ("user_id", "kind", "detail") VALUES ($1, $2, $3)"#,
    )
    .bind(user_id)
    .bind(kind)
    .bind(detail)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn user_stats(pool: &PgPool, user_id: i64) -> Result<Vec<EventCount>, sqlx::Error> {
    sqlx::query_as::<_, EventCount>(
        r#"
        SELECT "kind", COUNT(*) AS "count"
        FROM "usage_events"
        WHERE "user_id" = $1
        GROUP BY "kind"
        ORDER BY "kind"
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn global_stats(pool: &PgPool) -> Result<GlobalStats, sqlx::Error> {
    let (total_users, total_events): (i64, i64) = sqlx::query_as(
        r#"
        SELECT
            (SELECT COUNT(*) FROM "users"),
            (SELECT COUNT(*) FROM "usage_events")
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(GlobalStats {
        total_users,
        total_events,
    })
}
