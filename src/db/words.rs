//! Word pool queries. A word is eligible for a user when it is common or the
//! user holds an active activation row for it.

use sqlx::PgPool;

use crate::store::Word;

const ELIGIBLE: &str = r#"
    "w"."is_common" = TRUE
    OR EXISTS (
        SELECT 1 FROM "user_words" "uw"
        WHERE "uw"."word_id" = "w"."id"
          AND "uw"."user_id" = $1
          AND "uw"."active" = TRUE
    )
"#;

pub async fn pick_quiz_word(pool: &PgPool, user_id: i64) -> Result<Option<Word>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT "w"."id", "w"."source_text", "w"."target_text", "w"."is_common"
        FROM "words" "w"
        WHERE {ELIGIBLE}
        ORDER BY RANDOM()
        LIMIT 1
        "#
    );
    sqlx::query_as::<_, Word>(&sql)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Distractors are distinct source texts. Excluding by text rather than by
/// id matters: two dictionary entries may share a source text (the pair is
/// what is unique), and the correct word's own text must never reappear as
/// an option.
pub async fn pick_distractors(
    pool: &PgPool,
    word_id: i64,
    user_id: i64,
    count: i64,
) -> Result<Vec<String>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT "source_text" FROM (
            SELECT DISTINCT "w"."source_text"
            FROM "words" "w"
            WHERE ({ELIGIBLE})
              AND "w"."id" <> $2
              AND "w"."source_text" <> (SELECT "source_text" FROM "words" WHERE "id" = $2)
        ) AS "candidates"
        ORDER BY RANDOM()
        LIMIT $3
        "#
    );
    sqlx::query_scalar::<_, String>(&sql)
        .bind(user_id)
        .bind(word_id)
        .bind(count)
        .fetch_all(pool)
        .await
}

/// Reuses the dictionary entry when the (source, target) pair exists,
/// otherwise inserts a non-common one, then activates it for the user.
/// Calling twice with the same pair leaves state unchanged.
pub async fn add_custom_word(
    pool: &PgPool,
    user_id: i64,
    source: &str,
    target: &str,
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    let existing: Option<i64> = sqlx::query_scalar(
        r#"SELECT "id" FROM "words" WHERE "source_text" = $1 AND "target_text" = $2"#,
    )
    .bind(source)
    .bind(target)
    .fetch_optional(&mut *tx)
    .await?;

    let word_id = match existing {
        Some(id) => id,
        None => {
            sqlx::query_scalar(
                r#"
                INSERT INTO "words" ("source_text", "target_text", "is_common")
                VALUES ($1, $2, FALSE)
                RETURNING "id"
                "#,
            )
            .bind(source)
            .bind(target)
            .fetch_one(&mut *tx)
            .await?
        }
    };

    sqlx::query(
        r#"
        INSERT INTO "user_words" ("user_id", "word_id", "active")
        VALUES ($1, $2, TRUE)
        ON CONFLICT ("user_id", "word_id") DO UPDATE SET "active" = TRUE
        "#,
    )
    .bind(user_id)
    .bind(word_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}

/// Flips every active activation row of the user matching the source text.
/// Common words the user never added have no row, so this reports false.
pub async fn deactivate_user_word(
    pool: &PgPool,
    user_id: i64,
    source: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE "user_words" SET "active" = FALSE
        WHERE "user_id" = $1
          AND "active" = TRUE
          AND "word_id" IN (SELECT "id" FROM "words" WHERE "source_text" = $2)
        "#,
    )
    .bind(user_id)
    .bind(source)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count_active_words(pool: &PgPool, user_id: i64) -> Result<i64, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT COUNT(*)
        FROM "words" "w"
        WHERE {ELIGIBLE}
        "#
    );
    sqlx::query_scalar::<_, i64>(&sql)
        .bind(user_id)
        .fetch_one(pool)
        .await
}
