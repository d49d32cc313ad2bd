use sqlx::PgPool;

const CREATE_TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS "users" (
        "id" BIGSERIAL PRIMARY KEY,
        "telegram_id" BIGINT NOT NULL UNIQUE,
        "username" VARCHAR(100),
        "first_name" VARCHAR(100),
        "last_name" VARCHAR(100),
        "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        "updated_at" TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS "words" (
        "id" BIGSERIAL PRIMARY KEY,
        "source_text" VARCHAR(200) NOT NULL,
        "target_text" VARCHAR(200) NOT NULL,
        "is_common" BOOLEAN NOT NULL DEFAULT FALSE,
        "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        UNIQUE ("source_text", "target_text")
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS "user_words" (
        "user_id" BIGINT NOT NULL,
        "word_id" BIGINT NOT NULL REFERENCES "words"("id"),
        "active" BOOLEAN NOT NULL DEFAULT TRUE,
        "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        PRIMARY KEY ("user_id", "word_id")
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS "usage_events" (
        "id" BIGSERIAL PRIMARY KEY,
        "user_id" BIGINT NOT NULL,
        "kind" VARCHAR(50) NOT NULL,
        "detail" TEXT,
        "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS "idx_usage_events_user" ON "usage_events" ("user_id", "kind")
    "#,
];

struct SeedWord {
    source: &'static str,
    target: &'static str,
}

/// Starter dictionary visible to every user.
const COMMON_WORDS: &[SeedWord] = &[
    SeedWord { source: "Peace", target: "Мир" },
    SeedWord { source: "Green", target: "Зеленый" },
    SeedWord { source: "White", target: "Белый" },
    SeedWord { source: "Blue", target: "Синий" },
    SeedWord { source: "Red", target: "Красный" },
    SeedWord { source: "Hello", target: "Привет" },
    SeedWord { source: "Car", target: "Машина" },
    SeedWord { source: "House", target: "Дом" },
    SeedWord { source: "Water", target: "Вода" },
    SeedWord { source: "Friend", target: "Друг" },
];

pub async fn create_tables(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in CREATE_TABLES {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::debug!("schema ensured");
    Ok(())
}

pub async fn seed_common_words(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut seeded = 0u64;
    for word in COMMON_WORDS {
        let result = sqlx::query(
            r#"
            INSERT INTO "words" ("source_text", "target_text", "is_common")
            VALUES ($1, $2, TRUE)
            ON CONFLICT ("source_text", "target_text") DO NOTHING
            "#,
        )
        .bind(word.source)
        .bind(word.target)
        .execute(pool)
        .await?;
        seeded += result.rows_affected();
    }

    if seeded > 0 {
        tracing::info!(seeded, "seeded common words");
    } else {
        tracing::debug!("common words already present");
    }
    Ok(())
}
