use serde_json::Value;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::resumes::models::ResumeRow;

/// Newest edits first.
pub async fn list_resumes(pool: &PgPool) -> Result<Vec<ResumeRow>, AppError> {
    Ok(
        sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes ORDER BY updated_at DESC")
            .fetch_all(pool)
            .await?,
    )
}

pub async fn get_resume(pool: &PgPool, id: Uuid) -> Result<Option<ResumeRow>, AppError> {
    Ok(
        sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?,
    )
}

pub async fn insert_resume(
    pool: &PgPool,
    title: &str,
    content: &Value,
    template: &str,
) -> Result<ResumeRow, AppError> {
    let row = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes (id, title, content, template)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(title)
    .bind(content)
    .bind(template)
    .fetch_one(pool)
    .await?;

    info!(resume_id = %row.id, template, "Created resume");
    Ok(row)
}

/// Applies whichever fields are `Some`. Returns `None` when the row does not exist.
pub async fn update_resume(
    pool: &PgPool,
    id: Uuid,
    title: Option<&str>,
    content: Option<&Value>,
    template: Option<&str>,
) -> Result<Option<ResumeRow>, AppError> {
    let row = sqlx::query_as::<_, ResumeRow>(
        r#"
        UPDATE resumes
        SET title      = COALESCE($2, title),
            content    = COALESCE($3, content),
            template   = COALESCE($4, template),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(content)
    .bind(template)
    .fetch_optional(pool)
    .await?;

    if row.is_some() {
        info!(resume_id = %id, "Updated resume");
    }
    Ok(row)
}

/// Returns whether a row was deleted.
pub async fn delete_resume(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    let deleted = result.rows_affected() > 0;
    if deleted {
        info!(resume_id = %id, "Deleted resume");
    }
    Ok(deleted)
}
