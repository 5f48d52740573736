//! Database queries for the service catalog.

use sqlx::PgPool;

use crate::error::{AppError, Result};

use super::models::Service;

/// Get all offered services in catalog order
pub async fn get_all_services(pool: &PgPool) -> Result<Vec<Service>> {
    let services = sqlx::query_as::<_, Service>(
        r#"
        SELECT id, name, description, base_price, duration_hours, created_at
        FROM services
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(services)
}

/// Get a single service by id
pub async fn get_service(pool: &PgPool, id: i64) -> Result<Service> {
    sqlx::query_as::<_, Service>(
        r#"
        SELECT id, name, description, base_price, duration_hours, created_at
        FROM services
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)
}
