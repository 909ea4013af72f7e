use crate::{models::DbNotificationTemplate, DbPool};
use async_trait::async_trait;
use chrono::Utc;
use clinic_core::models::notification::CreateTemplateRequest;
use eyre::Result;
use mockall::automock;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_template(
    pool: &Pool<Postgres>,
    request: &CreateTemplateRequest,
) -> Result<DbNotificationTemplate> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating notification template: id={}, name={}, type={}",
        id, request.name, request.notification_type
    );

    let template = sqlx::query_as::<_, DbNotificationTemplate>(
        r#"
        INSERT INTO notification_templates
            (id, name, notification_type, subject, body, priority, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
        RETURNING id, name, notification_type, subject, body, priority, is_active, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&request.name)
    .bind(request.notification_type.as_str())
    .bind(&request.subject)
    .bind(&request.body)
    .bind(request.priority.as_str())
    .bind(request.is_active)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(template)
}

pub async fn get_template_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbNotificationTemplate>> {
    let template = sqlx::query_as::<_, DbNotificationTemplate>(
        r#"
        SELECT id, name, notification_type, subject, body, priority, is_active, created_at, updated_at
        FROM notification_templates
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(template)
}

pub async fn get_template_by_name(
    pool: &Pool<Postgres>,
    name: &str,
) -> Result<Option<DbNotificationTemplate>> {
    let template = sqlx::query_as::<_, DbNotificationTemplate>(
        r#"
        SELECT id, name, notification_type, subject, body, priority, is_active, created_at, updated_at
        FROM notification_templates
        WHERE name = $1
        "#,
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(template)
}

#[automock]
#[async_trait]
pub trait NotificationTemplateRepository: Send + Sync {
    async fn create_template(&self, request: &CreateTemplateRequest) -> Result<DbNotificationTemplate>;

    async fn get_template_by_id(&self, id: Uuid) -> Result<Option<DbNotificationTemplate>>;

    async fn get_template_by_name(&self, name: &str) -> Result<Option<DbNotificationTemplate>>;
}

pub struct PgNotificationTemplateRepository {
    pool: DbPool,
}

impl PgNotificationTemplateRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationTemplateRepository for PgNotificationTemplateRepository {
    async fn create_template(&self, request: &CreateTemplateRequest) -> Result<DbNotificationTemplate> {
        create_template(&self.pool, request).await
    }

    async fn get_template_by_id(&self, id: Uuid) -> Result<Option<DbNotificationTemplate>> {
        get_template_by_id(&self.pool, id).await
    }

    async fn get_template_by_name(&self, name: &str) -> Result<Option<DbNotificationTemplate>> {
        get_template_by_name(&self.pool, name).await
    }
}
