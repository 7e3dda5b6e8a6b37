use sqlx::types::Json;
use sqlx::{Error, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::db::models::{Business, Service, ServiceInput, UpdateBusinessProfile};

const BUSINESS_COLUMNS: &str =
    "id, owner_user_id, shop_name, address, cover_image_url, opening_hours, created_at, updated_at";

pub struct BusinessRepository;

impl BusinessRepository {
    pub async fn list(pool: &PgPool) -> Result<Vec<Business>, Error> {
        sqlx::query_as::<_, Business>(&format!(
            "SELECT {BUSINESS_COLUMNS} FROM businesses ORDER BY shop_name, id"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn get_by_id(pool: &PgPool, business_id: Uuid) -> Result<Option<Business>, Error> {
        sqlx::query_as::<_, Business>(&format!(
            "SELECT {BUSINESS_COLUMNS} FROM businesses WHERE id = $1"
        ))
        .bind(business_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn get_by_owner(pool: &PgPool, owner_user_id: Uuid) -> Result<Option<Business>, Error> {
        sqlx::query_as::<_, Business>(&format!(
            "SELECT {BUSINESS_COLUMNS} FROM businesses WHERE owner_user_id = $1"
        ))
        .bind(owner_user_id)
        .fetch_optional(pool)
        .await
    }

    /// Create-or-update the owner's business profile, keyed by owner id like
    /// the original app's per-user account node.
    pub async fn upsert_profile(
        pool: &PgPool,
        owner_user_id: Uuid,
        profile: &UpdateBusinessProfile,
    ) -> Result<Business, Error> {
        sqlx::query_as::<_, Business>(&format!(
            r#"
            INSERT INTO businesses (owner_user_id, shop_name, address, cover_image_url, opening_hours)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (owner_user_id) DO UPDATE
            SET shop_name = EXCLUDED.shop_name,
                address = EXCLUDED.address,
                cover_image_url = EXCLUDED.cover_image_url,
                opening_hours = EXCLUDED.opening_hours,
                updated_at = NOW()
            RETURNING {BUSINESS_COLUMNS}
            "#
        ))
        .bind(owner_user_id)
        .bind(&profile.shop_name)
        .bind(&profile.address)
        .bind(&profile.cover_image_url)
        .bind(Json(&profile.opening_hours))
        .fetch_one(pool)
        .await
    }

    pub async fn services(pool: &PgPool, business_id: Uuid) -> Result<Vec<Service>, Error> {
        sqlx::query_as::<_, Service>(
            "SELECT id, business_id, name, price, position FROM services \
             WHERE business_id = $1 ORDER BY position, id",
        )
        .bind(business_id)
        .fetch_all(pool)
        .await
    }

    /// Replace the full service list, preserving submitted order and any
    /// submitted ids so existing appointment references stay valid.
    pub async fn replace_services(
        tx: &mut Transaction<'_, Postgres>,
        business_id: Uuid,
        services: &[ServiceInput],
    ) -> Result<Vec<Service>, Error> {
        sqlx::query("DELETE FROM services WHERE business_id = $1")
            .bind(business_id)
            .execute(&mut **tx)
            .await?;

        let mut saved = Vec::with_capacity(services.len());
        for (position, service) in services.iter().enumerate() {
            let row = sqlx::query_as::<_, Service>(
                r#"
                INSERT INTO services (id, business_id, name, price, position)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, business_id, name, price, position
                "#,
            )
            .bind(service.id.unwrap_or_else(Uuid::new_v4))
            .bind(business_id)
            .bind(&service.name)
            .bind(&service.price)
            .bind(position as i32)
            .fetch_one(&mut **tx)
            .await?;
            saved.push(row);
        }
        Ok(saved)
    }
}
