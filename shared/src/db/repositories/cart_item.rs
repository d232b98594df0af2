use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{
    db::error::DatabaseError,
    models::{CartItem, CartItemStatus},
};

pub struct CartItemRepository {
    pool: PgPool,
}

impl CartItemRepository {
    pub fn new(pool: &PgPool) -> Self {
        Self { pool: pool.clone() }
    }

    pub async fn create(&self, item: &CartItem) -> Result<CartItem, DatabaseError> {
        let created = sqlx::query_as::<_, CartItem>(
            r#"
            INSERT INTO cart_items (id, user_email, donation_id, notes, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_email, donation_id, notes, status,
                      created_at, claimed_at, cancelled_at
            "#,
        )
        .bind(&item.id)
        .bind(&item.user_email)
        .bind(&item.donation_id)
        .bind(&item.notes)
        .bind(item.status)
        .bind(item.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_unique_violation(e, "Item already in cart"))?;

        Ok(created)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<CartItem>, DatabaseError> {
        let item = sqlx::query_as::<_, CartItem>(
            r#"
            SELECT id, user_email, donation_id, notes, status,
                   created_at, claimed_at, cancelled_at
            FROM cart_items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    pub async fn find_by_user_email(&self, user_email: &str) -> Result<Vec<CartItem>, DatabaseError> {
        let items = sqlx::query_as::<_, CartItem>(
            r#"
            SELECT id, user_email, donation_id, notes, status,
                   created_at, claimed_at, cancelled_at
            FROM cart_items
            WHERE user_email = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_email)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Moves a pending item to `claimed`. Returns `None` when the item does
    /// not exist or is no longer pending.
    pub async fn mark_claimed(
        &self,
        id: &str,
        claimed_at: DateTime<Utc>,
    ) -> Result<Option<CartItem>, DatabaseError> {
        let item = sqlx::query_as::<_, CartItem>(
            r#"
            UPDATE cart_items
            SET status = $2, claimed_at = $3
            WHERE id = $1 AND status = $4
            RETURNING id, user_email, donation_id, notes, status,
                      created_at, claimed_at, cancelled_at
            "#,
        )
        .bind(id)
        .bind(CartItemStatus::Claimed)
        .bind(claimed_at)
        .bind(CartItemStatus::Pending)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    pub async fn mark_cancelled(
        &self,
        id: &str,
        cancelled_at: DateTime<Utc>,
    ) -> Result<Option<CartItem>, DatabaseError> {
        let item = sqlx::query_as::<_, CartItem>(
            r#"
            UPDATE cart_items
            SET status = $2, cancelled_at = $3
            WHERE id = $1 AND status = $4
            RETURNING id, user_email, donation_id, notes, status,
                      created_at, claimed_at, cancelled_at
            "#,
        )
        .bind(id)
        .bind(CartItemStatus::Cancelled)
        .bind(cancelled_at)
        .bind(CartItemStatus::Pending)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }
}
