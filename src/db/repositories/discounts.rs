use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, Row};

use crate::db::{
    helpers::{from_json, parse_datetime, to_json},
    models::{discount::validation::validate_discount, Discount, DiscountInput, DiscountKind},
    Database,
};

const SELECT_DISCOUNT: &str = "SELECT id, name, percentage, is_active, promo_code, max_amount,
        allowed_roles, description, kind_payload, created_at, updated_at
 FROM discounts";

fn row_to_discount(row: &Row) -> Result<Discount> {
    let allowed_roles: String = row.get("allowed_roles")?;
    let kind_payload: String = row.get("kind_payload")?;
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(Discount {
        id: row.get("id")?,
        name: row.get("name")?,
        percentage: row.get("percentage")?,
        is_active: row.get("is_active")?,
        promo_code: row.get("promo_code")?,
        max_amount: row.get("max_amount")?,
        allowed_roles: from_json(&allowed_roles, "allowed_roles")?,
        description: row.get("description")?,
        kind: from_json::<DiscountKind>(&kind_payload, "kind_payload")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

fn fetch_discount(conn: &Connection, discount_id: i64) -> Result<Option<Discount>> {
    let mut stmt = conn.prepare(&format!("{SELECT_DISCOUNT} WHERE id = ?1"))?;
    let mut rows = stmt.query(params![discount_id])?;
    match rows.next()? {
        Some(row) => Ok(Some(row_to_discount(row)?)),
        None => Ok(None),
    }
}

impl Database {
    /// Validates and inserts a new offer
    pub async fn create_discount(&self, input: DiscountInput) -> Result<Discount> {
        let input = input.normalized();
        validate_discount(&input)?;

        self.execute(move |conn| {
            let now = Utc::now().to_rfc3339();
            conn.execute(
                "INSERT INTO discounts (name, percentage, is_active, promo_code, max_amount,
                        allowed_roles, description, kind, kind_payload, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    input.name,
                    input.percentage,
                    input.is_active,
                    input.promo_code,
                    input.max_amount,
                    to_json(&input.allowed_roles, "allowed_roles")?,
                    input.description,
                    input.kind.tag().as_str(),
                    to_json(&input.kind, "kind_payload")?,
                    now,
                    now,
                ],
            )
            .context("failed to insert discount")?;

            let discount_id = conn.last_insert_rowid();
            fetch_discount(conn, discount_id)?
                .ok_or_else(|| anyhow!("Offer not found after insert"))
        })
        .await
    }

    /// All offers, oldest first (table order)
    pub async fn list_discounts(&self) -> Result<Vec<Discount>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_DISCOUNT} ORDER BY id ASC"))?;
            let mut rows = stmt.query([])?;
            let mut discounts = Vec::new();
            while let Some(row) = rows.next()? {
                discounts.push(row_to_discount(row)?);
            }
            Ok(discounts)
        })
        .await
    }

    pub async fn get_discount(&self, discount_id: i64) -> Result<Option<Discount>> {
        self.execute(move |conn| fetch_discount(conn, discount_id)).await
    }

    /// Replaces every editable field of an offer
    pub async fn update_discount(
        &self,
        discount_id: i64,
        input: DiscountInput,
    ) -> Result<Discount> {
        let input = input.normalized();
        validate_discount(&input)?;

        self.execute(move |conn| {
            let rows_affected = conn
                .execute(
                    "UPDATE discounts
                     SET name = ?1, percentage = ?2, is_active = ?3, promo_code = ?4,
                         max_amount = ?5, allowed_roles = ?6, description = ?7,
                         kind = ?8, kind_payload = ?9, updated_at = ?10
                     WHERE id = ?11",
                    params![
                        input.name,
                        input.percentage,
                        input.is_active,
                        input.promo_code,
                        input.max_amount,
                        to_json(&input.allowed_roles, "allowed_roles")?,
                        input.description,
                        input.kind.tag().as_str(),
                        to_json(&input.kind, "kind_payload")?,
                        Utc::now().to_rfc3339(),
                        discount_id,
                    ],
                )
                .context("failed to update discount")?;

            if rows_affected == 0 {
                return Err(anyhow!("Offer {discount_id} not found"));
            }

            fetch_discount(conn, discount_id)?
                .ok_or_else(|| anyhow!("Offer not found after update"))
        })
        .await
    }

    /// Swaps only the availability payload, e.g. after the schedule editor saves
    pub async fn set_discount_kind(
        &self,
        discount_id: i64,
        kind: DiscountKind,
    ) -> Result<Discount> {
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "UPDATE discounts SET kind = ?1, kind_payload = ?2, updated_at = ?3 WHERE id = ?4",
                params![
                    kind.tag().as_str(),
                    to_json(&kind, "kind_payload")?,
                    Utc::now().to_rfc3339(),
                    discount_id,
                ],
            )?;

            if rows_affected == 0 {
                return Err(anyhow!("Offer {discount_id} not found"));
            }

            fetch_discount(conn, discount_id)?
                .ok_or_else(|| anyhow!("Offer not found after update"))
        })
        .await
    }

    pub async fn delete_discount(&self, discount_id: i64) -> Result<()> {
        self.execute(move |conn| {
            let rows_affected =
                conn.execute("DELETE FROM discounts WHERE id = ?1", params![discount_id])?;

            if rows_affected == 0 {
                return Err(anyhow!("Offer {discount_id} not found"));
            }
            Ok(())
        })
        .await
    }
}
