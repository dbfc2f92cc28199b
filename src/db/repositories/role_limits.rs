use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::{
    models::{role_limit::validation::validate_limit, DiscountLimit, DiscountLimitInput},
    Database,
};

fn row_to_limit(row: &Row) -> rusqlite::Result<DiscountLimit> {
    Ok(DiscountLimit {
        role_id: row.get("role_id")?,
        role_name: row.get("role_name")?,
        max_percentage: row.get("max_percentage")?,
        max_amount: row.get("max_amount")?,
        daily_limit: row.get("daily_limit")?,
    })
}

fn fetch_limit(conn: &Connection, role_id: i64) -> Result<Option<DiscountLimit>> {
    let limit = conn
        .query_row(
            "SELECT role_id, role_name, max_percentage, max_amount, daily_limit
             FROM discount_role_limits WHERE role_id = ?1",
            params![role_id],
            row_to_limit,
        )
        .optional()?;
    Ok(limit)
}

impl Database {
    pub async fn list_role_limits(&self) -> Result<Vec<DiscountLimit>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT role_id, role_name, max_percentage, max_amount, daily_limit
                 FROM discount_role_limits ORDER BY role_name COLLATE NOCASE ASC",
            )?;
            let limits = stmt
                .query_map([], row_to_limit)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(limits)
        })
        .await
    }

    /// Upsert: by `role_id` when given, otherwise by role name (case-insensitive)
    pub async fn save_role_limit(&self, input: DiscountLimitInput) -> Result<DiscountLimit> {
        validate_limit(&input)?;
        let role_name = input.role_name.trim().to_string();

        self.execute(move |conn| {
            let tx = conn.transaction()?;

            let target_id = match input.role_id {
                Some(role_id) => Some(role_id),
                None => tx
                    .query_row(
                        "SELECT role_id FROM discount_role_limits WHERE role_name = ?1",
                        params![role_name],
                        |row| row.get::<_, i64>(0),
                    )
                    .optional()?,
            };

            let role_id = match target_id {
                Some(role_id) => {
                    let rows_affected = tx
                        .execute(
                            "UPDATE discount_role_limits
                             SET role_name = ?1, max_percentage = ?2, max_amount = ?3,
                                 daily_limit = ?4
                             WHERE role_id = ?5",
                            params![
                                role_name,
                                input.max_percentage,
                                input.max_amount,
                                input.daily_limit,
                                role_id,
                            ],
                        )
                        .context("failed to update role limit")?;
                    if rows_affected == 0 {
                        return Err(anyhow!("Role limit {role_id} not found"));
                    }
                    role_id
                }
                None => {
                    tx.execute(
                        "INSERT INTO discount_role_limits
                             (role_name, max_percentage, max_amount, daily_limit)
                         VALUES (?1, ?2, ?3, ?4)",
                        params![
                            role_name,
                            input.max_percentage,
                            input.max_amount,
                            input.daily_limit,
                        ],
                    )
                    .context("failed to insert role limit")?;
                    tx.last_insert_rowid()
                }
            };

            let saved = fetch_limit(&tx, role_id)?
                .ok_or_else(|| anyhow!("Role limit not found after save"))?;
            tx.commit()?;
            Ok(saved)
        })
        .await
    }

    pub async fn delete_role_limit(&self, role_id: i64) -> Result<()> {
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "DELETE FROM discount_role_limits WHERE role_id = ?1",
                params![role_id],
            )?;
            if rows_affected == 0 {
                return Err(anyhow!("Role limit {role_id} not found"));
            }
            Ok(())
        })
        .await
    }
}
