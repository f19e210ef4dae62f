//! SQLite-backed implementation of the roster store's member table.
//!
//! Uses prepared statements; the instrument set is stored as a JSON array
//! column, role and status as their display labels.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{MemberStatus, Role, TeamMember};
use crate::roster::MemberTable;

/// Member table backed by the SQLite pool.
#[derive(Clone)]
pub struct MemberRepository {
    pool: SqlitePool,
}

impl MemberRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberTable for MemberRepository {
    async fn select_all(&self) -> Result<Vec<TeamMember>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, email, phone, role, instruments, availability, notes, birthday, status FROM members ORDER BY name"
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(member_from_row).collect()
    }

    async fn insert(&self, member: &TeamMember) -> Result<(), AppError> {
        let instruments_json = serde_json::to_string(&member.instruments)?;

        sqlx::query(
            "INSERT INTO members (id, name, email, phone, role, instruments, availability, notes, birthday, status) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&member.id)
        .bind(&member.name)
        .bind(&member.email)
        .bind(&member.phone)
        .bind(member.role.as_str())
        .bind(&instruments_json)
        .bind(&member.availability)
        .bind(&member.notes)
        .bind(member.birthday)
        .bind(member.status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, member: &TeamMember) -> Result<(), AppError> {
        let instruments_json = serde_json::to_string(&member.instruments)?;

        let result = sqlx::query(
            "UPDATE members SET name = ?, email = ?, phone = ?, role = ?, instruments = ?, availability = ?, notes = ?, birthday = ?, status = ? WHERE id = ?"
        )
        .bind(&member.name)
        .bind(&member.email)
        .bind(&member.phone)
        .bind(member.role.as_str())
        .bind(&instruments_json)
        .bind(&member.availability)
        .bind(&member.notes)
        .bind(member.birthday)
        .bind(member.status.as_str())
        .bind(&member.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Member {} not found",
                member.id
            )));
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        // Deleting an absent id is a no-op by contract.
        sqlx::query("DELETE FROM members WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn member_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<TeamMember, AppError> {
    let role_str: String = row.get("role");
    let status_str: String = row.get("status");
    let instruments_str: String = row.get("instruments");
    let birthday: Option<NaiveDate> = row.get("birthday");

    let role = Role::from_str(&role_str)
        .ok_or_else(|| AppError::Persistence(format!("Unknown role label: {}", role_str)))?;
    let status = MemberStatus::from_str(&status_str)
        .ok_or_else(|| AppError::Persistence(format!("Unknown status: {}", status_str)))?;

    Ok(TeamMember {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        phone: row.get("phone"),
        role,
        instruments: serde_json::from_str(&instruments_str)?,
        availability: row.get("availability"),
        notes: row.get("notes"),
        birthday,
        status,
    })
}
