// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Profile (user roster) operations.

use rusqlite::{OptionalExtension, params};
use taskwire_core::{Profile, TaskwireError};

use crate::database::{Database, map_tr_err};
use crate::models::{PROFILE_COLUMNS, profile_from_row};

/// Create a profile. Emails are stored lower-cased and must be unique.
pub async fn insert(
    db: &Database,
    email: &str,
    name: Option<&str>,
    full_name: Option<&str>,
) -> Result<Profile, TaskwireError> {
    let profile = Profile {
        id: uuid::Uuid::new_v4().to_string(),
        email: email.trim().to_lowercase(),
        name: name.map(str::to_string),
        full_name: full_name.map(str::to_string),
        avatar_url: None,
    };
    let row = profile.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO profiles (id, email, name, full_name, avatar_url)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![row.id, row.email, row.name, row.full_name, row.avatar_url],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;
    Ok(profile)
}

/// Up to `limit` profiles ordered by email.
pub async fn list(db: &Database, limit: usize) -> Result<Vec<Profile>, TaskwireError> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    db.connection()
        .call(move |conn| -> Result<Vec<Profile>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY email ASC LIMIT ?1"
            ))?;
            let rows = stmt.query_map(params![limit], profile_from_row)?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Look up a profile by email, case-insensitively.
pub async fn get_by_email(db: &Database, email: &str) -> Result<Option<Profile>, TaskwireError> {
    let email = email.trim().to_lowercase();
    db.connection()
        .call(move |conn| -> Result<Option<Profile>, rusqlite::Error> {
            conn.query_row(
                &format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE email = ?1"),
                params![email],
                profile_from_row,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

pub async fn get(db: &Database, id: &str) -> Result<Option<Profile>, TaskwireError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<Profile>, rusqlite::Error> {
            conn.query_row(
                &format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = ?1"),
                params![id],
                profile_from_row,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}
