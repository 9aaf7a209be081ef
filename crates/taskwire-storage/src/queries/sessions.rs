// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session tokens binding a bearer credential to a profile.

use rusqlite::{OptionalExtension, params};
use taskwire_core::{Profile, TaskwireError};

use crate::database::{Database, map_tr_err};

/// Issue a new random session token for `user_id`.
pub async fn create(db: &Database, user_id: &str) -> Result<String, TaskwireError> {
    let token = hex::encode(rand::random::<[u8; 32]>());
    let user_id = user_id.to_string();
    let stored = token.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO sessions (token, user_id) VALUES (?1, ?2)",
                params![stored, user_id],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;
    Ok(token)
}

/// The profile a token belongs to, if the token is known.
pub async fn profile_for_token(db: &Database, token: &str) -> Result<Option<Profile>, TaskwireError> {
    let token = token.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<Profile>, rusqlite::Error> {
            conn.query_row(
                "SELECT p.id, p.email, p.name, p.full_name, p.avatar_url
                 FROM sessions s JOIN profiles p ON p.id = s.user_id
                 WHERE s.token = ?1",
                params![token],
                crate::models::profile_from_row,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Revoke a token. Returns whether it existed.
pub async fn revoke(db: &Database, token: &str) -> Result<bool, TaskwireError> {
    let token = token.to_string();
    db.connection()
        .call(move |conn| -> Result<bool, rusqlite::Error> {
            Ok(conn.execute("DELETE FROM sessions WHERE token = ?1", params![token])? > 0)
        })
        .await
        .map_err(map_tr_err)
}
