// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row mapping between SQLite and the core record types.

use std::str::FromStr;

use rusqlite::Row;
use rusqlite::types::Type;
use taskwire_core::{Priority, Profile, Todo};

/// Column list matching [`todo_from_row`].
pub(crate) const TODO_COLUMNS: &str =
    "id, title, completed, order_index, user_id, assigned_user_id, priority, created_at";

/// Column list matching [`profile_from_row`].
pub(crate) const PROFILE_COLUMNS: &str = "id, email, name, full_name, avatar_url";

pub(crate) fn todo_from_row(row: &Row<'_>) -> rusqlite::Result<Todo> {
    let priority: Option<String> = row.get(6)?;
    let priority = priority
        .map(|p| {
            Priority::from_str(&p)
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))
        })
        .transpose()?;

    Ok(Todo {
        id: row.get(0)?,
        title: row.get(1)?,
        completed: row.get(2)?,
        order_index: row.get(3)?,
        user_id: row.get(4)?,
        assigned_user_id: row.get(5)?,
        priority,
        created_at: row.get(7)?,
    })
}

pub(crate) fn profile_from_row(row: &Row<'_>) -> rusqlite::Result<Profile> {
    Ok(Profile {
        id: row.get(0)?,
        email: row.get(1)?,
        name: row.get(2)?,
        full_name: row.get(3)?,
        avatar_url: row.get(4)?,
    })
}

/// Current time in the storage timestamp format.
pub(crate) fn now_timestamp() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}
