// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Todo CRUD operations.

use rusqlite::{OptionalExtension, params};
use taskwire_core::{NewTodo, TaskwireError, Todo, TodoPatch};

use crate::database::{Database, map_tr_err};
use crate::models::{TODO_COLUMNS, now_timestamp, todo_from_row};

/// Todos owned by or assigned to `user_id`, in display order.
pub async fn list_visible(db: &Database, user_id: &str) -> Result<Vec<Todo>, TaskwireError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| -> Result<Vec<Todo>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "SELECT {TODO_COLUMNS} FROM todos
                 WHERE user_id = ?1 OR assigned_user_id = ?1
                 ORDER BY order_index ASC, created_at ASC, id ASC"
            ))?;
            let rows = stmt.query_map(params![user_id], todo_from_row)?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Get a todo by ID.
pub async fn get(db: &Database, id: &str) -> Result<Option<Todo>, TaskwireError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<Todo>, rusqlite::Error> {
            conn.query_row(
                &format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1"),
                params![id],
                todo_from_row,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Insert a batch of todos in a single transaction.
///
/// Ids and creation timestamps are assigned here. If any row fails, no row
/// is written.
pub async fn insert_batch(db: &Database, todos: Vec<NewTodo>) -> Result<Vec<Todo>, TaskwireError> {
    let created_at = now_timestamp();
    db.connection()
        .call(move |conn| -> Result<Vec<Todo>, rusqlite::Error> {
            let tx = conn.transaction()?;
            let mut inserted = Vec::with_capacity(todos.len());
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO todos
                        (id, title, completed, order_index, user_id, assigned_user_id, priority, created_at)
                     VALUES (?1, ?2, 0, ?3, ?4, ?5, ?6, ?7)",
                )?;
                for new in todos {
                    let todo = Todo {
                        id: uuid::Uuid::new_v4().to_string(),
                        title: new.title.trim().to_string(),
                        completed: false,
                        order_index: new.order_index,
                        user_id: new.user_id,
                        assigned_user_id: new.assigned_user_id,
                        priority: new.priority,
                        created_at: created_at.clone(),
                    };
                    stmt.execute(params![
                        todo.id,
                        todo.title,
                        todo.order_index,
                        todo.user_id,
                        todo.assigned_user_id,
                        todo.priority.map(|p| p.to_string()),
                        todo.created_at,
                    ])?;
                    inserted.push(todo);
                }
            }
            tx.commit()?;
            Ok(inserted)
        })
        .await
        .map_err(map_tr_err)
}

/// Apply a partial update. Returns `(before, after)`, or `None` if the todo
/// does not exist.
pub async fn update(
    db: &Database,
    id: &str,
    patch: TodoPatch,
) -> Result<Option<(Todo, Todo)>, TaskwireError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<(Todo, Todo)>, rusqlite::Error> {
            let tx = conn.transaction()?;
            let select = format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1");
            let Some(before) = tx
                .query_row(&select, params![id], todo_from_row)
                .optional()?
            else {
                return Ok(None);
            };

            let (set_assignee, assignee) = match patch.assigned_user_id {
                Some(value) => (true, value),
                None => (false, None),
            };
            tx.execute(
                "UPDATE todos SET
                    title = COALESCE(?2, title),
                    completed = COALESCE(?3, completed),
                    order_index = COALESCE(?4, order_index),
                    assigned_user_id = CASE WHEN ?5 THEN ?6 ELSE assigned_user_id END
                 WHERE id = ?1",
                params![
                    id,
                    patch.title.map(|t| t.trim().to_string()),
                    patch.completed,
                    patch.order_index,
                    set_assignee,
                    assignee,
                ],
            )?;
            let after = tx.query_row(&select, params![id], todo_from_row)?;
            tx.commit()?;
            Ok(Some((before, after)))
        })
        .await
        .map_err(map_tr_err)
}

/// Delete a todo. Returns the deleted row, or `None` if it did not exist.
pub async fn delete(db: &Database, id: &str) -> Result<Option<Todo>, TaskwireError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<Todo>, rusqlite::Error> {
            let tx = conn.transaction()?;
            let before = tx
                .query_row(
                    &format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1"),
                    params![id],
                    todo_from_row,
                )
                .optional()?;
            if before.is_some() {
                tx.execute("DELETE FROM todos WHERE id = ?1", params![id])?;
            }
            tx.commit()?;
            Ok(before)
        })
        .await
        .map_err(map_tr_err)
}
