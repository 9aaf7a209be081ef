// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The live board for one viewer.
//!
//! One canonical collection keyed by todo id. The full list and the filtered
//! list are projections computed on demand, so they cannot drift apart.
//! Change events are folded in with [`Board::apply`], which is idempotent.

use std::collections::{BTreeMap, HashSet};

use taskwire_core::{ChangeEvent, Todo};

use crate::schema::FilterCriteria;

#[derive(Debug, Clone)]
pub struct Board {
    viewer: String,
    todos: BTreeMap<String, Todo>,
    filter: Option<FilterCriteria>,
}

impl Board {
    pub fn new(viewer: impl Into<String>) -> Self {
        Self {
            viewer: viewer.into(),
            todos: BTreeMap::new(),
            filter: None,
        }
    }

    /// A board seeded with a fetched snapshot.
    pub fn from_snapshot(viewer: impl Into<String>, todos: impl IntoIterator<Item = Todo>) -> Self {
        let mut board = Self::new(viewer);
        for todo in todos {
            board.apply(ChangeEvent::Insert { todo });
        }
        board
    }

    /// Fold one change event into the board.
    ///
    /// Inserting a known id replaces it. Updating or deleting an unknown id
    /// does nothing. An update that takes a todo out of the viewer's sight
    /// removes it.
    pub fn apply(&mut self, event: ChangeEvent) {
        match event {
            ChangeEvent::Insert { todo } => {
                if todo.is_visible_to(&self.viewer) {
                    self.todos.insert(todo.id.clone(), todo);
                }
            }
            ChangeEvent::Update { todo } => {
                if !self.todos.contains_key(&todo.id) {
                    return;
                }
                if todo.is_visible_to(&self.viewer) {
                    self.todos.insert(todo.id.clone(), todo);
                } else {
                    self.todos.remove(&todo.id);
                }
            }
            ChangeEvent::Delete { id } => {
                self.todos.remove(&id);
            }
        }
    }

    pub fn set_filter(&mut self, filter: Option<FilterCriteria>) {
        self.filter = filter.filter(|f| !f.is_empty());
    }

    pub fn filter(&self) -> Option<&FilterCriteria> {
        self.filter.as_ref()
    }

    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.todos.get(id)
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Every todo, by order index, then creation time, then id.
    pub fn all(&self) -> Vec<&Todo> {
        let mut all: Vec<&Todo> = self.todos.values().collect();
        all.sort_by(|a, b| {
            a.order_index
                .cmp(&b.order_index)
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        all
    }

    /// [`Board::all`] narrowed by the active filter.
    pub fn shown(&self) -> Vec<&Todo> {
        match &self.filter {
            Some(filter) => self
                .all()
                .into_iter()
                .filter(|t| filter.matches(t, &self.viewer))
                .collect(),
            None => self.all(),
        }
    }

    /// Move `ids` to the front in the given order and renumber the whole
    /// board `0..n`.
    ///
    /// Unknown and repeated ids are ignored. Returns only the index changes,
    /// which the caller persists; applying the same order again returns
    /// nothing.
    pub fn reorder(&mut self, ids: &[String]) -> Vec<(String, i64)> {
        let mut seen = HashSet::new();
        let mut order: Vec<String> = ids
            .iter()
            .filter(|id| self.todos.contains_key(*id) && seen.insert((*id).clone()))
            .cloned()
            .collect();
        let rest: Vec<String> = self
            .all()
            .into_iter()
            .filter(|t| !seen.contains(&t.id))
            .map(|t| t.id.clone())
            .collect();
        order.extend(rest);

        let mut changes = Vec::new();
        for (index, id) in order.into_iter().enumerate() {
            let index = index as i64;
            if let Some(todo) = self.todos.get_mut(&id)
                && todo.order_index != index
            {
                todo.order_index = index;
                changes.push((id, index));
            }
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn todo(id: &str, index: i64) -> Todo {
        Todo {
            id: id.into(),
            title: format!("todo {id}"),
            completed: false,
            order_index: index,
            user_id: "me".into(),
            assigned_user_id: None,
            priority: None,
            created_at: "2026-01-01T00:00:00.000Z".into(),
        }
    }

    fn ids(todos: &[&Todo]) -> Vec<String> {
        todos.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn repeated_insert_does_not_duplicate() {
        let mut board = Board::new("me");
        board.apply(ChangeEvent::Insert { todo: todo("a", 1) });
        board.apply(ChangeEvent::Insert { todo: todo("a", 1) });
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn unknown_update_and_delete_are_no_ops() {
        let mut board = Board::from_snapshot("me", [todo("a", 1)]);
        board.apply(ChangeEvent::Update { todo: todo("ghost", 2) });
        board.apply(ChangeEvent::Delete { id: "ghost".into() });
        assert_eq!(ids(&board.all()), vec!["a"]);
    }

    #[test]
    fn update_out_of_sight_removes() {
        let mut board = Board::from_snapshot("me", [todo("a", 1)]);
        let mut moved = todo("a", 1);
        moved.user_id = "someone-else".into();
        board.apply(ChangeEvent::Update { todo: moved });
        assert!(board.is_empty());
    }

    #[test]
    fn shown_is_a_projection_of_all() {
        let mut board = Board::from_snapshot("me", [todo("b", 2), todo("a", 1)]);
        let mut done = todo("c", 3);
        done.completed = true;
        board.apply(ChangeEvent::Insert { todo: done });
        board.set_filter(Some(FilterCriteria {
            completed: Some(false),
            ..Default::default()
        }));
        assert_eq!(ids(&board.all()), vec!["a", "b", "c"]);
        assert_eq!(ids(&board.shown()), vec!["a", "b"]);

        board.apply(ChangeEvent::Delete { id: "a".into() });
        assert_eq!(ids(&board.shown()), vec!["b"]);

        board.set_filter(Some(FilterCriteria::default()));
        assert!(board.filter().is_none());
    }

    #[test]
    fn reorder_moves_listed_ids_first() {
        let mut board = Board::from_snapshot("me", [todo("a", 0), todo("b", 5), todo("c", 9)]);
        let changes = board.reorder(&["c".into(), "missing".into(), "c".into(), "b".into()]);
        assert_eq!(ids(&board.all()), vec!["c", "b", "a"]);
        assert_eq!(
            changes,
            vec![
                ("c".to_string(), 0),
                ("b".to_string(), 1),
                ("a".to_string(), 2)
            ]
        );
        assert!(board.reorder(&["c".into(), "b".into()]).is_empty());
    }

    proptest! {
        #[test]
        fn reorder_is_idempotent(perm in Just((0..6).collect::<Vec<usize>>()).prop_shuffle()) {
            let todos: Vec<Todo> = (0..6).map(|i| todo(&format!("t{i}"), i as i64 * 10)).collect();
            let mut board = Board::from_snapshot("me", todos);
            let target: Vec<String> = perm.iter().map(|i| format!("t{i}")).collect();

            board.reorder(&target);
            let first: Vec<(String, i64)> =
                board.all().iter().map(|t| (t.id.clone(), t.order_index)).collect();
            prop_assert!(board.reorder(&target).is_empty());
            let second: Vec<(String, i64)> =
                board.all().iter().map(|t| (t.id.clone(), t.order_index)).collect();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(ids(&board.all()), target);
        }
    }
}
