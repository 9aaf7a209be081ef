// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server-Sent Events change feed for GET /v1/todos/events.
//!
//! Each subscriber sees only changes to todos it owns or is assigned.
//! A subscriber that loses sight of a todo through an update receives a
//! `delete` for it.
//!
//! SSE event format:
//! ```text
//! event: insert
//! data: {"event":"insert","todo":{...}}
//!
//! event: resync
//! data: {"skipped":12}
//! ```
//!
//! `resync` is sent when the subscriber fell behind the broadcast buffer;
//! the client should refetch `/v1/todos`.

use std::convert::Infallible;

use axum::{
    Extension,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{self, Stream, StreamExt};
use serde_json::json;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};

use taskwire_core::{ChangeEvent, Profile, ScopedChange, TodoStore};

use crate::server::GatewayState;

/// One item on a subscriber's feed.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedItem {
    Change(ChangeEvent),
    /// The subscriber missed `skipped` store-wide changes.
    Resync { skipped: u64 },
}

/// Project the store-wide feed onto what `user_id` may observe.
///
/// Ends when the store drops its sender.
pub fn scoped_changes(
    rx: broadcast::Receiver<ScopedChange>,
    user_id: String,
) -> impl Stream<Item = FeedItem> {
    stream::unfold((rx, user_id), |(mut rx, user_id)| async move {
        loop {
            match rx.recv().await {
                Ok(change) => {
                    if let Some(event) = change.for_user(&user_id) {
                        return Some((FeedItem::Change(event), (rx, user_id)));
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(user_id = %user_id, skipped, "change feed subscriber lagged");
                    return Some((FeedItem::Resync { skipped }, (rx, user_id)));
                }
                Err(RecvError::Closed) => return None,
            }
        }
    })
}

fn to_event(item: &FeedItem) -> Event {
    let (name, data) = match item {
        FeedItem::Change(change) => (change.kind(), Event::default().json_data(change)),
        FeedItem::Resync { skipped } => {
            ("resync", Event::default().json_data(json!({ "skipped": skipped })))
        }
    };
    match data {
        Ok(event) => event.event(name),
        Err(e) => {
            warn!(error = %e, "failed to encode change event");
            Event::default().event("resync").data("{}")
        }
    }
}

/// GET /v1/todos/events
pub async fn todo_events(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Profile>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!(actor = %actor.email, "change feed subscribed");
    let stream = scoped_changes(state.store.subscribe(), actor.id)
        .map(|item| Ok::<_, Infallible>(to_event(&item)));
    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskwire_core::Todo;

    fn todo(owner: &str, assignee: Option<&str>) -> Todo {
        Todo {
            id: "t1".into(),
            title: "Clean kitchen".into(),
            completed: false,
            order_index: 1,
            user_id: owner.into(),
            assigned_user_id: assignee.map(Into::into),
            priority: None,
            created_at: "2026-01-01T00:00:00.000Z".into(),
        }
    }

    #[tokio::test]
    async fn only_visible_changes_reach_the_subscriber() {
        let (tx, rx) = broadcast::channel(16);
        let mut feed = Box::pin(scoped_changes(rx, "john".into()));

        tx.send(ScopedChange {
            event: ChangeEvent::Insert {
                todo: todo("me", None),
            },
            previous_audience: vec![],
        })
        .unwrap();
        tx.send(ScopedChange {
            event: ChangeEvent::Update {
                todo: todo("me", Some("john")),
            },
            previous_audience: vec!["me".into()],
        })
        .unwrap();
        tx.send(ScopedChange {
            event: ChangeEvent::Update {
                todo: todo("me", None),
            },
            previous_audience: vec!["me".into(), "john".into()],
        })
        .unwrap();
        drop(tx);

        assert_eq!(
            feed.next().await,
            Some(FeedItem::Change(ChangeEvent::Insert {
                todo: todo("me", Some("john"))
            }))
        );
        assert_eq!(
            feed.next().await,
            Some(FeedItem::Change(ChangeEvent::Delete { id: "t1".into() }))
        );
        assert_eq!(feed.next().await, None);
    }

    #[tokio::test]
    async fn lagging_subscriber_is_told_to_resync() {
        let (tx, rx) = broadcast::channel(1);
        let mut feed = Box::pin(scoped_changes(rx, "me".into()));
        for _ in 0..3 {
            tx.send(ScopedChange {
                event: ChangeEvent::Delete { id: "t1".into() },
                previous_audience: vec!["me".into()],
            })
            .unwrap();
        }

        assert_eq!(feed.next().await, Some(FeedItem::Resync { skipped: 2 }));
        assert_eq!(
            feed.next().await,
            Some(FeedItem::Change(ChangeEvent::Delete { id: "t1".into() }))
        );
    }
}
