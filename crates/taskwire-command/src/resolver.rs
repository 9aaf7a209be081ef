// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Maps a free-text person reference to a roster profile.

use taskwire_core::Profile;

/// Shortest reference that may match by substring.
const MIN_PARTIAL_LEN: usize = 2;

/// Resolve `reference` against `users`.
///
/// Matching is case-insensitive and a leading `@` is ignored. An exact email
/// wins over everything; otherwise the first profile (in roster order) whose
/// email local part, name or full name contains the reference is returned.
pub fn resolve<'a>(reference: &str, users: &'a [Profile]) -> Option<&'a Profile> {
    let needle = normalize(reference);
    if needle.is_empty() {
        return None;
    }

    if let Some(exact) = users.iter().find(|u| u.email.to_lowercase() == needle) {
        return Some(exact);
    }

    if needle.chars().count() < MIN_PARTIAL_LEN {
        return None;
    }
    users.iter().find(|u| {
        u.email_local_part().to_lowercase().contains(&needle)
            || contains_ci(u.name.as_deref(), &needle)
            || contains_ci(u.full_name.as_deref(), &needle)
    })
}

/// Resolve a single-word `token` only when it is a whole word of a
/// profile's name or full name, its email local part, or an exact email.
///
/// Used for phrasing where the word after "for" or "give" is usually not a
/// person, so partial matches would misfire ("the" inside "Matthew").
pub fn resolve_token<'a>(token: &str, users: &'a [Profile]) -> Option<&'a Profile> {
    let needle = normalize(token);
    if needle.is_empty() {
        return None;
    }
    if needle.contains('@') {
        return users.iter().find(|u| u.email.to_lowercase() == needle);
    }
    users.iter().find(|u| {
        u.email_local_part().to_lowercase() == needle
            || has_word(u.name.as_deref(), &needle)
            || has_word(u.full_name.as_deref(), &needle)
    })
}

fn has_word(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|f| f.split_whitespace().any(|w| w.to_lowercase() == needle))
}

fn normalize(reference: &str) -> String {
    reference.trim().trim_start_matches('@').trim().to_lowercase()
}

fn contains_ci(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|f| f.to_lowercase().contains(needle))
}
