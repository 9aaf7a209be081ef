// SPDX-FileCopyrightText: 2026 Taskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic command oracle.
//!
//! Turns a command into a function call using keyword tables and a handful of
//! regular expressions. No network, no latency, fully deterministic. Display
//! and completion phrasing must be explicit; everything else is captured as
//! new todos.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::{Captures, Regex};
use taskwire_core::{
    AdapterType, HealthStatus, OracleAdapter, OracleReply, OracleRequest, PluginAdapter, Priority,
    Profile, TaskwireError,
};
use tracing::debug;

use crate::resolver;
use crate::schema::{FilterCriteria, Intent, TodoDraft};

/// Leading phrases that make a command a display request.
const SHOW_PREFIXES: &[&str] = &[
    "show", "list", "display", "filter", "find", "view", "only show", "what are", "which",
    "what's on", "whats on",
];

/// Leading phrases that make a command a completion request.
const COMPLETE_PREFIXES: &[&str] = &[
    "complete",
    "finish",
    "check off",
    "done with",
    "i finished",
    "i completed",
    "i'm done with",
    "im done with",
    "i am done with",
];

const URGENT_CUES: &[&str] = &[
    "urgent",
    "urgently",
    "asap",
    "critical",
    "immediately",
    "as soon as possible",
];
const HIGH_CUES: &[&str] = &["important", "high priority", "high-priority"];
const LOW_CUES: &[&str] = &[
    "later",
    "minor",
    "someday",
    "whenever",
    "eventually",
    "low priority",
    "low-priority",
];

/// Words that carry no keyword meaning in a display request.
const FILTER_STOPWORDS: &[&str] = &[
    "show", "list", "display", "filter", "find", "view", "what", "what's", "whats", "which",
    "are", "is", "on", "me", "my", "mine", "i", "the", "a", "an", "all", "only", "just", "todos",
    "todo", "tasks", "task", "items", "item", "things", "ones", "that", "with", "about",
    "containing", "related", "mentioning", "matching", "to", "of", "in", "by", "for", "assigned",
    "created", "made", "completed", "complete", "done", "finished", "incomplete", "pending",
    "open", "not", "remaining", "unfinished", "outstanding", "urgent", "important", "high",
    "medium", "low", "priority", "please", "have", "has", "been", "yet", "list's", "everything",
];

/// Words dropped from completion criteria.
const COMPLETE_FILLER: &[&str] = &[
    "complete", "completed", "mark", "marked", "as", "done", "finish", "finished", "check",
    "off", "with", "the", "my", "tasks", "task", "todos", "todo", "items", "item", "ones", "one",
    "please", "i", "i'm", "im", "am", "i've", "have", "it", "them", "that", "are", "is",
];

/// Subjects of "X should ..." that never name an assignee.
const PRONOUNS: &[&str] = &[
    "i", "we", "you", "someone", "somebody", "they", "he", "she", "it", "everyone", "this",
    "that", "there",
];

/// Words after "for" or "give" that never name a person.
const NOT_PEOPLE: &[&str] = &[
    "a", "an", "the", "my", "your", "his", "her", "our", "their", "its", "this", "that",
    "these", "those", "some", "any", "every", "each", "me", "him", "them", "us", "it", "all",
];

/// A person reference: a word, a dotted handle, or an email.
const PERSON: &str = r"@?([\w.+-]+(?:@[\w.-]+)?)";

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern}: {e}"))
}

static SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)\s*(?:[,;]|\band then\b|\bthen\b|\band also\b|\balso\b|\band\b)\s*")
});
static LEADING_VERB: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)^(?:please\s+)?(?:add|remind me to|i need to|i have to|todo:?)\s+")
});
static TASK_NOUN: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)^(?:(?:create|make)\s+)?(?:an?\s+)?(?:new\s+)?(?:task|todo|item)s?(?:\s+to|\s*:)\s+")
});
static PRIORITY_CUE: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?i)\b(?:as soon as possible|asap|urgent(?:ly)?|critical|immediately|high[- ]priority|important|low[- ]priority|medium[- ]priority|minor|someday|whenever|eventually|later)\b",
    )
});
static ASSIGN_TO: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)\s*\bassign(?:ed)?(?:\s+(?:it|this|them))?\s+to\s+{PERSON}"
    ))
});
static MENTION: LazyLock<Regex> = LazyLock::new(|| compile(r"(?:^|\s)@([\w.+-]+)"));
static TELL: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)^(?:tell|ask|remind|get)\s+{PERSON}\s+to\s+(.+)$"
    ))
});
static GIVE_TO: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(r"(?i)^give\s+(.+?)\s+to\s+{PERSON}$"))
});
static GIVE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)^give\s+{PERSON}\s+(?:the\s+task\s+(?:of\s+|to\s+)?|a\s+task\s+to\s+)?(.+)$"
    ))
});
static SHOULD: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)^{PERSON}\s+(?:should|needs\s+to|need\s+to|has\s+to|must)\s+(.+)$"
    ))
});
static FOR: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"(?i)\s*\bfor\s+{PERSON}")));

/// What kind of request a command is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Create,
    Filter,
    Complete,
}

fn starts_with_phrase(lower: &str, phrase: &str) -> bool {
    lower
        .strip_prefix(phrase)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(' '))
}

fn words(lower: &str) -> impl Iterator<Item = &str> {
    lower
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-'))
        .filter(|w| !w.is_empty())
}

fn has_cue(lower: &str, cue: &str) -> bool {
    if cue.contains(' ') {
        lower.contains(cue)
    } else {
        words(lower).any(|w| w == cue)
    }
}

/// Classify a command by its explicit phrasing.
pub fn classify(command: &str) -> CommandKind {
    let lower = command.trim().to_lowercase();
    if SHOW_PREFIXES.iter().any(|p| starts_with_phrase(&lower, p)) {
        return CommandKind::Filter;
    }
    if COMPLETE_PREFIXES.iter().any(|p| starts_with_phrase(&lower, p)) {
        return CommandKind::Complete;
    }
    if starts_with_phrase(&lower, "mark")
        && words(&lower).any(|w| matches!(w, "done" | "complete" | "completed" | "finished"))
    {
        return CommandKind::Complete;
    }
    CommandKind::Create
}

/// Priority implied by lexical cues, strongest cue first.
pub fn infer_priority(text: &str) -> Priority {
    let lower = text.to_lowercase();
    if URGENT_CUES.iter().any(|c| has_cue(&lower, c)) {
        Priority::Urgent
    } else if HIGH_CUES.iter().any(|c| has_cue(&lower, c)) {
        Priority::High
    } else if LOW_CUES.iter().any(|c| has_cue(&lower, c)) {
        Priority::Low
    } else {
        Priority::Medium
    }
}

fn filter_criteria(command: &str) -> FilterCriteria {
    let lower = command.to_lowercase();
    let mut criteria = FilterCriteria::default();

    let open = [
        "incomplete",
        "pending",
        "not done",
        "not completed",
        "remaining",
        "unfinished",
        "outstanding",
        "open",
    ];
    if open.iter().any(|c| has_cue(&lower, c)) {
        criteria.completed = Some(false);
    } else if ["completed", "done", "finished"].iter().any(|c| has_cue(&lower, c)) {
        criteria.completed = Some(true);
    }

    if has_cue(&lower, "urgent") {
        criteria.priority = Some(Priority::Urgent);
    } else if has_cue(&lower, "high priority") || has_cue(&lower, "important") {
        criteria.priority = Some(Priority::High);
    } else if has_cue(&lower, "medium priority") {
        criteria.priority = Some(Priority::Medium);
    } else if has_cue(&lower, "low priority") {
        criteria.priority = Some(Priority::Low);
    }

    if ["assigned to me", "for me", "my assigned", "assigned me"]
        .iter()
        .any(|c| has_cue(&lower, c))
    {
        criteria.assigned_to_me = Some(true);
    }
    if ["created by me", "i created", "i made", "made by me", "i added"]
        .iter()
        .any(|c| has_cue(&lower, c))
    {
        criteria.created_by_me = Some(true);
    }

    let keyword: Vec<&str> = words(&lower)
        .filter(|w| !FILTER_STOPWORDS.contains(w))
        .collect();
    if !keyword.is_empty() {
        criteria.keyword = Some(keyword.join(" "));
    }
    criteria
}

fn completion_criteria(command: &str) -> String {
    let lower = command.to_lowercase();
    let kept: Vec<&str> = words(&lower)
        .filter(|w| !COMPLETE_FILLER.contains(w))
        .collect();
    if kept.is_empty() {
        "all".to_string()
    } else {
        kept.join(" ")
    }
}

fn clean_reference(raw: &str) -> &str {
    raw.trim_end_matches(['.', ',', '!', '?', ':'])
}

/// Reference for patterns that are unambiguous: a roster email if one
/// matches, else the reference text itself.
fn any_reference(raw: &str, roster: &[Profile]) -> String {
    let raw = clean_reference(raw);
    resolver::resolve(raw, roster)
        .map(|p| p.email.clone())
        .unwrap_or_else(|| raw.to_string())
}

/// Reference for patterns that are often not about people ("for dinner",
/// "give the dog a bath"): accepted only when it is a whole word of a roster
/// member's name, their email local part, or an email.
fn known_reference(raw: &str, roster: &[Profile]) -> Option<String> {
    let raw = clean_reference(raw);
    if NOT_PEOPLE.contains(&raw.to_lowercase().as_str()) {
        return None;
    }
    if let Some(profile) = resolver::resolve_token(raw, roster) {
        return Some(profile.email.clone());
    }
    raw.contains('@').then(|| raw.to_string())
}

fn remove_match(text: &str, caps: &Captures<'_>) -> String {
    let Some(whole) = caps.get(0) else {
        return text.to_string();
    };
    format!("{} {}", &text[..whole.start()], &text[whole.end()..])
}

/// Pull an assignee out of a segment. Returns the remaining title text and
/// the reference, if any.
fn extract_assignee(segment: &str, roster: &[Profile]) -> (String, Option<String>) {
    if let Some(caps) = ASSIGN_TO.captures(segment) {
        return (remove_match(segment, &caps), Some(any_reference(&caps[1], roster)));
    }
    if let Some(caps) = TELL.captures(segment) {
        return (caps[2].to_string(), Some(any_reference(&caps[1], roster)));
    }
    if let Some(caps) = GIVE_TO.captures(segment) {
        return (
            format!("give {}", &caps[1]),
            Some(any_reference(&caps[2], roster)),
        );
    }
    if let Some(caps) = GIVE.captures(segment)
        && let Some(reference) = known_reference(&caps[1], roster)
    {
        return (caps[2].to_string(), Some(reference));
    }
    if let Some(caps) = SHOULD.captures(segment) {
        let subject = clean_reference(&caps[1]).to_lowercase();
        let assignee =
            (!PRONOUNS.contains(&subject.as_str())).then(|| any_reference(&caps[1], roster));
        return (caps[2].to_string(), assignee);
    }
    if let Some(caps) = MENTION.captures(segment) {
        return (remove_match(segment, &caps), Some(any_reference(&caps[1], roster)));
    }
    for caps in FOR.captures_iter(segment) {
        if let Some(reference) = known_reference(&caps[1], roster) {
            return (remove_match(segment, &caps), Some(reference));
        }
    }
    (segment.to_string(), None)
}

fn tidy_title(raw: &str) -> String {
    let without_cues = PRIORITY_CUE.replace_all(raw, " ");
    let collapsed = without_cues.split_whitespace().collect::<Vec<_>>().join(" ");
    let stripped = TASK_NOUN.replace(&collapsed, "");
    let stripped = LEADING_VERB.replace(&stripped, "");
    let trimmed = stripped.trim().trim_end_matches(|c: char| {
        c.is_whitespace()
            || matches!(
                c,
                '.' | '!' | '?' | ',' | ':' | ';' | '-' | '\u{2013}' | '\u{2014}'
            )
    });
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Split a capture command into drafts, one per actionable phrase.
pub fn create_drafts(command: &str, roster: &[Profile]) -> Vec<TodoDraft> {
    let command = command.trim();
    let body = LEADING_VERB.replace(command, "");
    let mut drafts: Vec<TodoDraft> = Vec::new();

    for segment in SPLIT.split(&body) {
        let segment = LEADING_VERB.replace(segment.trim(), "");
        if segment.is_empty() {
            continue;
        }
        let priority = infer_priority(&segment);
        let (rest, assignee) = extract_assignee(&segment, roster);
        let title = tidy_title(&rest);

        if title.is_empty() {
            // "..., assign to john" and "..., asap" refer back to the
            // previous phrase.
            if let Some(previous) = drafts.last_mut() {
                if let Some(assignee) = assignee
                    && previous.assigned_user_email.is_none()
                {
                    previous.assigned_user_email = Some(assignee);
                }
                if priority != Priority::Medium {
                    previous.priority = Some(match previous.priority {
                        Some(Priority::Medium) | None => priority,
                        Some(earlier) => earlier.max(priority),
                    });
                }
            }
            continue;
        }
        drafts.push(TodoDraft {
            title,
            priority: Some(priority),
            assigned_user_email: assignee,
        });
    }

    if drafts.is_empty() {
        drafts.push(TodoDraft {
            title: command.to_string(),
            priority: Some(infer_priority(command)),
            assigned_user_email: None,
        });
    }
    drafts
}

/// Deterministic intent for `command`.
pub fn interpret_command(command: &str, roster: &[Profile]) -> Intent {
    match classify(command) {
        CommandKind::Filter => Intent::FilterTodos {
            criteria: filter_criteria(command),
        },
        CommandKind::Complete => Intent::CompleteTodos {
            criteria: completion_criteria(command),
        },
        CommandKind::Create => Intent::CreateTodos {
            todos: create_drafts(command, roster),
        },
    }
}

/// Offline oracle backed by [`interpret_command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicOracle;

impl HeuristicOracle {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PluginAdapter for HeuristicOracle {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Oracle
    }

    async fn health_check(&self) -> Result<HealthStatus, TaskwireError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), TaskwireError> {
        Ok(())
    }
}

#[async_trait]
impl OracleAdapter for HeuristicOracle {
    async fn interpret(&self, request: OracleRequest) -> Result<OracleReply, TaskwireError> {
        let intent = interpret_command(&request.command, &request.roster);
        debug!(function = intent.function_name(), "heuristic interpretation");
        Ok(OracleReply::Call {
            name: intent.function_name().to_string(),
            arguments: intent.arguments(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn roster() -> Vec<Profile> {
        let p = |id: &str, email: &str, name: &str| Profile {
            id: id.into(),
            email: email.into(),
            name: Some(name.into()),
            full_name: None,
            avatar_url: None,
        };
        vec![
            p("u1", "john@company.com", "John"),
            p("u2", "mary@company.com", "Mary"),
            p("u3", "bob@company.com", "Bob"),
        ]
    }

    fn drafts(command: &str, users: &[Profile]) -> Vec<TodoDraft> {
        match interpret_command(command, users) {
            Intent::CreateTodos { todos } => todos,
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[test]
    fn urgent_task_is_captured_with_clean_title() {
        let todos = drafts("Add urgent task to clean garage", &[]);
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].title, "Clean garage");
        assert_eq!(todos[0].priority, Some(Priority::Urgent));
        assert_eq!(todos[0].assigned_user_email, None);
    }

    #[test]
    fn two_people_two_tasks() {
        let todos = drafts(
            "John should clean the kitchen and Mary should take out trash",
            &roster(),
        );
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0].title, "Clean the kitchen");
        assert_eq!(todos[0].assigned_user_email.as_deref(), Some("john@company.com"));
        assert_eq!(todos[1].title, "Take out trash");
        assert_eq!(todos[1].assigned_user_email.as_deref(), Some("mary@company.com"));
    }

    #[test]
    fn unknown_people_pass_through_as_text() {
        let todos = drafts(
            "John should clean the kitchen and Mary should take out trash",
            &[],
        );
        assert_eq!(todos[0].assigned_user_email.as_deref(), Some("John"));
        assert_eq!(todos[1].assigned_user_email.as_deref(), Some("Mary"));
    }

    #[test]
    fn assignment_phrases() {
        let users = roster();
        let todos = drafts("tell Mary to water the plants", &users);
        assert_eq!(todos[0].title, "Water the plants");
        assert_eq!(todos[0].assigned_user_email.as_deref(), Some("mary@company.com"));

        let todos = drafts("Review budget, assign to bob", &users);
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].title, "Review budget");
        assert_eq!(todos[0].assigned_user_email.as_deref(), Some("bob@company.com"));

        let todos = drafts("give the report to john", &users);
        assert_eq!(todos[0].title, "Give the report");
        assert_eq!(todos[0].assigned_user_email.as_deref(), Some("john@company.com"));

        let todos = drafts("buy flowers @mary", &users);
        assert_eq!(todos[0].title, "Buy flowers");
        assert_eq!(todos[0].assigned_user_email.as_deref(), Some("mary@company.com"));
    }

    #[test]
    fn for_only_assigns_known_people() {
        let users = roster();
        let todos = drafts("buy groceries for bob", &users);
        assert_eq!(todos[0].title, "Buy groceries");
        assert_eq!(todos[0].assigned_user_email.as_deref(), Some("bob@company.com"));

        let todos = drafts("buy food for dinner", &users);
        assert_eq!(todos[0].title, "Buy food for dinner");
        assert_eq!(todos[0].assigned_user_email, None);
    }

    #[test]
    fn trailing_priority_phrase_applies_to_previous_task() {
        let todos = drafts("Call the bank, asap", &[]);
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].title, "Call the bank");
        assert_eq!(todos[0].priority, Some(Priority::Urgent));

        let todos = drafts("Pay rent, urgent", &[]);
        assert_eq!(todos[0].priority, Some(Priority::Urgent));

        let todos = drafts("Tidy desk, later", &[]);
        assert_eq!(todos[0].priority, Some(Priority::Low));

        let todos = drafts("File taxes, important, later", &[]);
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].title, "File taxes");
        assert_eq!(todos[0].priority, Some(Priority::High));
    }

    #[test]
    fn dangling_dash_is_trimmed_from_titles() {
        let todos = drafts("Fix the server - urgent", &[]);
        assert_eq!(todos[0].title, "Fix the server");
        assert_eq!(todos[0].priority, Some(Priority::Urgent));
    }

    #[test]
    fn articles_never_match_names_that_contain_them() {
        let p = |id: &str, email: &str, name: &str| Profile {
            id: id.into(),
            email: email.into(),
            name: Some(name.into()),
            full_name: None,
            avatar_url: None,
        };
        let users = vec![
            p("u1", "matthew@company.com", "Matthew"),
            p("u2", "dana@company.com", "Dana"),
        ];

        let todos = drafts("buy balloons for the party", &users);
        assert_eq!(todos[0].title, "Buy balloons for the party");
        assert_eq!(todos[0].assigned_user_email, None);

        let todos = drafts("give the dog a bath", &users);
        assert_eq!(todos[0].title, "Give the dog a bath");
        assert_eq!(todos[0].assigned_user_email, None);

        let todos = drafts("get a gift for an old friend", &users);
        assert_eq!(todos[0].assigned_user_email, None);

        let todos = drafts("buy a gift for dana", &users);
        assert_eq!(todos[0].title, "Buy a gift");
        assert_eq!(todos[0].assigned_user_email.as_deref(), Some("dana@company.com"));

        let todos = drafts("give matthew the quarterly report", &users);
        assert_eq!(todos[0].title, "The quarterly report");
        assert_eq!(todos[0].assigned_user_email.as_deref(), Some("matthew@company.com"));
    }

    #[test]
    fn pronoun_subjects_are_not_assignees() {
        let todos = drafts("we should buy milk", &roster());
        assert_eq!(todos[0].title, "Buy milk");
        assert_eq!(todos[0].assigned_user_email, None);
    }

    #[test]
    fn priority_cues() {
        assert_eq!(infer_priority("call the bank asap"), Priority::Urgent);
        assert_eq!(infer_priority("important: file taxes"), Priority::High);
        assert_eq!(infer_priority("tidy desk later"), Priority::Low);
        assert_eq!(infer_priority("water plants"), Priority::Medium);
        assert_eq!(infer_priority("urgent but do it later"), Priority::Urgent);
        let todos = drafts("tidy desk later", &[]);
        assert_eq!(todos[0].title, "Tidy desk");
    }

    #[test]
    fn show_requests_become_filters() {
        let intent = interpret_command("Show completed tasks only", &[]);
        assert_eq!(
            intent,
            Intent::FilterTodos {
                criteria: FilterCriteria {
                    completed: Some(true),
                    ..Default::default()
                }
            }
        );

        let Intent::FilterTodos { criteria } = interpret_command("list my kitchen todos", &[])
        else {
            panic!("expected filter");
        };
        assert_eq!(criteria.keyword.as_deref(), Some("kitchen"));

        let Intent::FilterTodos { criteria } =
            interpret_command("show urgent tasks assigned to me", &[])
        else {
            panic!("expected filter");
        };
        assert_eq!(criteria.priority, Some(Priority::Urgent));
        assert_eq!(criteria.assigned_to_me, Some(true));
        assert_eq!(criteria.keyword, None);

        let Intent::FilterTodos { criteria } = interpret_command("show pending tasks", &[]) else {
            panic!("expected filter");
        };
        assert_eq!(criteria.completed, Some(false));
    }

    #[test]
    fn completion_requests() {
        assert_eq!(
            interpret_command("Mark all kitchen tasks as done", &[]),
            Intent::CompleteTodos {
                criteria: "all kitchen".into()
            }
        );
        assert_eq!(
            interpret_command("complete the urgent ones", &[]),
            Intent::CompleteTodos {
                criteria: "urgent".into()
            }
        );
        assert_eq!(
            interpret_command("finish", &[]),
            Intent::CompleteTodos {
                criteria: "all".into()
            }
        );
    }

    #[test]
    fn ambiguous_input_defaults_to_create() {
        assert_eq!(classify("completed the report yesterday?"), CommandKind::Create);
        assert_eq!(classify("showcase prep"), CommandKind::Create);
        assert_eq!(classify("mark the calendar for friday"), CommandKind::Create);
    }

    #[tokio::test]
    async fn oracle_answers_with_a_call() {
        let oracle = HeuristicOracle::new();
        let reply = oracle
            .interpret(OracleRequest {
                command: "show completed".into(),
                context: String::new(),
                roster: Vec::new(),
                tools: crate::schema::tool_specs(),
                require_tool: true,
            })
            .await
            .unwrap();
        let OracleReply::Call { name, arguments } = reply else {
            panic!("expected call");
        };
        assert_eq!(name, "filter_todos");
        assert_eq!(arguments["criteria"]["completed"], true);
    }

    const SEPARATORS: &[&str] = &["and", "then", "also"];

    proptest! {
        #[test]
        fn non_display_commands_always_create(command in "[a-z]{1,8}( [a-z]{1,8}){0,5}") {
            prop_assume!(classify(&command) == CommandKind::Create);
            match interpret_command(&command, &roster()) {
                Intent::CreateTodos { todos } => {
                    prop_assert!(!todos.is_empty());
                    prop_assert!(todos.iter().all(|t| !t.title.trim().is_empty()));
                }
                other => prop_assert!(false, "expected create, got {:?}", other),
            }
        }

        #[test]
        fn urgency_is_never_low(words in proptest::collection::vec("[b-z]{3,8}", 1..5), asap in any::<bool>()) {
            prop_assume!(words.iter().all(|w| !SEPARATORS.contains(&w.as_str())));
            let cue = if asap { "asap" } else { "urgent" };
            let command = format!("{} {cue} later", words.join(" "));
            prop_assume!(classify(&command) == CommandKind::Create);
            for draft in drafts(&command, &[]) {
                prop_assert!(draft.priority >= Some(Priority::High));
            }
        }
    }
}
