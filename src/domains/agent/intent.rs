//! Intent classification and parameter extraction.
//!
//! This is a deterministic keyword heuristic, not language understanding.
//! Rules are checked in order and the first match wins, so a query such as
//! "show me how to add items" is a listing request even though it also
//! mentions "add".
//!
//! Classification tests whether the lowercased query *contains* a trigger
//! as a substring ("together" contains "get"). Extraction, in contrast,
//! looks for a trigger as a whole whitespace-separated word.

/// Classified purpose of a free-text query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    ListItems,
    CreateItem,
    Unknown,
}

impl Intent {
    /// Action label reported in query results.
    pub fn action(self) -> &'static str {
        match self {
            Self::ListItems => "list_items",
            Self::CreateItem => "create_item",
            Self::Unknown => "show_capabilities",
        }
    }
}

/// Words that mark a listing request.
pub const LIST_TRIGGERS: &[&str] = &["list", "show", "get"];

/// Words that mark a creation request.
pub const CREATE_TRIGGERS: &[&str] = &["create", "add", "new"];

/// Item name used when nothing usable follows a creation trigger.
pub const DEFAULT_ITEM_NAME: &str = "AI Generated Item";

/// One classification rule: any trigger present selects `intent`.
#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub intent: Intent,
    pub triggers: &'static [&'static str],
}

impl IntentRule {
    fn matches(&self, lowered: &str) -> bool {
        self.triggers.iter().any(|t| lowered.contains(t))
    }
}

/// Built-in rules in priority order.
pub const DEFAULT_RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::ListItems,
        triggers: LIST_TRIGGERS,
    },
    IntentRule {
        intent: Intent::CreateItem,
        triggers: CREATE_TRIGGERS,
    },
];

/// Ordered rule list evaluated first-match-wins.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    rules: Vec<IntentRule>,
}

impl IntentClassifier {
    pub fn new(rules: Vec<IntentRule>) -> Self {
        Self { rules }
    }

    /// Classify a query. Falls through to [`Intent::Unknown`].
    pub fn classify(&self, query: &str) -> Intent {
        let lowered = query.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map_or(Intent::Unknown, |rule| rule.intent)
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_RULES.to_vec())
    }
}

/// Words following the first trigger word, joined by single spaces.
///
/// Words are split on whitespace and compared to `triggers`
/// case-insensitively. Returns `None` when no word is a trigger; the tail
/// may be empty when the trigger is the last word.
pub fn tail_after_trigger(query: &str, triggers: &[&str]) -> Option<String> {
    let words: Vec<&str> = query.split_whitespace().collect();
    let position = words
        .iter()
        .position(|word| triggers.contains(&word.to_lowercase().as_str()))?;

    Some(words[position + 1..].join(" "))
}

/// Remove at most one leading and at most one trailing quote (`"` or `'`).
///
/// The two ends are handled independently, so unbalanced or mismatched
/// quotes are stripped too. Quotes elsewhere in the string are kept.
pub fn strip_outer_quotes(text: &str) -> &str {
    const QUOTES: [char; 2] = ['"', '\''];

    let text = text.strip_prefix(QUOTES).unwrap_or(text);
    text.strip_suffix(QUOTES).unwrap_or(text)
}

/// Best-effort item name from a creation query.
///
/// Takes everything after the first creation trigger word, then strips
/// one outer quote from each end. Falls back to [`DEFAULT_ITEM_NAME`]
/// when no trigger word is found or the result is empty. This is an
/// approximation; "create a new item called X" yields
/// "a new item called X", not "X".
pub fn extract_item_name(query: &str) -> String {
    tail_after_trigger(query, CREATE_TRIGGERS)
        .map(|tail| strip_outer_quotes(&tail).to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_ITEM_NAME.to_string())
}
