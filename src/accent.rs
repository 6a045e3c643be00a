//! German accent text transform.
//!
//! Three passes run in a fixed order: character substitution ("th" -> "z",
//! "w" -> "v"), recapitalization of a leading 'z'/'v', then whole-word
//! vocabulary replacement from a [`ReplacementTable`].

use log::debug;
use regex::Regex;
use std::sync::LazyLock;

/// Built-in vocabulary, in application order.
pub const DEFAULT_REPLACEMENTS: &[(&str, &str)] = &[
    ("and", "und"),
    ("yes", "ja"),
    ("no", "nein"),
    ("is", "ist"),
    ("please", "bitte"),
    ("thank you", "danke"),
    ("thanks", "danke"),
    ("hello", "hallo"),
    ("goodbye", "auf wiedersehen"),
    ("bye", "tschüss"),
    ("friend", "freund"),
    ("beer", "bier"),
    ("cheese", "käse"),
    ("doctor", "arzt"),
    ("food", "essen"),
    ("house", "haus"),
    ("school", "schule"),
    ("security", "polizei"),
    ("security officer", "polizeibeamter"),
    ("scientist", "wissenschaftler"),
    ("cargo", "fracht"),
    ("engineering", "technik"),
    ("chaplain", "kaplan"),
    ("captain", "kapitän"),
    ("passenger", "passagier"),
    ("shit", "scheiße"),
    ("fuck", "verdammt"),
    ("damn", "verdammt"),
    ("ass", "arsch"),
];

// Group 1 marks the standalone word "that", which keeps its "th".
static TH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bth(at\b)?").unwrap());

// Same notion of "word character" as the `\b` used by `TH`.
static WORD_CHAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\w$").unwrap());

static BUILTIN: LazyLock<ReplacementTable> =
    LazyLock::new(|| ReplacementTable::new(DEFAULT_REPLACEMENTS.iter().copied()));

/// Accentuate a message with the built-in table.
pub fn accentuate(message: &str) -> String {
    ReplacementTable::builtin().accentuate(message)
}

#[derive(Debug, Clone)]
struct Replacement {
    from: String,
    to: String,
    pattern: Regex,
}

impl Replacement {
    fn new(from: &str, to: &str) -> Self {
        let from = from.to_lowercase();
        let pattern = Regex::new(&format!("(?i){}", regex::escape(&from)))
            .expect("escaped literal is a valid pattern");
        Self {
            from,
            to: to.to_string(),
            pattern,
        }
    }

    /// Replace every match not flanked by a word character. A match at the
    /// very start of `text` gets a capitalized replacement.
    fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        let mut at = 0;

        while let Some(m) = self.pattern.find_at(text, at) {
            if is_bounded(text, m.start(), m.end()) {
                out.push_str(&text[last..m.start()]);
                if m.start() == 0 {
                    out.push_str(&capitalize(&self.to));
                } else {
                    out.push_str(&self.to);
                }
                last = m.end();
                at = m.end();
            } else {
                // Retry one character later so an overlapping bounded match isn't skipped.
                at = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
            }
            if at >= text.len() {
                break;
            }
        }

        out.push_str(&text[last..]);
        out
    }
}

/// Ordered source phrase -> replacement phrase mapping.
///
/// Entries apply one after another over the progressively rewritten string,
/// so when two keys overlap (e.g. "security" and "security officer") the
/// earlier entry wins.
#[derive(Debug, Clone, Default)]
pub struct ReplacementTable {
    entries: Vec<Replacement>,
}

impl ReplacementTable {
    /// Build a table from `(from, to)` pairs. Keys are lowercased; empty keys are skipped.
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut table = Self::default();
        table.extend(pairs);
        table
    }

    /// The process-wide table built from [`DEFAULT_REPLACEMENTS`].
    pub fn builtin() -> &'static ReplacementTable {
        &BUILTIN
    }

    /// Append entries after the existing ones.
    pub fn extend<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (from, to) in pairs {
            let (from, to) = (from.as_ref(), to.as_ref());
            if from.is_empty() {
                continue;
            }
            self.entries.push(Replacement::new(from, to));
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(from, to)` pairs in application order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|r| (r.from.as_str(), r.to.as_str()))
    }

    /// Run all three passes over `message`.
    ///
    /// Total over every input, empty string included. Not idempotent: call
    /// it once per message.
    pub fn accentuate(&self, message: &str) -> String {
        let mut msg = shift_consonants(message);
        capitalize_leading_shift(&mut msg);
        let msg = self.apply_replacements(&msg);
        debug!("accentuated: {message:?} -> {msg:?}");
        msg
    }

    /// Whole-word vocabulary pass only.
    pub fn apply_replacements(&self, text: &str) -> String {
        let mut result = text.to_string();
        for entry in &self.entries {
            result = entry.apply(&result);
        }
        result
    }
}

/// Word-initial "th" becomes "z" (except in "that"), then every "w" becomes "v".
fn shift_consonants(text: &str) -> String {
    let text = TH.replace_all(text, |caps: &regex::Captures| {
        if caps.get(1).is_some() {
            caps[0].to_string()
        } else {
            "z".to_string()
        }
    });
    text.replace(['w', 'W'], "v")
}

fn capitalize_leading_shift(text: &mut String) {
    if text.starts_with(['z', 'v']) {
        text[..1].make_ascii_uppercase();
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn is_word_char(c: char) -> bool {
    let mut buf = [0; 4];
    WORD_CHAR.is_match(c.encode_utf8(&mut buf))
}

fn is_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}
