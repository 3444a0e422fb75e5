// Contact detection over free-form chat text
// Runs direct and keyword-prefixed rule tables and pools their spans

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::debug;

pub mod boundary;
pub mod patterns;
pub mod rules;

pub use boundary::Boundary;
pub use patterns::{contextual_rule_specs, direct_rule_specs, RuleSpec};
pub use rules::{ContactRule, RuleFamily};

use crate::config::ScanConfig;

/// Category of an off-platform contact channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    Email,
    Phone,
    Telegram,
    Instagram,
    WhatsApp,
    Skype,
    Discord,
    LinkedIn,
    Website,
}

impl ContactKind {
    /// Every kind, in rule-table order
    pub const ALL: [ContactKind; 9] = [
        ContactKind::Email,
        ContactKind::Phone,
        ContactKind::Telegram,
        ContactKind::Instagram,
        ContactKind::WhatsApp,
        ContactKind::Skype,
        ContactKind::Discord,
        ContactKind::LinkedIn,
        ContactKind::Website,
    ];

    /// Stable identifier used in config files and JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactKind::Email => "email",
            ContactKind::Phone => "phone",
            ContactKind::Telegram => "telegram",
            ContactKind::Instagram => "instagram",
            ContactKind::WhatsApp => "whatsapp",
            ContactKind::Skype => "skype",
            ContactKind::Discord => "discord",
            ContactKind::LinkedIn => "linkedin",
            ContactKind::Website => "website",
        }
    }

    /// Human-readable label shown next to blurred content
    pub fn label(&self) -> &'static str {
        match self {
            ContactKind::Email => "Email",
            ContactKind::Phone => "Телефон",
            ContactKind::Telegram => "Telegram",
            ContactKind::Instagram => "Instagram",
            ContactKind::WhatsApp => "WhatsApp",
            ContactKind::Skype => "Skype",
            ContactKind::Discord => "Discord",
            ContactKind::LinkedIn => "LinkedIn",
            ContactKind::Website => "Посилання",
        }
    }
}

impl fmt::Display for ContactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        ContactKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| anyhow::anyhow!("Unknown contact kind: {}", s))
    }
}

/// A detected contact span within a source text
///
/// `start` and `end` are half-open UTF-8 byte offsets that always fall on
/// `char` boundaries, so `&text[start..end] == value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMatch {
    pub kind: ContactKind,
    pub value: String,
    pub start: usize,
    pub end: usize,
}

impl ContactMatch {
    /// Byte length of the matched span
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert byte offsets into character (Unicode scalar) offsets
    pub fn char_span(&self, text: &str) -> (usize, usize) {
        let start = text.get(..self.start).map_or(0, |s| s.chars().count());
        let end = text
            .get(..self.end)
            .map_or_else(|| text.chars().count(), |s| s.chars().count());
        (start, end)
    }

    /// Whether two spans share at least one byte
    pub fn overlaps(&self, other: &ContactMatch) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Compiled contact rules, shared read-only across calls
pub struct ContactDetector {
    rules: Vec<ContactRule>,
}

impl ContactDetector {
    /// Compile every built-in rule, direct table first
    pub fn new() -> Result<Self> {
        Self::with_config(&ScanConfig::default())
    }

    /// Compile only the rules for enabled kinds, optionally skipping keyword rules
    pub fn with_config(config: &ScanConfig) -> Result<Self> {
        let mut specs = direct_rule_specs();
        if config.contextual_rules {
            specs.extend(contextual_rule_specs());
        }

        let rules = specs
            .into_iter()
            .filter(|spec| config.is_enabled(spec.kind))
            .map(ContactRule::compile)
            .collect::<Result<Vec<_>>>()?;

        debug!("Compiled {} contact rules", rules.len());
        Ok(Self { rules })
    }

    /// Compiled rules in evaluation order
    pub fn rules(&self) -> &[ContactRule] {
        &self.rules
    }

    /// Find every contact span in `text`
    ///
    /// Output is sorted by `start` and never holds two entries with the same
    /// `(start, end)`. Spans from different rules may still overlap.
    pub fn detect(&self, text: &str) -> Vec<ContactMatch> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut seen = HashSet::new();
        let mut matches: Vec<ContactMatch> = self
            .rules
            .iter()
            .flat_map(|rule| rule.find_all(text))
            .filter(|m| seen.insert((m.start, m.end)))
            .collect();

        // Stable: equal starts keep rule-table order
        matches.sort_by_key(|m| m.start);

        debug!("Detected {} contact spans in {} bytes", matches.len(), text.len());
        matches
    }

    /// Whether `text` holds at least one contact span
    pub fn contains_contacts(&self, text: &str) -> bool {
        !text.is_empty() && self.rules.iter().any(|rule| rule.find_all(text).next().is_some())
    }
}

static DEFAULT_DETECTOR: OnceLock<ContactDetector> = OnceLock::new();

/// Process-wide detector built from the default rule tables
pub fn default_detector() -> &'static ContactDetector {
    DEFAULT_DETECTOR.get_or_init(|| {
        ContactDetector::new().expect("built-in contact patterns are valid regexes")
    })
}

/// Detect contacts with the default rule set
pub fn detect_contacts(text: &str) -> Vec<ContactMatch> {
    default_detector().detect(text)
}

/// Quick check with the default rule set
pub fn contains_contacts(text: &str) -> bool {
    default_detector().contains_contacts(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(matches: &[ContactMatch]) -> Vec<ContactKind> {
        matches.iter().map(|m| m.kind).collect()
    }

    #[test]
    fn test_email_in_ukrainian_sentence() {
        let matches = detect_contacts("пишіть на test@example.com");
        assert_eq!(matches.len(), 1, "unexpected matches: {:?}", matches);
        assert_eq!(matches[0].kind, ContactKind::Email);
        assert_eq!(matches[0].value, "test@example.com");
    }

    #[test]
    fn test_telegram_handle_after_keyword() {
        let text = "мій тг @john_doe123";
        let matches = detect_contacts(text);
        assert!(matches
            .iter()
            .any(|m| m.kind == ContactKind::Telegram && m.value == "@john_doe123"));
    }

    #[test]
    fn test_international_phone() {
        let matches = detect_contacts("дзвони +380501234567");
        assert_eq!(matches.len(), 1, "unexpected matches: {:?}", matches);
        assert_eq!(matches[0].kind, ContactKind::Phone);
        assert_eq!(matches[0].value, "+380501234567");
    }

    #[test]
    fn test_plain_text_has_no_contacts() {
        assert!(detect_contacts("просто текст без контактів").is_empty());
        assert!(!contains_contacts("просто текст без контактів"));
    }

    #[test]
    fn test_website_without_scheme() {
        let matches = detect_contacts("сайт example.com/page");
        assert_eq!(matches.len(), 1, "unexpected matches: {:?}", matches);
        assert_eq!(matches[0].kind, ContactKind::Website);
        assert_eq!(matches[0].value, "example.com/page");
    }

    #[test]
    fn test_empty_input() {
        assert!(detect_contacts("").is_empty());
        assert!(!contains_contacts(""));
    }

    #[test]
    fn test_offsets_slice_back_to_value() {
        let text = "Пошта: anna.k@mail.ua, тел. (050) 123-4567, skype: anna.k";
        for m in detect_contacts(text) {
            assert_eq!(&text[m.start..m.end], m.value);
            assert!(m.start < m.end);
        }
    }

    #[test]
    fn test_char_span_counts_cyrillic_as_single_chars() {
        let text = "тг @john_doe123";
        let m = detect_contacts(text)
            .into_iter()
            .find(|m| m.value == "@john_doe123")
            .unwrap();
        assert_eq!(m.char_span(text), (3, 15));
        assert_eq!(m.start, "тг ".len());
    }

    #[test]
    fn test_duplicate_spans_keep_first_rule() {
        // Telegram and Instagram handle rules both match this exact span
        let matches = detect_contacts("@john_doe123");
        assert_eq!(kinds(&matches), vec![ContactKind::Telegram]);
    }

    #[test]
    fn test_sentence_final_dot_is_not_blurred() {
        let text = "текст @john_doe123.";
        let matches = detect_contacts(text);
        assert_eq!(kinds(&matches), vec![ContactKind::Telegram]);
        assert_eq!(matches[0].value, "@john_doe123");
    }

    #[test]
    fn test_plain_ukrainian_after_keywords() {
        for text in ["напишу в тг завтра", "скинь в інста якщо що", "привіт @привітання", "номер замовлення готовий"] {
            assert!(detect_contacts(text).is_empty(), "false positive in {:?}", text);
        }
    }

    #[test]
    fn test_inverted_span_has_zero_len() {
        let m = ContactMatch { kind: ContactKind::Phone, value: String::new(), start: 9, end: 3 };
        assert_eq!(m.len(), 0);
        assert!(m.is_empty());
    }

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in ContactKind::ALL {
            assert_eq!(kind.as_str().parse::<ContactKind>().unwrap(), kind);
        }
        assert_eq!("WhatsApp".parse::<ContactKind>().unwrap(), ContactKind::WhatsApp);
        assert!("fax".parse::<ContactKind>().is_err());
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&ContactKind::LinkedIn).unwrap();
        assert_eq!(json, "\"linkedin\"");
    }
}
