use anyhow::{Context, Result};
use regex_automata::meta::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::boundary::Boundary;
use super::patterns::RuleSpec;
use super::{ContactKind, ContactMatch};

/// Which rule table a rule came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleFamily {
    /// Matches an identifier anywhere in the text
    Direct,
    /// Needs a keyword immediately before the identifier
    Contextual,
}

/// A compiled contact rule
///
/// Holds no search state: every call to [`ContactRule::find_all`] starts a
/// fresh scan from the beginning of the text.
#[derive(Debug)]
pub struct ContactRule {
    name: &'static str,
    kind: ContactKind,
    family: RuleFamily,
    boundary: Boundary,
    regex: Regex,
}

impl ContactRule {
    pub fn compile(spec: RuleSpec) -> Result<Self> {
        let regex = Regex::new(&spec.pattern)
            .with_context(|| format!("Failed to compile contact rule '{}'", spec.name))?;

        debug!("Compiled rule {} ({:?}, {})", spec.name, spec.family, spec.kind);

        Ok(Self {
            name: spec.name,
            kind: spec.kind,
            family: spec.family,
            boundary: spec.boundary,
            regex,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> ContactKind {
        self.kind
    }

    pub fn family(&self) -> RuleFamily {
        self.family
    }

    /// All non-overlapping matches of this rule that pass its boundary guard
    ///
    /// After each raw match, scanning resumes at that match's end, whether
    /// or not the guard accepted it.
    pub fn find_all<'a>(&'a self, text: &'a str) -> impl Iterator<Item = ContactMatch> + 'a {
        self.regex
            .find_iter(text)
            .filter(move |m| m.start() < m.end() && self.boundary.accepts(text, m.start(), m.end()))
            .map(move |m| ContactMatch {
                kind: self.kind,
                value: text[m.start()..m.end()].to_string(),
                start: m.start(),
                end: m.end(),
            })
    }
}
