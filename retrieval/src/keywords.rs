//! Abbreviation table used to enrich search queries.

use log::debug;

/// Maps a short trigger (usually an abbreviation) onto descriptive terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRule {
    /// Lower-case substring looked for in the question
    pub trigger: &'static str,

    /// Terms appended to the search query when the trigger matches
    pub expansion: &'static str,
}

/// Abbreviations students use for the academic regulations in the corpus
pub const DEFAULT_KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        trigger: "çap",
        expansion: "çift anadal programı",
    },
    KeywordRule {
        trigger: "yandal",
        expansion: "yandal programı sertifika",
    },
    KeywordRule {
        trigger: "dgs",
        expansion: "dikey geçiş sınavı kontenjan",
    },
];

/// Applies a static [`KeywordRule`] table to questions and documents
#[derive(Debug, Clone, Copy)]
pub struct KeywordAugmenter {
    rules: &'static [KeywordRule],
}

impl Default for KeywordAugmenter {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORD_RULES)
    }
}

impl KeywordAugmenter {
    pub fn new(rules: &'static [KeywordRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [KeywordRule] {
        self.rules
    }

    /// Rules whose trigger occurs in the lower-cased question, in table order
    pub fn matched_rules(&self, question: &str) -> Vec<&'static KeywordRule> {
        let question_lower = question.to_lowercase();
        self.rules
            .iter()
            .filter(|rule| question_lower.contains(rule.trigger))
            .collect()
    }

    /// Append the expansion of every matched rule to `search_query`
    pub fn augment(&self, question: &str, search_query: &str) -> String {
        let mut augmented = search_query.to_string();
        for rule in self.matched_rules(question) {
            debug!("Keyword '{}' matched, adding '{}'", rule.trigger, rule.expansion);
            augmented.push(' ');
            augmented.push_str(rule.expansion);
        }
        augmented
    }

    /// True iff at least one trigger occurs in the question
    pub fn matches_any(&self, question: &str) -> bool {
        let question_lower = question.to_lowercase();
        self.rules
            .iter()
            .any(|rule| question_lower.contains(rule.trigger))
    }

    /// True iff the text mentions any expansion term of the table
    pub fn mentions_expansion(&self, text: &str) -> bool {
        let text_lower = text.to_lowercase();
        self.rules
            .iter()
            .any(|rule| text_lower.contains(&rule.expansion.to_lowercase()))
    }
}
