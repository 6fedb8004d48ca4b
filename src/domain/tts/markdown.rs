use once_cell::sync::Lazy;
use regex::Regex;

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

impl Rule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("markdown rule pattern is valid"),
            replacement,
        }
    }
}

// Applied in order. Annotation tags (`<emo>` etc.) must survive every rule.
static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        // Fenced code markers, keep the code itself
        Rule::new(r"(?m)^\s*```[^\n]*$", ""),
        // Table separator rows
        Rule::new(r"(?m)^\s*\|?\s*:?-{3,}:?\s*(\|\s*:?-{3,}:?\s*)*\|?\s*$", ""),
        Rule::new(r"(?m)^\s{0,3}#{1,6}\s+", ""),
        Rule::new(r"(?m)^\s{0,3}>\s?", ""),
        Rule::new(r"(?m)^\s*[-*+]\s+", ""),
        Rule::new(r"(?m)^\s*\d+\.\s+", ""),
        Rule::new(r"!\[([^\]]*)\]\([^)]*\)", "$1"),
        Rule::new(r"\[([^\]]+)\]\([^)]*\)", "$1"),
        Rule::new(r"https?://[^\s<]+", ""),
        Rule::new(r"\*\*([^*]+)\*\*", "$1"),
        Rule::new(r"__([^_]+)__", "$1"),
        Rule::new(r"\*([^*\s][^*]*)\*", "$1"),
        Rule::new(r"\b_([^_\s][^_]*)_\b", "$1"),
        Rule::new(r"~~([^~]+)~~", "$1"),
        Rule::new(r"`([^`]*)`", "$1"),
        Rule::new(r"\|", " "),
        Rule::new(r"\s+", " "),
    ]
});

/// Turns markdown-flavoured text (as produced by chat models) into plain
/// speakable text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownCleaner;

impl MarkdownCleaner {
    pub fn new() -> Self {
        Self
    }

    pub fn clean(&self, text: &str) -> String {
        let mut cleaned = text.to_string();
        for rule in RULES.iter() {
            cleaned = rule
                .pattern
                .replace_all(&cleaned, rule.replacement)
                .into_owned();
        }
        cleaned.trim().to_string()
    }
}
