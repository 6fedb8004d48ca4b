use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Kind of inline annotation carried next to the spoken text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnnotationKind {
    Emotion,
    Face,
    Action,
}

impl AnnotationKind {
    pub const ALL: [AnnotationKind; 3] = [
        AnnotationKind::Emotion,
        AnnotationKind::Face,
        AnnotationKind::Action,
    ];

    /// Tag name used inside the text, e.g. `emo` for `<emo>happy</emo>`
    pub fn tag(&self) -> &'static str {
        match self {
            AnnotationKind::Emotion => "emo",
            AnnotationKind::Face => "face",
            AnnotationKind::Action => "act",
        }
    }

    /// Key used when the annotation is surfaced to callers
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnotationKind::Emotion => "emotion",
            AnnotationKind::Face => "face",
            AnnotationKind::Action => "action",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            AnnotationKind::Emotion => &EMOTION_PATTERN,
            AnnotationKind::Face => &FACE_PATTERN,
            AnnotationKind::Action => &ACTION_PATTERN,
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AnnotationKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

fn tag_pattern(tag: &str) -> Regex {
    Regex::new(&format!("<{tag}>([a-zA-Z]+)</{tag}>")).expect("annotation tag pattern is valid")
}

static EMOTION_PATTERN: Lazy<Regex> = Lazy::new(|| tag_pattern("emo"));
static FACE_PATTERN: Lazy<Regex> = Lazy::new(|| tag_pattern("face"));
static ACTION_PATTERN: Lazy<Regex> = Lazy::new(|| tag_pattern("act"));

/// Annotations found in a text. Kinds that were not present have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnnotationSet(BTreeMap<AnnotationKind, String>);

impl AnnotationSet {
    pub fn get(&self, kind: AnnotationKind) -> Option<&str> {
        self.0.get(&kind).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnnotationKind, &str)> {
        self.0.iter().map(|(kind, value)| (*kind, value.as_str()))
    }

    fn insert(&mut self, kind: AnnotationKind, value: String) {
        self.0.insert(kind, value);
    }
}

/// Result of stripping annotation tags out of a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub cleaned_text: String,
    pub annotations: AnnotationSet,
}

/// Strips `<emo>`, `<face>` and `<act>` tags from text and records their values.
///
/// Only well-formed tags wrapping one or more ASCII letters are recognised.
/// The first value of each kind is kept, every occurrence of that kind is
/// removed. Anything else, including unterminated tags, is left in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotationExtractor;

impl AnnotationExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str) -> Extraction {
        let mut cleaned_text = text.to_string();
        let mut annotations = AnnotationSet::default();

        for kind in AnnotationKind::ALL {
            let pattern = kind.pattern();
            let Some(captures) = pattern.captures(&cleaned_text) else {
                continue;
            };

            annotations.insert(kind, captures[1].to_string());
            cleaned_text = pattern.replace_all(&cleaned_text, "").into_owned();
        }

        Extraction {
            cleaned_text,
            annotations,
        }
    }
}
