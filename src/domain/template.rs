//! `{{KEY}}` placeholder templates and their substitution.

use std::collections::{BTreeMap, BTreeSet};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A static text template loaded from the template store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSpec {
    /// Store-relative path, e.g. `cdn/docker-compose.yml`.
    pub source: String,
    pub text: String,
}

impl TemplateSpec {
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self { source: source.into(), text: text.into() }
    }

    /// Placeholder names referenced by this template, sorted.
    pub fn placeholders(&self) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();
        scan(&self.text, |segment| {
            if let Segment::Placeholder(key) = segment {
                keys.insert(key.to_string());
            }
        });
        keys
    }
}

/// Placeholder name to replacement value. Values are inserted verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    values: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Copy of `self` with `overrides` layered on top.
    pub fn layered(&self, overrides: &RenderContext) -> RenderContext {
        let mut values = self.values.clone();
        values.extend(overrides.values.iter().map(|(k, v)| (k.clone(), v.clone())));
        RenderContext { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RenderContext {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self { values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

/// Substitute every `{{KEY}}` found in `context`.
///
/// One left-to-right pass over the template text. Replacement values are
/// appended to the output and never scanned again; unknown keys are kept verbatim.
pub fn render(template: &TemplateSpec, context: &RenderContext) -> String {
    let mut out = String::with_capacity(template.text.len());
    scan(&template.text, |segment| match segment {
        Segment::Text(text) => out.push_str(text),
        Segment::Placeholder(key) => match context.get(key) {
            Some(value) => out.push_str(value),
            None => {
                out.push_str(OPEN);
                out.push_str(key);
                out.push_str(CLOSE);
            }
        },
    });
    out
}

enum Segment<'a> {
    Text(&'a str),
    Placeholder(&'a str),
}

fn scan<'a>(text: &'a str, mut emit: impl FnMut(Segment<'a>)) {
    let mut rest = text;
    while let Some(start) = rest.find(OPEN) {
        let after_open = &rest[start + OPEN.len()..];
        // The key ends at the first non-key character, which must open `}}`.
        let key_len = after_open
            .find(|c: char| !is_key_char(c))
            .filter(|&len| len > 0 && after_open[len..].starts_with(CLOSE));
        match key_len {
            Some(len) => {
                emit(Segment::Text(&rest[..start]));
                emit(Segment::Placeholder(&after_open[..len]));
                rest = &after_open[len + CLOSE.len()..];
            }
            None => {
                // Not a placeholder: keep one brace and resume right after it.
                emit(Segment::Text(&rest[..start + 1]));
                rest = &rest[start + 1..];
            }
        }
    }
    emit(Segment::Text(rest));
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}
