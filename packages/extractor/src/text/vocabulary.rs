//! Tag vocabulary driving text reconstruction.

use std::collections::HashSet;

/// Inline stylization applied to an element's direct text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stylization {
    /// `*text*`
    Emphasis,
    /// `**text**`
    Strong,
    /// `__text__`
    Underline,
}

impl Stylization {
    /// Marker placed on both sides of the text.
    #[must_use]
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Emphasis => "*",
            Self::Strong => "**",
            Self::Underline => "__",
        }
    }

    /// Wrap text in this stylization's markers.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        let marker = self.marker();
        format!("{marker}{text}{marker}")
    }
}

/// Declarative classification of markup tags for text reconstruction.
///
/// A fixed, configurable vocabulary: tags not mentioned anywhere simply
/// contribute their text.
#[derive(Debug, Clone, Default)]
pub struct TagVocabulary {
    /// Tags whose first occurrence per reconstruction is skipped.
    exclude: Vec<String>,

    /// Tags followed by a newline.
    line_break: HashSet<String>,

    /// Tags followed by a blank line (when not also a line-break tag).
    paragraph_break: HashSet<String>,

    /// Tags followed by a `|` cell delimiter.
    pipe: HashSet<String>,

    emphasis: HashSet<String>,
    strong: HashSet<String>,
    underline: HashSet<String>,

    /// Tag that opens a table body.
    table_body: Option<String>,
}

fn to_set(tags: impl IntoIterator<Item = impl Into<String>>) -> HashSet<String> {
    tags.into_iter().map(Into::into).collect()
}

impl TagVocabulary {
    /// Create an empty vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the exclude-once tags.
    #[must_use]
    pub fn with_exclude(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the line-break tags.
    #[must_use]
    pub fn with_line_breaks(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.line_break = to_set(tags);
        self
    }

    /// Set the paragraph-break tags.
    #[must_use]
    pub fn with_paragraph_breaks(
        mut self,
        tags: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.paragraph_break = to_set(tags);
        self
    }

    /// Set the cell-delimiter tags.
    #[must_use]
    pub fn with_pipes(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.pipe = to_set(tags);
        self
    }

    /// Set the emphasis tags.
    #[must_use]
    pub fn with_emphasis(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.emphasis = to_set(tags);
        self
    }

    /// Set the strong tags.
    #[must_use]
    pub fn with_strong(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.strong = to_set(tags);
        self
    }

    /// Set the underline tags.
    #[must_use]
    pub fn with_underline(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.underline = to_set(tags);
        self
    }

    /// Set the table-body tag.
    #[must_use]
    pub fn with_table_body(mut self, tag: impl Into<String>) -> Self {
        self.table_body = Some(tag.into());
        self
    }

    /// Fresh single-use exclusion set for one reconstruction.
    #[must_use]
    pub fn exclude_once(&self) -> ExcludeOnce<'_> {
        ExcludeOnce {
            remaining: self.exclude.iter().map(String::as_str).collect(),
        }
    }

    /// Stylization for a tag. Emphasis wins over strong, strong over underline.
    #[must_use]
    pub fn stylization(&self, tag: &str) -> Option<Stylization> {
        if self.emphasis.contains(tag) {
            Some(Stylization::Emphasis)
        } else if self.strong.contains(tag) {
            Some(Stylization::Strong)
        } else if self.underline.contains(tag) {
            Some(Stylization::Underline)
        } else {
            None
        }
    }

    /// Break emitted after a tag. A line break wins over a paragraph break.
    #[must_use]
    pub fn break_after(&self, tag: &str) -> Option<&'static str> {
        if self.line_break.contains(tag) {
            Some("\n")
        } else if self.paragraph_break.contains(tag) {
            Some("\n\n")
        } else {
            None
        }
    }

    /// Check if a tag closes a table cell.
    #[must_use]
    pub fn is_pipe(&self, tag: &str) -> bool {
        self.pipe.contains(tag)
    }

    /// Check if a tag opens a table body.
    #[must_use]
    pub fn is_table_body(&self, tag: &str) -> bool {
        self.table_body.as_deref() == Some(tag)
    }
}

/// Exclusion set consumed while reconstructing one subtree.
///
/// Each listed tag is skipped the first time it is seen, then included.
#[derive(Debug)]
pub struct ExcludeOnce<'a> {
    remaining: Vec<&'a str>,
}

impl ExcludeOnce<'_> {
    /// Consume `tag` if it is still excluded. Returns `true` when the
    /// element must be skipped.
    pub fn take(&mut self, tag: &str) -> bool {
        match self.remaining.iter().position(|t| *t == tag) {
            Some(index) => {
                self.remaining.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylization_apply() {
        assert_eq!(Stylization::Emphasis.apply("x"), "*x*");
        assert_eq!(Stylization::Strong.apply("x"), "**x**");
        assert_eq!(Stylization::Underline.apply("x"), "__x__");
    }

    #[test]
    fn test_stylization_precedence() {
        let vocab = TagVocabulary::new()
            .with_emphasis(["Both"])
            .with_strong(["Both", "Bold"]);

        assert_eq!(vocab.stylization("Both"), Some(Stylization::Emphasis));
        assert_eq!(vocab.stylization("Bold"), Some(Stylization::Strong));
        assert_eq!(vocab.stylization("Text"), None);
    }

    #[test]
    fn test_line_break_wins_over_paragraph_break() {
        let vocab = TagVocabulary::new()
            .with_line_breaks(["Subsection"])
            .with_paragraph_breaks(["Subsection", "Part"]);

        assert_eq!(vocab.break_after("Subsection"), Some("\n"));
        assert_eq!(vocab.break_after("Part"), Some("\n\n"));
        assert_eq!(vocab.break_after("Text"), None);
    }

    #[test]
    fn test_exclude_once_consumes() {
        let vocab = TagVocabulary::new().with_exclude(["Label", "MarginalNote"]);
        let mut exclude = vocab.exclude_once();

        assert!(exclude.take("Label"));
        assert!(!exclude.take("Label"));
        assert!(!exclude.take("Text"));
        assert!(exclude.take("MarginalNote"));

        // Each reconstruction gets a fresh set
        assert!(vocab.exclude_once().take("Label"));
    }

    #[test]
    fn test_table_body() {
        let vocab = TagVocabulary::new().with_table_body("tbody");
        assert!(vocab.is_table_body("tbody"));
        assert!(!vocab.is_table_body("thead"));
        assert!(!TagVocabulary::new().is_table_body("tbody"));
    }
}
