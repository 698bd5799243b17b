//! Declarative page descriptions for the composition engine.
//!
//! Apps build a [`Page`] from typed [`Component`]s and enqueue it; the
//! render worker lays it out with [`compose_page`](crate::render::compose_page).
//! Components never wrap, so long-form text has to be split beforehand with
//! [`wrap_words`] and long lists spread over several pages with [`paginate`].

use alloc::string::String;
use alloc::vec::Vec;

use crate::colors::EpdColor;

/// One line-sized element of a page, laid out top to bottom.
#[derive(Clone, Debug, PartialEq)]
pub enum Component {
    /// Bold left-aligned section heading.
    Header(String),
    /// Label on the left, value right-aligned. An empty value draws nothing.
    Row {
        label: String,
        value: String,
        color: Option<EpdColor>,
    },
    /// Label, bordered bar filled to `percent` (0-100), then `value_text`.
    Progress {
        label: String,
        value_text: String,
        percent: f32,
        color: Option<EpdColor>,
    },
    /// Horizontal rule.
    Separator,
}

impl Component {
    pub fn header(text: impl Into<String>) -> Self { Self::Header(text.into()) }

    pub fn row(
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::Row {
            label: label.into(),
            value: value.into(),
            color: None,
        }
    }

    pub fn colored_row(
        label: impl Into<String>,
        value: impl Into<String>,
        color: EpdColor,
    ) -> Self {
        Self::Row {
            label: label.into(),
            value: value.into(),
            color: Some(color),
        }
    }

    pub fn progress(
        label: impl Into<String>,
        value_text: impl Into<String>,
        percent: f32,
        color: Option<EpdColor>,
    ) -> Self {
        Self::Progress {
            label: label.into(),
            value_text: value_text.into(),
            percent,
            color,
        }
    }
}

/// One full-screen layout request.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Page {
    pub title: Option<String>,
    pub components: Vec<Component>,
}

impl Page {
    /// Untitled, empty page.
    pub const fn new() -> Self {
        Self {
            title: None,
            components: Vec::new(),
        }
    }

    /// Empty page with a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            components: Vec::new(),
        }
    }

    /// Title to draw, if any. Empty titles are treated as absent.
    pub fn display_title(&self) -> Option<&str> { self.title.as_deref().filter(|t| !t.is_empty()) }

    /// Append a component.
    pub fn push(
        &mut self,
        component: Component,
    ) {
        self.components.push(component);
    }

    pub fn with(
        mut self,
        component: Component,
    ) -> Self {
        self.components.push(component);
        self
    }

    pub fn with_header(
        self,
        text: impl Into<String>,
    ) -> Self {
        self.with(Component::header(text))
    }

    pub fn with_row(
        self,
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.with(Component::row(label, value))
    }

    pub fn with_colored_row(
        self,
        label: impl Into<String>,
        value: impl Into<String>,
        color: EpdColor,
    ) -> Self {
        self.with(Component::colored_row(label, value, color))
    }

    pub fn with_progress(
        self,
        label: impl Into<String>,
        value_text: impl Into<String>,
        percent: f32,
        color: Option<EpdColor>,
    ) -> Self {
        self.with(Component::progress(label, value_text, percent, color))
    }

    pub fn with_separator(self) -> Self { self.with(Component::Separator) }

    /// Copy of this page keeping only the first `len` components.
    pub fn prefix(
        &self,
        len: usize,
    ) -> Self {
        Self {
            title: self.title.clone(),
            components: self.components.iter().take(len).cloned().collect(),
        }
    }
}

// =============================================================================
// Long-form Content Helpers
// =============================================================================

/// Split `text` into lines of at most `max_chars` characters.
///
/// Lines break at the last whitespace that keeps the line within the limit;
/// a word longer than the limit is cut mid-word. Lines are trimmed and empty
/// lines are skipped.
pub fn wrap_words(
    text: &str,
    max_chars: usize,
) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let chars: Vec<char> = text.chars().collect();
    let mut lines = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        while pos < chars.len() && chars[pos].is_whitespace() {
            pos += 1;
        }
        if pos >= chars.len() {
            break;
        }

        let end = if chars.len() - pos <= max_chars {
            chars.len()
        } else {
            // The character just past the limit may itself be the break.
            match chars[pos..=pos + max_chars].iter().rposition(|c| c.is_whitespace()) {
                Some(offset) if offset > 0 => pos + offset,
                _ => pos + max_chars,
            }
        };

        let line: String = chars[pos..end].iter().collect();
        let line = line.trim_end();
        if !line.is_empty() {
            lines.push(String::from(line));
        }
        pos = end;
    }
    lines
}

/// Wrapped text as body rows, one line per row.
pub fn wrapped_rows(
    text: &str,
    max_chars: usize,
) -> Vec<Component> {
    wrap_words(text, max_chars)
        .into_iter()
        .map(|line| Component::row(line, String::new()))
        .collect()
}

/// Number of pages needed for `len` components, at least one.
pub const fn page_count(
    len: usize,
    per_page: usize,
) -> usize {
    let per_page = if per_page == 0 { 1 } else { per_page };
    if len == 0 { 1 } else { len.div_ceil(per_page) }
}

/// Spread `components` over untitled pages of `per_page` components each.
pub fn paginate(
    components: Vec<Component>,
    per_page: usize,
) -> Vec<Page> {
    let per_page = per_page.max(1);
    let mut pages = Vec::with_capacity(page_count(components.len(), per_page));
    let mut current = Page::new();
    for component in components {
        if current.components.len() == per_page {
            pages.push(core::mem::take(&mut current));
        }
        current.push(component);
    }
    pages.push(current);
    pages
}
