//! Small helpers over `scraper` documents shared by the extractors.

use scraper::{ElementRef, Selector};

/// Parses a selector known at compile time.
///
/// # Panics
///
/// Panics if `css` is not a valid selector; callers only pass literals.
pub(crate) fn compile_static_selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid static selector '{css}': {e}"))
}

/// Returns the first non-blank text node that is a direct child of `element`, trimmed.
///
/// Nested markup (`<br>`, `<span>` overrides) is skipped, so a title paragraph
/// such as `<p>Title<br><span>by Someone</span></p>` yields `Title`.
pub(crate) fn first_direct_text(element: ElementRef<'_>) -> Option<String> {
    element
        .children()
        .filter_map(|child| child.value().as_text())
        .map(|text| text.trim())
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

/// Concatenates all descendant text, collapsing runs of whitespace.
pub(crate) fn collapsed_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
