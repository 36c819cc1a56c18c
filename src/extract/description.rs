//! Description cell normalization
//!
//! Description cells in the NC documentation usually start with a bold
//! lead-in ("<strong>Lag error:</strong> velocity exceeded limit"). The
//! lead-in doubles as the identifier seed when a table has no Symbol column,
//! so it is split off from the body text here.

use crate::{ExtractError, ExtractResult};
use scraper::{ElementRef, Html, Selector};

/// Result of splitting a description cell into lead-in and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDescription {
    /// Plain description text
    pub text: String,

    /// Text of the first bold element, if the cell has one
    pub lead_in: Option<String>,
}

/// Returns the trimmed, non-empty text nodes under `element`, in document order
pub(crate) fn stripped_strings(element: ElementRef<'_>) -> Vec<&str> {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Returns the text under `element` with each text node trimmed and joined
/// without separator
pub(crate) fn text_strip(element: ElementRef<'_>) -> String {
    stripped_strings(element).concat()
}

/// Normalizes the inner markup of a description cell
///
/// The markup is re-parsed as a standalone fragment and the first `strong`
/// (or `b`) element is taken as the lead-in:
/// - if the lead-in is the whole text, it is the description verbatim
/// - otherwise the description is the remaining text with every occurrence
///   of the lead-in removed
///
/// # Errors
///
/// Returns [`ExtractError::MalformedMarkup`] when the fragment holds no text
/// at all (an image or an empty element, for instance).
///
/// # Example
///
/// ```
/// use tc_errcode_scraper::extract::normalize_description;
///
/// let desc = normalize_description("<strong>Lag error:</strong> velocity exceeded limit").unwrap();
/// assert_eq!(desc.text, "velocity exceeded limit");
/// assert_eq!(desc.lead_in.as_deref(), Some("Lag error:"));
/// ```
pub fn normalize_description(markup: &str) -> ExtractResult<NormalizedDescription> {
    let fragment = Html::parse_fragment(markup);
    let root = fragment.root_element();

    let strings = stripped_strings(root);
    if strings.is_empty() {
        return Err(ExtractError::MalformedMarkup(format!(
            "description cell has no text: {:?}",
            markup.trim()
        )));
    }

    let lead_in = Selector::parse("strong, b")
        .ok()
        .and_then(|selector| root.select(&selector).next())
        .map(|bold| stripped_strings(bold).join(" "))
        .filter(|text| !text.is_empty());

    let all_text = strings.join(" ");

    let text = match &lead_in {
        Some(bold) if bold.trim() == all_text.trim() => bold.clone(),
        Some(bold) => strings
            .iter()
            .filter(|s| **s != bold.as_str())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
            .replace(bold.as_str(), "")
            .trim()
            .to_string(),
        None => all_text.trim().to_string(),
    };

    Ok(NormalizedDescription { text, lead_in })
}
