/// Formats free text into an identifier fragment
///
/// Uppercases the text, turns whitespace into underscores, drops every
/// character that is not an ASCII letter, digit or underscore, collapses
/// underscore runs and trims underscores from both ends.
///
/// An empty result means the text carried no usable identifier; callers
/// must treat it as missing.
///
/// # Example
///
/// ```
/// use tc_errcode_scraper::format_identifier;
///
/// assert_eq!(format_identifier("Lag error: velocity"), "LAG_ERROR_VELOCITY");
/// assert_eq!(format_identifier("  --  "), "");
/// ```
pub fn format_identifier(text: &str) -> String {
    let cleaned: String = text
        .to_uppercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();

    cleaned
        .split('_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}
