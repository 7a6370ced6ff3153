//! Escaping helpers for inline transcript markup

/// Escape every markup-significant character, quotes included.
pub fn escape(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

/// Escape `text` and turn its newlines into line breaks.
pub fn text_to_markup(text: &str) -> String {
    escape(&text.replace("\r\n", "\n")).replace('\n', "<br>")
}
