//! Compose-box key handling

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIntent {
    /// Send the current text
    Submit,
    /// Close the panel
    Close,
    /// Let the key through to the text box
    Insert,
}

/// Enter sends, Shift+Enter breaks the line, Escape closes. Enter while an
/// IME composition is active only confirms the composition.
pub fn classify_key(key: &str, shift: bool, composing: bool) -> KeyIntent {
    match key {
        "Enter" if !shift && !composing => KeyIntent::Submit,
        "Escape" if !composing => KeyIntent::Close,
        _ => KeyIntent::Insert,
    }
}
