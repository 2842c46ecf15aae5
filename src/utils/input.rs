//! Input sanitization for text entered into compose fields.

/// Sanitize text destined for a single-line field.
///
/// - Tabs become 4 spaces
/// - Newlines and carriage returns become single spaces (pastes of
///   multi-line text must not smuggle line breaks into a one-line field)
/// - Other control characters are dropped
pub fn sanitize_line_input(text: &str) -> String {
    let mut sanitized = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\t' => sanitized.push_str("    "),
            '\r' | '\n' => {
                if !sanitized.ends_with(' ') {
                    sanitized.push(' ');
                }
            }
            _ if !c.is_control() => sanitized.push(c),
            _ => {}
        }
    }

    sanitized
}
