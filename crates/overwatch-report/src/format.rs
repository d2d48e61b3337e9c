//! Text formatting rules shared by the report and the history overview

/// Character appended to truncated text
pub const ELLIPSIS: char = '…';

/// Render a duration: whole milliseconds below one second, otherwise
/// seconds with one decimal place.
///
/// ```
/// use overwatch_report::format::format_duration;
///
/// assert_eq!(format_duration(350), "350ms");
/// assert_eq!(format_duration(1000), "1.0s");
/// assert_eq!(format_duration(12_500), "12.5s");
/// assert_eq!(format_duration(1250), "1.3s");
/// ```
pub fn format_duration(ms: u64) -> String {
    if ms >= 1000 {
        // Tenths of a second, half rounded up.
        let tenths = ms / 100 + u64::from(ms % 100 >= 50);
        format!("{}.{}s", tenths / 10, tenths % 10)
    } else {
        format!("{}ms", ms)
    }
}

/// Group digits in threes with commas, e.g. `10500` -> `10,500`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Keep the first `max_chars` characters and append an ellipsis if
/// anything was cut. Text of `max_chars` characters or fewer is untouched.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            let mut out = text[..cut].to_string();
            out.push(ELLIPSIS);
            out
        }
        None => text.to_string(),
    }
}

/// Make text safe for a single Markdown table cell: escape pipes, fold
/// line breaks into single spaces, then truncate to `max_chars`.
pub fn table_cell(text: &str, max_chars: usize) -> String {
    let escaped = text
        .replace('|', "\\|")
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ");
    truncate_chars(&escaped, max_chars)
}

/// Fence for a literal block that cannot be closed early by the content.
pub fn code_fence(content: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for ch in content.chars() {
        if ch == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat(longest.max(2) + 1)
}

/// Inline code span, widened when the text itself contains backticks.
pub fn code_span(text: &str) -> String {
    if text.contains('`') {
        format!("`` {} ``", text)
    } else {
        format!("`{}`", text)
    }
}
