use std::borrow::Cow;

/// Drop line breaks, the way `<input type=text>` sanitizes its value.
///
/// ```
/// use input_core::filter_single_line;
///
/// assert_eq!(filter_single_line("a\r\nb"), "ab");
/// assert_eq!(filter_single_line("plain"), "plain");
/// ```
pub fn filter_single_line(s: &str) -> Cow<'_, str> {
    if !s.contains(['\n', '\r']) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().filter(|c| !matches!(c, '\n' | '\r')).collect())
}

/// CRLF and lone CR become LF, as in `<textarea>` values.
///
/// ```
/// use input_core::normalize_newlines;
///
/// assert_eq!(normalize_newlines("a\r\nb\rc"), "a\nb\nc");
/// ```
pub fn normalize_newlines(s: &str) -> Cow<'_, str> {
    if !s.contains('\r') {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.replace("\r\n", "\n").replace('\r', "\n"))
}
