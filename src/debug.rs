//! Helpers for logs and reports.

/// A shorter version of [`std::any::type_name`].
///
/// Every path in the name is cut down to its last segment, generic arguments
/// included.
///
/// ```
/// use classic_search::debug::type_name;
/// assert_eq!(type_name::<Vec<Option<String>>>(), "Vec<Option<String>>");
/// ```
pub fn type_name<T: ?Sized>() -> String {
    shorten(std::any::type_name::<T>())
}

fn shorten(name: &str) -> String {
    let mut short = String::with_capacity(name.len());
    let mut segment_start = 0;
    for (i, ch) in name.char_indices() {
        if matches!(ch, '&' | '<' | '>' | '(' | ')' | '[' | ']' | ',' | ';' | ' ') {
            short.push_str(last_segment(&name[segment_start..i]));
            short.push(ch);
            segment_start = i + ch.len_utf8();
        }
    }
    short.push_str(last_segment(&name[segment_start..]));
    short
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}
