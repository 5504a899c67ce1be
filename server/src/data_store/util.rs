/// Build a pattern for SQL `LIKE`/`ILIKE`, matching all strings which contain the given
/// `search_term` as a substring.
///
/// Wildcard characters in the search term are escaped with a backslash (the default escape
/// character of PostgreSQL), so they only match themselves.
pub fn substring_like_pattern(search_term: &str) -> String {
    let mut result = String::with_capacity(search_term.len() + 2);
    result.push('%');
    for c in search_term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            result.push('\\');
        }
        result.push(c);
    }
    result.push('%');
    result
}
