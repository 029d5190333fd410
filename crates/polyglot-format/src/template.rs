//! `%`-directive templates.
//!
//! Currency formats (`%u%n`), percentage formats (`%n%`), and strftime
//! formats share one scanner. A directive is `%` followed by one character,
//! or by `-` and one character (`%-d`). The template is scanned once from
//! left to right; substituted text is never scanned again.

/// Fills every directive in `template` using `resolve`.
///
/// `resolve` receives the directive without its `%` (e.g. `"u"`, `"-d"`).
/// Directives it does not recognize, and a trailing lone `%`, are copied
/// through verbatim.
///
/// # Examples
///
/// ```
/// use polyglot_format::template::fill;
///
/// let out = fill("%u%n", |d| match d {
///     "u" => Some("$".to_string()),
///     "n" => Some("%n".to_string()),
///     _ => None,
/// });
/// assert_eq!(out, "$%n");
/// assert_eq!(fill("%n%", |_| Some("5".to_string())), "5%");
/// ```
pub fn fill(template: &str, mut resolve: impl FnMut(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        result.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let len = directive_len(after);
        if len == 0 {
            result.push('%');
            rest = after;
            continue;
        }

        let directive = &after[..len];
        match resolve(directive) {
            Some(text) => result.push_str(&text),
            None => {
                result.push('%');
                result.push_str(directive);
            }
        }
        rest = &after[len..];
    }

    result.push_str(rest);
    result
}

/// Byte length of the directive at the start of `s` (0 if none).
fn directive_len(s: &str) -> usize {
    let mut chars = s.char_indices();
    match chars.next() {
        None => 0,
        Some((_, '-')) => chars.next().map_or(1, |(i, c)| i + c.len_utf8()),
        Some((_, c)) => c.len_utf8(),
    }
}
