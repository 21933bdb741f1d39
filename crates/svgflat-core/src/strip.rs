/// Remove every literal occurrence of each pattern from `svg`.
///
/// Plain, case-sensitive substring replacement. Whitespace around a removed
/// attribute is left as-is; empty patterns are ignored.
pub fn strip_patterns<S: AsRef<str>>(svg: &str, patterns: &[S]) -> String {
    let mut out = svg.to_string();
    for pattern in patterns.iter().map(AsRef::as_ref) {
        if pattern.is_empty() {
            continue;
        }
        out = out.replace(pattern, "");
    }
    out
}
