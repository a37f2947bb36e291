/// Cuts `raw` at the first comment marker and drops trailing whitespace.
///
/// ```
/// assert_eq!(lenient_ini::strip_comments("value # note", &['#']), "value");
/// assert_eq!(lenient_ini::strip_comments("a;b:c=d  ", &['#']), "a;b:c=d");
/// ```
#[must_use]
pub fn strip_comments<'a>(raw: &'a str, markers: &[char]) -> &'a str {
    raw.find(markers).map_or(raw, |i| &raw[..i]).trim_end()
}
