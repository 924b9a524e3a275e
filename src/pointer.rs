//! Reference paths in URI-fragment pointer form (`#/a/b/0`).

/// Split a fragment pointer into its decoded segments.
///
/// `#` is the root and yields an empty path. Segments are percent-decoded
/// first, then `~1` becomes `/` and `~0` becomes `~`.
///
/// Returns `None` when the text is not a fragment pointer.
///
/// ```
/// use refjson::parse_pointer;
///
/// assert_eq!(parse_pointer("#/a~1b/%20c"), Some(vec!["a/b".into(), " c".into()]));
/// assert_eq!(parse_pointer("#"), Some(vec![]));
/// assert_eq!(parse_pointer("/a"), None);
/// ```
#[must_use]
pub fn parse_pointer(pointer: &str) -> Option<Vec<String>> {
    let rest = pointer.strip_prefix('#')?;
    if rest.is_empty() {
        return Some(Vec::new());
    }
    rest.strip_prefix('/')?
        .split('/')
        .map(|segment| {
            let decoded = percent_decode(segment)?;
            Some(decoded.replace("~1", "/").replace("~0", "~"))
        })
        .collect()
}

fn percent_decode(segment: &str) -> Option<String> {
    let bytes = segment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = segment.get(i + 1..i + 3)?;
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}
