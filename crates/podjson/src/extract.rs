//! Pulling JSON out of HTML.
//!
//! Some pod pages only expose data as an object literal assigned inside an
//! inline `<script>`, e.g.
//!
//! ```text
//! <script>window.gon={};gon.user={"id":3,"guid":"0a1b"};</script>
//! ```

use bstr::ByteSlice;

const SCRIPT_END: &[u8] = b"</script>";

/// Returns the object literal that follows `marker` in `line`.
///
/// The object starts at the first `{` after the marker. If a `</script>` tag
/// follows, the object ends at the last `}` before that tag; otherwise it runs
/// to the last `}` of the line. Nothing is validated, so the result is meant to
/// be handed to [`parse`](crate::parse).
///
/// # Examples
///
/// ```
/// use podjson::extract::embedded_object;
///
/// let html = br#"<script>gon.user={"id":3};</script><p>{x}</p>"#;
/// assert_eq!(embedded_object(html, b"gon.user"), Some(&br#"{"id":3}"#[..]));
/// assert_eq!(embedded_object(html, b"gon.pod"), None);
/// ```
#[must_use]
pub fn embedded_object<'a>(line: &'a [u8], marker: &[u8]) -> Option<&'a [u8]> {
    let after_marker = line.find(marker)? + marker.len();
    let start = after_marker + line[after_marker..].find_byte(b'{')?;
    let rest = &line[start..];
    let bounded = match rest.find(SCRIPT_END) {
        Some(end) => &rest[..end],
        None => rest,
    };
    let close = bounded.rfind_byte(b'}')?;
    Some(&bounded[..=close])
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{find_by_name, parse};

    #[rstest]
    #[case(br#"x = {"a":1};</script>"#, b"x =", Some(&br#"{"a":1}"#[..]))]
    #[case(br#"x = {"a":{"b":2}} trailing"#, b"x", Some(&br#"{"a":{"b":2}}"#[..]))]
    #[case(br#"{"before":0} x = {"a":1}"#, b"x", Some(&br#"{"a":1}"#[..]))]
    #[case(b"x = 42;</script>", b"x", None)]
    #[case(b"x = {unclosed", b"x", None)]
    #[case(br#"no marker {"a":1}"#, b"x =", None)]
    fn finds_the_literal(
        #[case] line: &[u8],
        #[case] marker: &[u8],
        #[case] expected: Option<&[u8]>,
    ) {
        assert_eq!(embedded_object(line, marker), expected);
    }

    #[test]
    fn script_tag_bounds_the_object() {
        let line = br#"<script>window.current_user_attributes = {"guid":"abc","name":"Eve"};</script><div>{}</div>"#;
        let object = embedded_object(line, b"window.current_user_attributes").unwrap();
        let root = parse(object).unwrap();
        assert_eq!(find_by_name(&root, "guid").and_then(|n| n.as_str()), Some("abc"));
        assert_eq!(find_by_name(&root, "name").and_then(|n| n.as_str()), Some("Eve"));
    }
}
