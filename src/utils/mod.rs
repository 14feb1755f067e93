use std::borrow::Cow;
use std::time::SystemTime;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode, utf8_percent_encode};
use time::OffsetDateTime;

/// Characters escaped when a title is placed back into a URL path.
/// `/` is kept so nested titles stay readable.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'+')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Decode a title the way a query value is decoded: `+` is a space and
/// `%XX` sequences are unescaped. Titles that do not decode to UTF-8 are
/// returned untouched.
pub fn decode_title(title: &str) -> Cow<'_, str> {
    if !title.contains(['%', '+']) {
        return Cow::Borrowed(title);
    }
    let spaced = title.replace('+', " ");
    match percent_decode(spaced.as_bytes()).decode_utf8() {
        Ok(decoded) => Cow::Owned(decoded.into_owned()),
        Err(_) => Cow::Borrowed(title),
    }
}

/// Percent-decode a raw request path
pub fn decode_path(path: &str) -> String {
    percent_decode(path.as_bytes()).decode_utf8_lossy().into_owned()
}

/// Percent-encode a title for use in an href or `Location` header
pub fn encode_title(title: &str) -> String {
    utf8_percent_encode(title, PATH_SEGMENT).to_string()
}

/// Generate last modified metadata HTML
pub fn last_modified_html(modified: Option<SystemTime>) -> String {
    let Some(mtime) = modified else {
        return String::new();
    };
    let dt = OffsetDateTime::from(mtime);
    match dt.format(&time::format_description::well_known::Rfc3339) {
        Ok(s) => format!("<p class=\"meta\">Last modified: {}</p>", escape_html(&s)),
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html("<a href=\"x\">Tom & Jerry's</a>"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn decodes_query_style_titles() {
        assert_eq!(decode_title("Front+Page"), "Front Page");
        assert_eq!(decode_title("Caf%C3%A9"), "Café");
        assert_eq!(decode_title("50%25"), "50%");
        assert!(matches!(decode_title("Plain"), Cow::Borrowed("Plain")));
    }

    #[test]
    fn undecodable_title_is_kept() {
        assert_eq!(decode_title("bad%FF"), "bad%FF");
    }

    #[test]
    fn encodes_title_for_paths() {
        assert_eq!(encode_title("My Page"), "My%20Page");
        assert_eq!(encode_title("a/b?c"), "a/b%3Fc");
        assert_eq!(encode_title("Café"), "Caf%C3%A9");
        assert_eq!(decode_path("/view/My%20Page"), "/view/My Page");
    }

    #[test]
    fn last_modified_is_rfc3339() {
        let at = UNIX_EPOCH + Duration::from_secs(86_400);
        assert_eq!(
            last_modified_html(Some(at)),
            "<p class=\"meta\">Last modified: 1970-01-02T00:00:00Z</p>"
        );
        assert_eq!(last_modified_html(None), "");
    }
}
