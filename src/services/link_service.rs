use std::borrow::Cow;

use regex::bytes::{Captures, Regex};

/// Rewrites `[!Page Name]` markers into links to `/view/Page-Name`.
///
/// The match is greedy and never crosses a newline, so two markers on one
/// line collapse into a single link spanning from the first `[!` to the last
/// `]`.
pub struct LinkRewriter {
    pattern: Regex,
}

impl LinkRewriter {
    pub fn new() -> Self {
        // `(?-u:.)` matches any single byte except `\n`, so bodies that are
        // not valid UTF-8 are still scanned.
        let pattern = Regex::new(r"\[!(?-u:.)+\]").expect("inter-page link pattern is valid");
        Self { pattern }
    }

    /// Replace every inter-page marker in `body`. Text outside markers is
    /// returned byte-for-byte.
    pub fn rewrite<'a>(&self, body: &'a [u8]) -> Cow<'a, [u8]> {
        self.pattern.replace_all(body, |caps: &Captures| {
            let whole = &caps[0];
            let text = &whole[2..whole.len() - 1];
            anchor(text)
        })
    }
}

impl Default for LinkRewriter {
    fn default() -> Self {
        Self::new()
    }
}

/// The link target for `text`: spaces become hyphens, nothing else changes
pub fn slug(text: &[u8]) -> Vec<u8> {
    text.iter().map(|&b| if b == b' ' { b'-' } else { b }).collect()
}

fn anchor(text: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2 + 24);
    out.extend_from_slice(b"<a href=\"/view/");
    out.extend_from_slice(&slug(text));
    out.extend_from_slice(b"\">");
    out.extend_from_slice(text);
    out.extend_from_slice(b"</a>");
    out
}
