//! Standard URI encoding for links embedded in card text.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters percent-encoded when embedding a URL: everything except
/// alphanumerics, RFC 3986 reserved characters, and unreserved marks.
///
/// This is whole-URI encoding (the structure of the URL is kept intact, so
/// `:`, `/`, `?`, `&`, `=` pass through), not form/component encoding.
/// Non-ASCII input is always encoded as UTF-8 percent escapes.
const URI_ESCAPE_SET: &AsciiSet = &NON_ALPHANUMERIC
    // RFC 3986 gen-delims
    .remove(b':')
    .remove(b'/')
    .remove(b'?')
    .remove(b'#')
    .remove(b'[')
    .remove(b']')
    .remove(b'@')
    // RFC 3986 sub-delims
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    // unreserved marks
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode the unsafe characters of a URL, leaving characters that are
/// already valid in a URI untouched.
#[must_use]
pub fn encode_uri(raw: &str) -> String {
    utf8_percent_encode(raw, URI_ESCAPE_SET).to_string()
}
