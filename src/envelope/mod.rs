//! Multipart envelope codec.
//!
//! The envelope is the wire-level entity of the protocol: an ordered
//! sequence of parts, each a headers-plus-body pair, framed by a boundary
//! token unique to the response. Part order is semantically meaningful and
//! preserved end to end; the client uses it as the secondary sort key when
//! scheduling. Envelopes exist only for the duration of one exchange.

pub mod boundary;
pub mod headers;

use bytes::{BufMut, Bytes, BytesMut};

pub use boundary::BoundaryToken;
pub use headers::Headers;

use crate::error::ClientError;

/// Outer media type of every fragmented response. The `byteranges` subtype
/// is a compatibility choice fixed by the protocol, not a content-range
/// usage.
pub const MULTIPART_CONTENT_TYPE: &str = "multipart/byteranges";

const CRLF: &[u8] = b"\r\n";
const HEAD_SEPARATOR: &[u8] = b"\r\n\r\n";

/// One part of the envelope: headers plus an opaque body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Part {
    /// Per-part headers, emitted in insertion order.
    pub headers: Headers,
    /// Body bytes, empty for bodiless insertion policies.
    pub body: Bytes,
}

impl Part {
    /// Construct a part from headers and body bytes.
    #[must_use]
    pub fn new(headers: Headers, body: Bytes) -> Self { Self { headers, body } }
}

/// Ordered sequence of parts framed by a shared boundary token.
#[derive(Debug)]
pub struct Envelope {
    boundary: BoundaryToken,
    parts: Vec<Part>,
}

impl Envelope {
    /// Empty envelope with a freshly generated boundary token.
    #[must_use]
    pub fn new() -> Self { Self::with_boundary(BoundaryToken::generate()) }

    /// Empty envelope framed by an explicit token.
    #[must_use]
    pub fn with_boundary(boundary: BoundaryToken) -> Self {
        Self {
            boundary,
            parts: Vec::new(),
        }
    }

    /// Append a part, preserving envelope order.
    pub fn push(&mut self, part: Part) { self.parts.push(part); }

    /// The boundary token framing this envelope.
    #[must_use]
    pub const fn boundary(&self) -> &BoundaryToken { &self.boundary }

    /// The parts in envelope order.
    #[must_use]
    pub fn parts(&self) -> &[Part] { self.parts.as_slice() }

    /// Outer response content type, with the boundary parameter quoted.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("{MULTIPART_CONTENT_TYPE}; boundary=\"{}\"", self.boundary)
    }

    /// Serialize the envelope into its wire framing.
    ///
    /// Each part is written as `--{boundary}`, CRLF, one `Name: value` line
    /// per header, a blank line, the body, and a terminating CRLF; a final
    /// `--{boundary}--` closes the stream.
    #[must_use]
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::new();
        for part in &self.parts {
            buf.put_slice(b"--");
            buf.put_slice(self.boundary.as_str().as_bytes());
            buf.put_slice(CRLF);
            for (name, value) in part.headers.iter() {
                buf.put_slice(name.as_bytes());
                buf.put_slice(b": ");
                buf.put_slice(value.as_bytes());
                buf.put_slice(CRLF);
            }
            buf.put_slice(CRLF);
            buf.put_slice(&part.body);
            buf.put_slice(CRLF);
        }
        buf.put_slice(b"--");
        buf.put_slice(self.boundary.as_str().as_bytes());
        buf.put_slice(b"--");
        buf.put_slice(CRLF);
        buf.freeze()
    }

    /// Decode a raw response body framed by `boundary` into ordered parts.
    ///
    /// Header names are lower-cased during parsing; a missing header means
    /// the documented default for that field, never an error.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MalformedEnvelope`] when the boundary never
    /// occurs in the body, when a segment lacks the blank-line separator
    /// between head and body, when a header line has no colon, or when the
    /// head bytes are not valid UTF-8. Any of these discards the whole
    /// batch.
    pub fn decode(boundary: &BoundaryToken, body: &[u8]) -> Result<Vec<Part>, ClientError> {
        let marker = format!("--{}", boundary.as_str());
        let segments = split_on(body, marker.as_bytes());
        if segments.len() == 1 {
            return Err(ClientError::malformed(format!(
                "boundary '{}' not found in response body",
                boundary.as_str()
            )));
        }

        let mut parts = Vec::new();
        // The first segment is the preamble; the last is the `--` sentinel
        // left by the closing marker.
        for segment in segments.into_iter().skip(1) {
            if segment.is_empty() || segment == b"--" || segment == b"--\r\n" {
                continue;
            }
            parts.push(decode_part(segment)?);
        }
        Ok(parts)
    }
}

impl Default for Envelope {
    fn default() -> Self { Self::new() }
}

fn decode_part(segment: &[u8]) -> Result<Part, ClientError> {
    let segment = segment.strip_prefix(CRLF).unwrap_or(segment);
    let Some(separator) = find(segment, HEAD_SEPARATOR) else {
        return Err(ClientError::malformed(
            "part has no blank-line separator between head and body",
        ));
    };

    let head = std::str::from_utf8(&segment[..separator])
        .map_err(|_| ClientError::malformed("part head is not valid UTF-8"))?;
    let raw_body = &segment[separator + HEAD_SEPARATOR.len()..];
    let body = raw_body.strip_suffix(CRLF).unwrap_or(raw_body);

    let mut headers = Headers::new();
    for line in head.split("\r\n") {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((name, value)) = line.split_once(':') else {
            return Err(ClientError::malformed(format!(
                "header line '{line}' has no ':' separator"
            )));
        };
        headers.insert(name.trim().to_ascii_lowercase(), value.trim());
    }

    Ok(Part::new(headers, Bytes::copy_from_slice(body)))
}

/// Split an outer `Content-Type` value into its lower-cased media type and
/// the boundary parameter, accepting quoted and unquoted forms.
#[must_use]
pub fn parse_outer_content_type(value: &str) -> (String, Option<BoundaryToken>) {
    let mut segments = value.split(';');
    let media = segments
        .next()
        .map(|s| s.trim().to_ascii_lowercase())
        .unwrap_or_default();

    let boundary = segments.find_map(|segment| {
        let (name, param) = segment.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("boundary") {
            return None;
        }
        let param = param.trim().trim_matches('"');
        (!param.is_empty()).then(|| BoundaryToken::from_value(param))
    });

    (media, boundary)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn split_on<'a>(haystack: &'a [u8], needle: &[u8]) -> Vec<&'a [u8]> {
    let mut segments = Vec::new();
    let mut rest = haystack;
    while let Some(at) = find(rest, needle) {
        segments.push(&rest[..at]);
        rest = &rest[at + needle.len()..];
    }
    segments.push(rest);
    segments
}

#[cfg(test)]
mod tests;
