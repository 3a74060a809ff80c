//! Incremental HTTP/1.x request-head parser.
//!
//! Only the request line and the header block are parsed; device detection
//! never needs the body, so bytes after the blank line are left untouched in
//! the parser buffer.

use log::debug;

use crate::error::ParseError;
use crate::http::request::HttpRequest;
use crate::http::*;

#[derive(PartialEq, Eq, Debug)]
pub enum ParserOk {
    /// More bytes are needed to finish the head.
    Incomplete,
    /// The blank line ending the header block has been seen.
    Done,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
enum RequestParserState {
    RequestLine,
    Headers,
    Done,
}

pub struct RequestParser {
    buf: Vec<u8>,
    // bytes of head already consumed, counted against max_head_size
    consumed: usize,
    max_head_size: usize,
    state: RequestParserState,
}

impl RequestParser {
    pub fn new(max_head_size: usize) -> Self {
        Self {
            buf: Vec::new(),
            consumed: 0,
            max_head_size,
            state: RequestParserState::RequestLine,
        }
    }

    fn parse_request_line(&mut self, line: &[u8], req: &mut HttpRequest) -> Result<(), ParseError> {
        // Request line: METHOD PATH HTTP/VERSION
        let parts: Vec<&[u8]> = line.split(|&b| b == b' ').collect();
        if parts.len() != 3 {
            return Err(ParseError::MalformedRequestLine);
        }

        let method = std::str::from_utf8(parts[0])
            .map_err(|_| ParseError::MalformedRequestLine)?
            .to_uppercase();
        if method.len() > HTTP_METHOD_MAX_LEN {
            return Err(ParseError::UnknownMethod(method));
        }
        let method_enum = match http_method_from_str(&method) {
            HttpMethod::Unknown => return Err(ParseError::UnknownMethod(method)),
            m => m,
        };

        let uri = std::str::from_utf8(parts[1]).map_err(|_| ParseError::MalformedRequestLine)?;
        if uri.is_empty() {
            return Err(ParseError::MalformedRequestLine);
        }

        let version = std::str::from_utf8(parts[2]).unwrap_or("");
        let (maj, min) = version
            .strip_prefix("HTTP/")
            .and_then(|v| v.split_once('.'))
            .and_then(|(maj, min)| Some((maj.parse::<u8>().ok()?, min.parse::<u8>().ok()?)))
            .ok_or(ParseError::MalformedRequestLine)?;

        if !(maj == 1 && (min == 0 || min == 1)) {
            return Err(ParseError::UnsupportedVersion(maj, min));
        }

        req.method = method_enum;
        req.uri = uri.to_string();
        req.http_version = (maj, min);
        Ok(())
    }

    fn parse_header(&mut self, line: &[u8], req: &mut HttpRequest) -> Result<(), ParseError> {
        // obs-fold continuation lines are rejected (RFC 9112 section 5.2)
        if line.first().is_some_and(|b| *b == b' ' || *b == b'\t') {
            return Err(ParseError::MalformedHeader);
        }

        let mut it = line.splitn(2, |&b| b == b':');
        let name = it.next().unwrap_or_default();
        let value = it.next().ok_or(ParseError::MalformedHeader)?;

        let name = std::str::from_utf8(name).map_err(|_| ParseError::MalformedHeader)?;
        if name.is_empty() || name.ends_with(|c: char| c.is_ascii_whitespace()) {
            return Err(ParseError::MalformedHeader);
        }
        let value = String::from_utf8_lossy(value);

        req.headers.set_raw(name, value.trim());
        Ok(())
    }

    /// Feeds newly read bytes and parses as far as they allow.
    ///
    /// Feeding an empty slice is allowed and simply re-checks buffered data.
    pub fn feed(&mut self, bytes: &[u8], req: &mut HttpRequest) -> Result<ParserOk, ParseError> {
        if self.state == RequestParserState::Done {
            return Ok(ParserOk::Done);
        }
        self.buf.extend_from_slice(bytes);

        loop {
            let Some(line_end) = self.buf.iter().position(|&b| b == b'\n') else {
                if self.consumed + self.buf.len() > self.max_head_size {
                    return Err(ParseError::HeadTooLarge(self.max_head_size));
                }
                return Ok(ParserOk::Incomplete);
            };

            if self.consumed + line_end + 1 > self.max_head_size {
                return Err(ParseError::HeadTooLarge(self.max_head_size));
            }

            let raw: Vec<u8> = self.buf.drain(..=line_end).collect();
            self.consumed += raw.len();
            let line = &raw[..raw.len() - 1];
            let line = line.strip_suffix(b"\r").unwrap_or(line);

            match self.state {
                RequestParserState::RequestLine => {
                    // tolerate empty lines before the request line
                    if line.is_empty() {
                        continue;
                    }
                    self.parse_request_line(line, req)?;
                    self.state = RequestParserState::Headers;
                }
                RequestParserState::Headers => {
                    if line.is_empty() {
                        self.state = RequestParserState::Done;
                        debug!(
                            "Parsed request head: {} headers in {} bytes",
                            req.headers.len(),
                            self.consumed
                        );
                        return Ok(ParserOk::Done);
                    }
                    self.parse_header(line, req)?;
                }
                RequestParserState::Done => return Ok(ParserOk::Done),
            }
        }
    }

    pub fn is_done(&self) -> bool {
        self.state == RequestParserState::Done
    }
}

/// Parses a complete request head in one go.
pub fn parse_request_head(bytes: &[u8], max_head_size: usize) -> Result<HttpRequest, ParseError> {
    let mut parser = RequestParser::new(max_head_size);
    let mut req = HttpRequest::new();
    match parser.feed(bytes, &mut req)? {
        ParserOk::Done => Ok(req),
        ParserOk::Incomplete => Err(ParseError::Incomplete),
    }
}
