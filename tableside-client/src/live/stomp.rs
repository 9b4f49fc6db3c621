//! Minimal STOMP 1.2 frame codec
//!
//! ```text
//! COMMAND
//! header1:value1
//! header2:value2
//!
//! body^@
//! ```
//!
//! Bare EOLs between frames are heart-beats and parse as `None`.

use crate::error::{ClientError, ClientResult};

/// A single STOMP frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub command: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Frame {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            headers: Vec::new(),
            body: String::new(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// First value of a header (repeated headers: first one wins)
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    // ========== Client frames ==========

    pub fn connect(host: &str, token: Option<&str>) -> Self {
        let frame = Self::new("CONNECT")
            .header("accept-version", "1.2,1.1")
            .header("host", host)
            .header("heart-beat", "0,0");
        match token {
            Some(token) => frame.header("Authorization", format!("Bearer {token}")),
            None => frame,
        }
    }

    pub fn subscribe(id: &str, destination: &str) -> Self {
        Self::new("SUBSCRIBE")
            .header("id", id)
            .header("destination", destination)
            .header("ack", "auto")
    }

    pub fn disconnect() -> Self {
        Self::new("DISCONNECT")
    }

    // ========== Server frames ==========

    pub fn connected() -> Self {
        Self::new("CONNECTED").header("version", "1.2")
    }

    pub fn message(destination: &str, subscription: &str, body: impl Into<String>) -> Self {
        Self::new("MESSAGE")
            .header("destination", destination)
            .header("subscription", subscription)
            .header("content-type", "application/json")
            .with_body(body)
    }

    pub fn error(message: &str) -> Self {
        Self::new("ERROR").header("message", message)
    }

    /// CONNECT and CONNECTED headers are sent verbatim
    fn escapes_headers(command: &str) -> bool {
        !matches!(command, "CONNECT" | "CONNECTED")
    }

    /// Serialize, NUL-terminated
    pub fn encode(&self) -> String {
        let escape = Self::escapes_headers(&self.command);
        let mut out = String::with_capacity(self.command.len() + self.body.len() + 64);
        out.push_str(&self.command);
        out.push('\n');
        for (name, value) in &self.headers {
            if escape {
                out.push_str(&escape_header(name));
                out.push(':');
                out.push_str(&escape_header(value));
            } else {
                out.push_str(name);
                out.push(':');
                out.push_str(value);
            }
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.body);
        out.push('\0');
        out
    }

    /// Parse one frame; `Ok(None)` for a heart-beat
    pub fn parse(raw: &str) -> ClientResult<Option<Self>> {
        let raw = raw.trim_start_matches(['\r', '\n']);
        if raw.is_empty() || raw == "\0" {
            return Ok(None);
        }

        let (head, rest) = split_head(raw)
            .ok_or_else(|| ClientError::Live("STOMP frame without header terminator".into()))?;

        let mut lines = head.split('\n').map(|line| line.trim_end_matches('\r'));
        let command = lines
            .next()
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ClientError::Live("STOMP frame without command".into()))?
            .to_string();
        let unescape = Self::escapes_headers(&command);

        let mut headers = Vec::new();
        for line in lines {
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| ClientError::Live(format!("malformed STOMP header: {line}")))?;
            if unescape {
                headers.push((unescape_header(name)?, unescape_header(value)?));
            } else {
                headers.push((name.to_string(), value.to_string()));
            }
        }

        let mut frame = Frame {
            command,
            headers,
            body: String::new(),
        };
        let content_length = frame.get("content-length").and_then(|v| v.parse::<usize>().ok());
        frame.body = match content_length.and_then(|len| rest.get(..len)) {
            Some(body) => body.to_string(),
            None => rest.split('\0').next().unwrap_or_default().to_string(),
        };
        Ok(Some(frame))
    }
}

/// Split at the blank line ending the headers (LF or CRLF)
fn split_head(raw: &str) -> Option<(&str, &str)> {
    let lf = raw.find("\n\n").map(|i| (i, i + 2));
    let crlf = raw.find("\r\n\r\n").map(|i| (i, i + 4));
    let (end, body_start) = match (lf, crlf) {
        (Some(a), Some(b)) => {
            if a.0 <= b.0 {
                a
            } else {
                b
            }
        }
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => return None,
    };
    Some((&raw[..end], &raw[body_start..]))
}

fn escape_header(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            ':' => out.push_str("\\c"),
            c => out.push(c),
        }
    }
    out
}

fn unescape_header(value: &str) -> ClientResult<String> {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('c') => out.push(':'),
            other => {
                return Err(ClientError::Live(format!(
                    "invalid STOMP header escape: \\{}",
                    other.map(String::from).unwrap_or_default()
                )));
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_subscribe() {
        let frame = Frame::subscribe("sub-0", "/topic/orders/1");
        assert_eq!(
            frame.encode(),
            "SUBSCRIBE\nid:sub-0\ndestination:/topic/orders/1\nack:auto\n\n\0"
        );
    }

    #[test]
    fn test_connect_carries_bearer() {
        let frame = Frame::connect("localhost", Some("abc"));
        let parsed = Frame::parse(&frame.encode()).unwrap().unwrap();
        assert_eq!(parsed.command, "CONNECT");
        assert_eq!(parsed.get("Authorization"), Some("Bearer abc"));
        assert_eq!(parsed.get("host"), Some("localhost"));
        assert!(Frame::connect("h", None).get("Authorization").is_none());
    }

    #[test]
    fn test_parse_message_with_crlf_and_heartbeats() {
        let raw = "\n\r\nMESSAGE\r\ndestination:/topic/orders/1\r\nsubscription:sub-0\r\n\r\n{\"id\":1}\0\n";
        let frame = Frame::parse(raw).unwrap().unwrap();
        assert_eq!(frame.command, "MESSAGE");
        assert_eq!(frame.get("subscription"), Some("sub-0"));
        assert_eq!(frame.body, "{\"id\":1}");
    }

    #[test]
    fn test_parse_heartbeat() {
        assert!(Frame::parse("\n").unwrap().is_none());
        assert!(Frame::parse("\r\n\r\n").unwrap().is_none());
    }

    #[test]
    fn test_content_length_allows_nul_in_body() {
        let raw = "MESSAGE\ncontent-length:3\n\na\0b\0";
        let frame = Frame::parse(raw).unwrap().unwrap();
        assert_eq!(frame.body, "a\0b");
    }

    #[test]
    fn test_header_escaping() {
        let frame = Frame::error("bad: request\nline two");
        let encoded = frame.encode();
        assert!(encoded.contains("message:bad\\c request\\nline two"));
        let parsed = Frame::parse(&encoded).unwrap().unwrap();
        assert_eq!(parsed.get("message"), Some("bad: request\nline two"));
    }

    #[test]
    fn test_repeated_header_first_wins() {
        let frame = Frame::parse("MESSAGE\nfoo:1\nfoo:2\n\n\0").unwrap().unwrap();
        assert_eq!(frame.get("foo"), Some("1"));
    }

    #[test]
    fn test_malformed_frames() {
        assert!(Frame::parse("MESSAGE\nno-terminator").is_err());
        assert!(Frame::parse("MESSAGE\nbroken\n\n\0").is_err());
        assert!(Frame::parse("ERROR\nmessage:bad\\x\n\n\0").is_err());
    }
}
