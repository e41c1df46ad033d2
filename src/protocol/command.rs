// src/protocol/command.rs

//! Parser for `##vso[...]` logging commands.
//!
//! Format:
//!
//! ```text
//! ##vso[<command> <key>=<value>;<key>=<value>]<message>
//! ```
//!
//! Parsing is lenient: pieces that cannot be read are left empty instead of
//! rejecting the line.

use std::collections::BTreeMap;
use std::fmt;

/// Marker every logging command starts with.
pub const COMMAND_PREFIX: &str = "##vso[";

/// Escapes used for property values and messages, as (escaped, raw).
const ESCAPES: [(&str, char); 5] = [
    ("%0D", '\r'),
    ("%0A", '\n'),
    ("%5D", ']'),
    ("%3B", ';'),
    ("%25", '%'),
];

/// A decoded logging command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskCommand {
    pub command: String,
    pub properties: BTreeMap<String, String>,
    pub message: String,
}

impl TaskCommand {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Self::default()
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Decode the logging command embedded in `line`.
    ///
    /// Returns `None` only when the line has no `##vso[` marker. Text before
    /// the marker is ignored.
    pub fn parse(line: &str) -> Option<TaskCommand> {
        let start = line.find(COMMAND_PREFIX)? + COMMAND_PREFIX.len();
        let rest = &line[start..];

        let (info, message) = match rest.find(']') {
            Some(end) => (&rest[..end], &rest[end + 1..]),
            None => (rest, ""),
        };

        let info = info.trim();
        let (command, props) = match info.find(' ') {
            Some(space) => (&info[..space], &info[space + 1..]),
            None => (info, ""),
        };

        Some(TaskCommand {
            command: command.to_string(),
            properties: parse_properties(props),
            message: unescape(message),
        })
    }
}

fn parse_properties(section: &str) -> BTreeMap<String, String> {
    let mut properties = BTreeMap::new();
    for segment in section.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let Some((key, value)) = segment.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        properties.insert(key.to_string(), unescape(value.trim()));
    }
    properties
}

/// Reverse the protocol escapes. Unknown `%xx` sequences are kept verbatim.
pub fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match ESCAPES
            .iter()
            .find(|(escaped, _)| {
                tail.get(..escaped.len())
                    .is_some_and(|t| t.eq_ignore_ascii_case(escaped))
            }) {
            Some((escaped, raw)) => {
                out.push(*raw);
                rest = &tail[escaped.len()..];
            }
            None => {
                out.push('%');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Apply the protocol escapes to `value`.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match ESCAPES.iter().find(|(_, raw)| *raw == c) {
            Some((escaped, _)) => out.push_str(escaped),
            None => out.push(c),
        }
    }
    out
}

impl fmt::Display for TaskCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{COMMAND_PREFIX}{}", self.command)?;
        let mut first = true;
        for (key, value) in &self.properties {
            let sep = if first { ' ' } else { ';' };
            write!(f, "{sep}{key}={}", escape(value))?;
            first = false;
        }
        write!(f, "]{}", escape(&self.message))
    }
}
