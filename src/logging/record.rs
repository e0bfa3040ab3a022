//! Record fields and serialization.

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::level::Level;

/// A caller-supplied key/value pair attached to a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: Cow<'static, str>,
    pub value: Value,
}

impl Field {
    pub fn new(key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Field whose value is the `Display` rendering of `value`.
    pub fn display(key: impl Into<Cow<'static, str>>, value: impl fmt::Display) -> Self {
        Self::new(key, value.to_string())
    }

    /// Field whose value is the `Debug` rendering of `value`.
    pub fn debug(key: impl Into<Cow<'static, str>>, value: impl fmt::Debug) -> Self {
        Self::new(key, format!("{:?}", value))
    }

    /// `error` field holding the error's message.
    pub fn error(err: &dyn std::error::Error) -> Self {
        Self::new("error", err.to_string())
    }
}

/// Shorthand for [`Field::new`].
pub fn field(key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Field {
    Field::new(key, value)
}

/// Source location of the original log call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite<'a> {
    pub file: &'a str,
    pub line: u32,
}

impl<'a> CallSite<'a> {
    pub fn new(file: &'a str, line: u32) -> Self {
        Self { file, line }
    }

    /// `dir/file.rs:line`, keeping only the last directory component.
    pub fn short(&self) -> String {
        let mut parts = self.file.rsplit(|c: char| c == '/' || c == '\\');
        let file = parts.next().unwrap_or(self.file);
        match parts.next().filter(|dir| !dir.is_empty()) {
            Some(dir) => format!("{}/{}:{}", dir, file, self.line),
            None => format!("{}:{}", file, self.line),
        }
    }
}

impl From<&'static Location<'static>> for CallSite<'static> {
    fn from(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line())
    }
}

/// One log record, serialized with a fixed key order.
#[derive(Debug)]
pub struct Record<'a> {
    pub time: String,
    pub level: Level,
    pub logger: Option<&'a str>,
    pub caller: String,
    pub msg: &'a str,
    pub stacktrace: Option<String>,
    pub fields: &'a [Field],
}

impl Record<'_> {
    /// JSON object terminated by a newline.
    pub fn to_line(&self) -> serde_json::Result<Vec<u8>> {
        let mut line = serde_json::to_vec(self)?;
        line.push(b'\n');
        Ok(line)
    }
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("time", &self.time)?;
        map.serialize_entry("level", self.level.as_upper_str())?;
        if let Some(logger) = self.logger {
            map.serialize_entry("logger", logger)?;
        }
        map.serialize_entry("caller", &self.caller)?;
        map.serialize_entry("msg", self.msg)?;
        if let Some(stacktrace) = &self.stacktrace {
            map.serialize_entry("stacktrace", stacktrace)?;
        }
        for field in self.fields {
            map.serialize_entry(&field.key, &field.value)?;
        }
        map.end()
    }
}
