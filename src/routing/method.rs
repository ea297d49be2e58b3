//! HTTP method handling.
//!
//! # Responsibilities
//! - Define the seven canonical verbs plus the virtual `ANY`
//! - Parse method lists supplied at registration time
//! - Report allowed methods for 405 responses
//!
//! # Design Decisions
//! - `ANY` expands to every canonical verb at registration time
//! - `HEAD` is never registered implicitly; the matcher falls back to `GET`
//! - Parsing is ASCII case-insensitive

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::routing::error::RouteError;

/// An HTTP verb known to the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    /// Virtual method matching every verb.
    Any,
}

impl Method {
    /// The verbs `ANY` expands to.
    pub const CANONICAL: [Method; 7] = [
        Method::Get,
        Method::Head,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
        Method::Options,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
            Method::Any => "ANY",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let method = match s.to_ascii_uppercase().as_str() {
            "GET" => Method::Get,
            "HEAD" => Method::Head,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "PATCH" => Method::Patch,
            "DELETE" => Method::Delete,
            "OPTIONS" => Method::Options,
            "ANY" => Method::Any,
            _ => return Err(RouteError::InvalidMethod(s.to_string())),
        };
        Ok(method)
    }
}

impl Serialize for Method {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Method {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Methods supplied to a registration call: a single verb, a list, or `ANY`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MethodList {
    One(String),
    Many(Vec<String>),
}

impl MethodList {
    /// Resolve to concrete verbs, expanding `ANY` and dropping duplicates.
    pub fn resolve(&self) -> Result<Vec<Method>, RouteError> {
        let raw: Vec<&str> = match self {
            MethodList::One(m) => vec![m.as_str()],
            MethodList::Many(ms) => ms.iter().map(String::as_str).collect(),
        };

        let mut resolved = Vec::new();
        for name in raw {
            let method = name.parse::<Method>()?;
            let expanded: &[Method] = match method {
                Method::Any => &Method::CANONICAL,
                _ => std::slice::from_ref(&method),
            };
            for method in expanded {
                if !resolved.contains(method) {
                    resolved.push(*method);
                }
            }
        }
        Ok(resolved)
    }
}

impl From<&str> for MethodList {
    fn from(method: &str) -> Self {
        MethodList::One(method.to_string())
    }
}

impl From<String> for MethodList {
    fn from(method: String) -> Self {
        MethodList::One(method)
    }
}

impl From<Method> for MethodList {
    fn from(method: Method) -> Self {
        MethodList::One(method.as_str().to_string())
    }
}

impl From<&[&str]> for MethodList {
    fn from(methods: &[&str]) -> Self {
        MethodList::Many(methods.iter().map(|m| m.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for MethodList {
    fn from(methods: [&str; N]) -> Self {
        MethodList::Many(methods.iter().map(|m| m.to_string()).collect())
    }
}

impl<const N: usize> From<[Method; N]> for MethodList {
    fn from(methods: [Method; N]) -> Self {
        MethodList::Many(methods.iter().map(|m| m.as_str().to_string()).collect())
    }
}

impl From<Vec<String>> for MethodList {
    fn from(methods: Vec<String>) -> Self {
        MethodList::Many(methods)
    }
}

/// Methods registered on a path that matched but rejected the requested method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedMethods {
    methods: Vec<Method>,
}

impl AllowedMethods {
    /// Wrap the registered methods, keeping registration order.
    pub fn new(methods: Vec<Method>) -> Self {
        Self { methods }
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn contains(&self, method: Method) -> bool {
        self.methods.contains(&method)
    }

    /// Format as an HTTP `Allow` header value.
    pub fn header_value(&self) -> String {
        let mut out = String::new();
        for (idx, method) in self.methods.iter().enumerate() {
            if idx > 0 {
                out.push_str(", ");
            }
            out.push_str(method.as_str());
        }
        out
    }
}

impl fmt::Display for AllowedMethods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header_value())
    }
}
