//! Built-in constraints.

use std::any::Any;

use uuid::Uuid;

use super::{Constraint, Native, TypedValue};

impl TypedValue for i64 {
    fn to_native(&self) -> Native {
        Native::Int(*self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TypedValue for u64 {
    fn to_native(&self) -> Native {
        Native::UInt(*self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TypedValue for f64 {
    fn to_native(&self) -> Native {
        Native::Float(*self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TypedValue for bool {
    fn to_native(&self) -> Native {
        Native::Bool(*self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TypedValue for String {
    fn to_native(&self) -> Native {
        Native::Str(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TypedValue for Uuid {
    fn to_native(&self) -> Native {
        Native::Str(self.hyphenated().to_string())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Signed 64-bit integer (`int`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Int;

impl Constraint for Int {
    fn name(&self) -> &str {
        "int"
    }

    fn try_parse(&self, raw: &str) -> Option<Box<dyn TypedValue>> {
        raw.parse::<i64>().ok().map(|v| Box::new(v) as Box<dyn TypedValue>)
    }
}

/// Unsigned 64-bit integer (`uint`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Uint;

impl Constraint for Uint {
    fn name(&self) -> &str {
        "uint"
    }

    fn try_parse(&self, raw: &str) -> Option<Box<dyn TypedValue>> {
        raw.parse::<u64>().ok().map(|v| Box::new(v) as Box<dyn TypedValue>)
    }
}

/// Strictly positive integer (`positive_int`), typical for record ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositiveInt;

impl Constraint for PositiveInt {
    fn name(&self) -> &str {
        "positive_int"
    }

    fn try_parse(&self, raw: &str) -> Option<Box<dyn TypedValue>> {
        match raw.parse::<u64>() {
            Ok(v) if v > 0 => Some(Box::new(v)),
            _ => None,
        }
    }
}

/// Finite floating point number (`float`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Float;

impl Constraint for Float {
    fn name(&self) -> &str {
        "float"
    }

    fn try_parse(&self, raw: &str) -> Option<Box<dyn TypedValue>> {
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Some(Box::new(v)),
            _ => None,
        }
    }
}

/// Boolean flag (`bool`): `true`/`false`/`1`/`0`, case-insensitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bool;

impl Constraint for Bool {
    fn name(&self) -> &str {
        "bool"
    }

    fn try_parse(&self, raw: &str) -> Option<Box<dyn TypedValue>> {
        let value = if raw == "1" || raw.eq_ignore_ascii_case("true") {
            true
        } else if raw == "0" || raw.eq_ignore_ascii_case("false") {
            false
        } else {
            return None;
        };
        Some(Box::new(value))
    }
}

/// ASCII letters only (`alpha`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Alpha;

impl Constraint for Alpha {
    fn name(&self) -> &str {
        "alpha"
    }

    fn try_parse(&self, raw: &str) -> Option<Box<dyn TypedValue>> {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_alphabetic()) {
            Some(Box::new(raw.to_string()))
        } else {
            None
        }
    }
}

/// ASCII letters and digits (`alnum`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Alnum;

impl Constraint for Alnum {
    fn name(&self) -> &str {
        "alnum"
    }

    fn try_parse(&self, raw: &str) -> Option<Box<dyn TypedValue>> {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Some(Box::new(raw.to_string()))
        } else {
            None
        }
    }
}

/// Lowercase words joined by single hyphens (`slug`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Slug;

impl Constraint for Slug {
    fn name(&self) -> &str {
        "slug"
    }

    fn try_parse(&self, raw: &str) -> Option<Box<dyn TypedValue>> {
        let valid = !raw.is_empty()
            && raw.split('-').all(|word| {
                !word.is_empty()
                    && word
                        .bytes()
                        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
            });
        if valid {
            Some(Box::new(raw.to_string()))
        } else {
            None
        }
    }
}

/// Any non-empty segment text (`string`). A `/` would split the segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct Text;

impl Constraint for Text {
    fn name(&self) -> &str {
        "string"
    }

    fn try_parse(&self, raw: &str) -> Option<Box<dyn TypedValue>> {
        if raw.is_empty() || raw.contains('/') {
            None
        } else {
            Some(Box::new(raw.to_string()))
        }
    }
}

/// RFC 4122 UUID (`uuid`), rendered lowercase hyphenated.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidValue;

impl Constraint for UuidValue {
    fn name(&self) -> &str {
        "uuid"
    }

    fn try_parse(&self, raw: &str) -> Option<Box<dyn TypedValue>> {
        Uuid::parse_str(raw)
            .ok()
            .map(|v| Box::new(v) as Box<dyn TypedValue>)
    }
}
