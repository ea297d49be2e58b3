//! URI segmentation.
//!
//! Splits a route pattern or an incoming path into classified segments.
//! The first segment is always the literal root `/`.
//!
//! ```text
//! "/users/{id}/posts/{page?}"
//!     → "/"      Literal
//!     → "users"  Literal
//!     → "{id}"   Required(id)
//!     → "posts"  Literal
//!     → "{page?}" Optional(page)
//! ```

/// Classification of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Literal,
    Required,
    Optional,
}

impl SegmentKind {
    /// Tree key for placeholder segments; `None` for literals.
    pub fn placeholder_key(&self) -> Option<&'static str> {
        match self {
            SegmentKind::Literal => None,
            SegmentKind::Required => Some("*"),
            SegmentKind::Optional => Some("?"),
        }
    }
}

/// A classified piece of a path, borrowing from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub raw: &'a str,
    pub kind: SegmentKind,
    pub name: &'a str,
}

impl<'a> Segment<'a> {
    /// Classify one `/`-delimited chunk.
    pub fn classify(raw: &'a str) -> Self {
        if let Some(name) = raw.strip_prefix('{').and_then(|s| s.strip_suffix("?}")) {
            return Self { raw, kind: SegmentKind::Optional, name };
        }
        if let Some(name) = raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            return Self { raw, kind: SegmentKind::Required, name };
        }
        Self { raw, kind: SegmentKind::Literal, name: raw }
    }

    fn root() -> Self {
        Self { raw: "/", kind: SegmentKind::Literal, name: "/" }
    }

    pub fn is_placeholder(&self) -> bool {
        self.kind != SegmentKind::Literal
    }
}

/// Lazy iterator over the segments of a path.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    root_pending: bool,
    rest: std::str::Split<'a, char>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.root_pending {
            self.root_pending = false;
            return Some(Segment::root());
        }
        // Empty chunks come from repeated separators and carry no segment.
        self.rest
            .by_ref()
            .find(|chunk| !chunk.is_empty())
            .map(Segment::classify)
    }
}

/// Segment a pattern or path.
pub fn segment(path: &str) -> Segments<'_> {
    Segments {
        root_pending: true,
        rest: path.trim_matches('/').split('/'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(path: &str) -> Vec<(String, SegmentKind, String)> {
        segment(path)
            .map(|s| (s.raw.to_string(), s.kind, s.name.to_string()))
            .collect()
    }

    #[test]
    fn test_root_only() {
        assert_eq!(kinds("/"), vec![("/".into(), SegmentKind::Literal, "/".into())]);
        assert_eq!(kinds(""), kinds("/"));
        assert_eq!(kinds("///"), kinds("/"));
    }

    #[test]
    fn test_classification() {
        let segs = kinds("/users/{id}/posts/{page?}/");
        assert_eq!(
            segs,
            vec![
                ("/".into(), SegmentKind::Literal, "/".into()),
                ("users".into(), SegmentKind::Literal, "users".into()),
                ("{id}".into(), SegmentKind::Required, "id".into()),
                ("posts".into(), SegmentKind::Literal, "posts".into()),
                ("{page?}".into(), SegmentKind::Optional, "page".into()),
            ]
        );
    }

    #[test]
    fn test_repeated_separators_are_skipped() {
        let raws: Vec<&str> = segment("a//b///c").map(|s| s.raw).collect();
        assert_eq!(raws, vec!["/", "a", "b", "c"]);
    }

    #[test]
    fn test_half_braces_are_literal() {
        assert_eq!(Segment::classify("{id").kind, SegmentKind::Literal);
        assert_eq!(Segment::classify("id}").kind, SegmentKind::Literal);
        assert_eq!(Segment::classify("{id?}").name, "id");
    }

    #[test]
    fn test_restartable() {
        let segs = segment("/a/{b}");
        let first: Vec<_> = segs.clone().collect();
        let second: Vec<_> = segs.collect();
        assert_eq!(first, second);
    }
}
