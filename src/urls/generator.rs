//! Reverse URL generation.
//!
//! ```text
//! ("users.show", {id: "007"})
//!     → registry lookup            "/users/{id}"
//!     → constraint parse + render  id = "7"
//!     → substitution               "/users/7"
//!     → unresolved `{x}` check, `{x?}` stripping
//!     → separator normalization
//! ```

use crate::urls::registry::NamedRoutes;
use crate::urls::UrlError;

/// A `{name}` or `{name?}` token found in a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Token<'a> {
    start: usize,
    end: usize,
    name: &'a str,
    optional: bool,
}

/// Iterate over placeholder tokens in `text`.
fn tokens(text: &str) -> impl Iterator<Item = Token<'_>> {
    let mut cursor = 0;
    std::iter::from_fn(move || {
        let start = cursor + text[cursor..].find('{')?;
        let end = start + text[start..].find('}')? + 1;
        cursor = end;
        let inner = &text[start + 1..end - 1];
        Some(match inner.strip_suffix('?') {
            Some(name) => Token { start, end, name, optional: true },
            None => Token { start, end, name: inner, optional: false },
        })
    })
}

/// Generate the URL of a named route.
pub fn generate<I, K, V>(names: &NamedRoutes, name: &str, params: I) -> Result<String, UrlError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let route = names
        .get(name)
        .ok_or_else(|| UrlError::RouteNotFound(name.to_string()))?;

    let mut url = route.pattern.clone();
    for (key, value) in params {
        let (key, value) = (key.as_ref(), value.as_ref());
        let rendered = match route.constraints.get(key) {
            Some(constraint) => constraint
                .try_parse(value)
                .ok_or_else(|| UrlError::ConstraintViolation {
                    route: name.to_string(),
                    param: key.to_string(),
                })?
                .to_native()
                .to_string(),
            // Unconstrained values go in verbatim, unescaped.
            None => value.to_string(),
        };
        url = url
            .replace(&format!("{{{}}}", key), &rendered)
            .replace(&format!("{{{}?}}", key), &rendered);
    }

    if let Some(missing) = tokens(&url).find(|t| !t.optional) {
        return Err(UrlError::MissingParameter {
            route: name.to_string(),
            param: missing.name.to_string(),
        });
    }

    Ok(normalize(&strip_optionals(&url)))
}

fn strip_optionals(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    let mut last = 0;
    for token in tokens(url).filter(|t| t.optional) {
        out.push_str(&url[last..token.start]);
        last = token.end;
    }
    out.push_str(&url[last..]);
    out
}

/// Collapse repeated separators and drop the trailing one.
fn normalize(url: &str) -> String {
    let mut out = String::with_capacity(url.len() + 1);
    for part in url.split('/').filter(|p| !p.is_empty()) {
        out.push('/');
        out.push_str(part);
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}
