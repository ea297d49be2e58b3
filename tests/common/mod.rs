//! Shared utilities for integration tests.

use std::path::PathBuf;

use route_resolver::constraints::{Int, PositiveInt, Slug, Text, Uint};
use route_resolver::{RouteOptions, Router};

/// A small blog-shaped route set used across tests.
#[allow(dead_code)]
pub fn blog_router() -> Router<String> {
    let mut router = Router::new();
    router
        .get("/", "home".into(), RouteOptions::new().name("home"))
        .unwrap();
    router
        .get("/users/new", "users.new".into(), RouteOptions::new())
        .unwrap();
    router
        .add_route(
            ["GET", "PUT"],
            "/users/{id}",
            "users.show".into(),
            RouteOptions::new().constraint("id", Int).name("users.show"),
        )
        .unwrap();
    router
        .get(
            "/post/{id?}",
            "post.index".into(),
            RouteOptions::new().constraint("id", PositiveInt).name("post.index"),
        )
        .unwrap();
    router
        .get(
            "/search/{query?}/{page?}",
            "search".into(),
            RouteOptions::new()
                .constraint("query", Text)
                .constraint("page", Uint)
                .name("search"),
        )
        .unwrap();
    router
        .group("/admin", |r| {
            r.any("/tags/{tag}", "admin.tags".into(), RouteOptions::new().constraint("tag", Slug))
        })
        .unwrap();
    router
}

/// A temp file path unique to this process.
#[allow(dead_code)]
pub fn temp_path(name: &str, ext: &str) -> PathBuf {
    std::env::temp_dir().join(format!("route_resolver_it_{}_{}.{}", name, std::process::id(), ext))
}
