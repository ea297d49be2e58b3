//! Tree cache dump and load.

use route_resolver::cache::{CacheError, CacheFile};
use route_resolver::constraints::ConstraintSet;
use route_resolver::routing::RouteError;
use route_resolver::{RouteOptions, Router};
use serde_json::json;

mod common;

#[test]
fn test_dump_load_round_trip_is_structurally_equal() {
    let router = common::blog_router();
    let dumped = router.dump().unwrap();

    let loaded: Router<String> = Router::load(&dumped, &ConstraintSet::builtin()).unwrap();
    assert_eq!(loaded.tree(), router.tree());
    assert_eq!(loaded.dump().unwrap(), dumped);
}

#[test]
fn test_loaded_router_resolves_like_the_original() {
    let router = common::blog_router();
    let loaded: Router<String> = Router::load(&router.dump().unwrap(), &ConstraintSet::builtin()).unwrap();

    for (method, path) in [("GET", "/"), ("HEAD", "/post/3"), ("PUT", "/users/8"), ("PATCH", "/admin/tags/new-tag")] {
        let a = router.match_route(method, path).unwrap();
        let b = loaded.match_route(method, path).unwrap();
        assert_eq!((a.pattern, a.action), (b.pattern, b.action));
        assert_eq!(a.params.to_native_map(), b.params.to_native_map());
    }
    assert!(loaded.match_route("GET", "/users/x").is_err());
}

#[test]
fn test_layout_uses_reserved_keys() {
    let mut router: Router<String> = Router::new();
    router.get("/", "home".into(), RouteOptions::new()).unwrap();
    router.post("/", "create".into(), RouteOptions::new()).unwrap();

    assert_eq!(
        router.dump().unwrap(),
        json!({
            "/": {
                "name": "/",
                "exec": {
                    "route": "/",
                    "method": { "GET": "home", "POST": "create" },
                    "constraints": {}
                }
            }
        })
    );
}

#[test]
fn test_loaded_router_is_sealed() {
    let router = common::blog_router();
    let mut loaded: Router<String> = Router::load(&router.dump().unwrap(), &ConstraintSet::builtin()).unwrap();

    assert!(loaded.is_sealed());
    assert_eq!(
        loaded.get("/late", "late".into(), RouteOptions::new()),
        Err(RouteError::RegistrationClosed)
    );
}

#[test]
fn test_cache_file_keeps_named_routes() {
    let path = common::temp_path("cache_file", "json");
    let router = common::blog_router();
    router.save_cache(&path).unwrap();

    let loaded: Router<String> = Router::load_cache(&path, &ConstraintSet::builtin()).unwrap();
    assert_eq!(loaded.names(), router.names());
    assert_eq!(loaded.generate_url("users.show", [("id", "5")]).unwrap(), "/users/5");
    assert_eq!(loaded.match_route("GET", "/search/a/1").unwrap().action, "search");

    std::fs::remove_file(&path).unwrap_or_default();
}

#[test]
fn test_cache_with_unknown_constraint_is_rejected() {
    let path = common::temp_path("cache_unknown", "json");
    let tree = json!({
        "/": { "name": "/", "*": { "name": "id", "constraints": { "id": "hex" } } }
    });
    CacheFile::new(tree, json!({})).save(&path).unwrap();

    let result: Result<Router<String>, _> = Router::load_cache(&path, &ConstraintSet::builtin());
    assert!(matches!(result, Err(CacheError::UnknownConstraint(name)) if name == "hex"));

    std::fs::remove_file(&path).unwrap_or_default();
}
