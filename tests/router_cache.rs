use bunner_route_engine::{HttpMethod, Router, RouterOptions};

fn cached_router(capacity: usize) -> Router<&'static str> {
    let options = RouterOptions::builder()
        .cache_capacity(capacity)
        .build()
        .expect("options should validate");
    let router = Router::new(Some(options));
    router
        .add(HttpMethod::Get, "/users/:id", "user")
        .expect("route should register");
    router
        .add(HttpMethod::Post, "/users/:id", "update")
        .expect("route should register");
    router
        .add(HttpMethod::Get, "/users/:id/posts/:post", "post")
        .expect("route should register");
    router
        .add(HttpMethod::Get, "/health", "health")
        .expect("route should register");
    router.seal();
    router
}

#[test]
fn router_when_same_path_requested_twice_then_second_is_cache_hit() {
    let router = cached_router(16);
    let readonly = router.get_readonly().expect("readonly after seal");

    let first = readonly
        .find(HttpMethod::Get, "/users/42")
        .expect("lookup should succeed")
        .expect("route should match");
    let second = readonly
        .find(HttpMethod::Get, "/users/42")
        .expect("lookup should succeed")
        .expect("cached route should match");

    assert_eq!(first.key, second.key);
    assert_eq!(second.params.get("id"), Some("42"));
    assert_eq!(*second.handler, "user");
    assert_eq!(readonly.cache_metrics(), Some((1, 1)));
    assert_eq!(readonly.cached_entries(), 1);
}

#[test]
fn router_when_lookup_misses_then_result_is_not_cached() {
    let router = cached_router(16);
    let readonly = router.get_readonly().expect("readonly after seal");

    for _ in 0..3 {
        assert!(
            readonly
                .find(HttpMethod::Get, "/nowhere")
                .expect("lookup should succeed")
                .is_none()
        );
    }

    assert_eq!(readonly.cache_metrics(), Some((0, 3)));
    assert_eq!(readonly.cached_entries(), 0);
}

#[test]
fn router_when_equivalent_spellings_requested_then_share_one_entry() {
    let router = cached_router(16);
    let readonly = router.get_readonly().expect("readonly after seal");

    for path in ["/health", "//health", "/health/"] {
        readonly
            .find(HttpMethod::Get, path)
            .expect("lookup should succeed")
            .expect("route should match");
    }

    assert_eq!(readonly.cached_entries(), 1);
    assert_eq!(readonly.cache_metrics(), Some((2, 1)));
}

#[test]
fn router_when_cache_disabled_then_metrics_are_absent() {
    let options = RouterOptions::builder()
        .cache_routes(false)
        .build()
        .expect("options should validate");
    let router = Router::new(Some(options));
    router
        .add(HttpMethod::Get, "/ping", ())
        .expect("route should register");
    router.seal();

    let readonly = router.get_readonly().expect("readonly after seal");
    readonly
        .find(HttpMethod::Get, "/ping")
        .expect("lookup should succeed")
        .expect("route should match");

    assert_eq!(readonly.cache_metrics(), None);
    assert_eq!(readonly.cached_entries(), 0);
    assert_eq!(readonly.invalidate_path("/ping", None), 0);
}

#[test]
fn router_when_path_invalidated_then_only_that_path_is_dropped() {
    let router = cached_router(16);
    let readonly = router.get_readonly().expect("readonly after seal");

    for (method, path) in [
        (HttpMethod::Get, "/users/1"),
        (HttpMethod::Post, "/users/1"),
        (HttpMethod::Get, "/users/2"),
    ] {
        readonly
            .find(method, path)
            .expect("lookup should succeed")
            .expect("route should match");
    }
    assert_eq!(readonly.cached_entries(), 3);

    assert_eq!(readonly.invalidate_path("/users/1", Some(HttpMethod::Post)), 1);
    assert_eq!(readonly.cached_entries(), 2);

    assert_eq!(readonly.invalidate_path("/users/1", None), 1);
    assert_eq!(readonly.cached_entries(), 1);

    assert_eq!(readonly.invalidate_path("/users/1", None), 0);

    readonly
        .find(HttpMethod::Get, "/users/2")
        .expect("lookup should succeed")
        .expect("route should match");
    assert_eq!(readonly.cache_metrics(), Some((1, 3)));
}

#[test]
fn router_when_prefix_invalidated_then_subtree_is_dropped() {
    let router = cached_router(16);
    let readonly = router.get_readonly().expect("readonly after seal");

    for path in ["/users/1", "/users/1/posts/9", "/users/2/posts/3", "/health"] {
        readonly
            .find(HttpMethod::Get, path)
            .expect("lookup should succeed")
            .expect("route should match");
    }
    assert_eq!(readonly.cached_entries(), 4);

    assert_eq!(readonly.invalidate_prefix("/users/1", None), 2);
    assert_eq!(readonly.cached_entries(), 2);

    assert_eq!(readonly.invalidate_prefix("/users", Some(HttpMethod::Get)), 1);
    assert_eq!(readonly.cached_entries(), 1);

    assert_eq!(readonly.invalidate_prefix("/", None), 1);
    assert_eq!(readonly.cached_entries(), 0);
}

#[test]
fn router_when_cache_full_then_least_recently_used_is_evicted() {
    let router = cached_router(2);
    let readonly = router.get_readonly().expect("readonly after seal");
    let hit = |path: &str| {
        readonly
            .find(HttpMethod::Get, path)
            .expect("lookup should succeed")
            .expect("route should match");
    };

    hit("/users/1");
    hit("/users/2");
    hit("/users/1");
    hit("/users/3");

    assert_eq!(readonly.cached_entries(), 2);
    assert_eq!(readonly.invalidate_path("/users/2", None), 0);
    assert_eq!(readonly.invalidate_path("/users/1", None), 1);
    assert_eq!(readonly.invalidate_path("/users/3", None), 1);
    assert_eq!(readonly.cache_metrics(), Some((1, 3)));
}

#[test]
fn router_when_paths_differ_only_in_case_then_invalidation_covers_both() {
    let router = cached_router(8);
    let readonly = router.get_readonly().expect("readonly after seal");

    let upper = readonly
        .find(HttpMethod::Get, "/Users/1")
        .expect("lookup should succeed")
        .expect("case-insensitive route should match");
    assert_eq!(upper.params.get("id"), Some("1"));
    readonly
        .find(HttpMethod::Get, "/users/2")
        .expect("lookup should succeed")
        .expect("route should match");
    readonly
        .find(HttpMethod::Get, "/USERS/3")
        .expect("lookup should succeed")
        .expect("route should match");
    assert_eq!(readonly.cached_entries(), 3);

    assert_eq!(readonly.invalidate_path("/users/3", None), 1);
    assert_eq!(readonly.invalidate_prefix("/USERS", None), 2);
    assert_eq!(readonly.cached_entries(), 0);
}

#[test]
fn router_when_mixed_case_path_cached_then_hit_keeps_original_capture() {
    let options = RouterOptions::builder()
        .build()
        .expect("options should validate");
    let router = Router::new(Some(options));
    router
        .add(HttpMethod::Get, "/files/:name", "file")
        .expect("route should register");
    router.seal();
    let readonly = router.get_readonly().expect("readonly after seal");

    for _ in 0..2 {
        let found = readonly
            .find(HttpMethod::Get, "/Files/ReadMe")
            .expect("lookup should succeed")
            .expect("route should match");
        assert_eq!(found.params.get("name"), Some("ReadMe"));
    }
    assert_eq!(readonly.cache_metrics(), Some((1, 1)));
    assert_eq!(readonly.invalidate_prefix("/files", None), 1);
}
