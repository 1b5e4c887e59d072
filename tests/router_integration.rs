use bunner_route_engine::{
    CacheIndex, ErrorKind, HttpMethod, RouteSpec, Router, RouterError,
    radix::{NodeId, RadixError, StaticChildIndex},
};

#[test]
fn router_when_literal_and_param_siblings_then_literal_resolves() {
    let router = Router::new(None);
    router
        .add(HttpMethod::Get, "/users/:id", "by-id")
        .expect("param route should register");
    router
        .add(HttpMethod::Get, "/users/static", "static")
        .expect("static route should register");
    router.seal();

    let found = router
        .find(HttpMethod::Get, "/users/static")
        .expect("lookup should succeed")
        .expect("route should match");
    assert_eq!(*found.handler, "static");
    assert_eq!(found.pattern.as_ref(), "/users/static");
}

#[test]
fn router_when_files_wildcard_then_captures_tail() {
    let router = Router::new(None);
    router
        .add(HttpMethod::Get, "/files/*rest", ())
        .expect("wildcard route should register");
    router.seal();

    let found = router
        .find(HttpMethod::Get, "/files/a/b/c")
        .expect("lookup should succeed")
        .expect("route should match");
    assert_eq!(found.params.get("rest"), Some("a/b/c"));
}

#[test]
fn router_when_same_route_registered_twice_then_second_conflicts() {
    let router = Router::new(None);
    let first = router
        .add(HttpMethod::Get, "/a/:id", ())
        .expect("first registration should succeed");

    let err = router
        .add(HttpMethod::Get, "/a/:id", ())
        .expect_err("expected duplicate route conflict");
    match &err {
        RouterError::Radix(RadixError::DuplicateRoute {
            method,
            path,
            existing_key,
        }) => {
            assert_eq!(*method, HttpMethod::Get);
            assert_eq!(path, "/a/:id");
            assert_eq!(*existing_key, first);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.kind(), ErrorKind::DuplicateRoute);
}

#[test]
fn router_when_route_spec_used_then_registers_like_add() {
    let router = Router::new(None);
    let spec = RouteSpec::new(HttpMethod::Patch, "/orders/:id", 7u32);
    let key = router.add_route(spec).expect("spec should register");
    router.seal();

    let found = router
        .find(HttpMethod::Patch, "/orders/99")
        .expect("lookup should succeed")
        .expect("route should match");
    assert_eq!(found.key, key);
    assert_eq!(found.method, HttpMethod::Patch);
    assert_eq!(*found.handler, 7);
}

#[test]
fn router_when_full_table_sealed_then_every_precedence_rule_holds() {
    let router = Router::new(None);
    let routes = [
        (HttpMethod::Get, "/"),
        (HttpMethod::Get, "/api/v1/users"),
        (HttpMethod::Get, "/api/v1/users/:id(\\d+)"),
        (HttpMethod::Get, "/api/v1/users/:name"),
        (HttpMethod::Get, "/api/v1/users/me"),
        (HttpMethod::Post, "/api/v1/users"),
        (HttpMethod::Get, "/api/v2/*path"),
        (HttpMethod::Head, "/api/v2/status"),
    ];
    let keys: Vec<_> = routes
        .iter()
        .map(|(method, path)| {
            router
                .add(*method, path, *path)
                .expect("route should register")
        })
        .collect();
    router.seal();

    let resolve = |method: HttpMethod, path: &str| {
        router
            .find(method, path)
            .expect("lookup should succeed")
            .map(|found| found.key)
    };

    assert_eq!(resolve(HttpMethod::Get, "/"), Some(keys[0]));
    assert_eq!(resolve(HttpMethod::Get, "/api/v1/users"), Some(keys[1]));
    assert_eq!(resolve(HttpMethod::Get, "/api/v1/users/12"), Some(keys[2]));
    assert_eq!(resolve(HttpMethod::Get, "/api/v1/users/ann"), Some(keys[3]));
    assert_eq!(resolve(HttpMethod::Get, "/api/v1/users/me"), Some(keys[4]));
    assert_eq!(resolve(HttpMethod::Post, "/api/v1/users"), Some(keys[5]));
    assert_eq!(resolve(HttpMethod::Get, "/api/v2/status"), Some(keys[6]));
    assert_eq!(resolve(HttpMethod::Head, "/api/v2/status"), Some(keys[7]));
    assert_eq!(resolve(HttpMethod::Get, "/api/v2"), Some(keys[6]));
    assert_eq!(resolve(HttpMethod::Delete, "/api/v1/users"), None);
    assert_eq!(resolve(HttpMethod::Get, "/api/v3"), None);
}

#[test]
fn router_when_sealed_then_summary_counts_node_kinds() {
    let router = Router::new(None);
    for path in ["/users/:id", "/users/static", "/files/*rest"] {
        router
            .add(HttpMethod::Get, path, ())
            .expect("route should register");
    }
    router.seal();

    let summary = router.get_readonly().expect("readonly after seal").summary();
    assert_eq!(summary.routes, 3);
    assert_eq!(summary.nodes, 6);
    assert_eq!(summary.static_nodes, 4);
    assert_eq!(summary.param_nodes, 1);
    assert_eq!(summary.wildcard_nodes, 1);
    assert_eq!(summary.promoted_indexes, 0);
}

#[test]
fn router_when_many_literal_children_then_summary_reports_promotion() {
    let router = Router::new(None);
    for i in 0..20 {
        router
            .add(HttpMethod::Get, &format!("/n{i}"), ())
            .expect("route should register");
    }
    router.seal();

    let summary = router.get_readonly().expect("readonly after seal").summary();
    assert_eq!(summary.promoted_indexes, 1);
    assert_eq!(summary.static_nodes, 21);
}

#[test]
fn router_when_errors_classified_then_kinds_cover_taxonomy() {
    let router: Router<()> = Router::new(None);
    let kind_of = |path: &str| {
        router
            .add(HttpMethod::Get, path, ())
            .expect_err("registration should fail")
            .kind()
    };

    assert_eq!(kind_of(""), ErrorKind::EmptyPath);
    assert_eq!(kind_of("/caf\u{e9}"), ErrorKind::NonAsciiPath);
    assert_eq!(kind_of("no-slash"), ErrorKind::PathSyntaxInvalid);
    assert_eq!(kind_of("/a b"), ErrorKind::DisallowedCharacters);
    assert_eq!(kind_of("/a/*w/b"), ErrorKind::WildcardNotAtEnd);
    assert_eq!(kind_of("/:x/:x"), ErrorKind::DuplicateParamName);
    assert_eq!(kind_of("/:9x"), ErrorKind::ParamNameInvalidStart);
    assert_eq!(kind_of("/:x.y"), ErrorKind::ParamNameInvalidChar);
    assert_eq!(kind_of("/pre:x"), ErrorKind::MixedLiteralAndParam);
    assert_eq!(kind_of("/:x((a+)+)"), ErrorKind::UnsafePattern);

    router.seal();
    let find_kind = |path: &str| {
        router
            .find(HttpMethod::Get, path)
            .expect_err("lookup should fail")
            .kind()
    };
    assert_eq!(find_kind(""), ErrorKind::EmptyPath);
    assert_eq!(find_kind("/\u{e9}"), ErrorKind::NonAsciiPath);
    assert_eq!(find_kind("/a/../b"), ErrorKind::PathSyntaxInvalid);
    assert_eq!(find_kind("/a#b"), ErrorKind::DisallowedCharacters);
}

#[test]
fn static_child_index_when_set_across_promotion_then_latest_values_win() {
    let mut index = StaticChildIndex::new();
    for round in 0..2u32 {
        for i in 0..12u32 {
            index.set(&format!("seg{i}"), NodeId::from_raw(round * 100 + i));
            for j in 0..=i {
                assert_eq!(
                    index.get(&format!("seg{j}")),
                    Some(NodeId::from_raw(round * 100 + j)),
                    "round {round} key seg{j}"
                );
            }
        }
    }
    assert!(index.is_promoted());
    assert_eq!(index.len(), 12);
}

#[test]
fn cache_index_when_key_added_then_removed_then_nothing_remains() {
    let mut index = CacheIndex::new();
    index.add("/a/b/c", "GET:/a/b/c");
    index.add("/a/b", "GET:/a/b");

    let mut keys = Vec::new();
    index.collect_prefix("/a", "GET:", &mut keys);
    keys.sort();
    assert_eq!(keys, ["GET:/a/b", "GET:/a/b/c"]);

    index.remove("/a/b/c", "GET:/a/b/c");
    let mut keys = Vec::new();
    index.collect_exact("/a/b/c", "", &mut keys);
    assert!(keys.is_empty());
    assert_eq!(index.node_count(), 3);

    index.remove("/a/b", "GET:/a/b");
    assert!(index.is_empty());
    assert_eq!(index.node_count(), 1);
}
