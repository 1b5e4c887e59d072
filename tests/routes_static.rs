use bunner_route_engine::{HttpMethod, Router, RouterError, path::PathError, radix::RadixError};

fn sealed(routes: &[(HttpMethod, &str)]) -> Router<String> {
    let router = Router::new(None);
    for (method, path) in routes {
        router
            .add(*method, path, format!("{method} {path}"))
            .expect("route should register");
    }
    router.seal();
    router
}

#[test]
fn router_when_static_route_registered_then_matches_itself() {
    let paths = [
        "/",
        "/health",
        "/api/v1/users",
        "/api/v1/users/me",
        "/api/v2/users",
        "/assets/app.min.js",
        "/~user/profile",
    ];
    let router = Router::new(None);
    let keys: Vec<_> = paths
        .iter()
        .map(|p| {
            router
                .add(HttpMethod::Get, p, p.to_string())
                .expect("static route should register")
        })
        .collect();
    router.seal();

    for (path, key) in paths.iter().zip(keys) {
        let found = router
            .find(HttpMethod::Get, path)
            .expect("lookup should succeed")
            .expect("static route should match itself");
        assert_eq!(found.key, key);
        assert_eq!(found.handler.as_str(), *path);
        assert_eq!(found.pattern.as_ref(), *path);
        assert!(found.params.is_empty());
    }
}

#[test]
fn router_when_path_not_registered_then_returns_none() {
    let router = sealed(&[(HttpMethod::Get, "/api/v1/users")]);

    for path in ["/api", "/api/v1", "/api/v1/users/extra", "/other"] {
        let found = router
            .find(HttpMethod::Get, path)
            .expect("miss should not be an error");
        assert!(found.is_none(), "{path} should not match");
    }
}

#[test]
fn router_when_method_differs_then_returns_none() {
    let router = sealed(&[(HttpMethod::Post, "/submit")]);

    let found = router
        .find(HttpMethod::Get, "/submit")
        .expect("lookup should succeed");
    assert!(found.is_none());
    assert!(
        router
            .find(HttpMethod::Post, "/submit")
            .expect("lookup should succeed")
            .is_some()
    );
}

#[test]
fn router_when_same_path_has_multiple_methods_then_each_resolves() {
    let router = sealed(&[
        (HttpMethod::Get, "/items"),
        (HttpMethod::Post, "/items"),
        (HttpMethod::Delete, "/items"),
    ]);

    for method in [HttpMethod::Get, HttpMethod::Post, HttpMethod::Delete] {
        let found = router
            .find(method, "/items")
            .expect("lookup should succeed")
            .expect("route should match");
        assert_eq!(found.method, method);
        assert_eq!(found.handler.as_str(), format!("{method} /items"));
    }
}

#[test]
fn router_when_chains_share_a_prefix_then_both_resolve() {
    let router = sealed(&[
        (HttpMethod::Get, "/api/v1/users"),
        (HttpMethod::Get, "/api/v1/posts"),
        (HttpMethod::Get, "/api"),
        (HttpMethod::Get, "/api/v1/users/active"),
    ]);

    for path in [
        "/api/v1/users",
        "/api/v1/posts",
        "/api",
        "/api/v1/users/active",
    ] {
        let found = router
            .find(HttpMethod::Get, path)
            .expect("lookup should succeed")
            .expect("route should match");
        assert_eq!(found.pattern.as_ref(), path);
    }
    assert!(
        router
            .find(HttpMethod::Get, "/api/v1")
            .expect("lookup should succeed")
            .is_none()
    );
}

#[test]
fn router_when_many_siblings_registered_then_all_resolve_after_promotion() {
    let router = Router::new(None);
    for i in 0..64 {
        router
            .add(HttpMethod::Get, &format!("/many/child{i}"), i)
            .expect("sibling should register");
    }
    router.seal();

    for i in 0..64 {
        let found = router
            .find(HttpMethod::Get, &format!("/many/child{i}"))
            .expect("lookup should succeed")
            .expect("sibling should match");
        assert_eq!(*found.handler, i);
    }
    assert!(
        router
            .find(HttpMethod::Get, "/many/child64")
            .expect("lookup should succeed")
            .is_none()
    );
}

#[test]
fn router_when_duplicate_static_route_added_then_returns_conflict() {
    let router = Router::new(None);
    let first = router
        .add(HttpMethod::Get, "/dup", "first")
        .expect("first registration should succeed");

    match router.add(HttpMethod::Get, "/dup", "second") {
        Err(RouterError::Radix(RadixError::DuplicateRoute {
            method,
            path,
            existing_key,
        })) => {
            assert_eq!(method, HttpMethod::Get);
            assert_eq!(path, "/dup");
            assert_eq!(existing_key, first);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn router_when_duplicate_slashes_requested_then_collapses_them() {
    let router = sealed(&[(HttpMethod::Get, "/a/b")]);

    let found = router
        .find(HttpMethod::Get, "//a///b")
        .expect("lookup should succeed");
    assert!(found.is_some());
}

#[test]
fn router_when_case_differs_then_matches_by_default() {
    let router = sealed(&[(HttpMethod::Get, "/Docs/Index")]);

    assert!(
        router
            .find(HttpMethod::Get, "/docs/index")
            .expect("lookup should succeed")
            .is_some()
    );
    assert!(
        router
            .find(HttpMethod::Get, "/DOCS/INDEX")
            .expect("lookup should succeed")
            .is_some()
    );
}

#[test]
fn router_when_registration_contains_disallowed_character_then_returns_error() {
    let router = Router::new(None);
    match router.add(HttpMethod::Get, "/bad<name>", ()) {
        Err(RouterError::Radix(RadixError::Path(PathError::DisallowedCharacter {
            character,
            ..
        }))) => assert_eq!(character, '<'),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn router_when_registration_path_is_empty_or_relative_then_returns_error() {
    let router = Router::new(None);
    match router.add(HttpMethod::Get, "", ()) {
        Err(RouterError::Radix(RadixError::Path(PathError::Empty))) => {}
        other => panic!("unexpected result: {other:?}"),
    }
    match router.add(HttpMethod::Get, "relative", ()) {
        Err(RouterError::Radix(RadixError::Path(PathError::MissingLeadingSlash { input }))) => {
            assert_eq!(input, "relative")
        }
        other => panic!("unexpected result: {other:?}"),
    }
    match router.add(HttpMethod::Get, "/caf\u{e9}", ()) {
        Err(RouterError::Radix(RadixError::Path(PathError::NonAscii { .. }))) => {}
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn router_when_request_path_invalid_then_returns_path_error() {
    let router = sealed(&[(HttpMethod::Get, "/ok")]);

    match router.find(HttpMethod::Get, "/ok?x=1") {
        Err(RouterError::Path(PathError::DisallowedCharacter { character, .. })) => {
            assert_eq!(character, '?')
        }
        other => panic!("unexpected result: {other:?}"),
    }
    match router.find(HttpMethod::Get, "/a/../ok") {
        Err(RouterError::Path(PathError::InvalidParentTraversal { .. })) => {}
        other => panic!("unexpected result: {other:?}"),
    }
    match router.find(HttpMethod::Get, "") {
        Err(RouterError::Path(PathError::Empty)) => {}
        other => panic!("unexpected result: {other:?}"),
    }
}
