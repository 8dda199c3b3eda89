//! Route table properties exercised through the public API.

use std::sync::Arc;
use std::thread;

use segmux::routing::{ErrorKind, ParamValue, ServeMux};

type Mux = ServeMux<&'static str>;

#[test]
fn test_registered_patterns_resolve_to_their_handler() {
    let mux = Mux::new();
    let routes = [
        ("GET", "/", "root"),
        ("GET", "/a", "a"),
        ("GET", "/a/", "a-slash"),
        ("POST", "/a/b/:int", "ab-int"),
        ("DELETE", "/a/b/:int/c/:str/", "deep"),
        ("PATCH", "/x/:/y", "x-any-y"),
    ];
    for (method, pattern, handler) in routes {
        mux.handle(method, pattern, handler).unwrap();
    }

    assert_eq!(mux.resolve("GET", "/").unwrap().handler, "root");
    assert_eq!(mux.resolve("GET", "/a").unwrap().handler, "a");
    assert_eq!(mux.resolve("GET", "/a/").unwrap().handler, "a-slash");
    assert_eq!(mux.resolve("POST", "/a/b/-3").unwrap().handler, "ab-int");

    let deep = mux.resolve("DELETE", "/a/b/12/c/abc/").unwrap();
    assert_eq!(deep.handler, "deep");
    assert_eq!(deep.params.get(0), Some(&ParamValue::Int(12)));
    assert_eq!(deep.params.get(1), Some(&ParamValue::Str("abc".into())));

    let any = mux.resolve("PATCH", "/x/anything/y").unwrap();
    assert_eq!(any.params.str(0), Some("anything"));
}

#[test]
fn test_duplicate_keeps_tree_identical() {
    let mux = Mux::new();
    mux.handle("GET", "/catalog/:int/", "first").unwrap();
    let before = mux.snapshot();

    let err = mux.handle("GET", "/catalog/:int/", "second").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateHandler);
    assert_eq!(
        err.to_string(),
        "mux: handler (GET) /catalog/:int/ error: duplicate handler"
    );
    assert_eq!(mux.snapshot(), before);
}

#[test]
fn test_partial_pattern_creates_nothing() {
    let mux = Mux::new();
    mux.handle("GET", "/a/b", "ab").unwrap();
    let before = mux.snapshot();

    let cases = [
        ("/a/b/c/d/:mem", ErrorKind::InvalidPathParam),
        ("/a/:int", ErrorKind::MultiplePathParamTypes),
        ("/a/b/c//", ErrorKind::InvalidPattern),
    ];
    for (pattern, kind) in cases {
        assert_eq!(mux.handle("GET", pattern, "bad").unwrap_err().kind(), kind, "{pattern}");
        assert_eq!(mux.snapshot(), before, "{pattern}");
    }
}

#[test]
fn test_concurrent_registration_and_dispatch() {
    let mux = Arc::new(Mux::new());
    mux.handle("GET", "/stable/:int", "stable").unwrap();

    let writer = {
        let mux = mux.clone();
        thread::spawn(move || {
            for i in 0..200 {
                let pattern = format!("/r{}/:int", i);
                mux.handle("GET", &pattern, "dyn").unwrap();
                // conflicting retype, always rejected
                assert!(mux.handle("GET", &format!("/r{}/:str", i), "bad").is_err());
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let mux = mux.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    let resolved = mux.resolve("GET", "/stable/1").unwrap();
                    assert_eq!(resolved.handler, "stable");
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    for i in 0..200 {
        assert_eq!(mux.resolve("GET", &format!("/r{}/9", i)).unwrap().handler, "dyn");
        assert!(mux.resolve("GET", &format!("/r{}/x", i)).is_err());
    }
}
