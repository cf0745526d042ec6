//! Property-based tests for rendering, parsing and resolution.
//!
//! Values are generated component by component, rendered, and checked to
//! parse back to the same components. Resolution properties use targets that
//! share the base authority.

use proptest::prelude::*;

use uri_trail::{FormUri, QueryMap, QueryValue, Uri, UriBuilder, UriReference};

/// Strategies for generating component values.
mod strategies {
    use super::*;

    /// A non-empty scheme, or the empty scheme-relative marker
    pub fn scheme() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-zA-Z][a-zA-Z0-9+.-]{0,6}",
            Just(String::new()),
        ]
    }

    /// Hosts without the characters the authority grammar reserves
    pub fn host() -> impl Strategy<Value = String> {
        "[a-z0-9._~ \u{e9}\u{103}-]{1,12}"
    }

    /// Any printable text; encoded on output
    pub fn credential() -> impl Strategy<Value = String> {
        "\\PC{0,8}"
    }

    /// A non-empty decoded path segment, slashes included
    pub fn segment() -> impl Strategy<Value = String> {
        "\\PC{1,8}"
    }

    /// A segment that reads well in a path
    pub fn plain_segment() -> impl Strategy<Value = String> {
        "[a-z0-9]{1,4}"
    }

    /// Raw query text; `#` would start the fragment
    pub fn query() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9=&%+ ?/\u{e9}]{0,12}"
    }

    /// Raw fragment text
    pub fn fragment() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9=&%+ ?/#\u{e9}]{0,12}"
    }

    /// Rooted or relative path text built from segments
    pub fn path(rooted: bool) -> impl Strategy<Value = String> {
        (prop::collection::vec(segment(), 0..4), any::<bool>()).prop_map(move |(segments, trailing)| {
            let mut segments = segments;
            if trailing && !segments.is_empty() {
                segments.push(String::new());
            }
            let joined = segments
                .iter()
                .map(|s| s.replace('/', "\u{2215}"))
                .collect::<Vec<_>>()
                .join("/");
            if rooted {
                format!("/{joined}")
            } else {
                joined
            }
        })
    }

    /// A small nested mapping with non-empty nested levels
    pub fn query_map() -> impl Strategy<Value = QueryMap> {
        let leaf = "\\PC{0,6}".prop_map(QueryValue::Text);
        let nested = prop::collection::vec(("[a-z0-9]{1,4}", "\\PC{0,6}"), 1..3).prop_map(|pairs| {
            QueryValue::Map(
                pairs
                    .into_iter()
                    .map(|(k, v)| (k, QueryValue::Text(v)))
                    .collect(),
            )
        });
        prop::collection::vec(("[a-z]{1,6}", prop_oneof![leaf, nested]), 0..4)
            .prop_map(|pairs| pairs.into_iter().collect())
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// URIs with an authority render and parse back to the same components
    #[test]
    fn authority_uri_round_trip(
        scheme in proptest::option::of(strategies::scheme()),
        host in strategies::host(),
        port in proptest::option::of(any::<u16>()),
        credentials in proptest::option::of((strategies::credential(), proptest::option::of(strategies::credential()))),
        path in strategies::path(true),
        query in proptest::option::of(strategies::query()),
        fragment in proptest::option::of(strategies::fragment()),
    ) {
        let mut builder = UriBuilder::new().host(host).maybe_port(port).path(path);
        if let Some(scheme) = scheme {
            builder = builder.scheme(scheme);
        }
        if let Some((user, pass)) = credentials {
            builder = builder.user(user);
            if let Some(pass) = pass {
                builder = builder.pass(pass);
            }
        }
        let uri: Uri = builder.maybe_query(query).maybe_fragment(fragment).build().unwrap();

        let rendered = uri.to_uri_string().to_string();
        let reparsed = Uri::parse(&rendered).unwrap();
        prop_assert_eq!(&reparsed, &uri);
        prop_assert_eq!(reparsed.to_uri_string(), rendered.as_str());
    }

    /// A host roots any relative path it is given
    #[test]
    fn host_with_relative_path_round_trip(
        host in strategies::host(),
        path in strategies::path(false),
    ) {
        let uri: Uri = UriBuilder::new().host(host).path(path).build().unwrap();
        prop_assert!(!uri.has_path() || uri.is_path_rooted());

        let reparsed = Uri::parse(uri.to_uri_string()).unwrap();
        prop_assert_eq!(reparsed, uri);
    }

    /// URIs without an authority render and parse back to the same components
    #[test]
    fn path_uri_round_trip(
        scheme in proptest::option::of(strategies::scheme()),
        rooted in any::<bool>(),
        segments in prop::collection::vec(strategies::segment(), 0..4),
        query in proptest::option::of(strategies::query()),
    ) {
        let mut uri = Uri::new();
        uri.set_scheme(scheme.as_deref()).unwrap();
        uri.set_path_trail(segments);
        uri.path_trail_mut().set_rooted(rooted);
        uri.set_query_string(query.as_deref()).unwrap();

        let reparsed = Uri::parse(uri.to_uri_string()).unwrap();
        prop_assert_eq!(reparsed, uri);
    }

    /// Structured queries survive rendering and decoding
    #[test]
    fn form_query_round_trip(map in strategies::query_map()) {
        let mut uri = FormUri::default();
        uri.set_query(Some(map.clone())).unwrap();
        let reparsed = FormUri::parse_reference(uri.to_uri_string()).unwrap();
        prop_assert_eq!(reparsed.query(), Some(&map));
    }

    /// Relativizing against a base and composing back restores the target
    #[test]
    fn relativize_then_compose(
        base_dir in prop::collection::vec(strategies::plain_segment(), 0..3),
        base_doc in strategies::plain_segment(),
        target_dir in prop::collection::vec(strategies::plain_segment(), 0..4),
        target_doc in strategies::plain_segment(),
        target_query in proptest::option::of(strategies::query()),
    ) {
        let mut base = Uri::parse("scheme://host").unwrap();
        base.set_path(&format!("/{}", [base_dir, vec![base_doc]].concat().join("/")));
        let mut target = base.clone();
        target.set_path(&format!("/{}", [target_dir, vec![target_doc]].concat().join("/")));
        target.set_query_string(target_query.as_deref()).unwrap();

        let mut relative = target.clone();
        relative.make_relative_to_base(&base).unwrap();
        prop_assert!(!relative.has_host());

        relative.compose_with_base(&base).unwrap();
        prop_assert_eq!(relative.to_uri_string(), target.to_uri_string());
    }

    /// Qualified references never change when composed
    #[test]
    fn compose_keeps_qualified(
        host in strategies::host(),
        path in strategies::path(true),
        base_path in strategies::path(true),
    ) {
        let uri: Uri = UriBuilder::new().scheme("other").host(host).path(path).build().unwrap();
        let base: Uri = UriBuilder::new().scheme("s").host("h").path(base_path).build().unwrap();

        let mut composed = uri.clone();
        composed.compose_with_base(&base).unwrap();
        prop_assert_eq!(composed, uri);
    }

    /// Descending then ascending one level lands on the original directory
    #[test]
    fn descend_then_ascend(
        dir in prop::collection::vec(strategies::plain_segment(), 0..4),
        child in strategies::plain_segment(),
    ) {
        let mut uri = Uri::parse("s://h").unwrap();
        uri.set_path(&format!("/{}", dir.iter().map(|s| format!("{s}/")).collect::<String>()));
        let directory = uri.directory();

        uri.descend(&child).unwrap();
        prop_assert_eq!(uri.document(), child.as_str());
        uri.ascend(1).unwrap();
        prop_assert_eq!(uri.directory(), directory);
    }
}
