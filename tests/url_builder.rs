//! End-to-end behaviour of the URL builder: parsing, fluent mutation, and
//! serialization through the public API only.

use std::collections::BTreeMap;

use fluent_url::{Error, NullValueHandling, ParamValue, QueryParamCollection, Url};

mod roundtrip {
    use super::*;

    #[test]
    fn unmodified_urls_serialize_verbatim() {
        let corpus = [
            "http://www.mysite.com/more?x=1&y=2#foo",
            "https://user:pw@api.example.com:8443/v1/items/?sort=desc",
            "http://www.mysite.com/%C3%A9t%C3%A9?q=%e2%9c%93",
            "HTTPS://Example.COM/CaseStays",
            "http://example.com/a//b///c",
            "http://example.com?x&y=&z=1",
            "http://example.com?x=1&&y=2",
            "http://[2001:db8::1]:8080/ipv6",
            "ftp://ftp.example.com/pub/file.txt",
            "//protocol-relative.com/x",
            "/root/relative?x=1",
            "relative/path/",
            "?just=query",
            "#just-fragment",
            "news:comp.lang.rust",
            "file:///home/me/.profile",
        ];
        for s in corpus {
            assert_eq!(Url::parse(s).to_string(), s, "round-trip of {s:?}");
        }
    }

    #[test]
    fn parse_via_from_str_and_from() {
        let a: Url = "http://x.com/a".parse().unwrap();
        let b = Url::from("http://x.com/a");
        let c = Url::from(String::from("http://x.com/a"));
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(String::from(&a), "http://x.com/a");
        assert_eq!(String::from(a), "http://x.com/a");
    }

    #[test]
    fn encoded_query_values_survive_modification_elsewhere() {
        let mut url = Url::parse("http://x.com/a?q=%E4%BD%A0+%26&keep=1");
        url.append_path_segment("b", false).set_query_param("new", "v");
        assert_eq!(url.to_string(), "http://x.com/a/b?q=%E4%BD%A0+%26&keep=1&new=v");
        assert_eq!(url.query_params().first_or_default("q"), Some("你 &"));
    }
}

mod path {
    use super::*;

    #[test]
    fn append_is_indifferent_to_slashes() {
        let expected = "http://www.mysite.com/api/v1/users";
        for (base, seg) in [
            ("http://www.mysite.com/api", "v1/users"),
            ("http://www.mysite.com/api/", "v1/users"),
            ("http://www.mysite.com/api", "/v1/users"),
            ("http://www.mysite.com/api/", "/v1/users"),
        ] {
            let mut url = Url::parse(base);
            url.append_path_segment(seg, false);
            assert_eq!(url.to_string(), expected, "{base:?} + {seg:?}");
        }
    }

    #[test]
    fn trailing_slash_of_segment_is_kept() {
        let mut url = Url::parse("http://x.com");
        url.append_path_segment("a/", false);
        assert_eq!(url.to_string(), "http://x.com/a/");
        url.append_path_segment("b", false);
        assert_eq!(url.to_string(), "http://x.com/a/b");
    }

    #[test]
    fn fully_encoded_segment_stays_single() {
        let mut url = Url::parse("http://x.com");
        url.append_path_segment("a/b?c#d e", true);
        assert_eq!(url.to_string(), "http://x.com/a%2Fb%3Fc%23d%20e");
        assert_eq!(url.path_segments().len(), 1);
    }

    #[test]
    fn partially_encoded_segment_keeps_existing_escapes() {
        let mut url = Url::parse("http://x.com");
        url.append_path_segment("%20already encoded", false);
        assert_eq!(url.to_string(), "http://x.com/%20already%20encoded");
    }

    #[test]
    fn slash_only_segment_adds_nothing() {
        let mut url = Url::parse("http://x.com/a");
        url.append_path_segment("///", false);
        assert_eq!(url.path_segments().as_slice(), ["a"]);
    }

    #[test]
    fn path_after_query_change_keeps_query() {
        let mut url = Url::parse("http://x.com/a?x=1#f");
        url.append_path_segments(["b", "c"]);
        assert_eq!(url.to_string(), "http://x.com/a/b/c?x=1#f");
    }
}

mod query {
    use super::*;

    #[test]
    fn repeated_names_are_kept_in_order() {
        let url = Url::parse("http://x.com?x=1&y=2&x=3&x");
        let query = url.query_params();
        assert_eq!(query.len(), 4);
        assert_eq!(query.get_all("x"), vec![Some("1"), Some("3"), None]);
        assert_eq!(query.names().collect::<Vec<_>>(), ["x", "y", "x", "x"]);
        assert_eq!(query.try_get_first("y"), Some(Some("2")));
        assert_eq!(query.try_get_first("nope"), None);
        assert_eq!(query[1].name(), "y");
    }

    #[test]
    fn set_replaces_in_place() {
        let mut url = Url::parse("http://x.com?x=1&y=2&x=3");
        url.set_query_param("x", ["a", "b"]);
        assert_eq!(url.to_string(), "http://x.com?x=a&y=2&x=b");

        url.set_query_param("x", "only");
        assert_eq!(url.to_string(), "http://x.com?x=only&y=2");

        url.set_query_param("x", ["1", "2", "3"]);
        assert_eq!(url.to_string(), "http://x.com?x=1&y=2&x=2&x=3");
    }

    #[test]
    fn append_keeps_existing_values() {
        let mut url = Url::parse("http://x.com?x=1");
        url.append_query_param("x", [2, 3]).append_query_param("y", true);
        assert_eq!(url.to_string(), "http://x.com?x=1&x=2&x=3&y=true");
    }

    #[test]
    fn null_handling_on_set() {
        let base = "http://x.com?x=1&y=2";

        let mut url = Url::parse(base);
        url.set_query_param("x", None::<&str>);
        assert_eq!(url.to_string(), "http://x.com?y=2");

        let mut url = Url::parse(base);
        url.set_query_param_with("x", ParamValue::Null, false, NullValueHandling::NameOnly);
        assert_eq!(url.to_string(), "http://x.com?x&y=2");

        let mut url = Url::parse(base);
        url.set_query_param_with("x", ParamValue::Null, false, NullValueHandling::Ignore);
        assert_eq!(url.to_string(), base);
    }

    #[test]
    fn null_handling_on_set_params() {
        let values = [("x", ParamValue::from(1)), ("y", ParamValue::Null), ("z", "foo".into())];

        let mut url = Url::parse("http://x.com?y=2");
        url.set_query_params(values.clone()).unwrap();
        assert_eq!(url.to_string(), "http://x.com?x=1&z=foo");

        let mut url = Url::parse("http://x.com?y=2");
        url.set_query_params_with(values.clone(), NullValueHandling::NameOnly)
            .unwrap();
        assert_eq!(url.to_string(), "http://x.com?y&x=1&z=foo");

        let mut url = Url::parse("http://x.com?y=2");
        url.set_query_params_with(values, NullValueHandling::Ignore)
            .unwrap();
        assert_eq!(url.to_string(), "http://x.com?y=2&x=1&z=foo");
    }

    #[test]
    fn null_list_elements_become_bare_names_in_position() {
        let values = [Some("a"), Some("b"), None, Some("c")];

        let mut url = Url::parse("http://x.com");
        url.set_query_param("x", values);
        assert_eq!(url.to_string(), "http://x.com?x=a&x=b&x&x=c");

        let mut url = Url::parse("http://x.com");
        url.set_query_param_with("x", values, false, NullValueHandling::NameOnly);
        assert_eq!(url.to_string(), "http://x.com?x=a&x=b&x&x=c");

        let mut url = Url::parse("http://x.com");
        url.set_query_param_with("x", values, false, NullValueHandling::Ignore);
        assert_eq!(url.to_string(), "http://x.com?x=a&x=b&x=c");
    }

    #[test]
    fn null_slot_in_replacement_list() {
        let mut url = Url::parse("http://x.com?x=1&x=2&x=3");
        url.set_query_param_with("x", [Some("a"), None, Some("c")], false, NullValueHandling::Ignore);
        assert_eq!(url.to_string(), "http://x.com?x=a&x=2&x=c");

        let mut url = Url::parse("http://x.com?x=1&x=2&x=3");
        url.set_query_param("x", [Some("a"), None, Some("c")]);
        assert_eq!(url.to_string(), "http://x.com?x=a&x&x=c");
    }

    #[test]
    fn encoded_and_unencoded_values() {
        let mut url = Url::parse("http://x.com");
        url.set_query_param("x", "a&b=c d")
            .set_query_param_with("y", "%2F%20", true, NullValueHandling::Remove);
        assert_eq!(url.to_string(), "http://x.com?x=a%26b%3Dc%20d&y=%2F%20");
        assert_eq!(url.query_params().first_or_default("x"), Some("a&b=c d"));
        assert_eq!(url.query_params().first_or_default("y"), Some("/ "));
    }

    #[test]
    fn query_name_encodes_illegal_characters_only() {
        let mut url = Url::parse("http://x.com");
        url.set_query_param("a b[]", 1);
        assert_eq!(url.to_string(), "http://x.com?a%20b[]=1");
    }

    #[test]
    fn params_from_maps_strings_and_collections() {
        let mut map = BTreeMap::new();
        map.insert("b", "2");
        map.insert("a", "1");
        let mut url = Url::parse("http://x.com");
        url.set_query_params(&map).unwrap();
        assert_eq!(url.to_string(), "http://x.com?a=1&b=2");

        let mut url = Url::parse("http://x.com?a=0");
        url.set_query_params("a=1&flag").unwrap();
        assert_eq!(url.to_string(), "http://x.com?a=1");

        let other = QueryParamCollection::parse("c=3&d=%20");
        url.append_query_params(&other).unwrap();
        assert_eq!(url.to_string(), "http://x.com?a=1&c=3&d=%20");
    }

    #[test]
    fn missing_object_is_an_error_and_changes_nothing() {
        let mut url = Url::parse("http://x.com?a=1");
        let err = url.set_query_params(None::<Vec<(&str, i32)>>).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(err, Error::InvalidArgument {
            argument: "obj",
            reason: "cannot extract name/value pairs from a null object",
        });
        assert_eq!(url.to_string(), "http://x.com?a=1");
    }

    #[test]
    fn removal() {
        let mut url = Url::parse("http://x.com?a=1&b=2&a=3&c");
        url.remove_query_param("a");
        assert_eq!(url.to_string(), "http://x.com?b=2&c");
        url.remove_query_params(["b", "c", "missing"]);
        assert_eq!(url.to_string(), "http://x.com");
    }
}

mod fragment {
    use super::*;

    #[test]
    fn query_changes_leave_fragment_alone() {
        let mut url = Url::parse("http://x.com/a?x=1#frag?not=query");
        url.set_query_param("y", 2).remove_query_param("x");
        assert_eq!(url.to_string(), "http://x.com/a?y=2#frag?not=query");
        assert_eq!(url.fragment(), "frag?not=query");
    }

    #[test]
    fn fragment_is_not_encoded() {
        let mut url = Url::parse("http://x.com");
        url.set_fragment("a b");
        assert_eq!(url.to_string(), "http://x.com#a b");
    }
}

mod static_helpers {
    use super::*;

    #[test]
    fn combine_parts() {
        assert_eq!(
            Url::combine(["http://www.foo.com/", "/too/", "/many/", "/slashes/", "too", "few"]),
            "http://www.foo.com/too/many/slashes/too/few"
        );
        assert_eq!(
            Url::combine(["http://root.com", "segment?", "foo=bar", "x=1&y=2&"]),
            "http://root.com/segment?foo=bar&x=1&y=2&"
        );
        assert_eq!(
            Url::combine(["http://x.com", "a", "#frag", "ment"]),
            "http://x.com/a#fragment"
        );
    }

    #[test]
    fn plus_and_space() {
        assert_eq!(Url::decode("1+2", true), "1 2");
        assert_eq!(Url::decode("1+2", false), "1+2");
        assert_eq!(Url::decode("param_with_%2B", true), "param_with_+");
        assert_eq!(Url::encode("a b", true), "a+b");
        assert_eq!(Url::encode("a b", false), "a%20b");
        assert_eq!(Url::encode_illegal_characters("a b", true), "a+b");
    }

    #[test]
    fn plus_serialization_applies_to_path_and_new_values() {
        let mut url = Url::parse("http://x.com/a b");
        url.set_query_param("q", "x y");
        assert_eq!(url.to_string_with(true), "http://x.com/a+b?q=x+y");
        assert_eq!(url.to_string(), "http://x.com/a%20b?q=x%20y");
    }

    #[test]
    fn validity() {
        assert!(Url::is_valid("https://x.com/a?b=c"));
        assert!(!Url::is_valid("x.com/a"));
        assert!(!Url::is_valid("https://x.com/a b"));
    }

    #[test]
    fn root_of_string() {
        assert_eq!(Url::get_root("https://u:p@x.com:8080/a?b#c"), "https://u:p@x.com:8080");
    }

    #[test]
    fn encode_decode_long_strings() {
        let long = "é ".repeat(40_000);
        let encoded = Url::encode(&long, false);
        assert!(encoded.starts_with("%C3%A9%20"));
        assert_eq!(Url::decode(&encoded, false), long);
    }
}

#[cfg(feature = "serde")]
mod serde_support {
    use super::*;
    use fluent_url::Serialized;

    #[derive(serde::Serialize)]
    struct Filter {
        name: &'static str,
        page: Option<u32>,
        ids: Vec<u32>,
    }

    #[test]
    fn serialized_struct_sets_params_in_field_order() {
        let filter = Filter {
            name: "a b",
            page: None,
            ids: vec![1, 2],
        };
        let mut url = Url::parse("http://x.com?page=4");
        url.set_query_params(Serialized(&filter)).unwrap();
        assert_eq!(url.to_string(), "http://x.com?name=a%20b&ids=1&ids=2");
    }

    #[test]
    fn url_serializes_as_string() {
        let url = Url::parse("http://x.com/a?b=1");
        let json = serde_json::to_string(&url).unwrap();
        assert_eq!(json, "\"http://x.com/a?b=1\"");
        let back: Url = serde_json::from_str(&json).unwrap();
        assert_eq!(back, url);
    }

    #[test]
    fn null_value_handling_serializes_by_name() {
        let json = serde_json::to_string(&NullValueHandling::NameOnly).unwrap();
        assert_eq!(json, "\"NameOnly\"");
    }
}

#[cfg(feature = "http")]
mod http_support {
    use super::*;

    #[test]
    fn converts_to_and_from_http_uri() {
        let url = Url::parse("https://x.com/a?b=1");
        let uri = url.to_uri().unwrap();
        assert_eq!(uri.host(), Some("x.com"));
        assert_eq!(uri.path(), "/a");
        assert_eq!(Url::from(uri), url);
    }
}
