use dotprop_core::{
    Delimiter, Fallback, FlattenOptions, GetArgs, GetOptions, JsonKind, KeySelector, RecordExt,
    SequenceMode, bind, deep_clone, flatten, flatten_with, get, get_or, get_prop, get_with,
    list_children, resolve, resolve_mut, set, set_with, unflatten, unflatten_with,
};
use serde_json::{Value, json};

#[test]
fn resolve_walks_mappings_and_sequence_indices() {
    let d = Delimiter::default();
    let r = json!({"a": {"b": [10, {"c": "deep"}]}});
    assert_eq!(resolve(&r, "a.b.0", &d), Some(&json!(10)));
    assert_eq!(resolve(&r, "a.b.1.c", &d), Some(&json!("deep")));
    assert_eq!(resolve(&r, "this", &d), Some(&r));
    // lookups on leaves, missing keys and bad indices stop the walk
    assert_eq!(resolve(&r, "a.b.0.x", &d), None);
    assert_eq!(resolve(&r, "a.z", &d), None);
    assert_eq!(resolve(&r, "a.b.9", &d), None);
    assert_eq!(resolve(&r, "a.b.first", &d), None);
    assert_eq!(resolve(&Value::Null, "this", &d), None);
}

#[test]
fn resolve_mut_edits_in_place() {
    let d = Delimiter::default();
    let mut r = json!({"a": {"b": 1}});
    *resolve_mut(&mut r, "a.b", &d).unwrap() = json!(5);
    assert_eq!(r, json!({"a": {"b": 5}}));
}

#[test]
fn custom_delimiter_and_empty_delimiter() {
    let d = Delimiter::new("/").unwrap();
    let r = json!({"a.b": {"c": 1}});
    assert_eq!(resolve(&r, "a.b/c", &d), Some(&json!(1)));
    assert_eq!(dotprop_core::segments("x/y/z", &d), vec!["x", "y", "z"]);
    assert!(matches!(Delimiter::new(""), Err(dotprop_core::PropError::EmptyDelimiter)));
    assert!("".parse::<Delimiter>().is_err());
}

#[test]
fn get_first_truthy_candidate_wins() {
    let r = json!({"a": {"b": 1, "c": 2}});
    assert_eq!(get(&r, ["a.x", "a.b", "a.c"]), Some(&json!(1)));
    assert_eq!(get(&r, ["a.c", "a.b"]), Some(&json!(2)));
    assert_eq!(get(&r, ["a.b.c.d"]), None);
}

#[test]
fn get_default_when_nothing_resolves() {
    let r = json!({"a": {"b": 1}});
    assert_eq!(get_or(&r, ["a.e", "x.y"], Value::Null), Value::Null);
    assert_eq!(get_or(&r, ["a.e", "x.y"], "fallback"), json!("fallback"));
    // a falsy record short-circuits to the default
    assert_eq!(get_or(&json!(0), ["this"], "d"), json!("d"));
    assert_eq!(get_or(&Value::Null, ["a"], 7), json!(7));
}

#[test]
fn get_treats_falsy_values_as_missing_by_default() {
    let r = json!({"zero": 0, "empty": "", "no": false, "nil": null, "list": [], "obj": {}, "yes": "y"});
    for key in ["zero", "empty", "no", "nil"] {
        assert_eq!(get(&r, [key, "yes"]), Some(&json!("y")), "key {key}");
    }
    assert_eq!(get(&r, ["list", "yes"]), Some(&json!([])));
    assert_eq!(get(&r, ["obj", "yes"]), Some(&json!({})));

    let exists = GetOptions { fallback: Fallback::Exists, ..GetOptions::default() };
    assert_eq!(get_with(&r, ["zero", "yes"], &exists), Some(&json!(0)));
    assert_eq!(get_with(&r, ["nil", "yes"], &exists), Some(&Value::Null));
    assert_eq!(get_with(&r, ["missing", "no"], &exists), Some(&json!(false)));
}

#[test]
fn get_prop_macro_forms() {
    let r = json!({"a": {"b": 1}});
    assert_eq!(get_prop!(&r, "a.x", "a.b"), Some(&json!(1)));
    assert_eq!(get_prop!(&r, "a.x"), None);
    assert_eq!(get_prop!(&r, "a.e", "x.y"; "fallback"), json!("fallback"));
    assert_eq!(get_prop!(&r, "a.b"; 0), json!(1));
}

#[test]
fn get_args_positional_convention() {
    let r = json!({"a": {"b": 1, "c": 2}});
    let opts = GetOptions::default();

    let variadic = GetArgs::from_values(vec![json!("a.x"), json!("a.c"), json!(9)]);
    assert_eq!(variadic.paths, vec![json!("a.x"), json!("a.c")]);
    assert_eq!(variadic.default, json!(9));
    assert_eq!(variadic.eval(&r, &opts), json!(2));

    // trailing string stays a candidate
    let all_paths = GetArgs::from_values(vec![json!("a.x"), json!("fallback")]);
    assert_eq!(all_paths.default, Value::Null);
    assert_eq!(all_paths.eval(&r, &opts), Value::Null);

    // a single non-string argument is a candidate, never a default
    let single = GetArgs::from_values(vec![json!(5)]);
    assert_eq!(single.paths, vec![json!(5)]);
    assert_eq!(single.eval(&r, &opts), Value::Null);

    let listed = GetArgs::from_values(vec![json!(["a.x", "a.y"]), json!("d")]);
    assert_eq!(listed.paths, vec![json!("a.x"), json!("a.y")]);
    assert_eq!(listed.eval(&r, &opts), json!("d"));

    let listed_no_default = GetArgs::from_values(vec![json!(["a.b"])]);
    assert_eq!(listed_no_default.default, Value::Null);
    assert_eq!(listed_no_default.eval(&r, &opts), json!(1));

    assert_eq!(GetArgs::from_values(vec![]), GetArgs::default());
}

#[test]
fn set_then_get_round_trips() {
    let mut r = json!({"a": {"b": 1}});
    assert_eq!(set(&mut r, "a.c", json!(2)).unwrap(), &json!(2));
    assert_eq!(get(&r, ["a.c"]), Some(&json!(2)));
    assert_eq!(set(&mut r, "a.b", json!("new")).unwrap(), &json!("new"));
    assert_eq!(get(&r, ["a.b"]), Some(&json!("new")));
    // single segment assigns on the record itself
    set(&mut r, "top", json!(true)).unwrap();
    assert_eq!(r, json!({"a": {"b": "new", "c": 2}, "top": true}));
}

#[test]
fn set_is_strict_and_leaves_record_unchanged() {
    let mut r = json!({"a": {"b": 1}});
    let before = r.clone();
    let err = set(&mut r, "a.x.y", json!(2)).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(r, before);

    // a leaf in the middle of the path is reported as not found too
    let err = set(&mut r, "a.b.c", json!(2)).unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, dotprop_core::PropError::NotAContainer { .. }));
    assert_eq!(r, before);

    let mut nothing = Value::Null;
    assert!(set(&mut nothing, "a", json!(1)).is_err());
    assert!(set(&mut json!(3), "a", json!(1)).is_err());
}

#[test]
fn set_into_sequences() {
    let mut r = json!({"list": [1, 2]});
    set(&mut r, "list.0", json!(10)).unwrap();
    set(&mut r, "list.2", json!(30)).unwrap();
    assert_eq!(r, json!({"list": [10, 2, 30]}));
    assert!(set(&mut r, "list.9", json!(0)).unwrap_err().is_not_found());
    assert!(set(&mut r, "list.x", json!(0)).is_err());
}

#[test]
fn set_with_custom_delimiter() {
    let d = Delimiter::new("::").unwrap();
    let mut r = json!({"a": {"b.c": 1}});
    set_with(&mut r, "a::b.c", json!(2), &d).unwrap();
    assert_eq!(r, json!({"a": {"b.c": 2}}));
}

#[test]
fn deep_clone_is_independent() {
    let r = json!({"a": [1, {"b": 2}], "c": {"d": null}});
    let mut copy = deep_clone(&r);
    assert_eq!(copy, r);
    assert_eq!(deep_clone(&copy), copy);
    set(&mut copy, "a.1.b", json!(99)).unwrap();
    set(&mut copy, "c.d", json!("x")).unwrap();
    assert_eq!(r, json!({"a": [1, {"b": 2}], "c": {"d": null}}));
    assert_eq!(deep_clone(&json!("leaf")), json!("leaf"));
}

#[test]
fn flatten_and_unflatten_examples() {
    let r = json!({"a": 1, "b": {"c": 2, "d": 3}});
    let flat = flatten(&r);
    assert_eq!(Value::Object(flat.clone()), json!({"a": 1, "b.c": 2, "b.d": 3}));
    assert_eq!(unflatten(&flat), r);
}

#[test]
fn flatten_round_trip_deep_and_empty_containers() {
    let r = json!({
        "server": {"http": {"port": 8080, "tls": {"on": false}}, "name": "edge"},
        "empty_map": {},
        "empty_list": [],
        "zero": 0,
        "nil": null
    });
    let flat = flatten(&r);
    assert_eq!(flat.get("server.http.tls.on"), Some(&json!(false)));
    assert_eq!(flat.get("empty_map"), Some(&json!({})));
    assert_eq!(flat.get("empty_list"), Some(&json!([])));
    assert_eq!(unflatten(&flat), r);
}

#[test]
fn flatten_sequences_by_index_or_as_leaves() {
    let r = json!({"a": [1, {"b": 2}]});
    let indexed = flatten(&r);
    assert_eq!(Value::Object(indexed.clone()), json!({"a.0": 1, "a.1.b": 2}));
    assert_eq!(unflatten(&indexed), r);

    let opts = FlattenOptions { sequences: SequenceMode::Leaf, ..FlattenOptions::default() };
    let kept = flatten_with(&r, &opts);
    assert_eq!(Value::Object(kept.clone()), json!({"a": [1, {"b": 2}]}));
    assert_eq!(unflatten(&kept), r);

    // root sequences are always indexed
    assert_eq!(Value::Object(flatten_with(&json!([7, 8]), &opts)), json!({"0": 7, "1": 8}));
    assert!(flatten(&json!(42)).is_empty());
}

#[test]
fn flatten_round_trip_with_nested_sequences() {
    let r = json!({
        "tags": ["x", "y"],
        "a": {"b": 1},
        "matrix": [[1, 2], [3]],
        "items": [{"id": 1, "labels": ["p"]}, {"id": 2, "labels": []}]
    });
    let flat = flatten(&r);
    assert_eq!(flat.get("tags.1"), Some(&json!("y")));
    assert_eq!(flat.get("matrix.0.1"), Some(&json!(2)));
    assert_eq!(flat.get("items.1.labels"), Some(&json!([])));
    assert_eq!(unflatten(&flat), r);
}

#[test]
fn unflatten_rebuilds_sequences_only_for_complete_index_keys() {
    let flat = json!({"full.1": "b", "full.0": "a", "sparse.0": 1, "sparse.2": 3, "named.0": 1, "named.x": 2});
    assert_eq!(
        unflatten(flat.as_object().unwrap()),
        json!({"full": ["a", "b"], "sparse": {"0": 1, "2": 3}, "named": {"0": 1, "x": 2}})
    );
    // the root stays a mapping even when its keys are indices
    assert_eq!(unflatten(json!({"0": 7, "1": 8}).as_object().unwrap()), json!({"0": 7, "1": 8}));
}

#[test]
fn unflatten_splits_on_first_delimiter_only() {
    let d = Delimiter::new("__").unwrap();
    let flat = json!({"a__b__c": 1, "a__d": 2, "e": 3});
    let nested = unflatten_with(flat.as_object().unwrap(), &d);
    assert_eq!(nested, json!({"a": {"b": {"c": 1}, "d": 2}, "e": 3}));

    let opts = FlattenOptions { delimiter: d.clone(), ..FlattenOptions::default() };
    assert_eq!(Value::Object(flatten_with(&nested, &opts)), flat);
}

#[test]
fn unflatten_nested_group_replaces_plain_value() {
    let flat = json!({"a": 1, "a.b": 2});
    assert_eq!(unflatten(flat.as_object().unwrap()), json!({"a": {"b": 2}}));
}

#[test]
fn bind_modes() {
    let source = json!({"x": 10, "y": 20, "z": 30});

    let mut target = json!({"x": 1, "y": 2});
    bind(&mut target, &source, &KeySelector::TargetShape).unwrap();
    assert_eq!(target, json!({"x": 10, "y": 20}));

    let mut target = json!({"x": 1, "y": 2});
    bind(&mut target, &source, &KeySelector::All).unwrap();
    assert_eq!(target, json!({"x": 10, "y": 20, "z": 30}));

    let mut target = json!({"x": 1, "y": 2});
    bind(&mut target, &source, &KeySelector::Keys(vec!["z".into()])).unwrap();
    assert_eq!(target, json!({"x": 1, "y": 2, "z": 30}));

    let mut target = json!({"x": 1});
    bind(&mut target, &source, &KeySelector::Keys(vec!["missing".into()])).unwrap();
    assert_eq!(target, json!({"x": 1, "missing": null}));
}

#[test]
fn bind_is_shallow_and_rejects_non_mappings() {
    let source = json!({"nested": {"k": 1}});
    let mut target = json!({"nested": null});
    let bound = bind(&mut target, &source, &KeySelector::default()).unwrap();
    assert_eq!(*bound, json!({"nested": {"k": 1}}));

    let mut list = json!([1, 2]);
    assert!(bind(&mut list, &source, &KeySelector::All).is_none());
    assert_eq!(list, json!([1, 2]));
    let mut obj = json!({"a": 1});
    assert!(bind(&mut obj, &json!("str"), &KeySelector::All).is_none());
    assert_eq!(obj, json!({"a": 1}));
}

#[test]
fn key_selector_parsing() {
    assert_eq!(KeySelector::parse("*"), KeySelector::All);
    assert_eq!(KeySelector::parse(" * "), KeySelector::All);
    assert_eq!(
        KeySelector::parse("a, b,,c"),
        KeySelector::Keys(vec!["a".into(), "b".into(), "c".into()])
    );
    assert_eq!("x".parse::<KeySelector>().unwrap(), KeySelector::Keys(vec!["x".into()]));
}

#[test]
fn record_ext_methods() {
    let mut r = json!({"a": {"b": 0, "c": "c"}});
    assert_eq!(r.get_prop(["a.b", "a.c"]), Some(&json!("c")));
    assert_eq!(r.get_prop_or(["a.z"], 1), json!(1));
    r.set_prop("a.b", json!(5)).unwrap();
    assert_eq!(r.deep_clone(), json!({"a": {"b": 5, "c": "c"}}));

    let flat = r.flatten();
    assert_eq!(Value::Object(flat.clone()).unflatten(), Some(r.clone()));
    assert_eq!(json!([1]).unflatten(), None);

    let mut t = json!({"a": null});
    t.bind_prop(&r, &KeySelector::TargetShape).unwrap();
    assert_eq!(t, r);
}

#[test]
fn list_children_reports_kinds() {
    let d = Delimiter::default();
    let r = json!({"a": {"b": [1, 2, 3], "c": true, "d": {"e": null}}});
    let kids = list_children(&r, "a", &d).unwrap();
    let b = kids.iter().find(|c| c.key_or_index == "b").unwrap();
    assert_eq!(b.kind, JsonKind::Array);
    assert_eq!(b.len, Some(3));
    let c = kids.iter().find(|c| c.key_or_index == "c").unwrap();
    assert_eq!(c.kind, JsonKind::Bool);
    assert_eq!(c.len, None);

    let items = list_children(&r, "a.b", &d).unwrap();
    assert_eq!(items.iter().map(|c| c.key_or_index.as_str()).collect::<Vec<_>>(), ["0", "1", "2"]);
    assert!(list_children(&r, "a.c", &d).unwrap().is_empty());
    assert!(list_children(&r, "a.zz", &d).unwrap_err().is_not_found());
    assert_eq!(list_children(&r, "this", &d).unwrap().len(), 1);
}

#[test]
fn read_and_write_records() {
    use dotprop_core::{read_record, write_record};
    use tempfile::tempdir;

    let dir = tempdir().unwrap();
    let src = dir.path().join("in.json");
    std::fs::write(&src, r#"{"a":{"b":1}}"#).unwrap();
    let mut v = read_record(&src).expect("load json");
    set(&mut v, "a.b", json!(2)).unwrap();

    let out = dir.path().join("out.json");
    write_record(&out, &v).unwrap();
    assert_eq!(read_record(&out).unwrap(), json!({"a": {"b": 2}}));

    let missing = read_record(&dir.path().join("nope.json")).unwrap_err();
    assert!(missing.is_input_error());
    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{not json").unwrap();
    assert!(matches!(read_record(&bad), Err(dotprop_core::PropError::Json { .. })));
}
