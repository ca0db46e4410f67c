use super::*;

fn leaf(s: &str) -> Value<PairList> {
    Value::Leaf(s.to_string())
}

fn group(pairs: &[(&str, Value<PairList>)]) -> Value<PairList> {
    Value::Group(PairList(
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
    ))
}

const ENTITIES: &str = r#"
    entity ( name "Name 1 (Info)" description "Description 1"
      rom ( name "ROM Name 1" size 1048576 crc BB71B532 md5 BCF1218706E9B547EAB9E4BE58D54E2 sha1 5478015A91442E56BD76AF39447BCA365E06C272 flags verified ) )
    entity (
        name
        "Name  2"
        description
        "Description 2"
    )
"#;

#[test]
fn test_parse_entities_tree() {
    let pairs: Vec<_> = parse(ENTITIES.lines()).collect();
    let expected = vec![
        (
            "entity".to_string(),
            group(&[
                ("name", leaf("Name 1 (Info)")),
                ("description", leaf("Description 1")),
                (
                    "rom",
                    group(&[
                        ("name", leaf("ROM Name 1")),
                        ("size", leaf("1048576")),
                        ("crc", leaf("BB71B532")),
                        ("md5", leaf("BCF1218706E9B547EAB9E4BE58D54E2")),
                        ("sha1", leaf("5478015A91442E56BD76AF39447BCA365E06C272")),
                        ("flags", leaf("verified")),
                    ]),
                ),
            ]),
        ),
        (
            "entity".to_string(),
            group(&[
                ("name", leaf("Name  2")),
                ("description", leaf("Description 2")),
            ]),
        ),
    ];
    assert_eq!(pairs, expected);
}

#[test]
fn test_duplicate_keys_kept_in_list() {
    let pairs: Vec<_> = parse([r#"game ( name "A" name "B" )"#]).collect();
    let Value::Group(game) = &pairs[0].1 else {
        panic!("expected group");
    };
    assert_eq!(game.len(), 2);
    assert_eq!(game.get("name"), Some(&leaf("A")));
    let names: Vec<_> = game.get_all("name").filter_map(Value::as_leaf).collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn test_map_last_write_wins() {
    let pairs: Vec<(String, Value<PairMap>)> =
        parse_with([r#"game ( name "A" size 1 name "B" )"#]).collect();
    let game = pairs[0].1.as_group().unwrap();
    assert_eq!(game.len(), 2);
    assert_eq!(game.get("name").and_then(Value::as_leaf), Some("B"));
    // The key keeps its first position.
    let keys: Vec<_> = game.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["name", "size"]);
}

#[test]
fn test_list_converts_to_map() {
    let lines = [
        r#"game ( name "A" rom ( name a crc 1 crc 2 ) name "B" )"#,
        r#"game ( name "C" )"#,
    ];
    let converted: Vec<(String, Value<PairMap>)> = parse(lines)
        .map(|(key, value)| (key, value.into()))
        .collect();
    let parsed: Vec<(String, Value<PairMap>)> = parse_with(lines).collect();
    assert_eq!(converted, parsed);
}

#[test]
fn test_parse_to_maps_keeps_top_level_duplicates() {
    let maps: Vec<PairMap> =
        parse_to_maps([r#"game ( name "A" )"#, r#"game ( name "B" )"#]).collect();
    assert_eq!(maps.len(), 2);
    for (map, name) in maps.iter().zip(["A", "B"]) {
        assert_eq!(map.len(), 1);
        let game = map.get("game").and_then(Value::as_group).unwrap();
        assert_eq!(game.get("name").and_then(Value::as_leaf), Some(name));
    }
}

#[test]
fn test_dangling_key_dropped() {
    let pairs: Vec<_> = parse(["name \"X\" description"]).collect();
    assert_eq!(pairs, vec![("name".to_string(), leaf("X"))]);
}

#[test]
fn test_dangling_key_inside_unclosed_group() {
    let pairs: Vec<_> = parse(["game ( name \"X\" description"]).collect();
    assert_eq!(pairs, vec![("game".to_string(), group(&[("name", leaf("X"))]))]);
}

#[test]
fn test_stray_close_ends_top_level() {
    let pairs: Vec<_> = parse(["a 1 ) b 2"]).collect();
    assert_eq!(pairs, vec![("a".to_string(), leaf("1"))]);
}

#[test]
fn test_quoted_parens_are_structural_after_tokenizing() {
    // Quoting is not remembered once tokens are produced.
    let pairs: Vec<_> = parse([r#"a "(" b 1 ) c 2"#]).collect();
    assert_eq!(
        pairs,
        vec![
            ("a".to_string(), group(&[("b", leaf("1"))])),
            ("c".to_string(), leaf("2")),
        ]
    );
}

#[test]
fn test_empty_group() {
    let pairs: Vec<_> = parse(["clrmamepro ( )"]).collect();
    assert_eq!(pairs, vec![("clrmamepro".to_string(), group(&[]))]);
}

#[test]
fn test_deep_nesting() {
    let pairs: Vec<_> = parse(["a ( b ( c ( d 1 ) ) e 2 )"]).collect();
    let expected = group(&[
        ("b", group(&[("c", group(&[("d", leaf("1"))]))])),
        ("e", leaf("2")),
    ]);
    assert_eq!(pairs, vec![("a".to_string(), expected)]);
}

#[test]
fn test_top_level_is_lazy() {
    let lines = std::iter::repeat("game ( name x )").take(1_000_000);
    let mut pairs = parse(lines);
    assert_eq!(pairs.next().map(|(k, _)| k).as_deref(), Some("game"));
    assert_eq!(pairs.next().map(|(k, _)| k).as_deref(), Some("game"));
}

#[test]
fn test_pairs_stay_done_after_end() {
    let mut pairs = parse([") a 1"]);
    assert!(pairs.next().is_none());
    assert!(pairs.next().is_none());
}

#[test]
fn test_pair_list_serializes_as_pairs() {
    let tree = PairList(parse([r#"game ( name "A" )"#]).collect());
    let json = serde_json::to_string(&tree).unwrap();
    assert_eq!(json, r#"[["game",[["name","A"]]]]"#);
}

#[test]
fn test_pair_map_serializes_as_object() {
    let maps: Vec<PairMap> = parse_to_maps([r#"game ( name "A" name "B" )"#]).collect();
    let json = serde_json::to_string(&maps[0]).unwrap();
    assert_eq!(json, r#"{"game":{"name":"B"}}"#);
}
