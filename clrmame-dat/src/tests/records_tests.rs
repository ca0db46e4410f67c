use super::*;

fn pairs(items: &[(&str, &str)]) -> Vec<(String, Entity)> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), Entity::Leaf(v.to_string())))
        .collect()
}

// -- Rom --

#[test]
fn test_rom_from_pairs() {
    let rom = Rom::from_pairs(pairs(&[
        ("name", "X"),
        ("size", "1"),
        ("crc", "BB71B532"),
        ("md5", "BCF1218706E9B547EAB9E4BE58D54E2"),
        ("sha1", "5478015A91442E56BD76AF39447BCA365E06C272"),
    ]));
    assert_eq!(rom.name.as_deref(), Some("X"));
    assert_eq!(rom.size.as_deref(), Some("1"));
    assert_eq!(rom.size_bytes(), Some(1));
    assert_eq!(rom.crc.as_deref(), Some("BB71B532"));
    assert_eq!(rom.status, None);
}

#[test]
fn test_rom_flags_alias() {
    let rom = Rom::from_pairs(pairs(&[("flags", "verified")]));
    assert_eq!(rom.status.as_deref(), Some("verified"));
    assert_eq!(rom.flags(), Some("verified"));
    assert_eq!(rom.field("flags"), Some("verified"));
}

#[test]
fn test_rom_status_beats_flags() {
    let rom = Rom::from_pairs(pairs(&[("status", "X"), ("flags", "Y")]));
    assert_eq!(rom.status.as_deref(), Some("X"));

    // Order does not matter.
    let rom = Rom::from_pairs(pairs(&[("flags", "Y"), ("status", "X")]));
    assert_eq!(rom.status.as_deref(), Some("X"));
}

#[test]
fn test_rom_set_flags_writes_status() {
    let mut rom = Rom::default();
    rom.set_flags("baddump");
    assert_eq!(rom.status.as_deref(), Some("baddump"));
    assert!(rom.set_field("flags", "nodump".to_string()));
    assert_eq!(rom.flags(), Some("nodump"));
    assert_eq!(rom.field("status"), Some("nodump"));
}

#[test]
fn test_rom_size_bytes_not_numeric() {
    let rom = Rom::from_pairs(pairs(&[("size", "big")]));
    assert_eq!(rom.size_bytes(), None);
    assert_eq!(Rom::default().size_bytes(), None);
}

#[test]
fn test_rom_last_duplicate_wins() {
    let rom = Rom::from_pairs(pairs(&[("name", "A"), ("name", "B")]));
    assert_eq!(rom.name.as_deref(), Some("B"));
}

// -- Game --

#[test]
fn test_game_collects_roms_in_order() {
    let first = Rom {
        name: Some("a.bin".into()),
        ..Default::default()
    };
    let second = Rom {
        name: Some("b.bin".into()),
        ..Default::default()
    };
    let game = Game::from_pairs(vec![
        ("name".to_string(), Entity::Leaf("G".into())),
        ("rom".to_string(), Entity::Rom(first.clone())),
        ("description".to_string(), Entity::Leaf("D".into())),
        ("rom".to_string(), Entity::Rom(second.clone())),
    ]);
    assert_eq!(game.name.as_deref(), Some("G"));
    assert_eq!(game.description.as_deref(), Some("D"));
    assert_eq!(game.roms, vec![first, second]);
}

#[test]
fn test_game_ignores_unknown_keys() {
    let game = Game::from_pairs(pairs(&[("name", "G"), ("foo", "bar"), ("year", "1990")]));
    assert_eq!(
        game,
        Game {
            name: Some("G".into()),
            description: None,
            roms: Vec::new(),
        }
    );
}

#[test]
fn test_game_without_roms() {
    let game = Game::from_pairs(pairs(&[("name", "G")]));
    assert!(game.roms.is_empty());
}

#[test]
fn test_game_ignores_undecoded_rom_leaf() {
    let game = Game::from_pairs(pairs(&[("rom", "loose")]));
    assert!(game.roms.is_empty());
}

// -- Header --

#[test]
fn test_header_from_pairs() {
    let header = Header::from_pairs(pairs(&[
        ("name", "Nintendo - Nintendo Entertainment System"),
        ("version", "20141025-064058"),
        ("author", "someone"),
        ("comment", "dropped"),
    ]));
    assert_eq!(
        header.name.as_deref(),
        Some("Nintendo - Nintendo Entertainment System")
    );
    assert_eq!(header.version.as_deref(), Some("20141025-064058"));
    assert_eq!(header.author.as_deref(), Some("someone"));
    assert_eq!(header.homepage, None);
}

#[test]
fn test_header_ignores_nested_value() {
    let header = Header::from_pairs(vec![(
        "name".to_string(),
        Entity::Group(vec![("x".to_string(), Entity::Leaf("y".into()))]),
    )]);
    assert_eq!(header, Header::default());
}

#[test]
fn test_as_fields_order() {
    let header = Header {
        name: Some("N".into()),
        url: Some("http://example.com".into()),
        ..Default::default()
    };
    let fields = header.as_fields();
    assert_eq!(fields.len(), 6);
    assert_eq!(fields[0], ("name", Some("N")));
    assert_eq!(fields[1], ("description", None));
    assert_eq!(fields[5], ("url", Some("http://example.com")));
}

// -- Display --

#[test]
fn test_display_rom() {
    let rom = Rom::from_pairs(pairs(&[("name", "X"), ("size", "1")]));
    assert_eq!(
        rom.to_string(),
        r#"Rom(name="X", size="1", crc=None, md5=None, sha1=None, status=None)"#
    );
}

#[test]
fn test_display_game_with_roms() {
    let game = Game {
        name: Some("G".into()),
        description: None,
        roms: vec![Rom {
            name: Some("r".into()),
            ..Default::default()
        }],
    };
    assert_eq!(
        game.to_string(),
        r#"Game(name="G", description=None, roms=[Rom(name="r", size=None, crc=None, md5=None, sha1=None, status=None)])"#
    );
}

#[test]
fn test_rom_serializes_status_only() {
    let rom = Rom::from_pairs(pairs(&[("name", "X"), ("flags", "verified")]));
    let json = serde_json::to_value(&rom).unwrap();
    assert_eq!(json["status"], "verified");
    assert!(json.get("flags").is_none());
}
