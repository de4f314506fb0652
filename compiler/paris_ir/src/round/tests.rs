use super::*;
use pretty_assertions::assert_eq;

#[test]
fn builder_assigns_locations_in_owner_file() {
    let mut round = RoundBuilder::new();
    let avatar = round.type_decl("com.example.Avatar", Some("android.view.View"));
    let setter = round.method(avatar, "setSize", &["int"]);

    let arena = round.declarations();
    assert_eq!(arena.location(avatar), Location::new("Avatar.java", 1));
    assert_eq!(arena.location(setter), Location::new("Avatar.java", 2));
    assert_eq!(arena.package_of(setter), "com.example");
}

#[test]
fn builder_collects_records_and_flags() {
    let mut round = RoundBuilder::new();
    let avatar = round.type_decl("com.example.Avatar", None);
    round
        .styleable(avatar, Some("Avatar"))
        .known_holder("com.example")
        .resource(ResourceKind::Style, "Paris_Avatar")
        .processing_over(true);
    let input = round.finish();

    assert_eq!(input.records.len(), 1);
    assert_eq!(input.records[0].owner(), avatar);
    assert_eq!(input.known_holders, vec!["com.example".to_string()]);
    assert!(input.resources.contains(ResourceKind::Style, "Paris_Avatar"));
    assert!(input.processing_over);
}

#[test]
fn empty_json_is_an_empty_round() {
    let input: RoundInput = match serde_json::from_str("{}") {
        Ok(input) => input,
        Err(e) => panic!("round did not parse: {e}"),
    };
    assert!(input.declarations.is_empty());
    assert!(input.records.is_empty());
    assert!(!input.processing_over);
}

#[test]
fn round_reads_declarations_and_records() {
    let json = r#"{
        "declarations": [
            { "name": "Avatar", "kind": "type", "ty": "com.example.Avatar",
              "supertype": "android.view.View",
              "location": { "file": "Avatar.java", "line": 3 } }
        ],
        "records": [
            { "kind": "styleable", "decl": 0, "styleable_array": "Avatar" }
        ],
        "known_holders": ["com.example"],
        "processing_over": true
    }"#;
    let input: RoundInput = match serde_json::from_str(json) {
        Ok(input) => input,
        Err(e) => panic!("round did not parse: {e}"),
    };
    assert_eq!(input.declarations.len(), 1);
    assert_eq!(
        input.declarations.type_decl(&TypeName::parse("com.example.Avatar")),
        Some(DeclId::new(0))
    );
    assert_eq!(input.records[0].owner(), DeclId::new(0));
}
