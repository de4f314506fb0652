use super::*;
use paris_ir::{DeclId, Origin, RoundBuilder, TypeName};
use pretty_assertions::assert_eq;

fn styleable(arena: &DeclArena, decl: DeclId, origin: Origin) -> StyleableInfo {
    let element = arena[decl]
        .type_name()
        .cloned()
        .unwrap_or_else(|| TypeName::parse("missing.Type"));
    StyleableInfo {
        decl,
        origin,
        applier: StyleableInfo::applier_name_for(&element, &element),
        styled_type: element.clone(),
        supertype: arena.supertype_of(&element).cloned(),
        element,
        styleable_array: None,
        attrs: vec![],
        styles: vec![],
        before: vec![],
        after: vec![],
        children: vec![],
        location: arena.location(decl),
    }
}

#[test]
fn manifest_carries_supertype_chain() {
    let mut round = RoundBuilder::new();
    round.type_decl("android.view.View", None);
    round.type_decl("com.example.Avatar", Some("android.view.View"));
    let rounded = round.type_decl("com.example.RoundedAvatar", Some("com.example.Avatar"));
    let arena = round.finish().declarations;

    let mut index = ModuleIndex::new();
    index.record_local(&arena, &styleable(&arena, rounded, Origin::Local));
    let Some(manifest) = index.emit("app", None).manifest else {
        panic!("no manifest for a recorded styleable");
    };

    assert_eq!(manifest.module, "app");
    assert_eq!(
        manifest.styleables[0].supertypes,
        vec![
            TypeName::parse("com.example.Avatar"),
            TypeName::parse("android.view.View"),
        ]
    );
}

#[test]
fn styleables_recorded_in_separate_rounds_share_one_module() {
    let mut first = RoundBuilder::new();
    let avatar = first.type_decl("com.example.Avatar", Some("android.view.View"));
    let first_arena = first.finish().declarations;

    let mut second = RoundBuilder::new();
    let badge = second.type_decl("com.example.Badge", Some("android.view.View"));
    let second_arena = second.finish().declarations;

    let mut index = ModuleIndex::new();
    index.record_local(&first_arena, &styleable(&first_arena, avatar, Origin::Local));
    index.record_local(&second_arena, &styleable(&second_arena, badge, Origin::Local));

    let outputs = index.emit("app", None);
    assert_eq!(outputs.files.len(), 1);
    let module = &outputs.files[0].contents;
    assert!(module.contains("com.example.AvatarStyleApplier"));
    assert!(module.contains("com.example.BadgeStyleApplier"));
    assert_eq!(outputs.manifest.map(|m| m.styleables.len()), Some(2));
}

#[test]
fn facade_skips_repeated_and_shadowed_dependencies() {
    let mut round = RoundBuilder::new();
    let avatar = round.type_decl("com.example.Avatar", Some("android.view.View"));
    let image = round.type_decl("android.widget.ImageView", Some("android.view.View"));
    let arena = round.finish().declarations;

    let mut index = ModuleIndex::new();
    let local = styleable(&arena, avatar, Origin::Local);
    index.record_local(&arena, &local);

    let mut shadowed = styleable(&arena, avatar, Origin::External);
    shadowed.applier = TypeName::parse("com.lib.AvatarStyleApplier");
    let mut external = styleable(&arena, image, Origin::External);
    external.applier = TypeName::parse("com.lib.ImageViewStyleApplier");
    index.record_external(&shadowed);
    index.record_external(&external);
    index.record_external(&external);

    let outputs = index.emit("app", Some("com.example"));
    let facade = &outputs.files[1].contents;
    assert_eq!(
        facade
            .matches("public static com.lib.ImageViewStyleApplier style(")
            .count(),
        1
    );
    assert!(!facade.contains("com.lib.AvatarStyleApplier"));
    assert!(facade.contains(
        "public static com.example.AvatarStyleApplier style(com.example.Avatar view)"
    ));

    let module = &outputs.files[0].contents;
    assert!(!module.contains("ImageView"));
}
