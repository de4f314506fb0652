use super::*;
use paris_ir::{ConfigInfo, Format, HolderSymbol, ModuleManifest, RoundBuilder, RoundInput};
use pretty_assertions::assert_eq;

const PKG: &str = "com.example";

fn styleable_ref(name: &str) -> ResourceRef {
    ResourceRef::new(PKG, ResourceKind::Styleable, name)
}

fn attr(round: &mut RoundBuilder, owner: DeclId, setter: &str, resource: &str) -> DeclId {
    let element = round.method(owner, setter, &["int"]);
    round.record(Record::Attr(AttrInfo {
        owner,
        element,
        setter: setter.to_string(),
        target_type: TypeName::parse("int"),
        format: Format::DimensionPixelSize,
        resource: styleable_ref(resource),
        default_value: None,
    }));
    element
}

fn style(round: &mut RoundBuilder, owner: DeclId, name: &str, is_default: bool) -> DeclId {
    let element = round.field(owner, name, "int", true);
    round.record(Record::Style(StyleInfo {
        owner,
        element: Some(element),
        name: name.to_string(),
        source: StyleSource::Resource {
            resource: ResourceRef::new(PKG, ResourceKind::Style, format!("Avatar_{name}")),
        },
        is_default,
    }));
    element
}

fn hook(round: &mut RoundBuilder, owner: DeclId, name: &str, params: &[&str]) -> Record {
    let element = round.method(owner, name, params);
    Record::BeforeHook(HookInfo {
        owner,
        element,
        name: name.to_string(),
        params: params.iter().map(|p| TypeName::parse(p)).collect(),
    })
}

fn build(
    input: &RoundInput,
    finder: &mut RFinder,
    errors: &mut ErrorAggregator,
) -> Vec<StyleableInfo> {
    ModelBuilder::new(&input.declarations, &input.resources, finder, errors).build(&input.records)
}

fn codes(errors: &ErrorAggregator) -> Vec<ErrorCode> {
    errors.peek().map(|d| d.code).collect()
}

#[test]
fn builds_attrs_in_declaration_order_against_located_holder() {
    let mut round = RoundBuilder::new();
    round.type_decl("android.view.View", None);
    let avatar = round.type_decl("com.example.Avatar", Some("android.view.View"));
    round.styleable(avatar, Some("Avatar"));
    attr(&mut round, avatar, "setSize", "Avatar_size");
    attr(&mut round, avatar, "setBorderColor", "Avatar_borderColor");
    let input = round.finish();

    let mut finder = RFinder::new();
    let _ = finder.configure(&ConfigInfo {
        decl: avatar,
        default_style_name_format: String::new(),
        r_class: Some(TypeName::parse("com.app.R")),
    });
    let mut errors = ErrorAggregator::new();
    let infos = build(&input, &mut finder, &mut errors);

    assert!(errors.is_empty());
    assert_eq!(infos.len(), 1);
    let info = &infos[0];
    assert_eq!(info.applier.qualified(), "com.example.AvatarStyleApplier");
    assert_eq!(info.supertype, Some(TypeName::parse("android.view.View")));
    assert_eq!(
        info.styleable_array.as_ref().map(ToString::to_string),
        Some("com.app.R.styleable.Avatar".to_string())
    );
    let setters: Vec<&str> = info.attrs.iter().map(|a| a.setter.as_str()).collect();
    assert_eq!(setters, vec!["setSize", "setBorderColor"]);
    assert_eq!(info.attrs[0].symbol.holder, HolderSymbol::new("com.app"));
}

#[test]
fn conflicting_defaults_drop_only_that_styleable() {
    let mut round = RoundBuilder::new();
    let avatar = round.type_decl("com.example.Avatar", None);
    round.styleable(avatar, None);
    let first = style(&mut round, avatar, "RED", true);
    let second = style(&mut round, avatar, "BLUE", true);
    let badge = round.type_decl("com.example.Badge", None);
    round.styleable(badge, None);
    let input = round.finish();

    let mut errors = ErrorAggregator::new();
    let infos = build(&input, &mut RFinder::new(), &mut errors);

    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].element.simple(), "Badge");
    let diag = errors.peek().next().cloned();
    let Some(diag) = diag else {
        panic!("expected a conflicting default diagnostic");
    };
    assert_eq!(diag.code, ErrorCode::E2001);
    let locations: Vec<Location> = diag.labels.iter().map(|l| l.location.clone()).collect();
    assert_eq!(
        locations,
        vec![
            input.declarations.location(second),
            input.declarations.location(first)
        ]
    );
}

#[test]
fn style_named_default_is_the_default() {
    let mut round = RoundBuilder::new();
    let avatar = round.type_decl("com.example.Avatar", None);
    round.styleable(avatar, None);
    style(&mut round, avatar, "DEFAULT", false);
    style(&mut round, avatar, "redStyle", false);
    let input = round.finish();

    let mut errors = ErrorAggregator::new();
    let infos = build(&input, &mut RFinder::new(), &mut errors);

    let info = &infos[0];
    assert_eq!(info.default_style().map(|s| s.name.as_str()), Some("default"));
    assert!(info.style("red").is_some_and(|s| !s.is_default));
}

#[test]
fn duplicate_style_names_are_rejected() {
    let mut round = RoundBuilder::new();
    let avatar = round.type_decl("com.example.Avatar", None);
    round.styleable(avatar, None);
    style(&mut round, avatar, "RED", false);
    style(&mut round, avatar, "redStyle", false);
    let input = round.finish();

    let mut errors = ErrorAggregator::new();
    let infos = build(&input, &mut RFinder::new(), &mut errors);

    assert!(infos.is_empty());
    assert_eq!(codes(&errors), vec![ErrorCode::E2008]);
}

#[test]
fn untraced_resource_is_a_resolution_error() {
    let mut round = RoundBuilder::new();
    let avatar = round.type_decl("com.example.Avatar", None);
    round.styleable(avatar, Some("Avatar"));
    let element = round.method(avatar, "setSize", &["int"]);
    round.record(Record::Attr(AttrInfo {
        owner: avatar,
        element,
        setter: "setSize".to_string(),
        target_type: TypeName::parse("int"),
        format: Format::Int,
        resource: ResourceRef::unknown(ResourceKind::Styleable, "2130771968"),
        default_value: None,
    }));
    let input = round.finish();

    let mut errors = ErrorAggregator::new();
    let infos = build(&input, &mut RFinder::new(), &mut errors);

    assert!(infos.is_empty());
    assert_eq!(codes(&errors), vec![ErrorCode::E1001]);
    assert_eq!(
        errors.peek().next().map(Diagnostic::primary_location),
        Some(input.declarations.location(element))
    );
}

#[test]
fn attrs_need_an_array_and_its_prefix() {
    let mut round = RoundBuilder::new();
    let avatar = round.type_decl("com.example.Avatar", None);
    round.styleable(avatar, None);
    attr(&mut round, avatar, "setSize", "Avatar_size");
    let badge = round.type_decl("com.example.Badge", None);
    round.styleable(badge, Some("Badge"));
    attr(&mut round, badge, "setSize", "Avatar_size");
    let input = round.finish();

    let mut errors = ErrorAggregator::new();
    let infos = build(&input, &mut RFinder::new(), &mut errors);

    assert!(infos.is_empty());
    assert_eq!(codes(&errors), vec![ErrorCode::E2006, ErrorCode::E2005]);
}

#[test]
fn hooks_accept_styled_type_or_supertype() {
    let mut round = RoundBuilder::new();
    round.type_decl("android.view.View", None);
    let avatar = round.type_decl("com.example.Avatar", Some("android.view.View"));
    round.styleable(avatar, None);
    let exact = hook(&mut round, avatar, "clearBackground", &["com.example.Avatar"]);
    let wider = hook(&mut round, avatar, "resetPadding", &["android.view.View"]);
    round.record(exact).record(wider);
    let input = round.finish();

    let mut errors = ErrorAggregator::new();
    let infos = build(&input, &mut RFinder::new(), &mut errors);

    assert!(errors.is_empty());
    let methods: Vec<&str> = infos[0].before.iter().map(|h| h.method.as_str()).collect();
    assert_eq!(methods, vec!["clearBackground", "resetPadding"]);
}

#[test]
fn hook_with_wrong_signature_is_rejected() {
    let mut round = RoundBuilder::new();
    let avatar = round.type_decl("com.example.Avatar", None);
    round.styleable(avatar, None);
    let no_params = hook(&mut round, avatar, "clearBackground", &[]);
    let unrelated = hook(&mut round, avatar, "resetPadding", &["java.lang.String"]);
    round.record(no_params).record(unrelated);
    let input = round.finish();

    let mut errors = ErrorAggregator::new();
    let infos = build(&input, &mut RFinder::new(), &mut errors);

    assert!(infos.is_empty());
    assert_eq!(codes(&errors), vec![ErrorCode::E2003, ErrorCode::E2003]);
}

#[test]
fn child_must_be_member_of_styled_hierarchy() {
    let mut round = RoundBuilder::new();
    let avatar = round.type_decl("com.example.Avatar", None);
    round.type_decl("com.example.Badge", None);
    round.styleable(avatar, Some("Avatar"));
    let getter = round.method(avatar, "getTitle", &[]);
    round.record(Record::ChildStyleable(ChildStyleableInfo {
        owner: avatar,
        element: getter,
        getter: "getTitle".to_string(),
        member_owner: TypeName::parse("com.example.Avatar"),
        child_type: TypeName::parse("android.widget.TextView"),
        resource: styleable_ref("Avatar_titleStyle"),
        default_value: None,
    }));
    let stray = round.field(avatar, "label", "android.widget.TextView", false);
    round.record(Record::ChildStyleable(ChildStyleableInfo {
        owner: avatar,
        element: stray,
        getter: "label".to_string(),
        member_owner: TypeName::parse("com.example.Badge"),
        child_type: TypeName::parse("android.widget.TextView"),
        resource: styleable_ref("Avatar_labelStyle"),
        default_value: None,
    }));
    let input = round.finish();

    let mut errors = ErrorAggregator::new();
    let infos = build(&input, &mut RFinder::new(), &mut errors);

    assert!(infos.is_empty());
    assert_eq!(codes(&errors), vec![ErrorCode::E2004]);
}

#[test]
fn child_getter_methods_are_called() {
    let mut round = RoundBuilder::new();
    let avatar = round.type_decl("com.example.Avatar", None);
    round.styleable(avatar, Some("Avatar"));
    let getter = round.method(avatar, "getTitle", &[]);
    round.record(Record::ChildStyleable(ChildStyleableInfo {
        owner: avatar,
        element: getter,
        getter: "getTitle".to_string(),
        member_owner: TypeName::parse("com.example.Avatar"),
        child_type: TypeName::parse("android.widget.TextView"),
        resource: styleable_ref("Avatar_titleStyle"),
        default_value: None,
    }));
    let input = round.finish();

    let mut errors = ErrorAggregator::new();
    let infos = build(&input, &mut RFinder::new(), &mut errors);

    assert!(errors.is_empty());
    assert_eq!(infos[0].children[0].getter, "getTitle()");
}

#[test]
fn records_without_a_styleable_owner_are_errors() {
    let mut round = RoundBuilder::new();
    let plain = round.type_decl("com.example.Plain", None);
    attr(&mut round, plain, "setSize", "Plain_size");
    let input = round.finish();

    let mut errors = ErrorAggregator::new();
    let infos = build(&input, &mut RFinder::new(), &mut errors);

    assert!(infos.is_empty());
    assert_eq!(codes(&errors), vec![ErrorCode::E2010]);
}

#[test]
fn default_synthesized_from_name_format() {
    let mut round = RoundBuilder::new();
    let avatar = round.type_decl("com.example.Avatar", None);
    round.styleable(avatar, None);
    round.resource(ResourceKind::Style, "Paris_Avatar");
    let input = round.finish();

    let mut finder = RFinder::new();
    let _ = finder.configure(&ConfigInfo {
        decl: avatar,
        default_style_name_format: "Paris_%s".to_string(),
        r_class: None,
    });
    let mut errors = ErrorAggregator::new();
    let infos = build(&input, &mut finder, &mut errors);

    let default = infos[0].default_style().cloned();
    assert_eq!(
        default.map(|s| s.source),
        Some(ResolvedStyleSource::Resource {
            symbol: HolderSymbol::new(PKG).symbol(ResourceKind::Style, "Paris_Avatar")
        })
    );
}

#[test]
fn empty_default_when_requested_and_no_resource() {
    let mut round = RoundBuilder::new();
    let avatar = round.type_decl("com.example.Avatar", None);
    round.record(Record::Styleable(StyleableMarker {
        decl: avatar,
        styleable_array: None,
        styled_type: None,
        empty_default_style: true,
    }));
    let input = round.finish();

    let mut errors = ErrorAggregator::new();
    let infos = build(&input, &mut RFinder::new(), &mut errors);

    assert_eq!(
        infos[0].default_style().map(|s| &s.source),
        Some(&ResolvedStyleSource::Empty)
    );
}

#[test]
fn proxy_applier_is_named_after_styled_view() {
    let mut round = RoundBuilder::new();
    round.type_decl("android.widget.ImageView", Some("android.view.View"));
    let proxy = round.type_decl("com.example.proxies.ImageViewProxy", None);
    round.record(Record::Styleable(StyleableMarker {
        decl: proxy,
        styleable_array: None,
        styled_type: Some(TypeName::parse("android.widget.ImageView")),
        empty_default_style: false,
    }));
    let input = round.finish();

    let mut errors = ErrorAggregator::new();
    let infos = build(&input, &mut RFinder::new(), &mut errors);

    let info = &infos[0];
    assert!(info.is_proxy());
    assert_eq!(info.applier.qualified(), "com.example.proxies.ImageViewStyleApplier");
    assert_eq!(info.supertype, Some(TypeName::parse("android.view.View")));
}

#[test]
fn fold_external_allocates_supertype_chain() {
    let element = TypeName::parse("com.lib.Avatar");
    let mut round = RoundBuilder::new();
    let local = round.type_decl("com.example.RoundedAvatar", Some("com.lib.Avatar"));
    let mut arena = round.finish().declarations;

    let descriptor = paris_ir::StyleableDescriptor {
        element: element.clone(),
        styled_type: element.clone(),
        supertypes: vec![
            TypeName::parse("android.widget.ImageView"),
            TypeName::parse("android.view.View"),
        ],
        applier: StyleableInfo::applier_name_for(&element, &element),
        styleable_array: None,
        attrs: vec![],
        styles: vec![],
        before: vec![],
        after: vec![],
        children: vec![],
        location: Location::new("Avatar.java", 3),
    };
    let manifest = ModuleManifest {
        module: "lib".to_string(),
        styleables: vec![descriptor],
    };
    let mut errors = ErrorAggregator::new();
    let externals = fold_external(&mut arena, &[manifest], &mut errors);

    assert!(errors.is_empty());
    assert_eq!(externals.len(), 1);
    assert!(externals[0].is_external());
    assert_eq!(arena[externals[0].decl].origin, Origin::External);
    let rounded = TypeName::parse("com.example.RoundedAvatar");
    let chain: Vec<String> = arena.supertypes(&rounded).map(TypeName::qualified).collect();
    assert_eq!(
        chain,
        vec!["com.lib.Avatar", "android.widget.ImageView", "android.view.View"]
    );
    assert_eq!(arena[local].origin, Origin::Local);
}
