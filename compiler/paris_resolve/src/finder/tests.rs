use super::*;
use paris_ir::{DeclId, ResourceKind, TypeName};
use pretty_assertions::assert_eq;

fn config(format: &str, r_class: Option<&str>) -> ConfigInfo {
    ConfigInfo {
        decl: DeclId::new(0),
        default_style_name_format: format.to_string(),
        r_class: r_class.map(TypeName::parse),
    }
}

#[test]
fn config_r_class_wins() {
    let mut finder = RFinder::new();
    assert_eq!(finder.configure(&config("", Some("com.app.R"))), Ok(()));
    let lib_ref = ResourceRef::new("com.lib", ResourceKind::Styleable, "Avatar_size");
    finder.locate([&lib_ref], ["com.lib.views"], &["com.lib".to_string()]);

    assert_eq!(finder.holder(), Some(&HolderSymbol::new("com.app")));
    assert_eq!(finder.source(), Some(HolderSource::Config));
}

#[test]
fn first_module_reference_locates_holder() {
    let mut finder = RFinder::new();
    let framework = ResourceRef::framework(ResourceKind::Attr, "padding");
    let module = ResourceRef::new("com.lib", ResourceKind::Styleable, "Avatar_size");
    finder.locate([&framework, &module], ["com.example"], &[]);

    assert_eq!(finder.holder(), Some(&HolderSymbol::new("com.lib")));
    assert_eq!(finder.source(), Some(HolderSource::ResourceReference));
}

#[test]
fn package_walk_finds_nearest_known_holder() {
    let mut finder = RFinder::new();
    let known = vec!["com".to_string(), "com.example".to_string()];
    finder.locate([], ["com.example.views.avatar"], &known);

    assert_eq!(finder.holder(), Some(&HolderSymbol::new("com.example")));
    assert_eq!(finder.source(), Some(HolderSource::PackageWalk));
}

#[test]
fn unlocated_holder_falls_back_per_package() {
    let mut finder = RFinder::new();
    finder.locate([], ["com.example.views"], &[]);

    assert_eq!(finder.holder(), None);
    assert_eq!(finder.resolve("com.example.views"), HolderSymbol::new("com.example.views"));
    assert_eq!(finder.resolve("com.other"), HolderSymbol::new("com.other"));
}

#[test]
fn late_location_keeps_earlier_answers() {
    let mut finder = RFinder::new();
    let before = finder.resolve("com.example.ui");
    assert_eq!(before, HolderSymbol::new("com.example.ui"));

    let module = ResourceRef::new("com.example", ResourceKind::Styleable, "Badge_size");
    finder.locate([&module], ["com.example.ui"], &[]);
    assert_eq!(finder.holder(), Some(&HolderSymbol::new("com.example")));

    assert_eq!(finder.resolve("com.example.ui"), before);
    assert_eq!(finder.resolve("com.example.other"), HolderSymbol::new("com.example"));
}

#[test]
fn located_holder_is_kept_across_rounds() {
    let mut finder = RFinder::new();
    let first = ResourceRef::new("com.first", ResourceKind::Dimen, "size");
    let second = ResourceRef::new("com.second", ResourceKind::Dimen, "size");
    finder.locate([&first], [], &[]);
    finder.locate([&second], [], &[]);

    assert_eq!(finder.holder(), Some(&HolderSymbol::new("com.first")));
}

#[test]
fn resolve_ref_binds_to_located_holder() {
    let mut finder = RFinder::new();
    let written = ResourceRef::new("com.lib", ResourceKind::Styleable, "Avatar_size");
    assert_eq!(finder.configure(&config("", Some("com.app.R"))), Ok(()));

    let symbol = finder.resolve_ref("com.lib.views", &written, &ResourceIndex::new());
    assert_eq!(
        symbol.map(|s| s.to_string()),
        Ok("com.app.R.styleable.Avatar_size".to_string())
    );
}

#[test]
fn framework_refs_resolve_to_framework_holder() {
    let mut finder = RFinder::new();
    let mut index = ResourceIndex::new();
    index.insert(ResourceKind::Dimen, "unrelated");
    let padding = ResourceRef::framework(ResourceKind::Attr, "padding");

    let symbol = finder.resolve_ref("com.example", &padding, &index);
    assert_eq!(symbol.map(|s| s.to_string()), Ok("android.R.attr.padding".to_string()));
}

#[test]
fn untraced_holder_is_an_error() {
    let mut finder = RFinder::new();
    let raw = ResourceRef::unknown(ResourceKind::Styleable, "2130771968");

    assert_eq!(
        finder.resolve_ref("com.example", &raw, &ResourceIndex::new()),
        Err(ResolveError::UntracedHolder { resource: raw.clone() })
    );
}

#[test]
fn missing_resource_is_an_error_only_with_an_index() {
    let mut finder = RFinder::new();
    let size = ResourceRef::new("com.example", ResourceKind::Dimen, "avatar_size");

    assert!(finder
        .resolve_ref("com.example", &size, &ResourceIndex::new())
        .is_ok());

    let mut index = ResourceIndex::new();
    index.insert(ResourceKind::Dimen, "other");
    assert_eq!(
        finder.resolve_ref("com.example", &size, &index),
        Err(ResolveError::MissingResource { resource: size.clone() })
    );
}

#[test]
fn default_style_name_applies_format() {
    let mut finder = RFinder::new();
    assert_eq!(finder.default_style_name("Avatar"), None);
    assert_eq!(finder.configure(&config("Paris_%s", None)), Ok(()));
    assert_eq!(finder.default_style_name("Avatar"), Some("Paris_Avatar".to_string()));
}

#[test]
fn malformed_format_is_rejected_and_ignored() {
    let mut finder = RFinder::new();
    let result = finder.configure(&config("Paris", Some("com.app.R")));

    assert_eq!(
        result,
        Err(ResolveError::MalformedNameFormat {
            format: "Paris".to_string()
        })
    );
    assert_eq!(finder.default_style_name("Avatar"), None);
    assert_eq!(finder.holder(), Some(&HolderSymbol::new("com.app")));
}

mod proptest_resolve {
    use super::*;
    use proptest::prelude::*;

    fn package() -> impl Strategy<Value = String> {
        proptest::collection::vec("[a-z]{1,6}", 1..4).prop_map(|parts| parts.join("."))
    }

    proptest! {
        #[test]
        fn resolve_is_idempotent(
            packages in proptest::collection::vec(package(), 1..8),
            located in proptest::option::of(package()),
        ) {
            let mut finder = RFinder::new();
            if let Some(located) = &located {
                let r = ResourceRef::new(located.clone(), ResourceKind::Dimen, "size");
                finder.locate([&r], [], &[]);
            }
            for package in &packages {
                let first = finder.resolve(package);
                let second = finder.resolve(package);
                prop_assert_eq!(&first, &second);
                match &located {
                    Some(located) => prop_assert_eq!(first.package(), located.as_str()),
                    None => prop_assert_eq!(first.package(), package.as_str()),
                }
            }
        }

        #[test]
        fn locating_never_changes_a_given_answer(
            early in proptest::collection::vec(package(), 0..6),
            late in proptest::collection::vec(package(), 1..6),
            located in package(),
        ) {
            let mut finder = RFinder::new();
            let answers: Vec<HolderSymbol> = early.iter().map(|p| finder.resolve(p)).collect();

            let r = ResourceRef::new(located.clone(), ResourceKind::Dimen, "size");
            finder.locate([&r], [], &[]);

            for (package, answer) in early.iter().zip(&answers) {
                prop_assert_eq!(&finder.resolve(package), answer);
            }
            for package in late.iter().filter(|p| !early.contains(p)) {
                let resolved = finder.resolve(package);
                prop_assert_eq!(resolved.package(), located.as_str());
            }
        }
    }
}
