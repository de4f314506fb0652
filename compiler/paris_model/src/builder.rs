//! Styleable Model Builder.
//!
//! Records are grouped by owning `DeclId` in one pass. Each styleable marker
//! then becomes one `StyleableInfo`; every problem found on the way is logged
//! against the offending declaration and drops that styleable only.

use rustc_hash::FxHashMap;

use paris_diagnostic::{Diagnostic, ErrorAggregator, ErrorCode, ErrorGuaranteed};
use paris_ir::naming::{format_style_name, DEFAULT_STYLE_NAME};
use paris_ir::{
    ArenaFull, Attr, AttrInfo, Child, ChildStyleableInfo, DeclArena, DeclId, DeclKind, Declaration,
    Hook, HookInfo, HookPhase, HolderRef, Location, ModuleManifest, Origin, Record,
    ResolvedStyleSource, ResourceIndex, ResourceKind, ResourceRef, ResourceSymbol, Style,
    StyleInfo, StyleSource, StyleableDescriptor, StyleableInfo, StyleableMarker, TypeName,
};
use paris_resolve::RFinder;

/// Records sharing one owning declaration.
#[derive(Default)]
struct OwnerRecords<'r> {
    marker: Option<&'r StyleableMarker>,
    attrs: Vec<&'r AttrInfo>,
    styles: Vec<&'r StyleInfo>,
    before: Vec<&'r HookInfo>,
    after: Vec<&'r HookInfo>,
    children: Vec<&'r ChildStyleableInfo>,
    /// Records other than the marker, for orphan reporting.
    members: Vec<&'r Record>,
}

/// Group records by owner, keeping first-appearance order of owners.
fn group_records(records: &[Record]) -> Vec<(DeclId, OwnerRecords<'_>)> {
    let mut index: FxHashMap<DeclId, usize> = FxHashMap::default();
    let mut groups: Vec<(DeclId, OwnerRecords<'_>)> = Vec::new();

    for record in records {
        let owner = record.owner();
        let slot = *index.entry(owner).or_insert_with(|| {
            groups.push((owner, OwnerRecords::default()));
            groups.len() - 1
        });
        let group = &mut groups[slot].1;
        match record {
            Record::Styleable(marker) => {
                if group.marker.is_none() {
                    group.marker = Some(marker);
                }
            }
            Record::Attr(attr) => group.attrs.push(attr),
            Record::Style(style) => group.styles.push(style),
            Record::BeforeHook(hook) => group.before.push(hook),
            Record::AfterHook(hook) => group.after.push(hook),
            Record::ChildStyleable(child) => group.children.push(child),
            // Configs are consumed by the processor before model building.
            Record::Config(_) => continue,
        }
        if !matches!(record, Record::Styleable(_)) {
            group.members.push(record);
        }
    }
    groups
}

/// Builds resolved styleables for one round.
pub struct ModelBuilder<'a> {
    arena: &'a DeclArena,
    resources: &'a ResourceIndex,
    finder: &'a mut RFinder,
    errors: &'a mut ErrorAggregator,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(
        arena: &'a DeclArena,
        resources: &'a ResourceIndex,
        finder: &'a mut RFinder,
        errors: &'a mut ErrorAggregator,
    ) -> Self {
        ModelBuilder {
            arena,
            resources,
            finder,
            errors,
        }
    }

    /// Build one `StyleableInfo` per valid styleable marker, in marker order.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn build(&mut self, records: &[Record]) -> Vec<StyleableInfo> {
        let mut groups = group_records(records);
        let mut out = Vec::new();

        for (owner, group) in &mut groups {
            let Some(marker) = group.marker else {
                self.report_orphans(*owner, &group.members);
                continue;
            };
            sort_by_location(self.arena, &mut group.attrs, |a| a.element);
            sort_by_location(self.arena, &mut group.before, |h| h.element);
            sort_by_location(self.arena, &mut group.after, |h| h.element);
            sort_by_location(self.arena, &mut group.children, |c| c.element);

            match self.build_one(marker, group) {
                Ok(info) => {
                    tracing::debug!(
                        styleable = %info.element,
                        attrs = info.attrs.len(),
                        "built styleable"
                    );
                    out.push(info);
                }
                Err(_) => {
                    tracing::debug!(decl = ?owner, "dropped invalid styleable");
                }
            }
        }
        out
    }

    fn report_orphans(&mut self, owner: DeclId, members: &[&Record]) {
        let owner_name = self
            .arena
            .enclosing_type(owner)
            .map_or_else(|| format!("{owner:?}"), TypeName::qualified);
        for record in members {
            let element = record.element();
            let name = self.arena.get(element).map_or("", |d| d.name.as_str());
            self.errors.log(
                Diagnostic::error(ErrorCode::E2010)
                    .with_message(format!(
                        "`{name}` is annotated but `{owner_name}` is not styleable"
                    ))
                    .with_label(self.arena.location(element), "annotated here")
                    .with_secondary_label(self.arena.location(owner), "declared here"),
            );
        }
    }

    fn build_one(
        &mut self,
        marker: &StyleableMarker,
        group: &OwnerRecords<'_>,
    ) -> Result<StyleableInfo, ErrorGuaranteed> {
        let location = self.arena.location(marker.decl);
        let Some(element) = self
            .arena
            .get(marker.decl)
            .and_then(Declaration::type_name)
            .cloned()
        else {
            return Err(self.errors.log(
                Diagnostic::error(ErrorCode::E9001)
                    .with_message("styleable marker on a declaration that is not a type")
                    .with_label(location, "marked here"),
            ));
        };
        let styled_type = marker
            .styled_type
            .clone()
            .unwrap_or_else(|| element.clone());
        let package = element.package().to_string();
        let mut failed: Option<ErrorGuaranteed> = None;

        let array_name = marker.styleable_array.as_deref();
        let styleable_array = array_name.map(|name| {
            self.finder
                .resolve(&package)
                .symbol(ResourceKind::Styleable, name)
        });
        if array_name.is_none() && (!group.attrs.is_empty() || !group.children.is_empty()) {
            failed = Some(
                self.errors.log(
                    Diagnostic::error(ErrorCode::E2006)
                        .with_message(format!(
                            "`{element}` declares attributes but no styleable resource array"
                        ))
                        .with_label(location.clone(), "styleable declared here")
                        .with_note("name the `declare-styleable` array on the styleable marker"),
                ),
            );
        }

        let mut attrs = Vec::with_capacity(group.attrs.len());
        for attr in &group.attrs {
            match self.attr(&package, array_name, attr) {
                Ok(attr) => attrs.push(attr),
                Err(e) => failed = Some(e),
            }
        }

        let mut styles = match self.styles(&package, &element, &group.styles) {
            Ok(styles) => styles,
            Err(e) => {
                failed = Some(e);
                Vec::new()
            }
        };
        if failed.is_none() {
            self.synthesize_default(&package, &element, marker, &mut styles);
        }

        let mut before = Vec::with_capacity(group.before.len());
        for hook in &group.before {
            match self.hook(HookPhase::Before, hook, &styled_type) {
                Ok(hook) => before.push(hook),
                Err(e) => failed = Some(e),
            }
        }
        let mut after = Vec::with_capacity(group.after.len());
        for hook in &group.after {
            match self.hook(HookPhase::After, hook, &styled_type) {
                Ok(hook) => after.push(hook),
                Err(e) => failed = Some(e),
            }
        }

        let mut children = Vec::with_capacity(group.children.len());
        for child in &group.children {
            match self.child(&package, array_name, child, &styled_type) {
                Ok(child) => children.push(child),
                Err(e) => failed = Some(e),
            }
        }

        if let Some(guarantee) = failed {
            return Err(guarantee);
        }

        Ok(StyleableInfo {
            decl: marker.decl,
            origin: Origin::Local,
            applier: StyleableInfo::applier_name_for(&element, &styled_type),
            supertype: self.arena.supertype_of(&styled_type).cloned(),
            element,
            styled_type,
            styleable_array,
            attrs,
            styles,
            before,
            after,
            children,
            location,
        })
    }

    fn resolve(
        &mut self,
        package: &str,
        resource: &ResourceRef,
        location: &Location,
    ) -> Result<ResourceSymbol, ErrorGuaranteed> {
        match self.finder.resolve_ref(package, resource, self.resources) {
            Ok(symbol) => Ok(symbol),
            Err(problem) => Err(self.errors.log(problem.into_diagnostic(location.clone()))),
        }
    }

    /// Module resources must be named `<array>_<attr>`.
    fn check_prefix(
        &mut self,
        array: Option<&str>,
        resource: &ResourceRef,
        location: &Location,
    ) -> Result<(), ErrorGuaranteed> {
        let (Some(array), HolderRef::Package(_)) = (array, &resource.holder) else {
            return Ok(());
        };
        let prefix = format!("{array}_");
        if resource.name.starts_with(&prefix) && resource.name.len() > prefix.len() {
            return Ok(());
        }
        Err(self.errors.log(
            Diagnostic::error(ErrorCode::E2005)
                .with_message(format!(
                    "resource `{}` is not an attribute of styleable `{array}`",
                    resource.name
                ))
                .with_label(location.clone(), "used here")
                .with_note(format!("styleable attributes are named `{prefix}<attr>`")),
        ))
    }

    fn attr(
        &mut self,
        package: &str,
        array: Option<&str>,
        attr: &AttrInfo,
    ) -> Result<Attr, ErrorGuaranteed> {
        let location = self.arena.location(attr.element);
        self.check_prefix(array, &attr.resource, &location)?;
        let symbol = self.resolve(package, &attr.resource, &location)?;
        let default_value = match &attr.default_value {
            Some(default) => Some(self.resolve(package, default, &location)?),
            None => None,
        };
        Ok(Attr {
            symbol,
            setter: attr.setter.clone(),
            target_type: attr.target_type.clone(),
            format: attr.format,
            default_value,
            location,
        })
    }

    fn styles(
        &mut self,
        package: &str,
        element: &TypeName,
        declared: &[&StyleInfo],
    ) -> Result<Vec<Style>, ErrorGuaranteed> {
        let mut styles: Vec<Style> = Vec::with_capacity(declared.len());
        let mut failed = None;

        for style in declared {
            let name = format_style_name(&style.name);
            let location = self.arena.location(style.element.unwrap_or(style.owner));

            if let Some(existing) = styles.iter().find(|s| s.name == name) {
                failed = Some(
                    self.errors.log(
                        Diagnostic::error(ErrorCode::E2008)
                            .with_message(format!("`{element}` declares style `{name}` twice"))
                            .with_label(location, "duplicate style")
                            .with_secondary_label(existing.location.clone(), "first declared here"),
                    ),
                );
                continue;
            }

            let is_default = style.is_default || name == DEFAULT_STYLE_NAME;
            if is_default {
                if let Some(existing) = styles.iter().find(|s| s.is_default) {
                    failed = Some(
                        self.errors.log(
                            Diagnostic::error(ErrorCode::E2001)
                                .with_message(format!(
                                    "`{element}` declares more than one default style"
                                ))
                                .with_label(location, format!("`{name}` is a default style"))
                                .with_secondary_label(
                                    existing.location.clone(),
                                    format!("`{}` is also a default style", existing.name),
                                )
                                .with_note("a styleable has at most one default style"),
                        ),
                    );
                    continue;
                }
            }

            let source = match &style.source {
                StyleSource::Resource { resource } => {
                    match self.resolve(package, resource, &location) {
                        Ok(symbol) => ResolvedStyleSource::Resource { symbol },
                        Err(e) => {
                            failed = Some(e);
                            continue;
                        }
                    }
                }
                StyleSource::Programmatic { method } => ResolvedStyleSource::Programmatic {
                    owner: self
                        .arena
                        .enclosing_type(*method)
                        .cloned()
                        .unwrap_or_else(|| element.clone()),
                    method: self
                        .arena
                        .get(*method)
                        .map_or_else(String::new, |d| d.name.clone()),
                },
                StyleSource::Empty => ResolvedStyleSource::Empty,
            };

            styles.push(Style {
                name,
                source,
                is_default,
                location,
            });
        }

        match failed {
            Some(e) => Err(e),
            None => Ok(styles),
        }
    }

    /// Add a default style when none was declared: the config-named style
    /// resource if the module has it, else an empty one if requested.
    fn synthesize_default(
        &mut self,
        package: &str,
        element: &TypeName,
        marker: &StyleableMarker,
        styles: &mut Vec<Style>,
    ) {
        if styles.iter().any(|s| s.is_default) {
            return;
        }
        let resource_name = self
            .finder
            .default_style_name(element.simple())
            .filter(|name| self.resources.contains(ResourceKind::Style, name));

        let source = match resource_name {
            Some(name) => ResolvedStyleSource::Resource {
                symbol: self.finder.resolve(package).symbol(ResourceKind::Style, name),
            },
            None if marker.empty_default_style => ResolvedStyleSource::Empty,
            None => return,
        };
        tracing::trace!(styleable = %element, "synthesized default style");
        styles.push(Style {
            name: DEFAULT_STYLE_NAME.to_string(),
            source,
            is_default: true,
            location: Location::unknown(),
        });
    }

    fn hook(
        &mut self,
        phase: HookPhase,
        hook: &HookInfo,
        styled_type: &TypeName,
    ) -> Result<Hook, ErrorGuaranteed> {
        let location = self.arena.location(hook.element);
        if let [param] = hook.params.as_slice() {
            if self.arena.is_same_or_subtype(styled_type, param) {
                return Ok(Hook {
                    method: hook.name.clone(),
                    location,
                });
            }
        }
        let found = hook
            .params
            .iter()
            .map(TypeName::qualified)
            .collect::<Vec<_>>()
            .join(", ");
        Err(self.errors.log(
            Diagnostic::error(ErrorCode::E2003)
                .with_message(format!(
                    "{phase} hook `{}` must take exactly one parameter accepting `{styled_type}`",
                    hook.name
                ))
                .with_label(location, format!("found `({found})`")),
        ))
    }

    fn child(
        &mut self,
        package: &str,
        array: Option<&str>,
        child: &ChildStyleableInfo,
        styled_type: &TypeName,
    ) -> Result<Child, ErrorGuaranteed> {
        let location = self.arena.location(child.element);
        if !self
            .arena
            .is_same_or_subtype(styled_type, &child.member_owner)
        {
            return Err(self.errors.log(
                Diagnostic::error(ErrorCode::E2004)
                    .with_message(format!(
                        "child styleable `{}` is declared by `{}`, which is not `{styled_type}` or one of its supertypes",
                        child.getter, child.member_owner
                    ))
                    .with_label(location, "child styleable here"),
            ));
        }
        self.check_prefix(array, &child.resource, &location)?;
        let symbol = self.resolve(package, &child.resource, &location)?;
        let default_value = match &child.default_value {
            Some(default) => Some(self.resolve(package, default, &location)?),
            None => None,
        };
        let getter = match self.arena.get(child.element).map(|d| &d.kind) {
            Some(DeclKind::Method { .. }) => format!("{}()", child.getter),
            _ => child.getter.clone(),
        };
        Ok(Child {
            getter,
            child_type: child.child_type.clone(),
            symbol,
            default_value,
            location,
        })
    }
}

fn sort_by_location<T>(arena: &DeclArena, items: &mut [&T], element: impl Fn(&T) -> DeclId) {
    items.sort_by_cached_key(|item| arena.location(element(*item)));
}

/// Allocate external styleables into the arena and rebuild them.
///
/// Each descriptor gets a fresh `Origin::External` type declaration for its
/// element; its styled type's supertype chain is added for types the arena
/// does not know yet, so parent links can walk across module boundaries.
///
/// Folding stops with E9001 if the arena runs out of ids.
#[tracing::instrument(level = "debug", skip_all)]
pub fn fold_external(
    arena: &mut DeclArena,
    manifests: &[ModuleManifest],
    errors: &mut ErrorAggregator,
) -> Vec<StyleableInfo> {
    let mut out = Vec::new();
    for manifest in manifests {
        for descriptor in &manifest.styleables {
            match fold_descriptor(arena, descriptor) {
                Ok(decl) => {
                    tracing::trace!(
                        module = %manifest.module,
                        styleable = %descriptor.element,
                        "folded external styleable"
                    );
                    out.push(StyleableInfo::from_descriptor(descriptor.clone(), decl));
                }
                Err(full) => {
                    errors.log(
                        Diagnostic::error(ErrorCode::E9001)
                            .with_message(format!(
                                "cannot load `{}` from module `{}`: {full}",
                                descriptor.element, manifest.module
                            ))
                            .with_label(descriptor.location.clone(), "external styleable"),
                    );
                    return out;
                }
            }
        }
    }
    out
}

/// Allocate one descriptor's element and any unknown supertypes.
fn fold_descriptor(
    arena: &mut DeclArena,
    descriptor: &StyleableDescriptor,
) -> Result<DeclId, ArenaFull> {
    let element_super = if descriptor.element == descriptor.styled_type {
        descriptor.supertypes.first().cloned()
    } else {
        None
    };
    let decl = arena.try_alloc(external_type(
        &descriptor.element,
        element_super,
        descriptor.location.clone(),
    ))?;

    let chain: Vec<&TypeName> = std::iter::once(&descriptor.styled_type)
        .chain(&descriptor.supertypes)
        .collect();
    for (i, ty) in chain.iter().enumerate() {
        if !arena.has_type(ty) {
            let supertype = chain.get(i + 1).map(|t| (*t).clone());
            arena.try_alloc(external_type(ty, supertype, Location::unknown()))?;
        }
    }
    Ok(decl)
}

fn external_type(ty: &TypeName, supertype: Option<TypeName>, location: Location) -> Declaration {
    Declaration {
        name: ty.simple().to_string(),
        kind: DeclKind::Type {
            ty: ty.clone(),
            supertype,
        },
        location,
        origin: Origin::External,
    }
}

#[cfg(test)]
mod tests;
