//! Inheritance Graph Builder (`StyleablesTree`).
//!
//! Local and external styleables are keyed by declaration identity. Each
//! styleable's parent is the nearest supertype of its styled type that is
//! itself styleable. Cycles exclude every member and every descendant of the
//! cycle; the rest of the graph is unaffected.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use paris_diagnostic::{Diagnostic, ErrorAggregator, ErrorCode};
use paris_ir::{
    Attr, DeclArena, DeclId, Location, ResolvedStyleSource, ResourceSymbol, StyleableInfo,
    TypeName,
};

/// One admitted styleable and its links.
#[derive(Clone, Debug)]
pub struct StyleableNode {
    pub info: StyleableInfo,
    pub parent: Option<DeclId>,
    pub children: SmallVec<[DeclId; 4]>,
    /// Ancestors, nearest first.
    pub ancestors: SmallVec<[DeclId; 4]>,
}

/// The inheritance graph of one round. Immutable once built.
#[derive(Clone, Debug, Default)]
pub struct StyleablesTree {
    nodes: FxHashMap<DeclId, StyleableNode>,
    /// Admitted styleables: locals in build order, then externals.
    order: Vec<DeclId>,
    by_type: FxHashMap<TypeName, DeclId>,
    excluded: Vec<DeclId>,
}

impl StyleablesTree {
    pub fn get(&self, id: DeclId) -> Option<&StyleableNode> {
        self.nodes.get(&id)
    }

    pub fn info(&self, id: DeclId) -> Option<&StyleableInfo> {
        self.nodes.get(&id).map(|n| &n.info)
    }

    /// Admitted styleables in build order.
    pub fn iter(&self) -> impl Iterator<Item = &StyleableNode> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Admitted local styleables, in build order.
    pub fn local(&self) -> impl Iterator<Item = &StyleableInfo> {
        self.iter().map(|n| &n.info).filter(|i| !i.is_external())
    }

    /// Admitted external styleables.
    pub fn external(&self) -> impl Iterator<Item = &StyleableInfo> {
        self.iter().map(|n| &n.info).filter(|i| i.is_external())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Styleables excluded by inheritance cycles.
    pub fn excluded(&self) -> &[DeclId] {
        &self.excluded
    }

    pub fn parent(&self, id: DeclId) -> Option<&StyleableInfo> {
        let parent = self.nodes.get(&id)?.parent?;
        self.info(parent)
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: DeclId) -> impl Iterator<Item = &StyleableInfo> {
        self.nodes
            .get(&id)
            .into_iter()
            .flat_map(|n| n.ancestors.iter())
            .filter_map(|a| self.info(*a))
    }

    /// The styleable whose styled type is exactly `ty`.
    pub fn by_styled_type(&self, ty: &TypeName) -> Option<&StyleableInfo> {
        self.by_type.get(ty).and_then(|id| self.info(*id))
    }

    /// The nearest styleable for `ty`: itself, or its closest styleable
    /// supertype.
    pub fn find_styleable_for_type(
        &self,
        arena: &DeclArena,
        ty: &TypeName,
    ) -> Option<&StyleableInfo> {
        self.by_styled_type(ty)
            .or_else(|| arena.supertypes(ty).find_map(|t| self.by_styled_type(t)))
    }

    /// Ancestor attributes redeclared by `id` with the same resource symbol.
    pub fn shadowed_attrs(&self, id: DeclId) -> Vec<&Attr> {
        let Some(node) = self.nodes.get(&id) else {
            return Vec::new();
        };
        let own: FxHashSet<&ResourceSymbol> = node.info.attrs.iter().map(|a| &a.symbol).collect();
        node.ancestors
            .iter()
            .filter_map(|a| self.nodes.get(a))
            .flat_map(|n| n.info.attrs.iter())
            .filter(|a| own.contains(&a.symbol))
            .collect()
    }
}

/// How a styleable's supertype walk ended.
enum Link {
    Root,
    Parent(DeclId),
    /// The walk revisited a non-styleable type.
    TypeCycle(SmallVec<[TypeName; 8]>),
}

fn walk_to_parent(
    arena: &DeclArena,
    by_type: &FxHashMap<TypeName, DeclId>,
    info: &StyleableInfo,
) -> Link {
    let mut seen: SmallVec<[&TypeName; 8]> = SmallVec::new();
    seen.push(&info.styled_type);
    let mut current = info.supertype.as_ref();

    while let Some(ty) = current {
        if let Some(&parent) = by_type.get(ty) {
            return Link::Parent(parent);
        }
        if let Some(pos) = seen.iter().position(|t| *t == ty) {
            let mut cycle: SmallVec<[TypeName; 8]> =
                seen[pos..].iter().map(|t| (*t).clone()).collect();
            cycle.push(ty.clone());
            return Link::TypeCycle(cycle);
        }
        seen.push(ty);
        current = arena.supertype_of(ty);
    }
    Link::Root
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum State {
    InPath,
    Admitted,
    Excluded,
}

/// Same inheritance level: the same styleable parent, or for roots the same
/// declared supertype.
#[derive(Clone, Eq, PartialEq, Hash)]
enum Level {
    Styleable(DeclId),
    Root(Option<TypeName>),
}

/// Build the inheritance graph. Local styleables shadow external ones for
/// the same styled type.
#[tracing::instrument(level = "debug", skip_all)]
pub fn build_tree(
    arena: &DeclArena,
    local: Vec<StyleableInfo>,
    external: Vec<StyleableInfo>,
    errors: &mut ErrorAggregator,
) -> StyleablesTree {
    let mut tree = StyleablesTree::default();
    admit(&mut tree, local, external, errors);

    let links: FxHashMap<DeclId, Link> = tree
        .order
        .iter()
        .filter_map(|id| tree.nodes.get(id))
        .map(|n| (n.info.decl, walk_to_parent(arena, &tree.by_type, &n.info)))
        .collect();

    let states = classify(&tree, &links, errors);

    tree.excluded = tree
        .order
        .iter()
        .copied()
        .filter(|id| states.get(id) == Some(&State::Excluded))
        .collect();
    for id in &tree.excluded {
        if let Some(node) = tree.nodes.remove(id) {
            tree.by_type.remove(&node.info.styled_type);
            tracing::debug!(styleable = %node.info.element, "excluded by inheritance cycle");
        }
    }
    tree.order.retain(|id| tree.nodes.contains_key(id));

    link(&mut tree, &links);
    check_sibling_defaults(&tree, errors);
    tree
}

fn admit(
    tree: &mut StyleablesTree,
    local: Vec<StyleableInfo>,
    external: Vec<StyleableInfo>,
    errors: &mut ErrorAggregator,
) {
    for info in local {
        if let Some(first) = tree.by_type.get(&info.styled_type).and_then(|id| tree.nodes.get(id)) {
            errors.log(
                Diagnostic::error(ErrorCode::E2007)
                    .with_message(format!(
                        "`{}` is styled by more than one styleable",
                        info.styled_type
                    ))
                    .with_label(info.location.clone(), format!("`{}` declared here", info.element))
                    .with_secondary_label(
                        first.info.location.clone(),
                        format!("`{}` declared here", first.info.element),
                    ),
            );
            continue;
        }
        insert(tree, info);
    }
    for info in external {
        if let Some(existing) = tree.by_type.get(&info.styled_type) {
            tracing::debug!(
                styled_type = %info.styled_type,
                kept = ?existing,
                "external styleable shadowed"
            );
            continue;
        }
        insert(tree, info);
    }
}

fn insert(tree: &mut StyleablesTree, info: StyleableInfo) {
    let id = info.decl;
    tree.by_type.insert(info.styled_type.clone(), id);
    tree.order.push(id);
    tree.nodes.insert(
        id,
        StyleableNode {
            info,
            parent: None,
            children: SmallVec::new(),
            ancestors: SmallVec::new(),
        },
    );
}

/// Walk parent links from every node; report each cycle once.
fn classify(
    tree: &StyleablesTree,
    links: &FxHashMap<DeclId, Link>,
    errors: &mut ErrorAggregator,
) -> FxHashMap<DeclId, State> {
    let mut states: FxHashMap<DeclId, State> = FxHashMap::default();

    for &start in &tree.order {
        if states.contains_key(&start) {
            continue;
        }
        let mut path: SmallVec<[DeclId; 8]> = SmallVec::new();
        let mut current = start;
        let outcome = loop {
            match states.get(&current) {
                Some(State::Admitted) => break State::Admitted,
                Some(State::Excluded) => break State::Excluded,
                Some(State::InPath) => {
                    let pos = path.iter().position(|&d| d == current).unwrap_or(0);
                    report_cycle(tree, &path[pos..], errors);
                    break State::Excluded;
                }
                None => {}
            }
            states.insert(current, State::InPath);
            path.push(current);
            match links.get(&current) {
                Some(Link::Parent(parent)) => current = *parent,
                Some(Link::TypeCycle(types)) => {
                    report_type_cycle(tree, current, types, errors);
                    break State::Excluded;
                }
                Some(Link::Root) | None => break State::Admitted,
            }
        };
        for id in path {
            states.insert(id, outcome);
        }
    }
    states
}

fn report_cycle(tree: &StyleablesTree, members: &[DeclId], errors: &mut ErrorAggregator) {
    let infos: SmallVec<[&StyleableInfo; 8]> =
        members.iter().filter_map(|id| tree.info(*id)).collect();
    let Some(start) = infos
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.location.cmp(&b.location))
        .map(|(i, _)| i)
    else {
        return;
    };
    let rotated: SmallVec<[&StyleableInfo; 8]> = infos[start..]
        .iter()
        .chain(&infos[..start])
        .copied()
        .collect();

    let mut names: Vec<String> = rotated.iter().map(|i| i.styled_type.qualified()).collect();
    names.push(rotated[0].styled_type.qualified());

    let mut diag = Diagnostic::error(ErrorCode::E2002)
        .with_message(format!("cyclic styleable inheritance: {}", names.join(" -> ")))
        .with_label(rotated[0].location.clone(), "part of the cycle");
    for info in &rotated[1..] {
        diag = diag.with_secondary_label(info.location.clone(), "part of the cycle");
    }
    errors.log(
        diag.with_note("no style applier is generated for these styleables or their subclasses"),
    );
}

fn report_type_cycle(
    tree: &StyleablesTree,
    id: DeclId,
    types: &[TypeName],
    errors: &mut ErrorAggregator,
) {
    let location = tree.info(id).map_or_else(Location::unknown, |i| i.location.clone());
    let names: Vec<String> = types.iter().map(TypeName::qualified).collect();
    errors.log(
        Diagnostic::error(ErrorCode::E2002)
            .with_message(format!("cyclic inheritance: {}", names.join(" -> ")))
            .with_label(location, "styleable inherits from the cycle")
            .with_note("no style applier is generated for this styleable"),
    );
}

/// Set parents, children and ancestor chains for admitted nodes.
fn link(tree: &mut StyleablesTree, links: &FxHashMap<DeclId, Link>) {
    let parents: Vec<(DeclId, DeclId)> = tree
        .order
        .iter()
        .filter_map(|id| match links.get(id) {
            Some(Link::Parent(parent)) if tree.nodes.contains_key(parent) => Some((*id, *parent)),
            _ => None,
        })
        .collect();

    for &(child, parent) in &parents {
        if let Some(node) = tree.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = tree.nodes.get_mut(&parent) {
            node.children.push(child);
        }
    }

    let parent_of: FxHashMap<DeclId, DeclId> = parents.into_iter().collect();
    for id in &tree.order {
        let mut ancestors: SmallVec<[DeclId; 4]> = SmallVec::new();
        let mut current = parent_of.get(id);
        while let Some(&parent) = current {
            ancestors.push(parent);
            current = parent_of.get(&parent);
        }
        if let Some(node) = tree.nodes.get_mut(id) {
            node.ancestors = ancestors;
        }
    }
}

/// Local siblings must not share a default style resource.
fn check_sibling_defaults(tree: &StyleablesTree, errors: &mut ErrorAggregator) {
    let mut seen: FxHashMap<(Level, &ResourceSymbol), &StyleableNode> = FxHashMap::default();

    for node in tree.iter().filter(|n| !n.info.is_external()) {
        let Some(default) = node.info.default_style() else {
            continue;
        };
        let ResolvedStyleSource::Resource { symbol } = &default.source else {
            continue;
        };
        let level = match node.parent {
            Some(parent) => Level::Styleable(parent),
            None => Level::Root(node.info.supertype.clone()),
        };
        match seen.get(&(level.clone(), symbol)) {
            Some(first) => {
                errors.log(
                    Diagnostic::error(ErrorCode::E2009)
                        .with_message(format!(
                            "`{}` and `{}` share the default style `{}`",
                            first.info.element, node.info.element, symbol.name
                        ))
                        .with_label(default_location(node), "default style declared here")
                        .with_secondary_label(default_location(first), "also the default here")
                        .with_note(
                            "styleables at the same inheritance level need distinct default styles",
                        ),
                );
            }
            None => {
                seen.insert((level, symbol), node);
            }
        }
    }
}

fn default_location(node: &StyleableNode) -> Location {
    match node.info.default_style() {
        Some(style) if style.location.is_known() => style.location.clone(),
        _ => node.info.location.clone(),
    }
}
