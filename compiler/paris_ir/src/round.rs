//! Round input: everything the extraction step hands over for one round.

use serde::{Deserialize, Serialize};

use crate::{
    DeclArena, DeclId, DeclKind, Declaration, Location, ModuleManifest, Origin, Record,
    ResourceIndex, ResourceKind, StyleableMarker, TypeName,
};

/// The input of one processing round.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RoundInput {
    #[serde(default)]
    pub declarations: DeclArena,
    #[serde(default)]
    pub records: Vec<Record>,
    /// Manifests of dependency modules.
    #[serde(default)]
    pub external: Vec<ModuleManifest>,
    /// Packages known to declare a resource holder.
    #[serde(default)]
    pub known_holders: Vec<String>,
    #[serde(default)]
    pub resources: ResourceIndex,
    /// Set on the final round; diagnostics surface only then.
    #[serde(default)]
    pub processing_over: bool,
}

/// Incremental construction of a `RoundInput`.
///
/// Declarations get synthetic locations: each type lives in
/// `<Simple>.java`, and lines count up in allocation order.
#[derive(Default)]
pub struct RoundBuilder {
    input: RoundInput,
    next_line: u32,
}

impl RoundBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_location(&mut self, file: &str) -> Location {
        self.next_line += 1;
        Location::new(format!("{file}.java"), self.next_line)
    }

    fn owner_file(&self, owner: DeclId) -> String {
        self.input
            .declarations
            .enclosing_type(owner)
            .map(|t| t.simple().to_string())
            .unwrap_or_default()
    }

    /// Declare a type with an optional supertype.
    pub fn type_decl(&mut self, qualified: &str, supertype: Option<&str>) -> DeclId {
        let ty = TypeName::parse(qualified);
        let location = self.next_location(ty.simple());
        self.input.declarations.alloc(Declaration {
            name: ty.simple().to_string(),
            kind: DeclKind::Type {
                ty,
                supertype: supertype.map(TypeName::parse),
            },
            location,
            origin: Origin::Local,
        })
    }

    /// Declare an instance method on `owner`.
    pub fn method(&mut self, owner: DeclId, name: &str, params: &[&str]) -> DeclId {
        self.alloc_method(owner, name, params, false)
    }

    /// Declare a static method on `owner`.
    pub fn static_method(&mut self, owner: DeclId, name: &str, params: &[&str]) -> DeclId {
        self.alloc_method(owner, name, params, true)
    }

    fn alloc_method(
        &mut self,
        owner: DeclId,
        name: &str,
        params: &[&str],
        is_static: bool,
    ) -> DeclId {
        let file = self.owner_file(owner);
        let location = self.next_location(&file);
        self.input.declarations.alloc(Declaration {
            name: name.to_string(),
            kind: DeclKind::Method {
                owner,
                params: params.iter().map(|p| TypeName::parse(p)).collect(),
                is_static,
            },
            location,
            origin: Origin::Local,
        })
    }

    /// Declare a field on `owner`.
    pub fn field(&mut self, owner: DeclId, name: &str, ty: &str, is_static: bool) -> DeclId {
        let file = self.owner_file(owner);
        let location = self.next_location(&file);
        self.input.declarations.alloc(Declaration {
            name: name.to_string(),
            kind: DeclKind::Field {
                owner,
                ty: TypeName::parse(ty),
                is_static,
            },
            location,
            origin: Origin::Local,
        })
    }

    /// Mark `decl` styleable with an optional resource array name.
    pub fn styleable(&mut self, decl: DeclId, array: Option<&str>) -> &mut Self {
        self.record(Record::Styleable(StyleableMarker {
            decl,
            styleable_array: array.map(str::to_string),
            styled_type: None,
            empty_default_style: false,
        }))
    }

    pub fn record(&mut self, record: Record) -> &mut Self {
        self.input.records.push(record);
        self
    }

    pub fn external(&mut self, manifest: ModuleManifest) -> &mut Self {
        self.input.external.push(manifest);
        self
    }

    pub fn known_holder(&mut self, package: &str) -> &mut Self {
        self.input.known_holders.push(package.to_string());
        self
    }

    pub fn resource(&mut self, kind: ResourceKind, name: &str) -> &mut Self {
        self.input.resources.insert(kind, name);
        self
    }

    pub fn processing_over(&mut self, over: bool) -> &mut Self {
        self.input.processing_over = over;
        self
    }

    /// Borrow the arena built so far.
    pub fn declarations(&self) -> &DeclArena {
        &self.input.declarations
    }

    pub fn finish(self) -> RoundInput {
        self.input
    }
}

#[cfg(test)]
mod tests;
