//! Resource holder location (`RFinder`).
//!
//! Location runs once per round and stops at the first source that names a
//! holder:
//! 1. the config's explicit `r_class`
//! 2. the declared holder of the first module resource referenced by an
//!    attribute or child styleable
//! 3. the nearest enclosing package of a styleable that is known to
//!    declare a holder
//!
//! Once located, the holder is kept for the rest of the processing run.
//! Without one, every use-site package resolves to its own `<package>.R`.
//!
//! A package resolves to the same holder for the whole run: answers given
//! before the holder was located stay cached, and only packages resolved
//! afterwards use it.

use rustc_hash::FxHashMap;

use paris_ir::{
    ConfigInfo, HolderRef, HolderSymbol, ResourceIndex, ResourceRef, ResourceSymbol,
};

use crate::ResolveError;

/// Which location step produced the holder.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum HolderSource {
    Config,
    ResourceReference,
    PackageWalk,
}

/// Resolves use-site resource references to module-correct symbols.
#[derive(Clone, Debug, Default)]
pub struct RFinder {
    holder: Option<(HolderSymbol, HolderSource)>,
    cache: FxHashMap<String, HolderSymbol>,
    name_format: Option<String>,
}

impl RFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The located holder, if any.
    pub fn holder(&self) -> Option<&HolderSymbol> {
        self.holder.as_ref().map(|(h, _)| h)
    }

    /// The step that located the holder.
    pub fn source(&self) -> Option<HolderSource> {
        self.holder.as_ref().map(|(_, s)| *s)
    }

    fn set_holder(&mut self, holder: HolderSymbol, source: HolderSource) {
        if self.holder.is_some() {
            return;
        }
        tracing::debug!(holder = %holder, ?source, "located resource holder");
        self.holder = Some((holder, source));
    }

    /// Apply the (first) config declaration.
    ///
    /// An explicit `r_class` locates the holder. A malformed style name
    /// format is rejected and leaves default style naming off.
    pub fn configure(&mut self, config: &ConfigInfo) -> Result<(), ResolveError> {
        if let Some(r_class) = &config.r_class {
            self.set_holder(HolderSymbol::new(r_class.package()), HolderSource::Config);
        }
        if !config.is_format_valid() {
            return Err(ResolveError::MalformedNameFormat {
                format: config.default_style_name_format.clone(),
            });
        }
        if !config.default_style_name_format.is_empty() {
            self.name_format = Some(config.default_style_name_format.clone());
        }
        Ok(())
    }

    /// Locate the holder from this round's references and styleables.
    ///
    /// No-op once a holder has been located.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn locate<'a>(
        &mut self,
        references: impl IntoIterator<Item = &'a ResourceRef>,
        styleable_packages: impl IntoIterator<Item = &'a str>,
        known_holders: &[String],
    ) {
        if self.holder.is_some() {
            return;
        }

        if let Some(package) = references.into_iter().find_map(ResourceRef::declared_package) {
            self.set_holder(HolderSymbol::new(package), HolderSource::ResourceReference);
            return;
        }

        for package in styleable_packages {
            let found = enclosing_packages(package)
                .find(|candidate| known_holders.iter().any(|known| known == candidate));
            if let Some(candidate) = found {
                self.set_holder(HolderSymbol::new(candidate), HolderSource::PackageWalk);
                return;
            }
        }

        tracing::debug!("no resource holder located; using per-package holders");
    }

    /// The holder generated code in `use_site_package` must reference.
    pub fn resolve(&mut self, use_site_package: &str) -> HolderSymbol {
        if let Some(holder) = self.cache.get(use_site_package) {
            return holder.clone();
        }
        let holder = match &self.holder {
            Some((holder, _)) => holder.clone(),
            None => HolderSymbol::new(use_site_package),
        };
        tracing::trace!(package = use_site_package, holder = %holder, "resolved holder");
        self.cache
            .insert(use_site_package.to_string(), holder.clone());
        holder
    }

    /// Bind a use-site reference to a concrete symbol.
    ///
    /// Existence is only checked against a non-empty `resources` index;
    /// framework resources are never checked.
    pub fn resolve_ref(
        &mut self,
        use_site_package: &str,
        resource: &ResourceRef,
        resources: &ResourceIndex,
    ) -> Result<ResourceSymbol, ResolveError> {
        match &resource.holder {
            HolderRef::Framework => {
                Ok(HolderSymbol::framework().symbol(resource.kind, resource.name.clone()))
            }
            HolderRef::Unknown => Err(ResolveError::UntracedHolder {
                resource: resource.clone(),
            }),
            HolderRef::Package(_) => {
                if !resources.is_empty() && !resources.contains(resource.kind, &resource.name) {
                    return Err(ResolveError::MissingResource {
                        resource: resource.clone(),
                    });
                }
                Ok(self
                    .resolve(use_site_package)
                    .symbol(resource.kind, resource.name.clone()))
            }
        }
    }

    /// The default style resource name for a styleable, from the config's
    /// name format.
    pub fn default_style_name(&self, styleable_simple_name: &str) -> Option<String> {
        self.name_format
            .as_ref()
            .map(|format| format.replacen(ConfigInfo::PLACEHOLDER, styleable_simple_name, 1))
    }
}

/// `a.b.c`, `a.b`, `a`.
fn enclosing_packages(package: &str) -> impl Iterator<Item = &str> {
    std::iter::successors(Some(package), |p| p.rsplit_once('.').map(|(parent, _)| parent))
}

#[cfg(test)]
mod tests;
