//! Names of the runtime types generated code builds on.

pub const GENERATED_HEADER: &str = "// Generated by parisc. Do not edit.";

pub const STYLE_APPLIER: &str = "com.airbnb.paris.StyleApplier";
pub const STYLE_BUILDER_BASE: &str = "com.airbnb.paris.BaseStyleBuilder";
pub const STYLE: &str = "com.airbnb.paris.styles.Style";
pub const EMPTY_STYLE: &str = "com.airbnb.paris.styles.EmptyStyle";
pub const TYPED_ARRAY_WRAPPER: &str = "com.airbnb.paris.typed_array_wrappers.TypedArrayWrapper";
pub const RESOURCES: &str = "android.content.res.Resources";

/// Package of the generated module index classes.
pub const MODULE_PACKAGE: &str = "com.airbnb.paris.modules";
pub const MODULE_PREFIX: &str = "ParisModule_";

/// Simple name of the facade class.
pub const FACADE_NAME: &str = "Paris";

/// Simple name of a qualified runtime type.
pub fn simple(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

/// Turn a module name into a Java identifier fragment.
///
/// Only ASCII alphanumerics and underscores are kept; anything else becomes
/// an underscore, and a leading digit gets an underscore prefix.
pub fn java_identifier(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 1);
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        result.push('_');
    }
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            result.push(c);
        } else {
            result.push('_');
        }
    }
    result
}
