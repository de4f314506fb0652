//! Module index class emission.

use paris_ir::StyleableInfo;

use crate::context::CodegenContext;
use crate::runtime::{java_identifier, MODULE_PACKAGE, MODULE_PREFIX};
use crate::GeneratedFile;

/// Emit `ParisModule_<module>`, enumerating the module's styleables by
/// styled type with a class-name lookup of their appliers.
pub fn emit_module(module: &str, styleables: &[&StyleableInfo]) -> GeneratedFile {
    let mut sorted = styleables.to_vec();
    sorted.sort_by(|a, b| a.styled_type.cmp(&b.styled_type));

    let class = format!("{MODULE_PREFIX}{}", java_identifier(module));
    let mut ctx = CodegenContext::new();
    ctx.open(&format!("public final class {class}"));

    ctx.open("public static final String[] STYLEABLES =");
    for info in &sorted {
        ctx.writeln(&format!("\"{}\",", info.styled_type));
    }
    ctx.dedent();
    ctx.writeln("};");

    ctx.newline();
    ctx.open(&format!("private {class}()"));
    ctx.close();

    ctx.newline();
    ctx.open("public static Class<?> applierFor(String styleable)");
    ctx.open("switch (styleable)");
    for info in &sorted {
        ctx.writeln(&format!("case \"{}\":", info.styled_type));
        ctx.indent();
        ctx.writeln(&format!("return {}.class;", info.applier));
        ctx.dedent();
    }
    ctx.writeln("default:");
    ctx.indent();
    ctx.writeln("return null;");
    ctx.dedent();
    ctx.close();
    ctx.close();

    ctx.close();
    ctx.finish(MODULE_PACKAGE, &class)
}
