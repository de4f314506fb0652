//! The `Paris` facade: one entry point mapping views to their appliers.

use paris_ir::StyleableInfo;

use crate::context::CodegenContext;
use crate::runtime::FACADE_NAME;
use crate::GeneratedFile;

/// Emit the facade into `package` covering every styleable given, local
/// and external.
pub fn emit_facade(package: &str, styleables: &[&StyleableInfo]) -> GeneratedFile {
    let mut sorted = styleables.to_vec();
    sorted.sort_by(|a, b| a.styled_type.cmp(&b.styled_type));

    let mut ctx = CodegenContext::new();
    ctx.open(&format!("public final class {FACADE_NAME}"));
    ctx.open(&format!("private {FACADE_NAME}()"));
    ctx.close();

    for info in &sorted {
        let applier = &info.applier;
        let view = &info.styled_type;

        ctx.newline();
        ctx.open(&format!("public static {applier} style({view} view)"));
        ctx.writeln(&format!("return new {applier}(view);"));
        ctx.close();

        ctx.newline();
        ctx.open(&format!(
            "public static {applier}.StyleBuilder styleBuilder({view} view)"
        ));
        ctx.writeln(&format!("return new {applier}(view).builder();"));
        ctx.close();
    }

    ctx.close();
    ctx.finish(package, FACADE_NAME)
}
