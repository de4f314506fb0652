//! Code generation context and output buffer.

use rustc_hash::FxHashSet;

use crate::runtime::GENERATED_HEADER;
use crate::GeneratedFile;

/// Output state for one generated Java file.
#[derive(Default)]
pub struct CodegenContext {
    /// Current indentation level.
    indent: usize,
    /// Class body output.
    output: String,
    /// Imported qualified names.
    imports: FxHashSet<&'static str>,
}

impl CodegenContext {
    pub fn new() -> Self {
        Self {
            indent: 0,
            output: String::with_capacity(4096),
            imports: FxHashSet::default(),
        }
    }

    /// Import a runtime type; the body refers to it by simple name.
    pub fn import(&mut self, qualified: &'static str) {
        self.imports.insert(qualified);
    }

    /// Increase indentation level.
    pub fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decrease indentation level.
    pub fn dedent(&mut self) {
        debug_assert!(self.indent > 0, "dedent called with zero indent");
        self.indent = self.indent.saturating_sub(1);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
    }

    /// Write a line to output (with indentation and newline).
    pub fn writeln(&mut self, s: &str) {
        self.write_indent();
        self.output.push_str(s);
        self.output.push('\n');
    }

    pub fn newline(&mut self) {
        self.output.push('\n');
    }

    /// Open a block: `header {` and indent.
    pub fn open(&mut self, header: &str) {
        self.writeln(&format!("{header} {{"));
        self.indent();
    }

    /// Close the innermost block.
    pub fn close(&mut self) {
        self.dedent();
        self.writeln("}");
    }

    /// Close the innermost block and open a continuation, e.g. `} else {`.
    pub fn reopen(&mut self, header: &str) {
        self.dedent();
        self.writeln(&format!("}} {header} {{"));
        self.indent();
    }

    /// Assemble the file: header, package, sorted imports, then the body.
    pub fn finish(self, package: &str, type_name: &str) -> GeneratedFile {
        let mut imports: Vec<&str> = self.imports.into_iter().collect();
        imports.sort_unstable();

        let mut contents = String::with_capacity(self.output.len() + 256);
        contents.push_str(GENERATED_HEADER);
        contents.push('\n');
        if !package.is_empty() {
            contents.push_str(&format!("package {package};\n\n"));
        }
        for import in &imports {
            contents.push_str(&format!("import {import};\n"));
        }
        if !imports.is_empty() {
            contents.push('\n');
        }
        contents.push_str(&self.output);

        GeneratedFile {
            package: package.to_string(),
            type_name: type_name.to_string(),
            contents,
        }
    }
}
