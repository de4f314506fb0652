//! Per-styleable style applier emission.
//!
//! `apply(Style)` runs the parent applier first (ignoring attributes this
//! styleable shadows), then before hooks, own attributes in declaration
//! order, after hooks, and finally child styleables.

use paris_ir::naming::{capitalize, decapitalize, DEFAULT_STYLE_NAME};
use paris_ir::{
    Attr, DeclArena, DeclId, Format, ResolvedStyleSource, ResourceSymbol, Style, StyleableInfo,
    TypeName,
};
use paris_model::StyleablesTree;

use crate::context::CodegenContext;
use crate::runtime::{
    simple, EMPTY_STYLE, RESOURCES, STYLE, STYLE_APPLIER, STYLE_BUILDER_BASE, TYPED_ARRAY_WRAPPER,
};
use crate::{CodegenProblem, GeneratedFile};

/// Emit the applier class for the admitted local styleable `id`.
#[tracing::instrument(level = "debug", skip(tree, arena))]
pub fn emit_applier(
    tree: &StyleablesTree,
    arena: &DeclArena,
    id: DeclId,
) -> Result<GeneratedFile, CodegenProblem> {
    let node = tree.get(id).ok_or_else(|| CodegenProblem::NotInTree {
        location: arena.location(id),
    })?;
    let info = &node.info;

    let child_appliers = info
        .children
        .iter()
        .map(|child| {
            tree.find_styleable_for_type(arena, &child.child_type)
                .map(|s| &s.applier)
                .ok_or_else(|| CodegenProblem::MissingChildApplier {
                    styleable: info.element.clone(),
                    child_type: child.child_type.clone(),
                    location: child.location.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut shadowed: Vec<&ResourceSymbol> = Vec::new();
    for attr in tree.shadowed_attrs(id) {
        if !shadowed.contains(&&attr.symbol) {
            shadowed.push(&attr.symbol);
        }
    }

    let emitter = ApplierEmitter {
        ctx: CodegenContext::new(),
        info,
        parent: tree.parent(id),
        shadowed,
        child_appliers,
    };
    Ok(emitter.emit())
}

struct ApplierEmitter<'a> {
    ctx: CodegenContext,
    info: &'a StyleableInfo,
    parent: Option<&'a StyleableInfo>,
    shadowed: Vec<&'a ResourceSymbol>,
    /// Applier type for each child, in `info.children` order.
    child_appliers: Vec<&'a TypeName>,
}

impl ApplierEmitter<'_> {
    fn emit(mut self) -> GeneratedFile {
        let info = self.info;
        let applier = info.applier.simple();
        self.ctx.import(STYLE_APPLIER);
        self.ctx.import(STYLE);

        self.ctx.open(&format!(
            "public final class {applier} extends {}<{}, {}>",
            simple(STYLE_APPLIER),
            info.element,
            info.styled_type
        ));

        if !self.shadowed.is_empty() {
            let symbols: Vec<String> = self.shadowed.iter().map(ToString::to_string).collect();
            self.ctx.writeln(&format!(
                "private static final int[] SHADOWED_ATTRS = {{ {} }};",
                symbols.join(", ")
            ));
            self.ctx.newline();
        }

        self.emit_constructor();
        if let Some(array) = &info.styleable_array {
            self.ctx.newline();
            self.ctx.writeln("@Override");
            self.ctx.open("protected int[] attributes()");
            self.ctx.writeln(&format!("return {array};"));
            self.ctx.close();
        }

        self.ctx.newline();
        self.emit_apply();
        if let Some(parent) = self.parent {
            self.ctx.newline();
            self.emit_apply_parent(parent);
        }
        if info.styleable_array.is_some() && !info.attrs.is_empty() {
            self.ctx.newline();
            self.emit_process_attributes();
        }
        if info.styleable_array.is_some() && !info.children.is_empty() {
            self.ctx.newline();
            self.emit_process_styleable_fields();
        }
        self.emit_styles();

        self.ctx.newline();
        self.ctx.open("public StyleBuilder builder()");
        self.ctx.writeln("return new StyleBuilder(this);");
        self.ctx.close();

        self.ctx.newline();
        self.emit_style_builder();
        self.ctx.close();

        self.ctx.finish(info.applier.package(), applier)
    }

    fn emit_constructor(&mut self) {
        let info = self.info;
        self.ctx.open(&format!(
            "public {}({} view)",
            info.applier.simple(),
            info.styled_type
        ));
        if info.is_proxy() {
            self.ctx.writeln(&format!("super(new {}(view));", info.element));
        } else {
            self.ctx.writeln("super(view);");
        }
        self.ctx.close();
    }

    fn emit_apply(&mut self) {
        let info = self.info;
        self.ctx.writeln("@Override");
        self.ctx.open(&format!("public void apply({} style)", simple(STYLE)));
        if self.parent.is_some() {
            self.ctx.writeln("applyParent(style);");
        }
        for hook in &info.before {
            self.ctx.writeln(&format!("getProxy().{}(getView());", hook.method));
        }

        if info.styleable_array.is_some() {
            self.ctx.import(TYPED_ARRAY_WRAPPER);
            self.ctx.writeln(&format!(
                "{} a = style.obtainStyledAttributes(getView().getContext(), attributes());",
                simple(TYPED_ARRAY_WRAPPER)
            ));
            self.ctx.open("try");
            if !info.attrs.is_empty() {
                self.ctx.writeln("processAttributes(style, a);");
            }
            self.emit_after_hooks();
            if !info.children.is_empty() {
                self.ctx.writeln("processStyleableFields(style, a);");
            }
            self.ctx.reopen("finally");
            self.ctx.writeln("a.recycle();");
            self.ctx.close();
        } else {
            self.emit_after_hooks();
        }
        self.ctx.close();
    }

    fn emit_after_hooks(&mut self) {
        for hook in &self.info.after {
            self.ctx.writeln(&format!("getProxy().{}(getView());", hook.method));
        }
    }

    fn emit_apply_parent(&mut self, parent: &StyleableInfo) {
        self.ctx.open(&format!("private void applyParent({} style)", simple(STYLE)));
        self.ctx.writeln(&format!(
            "{0} applier = new {0}(getView());",
            parent.applier
        ));
        if !self.shadowed.is_empty() {
            self.ctx.writeln("applier.setIgnoredAttributes(SHADOWED_ATTRS);");
        }
        self.ctx.writeln("applier.apply(style);");
        self.ctx.close();

        if !self.shadowed.is_empty() {
            self.ctx.newline();
            self.ctx.open(&format!(
                "public void applyAncestorAttributes({} style)",
                simple(STYLE)
            ));
            self.ctx.writeln(&format!("new {}(getView()).apply(style);", parent.applier));
            self.ctx.close();
        }
    }

    fn emit_process_attributes(&mut self) {
        let info = self.info;
        self.ctx.open(&format!(
            "private void processAttributes({} style, {} a)",
            simple(STYLE),
            simple(TYPED_ARRAY_WRAPPER)
        ));
        if info
            .attrs
            .iter()
            .any(|a| a.default_value.is_some() && a.format.resources_getter().is_some())
        {
            self.ctx.import(RESOURCES);
            self.ctx.writeln(&format!(
                "{} res = getView().getContext().getResources();",
                simple(RESOURCES)
            ));
        }
        for attr in &info.attrs {
            self.emit_attr(attr);
        }
        self.ctx.close();
    }

    fn emit_attr(&mut self, attr: &Attr) {
        let symbol = &attr.symbol;
        self.ctx.open(&format!("if (a.hasValue({symbol}))"));
        self.ctx.writeln(&format!(
            "getProxy().{}(a.{}({symbol}));",
            attr.setter,
            attr.format.typed_array_getter()
        ));
        if let Some(default) = &attr.default_value {
            self.ctx.reopen("else if (style.getShouldApplyDefaults())");
            let value = default_value(attr.format, default);
            self.ctx.writeln(&format!("getProxy().{}({value});", attr.setter));
        }
        self.ctx.close();
    }

    fn emit_process_styleable_fields(&mut self) {
        let info = self.info;
        self.ctx.open(&format!(
            "private void processStyleableFields({} style, {} a)",
            simple(STYLE),
            simple(TYPED_ARRAY_WRAPPER)
        ));
        for (child, applier) in info.children.iter().zip(&self.child_appliers) {
            let symbol = &child.symbol;
            let target = format!("new {applier}(getView().{})", child.getter);
            self.ctx.open(&format!("if (a.hasValue({symbol}))"));
            self.ctx.writeln(&format!("{target}.apply(a.getStyle({symbol}));"));
            if let Some(default) = &child.default_value {
                self.ctx.reopen("else if (style.getShouldApplyDefaults())");
                self.ctx.writeln(&format!("{target}.apply({default});"));
            }
            self.ctx.close();
        }
        self.ctx.close();
    }

    fn emit_styles(&mut self) {
        let info = self.info;
        if info.styles.is_empty() {
            return;
        }

        self.ctx.newline();
        self.ctx.open("public void applyStyle(String name)");
        self.ctx.open("switch (name)");
        for style in &info.styles {
            self.emit_case(&style.name);
        }
        if info.default_style().is_some() && !info.has_default_named_default() {
            self.emit_case(DEFAULT_STYLE_NAME);
        }
        self.ctx.writeln("default:");
        self.ctx.indent();
        self.ctx
            .writeln("throw new IllegalArgumentException(\"Unknown style: \" + name);");
        self.ctx.dedent();
        self.ctx.close();
        self.ctx.close();

        for style in &info.styles {
            self.ctx.newline();
            self.ctx
                .open(&format!("public void apply{}()", capitalize(&style.name)));
            self.emit_style_body(style);
            self.ctx.close();
        }

        if let Some(default) = info.default_style() {
            if !info.has_default_named_default() {
                self.ctx.newline();
                self.ctx.open("public void applyDefault()");
                self.ctx
                    .writeln(&format!("apply{}();", capitalize(&default.name)));
                self.ctx.close();
            }
        }
    }

    fn emit_case(&mut self, name: &str) {
        self.ctx.writeln(&format!("case \"{name}\":"));
        self.ctx.indent();
        self.ctx.writeln(&format!("apply{}();", capitalize(name)));
        self.ctx.writeln("break;");
        self.ctx.dedent();
    }

    fn emit_style_body(&mut self, style: &Style) {
        match &style.source {
            ResolvedStyleSource::Resource { symbol } => {
                self.ctx.writeln(&format!("apply({symbol});"));
            }
            ResolvedStyleSource::Programmatic { owner, method } => {
                self.ctx
                    .writeln("StyleBuilder builder = new StyleBuilder();");
                self.ctx.writeln(&format!("{owner}.{method}(builder);"));
                self.ctx.writeln("apply(builder.build());");
            }
            ResolvedStyleSource::Empty => {
                self.ctx.import(EMPTY_STYLE);
                self.ctx
                    .writeln(&format!("apply(new {}());", simple(EMPTY_STYLE)));
            }
        }
    }

    fn emit_style_builder(&mut self) {
        let info = self.info;
        let applier = info.applier.simple();
        self.ctx.import(STYLE_BUILDER_BASE);
        self.ctx.open(&format!(
            "public static final class StyleBuilder extends {}<StyleBuilder, {applier}>",
            simple(STYLE_BUILDER_BASE)
        ));
        self.ctx.open("public StyleBuilder()");
        self.ctx.writeln("super();");
        self.ctx.close();
        self.ctx.newline();
        self.ctx.open(&format!("public StyleBuilder({applier} applier)"));
        self.ctx.writeln("super(applier);");
        self.ctx.close();

        for attr in &info.attrs {
            self.emit_builder_setter(&attr.symbol, &attr.target_type.to_string());
        }
        for child in &info.children {
            self.emit_builder_setter(&child.symbol, "int");
        }

        for style in &info.styles {
            self.ctx.newline();
            self.ctx
                .open(&format!("public StyleBuilder add{}()", capitalize(&style.name)));
            match &style.source {
                ResolvedStyleSource::Resource { symbol } => {
                    self.ctx.writeln(&format!("add({symbol});"));
                }
                ResolvedStyleSource::Programmatic { owner, method } => {
                    self.ctx.writeln(&format!("{owner}.{method}(this);"));
                }
                ResolvedStyleSource::Empty => {
                    self.ctx.import(EMPTY_STYLE);
                    self.ctx
                        .writeln(&format!("add(new {}());", simple(EMPTY_STYLE)));
                }
            }
            self.ctx.writeln("return this;");
            self.ctx.close();
        }
        if let Some(default) = info.default_style() {
            if !info.has_default_named_default() {
                self.ctx.newline();
                self.ctx.open("public StyleBuilder addDefault()");
                self.ctx
                    .writeln(&format!("return add{}();", capitalize(&default.name)));
                self.ctx.close();
            }
        }
        self.ctx.close();
    }

    fn emit_builder_setter(&mut self, symbol: &ResourceSymbol, value_type: &str) {
        let name = builder_setter_name(self.info, symbol);
        self.ctx.newline();
        self.ctx
            .open(&format!("public StyleBuilder {name}({value_type} value)"));
        self.ctx
            .writeln(&format!("getBuilder().put({symbol}, value);"));
        self.ctx.writeln("return this;");
        self.ctx.close();
    }
}

/// Builder setter for an attribute resource: its name without the
/// `<array>_` prefix, lowerCamel.
fn builder_setter_name(info: &StyleableInfo, symbol: &ResourceSymbol) -> String {
    let name = info
        .styleable_array
        .as_ref()
        .and_then(|array| symbol.name.strip_prefix(array.name.as_str()))
        .and_then(|rest| rest.strip_prefix('_'))
        .unwrap_or(&symbol.name);
    decapitalize(name)
}

/// Java expression reading a default value resource.
fn default_value(format: Format, default: &ResourceSymbol) -> String {
    match format.resources_getter() {
        Some(getter) => format!("res.{getter}({default})"),
        None => default.to_string(),
    }
}
