//! Per-type state and emission helpers shared by the declaration roles.

use crate::ast::{
    BodyDeclaration, FieldDeclaration, JavaType, LiteralValue, MethodDeclaration, Modifier,
    Modifiers, TypeDeclaration, VariableFragment,
};
use crate::error::{Error, Result};
use crate::generators::base::literal;
use crate::generators::base::name_table::{capitalize, needs_objc_method_family_none, NameTable};
use crate::generators::base::source_builder::{pad, SourceBuilder};
use crate::interface::config::TranslationOptions;
use crate::models::SourceMapping;
use std::cmp::Ordering;

/// The constant a static slot is initialized with at file scope.
pub fn static_storage_value(fragment: &VariableFragment) -> Option<&LiteralValue> {
    fragment
        .constant_value
        .as_ref()
        .filter(|value| literal::is_compile_time_constant(value))
}

/// Whether `+initialize` assigns the fragment: it has a non-constant
/// initializer, or a constant that C cannot take as a static initializer.
pub fn needs_runtime_assignment(fragment: &VariableFragment) -> bool {
    match &fragment.constant_value {
        Some(value) => !literal::is_compile_time_constant(value),
        None => fragment.initializer.is_some(),
    }
}

/// Read-only inputs shared by every generator working on one unit.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorContext<'a> {
    pub options: &'a TranslationOptions,
    pub names: &'a NameTable,
    /// Java source path of the compilation unit, e.g. `com/foo/Bar.java`.
    pub source_path: &'a str,
}

impl<'a> GeneratorContext<'a> {
    pub fn new(options: &'a TranslationOptions, names: &'a NameTable, source_path: &'a str) -> Self {
        Self {
            options,
            names,
            source_path,
        }
    }

    pub fn source_file_name(&self) -> &'a str {
        self.source_path
            .rsplit('/')
            .next()
            .unwrap_or(self.source_path)
    }
}

/// Access groups used for `#pragma mark` sections, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Visibility {
    Public,
    Protected,
    PackagePrivate,
    Private,
}

impl Visibility {
    pub fn of(modifiers: &Modifiers) -> Self {
        if modifiers.has(Modifier::Public) {
            Visibility::Public
        } else if modifiers.has(Modifier::Protected) {
            Visibility::Protected
        } else if modifiers.has(Modifier::Private) {
            Visibility::Private
        } else {
            Visibility::PackagePrivate
        }
    }

    pub fn pragma(&self) -> &'static str {
        match self {
            Visibility::Public => "#pragma mark Public",
            Visibility::Protected => "#pragma mark Protected",
            Visibility::PackagePrivate => "#pragma mark Package-Private",
            Visibility::Private => "#pragma mark Private",
        }
    }
}

pub struct TypeGenerator<'a> {
    pub ctx: GeneratorContext<'a>,
    pub decl: &'a TypeDeclaration,
    pub type_name: String,
}

impl<'a> TypeGenerator<'a> {
    pub fn new(ctx: GeneratorContext<'a>, decl: &'a TypeDeclaration) -> Result<Self> {
        let simple = decl.name.rsplit(['.', '$']).next().unwrap_or_default();
        if simple.is_empty() {
            return Err(Error::MissingName(format!(
                "type declared in {}",
                ctx.source_path
            )));
        }
        Ok(Self {
            type_name: ctx.names.full_name(&decl.name),
            ctx,
            decl,
        })
    }

    pub fn options(&self) -> &'a TranslationOptions {
        self.ctx.options
    }

    pub fn names(&self) -> &'a NameTable {
        self.ctx.names
    }

    pub fn builder(&self) -> SourceBuilder {
        SourceBuilder::new(self.ctx.options.emit_line_directives).with_context(&self.type_name)
    }

    pub fn objc_type(&self, ty: &JavaType) -> String {
        self.ctx.names.objc_type(ty)
    }

    /// Object types carry a `_Nullable` qualifier when nullability is on.
    pub fn annotated_type(&self, ty: &JavaType, nullable: bool) -> String {
        let base = self.objc_type(ty);
        if nullable && self.options().nullability && !ty.is_primitive() && !ty.is_void() {
            format!("{} _Nullable", base)
        } else {
            base
        }
    }

    /// Declared type of a field's storage, including `volatile_` and weak qualifiers.
    pub fn storage_type(&self, field: &FieldDeclaration) -> String {
        if field.modifiers.is_volatile() {
            return match field.field_type.as_primitive() {
                Some(kind) => format!("volatile_{}", kind.objc_name()),
                None => "volatile_id".to_string(),
            };
        }
        let base = self.objc_type(&field.field_type);
        if field.weak && !field.field_type.is_primitive() {
            let qualifier = if self.options().is_arc() {
                "__weak"
            } else {
                "__unsafe_unretained"
            };
            format!("{} {}", qualifier, base)
        } else {
            base
        }
    }

    pub fn static_var_name(&self, fragment: &VariableFragment) -> String {
        self.ctx.names.static_var_name(&self.decl.name, &fragment.name)
    }

    pub fn selector(&self, method: &MethodDeclaration) -> String {
        self.ctx.names.selector_for_parameters(
            &method.name,
            &method.parameters,
            method.constructor,
            method.selector.as_deref(),
        )
    }

    pub fn static_fields(&self) -> impl Iterator<Item = &'a FieldDeclaration> + 'a {
        self.decl.fields().filter(|f| f.modifiers.is_static())
    }

    pub fn static_initializer(&self) -> Option<&'a MethodDeclaration> {
        self.decl.methods().find(|m| m.static_initializer)
    }

    /// A type needs `+initialize` when it is an enum, has static initializer
    /// code, or has a non-constant static field with an initializer.
    pub fn needs_static_init(&self) -> bool {
        if self.decl.is_enum() || self.static_initializer().is_some() {
            return true;
        }
        self.static_fields()
            .any(|field| field.fragments.iter().any(needs_runtime_assignment))
    }

    /// Rejects body declarations that earlier passes must have lowered.
    pub fn check_rewritten(&self) -> Result<()> {
        if self
            .decl
            .body
            .iter()
            .any(|member| matches!(member, BodyDeclaration::Initializer(_)))
        {
            return Err(Error::not_rewritten("Initializer"));
        }
        Ok(())
    }

    /// `- (jint)fooWithInt:(jint)a\n      withNSString:(NSString *)b`,
    /// continuation keywords aligned on their colons.
    pub fn method_signature(&self, method: &MethodDeclaration) -> String {
        let prefix = if method.is_static() { "+" } else { "-" };
        let return_type = if method.constructor {
            "instancetype".to_string()
        } else {
            self.annotated_type(&method.return_type, method.nullable_return)
        };
        let mut signature = format!("{} ({})", prefix, return_type);
        let selector = self.selector(method);

        if method.parameters.is_empty() {
            signature.push_str(selector.trim_end_matches(':'));
            return signature;
        }

        let mut keywords: Vec<&str> = selector.split(':').filter(|k| !k.is_empty()).collect();
        let generated;
        if keywords.len() != method.parameters.len() {
            generated = self.ctx.names.selector_for_parameters(
                &method.name,
                &method.parameters,
                method.constructor,
                None,
            );
            keywords = generated.split(':').filter(|k| !k.is_empty()).collect();
        }

        let colon_column = signature.len() + keywords.first().map_or(0, |k| k.len());
        for (idx, (keyword, param)) in keywords.iter().zip(&method.parameters).enumerate() {
            if idx > 0 {
                signature.push('\n');
                signature.push_str(&pad(colon_column.saturating_sub(keyword.len())));
            }
            signature.push_str(&format!(
                "{}:({}){}",
                keyword,
                self.annotated_type(&param.param_type, param.nullable),
                NameTable::variable_base_name(&param.name)
            ));
        }
        signature
    }

    /// Signature plus trailing attributes, without the terminating `;`.
    pub fn method_declaration(&self, method: &MethodDeclaration) -> String {
        let mut text = self.method_signature(method);
        if !method.constructor && needs_objc_method_family_none(&self.selector(method)) {
            text.push_str(" OBJC_METHOD_FAMILY_NONE");
        }
        if method.deprecated && self.options().deprecated_declarations {
            text.push_str(" __attribute__((deprecated))");
        }
        if method.unavailable {
            text.push_str(" NS_UNAVAILABLE");
        }
        text
    }

    pub fn print_javadoc(&self, builder: &mut SourceBuilder, javadoc: Option<&str>) {
        let Some(doc) = javadoc.map(str::trim).filter(|d| !d.is_empty()) else {
            return;
        };
        builder.append_line("/*!");
        for (idx, line) in doc.lines().enumerate() {
            let line = line.trim();
            if idx == 0 {
                builder.append_line(&format!(" @brief {}", line));
            } else if line.is_empty() {
                builder.newline();
            } else {
                builder.append_line(&format!(" {}", line));
            }
        }
        builder.append_line(" */");
    }

    /// Instance variable block, or a bare newline when there are none.
    pub fn print_instance_variables(
        &self,
        builder: &mut SourceBuilder,
        fields: &[&FieldDeclaration],
    ) -> Result<()> {
        let fields: Vec<&&FieldDeclaration> =
            fields.iter().filter(|f| !f.modifiers.is_static()).collect();
        if fields.is_empty() {
            builder.newline();
            return Ok(());
        }
        builder.append_line(" {");
        builder.append_line(" @public");
        builder.indent();
        for field in fields {
            self.print_javadoc(builder, field.javadoc.as_deref());
            let ty = self.storage_type(field);
            let names: Vec<String> = field
                .fragments
                .iter()
                .map(|f| NameTable::instance_field_name(&f.name))
                .collect();
            builder.print_indent();
            builder.append_line(&format!("{};", declaration_list(&ty, &names)));
        }
        builder.unindent()?;
        builder.append_line("}");
        Ok(())
    }

    /// `J2OBJC_FIELD_SETTER` lines for retained object instance fields.
    pub fn print_field_setters(&self, builder: &mut SourceBuilder, fields: &[&FieldDeclaration]) {
        let mut first = true;
        for field in fields {
            if field.modifiers.is_static() || field.field_type.is_primitive() || field.weak {
                continue;
            }
            let macro_name = if field.modifiers.is_volatile() {
                "J2OBJC_VOLATILE_FIELD_SETTER"
            } else {
                "J2OBJC_FIELD_SETTER"
            };
            let ty = self.objc_type(&field.field_type);
            for fragment in &field.fragments {
                if first {
                    builder.newline();
                    first = false;
                }
                builder.append_line(&format!(
                    "{}({}, {}, {})",
                    macro_name,
                    self.type_name,
                    NameTable::instance_field_name(&fragment.name),
                    ty
                ));
            }
        }
    }

    /// Accessors, storage (or `#define`) and the static field macro for each
    /// static fragment. Private declarations use file-local storage.
    pub fn print_static_field_declarations(
        &self,
        builder: &mut SourceBuilder,
        fields: &[&FieldDeclaration],
        private_storage: bool,
    ) {
        for field in fields.iter().filter(|f| f.modifiers.is_static()) {
            for fragment in &field.fragments {
                self.print_static_field(builder, field, fragment, private_storage);
            }
        }
    }

    fn print_static_field(
        &self,
        builder: &mut SourceBuilder,
        field: &FieldDeclaration,
        fragment: &VariableFragment,
        private_storage: bool,
    ) {
        let ty = self.objc_type(&field.field_type);
        let storage_type = self.storage_type(field);
        let name = self.static_var_name(fragment);
        let base = NameTable::variable_base_name(&fragment.name);
        let is_constant = field.is_primitive_constant(fragment);
        let is_final = field.modifiers.is_final();
        let is_primitive = field.field_type.is_primitive();
        let is_volatile = field.modifiers.is_volatile();

        builder.newline();
        self.print_javadoc(builder, field.javadoc.as_deref());
        let getter = format!("{}_get_{}", self.type_name, base);
        builder.append_line(&format!("inline {}(void);", type_with_name(&ty, &getter)));
        if !is_final {
            let setter = format!("{}_set_{}", self.type_name, base);
            builder.append_line(&format!(
                "inline {}({});",
                type_with_name(&ty, &setter),
                type_with_name(&ty, "value")
            ));
            if is_primitive && !is_volatile {
                let get_ref = format!("*{}_getRef_{}", self.type_name, base);
                builder.append_line(&format!("inline {}(void);", type_with_name(&ty, &get_ref)));
            }
        }

        if is_constant {
            let value = fragment
                .constant_value
                .as_ref()
                .map(literal::generate)
                .unwrap_or_default();
            builder.append_line(&format!("#define {} {}", name, value));
        } else if private_storage {
            let initializer = static_storage_value(fragment)
                .map(|value| format!(" = {}", literal::generate(value)))
                .unwrap_or_default();
            builder.append_line(&format!(
                "static {}{};",
                type_with_name(&storage_type, &name),
                initializer
            ));
        } else {
            builder.append_line("/*! INTERNAL ONLY - Use accessor function from above. */");
            builder.append_line(&format!(
                "FOUNDATION_EXPORT {};",
                type_with_name(&storage_type, &name)
            ));
        }

        builder.append_line(&format!(
            "{}({}, {}, {})",
            static_field_macro(is_constant, is_primitive, is_volatile, is_final),
            self.type_name,
            base,
            ty
        ));
    }

    /// Integer-backed native enum mirroring the constant ordinals.
    pub fn print_native_enum(&self, builder: &mut SourceBuilder) -> Result<()> {
        if !self.decl.is_enum() {
            return Ok(());
        }
        let enum_name = NameTable::native_enum_name(&self.type_name);
        let ordinal_name = NameTable::native_ordinal_name(&self.type_name);
        builder.newline();
        if self.decl.enum_constants.is_empty() {
            builder.append_line(&format!("#define {} jint", ordinal_name));
            return Ok(());
        }
        builder.append_line(&format!("typedef NS_ENUM(jint, {}) {{", enum_name));
        builder.indent();
        for (ordinal, constant) in self.decl.enum_constants.iter().enumerate() {
            builder.print_indent();
            if self.options().swift_enums {
                builder.append_line(&format!(
                    "{}_{} NS_SWIFT_NAME({}) = {},",
                    enum_name,
                    constant.name,
                    NameTable::swift_enum_name(&constant.name),
                    ordinal
                ));
            } else {
                builder.append_line(&format!("{}_{} = {},", enum_name, constant.name, ordinal));
            }
        }
        builder.unindent()?;
        builder.append_line("};");
        builder.append_line("#if J2OBJC_IMPORTED_BY_JAVA_IMPLEMENTATION");
        builder.append_line(&format!("#define {} jint", ordinal_name));
        builder.append_line("#else");
        builder.append_line(&format!("#define {} {}", ordinal_name, enum_name));
        builder.append_line("#endif");
        builder.newline();
        Ok(())
    }

    /// `values_` extern plus one accessor and constant macro per enum constant.
    pub fn print_enum_constant_declarations(&self, builder: &mut SourceBuilder) {
        if !self.decl.is_enum() {
            return;
        }
        builder.newline();
        builder.append_line("/*! INTERNAL ONLY - Use enum accessors declared below. */");
        builder.append_line(&format!(
            "FOUNDATION_EXPORT {} *{}_values_[];",
            self.type_name, self.type_name
        ));
        for constant in &self.decl.enum_constants {
            builder.newline();
            self.print_javadoc(builder, constant.javadoc.as_deref());
            builder.append_line(&format!(
                "inline {} *{}_get_{}(void);",
                self.type_name, self.type_name, constant.name
            ));
            builder.append_line(&format!(
                "J2OBJC_ENUM_CONSTANT({}, {})",
                self.type_name, constant.name
            ));
        }
    }

    /// `+ (T)name;` accessors or class properties for static fields and enum constants.
    pub fn print_static_accessors(&self, builder: &mut SourceBuilder, fields: &[&FieldDeclaration]) {
        let options = self.options();
        if !options.static_accessor_methods && !options.class_properties {
            return;
        }
        for field in fields.iter().filter(|f| f.modifiers.is_static()) {
            let ty = self.objc_type(&field.field_type);
            for fragment in &field.fragments {
                let base = NameTable::variable_base_name(&fragment.name);
                if options.class_properties {
                    let attributes = if field.modifiers.is_final() {
                        "readonly, class"
                    } else {
                        "class"
                    };
                    builder.append_line(&format!(
                        "@property ({}) {};",
                        attributes,
                        type_with_name(&ty, &base)
                    ));
                    continue;
                }
                builder.newline();
                builder.append_line(&format!("+ ({}){};", ty, base));
                if !field.modifiers.is_final() {
                    builder.newline();
                    builder.append_line(&format!(
                        "+ (void)set{}:({})value;",
                        capitalize(&base),
                        ty
                    ));
                }
            }
        }
        for constant in &self.decl.enum_constants {
            if options.class_properties {
                builder.append_line(&format!(
                    "@property (readonly, class, nonnull) {} *{};",
                    self.type_name, constant.name
                ));
            } else {
                builder.newline();
                builder.append_line(&format!("+ ({} *){};", self.type_name, constant.name));
            }
        }
    }

    /// Methods as declared in an `@interface`, grouped by visibility unless
    /// `grouped` is false. Returns selector mappings relative to the builder.
    pub fn print_method_declarations(
        &self,
        builder: &mut SourceBuilder,
        methods: &[&MethodDeclaration],
        grouped: bool,
    ) -> Vec<SourceMapping> {
        let mut methods: Vec<&MethodDeclaration> = methods
            .iter()
            .copied()
            .filter(|m| m.has_declaration && !m.static_initializer)
            .collect();
        sort_methods(&mut methods);
        let mut mappings = Vec::new();

        if !grouped {
            for method in &methods {
                self.print_method(builder, method, &mut mappings);
            }
            return mappings;
        }

        for visibility in [
            Visibility::Public,
            Visibility::Protected,
            Visibility::PackagePrivate,
            Visibility::Private,
        ] {
            let group: Vec<&&MethodDeclaration> = methods
                .iter()
                .filter(|m| Visibility::of(&m.modifiers) == visibility)
                .collect();
            if group.is_empty() {
                continue;
            }
            builder.newline();
            builder.append_line(visibility.pragma());
            for method in group {
                self.print_method(builder, method, &mut mappings);
            }
        }
        mappings
    }

    fn print_method(
        &self,
        builder: &mut SourceBuilder,
        method: &MethodDeclaration,
        mappings: &mut Vec<SourceMapping>,
    ) {
        builder.newline();
        self.print_javadoc(builder, method.javadoc.as_deref());
        let declaration = self.method_declaration(method);
        if let (Some(range), Some((begin, end))) = (method.name_range, selector_span(&declaration)) {
            mappings.push(SourceMapping::new(
                &method.name,
                range,
                builder.len() + begin,
                end - begin,
            ));
        }
        builder.append_line(&format!("{};", declaration));
    }

    /// Java access flags as stored in class metadata.
    pub fn access_flags(modifiers: &Modifiers) -> u32 {
        let table = [
            (Modifier::Public, 0x1),
            (Modifier::Private, 0x2),
            (Modifier::Protected, 0x4),
            (Modifier::Static, 0x8),
            (Modifier::Final, 0x10),
            (Modifier::Synchronized, 0x20),
            (Modifier::Volatile, 0x40),
            (Modifier::Transient, 0x80),
            (Modifier::Native, 0x100),
            (Modifier::Abstract, 0x400),
            (Modifier::Synthetic, 0x1000),
        ];
        table
            .iter()
            .filter(|(m, _)| modifiers.has(*m))
            .fold(0, |flags, (_, bit)| flags | bit)
    }
}

/// Constructors first, then case-insensitive name, then parameter type
/// names, then parameter count.
pub fn compare_methods(a: &MethodDeclaration, b: &MethodDeclaration) -> Ordering {
    b.constructor
        .cmp(&a.constructor)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| {
            a.parameters
                .iter()
                .zip(&b.parameters)
                .map(|(pa, pb)| type_sort_name(&pa.param_type).cmp(&type_sort_name(&pb.param_type)))
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.parameters.len().cmp(&b.parameters.len()))
}

pub fn sort_methods(methods: &mut [&MethodDeclaration]) {
    methods.sort_by(|a, b| compare_methods(a, b));
}

fn type_sort_name(ty: &JavaType) -> String {
    match ty {
        JavaType::Primitive { primitive } => primitive.java_name().to_string(),
        JavaType::Declared { name, .. } => name.clone(),
        JavaType::Array { component } => format!("{}[]", type_sort_name(component)),
        JavaType::TypeVariable { name } => name.clone(),
        JavaType::Union { alternatives } => alternatives
            .iter()
            .map(type_sort_name)
            .collect::<Vec<_>>()
            .join("|"),
        JavaType::Null => "null".to_string(),
        JavaType::Void => "void".to_string(),
    }
}

/// Byte range of the selector's first keyword: after the first `)` up to the
/// first `:` or the end of the declaration.
pub fn selector_span(declaration: &str) -> Option<(usize, usize)> {
    let begin = declaration.find(')')? + 1;
    let rest = &declaration[begin..];
    let end = rest
        .find(':')
        .or_else(|| rest.find(' '))
        .map_or(declaration.len(), |idx| begin + idx);
    (end > begin).then_some((begin, end))
}

/// `jint x` or `NSString *x`.
pub fn type_with_name(ty: &str, name: &str) -> String {
    if ty.ends_with('*') {
        format!("{}{}", ty, name)
    } else {
        format!("{} {}", ty, name)
    }
}

/// `Foo *a_, *b_` or `jint a_, b_`.
pub fn declaration_list(ty: &str, names: &[String]) -> String {
    match ty.strip_suffix('*') {
        Some(base) => {
            let names: Vec<String> = names.iter().map(|n| format!("*{}", n)).collect();
            format!("{}{}", base, names.join(", "))
        }
        None => format!("{} {}", ty, names.join(", ")),
    }
}

pub fn static_field_macro(constant: bool, primitive: bool, volatile: bool, is_final: bool) -> String {
    if constant {
        return "J2OBJC_STATIC_FIELD_CONSTANT".to_string();
    }
    let mut name = String::from("J2OBJC_STATIC_FIELD");
    name.push_str(if primitive { "_PRIMITIVE" } else { "_OBJ" });
    if volatile {
        name.push_str("_VOLATILE");
    }
    if is_final {
        name.push_str("_FINAL");
    }
    name
}
