//! Public declaration role: the part of a type that goes in its header.

use crate::analysis::member_filter::MemberFilter;
use crate::ast::{BodyDeclaration, FieldDeclaration, MethodDeclaration, TypeDeclaration, TypeKind};
use crate::error::Result;
use crate::generators::base::name_table::camel_case_qualified_name;
use crate::generators::base::source_builder::SourceBuilder;
use crate::generators::base::type_generator::{GeneratorContext, TypeGenerator};
use crate::models::SourceMapping;

const DEPRECATED_ATTRIBUTE: &str = "__attribute__((deprecated))";

/// Declaration text plus the selector mappings recorded while printing it.
/// Mapping offsets are relative to the start of `text`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedDeclaration {
    pub text: String,
    pub mappings: Vec<SourceMapping>,
}

impl GeneratedDeclaration {
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

pub struct TypeDeclarationGenerator<'a> {
    base: TypeGenerator<'a>,
    /// `None` declares every non-synthetic member, used for private types
    /// whose whole declaration lives in the implementation file.
    filter: Option<MemberFilter>,
}

impl<'a> TypeDeclarationGenerator<'a> {
    pub fn public(ctx: GeneratorContext<'a>, decl: &'a TypeDeclaration) -> Result<Self> {
        Ok(Self {
            base: TypeGenerator::new(ctx, decl)?,
            filter: Some(MemberFilter::public()),
        })
    }

    pub(crate) fn complete(ctx: GeneratorContext<'a>, decl: &'a TypeDeclaration) -> Result<Self> {
        Ok(Self {
            base: TypeGenerator::new(ctx, decl)?,
            filter: None,
        })
    }

    /// Generates nothing for a private type in public mode.
    pub fn generate(&self) -> Result<GeneratedDeclaration> {
        let decl = self.base.decl;
        if self.filter.is_some() && decl.has_private_declaration {
            return Ok(GeneratedDeclaration::default());
        }
        self.base.check_rewritten()?;

        let mut builder = self.base.builder();
        let fields = self.fields();
        let methods = self.methods();

        self.base.print_native_enum(&mut builder)?;
        builder.newline();
        self.base.print_javadoc(&mut builder, decl.javadoc.as_deref());
        self.print_audited_region(&mut builder, "NS_ASSUME_NONNULL_BEGIN");
        self.print_interface_type(&mut builder);
        self.print_implemented_protocols(&mut builder);

        let mappings = if decl.is_interface() {
            builder.newline();
            let instance_methods: Vec<&MethodDeclaration> =
                methods.into_iter().filter(|m| !m.is_static()).collect();
            self.base
                .print_method_declarations(&mut builder, &instance_methods, false)
        } else {
            self.base.print_instance_variables(&mut builder, &fields)?;
            self.base.print_static_accessors(&mut builder, &fields);
            let grouped = !decl.has_private_declaration;
            self.base
                .print_method_declarations(&mut builder, &methods, grouped)
        };
        self.print_native_declarations(&mut builder);
        builder.append_line("\n@end");

        self.print_static_init(&mut builder);
        self.base.print_enum_constant_declarations(&mut builder);
        self.base.print_field_setters(&mut builder, &fields);
        self.base
            .print_static_field_declarations(&mut builder, &fields, self.filter.is_none());
        builder.newline();
        builder.append_line(&format!(
            "J2OBJC_TYPE_LITERAL_HEADER({})",
            self.base.type_name
        ));
        self.print_unprefixed_alias(&mut builder);
        builder.newline();
        self.print_audited_region(&mut builder, "NS_ASSUME_NONNULL_END");

        Ok(GeneratedDeclaration {
            text: builder.into_string(),
            mappings,
        })
    }

    fn fields(&self) -> Vec<&'a FieldDeclaration> {
        let decl = self.base.decl;
        match &self.filter {
            Some(filter) => filter.fields(decl).collect(),
            None => decl.fields().filter(|f| !f.modifiers.is_synthetic()).collect(),
        }
    }

    fn methods(&self) -> Vec<&'a MethodDeclaration> {
        let decl = self.base.decl;
        match &self.filter {
            Some(filter) => filter.methods(decl).collect(),
            None => decl
                .methods()
                .filter(|m| !m.modifiers.is_synthetic())
                .collect(),
        }
    }

    fn print_audited_region(&self, builder: &mut SourceBuilder, macro_name: &str) {
        if self.base.options().nullability {
            builder.append_line(macro_name);
        }
    }

    fn print_interface_type(&self, builder: &mut SourceBuilder) {
        let decl = self.base.decl;
        if self.filter.is_some() {
            if let Some(swift_name) = &decl.swift_name {
                let swift_name = if decl.is_enum() {
                    format!("{}.{}Class", swift_name, swift_name)
                } else {
                    swift_name.clone()
                };
                builder.append_line(&format!("NS_SWIFT_NAME({})", swift_name));
            }
        }
        if decl.deprecated && self.base.options().deprecated_declarations {
            builder.append_line(DEPRECATED_ATTRIBUTE);
        }
        if decl.is_interface() {
            builder.append(&format!("@protocol {}", self.base.type_name));
        } else {
            let superclass = match &decl.superclass {
                Some(name) => self.base.names().full_name(name),
                None => "NSObject".to_string(),
            };
            builder.append(&format!("@interface {} : {}", self.base.type_name, superclass));
        }
    }

    fn protocol_names(&self) -> Vec<String> {
        let decl = self.base.decl;
        if decl.kind == TypeKind::Annotation {
            return vec!["JavaLangAnnotationAnnotation".to_string()];
        }
        let mut names: Vec<String> = decl
            .interfaces
            .iter()
            .map(|name| self.base.names().full_name(name))
            .collect();
        if decl.is_interface() {
            names.push("JavaObject".to_string());
        }
        names
    }

    fn print_implemented_protocols(&self, builder: &mut SourceBuilder) {
        let names = self.protocol_names();
        if !names.is_empty() {
            builder.append(&format!(" < {} >", names.join(", ")));
        }
    }

    fn print_native_declarations(&self, builder: &mut SourceBuilder) {
        for member in &self.base.decl.body {
            let BodyDeclaration::Native(native) = member else {
                continue;
            };
            let claimed = match &self.filter {
                Some(filter) => filter.claims(member),
                None => true,
            };
            if let (true, Some(code)) = (claimed, &native.header_code) {
                builder.newline();
                builder.append_line(code.trim_end());
            }
        }
    }

    fn print_static_init(&self, builder: &mut SourceBuilder) {
        let macro_name = if self.base.needs_static_init() {
            "J2OBJC_STATIC_INIT"
        } else {
            "J2OBJC_EMPTY_STATIC_INIT"
        };
        builder.newline();
        builder.append_line(&format!("{}({})", macro_name, self.base.type_name));
    }

    /// Packageless spelling for top-level types renamed by a package prefix.
    fn print_unprefixed_alias(&self, builder: &mut SourceBuilder) {
        let decl = self.base.decl;
        if !decl.is_top_level() {
            return;
        }
        let unprefixed = camel_case_qualified_name(&decl.name);
        if unprefixed == self.base.type_name {
            return;
        }
        builder.newline();
        if decl.is_interface() {
            builder.append_line(&format!("#define {} {}", unprefixed, self.base.type_name));
        } else {
            builder.append_line(&format!(
                "@compatibility_alias {} {};",
                unprefixed, self.base.type_name
            ));
        }
    }
}
