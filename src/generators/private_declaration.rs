//! Private declaration role: the class extension placed at the top of the
//! implementation file, or the whole declaration of a private type.

use crate::analysis::member_filter::MemberFilter;
use crate::ast::{BodyDeclaration, FieldDeclaration, MethodDeclaration, TypeDeclaration};
use crate::error::Result;
use crate::generators::base::type_generator::{GeneratorContext, TypeGenerator};
use crate::generators::type_declaration::{GeneratedDeclaration, TypeDeclarationGenerator};

pub struct PrivateDeclarationGenerator<'a> {
    ctx: GeneratorContext<'a>,
    base: TypeGenerator<'a>,
    filter: MemberFilter,
}

impl<'a> PrivateDeclarationGenerator<'a> {
    pub fn new(ctx: GeneratorContext<'a>, decl: &'a TypeDeclaration) -> Result<Self> {
        Ok(Self {
            ctx,
            base: TypeGenerator::new(ctx, decl)?,
            filter: MemberFilter::private(),
        })
    }

    pub fn generate(&self) -> Result<GeneratedDeclaration> {
        let decl = self.base.decl;
        if decl.has_private_declaration {
            return TypeDeclarationGenerator::complete(self.ctx, decl)?.generate();
        }
        self.base.check_rewritten()?;

        let fields: Vec<&FieldDeclaration> = self.filter.fields(decl).collect();
        let methods: Vec<&MethodDeclaration> = self
            .filter
            .methods(decl)
            .filter(|m| m.has_declaration && !m.static_initializer)
            .collect();

        let mut builder = self.base.builder();
        let mut mappings = Vec::new();
        let has_instance_fields = fields.iter().any(|f| !f.modifiers.is_static());

        // Protocols cannot take a class extension.
        if !decl.is_interface() && (has_instance_fields || !methods.is_empty()) {
            builder.newline();
            builder.append(&format!("@interface {} ()", self.base.type_name));
            self.base.print_instance_variables(&mut builder, &fields)?;
            mappings = self
                .base
                .print_method_declarations(&mut builder, &methods, false);
            builder.append_line("\n@end");
        }

        self.base.print_field_setters(&mut builder, &fields);
        self.base
            .print_static_field_declarations(&mut builder, &fields, true);

        for member in &decl.body {
            if let BodyDeclaration::Native(native) = member {
                if let (true, Some(code)) = (self.filter.claims(member), &native.header_code) {
                    builder.newline();
                    builder.append_line(code.trim_end());
                }
            }
        }

        Ok(GeneratedDeclaration {
            text: builder.into_string(),
            mappings,
        })
    }
}
