use crate::analysis::import_collector::ImportCollector;
use crate::ast::TypeDeclaration;
use crate::error::Result;
use crate::generators::base::type_generator::GeneratorContext;
use crate::generators::implementation::ImplementationGenerator;
use crate::generators::private_declaration::PrivateDeclarationGenerator;
use crate::generators::type_declaration::TypeDeclarationGenerator;
use crate::models::{ImportSet, SourceMapping};

/// Everything generated for one type, computed once and then only read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedType {
    type_name: String,
    objc_name: String,
    is_private: bool,
    supertypes: Vec<String>,
    header_forward_declarations: ImportSet,
    header_includes: ImportSet,
    implementation_forward_declarations: ImportSet,
    implementation_includes: ImportSet,
    public_declaration: String,
    public_mappings: Vec<SourceMapping>,
    private_declaration: String,
    implementation: String,
}

impl GeneratedType {
    /// Runs both import collectors and the three declaration roles.
    pub fn generate(ctx: GeneratorContext<'_>, decl: &TypeDeclaration) -> Result<Self> {
        let suffix = ctx.options.header_suffix.as_str();
        let header_imports = ImportCollector::public(ctx.names, suffix).collect(decl);
        let implementation_imports =
            ImportCollector::private_inclusive(ctx.names, suffix).collect(decl);

        let public = TypeDeclarationGenerator::public(ctx, decl)?.generate()?;
        let private = PrivateDeclarationGenerator::new(ctx, decl)?.generate()?;
        let implementation = ImplementationGenerator::new(ctx, decl)?.generate()?;

        Ok(Self {
            type_name: decl.name.clone(),
            objc_name: ctx.names.full_name(&decl.name),
            is_private: decl.has_private_declaration,
            supertypes: decl.supertypes().map(str::to_string).collect(),
            header_forward_declarations: header_imports.forward_declarations,
            header_includes: header_imports.includes,
            implementation_forward_declarations: implementation_imports.forward_declarations,
            implementation_includes: implementation_imports.includes,
            public_declaration: public.text,
            public_mappings: public.mappings,
            private_declaration: private.text,
            implementation,
        })
    }

    /// Java binary name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn objc_name(&self) -> &str {
        &self.objc_name
    }

    pub fn is_private(&self) -> bool {
        self.is_private
    }

    pub fn supertypes(&self) -> &[String] {
        &self.supertypes
    }

    pub fn header_forward_declarations(&self) -> &ImportSet {
        &self.header_forward_declarations
    }

    pub fn header_includes(&self) -> &ImportSet {
        &self.header_includes
    }

    pub fn implementation_forward_declarations(&self) -> &ImportSet {
        &self.implementation_forward_declarations
    }

    pub fn implementation_includes(&self) -> &ImportSet {
        &self.implementation_includes
    }

    pub fn public_declaration(&self) -> &str {
        &self.public_declaration
    }

    /// Offsets relative to [`Self::public_declaration`].
    pub fn public_mappings(&self) -> &[SourceMapping] {
        &self.public_mappings
    }

    pub fn private_declaration(&self) -> &str {
        &self.private_declaration
    }

    pub fn implementation(&self) -> &str {
        &self.implementation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BodyDeclaration, JavaType, MethodDeclaration, Modifier, TypeKind};
    use crate::generators::base::name_table::NameTable;
    use crate::interface::config::TranslationOptions;

    fn generate(decl: &TypeDeclaration) -> GeneratedType {
        let options = TranslationOptions::default();
        let names = NameTable::new();
        let ctx = GeneratorContext::new(&options, &names, "com/foo/Bar.java");
        GeneratedType::generate(ctx, decl).unwrap()
    }

    #[test]
    fn test_public_type_snapshot() {
        let mut decl = TypeDeclaration::new("com.foo.Bar", TypeKind::Class);
        decl.superclass = Some("com.foo.Base".to_string());
        decl.interfaces.push("java.lang.Runnable".to_string());
        decl.body.push(BodyDeclaration::Method(MethodDeclaration::new(
            "run",
            &[Modifier::Public],
            JavaType::Void,
        )));

        let generated = generate(&decl);
        assert_eq!(generated.type_name(), "com.foo.Bar");
        assert_eq!(generated.objc_name(), "ComFooBar");
        assert!(!generated.is_private());
        assert_eq!(generated.supertypes(), ["com.foo.Base", "java.lang.Runnable"]);
        assert!(generated
            .header_includes()
            .iter()
            .any(|i| i.type_name == "ComFooBase"));
        assert!(generated.public_declaration().contains("@interface ComFooBar : ComFooBase"));
        assert!(generated.implementation().contains("@implementation ComFooBar"));
        assert_eq!(generated.private_declaration(), "");
    }

    #[test]
    fn test_private_type_has_no_public_declaration() {
        let mut decl = TypeDeclaration::new("com.foo.Bar$Hidden", TypeKind::Class);
        decl.has_private_declaration = true;

        let generated = generate(&decl);
        assert!(generated.is_private());
        assert_eq!(generated.public_declaration(), "");
        assert!(generated.header_includes().is_empty());
        assert!(generated
            .private_declaration()
            .contains("@interface ComFooBar_Hidden : NSObject"));
    }
}
