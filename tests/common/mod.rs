#![allow(dead_code)]
//! Common test utilities and AST fixture builders
use java2objc_gen::ast::{
    Block, BodyDeclaration, CompilationUnit, Expression, FieldDeclaration, JavaType,
    LiteralValue, MethodBinding, MethodDeclaration, Modifier, Statement, StatementKind,
    TypeDeclaration, TypeKind, VariableBinding, VariableFragment,
};
use java2objc_gen::build::{GeneratedUnit, GenerationUnitBuilder};
use java2objc_gen::generators::base::name_table::NameTable;
use java2objc_gen::{BuildSystem, GenerateConfig, GenerationSummary, TranslationOptions};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A directory of AST JSON files plus an output directory
pub struct TestProject {
    pub input_dir: TempDir,
    pub output_dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            input_dir: TempDir::new().unwrap(),
            output_dir: TempDir::new().unwrap(),
        }
    }

    /// Serialize a compilation unit into the input directory
    pub fn write_unit(&self, name: &str, unit: &CompilationUnit) -> &Self {
        self.write_file(name, &serde_json::to_string_pretty(unit).unwrap())
    }

    pub fn write_file(&self, name: &str, content: &str) -> &Self {
        let file_path = self.input_dir.path().join(name);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(file_path, content).unwrap();
        self
    }

    pub fn config(&self, translation: TranslationOptions) -> GenerateConfig {
        GenerateConfig {
            input_path: path_str(self.input_dir.path()),
            output_path: path_str(self.output_dir.path()),
            translation,
            ..Default::default()
        }
    }

    pub fn generate(&self, translation: TranslationOptions) -> GenerationSummary {
        BuildSystem::new(false, false)
            .generate(&self.config(translation))
            .unwrap()
    }

    pub fn read_output(&self, filename: &str) -> String {
        fs::read_to_string(self.output_dir.path().join(filename)).unwrap()
    }

    pub fn output_exists(&self, filename: &str) -> bool {
        self.output_dir.path().join(filename).exists()
    }
}

fn path_str(path: &Path) -> String {
    path.to_str().unwrap().to_string()
}

/// Generate a unit in memory, without touching the file system
pub fn generate_unit(options: &TranslationOptions, unit: CompilationUnit) -> GeneratedUnit {
    let output_path = java2objc_gen::build::output_path_for(&unit);
    let mut builder = GenerationUnitBuilder::new(&unit.source_path);
    builder.add_input_file(&unit.source_path);
    builder.add_compilation_unit(unit).unwrap();
    builder.assign_output_path(output_path);
    builder
        .build()
        .unwrap()
        .generate(options, &NameTable::new())
        .unwrap()
}

/// Options that leave out reflection metadata, for smaller expected texts
pub fn plain_options() -> TranslationOptions {
    TranslationOptions {
        strip_reflection: true,
        ..Default::default()
    }
}

pub fn compilation_unit(main_type: &str, types: Vec<TypeDeclaration>) -> CompilationUnit {
    let (package, simple) = main_type.rsplit_once('.').unwrap_or(("", main_type));
    CompilationUnit {
        source_path: format!("{}/{}.java", package.replace('.', "/"), simple)
            .trim_start_matches('/')
            .to_string(),
        package: (!package.is_empty()).then(|| package.to_string()),
        main_type: Some(main_type.to_string()),
        types,
    }
}

pub fn class(name: &str) -> TypeDeclaration {
    let mut decl = TypeDeclaration::new(name, TypeKind::Class);
    decl.modifiers = java2objc_gen::ast::Modifiers::new(&[Modifier::Public]);
    decl
}

pub fn subclass(name: &str, superclass: &str) -> TypeDeclaration {
    let mut decl = class(name);
    decl.superclass = Some(superclass.to_string());
    decl
}

pub fn constant(name: &str, field_type: JavaType, value: LiteralValue) -> BodyDeclaration {
    BodyDeclaration::Field(FieldDeclaration::new(
        &[Modifier::Public, Modifier::Static, Modifier::Final],
        field_type,
        vec![VariableFragment::named(name).with_constant(value)],
    ))
}

pub fn static_field(name: &str, field_type: JavaType) -> BodyDeclaration {
    BodyDeclaration::Field(FieldDeclaration::new(
        &[Modifier::Public, Modifier::Static],
        field_type,
        vec![VariableFragment::named(name)],
    ))
}

pub fn method(name: &str, statements: Vec<Statement>) -> BodyDeclaration {
    BodyDeclaration::Method(
        MethodDeclaration::new(name, &[Modifier::Public], JavaType::Void)
            .with_body(Block::new(statements)),
    )
}

/// `[self name];` on the given type
pub fn call(declaring_type: &str, name: &str) -> Statement {
    StatementKind::Expression {
        expression: Expression::MethodInvocation {
            expression: None,
            binding: MethodBinding::new(declaring_type, name, JavaType::Void),
            arguments: vec![],
        },
    }
    .into()
}

pub fn local(name: &str, var_type: JavaType) -> Expression {
    Expression::name(name, VariableBinding::local(var_type))
}

pub fn block(statements: Vec<Statement>) -> Box<Statement> {
    Box::new(StatementKind::Block(Block::new(statements)).into())
}

/// Assert that generated content contains expected string
#[macro_export]
macro_rules! assert_generated_contains {
    ($content:expr, $expected:expr) => {
        assert!(
            $content.contains($expected),
            "Expected generated content to contain:\n{}\n\nBut got:\n{}",
            $expected,
            $content
        );
    };
}

/// Assert that generated content does NOT contain string
#[macro_export]
macro_rules! assert_generated_not_contains {
    ($content:expr, $unexpected:expr) => {
        assert!(
            !$content.contains($unexpected),
            "Expected generated content NOT to contain:\n{}\n\nBut got:\n{}",
            $unexpected,
            $content
        );
    };
}
