use super::expr::Expression;
use super::literal_value::LiteralValue;
use super::stmt::Block;
use super::types::{JavaType, MethodBinding};
use serde::{Deserialize, Serialize};

/// Byte offsets into the original Java source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceRange {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    Final,
    Abstract,
    Volatile,
    Transient,
    Synchronized,
    Native,
    Synthetic,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Modifiers(pub Vec<Modifier>);

impl Modifiers {
    pub fn new(modifiers: &[Modifier]) -> Self {
        Self(modifiers.to_vec())
    }

    pub fn has(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    pub fn is_static(&self) -> bool {
        self.has(Modifier::Static)
    }

    pub fn is_final(&self) -> bool {
        self.has(Modifier::Final)
    }

    pub fn is_private(&self) -> bool {
        self.has(Modifier::Private)
    }

    pub fn is_abstract(&self) -> bool {
        self.has(Modifier::Abstract)
    }

    pub fn is_synthetic(&self) -> bool {
        self.has(Modifier::Synthetic)
    }

    pub fn is_volatile(&self) -> bool {
        self.has(Modifier::Volatile)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilationUnit {
    /// Path of the Java source relative to its source root, e.g. `com/foo/Bar.java`.
    pub source_path: String,
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub main_type: Option<String>,
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
}

impl CompilationUnit {
    pub fn source_file_name(&self) -> &str {
        self.source_path
            .rsplit('/')
            .next()
            .unwrap_or(self.source_path.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    /// Binary name, e.g. `com.foo.Bar$Inner`.
    pub name: String,
    pub kind: TypeKind,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub superclass: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub has_private_declaration: bool,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub javadoc: Option<String>,
    #[serde(default)]
    pub swift_name: Option<String>,
    #[serde(default)]
    pub enum_constants: Vec<EnumConstant>,
    #[serde(default)]
    pub body: Vec<BodyDeclaration>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub name_range: Option<SourceRange>,
}

impl TypeDeclaration {
    pub fn new(name: &str, kind: TypeKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            modifiers: Modifiers::new(&[Modifier::Public]),
            superclass: None,
            interfaces: Vec::new(),
            type_parameters: Vec::new(),
            has_private_declaration: false,
            deprecated: false,
            javadoc: None,
            swift_name: None,
            enum_constants: Vec::new(),
            body: Vec::new(),
            annotations: Vec::new(),
            name_range: None,
        }
    }

    pub fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface | TypeKind::Annotation)
    }

    pub fn is_enum(&self) -> bool {
        self.kind == TypeKind::Enum
    }

    pub fn is_top_level(&self) -> bool {
        !self.name.contains('$')
    }

    /// The binary name of the enclosing type, for nested types.
    pub fn outer_name(&self) -> Option<&str> {
        self.name.rfind('$').map(|idx| &self.name[..idx])
    }

    /// Qualified source name: `$` separators replaced by `.`.
    pub fn qualified_name(&self) -> String {
        self.name.replace('$', ".")
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDeclaration> {
        self.body.iter().filter_map(|decl| match decl {
            BodyDeclaration::Field(field) => Some(field),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDeclaration> {
        self.body.iter().filter_map(|decl| match decl {
            BodyDeclaration::Method(method) => Some(method),
            _ => None,
        })
    }

    /// Direct supertypes: superclass first, then interfaces in declaration order.
    pub fn supertypes(&self) -> impl Iterator<Item = &str> {
        self.superclass
            .iter()
            .map(String::as_str)
            .chain(self.interfaces.iter().map(String::as_str))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumConstant {
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<Expression>,
    #[serde(default)]
    pub constructor: Option<MethodBinding>,
    #[serde(default)]
    pub javadoc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyDeclaration {
    Field(FieldDeclaration),
    Method(MethodDeclaration),
    /// Instance or static initializer blocks; must be folded into methods upstream.
    Initializer(Initializer),
    Native(NativeDeclaration),
}

impl BodyDeclaration {
    pub fn modifiers(&self) -> Option<&Modifiers> {
        match self {
            BodyDeclaration::Field(field) => Some(&field.modifiers),
            BodyDeclaration::Method(method) => Some(&method.modifiers),
            BodyDeclaration::Initializer(_) | BodyDeclaration::Native(_) => None,
        }
    }

    pub fn has_private_declaration(&self) -> bool {
        match self {
            BodyDeclaration::Field(field) => field.has_private_declaration,
            BodyDeclaration::Method(method) => method.has_private_declaration,
            BodyDeclaration::Initializer(_) => true,
            BodyDeclaration::Native(native) => native.has_private_declaration,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.modifiers().is_some_and(Modifiers::is_synthetic)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    #[serde(default)]
    pub modifiers: Modifiers,
    pub field_type: JavaType,
    pub fragments: Vec<VariableFragment>,
    #[serde(default)]
    pub javadoc: Option<String>,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub weak: bool,
    #[serde(default)]
    pub has_private_declaration: bool,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl FieldDeclaration {
    pub fn new(modifiers: &[Modifier], field_type: JavaType, fragments: Vec<VariableFragment>) -> Self {
        Self {
            has_private_declaration: modifiers.contains(&Modifier::Private),
            modifiers: Modifiers::new(modifiers),
            field_type,
            fragments,
            javadoc: None,
            nullable: false,
            weak: false,
            annotations: Vec::new(),
        }
    }

    /// A static final primitive with a known value: inlined at every use site.
    pub fn is_primitive_constant(&self, fragment: &VariableFragment) -> bool {
        self.modifiers.is_static()
            && self.modifiers.is_final()
            && self.field_type.is_primitive()
            && fragment.constant_value.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableFragment {
    pub name: String,
    #[serde(default)]
    pub initializer: Option<Expression>,
    #[serde(default)]
    pub constant_value: Option<LiteralValue>,
    #[serde(default)]
    pub name_range: Option<SourceRange>,
}

impl VariableFragment {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            initializer: None,
            constant_value: None,
            name_range: None,
        }
    }

    pub fn with_constant(mut self, value: LiteralValue) -> Self {
        self.constant_value = Some(value);
        self
    }

    pub fn with_initializer(mut self, initializer: Expression) -> Self {
        self.initializer = Some(initializer);
        self
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    pub name: String,
    #[serde(default)]
    pub selector: Option<String>,
    #[serde(default)]
    pub constructor: bool,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub return_type: JavaType,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub body: Option<Block>,
    #[serde(default)]
    pub javadoc: Option<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default = "default_true")]
    pub has_declaration: bool,
    #[serde(default)]
    pub has_private_declaration: bool,
    #[serde(default)]
    pub unavailable: bool,
    #[serde(default)]
    pub nullable_return: bool,
    /// Holds the lowered static initializer code (`+initialize`).
    #[serde(default)]
    pub static_initializer: bool,
    #[serde(default)]
    pub name_range: Option<SourceRange>,
    #[serde(default)]
    pub line: Option<usize>,
}

impl MethodDeclaration {
    pub fn new(name: &str, modifiers: &[Modifier], return_type: JavaType) -> Self {
        Self {
            name: name.to_string(),
            selector: None,
            constructor: false,
            has_private_declaration: modifiers.contains(&Modifier::Private),
            modifiers: Modifiers::new(modifiers),
            return_type,
            parameters: Vec::new(),
            body: None,
            javadoc: None,
            annotations: Vec::new(),
            deprecated: false,
            has_declaration: true,
            unavailable: false,
            nullable_return: false,
            static_initializer: false,
            name_range: None,
            line: None,
        }
    }

    pub fn constructor(modifiers: &[Modifier]) -> Self {
        let mut method = Self::new("<init>", modifiers, JavaType::Void);
        method.constructor = true;
        method
    }

    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_body(mut self, body: Block) -> Self {
        self.body = Some(body);
        self
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub param_type: JavaType,
    #[serde(default)]
    pub nullable: bool,
}

impl Parameter {
    pub fn new(name: &str, param_type: JavaType) -> Self {
        Self {
            name: name.to_string(),
            param_type,
            nullable: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Initializer {
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeDeclaration {
    #[serde(default)]
    pub header_code: Option<String>,
    #[serde(default)]
    pub implementation_code: Option<String>,
    #[serde(default)]
    pub has_private_declaration: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Binary name of the annotation type.
    pub type_name: String,
    /// Retained at runtime and therefore reflected through `__annotations`.
    #[serde(default)]
    pub runtime: bool,
    #[serde(default)]
    pub members: Vec<AnnotationMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationMember {
    pub name: String,
    pub value: Expression,
    #[serde(default)]
    pub value_type: JavaType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_declaration_from_json() {
        let json = r#"{
            "name": "com.foo.Bar$Inner",
            "kind": "class",
            "modifiers": ["public", "static"],
            "superclass": "com.foo.Base",
            "interfaces": ["java.lang.Runnable"],
            "body": [
                {"kind": "field", "modifiers": ["private"], "field_type": {"kind": "primitive", "primitive": "int"},
                 "fragments": [{"name": "count"}]},
                {"kind": "method", "name": "run", "modifiers": ["public"]}
            ]
        }"#;
        let decl: TypeDeclaration = serde_json::from_str(json).unwrap();
        assert!(!decl.is_top_level());
        assert_eq!(decl.outer_name(), Some("com.foo.Bar"));
        assert_eq!(decl.fields().count(), 1);
        assert_eq!(decl.methods().count(), 1);
        assert!(decl.methods().all(|m| m.has_declaration));
        assert_eq!(
            decl.supertypes().collect::<Vec<_>>(),
            vec!["com.foo.Base", "java.lang.Runnable"]
        );
    }

    #[test]
    fn test_primitive_constant_detection() {
        let field = FieldDeclaration::new(
            &[Modifier::Public, Modifier::Static, Modifier::Final],
            JavaType::int(),
            vec![VariableFragment::named("X").with_constant(LiteralValue::Int(5))],
        );
        assert!(field.is_primitive_constant(&field.fragments[0]));

        let field = FieldDeclaration::new(
            &[Modifier::Public, Modifier::Static],
            JavaType::double(),
            vec![VariableFragment::named("Y")],
        );
        assert!(!field.is_primitive_constant(&field.fragments[0]));
    }

    #[test]
    fn test_source_file_name() {
        let unit = CompilationUnit {
            source_path: "com/foo/Bar.java".to_string(),
            package: Some("com.foo".to_string()),
            main_type: None,
            types: vec![],
        };
        assert_eq!(unit.source_file_name(), "Bar.java");
    }
}
