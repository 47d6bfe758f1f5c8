use serde::{Deserialize, Serialize};

/// Java primitive kinds, as resolved by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    pub fn java_name(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    /// The runtime typedef used for this primitive in generated code.
    pub fn objc_name(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "jboolean",
            PrimitiveKind::Byte => "jbyte",
            PrimitiveKind::Char => "jchar",
            PrimitiveKind::Short => "jshort",
            PrimitiveKind::Int => "jint",
            PrimitiveKind::Long => "jlong",
            PrimitiveKind::Float => "jfloat",
            PrimitiveKind::Double => "jdouble",
        }
    }

    /// JVM signature character, also used as the string-concatenation code.
    pub fn signature_char(&self) -> char {
        match self {
            PrimitiveKind::Boolean => 'Z',
            PrimitiveKind::Byte => 'B',
            PrimitiveKind::Char => 'C',
            PrimitiveKind::Short => 'S',
            PrimitiveKind::Int => 'I',
            PrimitiveKind::Long => 'J',
            PrimitiveKind::Float => 'F',
            PrimitiveKind::Double => 'D',
        }
    }
}

/// A resolved Java type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JavaType {
    Primitive {
        primitive: PrimitiveKind,
    },
    Declared {
        /// Binary name, e.g. `java.util.Map$Entry`.
        name: String,
        #[serde(default)]
        interface: bool,
        #[serde(default, rename = "enum")]
        is_enum: bool,
        #[serde(default)]
        type_arguments: Vec<JavaType>,
    },
    Array {
        component: Box<JavaType>,
    },
    TypeVariable {
        name: String,
    },
    /// Union of exception types in a multi-catch clause.
    Union {
        alternatives: Vec<JavaType>,
    },
    Null,
    Void,
}

impl Default for JavaType {
    fn default() -> Self {
        JavaType::Void
    }
}

pub const JAVA_LANG_STRING: &str = "java.lang.String";
pub const JAVA_LANG_OBJECT: &str = "java.lang.Object";

impl JavaType {
    pub fn primitive(kind: PrimitiveKind) -> Self {
        JavaType::Primitive { primitive: kind }
    }

    pub fn int() -> Self {
        Self::primitive(PrimitiveKind::Int)
    }

    pub fn long() -> Self {
        Self::primitive(PrimitiveKind::Long)
    }

    pub fn boolean() -> Self {
        Self::primitive(PrimitiveKind::Boolean)
    }

    pub fn double() -> Self {
        Self::primitive(PrimitiveKind::Double)
    }

    pub fn class(name: &str) -> Self {
        JavaType::Declared {
            name: name.to_string(),
            interface: false,
            is_enum: false,
            type_arguments: Vec::new(),
        }
    }

    pub fn interface(name: &str) -> Self {
        JavaType::Declared {
            name: name.to_string(),
            interface: true,
            is_enum: false,
            type_arguments: Vec::new(),
        }
    }

    pub fn enumeration(name: &str) -> Self {
        JavaType::Declared {
            name: name.to_string(),
            interface: false,
            is_enum: true,
            type_arguments: Vec::new(),
        }
    }

    pub fn string() -> Self {
        Self::class(JAVA_LANG_STRING)
    }

    pub fn array_of(component: JavaType) -> Self {
        JavaType::Array {
            component: Box::new(component),
        }
    }

    pub fn as_primitive(&self) -> Option<PrimitiveKind> {
        match self {
            JavaType::Primitive { primitive } => Some(*primitive),
            _ => None,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, JavaType::Primitive { .. })
    }

    pub fn is_void(&self) -> bool {
        matches!(self, JavaType::Void)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, JavaType::Declared { name, .. } if name == JAVA_LANG_STRING)
    }

    pub fn is_interface(&self) -> bool {
        matches!(self, JavaType::Declared { interface: true, .. })
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, JavaType::Declared { is_enum: true, .. })
    }

    pub fn is_long(&self) -> bool {
        self.as_primitive() == Some(PrimitiveKind::Long)
    }

    /// Binary name of a declared type.
    pub fn declared_name(&self) -> Option<&str> {
        match self {
            JavaType::Declared { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// How a variable reference is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    Local,
    Parameter,
    Field,
    StaticField,
    EnumConstant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableBinding {
    pub kind: VariableKind,
    #[serde(default)]
    pub declaring_type: Option<String>,
    #[serde(default)]
    pub var_type: JavaType,
    /// Compile-time primitive constant; references use the `#define` name.
    #[serde(default)]
    pub constant: bool,
}

impl VariableBinding {
    pub fn local(var_type: JavaType) -> Self {
        Self {
            kind: VariableKind::Local,
            declaring_type: None,
            var_type,
            constant: false,
        }
    }

    pub fn field(declaring_type: &str, var_type: JavaType) -> Self {
        Self {
            kind: VariableKind::Field,
            declaring_type: Some(declaring_type.to_string()),
            var_type,
            constant: false,
        }
    }

    pub fn static_field(declaring_type: &str, var_type: JavaType) -> Self {
        Self {
            kind: VariableKind::StaticField,
            declaring_type: Some(declaring_type.to_string()),
            var_type,
            constant: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodBinding {
    pub declaring_type: String,
    pub name: String,
    /// Explicit selector override (e.g. from an `@ObjectiveCName` mapping).
    #[serde(default)]
    pub selector: Option<String>,
    #[serde(default)]
    pub parameter_types: Vec<JavaType>,
    #[serde(default)]
    pub return_type: JavaType,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub constructor: bool,
    #[serde(default)]
    pub declaring_interface: bool,
}

impl MethodBinding {
    pub fn new(declaring_type: &str, name: &str, return_type: JavaType) -> Self {
        Self {
            declaring_type: declaring_type.to_string(),
            name: name.to_string(),
            selector: None,
            parameter_types: Vec::new(),
            return_type,
            is_static: false,
            constructor: false,
            declaring_interface: false,
        }
    }

    pub fn with_parameters(mut self, parameter_types: Vec<JavaType>) -> Self {
        self.parameter_types = parameter_types;
        self
    }

    pub fn static_method(mut self) -> Self {
        self.is_static = true;
        self
    }
}
