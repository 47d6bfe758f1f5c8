use crate::ast::{JavaType, PrimitiveKind, JAVA_LANG_OBJECT};
use crate::generators::base::name_table::{capitalize, NameTable};

/// Visitor pattern for converting a resolved `JavaType` into generated text
pub trait TypeVisitor {
    fn visit_type(&self, ty: &JavaType) -> String {
        match ty {
            JavaType::Primitive { primitive } => self.visit_primitive(*primitive),
            JavaType::Declared {
                name, interface, ..
            } => self.visit_declared(name, *interface),
            JavaType::Array { component } => self.visit_array(component),
            JavaType::TypeVariable { name } => self.visit_type_variable(name),
            JavaType::Union { alternatives } => self.visit_union(alternatives),
            JavaType::Null => self.visit_null(),
            JavaType::Void => self.visit_void(),
        }
    }

    fn visit_primitive(&self, kind: PrimitiveKind) -> String;

    /// Visit a class or interface by binary name
    fn visit_declared(&self, name: &str, is_interface: bool) -> String;

    fn visit_array(&self, component: &JavaType) -> String;

    /// Type variables are erased to their bound, which is always treated as Object
    fn visit_type_variable(&self, _name: &str) -> String {
        self.visit_declared(JAVA_LANG_OBJECT, false)
    }

    /// Multi-catch unions use the first alternative; callers that need each
    /// alternative expand the union themselves
    fn visit_union(&self, alternatives: &[JavaType]) -> String {
        match alternatives.first() {
            Some(first) => self.visit_type(first),
            None => self.visit_declared(JAVA_LANG_OBJECT, false),
        }
    }

    fn visit_null(&self) -> String {
        self.visit_declared(JAVA_LANG_OBJECT, false)
    }

    fn visit_void(&self) -> String {
        "void".to_string()
    }
}

/// Declaration types: `jint`, `NSString *`, `id<JavaLangRunnable>`, `IOSIntArray *`
pub struct DeclarationTypeVisitor<'a> {
    names: &'a NameTable,
}

impl<'a> DeclarationTypeVisitor<'a> {
    pub fn new(names: &'a NameTable) -> Self {
        Self { names }
    }
}

impl TypeVisitor for DeclarationTypeVisitor<'_> {
    fn visit_primitive(&self, kind: PrimitiveKind) -> String {
        kind.objc_name().to_string()
    }

    fn visit_declared(&self, name: &str, is_interface: bool) -> String {
        if name == JAVA_LANG_OBJECT {
            "id".to_string()
        } else if is_interface {
            format!("id<{}>", self.names.full_name(name))
        } else {
            format!("{} *", self.names.full_name(name))
        }
    }

    fn visit_array(&self, component: &JavaType) -> String {
        format!("{} *", NameTable::array_type_name(component))
    }
}

/// Selector keywords: `Int`, `NSString`, `Id`, `IntArray`, `NSStringArray2`
pub struct ParameterKeywordVisitor<'a> {
    names: &'a NameTable,
}

impl<'a> ParameterKeywordVisitor<'a> {
    pub fn new(names: &'a NameTable) -> Self {
        Self { names }
    }
}

impl TypeVisitor for ParameterKeywordVisitor<'_> {
    fn visit_primitive(&self, kind: PrimitiveKind) -> String {
        capitalize(kind.java_name())
    }

    fn visit_declared(&self, name: &str, _is_interface: bool) -> String {
        if name == JAVA_LANG_OBJECT {
            "Id".to_string()
        } else {
            self.names.full_name(name)
        }
    }

    fn visit_array(&self, component: &JavaType) -> String {
        let mut dimensions = 1;
        let mut element = component;
        while let JavaType::Array { component } = element {
            dimensions += 1;
            element = component;
        }
        let base = format!("{}Array", self.visit_type(element));
        if dimensions > 1 {
            format!("{}{}", base, dimensions)
        } else {
            base
        }
    }
}

/// Runtime class objects for type literals: `[IOSClass intClass]`,
/// `[IOSClass classWithClass:[T class]]`, `[IOSClass classWithProtocol:@protocol(P)]`
pub struct ClassLiteralVisitor<'a> {
    names: &'a NameTable,
}

impl<'a> ClassLiteralVisitor<'a> {
    pub fn new(names: &'a NameTable) -> Self {
        Self { names }
    }
}

impl TypeVisitor for ClassLiteralVisitor<'_> {
    fn visit_primitive(&self, kind: PrimitiveKind) -> String {
        format!("[IOSClass {}Class]", kind.java_name())
    }

    fn visit_declared(&self, name: &str, is_interface: bool) -> String {
        let full_name = self.names.full_name(name);
        if is_interface {
            format!("[IOSClass classWithProtocol:@protocol({})]", full_name)
        } else {
            format!("[IOSClass classWithClass:[{} class]]", full_name)
        }
    }

    fn visit_array(&self, component: &JavaType) -> String {
        format!("IOSClass_arrayType({}, 1)", self.visit_type(component))
    }

    fn visit_void(&self) -> String {
        "[IOSClass voidClass]".to_string()
    }
}
