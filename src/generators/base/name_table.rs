use crate::ast::{JavaType, Parameter, PrimitiveKind, JAVA_LANG_OBJECT, JAVA_LANG_STRING};
use crate::generators::base::type_visitor::{
    DeclarationTypeVisitor, ParameterKeywordVisitor, TypeVisitor,
};
use heck::ToLowerCamelCase;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Java types that map onto Foundation or runtime classes and are never imported.
const MAPPED_TYPES: &[(&str, &str)] = &[
    (JAVA_LANG_OBJECT, "NSObject"),
    (JAVA_LANG_STRING, "NSString"),
    ("java.lang.Number", "NSNumber"),
    ("java.lang.Cloneable", "NSCopying"),
    ("java.lang.Class", "IOSClass"),
];

/// C, Objective-C and common runtime macro names that Java identifiers may collide with.
const RESERVED_NAMES: &[&str] = &[
    "asm", "auto", "bool", "break", "case", "char", "const", "continue", "default", "do",
    "double", "else", "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long",
    "register", "restrict", "return", "short", "signed", "sizeof", "static", "struct",
    "switch", "typedef", "union", "unsigned", "void", "volatile", "while", "_Bool",
    "_Complex", "_Imaginary", "BOOL", "Class", "SEL", "IMP", "id", "instancetype", "nil",
    "Nil", "YES", "NO", "NULL", "self", "super", "_cmd", "in", "out", "inout", "oneway",
    "bycopy", "byref", "TRUE", "FALSE", "EOF", "errno", "DEBUG", "NDEBUG", "INFINITY",
    "NAN", "TYPE_BOOL", "TYPE_INT", "TYPE_LONG", "TYPE_FLOAT", "TYPE_DOUBLE",
];

/// NSObject selectors a Java method must not override by accident.
const RESERVED_METHOD_NAMES: &[&str] = &[
    "alloc", "autorelease", "class", "copy", "dealloc", "description", "hash", "init",
    "initialize", "isEqual", "load", "mutableCopy", "new", "release", "retain",
    "retainCount", "self", "superclass", "zone",
];

fn method_family_regex() -> &'static Regex {
    static FAMILY: OnceLock<Regex> = OnceLock::new();
    FAMILY.get_or_init(|| {
        Regex::new(r"^[_]*(new|copy|alloc|init|mutableCopy).*").expect("family pattern is valid")
    })
}

/// Resolves Java names into their generated Objective-C spellings.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    /// Package name to class-name prefix, e.g. `com.google.common` -> `CGC`.
    prefixes: BTreeMap<String, String>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefixes(prefixes: BTreeMap<String, String>) -> Self {
        Self { prefixes }
    }

    pub fn mapped_type(binary_name: &str) -> Option<&'static str> {
        MAPPED_TYPES
            .iter()
            .find(|(java, _)| *java == binary_name)
            .map(|(_, objc)| *objc)
    }

    /// Full generated name of a type, e.g. `com.foo.Bar$Inner` -> `ComFooBar_Inner`.
    pub fn full_name(&self, binary_name: &str) -> String {
        if let Some(mapped) = Self::mapped_type(binary_name) {
            return mapped.to_string();
        }
        let (package, simple) = split_package(binary_name);
        if let Some(prefix) = package.and_then(|p| self.prefixes.get(p)) {
            return format!("{}{}", prefix, simple.replace('$', "_"));
        }
        camel_case_qualified_name(binary_name).replace('$', "_")
    }

    /// The generated name without its package prefix, used for `@compatibility_alias`.
    pub fn short_name(binary_name: &str) -> String {
        let (_, simple) = split_package(binary_name);
        simple.replace('$', "_")
    }

    /// Header declaring the given type, or `None` for mapped Foundation types.
    pub fn header_file_name(&self, binary_name: &str, suffix: &str) -> Option<String> {
        if Self::mapped_type(binary_name).is_some() {
            return None;
        }
        let top_level = binary_name.split('$').next().unwrap_or(binary_name);
        Some(format!("{}{}", top_level.replace('.', "/"), suffix))
    }

    pub fn objc_type(&self, ty: &JavaType) -> String {
        DeclarationTypeVisitor::new(self).visit_type(ty)
    }

    pub fn parameter_keyword(&self, ty: &JavaType) -> String {
        ParameterKeywordVisitor::new(self).visit_type(ty)
    }

    pub fn is_reserved_name(name: &str) -> bool {
        RESERVED_NAMES.contains(&name)
    }

    /// Local, parameter and static field base names.
    pub fn variable_base_name(name: &str) -> String {
        if Self::is_reserved_name(name) {
            format!("{}_", name)
        } else {
            name.to_string()
        }
    }

    /// Instance fields carry a trailing underscore.
    pub fn instance_field_name(name: &str) -> String {
        format!("{}_", Self::variable_base_name(name))
    }

    /// `Type_name` for static variables.
    pub fn static_var_name(&self, declaring_type: &str, name: &str) -> String {
        format!(
            "{}_{}",
            self.full_name(declaring_type),
            Self::variable_base_name(name)
        )
    }

    pub fn enum_constant_reference(&self, declaring_type: &str, name: &str) -> String {
        format!("JreEnum({}, {})", self.full_name(declaring_type), name)
    }

    pub fn native_enum_name(type_name: &str) -> String {
        format!("{}_Enum", type_name)
    }

    pub fn native_ordinal_name(type_name: &str) -> String {
        format!("{}_ORDINAL", type_name)
    }

    /// Lower camel case of the `_`-separated constant name.
    pub fn swift_enum_name(constant: &str) -> String {
        let name = constant.to_lowercase().to_lower_camel_case();
        if Self::is_reserved_name(&name) {
            format!("{}_", name)
        } else {
            name
        }
    }

    /// Selector for a method from its name and parameter types.
    pub fn selector(
        &self,
        name: &str,
        parameter_types: &[JavaType],
        constructor: bool,
        explicit: Option<&str>,
    ) -> String {
        if let Some(selector) = explicit {
            return selector.to_string();
        }
        let mut selector = if constructor {
            "init".to_string()
        } else if RESERVED_METHOD_NAMES.contains(&name) {
            format!("{}__", name)
        } else {
            name.to_string()
        };
        for (idx, ty) in parameter_types.iter().enumerate() {
            selector.push_str(if idx == 0 { "With" } else { "with" });
            selector.push_str(&capitalize(&self.parameter_keyword(ty)));
            selector.push(':');
        }
        selector
    }

    pub fn selector_for_parameters(
        &self,
        name: &str,
        parameters: &[Parameter],
        constructor: bool,
        explicit: Option<&str>,
    ) -> String {
        let types: Vec<JavaType> = parameters.iter().map(|p| p.param_type.clone()).collect();
        self.selector(name, &types, constructor, explicit)
    }

    /// `IOSIntArray`, `IOSObjectArray`, ...
    pub fn array_type_name(component: &JavaType) -> &'static str {
        match component.as_primitive() {
            Some(PrimitiveKind::Boolean) => "IOSBooleanArray",
            Some(PrimitiveKind::Byte) => "IOSByteArray",
            Some(PrimitiveKind::Char) => "IOSCharArray",
            Some(PrimitiveKind::Short) => "IOSShortArray",
            Some(PrimitiveKind::Int) => "IOSIntArray",
            Some(PrimitiveKind::Long) => "IOSLongArray",
            Some(PrimitiveKind::Float) => "IOSFloatArray",
            Some(PrimitiveKind::Double) => "IOSDoubleArray",
            None => "IOSObjectArray",
        }
    }
}

/// Selectors starting with an ownership-transferring family prefix.
pub fn needs_objc_method_family_none(selector: &str) -> bool {
    method_family_regex().is_match(selector)
}

fn split_package(binary_name: &str) -> (Option<&str>, &str) {
    let outer_end = binary_name.find('$').unwrap_or(binary_name.len());
    match binary_name[..outer_end].rfind('.') {
        Some(idx) => (Some(&binary_name[..idx]), &binary_name[idx + 1..]),
        None => (None, binary_name),
    }
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `com.foo.Bar` -> `ComFooBar`.
pub fn camel_case_qualified_name(name: &str) -> String {
    name.split('.').map(capitalize).collect()
}

/// Guard root for an output path: `com/foo/Bar` -> `ComFooBar`.
pub fn camel_case_path(path: &str) -> String {
    path.split('/')
        .map(|part| capitalize(&part.replace(['.', '-'], "")))
        .collect()
}
