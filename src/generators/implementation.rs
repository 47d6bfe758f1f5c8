//! Implementation role: storage, method bodies and reflection data for a type.

use crate::ast::{
    BodyDeclaration, Expression, FieldDeclaration, JavaType, MethodBinding, MethodDeclaration,
    Modifier, Statement, StatementKind, TypeDeclaration, TypeKind,
};
use crate::error::Result;
use crate::generators::base::literal;
use crate::generators::base::name_table::NameTable;
use crate::generators::base::source_builder::SourceBuilder;
use crate::generators::base::type_generator::{
    needs_runtime_assignment, static_storage_value, type_with_name, GeneratorContext,
    TypeGenerator,
};
use crate::generators::expression::ExpressionGenerator;
use crate::generators::statement::StatementGenerator;

/// Version of the `J2ObjcClassInfo` layout written by `__metadata`.
const METADATA_VERSION: u32 = 7;

const ANNOTATION_CLASS: &str =
    "[IOSClass classWithProtocol:@protocol(JavaLangAnnotationAnnotation)]";

pub struct ImplementationGenerator<'a> {
    base: TypeGenerator<'a>,
    expressions: ExpressionGenerator<'a>,
}

impl<'a> ImplementationGenerator<'a> {
    pub fn new(ctx: GeneratorContext<'a>, decl: &'a TypeDeclaration) -> Result<Self> {
        Ok(Self {
            base: TypeGenerator::new(ctx, decl)?,
            expressions: ExpressionGenerator::new(ctx, &decl.name),
        })
    }

    pub fn generate(&self) -> Result<String> {
        self.base.check_rewritten()?;
        let decl = self.base.decl;
        let mut builder = self.base.builder();

        self.print_static_vars(&mut builder)?;
        if self.base.needs_static_init() {
            builder.newline();
            builder.append_line(&format!(
                "J2OBJC_INITIALIZED_DEFN({})",
                self.base.type_name
            ));
        }
        if decl.is_enum() {
            builder.newline();
            builder.append_line(&format!(
                "{} *{}_values_[{}];",
                self.base.type_name,
                self.base.type_name,
                decl.enum_constants.len()
            ));
        }

        if decl.is_interface() {
            if !self.base.needs_static_init() && self.base.options().strip_reflection {
                return Ok(builder.into_string());
            }
            // Static members of a protocol live on a class of the same name.
            builder.newline();
            builder.append_line(&format!("@interface {} : NSObject", self.base.type_name));
            builder.append_line("@end");
        }

        builder.newline();
        builder.sync_filename(self.base.ctx.source_file_name());
        builder.append_line(&format!("@implementation {}", self.base.type_name));

        if !decl.is_interface() {
            self.print_members(&mut builder)?;
            self.print_dealloc(&mut builder)?;
        }
        self.print_initialize(&mut builder)?;
        if decl.is_enum() {
            self.print_enum_accessors(&mut builder);
        }
        if !self.base.options().strip_reflection {
            self.print_type_annotations(&mut builder)?;
            self.print_metadata(&mut builder);
        }
        builder.append_line("\n@end");
        Ok(builder.into_string())
    }

    fn statements(&self, start_line: usize) -> StatementGenerator<'a> {
        StatementGenerator::new(self.base.ctx, &self.base.decl.name, start_line)
    }

    /// File-scope storage for public static fields. Private statics were
    /// already given `static` storage by the private declaration.
    fn print_static_vars(&self, builder: &mut SourceBuilder) -> Result<()> {
        let fields: Vec<&FieldDeclaration> = self
            .base
            .static_fields()
            .filter(|f| !f.has_private_declaration && !f.modifiers.is_synthetic())
            .collect();
        let mut first = true;
        for field in fields {
            let storage_type = self.base.storage_type(field);
            for fragment in &field.fragments {
                if field.is_primitive_constant(fragment) {
                    continue;
                }
                if first {
                    builder.newline();
                    first = false;
                }
                let declaration =
                    type_with_name(&storage_type, &self.base.static_var_name(fragment));
                match static_storage_value(fragment) {
                    Some(value) => builder.append_line(&format!(
                        "{} = {};",
                        declaration,
                        literal::generate(value)
                    )),
                    None => builder.append_line(&format!("{};", declaration)),
                };
            }
        }
        Ok(())
    }

    fn print_members(&self, builder: &mut SourceBuilder) -> Result<()> {
        for member in &self.base.decl.body {
            match member {
                BodyDeclaration::Method(method) if !method.static_initializer => {
                    self.print_method(builder, method)?;
                }
                BodyDeclaration::Native(native) => {
                    if let Some(code) = &native.implementation_code {
                        builder.newline();
                        builder.append_line(code.trim_end());
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn print_method(&self, builder: &mut SourceBuilder, method: &MethodDeclaration) -> Result<()> {
        if method.modifiers.is_abstract() {
            return Ok(());
        }
        let Some(body) = &method.body else {
            return Ok(());
        };

        builder.newline();
        builder.sync_line_number(method.line);
        let start_line = builder.current_line();
        let text = if method.constructor {
            self.constructor_body(&body.statements, start_line)?
        } else {
            self.statements(start_line).generate_body(body, &[])?
        };
        let text = self.synchronized(method, text);
        let line = format!(
            "{} {}",
            self.base.method_signature(method),
            builder.reindent(&text)
        );
        builder.append_line(&line);
        Ok(())
    }

    /// A leading `[super init...]` call is folded into the
    /// `if (self = ...)` guard.
    fn constructor_body(&self, statements: &[Statement], start_line: usize) -> Result<String> {
        let (super_call, rest) = match statements.split_first() {
            Some((first, rest)) => match super_constructor_call(first) {
                Some(call) => (self.expressions.generate(call)?, rest),
                None => ("[super init]".to_string(), statements),
            },
            None => ("[super init]".to_string(), statements),
        };
        if rest.is_empty() {
            return Ok(format!("{{\nreturn {};\n}}", super_call));
        }
        let body = self.statements(start_line + 2).generate_all(rest)?;
        Ok(format!(
            "{{\nif (self = {}) {{\n{}}}\nreturn self;\n}}",
            super_call, body
        ))
    }

    fn synchronized(&self, method: &MethodDeclaration, body: String) -> String {
        if !method.modifiers.has(Modifier::Synchronized) {
            return body;
        }
        let lock = if method.is_static() {
            format!("[{} class]", self.base.type_name)
        } else {
            "self".to_string()
        };
        format!("{{\n@synchronized({}) {}\n}}", lock, body)
    }

    fn print_dealloc(&self, builder: &mut SourceBuilder) -> Result<()> {
        if !self.base.options().is_reference_counted() {
            return Ok(());
        }
        let retained: Vec<String> = self
            .base
            .decl
            .fields()
            .filter(|f| !f.modifiers.is_static() && !f.field_type.is_primitive() && !f.weak)
            .flat_map(|f| f.fragments.iter())
            .map(|fragment| NameTable::instance_field_name(&fragment.name))
            .collect();
        if retained.is_empty() {
            return Ok(());
        }
        builder.newline();
        builder.append_line("- (void)dealloc {");
        builder.indent();
        for name in retained {
            builder.indented_line(&format!("RELEASE_({});", name));
        }
        builder.indented_line("[super dealloc];");
        builder.unindent()?;
        builder.append_line("}");
        Ok(())
    }

    /// `+initialize` runs static field initializers, creates enum constants
    /// and then the static initializer body, once for the exact class.
    fn print_initialize(&self, builder: &mut SourceBuilder) -> Result<()> {
        if !self.base.needs_static_init() {
            return Ok(());
        }
        let decl = self.base.decl;
        let type_name = &self.base.type_name;
        let mut body = String::from("{\n");
        body.push_str(&format!("if (self == [{} class]) {{\n", type_name));

        for field in self.base.static_fields() {
            for fragment in &field.fragments {
                if !needs_runtime_assignment(fragment) {
                    continue;
                }
                let name = self.base.static_var_name(fragment);
                let value = match (&fragment.constant_value, &fragment.initializer) {
                    (Some(constant), _) => literal::generate(constant),
                    (None, Some(init)) => self.expressions.generate(init)?,
                    (None, None) => continue,
                };
                if self.base.options().is_reference_counted() && !field.field_type.is_primitive()
                {
                    body.push_str(&format!("JreStrongAssign(&{}, {});\n", name, value));
                } else {
                    body.push_str(&format!("{} = {};\n", name, value));
                }
            }
        }

        for (ordinal, constant) in decl.enum_constants.iter().enumerate() {
            let mut constructor = constant
                .constructor
                .clone()
                .unwrap_or_else(|| MethodBinding::new(&decl.name, "<init>", JavaType::Void));
            constructor.selector = None;
            constructor.parameter_types.push(JavaType::string());
            constructor.parameter_types.push(JavaType::int());
            let mut arguments = constant.arguments.clone();
            arguments.push(Expression::string(&constant.name));
            arguments.push(Expression::int(ordinal as i32));
            let allocation = self.expressions.retained_allocation(
                &JavaType::enumeration(&decl.name),
                &constructor,
                &arguments,
            )?;
            body.push_str(&format!(
                "{}_values_[{}] = {};\n",
                type_name, ordinal, allocation
            ));
        }

        if let Some(init) = self.base.static_initializer() {
            if let Some(block) = &init.body {
                body.push_str(&self.statements(builder.current_line()).generate_all(&block.statements)?);
            }
        }
        body.push_str(&format!("J2OBJC_SET_INITIALIZED({});\n", type_name));
        body.push_str("}\n}");

        let line = format!("+ (void)initialize {}", builder.reindent(&body));
        builder.newline();
        builder.append_line(&line);
        Ok(())
    }

    fn print_enum_accessors(&self, builder: &mut SourceBuilder) {
        let type_name = &self.base.type_name;
        let count = self.base.decl.enum_constants.len();
        let exception = if self.base.options().is_reference_counted() {
            "[[[JavaLangIllegalArgumentException alloc] initWithNSString:name] autorelease]"
        } else {
            "[[JavaLangIllegalArgumentException alloc] initWithNSString:name]"
        };
        let text = format!(
            "\n+ (IOSObjectArray *)values {{\n\
             return [IOSObjectArray arrayWithObjects:{t}_values_ count:{n} type:[IOSClass classWithClass:[{t} class]]];\n\
             }}\n\
             \n+ ({t} *)valueOfWithNSString:(NSString *)name {{\n\
             for (jint i = 0; i < {n}; i++) {{\n\
             {t} *e = {t}_values_[i];\n\
             if ([name isEqual:[e name]]) {{\n\
             return e;\n\
             }}\n\
             }}\n\
             @throw {ex};\n\
             return nil;\n\
             }}",
            t = type_name,
            n = count,
            ex = exception
        );
        let text = builder.reindent(&text);
        builder.append_line(&text);
    }

    fn print_type_annotations(&self, builder: &mut SourceBuilder) -> Result<()> {
        let annotations: Vec<String> = self
            .base
            .decl
            .annotations
            .iter()
            .filter(|a| a.runtime)
            .map(|a| {
                self.expressions
                    .generate(&Expression::AnnotationLiteral { annotation: a.clone() })
            })
            .collect::<Result<_>>()?;
        if annotations.is_empty() {
            return Ok(());
        }
        builder.newline();
        builder.append_line("+ (IOSObjectArray *)__annotations {");
        builder.indent();
        builder.indented_line(&format!(
            "return [IOSObjectArray arrayWithObjects:(id[]){{ {} }} count:{} type:{}];",
            annotations.join(", "),
            annotations.len(),
            ANNOTATION_CLASS
        ));
        builder.unindent()?;
        builder.append_line("}");
        Ok(())
    }

    /// Reflection table: one entry per declared method plus the class record.
    fn print_metadata(&self, builder: &mut SourceBuilder) {
        let decl = self.base.decl;
        let type_name = &self.base.type_name;
        let methods: Vec<&MethodDeclaration> = decl
            .methods()
            .filter(|m| !m.static_initializer && !m.modifiers.is_synthetic())
            .collect();
        let field_count: usize = decl
            .fields()
            .filter(|f| !f.modifiers.is_synthetic())
            .map(|f| f.fragments.len())
            .sum();

        let simple_name = decl.name.rsplit(['.', '$']).next().unwrap_or_default();
        let package = match decl.name.split('$').next().and_then(|n| n.rfind('.')) {
            Some(idx) => c_string(&decl.name[..idx]),
            None => "NULL".to_string(),
        };
        let outer = decl
            .outer_name()
            .map(|outer| c_string(&self.base.names().full_name(outer)))
            .unwrap_or_else(|| "NULL".to_string());
        let superclass = decl
            .superclass
            .as_deref()
            .map(|s| c_string(&self.base.names().full_name(s)))
            .unwrap_or_else(|| "NULL".to_string());

        let mut text = String::from("\n+ (const J2ObjcClassInfo *)__metadata {\n");
        if !methods.is_empty() {
            text.push_str("static const J2ObjcMethodInfo methods[] = {\n");
            for method in &methods {
                let return_signature = if method.constructor {
                    "NULL".to_string()
                } else {
                    c_string(&type_signature(&method.return_type))
                };
                text.push_str(&format!(
                    "{{ \"{}\", {}, 0x{:x} }},\n",
                    self.base.selector(method),
                    return_signature,
                    TypeGenerator::access_flags(&method.modifiers)
                ));
            }
            text.push_str("};\n");
        }
        text.push_str(&format!(
            "static const J2ObjcClassInfo _{t} = {{ \"{name}\", {pkg}, {outer}, {methods}, {version}, 0x{flags:x}, {mcount}, {fcount}, {sup} }};\n\
             return &_{t};\n}}",
            t = type_name,
            name = simple_name,
            pkg = package,
            outer = outer,
            methods = if methods.is_empty() { "NULL" } else { "methods" },
            version = METADATA_VERSION,
            flags = TypeGenerator::access_flags(&decl.modifiers) | interface_flags(decl),
            mcount = methods.len(),
            fcount = field_count,
            sup = superclass
        ));
        let text = builder.reindent(&text);
        builder.append_line(&text);
    }
}

fn super_constructor_call(stmt: &Statement) -> Option<&Expression> {
    match &stmt.kind {
        StatementKind::Expression { expression } => match expression {
            Expression::SuperMethodInvocation { binding, .. } if binding.constructor => {
                Some(expression)
            }
            _ => None,
        },
        _ => None,
    }
}

fn c_string(text: &str) -> String {
    format!("\"{}\"", text)
}

fn interface_flags(decl: &TypeDeclaration) -> u32 {
    match decl.kind {
        TypeKind::Interface => 0x200,
        TypeKind::Annotation => 0x2200,
        TypeKind::Enum => 0x4000,
        TypeKind::Class => 0,
    }
}

/// JVM descriptor of a type, e.g. `I`, `Ljava/lang/String;` or `[J`.
pub fn type_signature(ty: &JavaType) -> String {
    match ty {
        JavaType::Primitive { primitive } => primitive.signature_char().to_string(),
        JavaType::Declared { name, .. } => format!("L{};", name.replace('.', "/")),
        JavaType::Array { component } => format!("[{}", type_signature(component)),
        JavaType::TypeVariable { name } => format!("T{};", name),
        JavaType::Union { .. } | JavaType::Null => "Ljava/lang/Object;".to_string(),
        JavaType::Void => "V".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        Annotation, Block, EnumConstant, LiteralValue, Parameter, VariableBinding,
        VariableFragment,
    };
    use crate::interface::config::{MemoryManagement, TranslationOptions};

    fn generate_with(options: &TranslationOptions, decl: &TypeDeclaration) -> String {
        let names = NameTable::new();
        let ctx = GeneratorContext::new(options, &names, "com/foo/Bar.java");
        ImplementationGenerator::new(ctx, decl)
            .unwrap()
            .generate()
            .unwrap()
    }

    fn stripped() -> TranslationOptions {
        TranslationOptions {
            strip_reflection: true,
            ..Default::default()
        }
    }

    fn generate(decl: &TypeDeclaration) -> String {
        generate_with(&stripped(), decl)
    }

    fn class() -> TypeDeclaration {
        TypeDeclaration::new("com.foo.Bar", TypeKind::Class)
    }

    fn call(name: &str) -> Statement {
        StatementKind::Expression {
            expression: Expression::MethodInvocation {
                expression: None,
                binding: MethodBinding::new("com.foo.Bar", name, JavaType::Void),
                arguments: vec![],
            },
        }
        .into()
    }

    mod methods {
        use super::*;

        #[test]
        fn test_method_body_is_reindented() {
            let mut decl = class();
            let method = MethodDeclaration::new("run", &[Modifier::Public], JavaType::Void)
                .with_parameters(vec![Parameter::new("count", JavaType::int())])
                .with_body(Block::new(vec![call("step")]));
            decl.body.push(BodyDeclaration::Method(method));
            assert_eq!(
                generate(&decl),
                "\n@implementation ComFooBar\n\
                 \n- (void)runWithInt:(jint)count {\n  [self step];\n}\n\
                 \n@end\n"
            );
        }

        #[test]
        fn test_abstract_method_has_no_body() {
            let mut decl = class();
            decl.body.push(BodyDeclaration::Method(
                MethodDeclaration::new("run", &[Modifier::Public, Modifier::Abstract], JavaType::Void)
                    .with_body(Block::new(vec![])),
            ));
            assert!(!generate(&decl).contains("- (void)run"));
        }

        #[test]
        fn test_default_constructor_calls_super_init() {
            let mut decl = class();
            decl.body.push(BodyDeclaration::Method(
                MethodDeclaration::constructor(&[Modifier::Public]).with_body(Block::new(vec![])),
            ));
            assert!(generate(&decl).contains("- (instancetype)init {\n  return [super init];\n}\n"));
        }

        #[test]
        fn test_constructor_with_statements_guards_self() {
            let mut decl = class();
            decl.body.push(BodyDeclaration::Method(
                MethodDeclaration::constructor(&[Modifier::Public])
                    .with_body(Block::new(vec![call("setup")])),
            ));
            assert!(generate(&decl).contains(
                "- (instancetype)init {\n  if (self = [super init]) {\n    [self setup];\n  }\n  return self;\n}\n"
            ));
        }

        #[test]
        fn test_synchronized_method() {
            let mut decl = class();
            decl.body.push(BodyDeclaration::Method(
                MethodDeclaration::new(
                    "run",
                    &[Modifier::Public, Modifier::Synchronized],
                    JavaType::Void,
                )
                .with_body(Block::new(vec![call("step")])),
            ));
            assert!(generate(&decl).contains(
                "- (void)run {\n  @synchronized(self) {\n    [self step];\n  }\n}\n"
            ));
        }
    }

    mod statics {
        use super::*;

        #[test]
        fn test_storage_skips_constants() {
            let mut decl = class();
            decl.body.push(BodyDeclaration::Field(FieldDeclaration::new(
                &[Modifier::Public, Modifier::Static, Modifier::Final],
                JavaType::int(),
                vec![VariableFragment::named("X").with_constant(LiteralValue::Int(5))],
            )));
            decl.body.push(BodyDeclaration::Field(FieldDeclaration::new(
                &[Modifier::Public, Modifier::Static],
                JavaType::double(),
                vec![VariableFragment::named("Y")],
            )));
            let text = generate(&decl);
            assert!(text.starts_with("\njdouble ComFooBar_Y;\n"));
            assert!(!text.contains("ComFooBar_X"));
            assert!(!text.contains("J2OBJC_INITIALIZED_DEFN"));
        }

        #[test]
        fn test_initializer_runs_in_initialize() {
            let mut decl = class();
            decl.body.push(BodyDeclaration::Field(FieldDeclaration::new(
                &[Modifier::Public, Modifier::Static],
                JavaType::string(),
                vec![VariableFragment::named("NAME").with_initializer(Expression::FunctionInvocation {
                    name: "ComputeName".to_string(),
                    arguments: vec![],
                    return_type: JavaType::string(),
                })],
            )));
            let text = generate(&decl);
            assert!(text.contains("\nNSString *ComFooBar_NAME;\n"));
            assert!(text.contains("\nJ2OBJC_INITIALIZED_DEFN(ComFooBar)\n"));
            assert!(text.contains(
                "+ (void)initialize {\n  if (self == [ComFooBar class]) {\n    ComFooBar_NAME = ComputeName();\n    J2OBJC_SET_INITIALIZED(ComFooBar);\n  }\n}\n"
            ));
        }

        #[test]
        fn test_wide_string_constant_is_assigned_in_initialize() {
            let mut decl = class();
            decl.body.push(BodyDeclaration::Field(FieldDeclaration::new(
                &[Modifier::Public, Modifier::Static, Modifier::Final],
                JavaType::string(),
                vec![VariableFragment::named("GREETING")
                    .with_constant(LiteralValue::String("中".to_string()))],
            )));
            decl.body.push(BodyDeclaration::Field(FieldDeclaration::new(
                &[Modifier::Public, Modifier::Static, Modifier::Final],
                JavaType::string(),
                vec![VariableFragment::named("PLAIN")
                    .with_constant(LiteralValue::String("hi".to_string()))],
            )));
            let text = generate(&decl);
            assert!(text.contains("\nNSString *ComFooBar_GREETING;\n"));
            assert!(text.contains("\nNSString *ComFooBar_PLAIN = @\"hi\";\n"));
            assert!(text.contains("\nJ2OBJC_INITIALIZED_DEFN(ComFooBar)\n"));
            assert!(text.contains(
                "    ComFooBar_GREETING = [NSString stringWithCharacters:(unichar[]) { (int) 0x4e2d } length:1];\n"
            ));
            assert!(!text.contains("    ComFooBar_PLAIN ="));
        }

        #[test]
        fn test_static_initializer_body() {
            let mut decl = class();
            let mut init = MethodDeclaration::new("initialize", &[Modifier::Static], JavaType::Void)
                .with_body(Block::new(vec![call("prepare")]));
            init.static_initializer = true;
            decl.body.push(BodyDeclaration::Method(init));
            let text = generate(&decl);
            assert!(text.contains("    [self prepare];\n    J2OBJC_SET_INITIALIZED(ComFooBar);\n"));
            assert_eq!(text.matches("+ (void)initialize").count(), 1);
        }
    }

    mod enums {
        use super::*;

        fn color() -> TypeDeclaration {
            let mut decl = TypeDeclaration::new("com.foo.Color", TypeKind::Enum);
            decl.superclass = Some("java.lang.Enum".to_string());
            decl.enum_constants = vec![
                EnumConstant {
                    name: "RED".to_string(),
                    arguments: vec![],
                    constructor: None,
                    javadoc: None,
                },
                EnumConstant {
                    name: "GREEN".to_string(),
                    arguments: vec![Expression::int(7)],
                    constructor: Some(
                        MethodBinding::new("com.foo.Color", "<init>", JavaType::Void)
                            .with_parameters(vec![JavaType::int()]),
                    ),
                    javadoc: None,
                },
            ];
            decl
        }

        #[test]
        fn test_values_storage_and_creation() {
            let text = generate(&color());
            assert!(text.contains("\nComFooColor *ComFooColor_values_[2];\n"));
            assert!(text.contains(
                "ComFooColor_values_[0] = [[ComFooColor alloc] initWithNSString:@\"RED\" withInt:0];"
            ));
            assert!(text.contains(
                "ComFooColor_values_[1] = [[ComFooColor alloc] initWithInt:7 withNSString:@\"GREEN\" withInt:1];"
            ));
        }

        #[test]
        fn test_values_and_value_of() {
            let text = generate(&color());
            assert!(text.contains("+ (IOSObjectArray *)values {"));
            assert!(text.contains("+ (ComFooColor *)valueOfWithNSString:(NSString *)name {"));
            assert!(text.contains("    if ([name isEqual:[e name]]) {\n      return e;\n"));
        }
    }

    mod reflection {
        use super::*;

        #[test]
        fn test_metadata_lists_methods_and_superclass() {
            let mut decl = class();
            decl.superclass = Some("com.foo.Base".to_string());
            decl.body.push(BodyDeclaration::Method(
                MethodDeclaration::new("size", &[Modifier::Public], JavaType::int())
                    .with_body(Block::new(vec![])),
            ));
            let text = generate_with(&TranslationOptions::default(), &decl);
            assert!(text.contains("+ (const J2ObjcClassInfo *)__metadata {\n"));
            assert!(text.contains("    { \"size\", \"I\", 0x1 },\n"));
            assert!(text.contains(
                "static const J2ObjcClassInfo _ComFooBar = { \"Bar\", \"com.foo\", NULL, methods, 7, 0x1, 1, 0, \"ComFooBase\" };"
            ));
            assert!(text.contains("  return &_ComFooBar;\n}\n"));
        }

        #[test]
        fn test_strip_reflection_omits_metadata() {
            assert!(!generate(&class()).contains("__metadata"));
        }

        #[test]
        fn test_runtime_annotations() {
            let mut decl = class();
            decl.annotations.push(Annotation {
                type_name: "com.foo.Marker".to_string(),
                runtime: true,
                members: vec![],
            });
            decl.annotations.push(Annotation {
                type_name: "com.foo.SourceOnly".to_string(),
                runtime: false,
                members: vec![],
            });
            let text = generate_with(&TranslationOptions::default(), &decl);
            assert!(text.contains(
                "+ (IOSObjectArray *)__annotations {\n  return [IOSObjectArray arrayWithObjects:(id[]){ [[ComFooMarker_Impl alloc] init] } count:1 type:[IOSClass classWithProtocol:@protocol(JavaLangAnnotationAnnotation)]];\n}\n"
            ));
            assert!(!text.contains("SourceOnly"));
        }
    }

    mod memory {
        use super::*;

        #[test]
        fn test_reference_counted_dealloc() {
            let options = TranslationOptions {
                memory_management: MemoryManagement::ReferenceCounting,
                strip_reflection: true,
                ..Default::default()
            };
            let mut decl = class();
            decl.body.push(BodyDeclaration::Field(FieldDeclaration::new(
                &[Modifier::Private],
                JavaType::string(),
                vec![VariableFragment::named("label")],
            )));
            decl.body.push(BodyDeclaration::Field(FieldDeclaration::new(
                &[Modifier::Private],
                JavaType::int(),
                vec![VariableFragment::named("count")],
            )));
            let text = generate_with(&options, &decl);
            assert!(text.contains("- (void)dealloc {\n  RELEASE_(label_);\n  [super dealloc];\n}\n"));
            assert!(!text.contains("count_"));
        }

        #[test]
        fn test_arc_has_no_dealloc() {
            let mut decl = class();
            decl.body.push(BodyDeclaration::Field(FieldDeclaration::new(
                &[Modifier::Private],
                JavaType::string(),
                vec![VariableFragment::named("label")],
            )));
            assert!(!generate(&decl).contains("dealloc"));
        }
    }

    #[test]
    fn test_field_binding_reference_in_body() {
        let mut decl = class();
        let body = Block::new(vec![StatementKind::Return {
            expression: Some(Expression::name(
                "count",
                VariableBinding::field("com.foo.Bar", JavaType::int()),
            )),
        }
        .into()]);
        decl.body.push(BodyDeclaration::Method(
            MethodDeclaration::new("count", &[Modifier::Public], JavaType::int()).with_body(body),
        ));
        assert!(generate(&decl).contains("- (jint)count {\n  return count_;\n}\n"));
    }
}
