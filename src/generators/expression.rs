use crate::ast::{
    Annotation, AssignmentOperator, Expression, InfixOperator, JavaType, LiteralValue,
    MethodBinding, PostfixOperator, PrefixOperator, PrimitiveKind, VariableBinding,
    VariableFragment, VariableKind, JAVA_LANG_OBJECT,
};
use crate::error::{Error, Result};
use crate::generators::base::literal;
use crate::generators::base::name_table::{capitalize, NameTable};
use crate::generators::base::type_generator::{declaration_list, GeneratorContext};
use crate::generators::base::type_visitor::{ClassLiteralVisitor, TypeVisitor};

/// Renders expressions as Objective-C text.
///
/// `current_type` is the binary name of the type whose code is being
/// generated; statics of that type are referenced directly, statics of other
/// types go through `JreLoadStatic`.
#[derive(Clone, Copy)]
pub struct ExpressionGenerator<'a> {
    ctx: GeneratorContext<'a>,
    current_type: &'a str,
}

impl<'a> ExpressionGenerator<'a> {
    pub fn new(ctx: GeneratorContext<'a>, current_type: &'a str) -> Self {
        Self { ctx, current_type }
    }

    fn names(&self) -> &'a NameTable {
        self.ctx.names
    }

    pub fn generate(&self, expr: &Expression) -> Result<String> {
        match expr {
            Expression::BooleanLiteral { value } => Ok(value.to_string()),
            Expression::CharacterLiteral { value } => Ok(literal::generate_char(*value)),
            Expression::NumberLiteral { value, token } => {
                Ok(literal::generate_number(value, token.as_deref()))
            }
            Expression::StringLiteral { value } => Ok(literal::generate_string_literal(value)),
            Expression::NullLiteral => Ok("nil".to_string()),
            Expression::TypeLiteral { literal_type } => {
                Ok(ClassLiteralVisitor::new(self.names()).visit_type(literal_type))
            }
            Expression::SimpleName { name, binding } => self.variable_reference(name, binding, false),
            Expression::FieldAccess {
                expression,
                name,
                binding,
            } => self.field_access(expression, name, binding, false),
            Expression::This => Ok("self".to_string()),
            Expression::Assignment { lhs, operator, rhs } => self.assignment(lhs, *operator, rhs),
            Expression::Infix {
                operator,
                operands,
                result_type,
            } => self.infix(*operator, operands, result_type),
            Expression::Prefix { operator, operand } => self.prefix(*operator, operand),
            Expression::Postfix { operand, operator } => self.postfix(operand, *operator),
            Expression::Parenthesized { expression } => {
                Ok(format!("({})", self.generate(expression)?))
            }
            Expression::Conditional {
                condition,
                then_expression,
                else_expression,
            } => Ok(format!(
                "{} ? {} : {}",
                self.generate(condition)?,
                self.generate(then_expression)?,
                self.generate(else_expression)?
            )),
            Expression::Cast {
                cast_type,
                expression,
            } => self.cast(cast_type, expression),
            Expression::Instanceof {
                expression,
                right_type,
            } => self.instance_of(expression, right_type),
            Expression::MethodInvocation {
                expression,
                binding,
                arguments,
            } => self.method_invocation(expression.as_deref(), binding, arguments),
            Expression::SuperMethodInvocation { binding, arguments } => {
                Ok(format!("[super {}]", self.message(binding, arguments)?))
            }
            Expression::FunctionInvocation {
                name, arguments, ..
            } => Ok(format!("{}({})", name, self.arguments(arguments)?.join(", "))),
            Expression::NewObject {
                object_type,
                constructor,
                arguments,
            } => self.allocation(object_type, constructor, arguments),
            Expression::ArrayLiteral {
                array_type,
                elements,
            } => self.array_literal(array_type, elements),
            Expression::AnnotationLiteral { annotation } => self.annotation_literal(annotation),
            Expression::VariableDeclarationExpression {
                var_type,
                fragments,
            } => self.variable_declaration(var_type, fragments),
            Expression::Native { code } => Ok(code.clone()),
            Expression::ArrayAccess => Err(Error::not_rewritten("ArrayAccess")),
            Expression::ArrayCreation => Err(Error::not_rewritten("ArrayCreation")),
            Expression::ClassInstanceCreation => Err(Error::not_rewritten("ClassInstanceCreation")),
            Expression::Lambda => Err(Error::not_rewritten("LambdaExpression")),
            Expression::MethodReference => Err(Error::not_rewritten("MethodReference")),
        }
    }

    pub fn arguments(&self, arguments: &[Expression]) -> Result<Vec<String>> {
        arguments.iter().map(|arg| self.generate(arg)).collect()
    }

    /// `NSString *a = x, *b` for declarations in statements and `for` initializers.
    pub fn variable_declaration(
        &self,
        var_type: &JavaType,
        fragments: &[VariableFragment],
    ) -> Result<String> {
        let names = fragments
            .iter()
            .map(|fragment| {
                let name = NameTable::variable_base_name(&fragment.name);
                Ok(match &fragment.initializer {
                    Some(init) => format!("{} = {}", name, self.generate(init)?),
                    None => name,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(declaration_list(&self.names().objc_type(var_type), &names))
    }

    fn declaring_type<'b>(&'b self, binding: &'b VariableBinding) -> &'b str {
        binding.declaring_type.as_deref().unwrap_or(self.current_type)
    }

    fn variable_reference(&self, name: &str, binding: &VariableBinding, lhs: bool) -> Result<String> {
        if name.is_empty() {
            return Err(Error::MissingName(format!(
                "variable reference in {}",
                self.current_type
            )));
        }
        Ok(match binding.kind {
            VariableKind::Local | VariableKind::Parameter => NameTable::variable_base_name(name),
            VariableKind::Field => NameTable::instance_field_name(name),
            VariableKind::EnumConstant => self
                .names()
                .enum_constant_reference(self.declaring_type(binding), name),
            VariableKind::StaticField => self.static_reference(name, binding, lhs),
        })
    }

    fn static_reference(&self, name: &str, binding: &VariableBinding, lhs: bool) -> String {
        let declaring_type = self.declaring_type(binding);
        if binding.constant || declaring_type == self.current_type {
            return self.names().static_var_name(declaring_type, name);
        }
        let type_name = self.names().full_name(declaring_type);
        let base = NameTable::variable_base_name(name);
        if lhs {
            format!("*JreLoadStaticRef({}, {})", type_name, base)
        } else {
            format!("JreLoadStatic({}, {})", type_name, base)
        }
    }

    fn field_access(
        &self,
        expression: &Expression,
        name: &str,
        binding: &VariableBinding,
        lhs: bool,
    ) -> Result<String> {
        match binding.kind {
            VariableKind::StaticField | VariableKind::EnumConstant => {
                return self.variable_reference(name, binding, lhs);
            }
            VariableKind::Local | VariableKind::Parameter | VariableKind::Field => {}
        }
        let field = NameTable::instance_field_name(name);
        if matches!(expression, Expression::This) {
            return Ok(format!("self->{}", field));
        }
        let target = self.generate(expression)?;
        match expression.type_hint().as_ref().and_then(JavaType::declared_name) {
            Some(declared) if declared != JAVA_LANG_OBJECT => Ok(format!(
                "(({} *) nil_chk({}))->{}",
                self.names().full_name(declared),
                target,
                field
            )),
            _ => Ok(format!("nil_chk({})->{}", target, field)),
        }
    }

    /// Assignment targets: statics of other types are written through their reference.
    fn lhs(&self, expr: &Expression) -> Result<String> {
        match expr {
            Expression::SimpleName { name, binding } => self.variable_reference(name, binding, true),
            Expression::FieldAccess {
                expression,
                name,
                binding,
            } => self.field_access(expression, name, binding, true),
            Expression::Parenthesized { expression } => Ok(format!("({})", self.lhs(expression)?)),
            other => self.generate(other),
        }
    }

    fn is_retained_object_field(&self, expr: &Expression) -> bool {
        match expr {
            Expression::SimpleName { binding, .. } | Expression::FieldAccess { binding, .. } => {
                matches!(binding.kind, VariableKind::Field | VariableKind::StaticField)
                    && !binding.constant
                    && !binding.var_type.is_primitive()
            }
            _ => false,
        }
    }

    fn assignment(
        &self,
        lhs: &Expression,
        operator: AssignmentOperator,
        rhs: &Expression,
    ) -> Result<String> {
        let target = self.lhs(lhs)?;
        let value = self.generate(rhs)?;
        let lhs_type = lhs.type_hint().unwrap_or_default();

        match operator {
            AssignmentOperator::Assign
                if self.ctx.options.is_reference_counted() && self.is_retained_object_field(lhs) =>
            {
                Ok(format!("JreStrongAssign(&{}, {})", target, value))
            }
            AssignmentOperator::PlusAssign if lhs_type.is_string() => {
                let code = format!("${}", concat_code(rhs));
                Ok(format!(
                    "{} = JreStrcat(\"{}\", {}, {})",
                    target,
                    code,
                    self.generate(lhs)?,
                    value
                ))
            }
            AssignmentOperator::RightShiftUnsignedAssign => {
                let kind = lhs_type.as_primitive().unwrap_or(PrimitiveKind::Int);
                Ok(format!(
                    "URShiftAssign{}(&{}, {})",
                    capitalize(kind.java_name()),
                    target,
                    value
                ))
            }
            AssignmentOperator::LeftShiftAssign | AssignmentOperator::RightShiftSignedAssign => {
                Ok(format!(
                    "{} {} {}",
                    target,
                    operator.as_str(),
                    shift_amount(rhs, &value, lhs_type.is_long())
                ))
            }
            _ => Ok(format!("{} {} {}", target, operator.as_str(), value)),
        }
    }

    fn prefix(&self, operator: PrefixOperator, operand: &Expression) -> Result<String> {
        let text = match operator {
            PrefixOperator::Increment | PrefixOperator::Decrement => wrap_dereference(self.lhs(operand)?),
            _ => self.generate(operand)?,
        };
        Ok(format!("{}{}", operator.as_str(), text))
    }

    fn postfix(&self, operand: &Expression, operator: PostfixOperator) -> Result<String> {
        Ok(format!(
            "{}{}",
            wrap_dereference(self.lhs(operand)?),
            operator.as_str()
        ))
    }

    fn infix(
        &self,
        operator: InfixOperator,
        operands: &[Expression],
        result_type: &JavaType,
    ) -> Result<String> {
        if operands.len() < 2 {
            return Err(Error::CodeGeneration(format!(
                "infix '{}' needs at least two operands",
                operator.as_str()
            )));
        }
        if operator == InfixOperator::Plus && result_type.is_string() {
            return self.string_concatenation(operands);
        }
        if matches!(operator, InfixOperator::Equals | InfixOperator::NotEquals) {
            if let Some(text) = self.string_equality(operator, &operands[0], &operands[1])? {
                return Ok(text);
            }
        }

        let long = result_type.is_long() || operands[0].type_hint().is_some_and(|t| t.is_long());
        let mut text = self.generate(&operands[0])?;
        for operand in &operands[1..] {
            let right = self.generate(operand)?;
            text = match operator {
                InfixOperator::RightShiftUnsigned => {
                    let (cast, unsigned, mask) = if long {
                        ("jlong", "unsigned long long", "0x3f")
                    } else {
                        ("jint", "unsigned int", "0x1f")
                    };
                    format!(
                        "({}) ((({}) {}) >> ({} & {}))",
                        cast, unsigned, text, right, mask
                    )
                }
                InfixOperator::LeftShift | InfixOperator::RightShiftSigned => format!(
                    "{} {} {}",
                    text,
                    operator.as_str(),
                    shift_amount(operand, &right, long)
                ),
                InfixOperator::Remainder => match result_type.as_primitive() {
                    Some(PrimitiveKind::Float) => format!("fmodf({}, {})", text, right),
                    Some(PrimitiveKind::Double) => format!("fmod({}, {})", text, right),
                    _ => format!("{} % {}", text, right),
                },
                _ => format!("{} {} {}", text, operator.as_str(), right),
            };
        }
        Ok(text)
    }

    /// Value comparison for strings: `[x isEqual:@"a"]`, receiver being the
    /// operand that is not a literal.
    fn string_equality(
        &self,
        operator: InfixOperator,
        left: &Expression,
        right: &Expression,
    ) -> Result<Option<String>> {
        let is_null = |e: &Expression| matches!(e, Expression::NullLiteral);
        let is_string = |e: &Expression| e.type_hint().is_some_and(|t| t.is_string());
        if is_null(left) || is_null(right) || !(is_string(left) || is_string(right)) {
            return Ok(None);
        }
        if !left.is_string_literal() && !right.is_string_literal() {
            return Ok(None);
        }
        let (receiver, argument) = if left.is_string_literal() {
            (right, left)
        } else {
            (left, right)
        };
        let negation = if operator == InfixOperator::NotEquals { "!" } else { "" };
        Ok(Some(format!(
            "{}[{} isEqual:{}]",
            negation,
            self.generate(receiver)?,
            self.generate(argument)?
        )))
    }

    /// An `NSString` rendering of `expr`: strings pass through, primitives go
    /// through `JreStrcat` and objects are sent `description`.
    pub fn describe(&self, expr: &Expression) -> Result<String> {
        match expr.type_hint() {
            Some(ty) if ty.is_string() => self.generate(expr),
            Some(JavaType::Primitive { .. }) => {
                self.string_concatenation(std::slice::from_ref(expr))
            }
            _ => Ok(format!("[{} description]", self.generate(expr)?)),
        }
    }

    fn string_concatenation(&self, operands: &[Expression]) -> Result<String> {
        let codes: String = operands.iter().map(concat_code).collect();
        Ok(format!(
            "JreStrcat(\"{}\", {})",
            codes,
            self.arguments(operands)?.join(", ")
        ))
    }

    fn cast(&self, cast_type: &JavaType, expression: &Expression) -> Result<String> {
        let operand = parenthesize(expression, self.generate(expression)?);
        match cast_type {
            JavaType::Primitive { primitive } => {
                let from_float = matches!(
                    expression.type_hint().and_then(|t| t.as_primitive()),
                    Some(PrimitiveKind::Float | PrimitiveKind::Double)
                );
                Ok(match (primitive, from_float) {
                    (PrimitiveKind::Int, true) => format!("JreFpToInt({})", operand),
                    (PrimitiveKind::Long, true) => format!("JreFpToLong({})", operand),
                    (PrimitiveKind::Char, true) => format!("JreFpToChar({})", operand),
                    (PrimitiveKind::Byte | PrimitiveKind::Short, true) => {
                        format!("({}) JreFpToInt({})", primitive.objc_name(), operand)
                    }
                    _ => format!("({}) {}", primitive.objc_name(), operand),
                })
            }
            JavaType::Declared {
                name, interface, ..
            } => {
                if name == JAVA_LANG_OBJECT {
                    Ok(format!("(id) {}", operand))
                } else if *interface {
                    let full_name = self.names().full_name(name);
                    Ok(format!(
                        "(id<{}>) check_protocol_cast({}, @protocol({}))",
                        full_name, operand, full_name
                    ))
                } else {
                    let full_name = self.names().full_name(name);
                    Ok(format!(
                        "({} *) check_class_cast({}, [{} class])",
                        full_name, operand, full_name
                    ))
                }
            }
            JavaType::Array { component } => {
                let array = NameTable::array_type_name(component);
                Ok(format!(
                    "({} *) check_class_cast({}, [{} class])",
                    array, operand, array
                ))
            }
            JavaType::TypeVariable { .. } | JavaType::Union { .. } | JavaType::Null => {
                Ok(format!("(id) {}", operand))
            }
            JavaType::Void => Err(Error::CodeGeneration("cast to void".to_string())),
        }
    }

    fn instance_of(&self, expression: &Expression, right_type: &JavaType) -> Result<String> {
        let value = self.generate(expression)?;
        match right_type {
            JavaType::Declared {
                name,
                interface: false,
                ..
            } => Ok(format!(
                "[{} isKindOfClass:[{} class]]",
                value,
                self.names().full_name(name)
            )),
            JavaType::Declared {
                name,
                interface: true,
                ..
            } => Ok(format!(
                "[{}_class_() isInstance:{}]",
                self.names().full_name(name),
                value
            )),
            other => Ok(format!(
                "[{} isInstance:{}]",
                ClassLiteralVisitor::new(self.names()).visit_type(other),
                value
            )),
        }
    }

    /// `sel` or `k1:a k2:b`, without brackets.
    fn message(&self, binding: &MethodBinding, arguments: &[Expression]) -> Result<String> {
        let selector = self.names().selector(
            &binding.name,
            &binding.parameter_types,
            binding.constructor,
            binding.selector.as_deref(),
        );
        if arguments.is_empty() {
            return Ok(selector.trim_end_matches(':').to_string());
        }
        let keywords: Vec<&str> = selector.split(':').filter(|k| !k.is_empty()).collect();
        if keywords.len() != arguments.len() {
            return Err(Error::CodeGeneration(format!(
                "selector '{}' takes {} arguments but {} were supplied",
                selector,
                keywords.len(),
                arguments.len()
            )));
        }
        let parts = keywords
            .iter()
            .zip(self.arguments(arguments)?)
            .map(|(keyword, arg)| format!("{}:{}", keyword, arg))
            .collect::<Vec<_>>();
        Ok(parts.join(" "))
    }

    fn method_invocation(
        &self,
        receiver: Option<&Expression>,
        binding: &MethodBinding,
        arguments: &[Expression],
    ) -> Result<String> {
        let receiver = if binding.is_static {
            self.names().full_name(&binding.declaring_type)
        } else {
            match receiver {
                Some(expr) => self.generate(expr)?,
                None => "self".to_string(),
            }
        };
        Ok(format!("[{} {}]", receiver, self.message(binding, arguments)?))
    }

    fn allocation(
        &self,
        object_type: &JavaType,
        constructor: &MethodBinding,
        arguments: &[Expression],
    ) -> Result<String> {
        let allocation = self.retained_allocation(object_type, constructor, arguments)?;
        Ok(self.retain_wrapped(allocation))
    }

    /// `[[T alloc] init...]` without the autorelease, for storage that owns it.
    pub fn retained_allocation(
        &self,
        object_type: &JavaType,
        constructor: &MethodBinding,
        arguments: &[Expression],
    ) -> Result<String> {
        let type_name = match object_type.declared_name() {
            Some(name) => self.names().full_name(name),
            None => {
                return Err(Error::CodeGeneration(format!(
                    "cannot allocate non-class type {:?}",
                    object_type
                )))
            }
        };
        let mut init = constructor.clone();
        init.constructor = true;
        Ok(format!(
            "[[{} alloc] {}]",
            type_name,
            self.message(&init, arguments)?
        ))
    }

    fn retain_wrapped(&self, allocation: String) -> String {
        if self.ctx.options.is_reference_counted() {
            format!("[{} autorelease]", allocation)
        } else {
            allocation
        }
    }

    fn array_literal(&self, array_type: &JavaType, elements: &[Expression]) -> Result<String> {
        let JavaType::Array { component } = array_type else {
            return Err(Error::CodeGeneration(format!(
                "array literal of non-array type {:?}",
                array_type
            )));
        };
        let array_class = NameTable::array_type_name(component);
        let class_literal = || ClassLiteralVisitor::new(self.names()).visit_type(component);

        if elements.is_empty() {
            return Ok(match component.as_primitive() {
                Some(_) => format!("[{} arrayWithLength:0]", array_class),
                None => format!(
                    "[{} arrayWithLength:0 type:{}]",
                    array_class,
                    class_literal()
                ),
            });
        }

        let values = self.arguments(elements)?.join(", ");
        let count = elements.len();
        Ok(match component.as_primitive() {
            Some(kind) => format!(
                "[{} arrayWith{}s:({}[]){{ {} }} count:{}]",
                array_class,
                capitalize(kind.java_name()),
                kind.objc_name(),
                values,
                count
            ),
            None => format!(
                "[{} arrayWithObjects:(id[]){{ {} }} count:{} type:{}]",
                array_class,
                values,
                count,
                class_literal()
            ),
        })
    }

    /// Allocation of the annotation's implementation class with member values
    /// in declaration order.
    fn annotation_literal(&self, annotation: &Annotation) -> Result<String> {
        let impl_name = format!("{}_Impl", self.names().full_name(&annotation.type_name));
        let mut message = String::from("init");
        for (idx, member) in annotation.members.iter().enumerate() {
            let value = self.generate(&member.value)?;
            if idx == 0 {
                message.push_str(&format!("With{}:{}", capitalize(&member.name), value));
            } else {
                message.push_str(&format!(" with{}:{}", capitalize(&member.name), value));
            }
        }
        Ok(self.retain_wrapped(format!("[[{} alloc] {}]", impl_name, message)))
    }
}

/// `JreStrcat` type code for one operand.
fn concat_code(expr: &Expression) -> char {
    match expr.type_hint() {
        Some(ty) if ty.is_string() => '$',
        Some(JavaType::Primitive { primitive }) => primitive.signature_char(),
        _ => '@',
    }
}

/// Java masks shift distances to the width of the shifted operand; constant
/// distances are folded so C never sees an out of range shift.
fn shift_amount(amount: &Expression, text: &str, long: bool) -> String {
    let mask: i64 = if long { 0x3f } else { 0x1f };
    match constant_distance(amount) {
        Some(distance) => (distance & mask).to_string(),
        None => format!("({} & 0x{:x})", text, mask),
    }
}

fn constant_distance(amount: &Expression) -> Option<i64> {
    match amount {
        Expression::NumberLiteral { value, .. } => match value {
            LiteralValue::Byte(v) => Some(i64::from(*v)),
            LiteralValue::Short(v) => Some(i64::from(*v)),
            LiteralValue::Int(v) => Some(i64::from(*v)),
            LiteralValue::Long(v) => Some(*v),
            LiteralValue::Char(v) => Some(i64::from(*v)),
            _ => None,
        },
        Expression::CharacterLiteral { value } => Some(i64::from(*value)),
        _ => None,
    }
}

fn wrap_dereference(text: String) -> String {
    if text.starts_with('*') {
        format!("({})", text)
    } else {
        text
    }
}

fn parenthesize(expr: &Expression, text: String) -> String {
    match expr {
        Expression::Infix { .. } | Expression::Conditional { .. } | Expression::Assignment { .. } => {
            format!("({})", text)
        }
        _ => text,
    }
}
