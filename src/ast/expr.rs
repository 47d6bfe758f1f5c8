use super::decl::{Annotation, VariableFragment};
use super::literal_value::LiteralValue;
use super::types::{JavaType, MethodBinding, PrimitiveKind, VariableBinding};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InfixOperator {
    #[serde(rename = "*")]
    Times,
    #[serde(rename = "/")]
    Divide,
    #[serde(rename = "%")]
    Remainder,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "<<")]
    LeftShift,
    #[serde(rename = ">>")]
    RightShiftSigned,
    #[serde(rename = ">>>")]
    RightShiftUnsigned,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "<=")]
    LessEquals,
    #[serde(rename = ">=")]
    GreaterEquals,
    #[serde(rename = "==")]
    Equals,
    #[serde(rename = "!=")]
    NotEquals,
    #[serde(rename = "^")]
    Xor,
    #[serde(rename = "&")]
    And,
    #[serde(rename = "|")]
    Or,
    #[serde(rename = "&&")]
    ConditionalAnd,
    #[serde(rename = "||")]
    ConditionalOr,
}

impl InfixOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfixOperator::Times => "*",
            InfixOperator::Divide => "/",
            InfixOperator::Remainder => "%",
            InfixOperator::Plus => "+",
            InfixOperator::Minus => "-",
            InfixOperator::LeftShift => "<<",
            InfixOperator::RightShiftSigned => ">>",
            InfixOperator::RightShiftUnsigned => ">>>",
            InfixOperator::Less => "<",
            InfixOperator::Greater => ">",
            InfixOperator::LessEquals => "<=",
            InfixOperator::GreaterEquals => ">=",
            InfixOperator::Equals => "==",
            InfixOperator::NotEquals => "!=",
            InfixOperator::Xor => "^",
            InfixOperator::And => "&",
            InfixOperator::Or => "|",
            InfixOperator::ConditionalAnd => "&&",
            InfixOperator::ConditionalOr => "||",
        }
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            InfixOperator::Less
                | InfixOperator::Greater
                | InfixOperator::LessEquals
                | InfixOperator::GreaterEquals
                | InfixOperator::Equals
                | InfixOperator::NotEquals
                | InfixOperator::ConditionalAnd
                | InfixOperator::ConditionalOr
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentOperator {
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = "+=")]
    PlusAssign,
    #[serde(rename = "-=")]
    MinusAssign,
    #[serde(rename = "*=")]
    TimesAssign,
    #[serde(rename = "/=")]
    DivideAssign,
    #[serde(rename = "%=")]
    RemainderAssign,
    #[serde(rename = "&=")]
    AndAssign,
    #[serde(rename = "|=")]
    OrAssign,
    #[serde(rename = "^=")]
    XorAssign,
    #[serde(rename = "<<=")]
    LeftShiftAssign,
    #[serde(rename = ">>=")]
    RightShiftSignedAssign,
    #[serde(rename = ">>>=")]
    RightShiftUnsignedAssign,
}

impl AssignmentOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentOperator::Assign => "=",
            AssignmentOperator::PlusAssign => "+=",
            AssignmentOperator::MinusAssign => "-=",
            AssignmentOperator::TimesAssign => "*=",
            AssignmentOperator::DivideAssign => "/=",
            AssignmentOperator::RemainderAssign => "%=",
            AssignmentOperator::AndAssign => "&=",
            AssignmentOperator::OrAssign => "|=",
            AssignmentOperator::XorAssign => "^=",
            AssignmentOperator::LeftShiftAssign => "<<=",
            AssignmentOperator::RightShiftSignedAssign => ">>=",
            AssignmentOperator::RightShiftUnsignedAssign => ">>>=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrefixOperator {
    #[serde(rename = "++")]
    Increment,
    #[serde(rename = "--")]
    Decrement,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "~")]
    Complement,
    #[serde(rename = "!")]
    Not,
}

impl PrefixOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrefixOperator::Increment => "++",
            PrefixOperator::Decrement => "--",
            PrefixOperator::Plus => "+",
            PrefixOperator::Minus => "-",
            PrefixOperator::Complement => "~",
            PrefixOperator::Not => "!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostfixOperator {
    #[serde(rename = "++")]
    Increment,
    #[serde(rename = "--")]
    Decrement,
}

impl PostfixOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostfixOperator::Increment => "++",
            PostfixOperator::Decrement => "--",
        }
    }
}

/// Expression node kinds. The last group of variants must have been lowered
/// by earlier passes and are rejected by the statement generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expression {
    BooleanLiteral {
        value: bool,
    },
    CharacterLiteral {
        value: u16,
    },
    NumberLiteral {
        value: LiteralValue,
        /// Original lexical token, when the front end kept it.
        #[serde(default)]
        token: Option<String>,
    },
    StringLiteral {
        value: String,
    },
    NullLiteral,
    TypeLiteral {
        literal_type: JavaType,
    },
    SimpleName {
        name: String,
        binding: VariableBinding,
    },
    FieldAccess {
        expression: Box<Expression>,
        name: String,
        binding: VariableBinding,
    },
    This,
    Assignment {
        lhs: Box<Expression>,
        operator: AssignmentOperator,
        rhs: Box<Expression>,
    },
    Infix {
        operator: InfixOperator,
        operands: Vec<Expression>,
        result_type: JavaType,
    },
    Prefix {
        operator: PrefixOperator,
        operand: Box<Expression>,
    },
    Postfix {
        operand: Box<Expression>,
        operator: PostfixOperator,
    },
    Parenthesized {
        expression: Box<Expression>,
    },
    Conditional {
        condition: Box<Expression>,
        then_expression: Box<Expression>,
        else_expression: Box<Expression>,
    },
    Cast {
        cast_type: JavaType,
        expression: Box<Expression>,
    },
    Instanceof {
        expression: Box<Expression>,
        right_type: JavaType,
    },
    MethodInvocation {
        #[serde(default)]
        expression: Option<Box<Expression>>,
        binding: MethodBinding,
        #[serde(default)]
        arguments: Vec<Expression>,
    },
    SuperMethodInvocation {
        binding: MethodBinding,
        #[serde(default)]
        arguments: Vec<Expression>,
    },
    FunctionInvocation {
        name: String,
        #[serde(default)]
        arguments: Vec<Expression>,
        #[serde(default)]
        return_type: JavaType,
    },
    NewObject {
        object_type: JavaType,
        constructor: MethodBinding,
        #[serde(default)]
        arguments: Vec<Expression>,
    },
    ArrayLiteral {
        array_type: JavaType,
        #[serde(default)]
        elements: Vec<Expression>,
    },
    AnnotationLiteral {
        annotation: Annotation,
    },
    VariableDeclarationExpression {
        var_type: JavaType,
        fragments: Vec<VariableFragment>,
    },
    Native {
        code: String,
    },
    ArrayAccess,
    ArrayCreation,
    ClassInstanceCreation,
    Lambda,
    MethodReference,
}

impl Expression {
    pub fn int(value: i32) -> Self {
        Expression::NumberLiteral {
            value: LiteralValue::Int(value),
            token: None,
        }
    }

    pub fn string(value: &str) -> Self {
        Expression::StringLiteral {
            value: value.to_string(),
        }
    }

    pub fn name(name: &str, binding: VariableBinding) -> Self {
        Expression::SimpleName {
            name: name.to_string(),
            binding,
        }
    }

    /// Static type of the expression, derived from its bindings.
    pub fn type_hint(&self) -> Option<JavaType> {
        match self {
            Expression::BooleanLiteral { .. } => Some(JavaType::boolean()),
            Expression::CharacterLiteral { .. } => Some(JavaType::primitive(PrimitiveKind::Char)),
            Expression::NumberLiteral { value, .. } => Some(match value {
                LiteralValue::Boolean(_) => JavaType::boolean(),
                LiteralValue::Char(_) => JavaType::primitive(PrimitiveKind::Char),
                LiteralValue::Byte(_) => JavaType::primitive(PrimitiveKind::Byte),
                LiteralValue::Short(_) => JavaType::primitive(PrimitiveKind::Short),
                LiteralValue::Int(_) => JavaType::int(),
                LiteralValue::Long(_) => JavaType::long(),
                LiteralValue::Float(_) => JavaType::primitive(PrimitiveKind::Float),
                LiteralValue::Double(_) => JavaType::double(),
                LiteralValue::String(_) => JavaType::string(),
            }),
            Expression::StringLiteral { .. } => Some(JavaType::string()),
            Expression::NullLiteral => Some(JavaType::Null),
            Expression::TypeLiteral { .. } => Some(JavaType::class("java.lang.Class")),
            Expression::SimpleName { binding, .. } | Expression::FieldAccess { binding, .. } => {
                Some(binding.var_type.clone())
            }
            Expression::Assignment { lhs, .. } => lhs.type_hint(),
            Expression::Infix {
                result_type,
                operator,
                ..
            } => {
                if operator.is_comparison() {
                    Some(JavaType::boolean())
                } else {
                    Some(result_type.clone())
                }
            }
            Expression::Prefix { operator, operand } => match operator {
                PrefixOperator::Not => Some(JavaType::boolean()),
                _ => operand.type_hint(),
            },
            Expression::Postfix { operand, .. } => operand.type_hint(),
            Expression::Parenthesized { expression } => expression.type_hint(),
            Expression::Conditional {
                then_expression,
                else_expression,
                ..
            } => then_expression
                .type_hint()
                .filter(|t| !matches!(t, JavaType::Null))
                .or_else(|| else_expression.type_hint()),
            Expression::Cast { cast_type, .. } => Some(cast_type.clone()),
            Expression::Instanceof { .. } => Some(JavaType::boolean()),
            Expression::MethodInvocation { binding, .. }
            | Expression::SuperMethodInvocation { binding, .. } => {
                Some(binding.return_type.clone())
            }
            Expression::FunctionInvocation { return_type, .. } => Some(return_type.clone()),
            Expression::NewObject { object_type, .. } => Some(object_type.clone()),
            Expression::ArrayLiteral { array_type, .. } => Some(array_type.clone()),
            Expression::AnnotationLiteral { annotation } => {
                Some(JavaType::interface(&annotation.type_name))
            }
            _ => None,
        }
    }

    pub fn is_string_literal(&self) -> bool {
        matches!(self, Expression::StringLiteral { .. })
    }

    /// True for message sends and function calls, whose discarded results may warn.
    pub fn is_invocation(&self) -> bool {
        matches!(
            self,
            Expression::MethodInvocation { .. }
                | Expression::SuperMethodInvocation { .. }
                | Expression::FunctionInvocation { .. }
        )
    }
}
