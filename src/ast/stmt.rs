use super::decl::{Parameter, VariableFragment};
use super::expr::Expression;
use super::types::{JavaType, MethodBinding};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub statements: Vec<Statement>,
}

impl Block {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

/// A statement together with its source line, used for `#line` directives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    #[serde(default)]
    pub line: Option<usize>,
    #[serde(flatten)]
    pub kind: StatementKind,
}

impl Statement {
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl From<StatementKind> for Statement {
    fn from(kind: StatementKind) -> Self {
        Statement { line: None, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchClause {
    pub exception: Parameter,
    #[serde(default)]
    pub body: Block,
    #[serde(default)]
    pub line: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub var_type: JavaType,
    pub name: String,
    pub initializer: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatementKind {
    Block(Block),
    Expression {
        expression: Expression,
    },
    VariableDeclaration {
        var_type: JavaType,
        fragments: Vec<VariableFragment>,
    },
    Return {
        #[serde(default)]
        expression: Option<Expression>,
    },
    If {
        condition: Expression,
        then_statement: Box<Statement>,
        #[serde(default)]
        else_statement: Option<Box<Statement>>,
    },
    While {
        condition: Expression,
        body: Box<Statement>,
    },
    Do {
        body: Box<Statement>,
        condition: Expression,
    },
    For {
        #[serde(default)]
        initializers: Vec<Expression>,
        #[serde(default)]
        condition: Option<Expression>,
        #[serde(default)]
        updaters: Vec<Expression>,
        body: Box<Statement>,
    },
    EnhancedFor {
        parameter: Parameter,
        expression: Expression,
        body: Box<Statement>,
    },
    Break {
        #[serde(default)]
        label: Option<String>,
    },
    Continue {
        #[serde(default)]
        label: Option<String>,
    },
    Labeled {
        label: String,
        body: Box<Statement>,
    },
    Switch {
        expression: Expression,
        #[serde(default)]
        statements: Vec<Statement>,
    },
    /// A `case` label inside a switch body; `None` marks `default`.
    SwitchCase {
        #[serde(default)]
        expression: Option<Expression>,
    },
    Synchronized {
        expression: Expression,
        body: Block,
    },
    Throw {
        expression: Expression,
    },
    Try {
        #[serde(default)]
        resources: Vec<Resource>,
        body: Block,
        #[serde(default)]
        catch_clauses: Vec<CatchClause>,
        #[serde(default)]
        finally: Option<Block>,
    },
    Assert {
        expression: Expression,
        #[serde(default)]
        message: Option<Expression>,
        /// Original text of the assert statement.
        #[serde(default)]
        source_text: String,
    },
    Empty,
    Native {
        code: String,
    },
    SuperConstructorInvocation {
        #[serde(default)]
        binding: Option<MethodBinding>,
        #[serde(default)]
        arguments: Vec<Expression>,
    },
}
