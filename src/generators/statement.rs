//! Statement lowering.
//!
//! Output is unindented; callers splice it into their builder through
//! [`SourceBuilder::reindent`], which recomputes depth from braces.

use crate::ast::{
    Block, CatchClause, Expression, JavaType, Resource, Statement, StatementKind, VariableKind,
};
use crate::error::{Error, Result};
use crate::generators::base::literal;
use crate::generators::base::name_table::NameTable;
use crate::generators::base::source_builder::SourceBuilder;
use crate::generators::base::type_generator::{type_with_name, GeneratorContext};
use crate::generators::expression::ExpressionGenerator;
use std::collections::HashMap;

const MAIN_EXCEPTION: &str = "__mainException";

pub struct StatementGenerator<'a> {
    ctx: GeneratorContext<'a>,
    expressions: ExpressionGenerator<'a>,
    builder: SourceBuilder,
    /// Label each `continue` target jumps to, for labels in scope.
    continue_labels: HashMap<String, String>,
    /// Continue label the next loop body must define at its end.
    pending_continue: Option<String>,
}

impl<'a> StatementGenerator<'a> {
    pub fn new(ctx: GeneratorContext<'a>, current_type: &'a str, start_line: usize) -> Self {
        Self {
            ctx,
            expressions: ExpressionGenerator::new(ctx, current_type),
            builder: SourceBuilder::new(ctx.options.emit_line_directives)
                .with_context(current_type)
                .with_start_line(start_line),
            continue_labels: HashMap::new(),
            pending_continue: None,
        }
    }

    /// `{ ... }` for a method body, with `trailer` lines before the closing brace.
    pub fn generate_body(mut self, block: &Block, trailer: &[&str]) -> Result<String> {
        self.builder.append_line("{");
        self.statements(&block.statements)?;
        for line in trailer {
            self.builder.append_line(line);
        }
        self.builder.append("}");
        Ok(self.builder.into_string())
    }

    /// Statements one after another, without an enclosing block.
    pub fn generate_all(mut self, statements: &[Statement]) -> Result<String> {
        self.statements(statements)?;
        Ok(self.builder.into_string())
    }

    pub fn generate(mut self, stmt: &Statement) -> Result<String> {
        self.statement(stmt)?;
        Ok(self.builder.into_string())
    }

    fn expr(&self, expr: &Expression) -> Result<String> {
        self.expressions.generate(expr)
    }

    fn line(&mut self, text: &str) {
        self.builder.append_line(text);
    }

    fn statements(&mut self, statements: &[Statement]) -> Result<()> {
        for stmt in statements {
            self.statement(stmt)?;
        }
        Ok(())
    }

    fn statement(&mut self, stmt: &Statement) -> Result<()> {
        self.builder.sync_line_number(stmt.line);
        match &stmt.kind {
            StatementKind::Block(block) => {
                self.line("{");
                self.statements(&block.statements)?;
                self.line("}");
            }
            StatementKind::Expression { expression } => {
                let text = self.expr(expression)?;
                let marker = if self.discards_result(expression) { "(void) " } else { "" };
                self.line(&format!("{}{};", marker, text));
            }
            StatementKind::VariableDeclaration {
                var_type,
                fragments,
            } => {
                let text = self.expressions.variable_declaration(var_type, fragments)?;
                self.line(&format!("{};", text));
            }
            StatementKind::Return { expression } => match expression {
                Some(expr) => {
                    let text = self.expr(expr)?;
                    self.line(&format!("return {};", text));
                }
                None => self.line("return;"),
            },
            StatementKind::If { .. } => {
                self.if_statement(stmt)?;
                self.builder.newline();
            }
            StatementKind::While { condition, body } => {
                let text = self.expr(condition)?;
                self.builder.append(&format!("while ({}) ", text));
                self.loop_body(body)?;
            }
            StatementKind::Do { body, condition } => {
                self.builder.append("do ");
                let continue_label = self.pending_continue.take();
                self.body_block(body, continue_label.as_deref())?;
                let text = self.expr(condition)?;
                self.line(&format!(" while ({});", text));
            }
            StatementKind::For {
                initializers,
                condition,
                updaters,
                body,
            } => {
                let init = self.expressions.arguments(initializers)?.join(", ");
                let cond = match condition {
                    Some(expr) => self.expr(expr)?,
                    None => String::new(),
                };
                let update = self.expressions.arguments(updaters)?.join(", ");
                let clause = |text: String| {
                    if text.is_empty() {
                        text
                    } else {
                        format!(" {}", text)
                    }
                };
                self.builder.append(&format!(
                    "for ({};{};{}) ",
                    init,
                    clause(cond),
                    clause(update)
                ));
                self.loop_body(body)?;
            }
            StatementKind::EnhancedFor {
                parameter,
                expression,
                body,
            } => {
                if parameter.param_type.is_primitive() {
                    return Err(Error::not_rewritten("EnhancedForStatement over primitives"));
                }
                let declaration = type_with_name(
                    &self.ctx.names.objc_type(&parameter.param_type),
                    &NameTable::variable_base_name(&parameter.name),
                );
                let collection = self.expr(expression)?;
                self.builder
                    .append(&format!("for ({} in {}) ", declaration, collection));
                self.loop_body(body)?;
            }
            StatementKind::Break { label } => match label {
                Some(label) => self.line(&format!("goto {};", label)),
                None => self.line("break;"),
            },
            StatementKind::Continue { label } => match label {
                Some(label) => {
                    let target = self
                        .continue_labels
                        .get(label)
                        .cloned()
                        .unwrap_or_else(|| label.clone());
                    self.line(&format!("goto {};", target));
                }
                None => self.line("continue;"),
            },
            StatementKind::Labeled { label, body } => self.labeled(label, body)?,
            StatementKind::Switch {
                expression,
                statements,
            } => self.switch(expression, statements)?,
            StatementKind::SwitchCase { .. } => {
                return Err(Error::CodeGeneration(
                    "case label outside of a switch statement".to_string(),
                ));
            }
            StatementKind::Synchronized { expression, body } => {
                let text = self.expr(expression)?;
                self.line(&format!("@synchronized ({}) {{", text));
                self.statements(&body.statements)?;
                self.line("}");
            }
            StatementKind::Throw { expression } => {
                let text = self.expr(expression)?;
                self.line(&format!("@throw {};", text));
            }
            StatementKind::Try {
                resources,
                body,
                catch_clauses,
                finally,
            } => self.try_statement(resources, body, catch_clauses, finally.as_ref())?,
            StatementKind::Assert {
                expression,
                message,
                source_text,
            } => self.assert(stmt.line, expression, message.as_ref(), source_text)?,
            StatementKind::Empty => self.line(";"),
            StatementKind::Native { code } => {
                for line in code.lines() {
                    self.line(line);
                }
            }
            StatementKind::SuperConstructorInvocation { .. } => {
                return Err(Error::not_rewritten("SuperConstructorInvocation"));
            }
        }
        Ok(())
    }

    /// Calls whose object result is dropped get a `(void)` cast under ARC.
    fn discards_result(&self, expression: &Expression) -> bool {
        self.ctx.options.is_arc()
            && expression.is_invocation()
            && expression
                .type_hint()
                .is_some_and(|ty| !ty.is_primitive() && !ty.is_void())
    }

    /// `if (c) {...}` plus chained `else if` / `else`, without the final newline.
    fn if_statement(&mut self, stmt: &Statement) -> Result<()> {
        let StatementKind::If {
            condition,
            then_statement,
            else_statement,
        } = &stmt.kind
        else {
            return self.body_block(stmt, None);
        };
        let text = self.expr(condition)?;
        self.builder.append(&format!("if ({}) ", text));
        self.body_block(then_statement, None)?;
        if let Some(else_statement) = else_statement {
            self.builder.append(" else ");
            if matches!(else_statement.kind, StatementKind::If { .. }) {
                self.if_statement(else_statement)?;
            } else {
                self.body_block(else_statement, None)?;
            }
        }
        Ok(())
    }

    /// Any statement as a braced block, ending at the closing brace. A
    /// `continue` label is defined after the original body in its own scope,
    /// so the jump never bypasses a declaration.
    fn body_block(&mut self, stmt: &Statement, continue_label: Option<&str>) -> Result<()> {
        self.builder.append_line("{");
        let inner: &[Statement] = match &stmt.kind {
            StatementKind::Block(block) => &block.statements,
            _ => std::slice::from_ref(stmt),
        };
        match continue_label {
            Some(label) => {
                self.line("{");
                self.statements(inner)?;
                self.line("}");
                self.line(&format!("{}: ;", label));
            }
            None => self.statements(inner)?,
        }
        self.builder.append("}");
        Ok(())
    }

    fn loop_body(&mut self, body: &Statement) -> Result<()> {
        let continue_label = self.pending_continue.take();
        self.body_block(body, continue_label.as_deref())?;
        self.builder.newline();
        Ok(())
    }

    /// Labeled jumps become `goto`. Breaks target `label` after the statement;
    /// continues target a label at the end of the loop body, named
    /// `label_continue` when the same label is also broken out of.
    fn labeled(&mut self, label: &str, body: &Statement) -> Result<()> {
        let (breaks, continues) = label_usage(body, label);
        let continue_label = match (breaks, continues) {
            (true, true) => Some(format!("{}_continue", label)),
            (false, true) => Some(label.to_string()),
            _ => None,
        };

        let previous = match &continue_label {
            Some(target) => self.continue_labels.insert(label.to_string(), target.clone()),
            None => self.continue_labels.remove(label),
        };
        if is_loop(body) {
            self.pending_continue = continue_label;
        }
        let result = self.statement(body);
        self.pending_continue = None;
        match previous {
            Some(target) => {
                self.continue_labels.insert(label.to_string(), target);
            }
            None => {
                self.continue_labels.remove(label);
            }
        }
        result?;

        if breaks {
            self.line(&format!("{}: ;", label));
        }
        Ok(())
    }

    fn switch(&mut self, expression: &Expression, statements: &[Statement]) -> Result<()> {
        let selector_type = expression.type_hint().unwrap_or_default();
        let value = self.expr(expression)?;
        let string_switch = selector_type.is_string();

        if string_switch {
            let mut cases = Vec::new();
            for stmt in statements {
                if let StatementKind::SwitchCase {
                    expression: Some(case),
                } = &stmt.kind
                {
                    cases.push(self.expr(case)?);
                }
            }
            self.line("{");
            self.line(&format!(
                "NSArray *__caseValues = [NSArray arrayWithObjects:{}nil];",
                cases.iter().map(|c| format!("{}, ", c)).collect::<String>()
            ));
            self.line(&format!(
                "NSUInteger __index = [__caseValues indexOfObject:{}];",
                value
            ));
            self.line("switch (__index) {");
        } else if selector_type.is_enum() {
            self.line(&format!("switch ([{} ordinal]) {{", value));
        } else {
            self.line(&format!("switch ({}) {{", value));
        }

        let mut string_index = 0;
        for stmt in statements {
            match &stmt.kind {
                StatementKind::SwitchCase { expression: None } => {
                    self.builder.sync_line_number(stmt.line);
                    self.line("default:");
                }
                StatementKind::SwitchCase {
                    expression: Some(case),
                } => {
                    self.builder.sync_line_number(stmt.line);
                    let label = if string_switch {
                        string_index += 1;
                        (string_index - 1).to_string()
                    } else {
                        self.case_label(case)?
                    };
                    self.line(&format!("case {}:", label));
                }
                _ => self.statement(stmt)?,
            }
        }
        if matches!(
            statements.last().map(|s| &s.kind),
            Some(StatementKind::SwitchCase { .. })
        ) {
            self.line(";");
        }

        self.line("}");
        if string_switch {
            self.line("}");
        }
        Ok(())
    }

    fn case_label(&self, case: &Expression) -> Result<String> {
        if let Expression::SimpleName { name, binding } = case {
            if binding.kind == VariableKind::EnumConstant {
                let declaring = binding
                    .declaring_type
                    .as_deref()
                    .or_else(|| binding.var_type.declared_name())
                    .ok_or_else(|| Error::MissingName(format!("enum constant {}", name)))?;
                return Ok(format!(
                    "{}_{}",
                    NameTable::native_enum_name(&self.ctx.names.full_name(declaring)),
                    name
                ));
            }
        }
        self.expr(case)
    }

    fn try_statement(
        &mut self,
        resources: &[Resource],
        body: &Block,
        catch_clauses: &[CatchClause],
        finally: Option<&Block>,
    ) -> Result<()> {
        if resources.is_empty() {
            self.line("@try {");
            self.statements(&body.statements)?;
            self.line("}");
        } else if catch_clauses.is_empty() && finally.is_none() {
            self.resource_block(resources, body)?;
            return Ok(());
        } else {
            self.line("@try {");
            self.resource_block(resources, body)?;
            self.line("}");
        }

        for clause in catch_clauses {
            self.catch_clause(clause)?;
        }
        if let Some(finally) = finally {
            self.line("@finally {");
            self.statements(&finally.statements)?;
            self.line("}");
        }
        Ok(())
    }

    /// One `@catch` per alternative of a multi-catch, each repeating the body.
    fn catch_clause(&mut self, clause: &CatchClause) -> Result<()> {
        let name = NameTable::variable_base_name(&clause.exception.name);
        let alternatives: Vec<&JavaType> = match &clause.exception.param_type {
            JavaType::Union { alternatives } => alternatives.iter().collect(),
            single => vec![single],
        };
        for alternative in alternatives {
            self.builder.sync_line_number(clause.line);
            let declaration = type_with_name(&self.ctx.names.objc_type(alternative), &name);
            self.line(&format!("@catch ({}) {{", declaration));
            self.statements(&clause.body.statements)?;
            self.line("}");
        }
        Ok(())
    }

    /// Try-with-resources: resources close in reverse order, close failures
    /// are added as suppressed to the primary exception.
    fn resource_block(&mut self, resources: &[Resource], body: &Block) -> Result<()> {
        self.line("{");
        for resource in resources {
            let declaration = type_with_name(
                &self.ctx.names.objc_type(&resource.var_type),
                &NameTable::variable_base_name(&resource.name),
            );
            let init = self.expr(&resource.initializer)?;
            self.line(&format!("{} = {};", declaration, init));
        }
        self.line(&format!("JavaLangThrowable *{} = nil;", MAIN_EXCEPTION));
        self.line("@try {");
        self.statements(&body.statements)?;
        self.line("}");
        self.line("@catch (JavaLangThrowable *e) {");
        self.line(&format!("{} = e;", MAIN_EXCEPTION));
        self.line("@throw e;");
        self.line("}");
        self.line("@finally {");
        for resource in resources.iter().rev() {
            self.line("@try {");
            self.line(&format!(
                "[{} close];",
                NameTable::variable_base_name(&resource.name)
            ));
            self.line("}");
            self.line("@catch (JavaLangThrowable *e) {");
            self.line(&format!("if ({}) {{", MAIN_EXCEPTION));
            self.line(&format!(
                "[{} addSuppressedWithJavaLangThrowable:e];",
                MAIN_EXCEPTION
            ));
            self.line("} else {");
            self.line(&format!("{} = e;", MAIN_EXCEPTION));
            self.line("}");
            self.line("}");
        }
        self.line(&format!("if ({}) {{", MAIN_EXCEPTION));
        self.line(&format!("@throw {};", MAIN_EXCEPTION));
        self.line("}");
        self.line("}");
        self.line("}");
        Ok(())
    }

    /// `JreAssert(cond, msg)`; commas in a user message would split the macro
    /// arguments and are replaced with `J2OBJC_COMMA()`.
    fn assert(
        &mut self,
        line: Option<usize>,
        expression: &Expression,
        message: Option<&Expression>,
        source_text: &str,
    ) -> Result<()> {
        let condition = self.expr(expression)?;
        let message = match message {
            Some(msg) => self
                .expressions
                .describe(msg)?
                .replace(',', " J2OBJC_COMMA()"),
            None => literal::generate_string_literal(&format!(
                "{}:{} condition failed: {}",
                self.ctx.source_file_name(),
                line.unwrap_or_default(),
                source_text.trim()
            )),
        };
        self.line(&format!("JreAssert({}, {});", condition, message));
        Ok(())
    }
}

/// Whether `label` is the target of a `break` and of a `continue` inside `stmt`.
fn label_usage(stmt: &Statement, label: &str) -> (bool, bool) {
    let mut breaks = false;
    let mut continues = false;
    for_each_statement(stmt, &mut |s| match &s.kind {
        StatementKind::Break { label: Some(l) } if l == label => breaks = true,
        StatementKind::Continue { label: Some(l) } if l == label => continues = true,
        _ => {}
    });
    (breaks, continues)
}

fn is_loop(stmt: &Statement) -> bool {
    matches!(
        stmt.kind,
        StatementKind::While { .. }
            | StatementKind::Do { .. }
            | StatementKind::For { .. }
            | StatementKind::EnhancedFor { .. }
    )
}

fn each(statements: &[Statement], f: &mut dyn FnMut(&Statement)) {
    for s in statements {
        for_each_statement(s, f);
    }
}

fn for_each_statement(stmt: &Statement, f: &mut dyn FnMut(&Statement)) {
    f(stmt);
    match &stmt.kind {
        StatementKind::Block(block) => each(&block.statements, f),
        StatementKind::If {
            then_statement,
            else_statement,
            ..
        } => {
            for_each_statement(then_statement, f);
            if let Some(else_statement) = else_statement {
                for_each_statement(else_statement, f);
            }
        }
        StatementKind::While { body, .. }
        | StatementKind::Do { body, .. }
        | StatementKind::For { body, .. }
        | StatementKind::EnhancedFor { body, .. }
        | StatementKind::Labeled { body, .. } => for_each_statement(body, f),
        StatementKind::Switch { statements, .. } => each(statements, f),
        StatementKind::Synchronized { body, .. } => each(&body.statements, f),
        StatementKind::Try {
            body,
            catch_clauses,
            finally,
            ..
        } => {
            each(&body.statements, f);
            for clause in catch_clauses {
                each(&clause.body.statements, f);
            }
            if let Some(finally) = finally {
                each(&finally.statements, f);
            }
        }
        _ => {}
    }
}
