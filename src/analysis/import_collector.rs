//! Collects the forward declarations and includes a type's generated files need.
//!
//! A collector restricted to the public member filter produces the header's
//! needs; an unrestricted one produces the implementation's. Overlap between
//! the forward declarations and includes is resolved by the file assemblers.

use crate::analysis::member_filter::MemberFilter;
use crate::ast::{
    BodyDeclaration, Expression, JavaType, MethodDeclaration, Statement, StatementKind,
    TypeDeclaration, VariableKind,
};
use crate::generators::base::name_table::NameTable;
use crate::models::{CollectedImports, Import};

const PRIMITIVE_ARRAY_HEADER: &str = "IOSPrimitiveArray.h";
const OBJECT_ARRAY_HEADER: &str = "IOSObjectArray.h";

pub struct ImportCollector<'a> {
    names: &'a NameTable,
    header_suffix: &'a str,
    /// `None` collects for every member, private ones included.
    filter: Option<MemberFilter>,
}

impl<'a> ImportCollector<'a> {
    pub fn new(names: &'a NameTable, header_suffix: &'a str, filter: Option<MemberFilter>) -> Self {
        Self {
            names,
            header_suffix,
            filter,
        }
    }

    /// Collector for the public header.
    pub fn public(names: &'a NameTable, header_suffix: &'a str) -> Self {
        Self::new(names, header_suffix, Some(MemberFilter::public()))
    }

    /// Collector for the private declaration and implementation.
    pub fn private_inclusive(names: &'a NameTable, header_suffix: &'a str) -> Self {
        Self::new(names, header_suffix, None)
    }

    pub fn collect(&self, decl: &TypeDeclaration) -> CollectedImports {
        let mut collected = CollectedImports::default();

        if let Some(filter) = &self.filter {
            if !filter.claims_type(decl) {
                return collected;
            }
        }

        for supertype in decl.supertypes() {
            let is_interface = decl.interfaces.iter().any(|name| name == supertype);
            self.add_declared(&mut collected.includes, supertype, is_interface, &decl.name);
        }

        for member in &decl.body {
            let claimed = match &self.filter {
                Some(filter) => filter.claims(member),
                None => !member.is_synthetic(),
            };
            match member {
                BodyDeclaration::Field(field) if claimed => {
                    self.add_type(&mut collected.forward_declarations, &field.field_type, &decl.name);
                }
                BodyDeclaration::Method(method) if claimed => {
                    self.add_signature(&mut collected.forward_declarations, method, &decl.name);
                }
                _ => {}
            }
            if self.filter.is_none() {
                self.collect_member_bodies(&mut collected, member, &decl.name);
            }
        }

        if self.filter.is_none() {
            for constant in &decl.enum_constants {
                for argument in &constant.arguments {
                    self.collect_expression(&mut collected.includes, argument, &decl.name);
                }
            }
            for annotation in &decl.annotations {
                if annotation.runtime {
                    self.add_declared(&mut collected.includes, &annotation.type_name, true, &decl.name);
                }
            }
            // The implementation messages every type its declarations mention.
            let signature_types: Vec<Import> =
                collected.forward_declarations.iter().cloned().collect();
            collected.includes.extend(signature_types);
        }

        collected
    }

    fn collect_member_bodies(
        &self,
        collected: &mut CollectedImports,
        member: &BodyDeclaration,
        owner: &str,
    ) {
        match member {
            BodyDeclaration::Field(field) => {
                self.add_type(&mut collected.includes, &field.field_type, owner);
                for fragment in &field.fragments {
                    if let Some(init) = &fragment.initializer {
                        self.collect_expression(&mut collected.includes, init, owner);
                    }
                }
            }
            BodyDeclaration::Method(method) => {
                if let Some(body) = &method.body {
                    for stmt in &body.statements {
                        self.collect_statement(&mut collected.includes, stmt, owner);
                    }
                }
            }
            BodyDeclaration::Initializer(init) => {
                for stmt in &init.body.statements {
                    self.collect_statement(&mut collected.includes, stmt, owner);
                }
            }
            BodyDeclaration::Native(_) => {}
        }
    }

    fn add_signature(
        &self,
        set: &mut std::collections::BTreeSet<Import>,
        method: &MethodDeclaration,
        owner: &str,
    ) {
        self.add_type(set, &method.return_type, owner);
        for param in &method.parameters {
            self.add_type(set, &param.param_type, owner);
        }
    }

    fn add_type(&self, set: &mut std::collections::BTreeSet<Import>, ty: &JavaType, owner: &str) {
        match ty {
            JavaType::Declared {
                name, interface, ..
            } => self.add_declared(set, name, *interface, owner),
            JavaType::Array { component } => {
                let array_name = NameTable::array_type_name(component);
                let header = if component.is_primitive() {
                    PRIMITIVE_ARRAY_HEADER
                } else {
                    OBJECT_ARRAY_HEADER
                };
                set.insert(Import::new(array_name, array_name, false).with_file_name(header));
                if !component.is_primitive() {
                    self.add_type(set, component, owner);
                }
            }
            JavaType::Union { alternatives } => {
                for alternative in alternatives {
                    self.add_type(set, alternative, owner);
                }
            }
            JavaType::Primitive { .. }
            | JavaType::TypeVariable { .. }
            | JavaType::Null
            | JavaType::Void => {}
        }
    }

    fn add_declared(
        &self,
        set: &mut std::collections::BTreeSet<Import>,
        binary_name: &str,
        is_interface: bool,
        owner: &str,
    ) {
        if binary_name == owner {
            return;
        }
        let Some(header) = self.names.header_file_name(binary_name, self.header_suffix) else {
            return;
        };
        set.insert(
            Import::new(&self.names.full_name(binary_name), binary_name, is_interface)
                .with_file_name(&header),
        );
    }

    fn collect_statement(
        &self,
        set: &mut std::collections::BTreeSet<Import>,
        stmt: &Statement,
        owner: &str,
    ) {
        match &stmt.kind {
            StatementKind::Block(block) => {
                for s in &block.statements {
                    self.collect_statement(set, s, owner);
                }
            }
            StatementKind::Expression { expression } | StatementKind::Throw { expression } => {
                self.collect_expression(set, expression, owner);
            }
            StatementKind::VariableDeclaration { var_type, fragments } => {
                self.add_type(set, var_type, owner);
                for fragment in fragments {
                    if let Some(init) = &fragment.initializer {
                        self.collect_expression(set, init, owner);
                    }
                }
            }
            StatementKind::Return { expression } => {
                if let Some(expr) = expression {
                    self.collect_expression(set, expr, owner);
                }
            }
            StatementKind::If {
                condition,
                then_statement,
                else_statement,
            } => {
                self.collect_expression(set, condition, owner);
                self.collect_statement(set, then_statement, owner);
                if let Some(else_stmt) = else_statement {
                    self.collect_statement(set, else_stmt, owner);
                }
            }
            StatementKind::While { condition, body } | StatementKind::Do { body, condition } => {
                self.collect_expression(set, condition, owner);
                self.collect_statement(set, body, owner);
            }
            StatementKind::For {
                initializers,
                condition,
                updaters,
                body,
            } => {
                for expr in initializers.iter().chain(condition.iter()).chain(updaters.iter()) {
                    self.collect_expression(set, expr, owner);
                }
                self.collect_statement(set, body, owner);
            }
            StatementKind::EnhancedFor {
                parameter,
                expression,
                body,
            } => {
                self.add_type(set, &parameter.param_type, owner);
                self.collect_expression(set, expression, owner);
                self.collect_statement(set, body, owner);
            }
            StatementKind::Labeled { body, .. } => self.collect_statement(set, body, owner),
            StatementKind::Switch {
                expression,
                statements,
            } => {
                self.collect_expression(set, expression, owner);
                for s in statements {
                    self.collect_statement(set, s, owner);
                }
            }
            StatementKind::SwitchCase { expression } => {
                if let Some(expr) = expression {
                    self.collect_expression(set, expr, owner);
                }
            }
            StatementKind::Synchronized { expression, body } => {
                self.collect_expression(set, expression, owner);
                for s in &body.statements {
                    self.collect_statement(set, s, owner);
                }
            }
            StatementKind::Try {
                resources,
                body,
                catch_clauses,
                finally,
            } => {
                if !resources.is_empty() {
                    self.add_declared(set, "java.lang.Throwable", false, owner);
                }
                for resource in resources {
                    self.add_type(set, &resource.var_type, owner);
                    self.collect_expression(set, &resource.initializer, owner);
                }
                let blocks = std::iter::once(body)
                    .chain(catch_clauses.iter().map(|c| &c.body))
                    .chain(finally.iter());
                for block in blocks {
                    for s in &block.statements {
                        self.collect_statement(set, s, owner);
                    }
                }
                for clause in catch_clauses {
                    self.add_type(set, &clause.exception.param_type, owner);
                }
            }
            StatementKind::Assert {
                expression,
                message,
                ..
            } => {
                self.collect_expression(set, expression, owner);
                if let Some(msg) = message {
                    self.collect_expression(set, msg, owner);
                }
            }
            StatementKind::SuperConstructorInvocation { arguments, .. } => {
                for arg in arguments {
                    self.collect_expression(set, arg, owner);
                }
            }
            StatementKind::Break { .. }
            | StatementKind::Continue { .. }
            | StatementKind::Empty
            | StatementKind::Native { .. } => {}
        }
    }

    fn collect_expression(
        &self,
        set: &mut std::collections::BTreeSet<Import>,
        expr: &Expression,
        owner: &str,
    ) {
        match expr {
            Expression::TypeLiteral { literal_type } => self.add_type(set, literal_type, owner),
            Expression::SimpleName { binding, .. } => {
                if matches!(
                    binding.kind,
                    VariableKind::StaticField | VariableKind::EnumConstant
                ) {
                    if let Some(declaring) = &binding.declaring_type {
                        self.add_declared(set, declaring, false, owner);
                    }
                }
            }
            Expression::FieldAccess {
                expression,
                binding,
                ..
            } => {
                self.collect_expression(set, expression, owner);
                if let Some(declaring) = &binding.declaring_type {
                    self.add_declared(set, declaring, false, owner);
                }
            }
            Expression::Assignment { lhs, rhs, .. } => {
                self.collect_expression(set, lhs, owner);
                self.collect_expression(set, rhs, owner);
            }
            Expression::Infix { operands, .. } => {
                for operand in operands {
                    self.collect_expression(set, operand, owner);
                }
            }
            Expression::Prefix { operand, .. } | Expression::Postfix { operand, .. } => {
                self.collect_expression(set, operand, owner);
            }
            Expression::Parenthesized { expression } => {
                self.collect_expression(set, expression, owner)
            }
            Expression::Conditional {
                condition,
                then_expression,
                else_expression,
            } => {
                self.collect_expression(set, condition, owner);
                self.collect_expression(set, then_expression, owner);
                self.collect_expression(set, else_expression, owner);
            }
            Expression::Cast {
                cast_type,
                expression,
            } => {
                self.add_type(set, cast_type, owner);
                self.collect_expression(set, expression, owner);
            }
            Expression::Instanceof {
                expression,
                right_type,
            } => {
                self.add_type(set, right_type, owner);
                self.collect_expression(set, expression, owner);
            }
            Expression::MethodInvocation {
                expression,
                binding,
                arguments,
            } => {
                if let Some(receiver) = expression {
                    self.collect_expression(set, receiver, owner);
                }
                self.add_declared(set, &binding.declaring_type, binding.declaring_interface, owner);
                self.add_type(set, &binding.return_type, owner);
                for arg in arguments {
                    self.collect_expression(set, arg, owner);
                }
            }
            Expression::SuperMethodInvocation { arguments, .. }
            | Expression::FunctionInvocation { arguments, .. } => {
                for arg in arguments {
                    self.collect_expression(set, arg, owner);
                }
            }
            Expression::NewObject {
                object_type,
                arguments,
                ..
            } => {
                self.add_type(set, object_type, owner);
                for arg in arguments {
                    self.collect_expression(set, arg, owner);
                }
            }
            Expression::ArrayLiteral {
                array_type,
                elements,
            } => {
                self.add_type(set, array_type, owner);
                for element in elements {
                    self.collect_expression(set, element, owner);
                }
            }
            Expression::AnnotationLiteral { annotation } => {
                self.add_declared(set, &annotation.type_name, true, owner);
                for member in &annotation.members {
                    self.collect_expression(set, &member.value, owner);
                }
            }
            Expression::VariableDeclarationExpression { var_type, fragments } => {
                self.add_type(set, var_type, owner);
                for fragment in fragments {
                    if let Some(init) = &fragment.initializer {
                        self.collect_expression(set, init, owner);
                    }
                }
            }
            _ => {}
        }
    }
}
