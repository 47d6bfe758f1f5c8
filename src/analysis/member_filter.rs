use crate::ast::{BodyDeclaration, FieldDeclaration, MethodDeclaration, TypeDeclaration};

/// Which declaration role a filter selects members for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationScope {
    Public,
    Private,
}

/// Partitions the members of a type between the public header and the
/// private class extension.
///
/// Every non-synthetic member is claimed by exactly one scope; synthetic
/// members are claimed by neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberFilter {
    scope: DeclarationScope,
}

impl MemberFilter {
    pub fn new(scope: DeclarationScope) -> Self {
        Self { scope }
    }

    pub fn public() -> Self {
        Self::new(DeclarationScope::Public)
    }

    pub fn private() -> Self {
        Self::new(DeclarationScope::Private)
    }

    pub fn scope(&self) -> DeclarationScope {
        self.scope
    }

    fn matches_privacy(&self, has_private_declaration: bool) -> bool {
        match self.scope {
            DeclarationScope::Public => !has_private_declaration,
            DeclarationScope::Private => has_private_declaration,
        }
    }

    pub fn claims(&self, decl: &BodyDeclaration) -> bool {
        !decl.is_synthetic() && self.matches_privacy(decl.has_private_declaration())
    }

    pub fn claims_field(&self, field: &FieldDeclaration) -> bool {
        !field.modifiers.is_synthetic() && self.matches_privacy(field.has_private_declaration)
    }

    pub fn claims_method(&self, method: &MethodDeclaration) -> bool {
        !method.modifiers.is_synthetic() && self.matches_privacy(method.has_private_declaration)
    }

    /// Whether the type's own declaration belongs to this scope.
    pub fn claims_type(&self, decl: &TypeDeclaration) -> bool {
        self.matches_privacy(decl.has_private_declaration)
    }

    /// Claimed fields; the filter is copied so the items borrow only `decl`.
    pub fn fields(
        self,
        decl: &TypeDeclaration,
    ) -> impl Iterator<Item = &FieldDeclaration> + '_ {
        decl.fields().filter(move |field| self.claims_field(field))
    }

    pub fn methods(
        self,
        decl: &TypeDeclaration,
    ) -> impl Iterator<Item = &MethodDeclaration> + '_ {
        decl.methods().filter(move |method| self.claims_method(method))
    }
}
