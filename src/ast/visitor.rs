use super::*;

/// Visitor over the AST node families. Implementors choose an output type
/// and drive the traversal themselves.
pub trait AstVisitor {
    type Output;

    fn visit_compilation_unit(&mut self, unit: &CompilationUnit) -> Self::Output;

    fn visit_class_decl(&mut self, class: &ClassDecl) -> Self::Output;
    fn visit_field_decl(&mut self, field: &FieldDecl) -> Self::Output;
    fn visit_method_decl(&mut self, method: &MethodDecl) -> Self::Output;
    fn visit_constructor_decl(&mut self, constructor: &ConstructorDecl) -> Self::Output;

    fn visit_block(&mut self, block: &Block) -> Self::Output;
    fn visit_stmt(&mut self, stmt: &Stmt) -> Self::Output;
    fn visit_expr(&mut self, expr: &Expr) -> Self::Output;

    fn visit_type_decl(&mut self, type_decl: &TypeDecl) -> Self::Output {
        match type_decl {
            TypeDecl::Class(c) => self.visit_class_decl(c),
        }
    }

    fn visit_member(&mut self, member: &Member) -> Self::Output {
        match member {
            Member::Field(f) => self.visit_field_decl(f),
            Member::Method(m) => self.visit_method_decl(m),
            Member::Constructor(c) => self.visit_constructor_decl(c),
        }
    }
}
