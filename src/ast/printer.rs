use super::visitor::AstVisitor;
use super::*;

/// Renders an AST back to Jay source.
///
/// The output is meant to be re-parseable: operands of unary, binary,
/// assignment, cast and instanceof expressions are parenthesized unless they
/// are primaries, so re-parsing the rendered text reproduces the tree shape.
pub struct AstPrinter {
    indent_level: usize,
    output: String,
}

impl Default for AstPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl AstPrinter {
    pub fn new() -> Self {
        Self {
            indent_level: 0,
            output: String::new(),
        }
    }

    pub fn print(&mut self, unit: &CompilationUnit) -> String {
        self.output.clear();
        self.visit_compilation_unit(unit);
        self.output.clone()
    }

    fn indent(&mut self) {
        self.indent_level += 2;
    }

    fn dedent(&mut self) {
        if self.indent_level >= 2 {
            self.indent_level -= 2;
        }
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push(' ');
        }
    }

    fn push(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn writeln(&mut self, s: &str) {
        self.write_indent();
        self.output.push_str(s);
        self.output.push('\n');
    }

    fn modifiers_prefix(modifiers: &[String]) -> String {
        let mut out = String::new();
        for m in modifiers {
            out.push_str(m);
            out.push(' ');
        }
        out
    }

    fn params_string(params: &[FormalParameter]) -> String {
        let parts: Vec<String> = params
            .iter()
            .map(|p| format!("{} {}", p.param_type, p.name))
            .collect();
        parts.join(", ")
    }

    fn declarators_string(declarators: &[VariableDeclarator]) -> String {
        let parts: Vec<String> = declarators
            .iter()
            .map(|d| match &d.initializer {
                Some(init) => format!("{} = {}", d.name, expr_string(init)),
                None => d.name.clone(),
            })
            .collect();
        parts.join(", ")
    }

    /// Write a statement used as an if/while branch. A block stays on the
    /// header line; any other statement goes on its own indented line. The
    /// output ends without a newline for blocks (so `else` can continue the
    /// line) and with one otherwise.
    fn write_branch(&mut self, stmt: &Stmt) -> bool {
        if let Stmt::Block(block) = stmt {
            self.push(" {\n");
            self.indent();
            for st in &block.statements {
                self.visit_stmt(st);
            }
            self.dedent();
            self.write_indent();
            self.push("}");
            true
        } else {
            self.push("\n");
            self.indent();
            self.visit_stmt(stmt);
            self.dedent();
            false
        }
    }
}

impl AstVisitor for AstPrinter {
    type Output = ();

    fn visit_compilation_unit(&mut self, unit: &CompilationUnit) {
        if let Some(ref package) = unit.package_name {
            self.writeln(&format!("package {};", package));
            self.output.push('\n');
        }
        for import in &unit.imports {
            self.writeln(&format!("import {};", import));
        }
        if !unit.imports.is_empty() {
            self.output.push('\n');
        }
        for type_decl in &unit.type_decls {
            self.visit_type_decl(type_decl);
        }
    }

    fn visit_class_decl(&mut self, class: &ClassDecl) {
        self.write_indent();
        let mods = Self::modifiers_prefix(&class.modifiers);
        self.push(&format!(
            "{}class {} extends {} {{\n",
            mods, class.name, class.super_type
        ));
        self.indent();
        for member in &class.members {
            self.visit_member(member);
        }
        self.dedent();
        self.writeln("}");
    }

    fn visit_field_decl(&mut self, field: &FieldDecl) {
        self.write_indent();
        let mods = Self::modifiers_prefix(&field.modifiers);
        let decl_type = field
            .declarators
            .first()
            .map(|d| d.var_type.to_string())
            .unwrap_or_else(|| Type::Any.to_string());
        let decls = Self::declarators_string(&field.declarators);
        self.push(&format!("{}{} {};\n", mods, decl_type, decls));
    }

    fn visit_method_decl(&mut self, method: &MethodDecl) {
        self.write_indent();
        let mods = Self::modifiers_prefix(&method.modifiers);
        self.push(&format!(
            "{}{} {}({})",
            mods,
            method.return_type,
            method.name,
            Self::params_string(&method.params)
        ));
        match &method.body {
            Some(body) => {
                self.push(" {\n");
                self.indent();
                for st in &body.statements {
                    self.visit_stmt(st);
                }
                self.dedent();
                self.writeln("}");
            }
            None => self.push(";\n"),
        }
    }

    fn visit_constructor_decl(&mut self, constructor: &ConstructorDecl) {
        self.write_indent();
        let mods = Self::modifiers_prefix(&constructor.modifiers);
        self.push(&format!(
            "{}{}({}) {{\n",
            mods,
            constructor.name,
            Self::params_string(&constructor.params)
        ));
        self.indent();
        for st in &constructor.body.statements {
            self.visit_stmt(st);
        }
        self.dedent();
        self.writeln("}");
    }

    fn visit_block(&mut self, block: &Block) {
        self.writeln("{");
        self.indent();
        for st in &block.statements {
            self.visit_stmt(st);
        }
        self.dedent();
        self.writeln("}");
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(block) => self.visit_block(block),
            Stmt::If(s) => {
                self.write_indent();
                self.push(&format!("if ({})", expr_string(&s.test)));
                let then_was_block = self.write_branch(&s.then_branch);
                match &s.else_branch {
                    Some(else_branch) => {
                        if then_was_block {
                            self.push(" else");
                        } else {
                            self.write_indent();
                            self.push("else");
                        }
                        self.write_branch(else_branch);
                        if matches!(**else_branch, Stmt::Block(_)) {
                            self.push("\n");
                        }
                    }
                    None => {
                        if then_was_block {
                            self.push("\n");
                        }
                    }
                }
            }
            Stmt::While(s) => {
                self.write_indent();
                self.push(&format!("while ({})", expr_string(&s.test)));
                let was_block = self.write_branch(&s.body);
                if was_block {
                    self.push("\n");
                }
            }
            Stmt::Return(s) => match &s.value {
                Some(value) => self.writeln(&format!("return {};", expr_string(value))),
                None => self.writeln("return;"),
            },
            Stmt::Empty(_) => self.writeln(";"),
            Stmt::Expression(s) => self.writeln(&format!("{};", expr_string(&s.expr))),
            Stmt::VarDecl(s) => {
                self.write_indent();
                let mods = Self::modifiers_prefix(&s.modifiers);
                let decl_type = s
                    .declarators
                    .first()
                    .map(|d| d.var_type.to_string())
                    .unwrap_or_else(|| Type::Any.to_string());
                let decls = Self::declarators_string(&s.declarators);
                self.push(&format!("{}{} {};\n", mods, decl_type, decls));
            }
        }
    }

    fn visit_expr(&mut self, expr: &Expr) {
        let s = expr_string(expr);
        self.push(&s);
    }
}

/// Render an expression to source text.
pub fn expr_string(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::LiteralInt { value }
        | ExprKind::LiteralChar { value }
        | ExprKind::LiteralString { value } => value.clone(),
        ExprKind::LiteralTrue => "true".to_string(),
        ExprKind::LiteralFalse => "false".to_string(),
        ExprKind::LiteralNull => "null".to_string(),
        ExprKind::Variable { name } => name.clone(),
        ExprKind::This => "this".to_string(),
        ExprKind::Super => "super".to_string(),
        ExprKind::FieldSelection {
            target,
            ambiguous,
            name,
        } => match (target, ambiguous) {
            (Some(target), _) => format!("{}.{}", operand(target), name),
            (None, Some(ambiguous)) => format!("{}.{}", ambiguous, name),
            (None, None) => name.clone(),
        },
        ExprKind::ArrayAccess { array, index } => {
            format!("{}[{}]", operand(array), expr_string(index))
        }
        ExprKind::Message {
            target,
            ambiguous,
            name,
            arguments,
        } => {
            let prefix = match (target, ambiguous) {
                (Some(target), _) => format!("{}.", operand(target)),
                (None, Some(ambiguous)) => format!("{}.", ambiguous),
                (None, None) => String::new(),
            };
            format!("{}{}({})", prefix, name, args_string(arguments))
        }
        ExprKind::ThisConstruction { arguments } => {
            format!("this({})", args_string(arguments))
        }
        ExprKind::SuperConstruction { arguments } => {
            format!("super({})", args_string(arguments))
        }
        ExprKind::New { of_type, arguments } => {
            format!("new {}({})", of_type, args_string(arguments))
        }
        ExprKind::NewArray {
            of_type,
            dimensions,
        } => {
            let mut depth = 0usize;
            let mut base = of_type;
            while let Type::Array(element) = base {
                depth += 1;
                base = element.as_ref();
            }
            let mut out = format!("new {}", base);
            for dim in dimensions {
                out.push_str(&format!("[{}]", expr_string(dim)));
            }
            for _ in dimensions.len()..depth {
                out.push_str("[]");
            }
            out
        }
        ExprKind::ArrayInitializer { of_type, elements } => {
            let elems: Vec<String> = elements.iter().map(expr_string).collect();
            format!("new {} {{{}}}", of_type, elems.join(", "))
        }
        ExprKind::Unary { op, operand: e } => match op {
            UnaryOp::PreIncrement => format!("++{}", operand(e)),
            UnaryOp::PostDecrement => format!("{}--", operand(e)),
            UnaryOp::Negate => format!("-{}", operand(e)),
            UnaryOp::UnaryPlus => format!("+{}", operand(e)),
            UnaryOp::LogicalNot => format!("!{}", operand(e)),
        },
        ExprKind::Binary { op, lhs, rhs } => {
            format!("{} {} {}", operand(lhs), op.symbol(), operand(rhs))
        }
        ExprKind::Assignment { op, target, value } => {
            format!("{} {} {}", expr_string(target), op.symbol(), expr_string(value))
        }
        ExprKind::InstanceOf { expr: e, of_type } => {
            format!("{} instanceof {}", operand(e), of_type)
        }
        ExprKind::Cast { of_type, expr: e } => {
            format!("({}) {}", of_type, operand(e))
        }
        ExprKind::Wild => "<error>".to_string(),
    }
}

fn args_string(arguments: &[Expr]) -> String {
    let parts: Vec<String> = arguments.iter().map(expr_string).collect();
    parts.join(", ")
}

/// Render a subexpression in operand position, parenthesizing anything that
/// is not a primary so the result re-parses with the same shape.
fn operand(expr: &Expr) -> String {
    let rendered = expr_string(expr);
    if is_primary(expr) {
        rendered
    } else {
        format!("({})", rendered)
    }
}

fn is_primary(expr: &Expr) -> bool {
    !matches!(
        expr.kind,
        ExprKind::Unary { .. }
            | ExprKind::Binary { .. }
            | ExprKind::Assignment { .. }
            | ExprKind::InstanceOf { .. }
            | ExprKind::Cast { .. }
    )
}
