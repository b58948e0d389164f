//! Recursive descent parser for Jay.
//!
//! The parser pulls tokens from a [`LookaheadScanner`] and produces an AST
//! for one compilation unit. It is total: syntax errors are reported on the
//! diagnostic sink and recovery continues, so `parse` always returns a
//! structurally sound tree. Callers observe failure through
//! [`Parser::error_has_occurred`].
//!
//! Error recovery follows the Turner-Morrison scheme: on the first mismatch
//! in a region the parser reports and enters an unrecovered state; further
//! mismatches are not reported but instead skip ahead to the sought token
//! (or EOF), forcing resynchronization at the next anchor.

use super::lexer::TokenKind;
use super::scanner::LookaheadScanner;
use crate::ast::*;

/// Parser for Jay source
pub struct Parser {
    scanner: LookaheadScanner,
    /// Whether a parser error has been found.
    is_in_error: bool,
    /// Whether we have recovered from the most recent parser error.
    is_recovered: bool,
    /// Diagnostics in the order emitted, each `<file>:<line>: <message>`.
    diagnostics: Vec<String>,
}

impl Parser {
    /// Create a parser over a ready scanner.
    pub fn new(scanner: LookaheadScanner) -> Self {
        Self {
            scanner,
            is_in_error: false,
            is_recovered: true,
            diagnostics: Vec::new(),
        }
    }

    /// Parse one compilation unit. The scanner is left sitting on `Eof`.
    pub fn parse(&mut self) -> CompilationUnit {
        self.parse_compilation_unit()
    }

    /// Has a parser error occurred up to now?
    pub fn error_has_occurred(&self) -> bool {
        self.is_in_error
    }

    /// The diagnostics emitted so far, in order.
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    // Parsing support

    /// Is the current token of this kind?
    fn see(&self, sought: TokenKind) -> bool {
        self.scanner.current().kind == sought
    }

    /// If the current token is of this kind, consume it and return true;
    /// otherwise leave it and return false.
    fn have(&mut self, sought: TokenKind) -> bool {
        if self.see(sought) {
            self.scanner.advance();
            return true;
        }
        false
    }

    /// Match the sought kind against the current token. On success, consume
    /// and mark the parser recovered. On the first failure in a region,
    /// report and go unrecovered without consuming; while unrecovered, skip
    /// tokens until the sought kind (or EOF) turns up and quietly resume.
    fn must_be(&mut self, sought: TokenKind) {
        if self.see(sought) {
            self.scanner.advance();
            self.is_recovered = true;
        } else if self.is_recovered {
            self.is_recovered = false;
            self.report_error(format!(
                "{} found where {} sought",
                self.scanner.current().image,
                sought.image()
            ));
        } else {
            // Do not report the (possibly spurious) error, but attempt to
            // recover by forcing a match.
            log::debug!(
                "resynchronizing: skipping to {} from line {}",
                sought.image(),
                self.scanner.current().line
            );
            while !self.see(sought) && !self.see(TokenKind::Eof) {
                self.scanner.advance();
            }
            if self.see(sought) {
                self.scanner.advance();
                self.is_recovered = true;
            }
        }
    }

    /// Report a syntax error at the current token and remember it.
    fn report_error(&mut self, message: String) {
        self.is_in_error = true;
        self.is_recovered = false;
        let diagnostic = format!(
            "{}:{}: {}",
            self.scanner.file_name(),
            self.scanner.current().line,
            message
        );
        eprintln!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// Pull out the ambiguous part of a qualified name, if any: the dotted
    /// prefix of `a.b.c` is `a.b`; a simple name has none.
    fn ambiguous_part(name: &TypeName) -> Option<AmbiguousName> {
        name.name
            .rfind('.')
            .map(|dot| AmbiguousName::new(name.line, &name.name[..dot]))
    }

    // Lookahead

    /// Are we looking at `IDENTIFIER LPAREN`?
    fn see_ident_lparen(&mut self) -> bool {
        self.scanner.record_position();
        let result = self.have(TokenKind::Identifier) && self.see(TokenKind::LParen);
        self.scanner.return_to_position();
        result
    }

    /// Are we looking at a cast, i.e. `LPAREN type RPAREN ...`?
    fn see_cast(&mut self) -> bool {
        self.scanner.record_position();
        if !self.have(TokenKind::LParen) {
            self.scanner.return_to_position();
            return false;
        }
        if self.see_basic_type() {
            self.scanner.return_to_position();
            return true;
        }
        if !self.see(TokenKind::Identifier) {
            self.scanner.return_to_position();
            return false;
        }
        self.scanner.advance();
        // A qualified identifier is ok
        while self.have(TokenKind::Dot) {
            if !self.have(TokenKind::Identifier) {
                self.scanner.return_to_position();
                return false;
            }
        }
        while self.have(TokenKind::LBrack) {
            if !self.have(TokenKind::RBrack) {
                self.scanner.return_to_position();
                return false;
            }
        }
        if !self.have(TokenKind::RParen) {
            self.scanner.return_to_position();
            return false;
        }
        self.scanner.return_to_position();
        true
    }

    /// Are we looking at a local variable declaration, i.e.
    /// `type IDENTIFIER {LBRACK RBRACK}`?
    fn see_local_variable_declaration(&mut self) -> bool {
        self.scanner.record_position();
        if self.have(TokenKind::Identifier) {
            // A qualified identifier is ok
            while self.have(TokenKind::Dot) {
                if !self.have(TokenKind::Identifier) {
                    self.scanner.return_to_position();
                    return false;
                }
            }
        } else if self.see_basic_type() {
            self.scanner.advance();
        } else {
            self.scanner.return_to_position();
            return false;
        }
        while self.have(TokenKind::LBrack) {
            if !self.have(TokenKind::RBrack) {
                self.scanner.return_to_position();
                return false;
            }
        }
        if !self.have(TokenKind::Identifier) {
            self.scanner.return_to_position();
            return false;
        }
        while self.have(TokenKind::LBrack) {
            if !self.have(TokenKind::RBrack) {
                self.scanner.return_to_position();
                return false;
            }
        }
        self.scanner.return_to_position();
        true
    }

    /// Are we looking at a basic type (`boolean`, `char`, `int`)?
    fn see_basic_type(&self) -> bool {
        self.scanner.current().kind.is_basic_type()
    }

    /// Are we looking at a reference type, i.e. a named type or a basic
    /// type followed by `[]`?
    fn see_reference_type(&mut self) -> bool {
        if self.see(TokenKind::Identifier) {
            return true;
        }
        self.scanner.record_position();
        if self.have(TokenKind::Boolean) || self.have(TokenKind::Char) || self.have(TokenKind::Int)
        {
            if self.have(TokenKind::LBrack) && self.see(TokenKind::RBrack) {
                self.scanner.return_to_position();
                return true;
            }
        }
        self.scanner.return_to_position();
        false
    }

    /// Are we looking at a `[]` pair?
    fn see_dims(&mut self) -> bool {
        self.scanner.record_position();
        let result = self.have(TokenKind::LBrack) && self.see(TokenKind::RBrack);
        self.scanner.return_to_position();
        result
    }

    // Productions

    /// compilationUnit ::= [PACKAGE qualifiedIdentifier SEMI]
    ///                     {IMPORT qualifiedIdentifier SEMI}
    ///                     {typeDeclaration} EOF
    fn parse_compilation_unit(&mut self) -> CompilationUnit {
        let line = self.scanner.current().line;
        let package_name = if self.have(TokenKind::Package) {
            let name = self.parse_qualified_identifier();
            self.must_be(TokenKind::Semi);
            Some(name)
        } else {
            None
        };
        let mut imports = Vec::new();
        while self.have(TokenKind::Import) {
            imports.push(self.parse_qualified_identifier());
            self.must_be(TokenKind::Semi);
        }
        let mut type_decls = Vec::new();
        while !self.see(TokenKind::Eof) {
            type_decls.push(self.parse_type_declaration());
        }
        self.must_be(TokenKind::Eof);
        CompilationUnit {
            file_name: self.scanner.file_name().to_string(),
            line,
            package_name,
            imports,
            type_decls,
        }
    }

    /// qualifiedIdentifier ::= IDENTIFIER {DOT IDENTIFIER}
    fn parse_qualified_identifier(&mut self) -> TypeName {
        let line = self.scanner.current().line;
        self.must_be(TokenKind::Identifier);
        let mut name = self.scanner.previous().image.clone();
        while self.have(TokenKind::Dot) {
            self.must_be(TokenKind::Identifier);
            name.push('.');
            name.push_str(&self.scanner.previous().image);
        }
        TypeName::new(line, name)
    }

    /// typeDeclaration ::= modifiers classDeclaration
    fn parse_type_declaration(&mut self) -> TypeDecl {
        let mods = self.parse_modifiers();
        TypeDecl::Class(self.parse_class_declaration(mods))
    }

    /// modifiers ::= {PUBLIC | PROTECTED | PRIVATE | STATIC | ABSTRACT}
    ///
    /// Duplicates and conflicts among the access modifiers are reported;
    /// parsing continues with every modifier kept in source order.
    fn parse_modifiers(&mut self) -> Vec<String> {
        let mut mods = Vec::new();
        let mut scanned_public = false;
        let mut scanned_protected = false;
        let mut scanned_private = false;
        let mut scanned_static = false;
        let mut scanned_abstract = false;
        loop {
            if self.have(TokenKind::Public) {
                mods.push("public".to_string());
                if scanned_public {
                    self.report_error("Repeated modifier:public".to_string());
                }
                if scanned_protected || scanned_private {
                    self.report_error("Access conflict in modifiers".to_string());
                }
                scanned_public = true;
            } else if self.have(TokenKind::Protected) {
                mods.push("protected".to_string());
                if scanned_protected {
                    self.report_error("Repeated modifier: protected".to_string());
                }
                if scanned_public || scanned_private {
                    self.report_error("Access conflict in modifiers".to_string());
                }
                scanned_protected = true;
            } else if self.have(TokenKind::Private) {
                mods.push("private".to_string());
                if scanned_private {
                    self.report_error("Repeated modifier: private".to_string());
                }
                if scanned_public || scanned_protected {
                    self.report_error("Access conflict in modifiers".to_string());
                }
                scanned_private = true;
            } else if self.have(TokenKind::Static) {
                mods.push("static".to_string());
                if scanned_static {
                    self.report_error("Repeated modifier: static".to_string());
                }
                scanned_static = true;
            } else if self.have(TokenKind::Abstract) {
                mods.push("abstract".to_string());
                if scanned_abstract {
                    self.report_error("Repeated modifier: abstract".to_string());
                }
                scanned_abstract = true;
            } else {
                break;
            }
        }
        mods
    }

    /// classDeclaration ::= CLASS IDENTIFIER [EXTENDS qualifiedIdentifier]
    ///                      classBody
    ///
    /// A class without an extends clause implicitly extends
    /// `java.lang.Object`.
    fn parse_class_declaration(&mut self, mods: Vec<String>) -> ClassDecl {
        let line = self.scanner.current().line;
        self.must_be(TokenKind::Class);
        self.must_be(TokenKind::Identifier);
        let name = self.scanner.previous().image.clone();
        let super_type = if self.have(TokenKind::Extends) {
            Type::Named(self.parse_qualified_identifier())
        } else {
            Type::object()
        };
        ClassDecl {
            line,
            modifiers: mods,
            name,
            super_type,
            members: self.parse_class_body(),
        }
    }

    /// classBody ::= LCURLY {modifiers memberDecl} RCURLY
    fn parse_class_body(&mut self) -> Vec<Member> {
        let mut members = Vec::new();
        self.must_be(TokenKind::LCurly);
        while !self.see(TokenKind::RCurly) && !self.see(TokenKind::Eof) {
            let mods = self.parse_modifiers();
            members.push(self.parse_member_decl(mods));
        }
        self.must_be(TokenKind::RCurly);
        members
    }

    /// memberDecl ::= IDENTIFIER formalParameters block          // constructor
    ///              | (VOID | type) IDENTIFIER formalParameters
    ///                  (block | SEMI)                           // method
    ///              | type variableDeclarators SEMI              // field
    fn parse_member_decl(&mut self, mods: Vec<String>) -> Member {
        let line = self.scanner.current().line;
        if self.see_ident_lparen() {
            // A constructor
            log::debug!("member at line {}: constructor", line);
            self.must_be(TokenKind::Identifier);
            let name = self.scanner.previous().image.clone();
            let params = self.parse_formal_parameters();
            let body = self.parse_block();
            Member::Constructor(ConstructorDecl {
                line,
                modifiers: mods,
                name,
                params,
                body,
            })
        } else if self.have(TokenKind::Void) {
            // A void method
            self.must_be(TokenKind::Identifier);
            let name = self.scanner.previous().image.clone();
            let params = self.parse_formal_parameters();
            let body = if self.have(TokenKind::Semi) {
                None
            } else {
                Some(self.parse_block())
            };
            Member::Method(MethodDecl {
                line,
                modifiers: mods,
                name,
                return_type: Type::Void,
                params,
                body,
            })
        } else {
            let member_type = self.parse_type();
            if self.see_ident_lparen() {
                // A non-void method
                self.must_be(TokenKind::Identifier);
                let name = self.scanner.previous().image.clone();
                let params = self.parse_formal_parameters();
                let body = if self.have(TokenKind::Semi) {
                    None
                } else {
                    Some(self.parse_block())
                };
                Member::Method(MethodDecl {
                    line,
                    modifiers: mods,
                    name,
                    return_type: member_type,
                    params,
                    body,
                })
            } else {
                // A field
                let declarators = self.parse_variable_declarators(&member_type);
                self.must_be(TokenKind::Semi);
                Member::Field(FieldDecl {
                    line,
                    modifiers: mods,
                    declarators,
                })
            }
        }
    }

    /// block ::= LCURLY {blockStatement} RCURLY
    fn parse_block(&mut self) -> Block {
        let line = self.scanner.current().line;
        let mut statements = Vec::new();
        self.must_be(TokenKind::LCurly);
        while !self.see(TokenKind::RCurly) && !self.see(TokenKind::Eof) {
            statements.push(self.parse_block_statement());
        }
        self.must_be(TokenKind::RCurly);
        Block { line, statements }
    }

    /// blockStatement ::= localVariableDeclarationStatement | statement
    fn parse_block_statement(&mut self) -> Stmt {
        if self.see_local_variable_declaration() {
            self.parse_local_variable_declaration_statement()
        } else {
            self.parse_statement()
        }
    }

    /// statement ::= block
    ///             | IF parExpression statement [ELSE statement]
    ///             | WHILE parExpression statement
    ///             | RETURN [expression] SEMI
    ///             | SEMI
    ///             | statementExpression SEMI
    fn parse_statement(&mut self) -> Stmt {
        let line = self.scanner.current().line;
        if self.see(TokenKind::LCurly) {
            Stmt::Block(self.parse_block())
        } else if self.have(TokenKind::If) {
            let test = self.parse_par_expression();
            let then_branch = Box::new(self.parse_statement());
            let else_branch = if self.have(TokenKind::Else) {
                Some(Box::new(self.parse_statement()))
            } else {
                None
            };
            Stmt::If(IfStmt {
                line,
                test,
                then_branch,
                else_branch,
            })
        } else if self.have(TokenKind::While) {
            let test = self.parse_par_expression();
            let body = Box::new(self.parse_statement());
            Stmt::While(WhileStmt { line, test, body })
        } else if self.have(TokenKind::Return) {
            if self.have(TokenKind::Semi) {
                return Stmt::Return(ReturnStmt { line, value: None });
            }
            let value = self.parse_expression();
            self.must_be(TokenKind::Semi);
            Stmt::Return(ReturnStmt {
                line,
                value: Some(value),
            })
        } else if self.have(TokenKind::Semi) {
            Stmt::Empty(EmptyStmt { line })
        } else {
            // Must be a statementExpression
            let statement = self.parse_statement_expression();
            self.must_be(TokenKind::Semi);
            statement
        }
    }

    /// formalParameters ::= LPAREN
    ///                        [formalParameter {COMMA formalParameter}]
    ///                      RPAREN
    fn parse_formal_parameters(&mut self) -> Vec<FormalParameter> {
        let mut parameters = Vec::new();
        self.must_be(TokenKind::LParen);
        if self.have(TokenKind::RParen) {
            return parameters; // ()
        }
        loop {
            parameters.push(self.parse_formal_parameter());
            if !self.have(TokenKind::Comma) {
                break;
            }
        }
        self.must_be(TokenKind::RParen);
        parameters
    }

    /// formalParameter ::= type IDENTIFIER
    fn parse_formal_parameter(&mut self) -> FormalParameter {
        let line = self.scanner.current().line;
        let param_type = self.parse_type();
        self.must_be(TokenKind::Identifier);
        let name = self.scanner.previous().image.clone();
        FormalParameter {
            line,
            name,
            param_type,
        }
    }

    /// parExpression ::= LPAREN expression RPAREN
    fn parse_par_expression(&mut self) -> Expr {
        self.must_be(TokenKind::LParen);
        let expr = self.parse_expression();
        self.must_be(TokenKind::RParen);
        expr
    }

    /// localVariableDeclarationStatement ::= type variableDeclarators SEMI
    fn parse_local_variable_declaration_statement(&mut self) -> Stmt {
        let line = self.scanner.current().line;
        let decl_type = self.parse_type();
        let declarators = self.parse_variable_declarators(&decl_type);
        self.must_be(TokenKind::Semi);
        Stmt::VarDecl(VariableDeclaration {
            line,
            modifiers: Vec::new(),
            declarators,
        })
    }

    /// variableDeclarators ::= variableDeclarator {COMMA variableDeclarator}
    fn parse_variable_declarators(&mut self, decl_type: &Type) -> Vec<VariableDeclarator> {
        let mut declarators = Vec::new();
        loop {
            declarators.push(self.parse_variable_declarator(decl_type));
            if !self.have(TokenKind::Comma) {
                break;
            }
        }
        declarators
    }

    /// variableDeclarator ::= IDENTIFIER [ASSIGN variableInitializer]
    fn parse_variable_declarator(&mut self, decl_type: &Type) -> VariableDeclarator {
        let line = self.scanner.current().line;
        self.must_be(TokenKind::Identifier);
        let name = self.scanner.previous().image.clone();
        let initializer = if self.have(TokenKind::Assign) {
            Some(self.parse_variable_initializer(decl_type))
        } else {
            None
        };
        VariableDeclarator {
            line,
            name,
            var_type: decl_type.clone(),
            initializer,
        }
    }

    /// variableInitializer ::= arrayInitializer | expression
    fn parse_variable_initializer(&mut self, decl_type: &Type) -> Expr {
        if self.see(TokenKind::LCurly) {
            self.parse_array_initializer(decl_type)
        } else {
            self.parse_expression()
        }
    }

    /// arrayInitializer ::= LCURLY
    ///                        [variableInitializer
    ///                          {COMMA variableInitializer} [COMMA]]
    ///                      RCURLY
    ///
    /// A dangling comma before the closing brace contributes no element.
    fn parse_array_initializer(&mut self, of_type: &Type) -> Expr {
        let line = self.scanner.current().line;
        let mut elements = Vec::new();
        self.must_be(TokenKind::LCurly);
        if self.have(TokenKind::RCurly) {
            return Expr::new(
                line,
                ExprKind::ArrayInitializer {
                    of_type: of_type.clone(),
                    elements,
                },
            );
        }
        let component = of_type.component_type();
        elements.push(self.parse_variable_initializer(&component));
        while self.have(TokenKind::Comma) {
            if self.see(TokenKind::RCurly) {
                break;
            }
            elements.push(self.parse_variable_initializer(&component));
        }
        self.must_be(TokenKind::RCurly);
        Expr::new(
            line,
            ExprKind::ArrayInitializer {
                of_type: of_type.clone(),
                elements,
            },
        )
    }

    /// arguments ::= LPAREN [expression {COMMA expression}] RPAREN
    fn parse_arguments(&mut self) -> Vec<Expr> {
        let mut args = Vec::new();
        self.must_be(TokenKind::LParen);
        if self.have(TokenKind::RParen) {
            return args;
        }
        loop {
            args.push(self.parse_expression());
            if !self.have(TokenKind::Comma) {
                break;
            }
        }
        self.must_be(TokenKind::RParen);
        args
    }

    /// type ::= referenceType | basicType
    fn parse_type(&mut self) -> Type {
        if self.see_reference_type() {
            return self.parse_reference_type();
        }
        self.parse_basic_type()
    }

    /// basicType ::= BOOLEAN | CHAR | INT
    fn parse_basic_type(&mut self) -> Type {
        if self.have(TokenKind::Boolean) {
            Type::Boolean
        } else if self.have(TokenKind::Char) {
            Type::Char
        } else if self.have(TokenKind::Int) {
            Type::Int
        } else {
            self.report_error(format!(
                "Type sought where {} found",
                self.scanner.current().image
            ));
            Type::Any
        }
    }

    /// referenceType ::= basicType LBRACK RBRACK {LBRACK RBRACK}
    ///                 | qualifiedIdentifier {LBRACK RBRACK}
    fn parse_reference_type(&mut self) -> Type {
        let mut reference = if !self.see(TokenKind::Identifier) {
            let base = self.parse_basic_type();
            self.must_be(TokenKind::LBrack);
            self.must_be(TokenKind::RBrack);
            Type::array_of(base)
        } else {
            Type::Named(self.parse_qualified_identifier())
        };
        while self.see_dims() {
            self.must_be(TokenKind::LBrack);
            self.must_be(TokenKind::RBrack);
            reference = Type::array_of(reference);
        }
        reference
    }

    /// statementExpression ::= expression // but must have a side effect
    fn parse_statement_expression(&mut self) -> Stmt {
        let line = self.scanner.current().line;
        let mut expr = self.parse_expression();
        if expr.has_side_effect() {
            // So the value can be discarded rather than left on the stack.
            expr.is_statement_expression = true;
        } else {
            self.report_error(
                "Invalid statement expression; it does not have a side-effect".to_string(),
            );
        }
        Stmt::Expression(ExprStmt { line, expr })
    }

    /// expression ::= assignmentExpression
    fn parse_expression(&mut self) -> Expr {
        self.parse_assignment_expression()
    }

    /// assignmentExpression ::= conditionalAndExpression
    ///                            [(ASSIGN | PLUS_ASSIGN)
    ///                             assignmentExpression]
    fn parse_assignment_expression(&mut self) -> Expr {
        let line = self.scanner.current().line;
        let lhs = self.parse_conditional_and_expression();
        if self.have(TokenKind::Assign) {
            let value = self.parse_assignment_expression();
            Expr::new(
                line,
                ExprKind::Assignment {
                    op: AssignOp::Assign,
                    target: Box::new(lhs),
                    value: Box::new(value),
                },
            )
        } else if self.have(TokenKind::PlusAssign) {
            let value = self.parse_assignment_expression();
            Expr::new(
                line,
                ExprKind::Assignment {
                    op: AssignOp::PlusAssign,
                    target: Box::new(lhs),
                    value: Box::new(value),
                },
            )
        } else {
            lhs
        }
    }

    /// conditionalAndExpression ::= equalityExpression
    ///                                {LAND equalityExpression}
    fn parse_conditional_and_expression(&mut self) -> Expr {
        let line = self.scanner.current().line;
        let mut lhs = self.parse_equality_expression();
        while self.have(TokenKind::LogicalAnd) {
            let rhs = self.parse_equality_expression();
            lhs = Expr::new(
                line,
                ExprKind::Binary {
                    op: BinaryOp::LogicalAnd,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
            );
        }
        lhs
    }

    /// equalityExpression ::= relationalExpression
    ///                          {EQUAL relationalExpression}
    fn parse_equality_expression(&mut self) -> Expr {
        let line = self.scanner.current().line;
        let mut lhs = self.parse_relational_expression();
        while self.have(TokenKind::Equal) {
            let rhs = self.parse_relational_expression();
            lhs = Expr::new(
                line,
                ExprKind::Binary {
                    op: BinaryOp::Equal,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
            );
        }
        lhs
    }

    /// relationalExpression ::= additiveExpression
    ///                            [(GT | LE) additiveExpression
    ///                            | INSTANCEOF referenceType]
    ///
    /// At most one relational operator: `a > b > c` is a syntax error at the
    /// second `>`.
    fn parse_relational_expression(&mut self) -> Expr {
        let line = self.scanner.current().line;
        let lhs = self.parse_additive_expression();
        if self.have(TokenKind::Gt) {
            let rhs = self.parse_additive_expression();
            Expr::new(
                line,
                ExprKind::Binary {
                    op: BinaryOp::GreaterThan,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
            )
        } else if self.have(TokenKind::Le) {
            let rhs = self.parse_additive_expression();
            Expr::new(
                line,
                ExprKind::Binary {
                    op: BinaryOp::LessEqual,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
            )
        } else if self.have(TokenKind::InstanceOf) {
            let of_type = self.parse_reference_type();
            Expr::new(
                line,
                ExprKind::InstanceOf {
                    expr: Box::new(lhs),
                    of_type,
                },
            )
        } else {
            lhs
        }
    }

    /// additiveExpression ::= multiplicativeExpression
    ///                          {(PLUS | MINUS) multiplicativeExpression}
    fn parse_additive_expression(&mut self) -> Expr {
        let line = self.scanner.current().line;
        let mut lhs = self.parse_multiplicative_expression();
        loop {
            let op = if self.have(TokenKind::Minus) {
                BinaryOp::Subtract
            } else if self.have(TokenKind::Plus) {
                BinaryOp::Plus
            } else {
                break;
            };
            let rhs = self.parse_multiplicative_expression();
            lhs = Expr::new(
                line,
                ExprKind::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
            );
        }
        lhs
    }

    /// multiplicativeExpression ::= unaryExpression
    ///                                {(STAR | DIV | MOD) unaryExpression}
    fn parse_multiplicative_expression(&mut self) -> Expr {
        let line = self.scanner.current().line;
        let mut lhs = self.parse_unary_expression();
        loop {
            let op = if self.have(TokenKind::Star) {
                BinaryOp::Multiply
            } else if self.have(TokenKind::Div) {
                BinaryOp::Divide
            } else if self.have(TokenKind::Mod) {
                BinaryOp::Modulo
            } else {
                break;
            };
            let rhs = self.parse_unary_expression();
            lhs = Expr::new(
                line,
                ExprKind::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
            );
        }
        lhs
    }

    /// unaryExpression ::= INC unaryExpression
    ///                   | MINUS unaryExpression
    ///                   | PLUS unaryExpression
    ///                   | simpleUnaryExpression
    fn parse_unary_expression(&mut self) -> Expr {
        let line = self.scanner.current().line;
        if self.have(TokenKind::Inc) {
            let operand = self.parse_unary_expression();
            Expr::new(
                line,
                ExprKind::Unary {
                    op: UnaryOp::PreIncrement,
                    operand: Box::new(operand),
                },
            )
        } else if self.have(TokenKind::Minus) {
            let operand = self.parse_unary_expression();
            Expr::new(
                line,
                ExprKind::Unary {
                    op: UnaryOp::Negate,
                    operand: Box::new(operand),
                },
            )
        } else if self.have(TokenKind::Plus) {
            let operand = self.parse_unary_expression();
            Expr::new(
                line,
                ExprKind::Unary {
                    op: UnaryOp::UnaryPlus,
                    operand: Box::new(operand),
                },
            )
        } else {
            self.parse_simple_unary_expression()
        }
    }

    /// simpleUnaryExpression ::= LNOT unaryExpression
    ///                         | LPAREN basicType RPAREN unaryExpression
    ///                         | LPAREN referenceType RPAREN
    ///                             simpleUnaryExpression
    ///                         | postfixExpression
    ///
    /// A reference-type cast recurses into simpleUnaryExpression, so a unary
    /// operator may not directly follow such a cast.
    fn parse_simple_unary_expression(&mut self) -> Expr {
        let line = self.scanner.current().line;
        if self.have(TokenKind::LogicalNot) {
            let operand = self.parse_unary_expression();
            Expr::new(
                line,
                ExprKind::Unary {
                    op: UnaryOp::LogicalNot,
                    operand: Box::new(operand),
                },
            )
        } else if self.see_cast() {
            self.must_be(TokenKind::LParen);
            let is_basic = self.see_basic_type();
            let of_type = self.parse_type();
            self.must_be(TokenKind::RParen);
            let expr = if is_basic {
                self.parse_unary_expression()
            } else {
                self.parse_simple_unary_expression()
            };
            Expr::new(
                line,
                ExprKind::Cast {
                    of_type,
                    expr: Box::new(expr),
                },
            )
        } else {
            self.parse_postfix_expression()
        }
    }

    /// postfixExpression ::= primary {selector} {DEC}
    fn parse_postfix_expression(&mut self) -> Expr {
        let line = self.scanner.current().line;
        let mut expr = self.parse_primary();
        while self.see(TokenKind::Dot) || self.see(TokenKind::LBrack) {
            expr = self.parse_selector(expr);
        }
        while self.have(TokenKind::Dec) {
            expr = Expr::new(
                line,
                ExprKind::Unary {
                    op: UnaryOp::PostDecrement,
                    operand: Box::new(expr),
                },
            );
        }
        expr
    }

    /// selector ::= DOT IDENTIFIER [arguments]
    ///            | LBRACK expression RBRACK
    fn parse_selector(&mut self, target: Expr) -> Expr {
        let line = self.scanner.current().line;
        if self.have(TokenKind::Dot) {
            self.must_be(TokenKind::Identifier);
            let name = self.scanner.previous().image.clone();
            if self.see(TokenKind::LParen) {
                let arguments = self.parse_arguments();
                Expr::new(
                    line,
                    ExprKind::Message {
                        target: Some(Box::new(target)),
                        ambiguous: None,
                        name,
                        arguments,
                    },
                )
            } else {
                Expr::new(
                    line,
                    ExprKind::FieldSelection {
                        target: Some(Box::new(target)),
                        ambiguous: None,
                        name,
                    },
                )
            }
        } else {
            self.must_be(TokenKind::LBrack);
            let index = self.parse_expression();
            self.must_be(TokenKind::RBrack);
            Expr::new(
                line,
                ExprKind::ArrayAccess {
                    array: Box::new(target),
                    index: Box::new(index),
                },
            )
        }
    }

    /// primary ::= parExpression
    ///           | THIS [arguments]
    ///           | SUPER (arguments | DOT IDENTIFIER [arguments])
    ///           | literal
    ///           | NEW creator
    ///           | qualifiedIdentifier [arguments]
    fn parse_primary(&mut self) -> Expr {
        let line = self.scanner.current().line;
        if self.see(TokenKind::LParen) {
            self.parse_par_expression()
        } else if self.have(TokenKind::This) {
            if self.see(TokenKind::LParen) {
                let arguments = self.parse_arguments();
                Expr::new(line, ExprKind::ThisConstruction { arguments })
            } else {
                Expr::new(line, ExprKind::This)
            }
        } else if self.have(TokenKind::Super) {
            if !self.have(TokenKind::Dot) {
                let arguments = self.parse_arguments();
                return Expr::new(line, ExprKind::SuperConstruction { arguments });
            }
            self.must_be(TokenKind::Identifier);
            let name = self.scanner.previous().image.clone();
            let target = Expr::new(line, ExprKind::Super);
            if self.see(TokenKind::LParen) {
                let arguments = self.parse_arguments();
                Expr::new(
                    line,
                    ExprKind::Message {
                        target: Some(Box::new(target)),
                        ambiguous: None,
                        name,
                        arguments,
                    },
                )
            } else {
                Expr::new(
                    line,
                    ExprKind::FieldSelection {
                        target: Some(Box::new(target)),
                        ambiguous: None,
                        name,
                    },
                )
            }
        } else if self.have(TokenKind::New) {
            self.parse_creator()
        } else if self.see(TokenKind::Identifier) {
            let id = self.parse_qualified_identifier();
            if self.see(TokenKind::LParen) {
                let arguments = self.parse_arguments();
                Expr::new(
                    line,
                    ExprKind::Message {
                        target: None,
                        ambiguous: Self::ambiguous_part(&id),
                        name: id.simple_name().to_string(),
                        arguments,
                    },
                )
            } else if let Some(ambiguous) = Self::ambiguous_part(&id) {
                // ambiguousPart.fieldName
                Expr::new(
                    line,
                    ExprKind::FieldSelection {
                        target: None,
                        ambiguous: Some(ambiguous),
                        name: id.simple_name().to_string(),
                    },
                )
            } else {
                // A simple name
                Expr::new(
                    line,
                    ExprKind::Variable {
                        name: id.simple_name().to_string(),
                    },
                )
            }
        } else {
            self.parse_literal()
        }
    }

    /// creator ::= (basicType | qualifiedIdentifier)
    ///               ( arguments
    ///               | LBRACK RBRACK {LBRACK RBRACK} [arrayInitializer]
    ///               | newArrayDeclarator
    ///               )
    fn parse_creator(&mut self) -> Expr {
        let line = self.scanner.current().line;
        let base = if self.see_basic_type() {
            self.parse_basic_type()
        } else {
            Type::Named(self.parse_qualified_identifier())
        };
        if self.see(TokenKind::LParen) {
            let arguments = self.parse_arguments();
            Expr::new(
                line,
                ExprKind::New {
                    of_type: base,
                    arguments,
                },
            )
        } else if self.see(TokenKind::LBrack) {
            if self.see_dims() {
                let mut expected = base;
                while self.have(TokenKind::LBrack) {
                    self.must_be(TokenKind::RBrack);
                    expected = Type::array_of(expected);
                }
                self.parse_array_initializer(&expected)
            } else {
                self.parse_new_array_declarator(line, base)
            }
        } else {
            self.report_error(format!(
                "( or [ sought where {} found",
                self.scanner.current().image
            ));
            Expr::new(line, ExprKind::Wild)
        }
    }

    /// newArrayDeclarator ::= LBRACK expression RBRACK
    ///                          {LBRACK expression RBRACK}
    ///                          {LBRACK RBRACK}
    ///
    /// Dimension expressions come first; once an empty `[]` pair appears,
    /// the rest may only be empty pairs, each wrapping the type one level
    /// deeper.
    fn parse_new_array_declarator(&mut self, line: usize, base: Type) -> Expr {
        let mut dimensions = Vec::new();
        self.must_be(TokenKind::LBrack);
        dimensions.push(self.parse_expression());
        self.must_be(TokenKind::RBrack);
        let mut of_type = Type::array_of(base);
        while self.have(TokenKind::LBrack) {
            if self.have(TokenKind::RBrack) {
                // We're done with dimension expressions
                of_type = Type::array_of(of_type);
                while self.have(TokenKind::LBrack) {
                    self.must_be(TokenKind::RBrack);
                    of_type = Type::array_of(of_type);
                }
                return Expr::new(
                    line,
                    ExprKind::NewArray {
                        of_type,
                        dimensions,
                    },
                );
            }
            dimensions.push(self.parse_expression());
            of_type = Type::array_of(of_type);
            self.must_be(TokenKind::RBrack);
        }
        Expr::new(
            line,
            ExprKind::NewArray {
                of_type,
                dimensions,
            },
        )
    }

    /// literal ::= INT_LITERAL | CHAR_LITERAL | STRING_LITERAL
    ///           | TRUE | FALSE | NULL
    fn parse_literal(&mut self) -> Expr {
        let line = self.scanner.current().line;
        if self.have(TokenKind::IntLiteral) {
            Expr::new(
                line,
                ExprKind::LiteralInt {
                    value: self.scanner.previous().image.clone(),
                },
            )
        } else if self.have(TokenKind::CharLiteral) {
            Expr::new(
                line,
                ExprKind::LiteralChar {
                    value: self.scanner.previous().image.clone(),
                },
            )
        } else if self.have(TokenKind::StringLiteral) {
            Expr::new(
                line,
                ExprKind::LiteralString {
                    value: self.scanner.previous().image.clone(),
                },
            )
        } else if self.have(TokenKind::True) {
            Expr::new(line, ExprKind::LiteralTrue)
        } else if self.have(TokenKind::False) {
            Expr::new(line, ExprKind::LiteralFalse)
        } else if self.have(TokenKind::Null) {
            Expr::new(line, ExprKind::LiteralNull)
        } else {
            self.report_error(format!(
                "Literal sought where {} found",
                self.scanner.current().image
            ));
            Expr::new(line, ExprKind::Wild)
        }
    }

    /// The scanner, for post-parse inspection.
    pub fn scanner(&self) -> &LookaheadScanner {
        &self.scanner
    }
}
