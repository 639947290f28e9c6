//! Recursive-descent parser over the token stream, producing the
//! restricted AST. Statements this grammar doesn't model (`import`,
//! `def`, `class`, loops, `try`, …) are consumed and discarded —
//! including their indented suite, if they open one — rather than
//! rejected outright, so one unsupported statement doesn't block
//! folding the rest of the module.

use super::ast::{BinOp, CompareOp, Expr, Stmt};
use super::tokenizer::Token;

const SKIPPED_KEYWORDS: &[&str] = &[
    "import", "from", "def", "class", "try", "except", "finally", "with", "for", "while",
    "return", "raise", "assert", "global", "nonlocal", "pass", "del", "elif", "else", "lambda",
    "yield",
];

pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    #[must_use]
    pub fn parse_module(&mut self) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        while !self.at_eof() {
            match self.peek() {
                Token::Newline | Token::Dedent | Token::Indent => {
                    self.advance();
                }
                _ => stmts.push(self.parse_stmt()),
            }
        }
        stmts
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn peek_at(&self, offset: usize) -> &Token {
        self.tokens.get(self.pos + offset).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let t = self.peek().clone();
        if !matches!(t, Token::Eof) {
            self.pos += 1;
        }
        t
    }

    fn at_eof(&self) -> bool {
        matches!(self.peek(), Token::Eof)
    }

    fn is_op(&self, op: &str) -> bool {
        matches!(self.peek(), Token::Op(o) if o == op)
    }

    fn eat_op(&mut self, op: &str) -> bool {
        if self.is_op(op) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn parse_stmt(&mut self) -> Stmt {
        if let Token::Name(n) = self.peek().clone() {
            if n == "if" {
                return self.parse_if();
            }
            if SKIPPED_KEYWORDS.contains(&n.as_str()) {
                self.skip_statement();
                return Stmt::Other;
            }
            if n != "True" && n != "False" && n != "None" && self.peek_at(1) == &Token::Op("=".to_string()) {
                self.advance();
                self.advance();
                let value = self.parse_expr();
                self.skip_to_stmt_end();
                return Stmt::Assign { target: n, value };
            }
            let expr = self.parse_expr();
            self.skip_to_stmt_end();
            return Stmt::Expr(expr);
        }
        self.skip_statement();
        Stmt::Other
    }

    /// Consumes the `if`/`elif` keyword unconditionally — callers
    /// already checked it's one of those.
    fn parse_if(&mut self) -> Stmt {
        self.advance();
        let test = self.parse_expr();
        self.eat_op(":");
        let body = self.parse_block();

        let mut orelse = Vec::new();
        if let Token::Name(n) = self.peek().clone() {
            if n == "else" {
                self.advance();
                self.eat_op(":");
                orelse = self.parse_block();
            } else if n == "elif" {
                orelse = vec![self.parse_if()];
            }
        }
        Stmt::If { test, body, orelse }
    }

    fn parse_block(&mut self) -> Vec<Stmt> {
        if matches!(self.peek(), Token::Newline) {
            self.advance();
        }
        if matches!(self.peek(), Token::Indent) {
            self.advance();
        }
        let mut stmts = Vec::new();
        loop {
            match self.peek() {
                Token::Dedent => {
                    self.advance();
                    break;
                }
                Token::Eof => break,
                Token::Newline => {
                    self.advance();
                }
                _ => stmts.push(self.parse_stmt()),
            }
        }
        stmts
    }

    fn skip_to_stmt_end(&mut self) {
        while !matches!(self.peek(), Token::Newline | Token::Eof) {
            self.advance();
        }
        if matches!(self.peek(), Token::Newline) {
            self.advance();
        }
    }

    /// Skip a statement this grammar doesn't model, including its
    /// indented suite (the body of a `def`/`class`/`for`/`with`/…) if
    /// it opens one.
    fn skip_statement(&mut self) {
        loop {
            match self.advance() {
                Token::Newline | Token::Eof => break,
                _ => {}
            }
        }
        if matches!(self.peek(), Token::Indent) {
            self.advance();
            let mut depth = 1;
            while depth > 0 {
                match self.advance() {
                    Token::Indent => depth += 1,
                    Token::Dedent => depth -= 1,
                    Token::Eof => break,
                    _ => {}
                }
            }
        }
    }

    fn parse_expr(&mut self) -> Expr {
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Expr {
        let left = self.parse_additive();
        let op = match self.peek() {
            Token::Op(o) if o == "==" => Some(CompareOp::Eq),
            Token::Op(o) if o == "!=" => Some(CompareOp::NotEq),
            Token::Op(o) if o == "<=" => Some(CompareOp::LtE),
            Token::Op(o) if o == ">=" => Some(CompareOp::GtE),
            Token::Op(o) if o == "<" => Some(CompareOp::Lt),
            Token::Op(o) if o == ">" => Some(CompareOp::Gt),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let right = self.parse_additive();
            return Expr::Compare {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        left
    }

    fn parse_additive(&mut self) -> Expr {
        let mut left = self.parse_power();
        while self.is_op("+") {
            self.advance();
            let right = self.parse_power();
            left = Expr::BinOp {
                left: Box::new(left),
                op: BinOp::Add,
                right: Box::new(right),
            };
        }
        left
    }

    fn parse_power(&mut self) -> Expr {
        let mut expr = self.parse_atom();
        loop {
            if self.eat_op(".") {
                if let Token::Name(attr) = self.advance() {
                    expr = Expr::Attribute(Box::new(expr), attr);
                    continue;
                }
                break;
            }
            if self.eat_op("(") {
                let (args, keywords) = self.parse_call_args();
                expr = Expr::Call {
                    func: Box::new(expr),
                    args,
                    keywords,
                };
                continue;
            }
            if self.eat_op("[") {
                let index = self.parse_expr();
                self.eat_op("]");
                expr = Expr::Subscript(Box::new(expr), Box::new(index));
                continue;
            }
            break;
        }
        expr
    }

    fn parse_call_args(&mut self) -> (Vec<Expr>, Vec<(String, Expr)>) {
        let mut args = Vec::new();
        let mut keywords = Vec::new();
        loop {
            if self.eat_op(")") {
                break;
            }
            if let Token::Name(name) = self.peek().clone() {
                if self.peek_at(1) == &Token::Op("=".to_string()) {
                    self.advance();
                    self.advance();
                    keywords.push((name, self.parse_expr()));
                } else {
                    args.push(self.parse_expr());
                }
            } else {
                args.push(self.parse_expr());
            }
            if self.eat_op(",") {
                continue;
            }
            self.eat_op(")");
            break;
        }
        (args, keywords)
    }

    fn parse_atom(&mut self) -> Expr {
        match self.advance() {
            Token::Str(s) => {
                let mut combined = s;
                while let Token::Str(next) = self.peek().clone() {
                    self.advance();
                    combined.push_str(&next);
                }
                Expr::Str(combined)
            }
            Token::Num(n) => Expr::Num(n),
            Token::Name(n) => match n.as_str() {
                "True" => Expr::Bool(true),
                "False" => Expr::Bool(false),
                "None" => Expr::NoneVal,
                _ => Expr::Name(n),
            },
            Token::Op(op) if op == "-" => {
                if let Token::Num(n) = self.peek().clone() {
                    self.advance();
                    Expr::Num(-n)
                } else {
                    Expr::NoneVal
                }
            }
            Token::Op(op) if op == "(" => self.parse_paren_or_tuple(),
            Token::Op(op) if op == "[" => self.parse_list(),
            _ => Expr::NoneVal,
        }
    }

    fn parse_paren_or_tuple(&mut self) -> Expr {
        if self.eat_op(")") {
            return Expr::Tuple(Vec::new());
        }
        let mut items = vec![self.parse_expr()];
        let mut is_tuple = false;
        while self.eat_op(",") {
            is_tuple = true;
            if self.is_op(")") {
                break;
            }
            items.push(self.parse_expr());
        }
        self.eat_op(")");
        if is_tuple {
            Expr::Tuple(items)
        } else {
            items.into_iter().next().unwrap_or(Expr::NoneVal)
        }
    }

    fn parse_list(&mut self) -> Expr {
        let mut items = Vec::new();
        if !self.is_op("]") {
            items.push(self.parse_expr());
            while self.eat_op(",") {
                if self.is_op("]") {
                    break;
                }
                items.push(self.parse_expr());
            }
        }
        self.eat_op("]");
        Expr::List(items)
    }
}
