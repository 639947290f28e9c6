//! A best-effort partial evaluator for the restricted AST.
//!
//! Seeded with exactly two bindings — `sys.version_info` (a 5-tuple)
//! and `platform.system()` — so version/platform-gated assignments
//! fold to a single literal the way they would once the interpreter
//! actually ran. Anything else that can't be resolved against those
//! two seeds or an already-folded assignment fails closed with
//! `Error::PartialEvaluationInsufficient` rather than guessing.

use super::ast::{BinOp, CompareOp, Expr, Stmt};
use std::cmp::Ordering;
use std::collections::HashMap;
use wheelwright_core::{Error, Result};

/// A folded Python value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Num(f64),
    Bool(bool),
    None,
    List(Vec<Value>),
    Tuple(Vec<Value>),
}

/// The folding symbol table, seeded once and grown by resolvable
/// module-level assignments.
pub struct Evaluator {
    folded: HashMap<String, Value>,
}

impl Evaluator {
    #[must_use]
    pub fn new(version_info: (i64, i64, i64, &str, i64), platform_system: &str) -> Self {
        let mut folded = HashMap::new();
        folded.insert(
            "sys.version_info".to_string(),
            Value::Tuple(vec![
                Value::Num(version_info.0 as f64),
                Value::Num(version_info.1 as f64),
                Value::Num(version_info.2 as f64),
                Value::Str(version_info.3.to_string()),
                Value::Num(version_info.4 as f64),
            ]),
        );
        folded.insert(
            "platform.system()".to_string(),
            Value::Str(platform_system.to_string()),
        );
        Self { folded }
    }

    /// Fold module-level assignments and walk resolvable `if`
    /// branches, growing the symbol table used to resolve the
    /// eventual `setup(...)` keyword arguments.
    pub fn run(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            match stmt {
                Stmt::Assign { target, value } => {
                    if let Ok(v) = self.eval(value) {
                        self.folded.insert(target.clone(), v);
                    }
                }
                Stmt::If { test, body, orelse } => match self.eval(test) {
                    Ok(Value::Bool(true)) => self.run(body),
                    Ok(Value::Bool(false)) => self.run(orelse),
                    _ => {}
                },
                Stmt::Expr(Expr::Call { func, args, .. }) => self.try_fold_append(func, args),
                Stmt::Expr(_) | Stmt::Other => {}
            }
        }
    }

    /// Folds `NAME.append(VALUE)` against an already-folded list
    /// named `NAME` — the one mutation pattern setup.py commonly uses
    /// to build a version-gated dependency list incrementally.
    fn try_fold_append(&mut self, func: &Expr, args: &[Expr]) {
        let Expr::Attribute(target, method) = func else {
            return;
        };
        if method != "append" {
            return;
        }
        let (Expr::Name(name), [value]) = (target.as_ref(), args) else {
            return;
        };
        let Ok(v) = self.eval(value) else {
            return;
        };
        if let Some(Value::List(items)) = self.folded.get_mut(name) {
            items.push(v);
        }
    }

    /// Evaluate an expression against the current symbol table.
    ///
    /// # Errors
    /// Returns `Error::PartialEvaluationInsufficient` if the
    /// expression references a name, attribute, or call this
    /// evaluator has no folded binding for.
    pub fn eval(&self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Str(s) => Ok(Value::Str(s.clone())),
            Expr::Num(n) => Ok(Value::Num(*n)),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::NoneVal => Ok(Value::None),
            Expr::List(items) => Ok(Value::List(
                items.iter().map(|i| self.eval(i)).collect::<Result<_>>()?,
            )),
            Expr::Tuple(items) => Ok(Value::Tuple(
                items.iter().map(|i| self.eval(i)).collect::<Result<_>>()?,
            )),
            Expr::Name(n) => self
                .folded
                .get(n.as_str())
                .cloned()
                .ok_or_else(|| Error::partial_evaluation_insufficient(n.clone())),
            Expr::Attribute(base, attr) => {
                if let Some(path) = dotted_path(base, attr) {
                    if let Some(v) = self.folded.get(&path) {
                        return Ok(v.clone());
                    }
                }
                Err(Error::partial_evaluation_insufficient(format!(
                    "{}.{attr}",
                    expr_name_hint(base)
                )))
            }
            Expr::Call { func, .. } => {
                if let Some(path) = call_path(func) {
                    if let Some(v) = self.folded.get(&format!("{path}()")) {
                        return Ok(v.clone());
                    }
                }
                Err(Error::partial_evaluation_insufficient(expr_name_hint(func)))
            }
            Expr::Subscript(base, index) => {
                let base_v = self.eval(base)?;
                let Value::Num(i) = self.eval(index)? else {
                    return Err(Error::partial_evaluation_insufficient(
                        "non-numeric subscript",
                    ));
                };
                let items = match base_v {
                    Value::List(items) | Value::Tuple(items) => items,
                    _ => {
                        return Err(Error::partial_evaluation_insufficient(
                            "subscript of a non-sequence value",
                        ));
                    }
                };
                items.get(i as usize).cloned().ok_or_else(|| {
                    Error::partial_evaluation_insufficient("subscript index out of range")
                })
            }
            Expr::Compare { left, op, right } => {
                let l = self.eval(left)?;
                let r = self.eval(right)?;
                Ok(Value::Bool(compare(&l, *op, &r)))
            }
            Expr::BinOp {
                left,
                op: BinOp::Add,
                right,
            } => {
                let l = self.eval(left)?;
                let r = self.eval(right)?;
                match (l, r) {
                    (Value::List(mut a), Value::List(b)) => {
                        a.extend(b);
                        Ok(Value::List(a))
                    }
                    (Value::Str(a), Value::Str(b)) => Ok(Value::Str(a + &b)),
                    (Value::Num(a), Value::Num(b)) => Ok(Value::Num(a + b)),
                    _ => Err(Error::partial_evaluation_insufficient("unsupported '+' operands")),
                }
            }
        }
    }
}

fn dotted_path(base: &Expr, attr: &str) -> Option<String> {
    if let Expr::Name(n) = base {
        Some(format!("{n}.{attr}"))
    } else {
        None
    }
}

fn call_path(func: &Expr) -> Option<String> {
    match func {
        Expr::Name(n) => Some(n.clone()),
        Expr::Attribute(base, attr) => dotted_path(base, attr),
        _ => None,
    }
}

fn expr_name_hint(expr: &Expr) -> String {
    match expr {
        Expr::Name(n) => n.clone(),
        Expr::Attribute(base, attr) => format!("{}.{attr}", expr_name_hint(base)),
        _ => "<expr>".to_string(),
    }
}

fn compare(left: &Value, op: CompareOp, right: &Value) -> bool {
    let ord = match (left, right) {
        (Value::Num(a), Value::Num(b)) => a.partial_cmp(b),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        (Value::Tuple(a), Value::Tuple(b)) | (Value::List(a), Value::List(b)) => {
            compare_sequences(a, b)
        }
        _ => None,
    };
    match op {
        CompareOp::Eq => left == right,
        CompareOp::NotEq => left != right,
        CompareOp::Lt => ord == Some(Ordering::Less),
        CompareOp::LtE => matches!(ord, Some(Ordering::Less | Ordering::Equal)),
        CompareOp::Gt => ord == Some(Ordering::Greater),
        CompareOp::GtE => matches!(ord, Some(Ordering::Greater | Ordering::Equal)),
    }
}

fn compare_sequences(a: &[Value], b: &[Value]) -> Option<Ordering> {
    for (x, y) in a.iter().zip(b.iter()) {
        let c = match (x, y) {
            (Value::Num(x), Value::Num(y)) => x.partial_cmp(y)?,
            (Value::Str(x), Value::Str(y)) => x.cmp(y),
            _ => return None,
        };
        if c != Ordering::Equal {
            return Some(c);
        }
    }
    Some(a.len().cmp(&b.len()))
}

/// Search statements (including both branches of an unresolved `if`,
/// matching the original's permissiveness) for a top-level call to
/// `setup(...)` or `setuptools.setup(...)`.
#[must_use]
pub fn find_setup_call(stmts: &[Stmt]) -> Option<(Vec<Expr>, Vec<(String, Expr)>)> {
    for stmt in stmts {
        match stmt {
            Stmt::Expr(Expr::Call { func, args, keywords }) if is_setup_call(func) => {
                return Some((args.clone(), keywords.clone()));
            }
            Stmt::If { body, orelse, .. } => {
                if let Some(found) = find_setup_call(body) {
                    return Some(found);
                }
                if let Some(found) = find_setup_call(orelse) {
                    return Some(found);
                }
            }
            _ => {}
        }
    }
    None
}

fn is_setup_call(func: &Expr) -> bool {
    match func {
        Expr::Name(n) => n == "setup",
        Expr::Attribute(base, attr) => {
            attr == "setup" && matches!(base.as_ref(), Expr::Name(n) if n == "setuptools")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::super::parser::Parser;
    use super::super::tokenizer::tokenize;
    use super::*;

    fn eval_module(src: &str) -> (Evaluator, Vec<(String, Expr)>) {
        let tokens = tokenize(src);
        let stmts = Parser::new(&tokens).parse_module();
        let mut ev = Evaluator::new((3, 11, 0, "final", 0), "Linux");
        ev.run(&stmts);
        let (_, keywords) = find_setup_call(&stmts).expect("setup call");
        (ev, keywords)
    }

    #[test]
    fn folds_version_gated_list() {
        let src = "deps = [\"six\"]\nif sys.version_info[0] == 2:\n    deps.append(\"futures\")\nsetup(name=\"x\", install_requires=deps)\n";
        let (ev, keywords) = eval_module(src);
        let value = ev.eval(&keywords.iter().find(|(k, _)| k == "install_requires").unwrap().1).unwrap();
        assert_eq!(value, Value::List(vec![Value::Str("six".to_string())]));
    }

    #[test]
    fn takes_else_branch_when_platform_mismatches() {
        let src = "if platform.system() == \"Windows\":\n    deps = [\"pywin32\"]\nelse:\n    deps = [\"six\"]\nsetup(name=\"x\", install_requires=deps)\n";
        let (ev, keywords) = eval_module(src);
        let value = ev.eval(&keywords.iter().find(|(k, _)| k == "install_requires").unwrap().1).unwrap();
        assert_eq!(value, Value::List(vec![Value::Str("six".to_string())]));
    }

    #[test]
    fn unresolvable_name_is_insufficient() {
        let src = "setup(name=\"x\", install_requires=UNKNOWN)\n";
        let (ev, keywords) = eval_module(src);
        let result = ev.eval(&keywords.iter().find(|(k, _)| k == "install_requires").unwrap().1);
        assert!(result.is_err());
    }

    #[test]
    fn finds_attribute_style_setup_call() {
        let src = "setuptools.setup(name=\"x\")\n";
        let tokens = tokenize(src);
        let stmts = Parser::new(&tokens).parse_module();
        assert!(find_setup_call(&stmts).is_some());
    }
}
