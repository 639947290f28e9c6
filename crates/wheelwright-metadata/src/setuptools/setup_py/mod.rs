//! `setup.py` extraction: tokenize, parse into the restricted AST,
//! partially fold assignments and `if`/`else` ladders, then read the
//! `name`/`setup_requires`/`install_requires` keywords off the
//! located `setup(...)` call.

pub mod ast;
pub mod eval;
pub mod parser;
pub mod tokenizer;

use crate::extracted::ExtractedMetadata;
use crate::requirement_parse::parse_requirement;
use ast::Expr;
use eval::{find_setup_call, Evaluator, Value};
use std::path::Path;
use wheelwright_core::{Error, PackageName, Requirement, Result};

/// The interpreter facts the partial evaluator is seeded with. The
/// original extracts metadata by actually importing `setup.py` under
/// the running interpreter; this port instead folds against a
/// declared `(sys.version_info, platform.system())` pair so the
/// result is deterministic regardless of the host running the tool.
#[derive(Debug, Clone)]
pub struct InterpreterEnv {
    pub version_info: (i64, i64, i64, String, i64),
    pub platform_system: String,
}

impl Default for InterpreterEnv {
    fn default() -> Self {
        Self {
            version_info: (3, 11, 0, "final".to_string(), 0),
            platform_system: "Linux".to_string(),
        }
    }
}

/// Extract metadata from `setup.py` using the default interpreter
/// environment (current-generation CPython on Linux).
///
/// # Errors
/// See [`extract_with_env`].
pub fn extract(source_dir: &Path) -> Result<ExtractedMetadata> {
    extract_with_env(source_dir, InterpreterEnv::default())
}

/// Extract metadata from `setup.py` under a specific interpreter
/// environment.
///
/// # Errors
/// Returns `Error::MetadataMissing` if `setup.py` doesn't exist,
/// `Error::MetadataMalformed` if no `setup(...)`/`setuptools.setup(...)`
/// call can be found or a keyword has the wrong shape, and
/// `Error::PartialEvaluationInsufficient` if a keyword's value can't
/// be folded to a concrete literal.
pub fn extract_with_env(source_dir: &Path, env: InterpreterEnv) -> Result<ExtractedMetadata> {
    let path = source_dir.join("setup.py");
    let text = std::fs::read_to_string(&path).map_err(|_| Error::metadata_missing(source_dir))?;

    let tokens = tokenizer::tokenize(&text);
    let stmts = parser::Parser::new(&tokens).parse_module();

    let mut evaluator = Evaluator::new(
        (
            env.version_info.0,
            env.version_info.1,
            env.version_info.2,
            env.version_info.3.as_str(),
            env.version_info.4,
        ),
        &env.platform_system,
    );
    evaluator.run(&stmts);

    let (_, keywords) = find_setup_call(&stmts)
        .ok_or_else(|| Error::metadata_malformed(path.clone(), "no setup() call found"))?;

    let name = get_str_keyword(&evaluator, &keywords, &path, "name")?
        .ok_or_else(|| Error::metadata_malformed(path.clone(), "setup() is missing 'name'"))?;

    let build_deps = get_str_list_keyword(&evaluator, &keywords, &path, "setup_requires")?
        .into_iter()
        .filter_map(|s| parse_requirement(&s).ok())
        .collect();
    let deps = get_str_list_keyword(&evaluator, &keywords, &path, "install_requires")?
        .into_iter()
        .filter_map(|s| parse_requirement(&s).ok())
        .collect::<Vec<Requirement>>();

    Ok(ExtractedMetadata {
        name: PackageName::new(name),
        build_deps,
        deps,
    })
}

fn get_str_keyword(
    evaluator: &Evaluator,
    keywords: &[(String, Expr)],
    path: &Path,
    key: &str,
) -> Result<Option<String>> {
    let Some((_, expr)) = keywords.iter().find(|(k, _)| k == key) else {
        return Ok(None);
    };
    match evaluator.eval(expr)? {
        Value::Str(s) => Ok(Some(s)),
        _ => Err(Error::metadata_malformed(
            path.to_path_buf(),
            format!("'{key}' did not evaluate to a string"),
        )),
    }
}

/// Reads a list-of-strings keyword, rejecting any element that isn't
/// a string — the Rust equivalent of the original's `_getArray(name,
/// tp)` type check.
fn get_str_list_keyword(
    evaluator: &Evaluator,
    keywords: &[(String, Expr)],
    path: &Path,
    key: &str,
) -> Result<Vec<String>> {
    let Some((_, expr)) = keywords.iter().find(|(k, _)| k == key) else {
        return Ok(Vec::new());
    };
    let items = match evaluator.eval(expr)? {
        Value::List(items) | Value::Tuple(items) => items,
        _ => {
            return Err(Error::metadata_malformed(
                path.to_path_buf(),
                format!("'{key}' did not evaluate to a list"),
            ));
        }
    };
    items
        .into_iter()
        .map(|v| match v {
            Value::Str(s) => Ok(s),
            _ => Err(Error::metadata_malformed(
                path.to_path_buf(),
                format!("'{key}' contains a non-string entry"),
            )),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn extracts_simple_setup_call() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("setup.py"),
            "from setuptools import setup\n\nsetup(\n    name=\"left-pad\",\n    install_requires=[\"six\"],\n)\n",
        )
        .unwrap();
        let extracted = extract(dir.path()).unwrap();
        assert_eq!(extracted.name.as_str(), "left-pad");
        assert_eq!(extracted.deps.len(), 1);
    }

    #[test]
    fn folds_version_gated_install_requires() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("setup.py"),
            "install_requires = [\"six\"]\nif sys.version_info[0] == 2:\n    install_requires.append(\"futures\")\nsetup(name=\"x\", install_requires=install_requires)\n",
        )
        .unwrap();

        let py2 = InterpreterEnv {
            version_info: (2, 7, 18, "final".to_string(), 0),
            platform_system: "Linux".to_string(),
        };
        let extracted = extract_with_env(dir.path(), py2).unwrap();
        assert_eq!(extracted.deps.len(), 2);

        let py3 = InterpreterEnv::default();
        let extracted = extract_with_env(dir.path(), py3).unwrap();
        assert_eq!(extracted.deps.len(), 1);
    }

    #[test]
    fn missing_setup_py_is_metadata_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract(dir.path()).unwrap_err();
        assert!(matches!(err, Error::MetadataMissing { .. }));
    }

    #[test]
    fn missing_name_is_metadata_malformed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("setup.py"), "setup(install_requires=[\"six\"])\n").unwrap();
        let err = extract(dir.path()).unwrap_err();
        assert!(matches!(err, Error::MetadataMalformed { .. }));
    }

    #[test]
    fn non_string_list_entry_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("setup.py"),
            "setup(name=\"x\", install_requires=[1, 2])\n",
        )
        .unwrap();
        let err = extract(dir.path()).unwrap_err();
        assert!(matches!(err, Error::MetadataMalformed { .. }));
    }
}
