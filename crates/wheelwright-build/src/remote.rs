//! Out-of-process build invocation: a child process (a fresh copy of
//! this same binary invoked with its worker entry point) is handed the
//! source/out directories over stdin as JSON, and reports its result
//! on stdout framed by a random [`Cookie`] so that whatever a build
//! backend itself prints to stdout can't be mistaken for the payload.

use crate::cookie::Cookie;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use wheelwright_core::{Error, Result};

#[derive(Debug, Serialize)]
struct RemoteArgs<'a> {
    pkg: &'a str,
    #[serde(rename = "outDir")]
    out_dir: &'a str,
    cookie: CookiePair,
}

#[derive(Debug, Serialize, Deserialize)]
struct CookiePair {
    start: String,
    end: String,
}

#[derive(Debug, Deserialize)]
struct RemoteResult {
    wheel: Option<String>,
    error: Option<serde_json::Value>,
}

/// Run a build by spawning `command` as a child process: write a
/// [`RemoteArgs`]-shaped JSON payload to its stdin, then read back a
/// cookie-wrapped [`RemoteResult`] JSON document from its stdout.
///
/// The caller is responsible for pointing `command` at a worker
/// invocation that speaks this protocol (the same `wheelwright`
/// binary re-invoked with its internal build-worker entry point).
///
/// # Errors
/// Returns `Error::BuildFailed` if the child can't be spawned, its
/// stdout can't be parsed once unwrapped, or it reports an `error`.
pub fn build_wheel_remote(
    mut command: Command,
    source_dir: &Path,
    out_dir: &Path,
) -> Result<PathBuf> {
    let cookie = Cookie::new();
    let (start, end) = cookie.as_pair();
    let args = RemoteArgs {
        pkg: &source_dir.to_string_lossy(),
        out_dir: &out_dir.to_string_lossy(),
        cookie: CookiePair {
            start: start.to_string(),
            end: end.to_string(),
        },
    };
    let payload = serde_json::to_string(&args)
        .map_err(|e| Error::build_failed(source_dir, format!("failed to serialize remote build args: {e}")))?;

    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| Error::build_failed(source_dir, format!("failed to spawn remote builder: {e}")))?;

    child
        .stdin
        .take()
        .expect("stdin was requested as piped")
        .write_all(payload.as_bytes())
        .map_err(|e| Error::build_failed(source_dir, format!("failed to write remote builder stdin: {e}")))?;

    let output = child
        .wait_with_output()
        .map_err(|e| Error::build_failed(source_dir, format!("remote builder did not exit cleanly: {e}")))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let (inner, _pre, _post) = cookie.unwrap(&stdout);

    let result: RemoteResult = serde_json::from_str(inner).map_err(|e| {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Error::build_failed(
            source_dir,
            format!("could not parse remote builder result: {e}; stderr: {stderr}"),
        )
    })?;

    if let Some(wheel) = result.wheel {
        return Ok(PathBuf::from(wheel));
    }

    let cause = result
        .error
        .map(|v| v.to_string())
        .unwrap_or_else(|| "remote builder reported failure with no details".to_string());
    Err(Error::build_failed(source_dir, cause))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_is_build_failed() {
        let dir = tempfile::tempdir().unwrap();
        let command = Command::new("wheelwright-build-worker-that-does-not-exist");
        let err = build_wheel_remote(command, dir.path(), dir.path()).unwrap_err();
        assert!(matches!(err, Error::BuildFailed { .. }));
    }

    #[test]
    fn recovers_wheel_path_from_cookie_wrapped_echo() {
        // `cat` mirrors stdin straight to stdout, standing in for a
        // real worker process to exercise the unwrap+parse path
        // without spawning python.
        let cookie = Cookie::new();
        let body = r#"{"wheel":"/out/left_pad-1.0-py3-none-any.whl"}"#;
        let wrapped = cookie.wrap(body);

        let mut child = Command::new("cat")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .unwrap();
        child
            .stdin
            .take()
            .unwrap()
            .write_all(wrapped.as_bytes())
            .unwrap();
        let output = child.wait_with_output().unwrap();
        let stdout = String::from_utf8_lossy(&output.stdout);
        let (inner, _, _) = cookie.unwrap(&stdout);
        let result: RemoteResult = serde_json::from_str(inner).unwrap();
        assert_eq!(result.wheel.unwrap(), "/out/left_pad-1.0-py3-none-any.whl");
    }
}
