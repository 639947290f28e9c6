//! In-band framing for an out-of-process build invocation's stdout: a
//! random cookie pair wraps the child's JSON result so the parent can
//! recover it amid whatever informational noise the build backend
//! prints.

use rand::Rng;

const LENGTH: usize = 32;
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

fn gen_cookie() -> String {
    let mut rng = rand::thread_rng();
    (0..LENGTH)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// A start/end cookie pair used to frame a child process's result.
///
/// `wrap` surrounds the payload with the *reversed* cookie strings —
/// matching the original's `[::-1]` framing — so that noise merely
/// containing the forward-spelled cookie can't be mistaken for the
/// real sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    start: String,
    end: String,
}

impl Cookie {
    /// Generate a fresh random cookie pair.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: gen_cookie(),
            end: gen_cookie(),
        }
    }

    /// Build a cookie from a known start/end pair (for deserializing
    /// a parent-to-child handoff).
    #[must_use]
    pub fn from_pair(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// The `(start, end)` pair, for serializing to a child's stdin.
    #[must_use]
    pub fn as_pair(&self) -> (&str, &str) {
        (&self.start, &self.end)
    }

    /// Wrap `data` with the reversed start/end sentinels.
    #[must_use]
    pub fn wrap(&self, data: &str) -> String {
        let mut out = String::with_capacity(data.len() + 2 * LENGTH);
        out.push_str(&reversed(&self.start));
        out.push_str(data);
        out.push_str(&reversed(&self.end));
        out
    }

    /// Recover the inner payload and whatever surrounded it.
    ///
    /// Mirrors the original: if the start sentinel isn't found, the
    /// whole input is treated as having no pre-context; same for the
    /// end sentinel and post-context.
    #[must_use]
    pub fn unwrap<'a>(&self, data: &'a str) -> (&'a str, &'a str, &'a str) {
        let start_sentinel = reversed(&self.start);
        let (pre, rest) = match data.find(&start_sentinel) {
            Some(idx) => (&data[..idx], &data[idx + LENGTH..]),
            None => ("", data),
        };

        let end_sentinel = reversed(&self.end);
        let (inner, post) = match rest.find(&end_sentinel) {
            Some(idx) => (&rest[..idx], &rest[idx + LENGTH..]),
            None => (rest, ""),
        };

        (inner, pre, post)
    }
}

impl Default for Cookie {
    fn default() -> Self {
        Self::new()
    }
}

fn reversed(s: &str) -> String {
    s.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_then_unwrap_recovers_exact_payload() {
        let cookie = Cookie::new();
        let wrapped = cookie.wrap(r#"{"wheel":"left_pad-1.0-py3-none-any.whl"}"#);
        let (inner, pre, post) = cookie.unwrap(&wrapped);
        assert_eq!(inner, r#"{"wheel":"left_pad-1.0-py3-none-any.whl"}"#);
        assert_eq!(pre, "");
        assert_eq!(post, "");
    }

    #[test]
    fn surrounding_noise_is_recovered_separately() {
        let cookie = Cookie::new();
        let wrapped = format!("noisy preamble\n{}\ntrailing noise", cookie.wrap("payload"));
        let (inner, pre, post) = cookie.unwrap(&wrapped);
        assert_eq!(inner, "payload");
        assert_eq!(pre, "noisy preamble\n");
        assert_eq!(post, "\ntrailing noise");
    }

    #[test]
    fn missing_sentinels_returns_whole_input_as_inner() {
        let cookie = Cookie::new();
        let (inner, pre, post) = cookie.unwrap("no cookies here");
        assert_eq!(inner, "no cookies here");
        assert_eq!(pre, "");
        assert_eq!(post, "");
    }

    #[test]
    fn from_pair_round_trips_with_new() {
        let cookie = Cookie::new();
        let (start, end) = cookie.as_pair();
        let rebuilt = Cookie::from_pair(start, end);
        let wrapped = cookie.wrap("x");
        assert_eq!(rebuilt.unwrap(&wrapped).0, "x");
    }
}
