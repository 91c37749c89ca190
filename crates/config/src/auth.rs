//! GitHub token resolution.
//!
//! The token is read from a single environment variable, [`GITHUB_AUTH`],
//! once, at startup. Libraries receive it explicitly rather than reading the
//! environment themselves.

use secrecy::SecretString;

/// Environment variable holding the GitHub token.
pub const GITHUB_AUTH: &str = "GITHUB_AUTH";

/// Reads the GitHub token from the [`GITHUB_AUTH`] environment variable.
///
/// Returns `None` when the variable is unset or empty. A value made only of
/// whitespace (such as a stray newline from `$(cat token)`) counts as unset.
/// Other values are trimmed before use.
///
/// # Examples
///
/// ```no_run
/// use relnotes_config::auth::token_from_env;
///
/// match token_from_env() {
///     Some(_) => println!("token available"),
///     None => eprintln!("set GITHUB_AUTH"),
/// }
/// ```
#[must_use]
pub fn token_from_env() -> Option<SecretString> {
    resolve_token(|name| std::env::var(name).ok())
}

/// Resolves the GitHub token through `lookup`.
///
/// `lookup` is called once with [`GITHUB_AUTH`]. Surrounding whitespace is
/// stripped; an empty result counts as no token.
///
/// # Examples
///
/// ```
/// use secrecy::ExposeSecret;
/// use relnotes_config::auth::resolve_token;
///
/// let token = resolve_token(|_| Some(" ghp_xxx\n".to_string())).unwrap();
/// assert_eq!(token.expose_secret(), "ghp_xxx");
///
/// assert!(resolve_token(|_| Some(String::new())).is_none());
/// ```
#[must_use]
pub fn resolve_token(lookup: impl FnOnce(&str) -> Option<String>) -> Option<SecretString> {
    lookup(GITHUB_AUTH)
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .map(SecretString::from)
}
