//! Argument vector sources and normalization.

use crate::error::TaprootError;
use log::debug;
use std::path::MAIN_SEPARATOR;

/// An argument vector accepted at component construction.
///
/// Either pre-split tokens (for example the process argument list, which is
/// copied on conversion) or a single command line that is shell-tokenized
/// during normalization.
#[derive(Debug, Clone)]
pub enum ArgSource {
    /// Pre-split argument tokens.
    Tokens(Vec<String>),
    /// One command line, split with shell quoting rules.
    Line(String),
}

impl Default for ArgSource {
    fn default() -> Self {
        ArgSource::Tokens(Vec::new())
    }
}

impl ArgSource {
    /// Produce the normalized token vector: tokenize a command line and drop
    /// a leading token that names the invoking program.
    pub(super) fn normalize(self) -> Result<Vec<String>, TaprootError> {
        let mut tokens = match self {
            ArgSource::Tokens(tokens) => tokens,
            ArgSource::Line(line) => shell_words::split(&line)
                .map_err(|err| TaprootError::InvalidArgument(err.to_string()))?,
        };
        if tokens
            .first()
            .is_some_and(|token| looks_like_program_path(token))
        {
            debug!("dropping program token (token={})", tokens[0]);
            tokens.remove(0);
        }
        Ok(tokens)
    }
}

/// A leading token is treated as the invoking program path when it carries a
/// path separator or the platform executable suffix.
fn looks_like_program_path(token: &str) -> bool {
    if token.starts_with('-') {
        return false;
    }
    let exe_suffix = std::env::consts::EXE_SUFFIX;
    token.contains(MAIN_SEPARATOR)
        || token.contains('/')
        || (!exe_suffix.is_empty() && token.ends_with(exe_suffix))
}

impl From<Vec<String>> for ArgSource {
    fn from(tokens: Vec<String>) -> Self {
        ArgSource::Tokens(tokens)
    }
}

impl From<&[&str]> for ArgSource {
    fn from(tokens: &[&str]) -> Self {
        ArgSource::Tokens(tokens.iter().map(|token| token.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ArgSource {
    fn from(tokens: [&str; N]) -> Self {
        ArgSource::Tokens(tokens.iter().map(|token| token.to_string()).collect())
    }
}

impl From<String> for ArgSource {
    fn from(line: String) -> Self {
        ArgSource::Line(line)
    }
}

impl From<&str> for ArgSource {
    fn from(line: &str) -> Self {
        ArgSource::Line(line.to_string())
    }
}

impl From<std::env::Args> for ArgSource {
    fn from(args: std::env::Args) -> Self {
        ArgSource::Tokens(args.collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn line_source_is_shell_tokenized() {
        let source = ArgSource::from("--service_name 'Big Dog' --verbose");
        let tokens = source.normalize().expect("tokens");
        assert_eq!(tokens, vec!["--service_name", "Big Dog", "--verbose"]);
    }

    #[test]
    fn malformed_line_is_an_invalid_argument() {
        let err = ArgSource::from("--service_name 'unterminated")
            .normalize()
            .unwrap_err();
        assert!(matches!(err, TaprootError::InvalidArgument(_)));
    }

    /// A leading program path is dropped; a leading flag is not.
    #[test]
    fn leading_program_token_is_dropped() {
        let tokens = ArgSource::from(vec!["./greeter".to_string(), "--verbose".to_string()])
            .normalize()
            .expect("tokens");
        assert_eq!(tokens, vec!["--verbose"]);

        let tokens = ArgSource::from(["--verbose"]).normalize().expect("tokens");
        assert_eq!(tokens, vec!["--verbose"]);
    }

    #[test]
    fn bare_leading_token_is_kept() {
        let tokens = ArgSource::from(["input.dat", "--verbose"])
            .normalize()
            .expect("tokens");
        assert_eq!(tokens, vec!["input.dat", "--verbose"]);
    }

    #[test]
    fn default_source_is_empty() {
        let tokens = ArgSource::default().normalize().expect("tokens");
        assert!(tokens.is_empty());
    }
}
