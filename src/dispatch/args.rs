//! Argument Extractor

use crate::core::ArgumentError;

/// Extracts the argument of a command message.
///
/// Everything after the first whitespace following the command token is the
/// argument, trimmed on both ends. A command with nothing after it, or with only
/// whitespace after it, has no argument.
///
/// ```
/// use telectl::dispatch::extract_argument;
///
/// assert_eq!(extract_argument("/list  /var/log ").unwrap(), "/var/log");
/// assert!(extract_argument("/list").is_err());
/// ```
pub fn extract_argument(text: &str) -> Result<&str, ArgumentError> {
    let text = text.trim_start();
    match text.split_once(char::is_whitespace) {
        None => Err(ArgumentError::Missing(command_label(text))),
        Some((command, rest)) => {
            let argument = rest.trim();
            if argument.is_empty() {
                Err(ArgumentError::Blank(command_label(command)))
            } else {
                Ok(argument)
            }
        }
    }
}

fn command_label(token: &str) -> String {
    let name = token.strip_prefix('/').unwrap_or(token);
    name.split_once('@').map_or(name, |(name, _)| name).to_string()
}
