use std::ops::RangeInclusive;

use super::CommandError;

/// Splits a raw argument string into tokens.
///
/// Tokens are separated by whitespace. A token starting with `"` runs to the
/// next unescaped `"`; inside it `\"` and `\\` are unescaped and any other
/// backslash is kept. A closing quote must be followed by whitespace or the
/// end of input.
pub fn split_arguments(input: &str) -> Result<Vec<String>, &'static str> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let Some(&first) = chars.peek() else {
            return Ok(tokens);
        };

        let mut token = String::new();
        if first == '"' {
            chars.next();
            loop {
                match chars.next() {
                    None => return Err("unterminated quoted argument"),
                    Some('"') => break,
                    Some('\\') => match chars.peek() {
                        Some(&next) if next == '"' || next == '\\' => {
                            token.push(next);
                            chars.next();
                        }
                        _ => token.push('\\'),
                    },
                    Some(c) => token.push(c),
                }
            }
            if chars.peek().is_some_and(|c| !c.is_whitespace()) {
                return Err("closing quote must be followed by whitespace");
            }
        } else {
            while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                token.push(c);
            }
        }
        tokens.push(token);
    }
}

/// Splits `input` and checks the argument count, failing with the command's
/// usage text otherwise.
pub fn parse_arguments(
    input: &str,
    expected: RangeInclusive<usize>,
    usage: &'static str,
) -> Result<Vec<String>, CommandError> {
    let args = split_arguments(input).map_err(|_| CommandError::Usage(usage))?;
    if expected.contains(&args.len()) {
        Ok(args)
    } else {
        Err(CommandError::Usage(usage))
    }
}
