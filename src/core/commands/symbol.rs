use super::{parse_arguments, CommandError, ShellCommand, ShellStatus};
use crate::core::env::{Environment, Symbol};

const USAGE: &str = "symbol PROMPT|MORELINES|MULTILINE [CHAR]";

#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolCommand;

impl ShellCommand for SymbolCommand {
    fn name(&self) -> &'static str {
        "symbol"
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "Usage: symbol PROMPT|MORELINES|MULTILINE [CHAR]",
            "Shows the character used for a special symbol, or replaces it with CHAR.",
            "PROMPT ends the prompt, MORELINES continues a line when typed last,",
            "MULTILINE starts every continuation line.",
        ]
    }

    fn execute(
        &self,
        env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, CommandError> {
        let args = parse_arguments(arguments, 1..=2, USAGE)?;
        let symbol: Symbol = args[0].parse().map_err(|_| {
            CommandError::InvalidArguments(format!("unknown symbol '{}'", args[0]))
        })?;

        let Some(value) = args.get(1) else {
            env.writeln(&format!("Symbol for {} is '{}'", symbol, env.symbol(symbol)))?;
            return Ok(ShellStatus::Continue);
        };

        let mut chars = value.chars();
        let new_char = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(CommandError::InvalidArguments(format!(
                    "'{}' is not a single character",
                    value
                )))
            }
        };

        let old_char = env.symbol(symbol);
        env.set_symbol(symbol, new_char)?;
        env.writeln(&format!(
            "Symbol for {} changed from '{}' to '{}'",
            symbol, old_char, new_char
        ))?;
        Ok(ShellStatus::Continue)
    }
}
