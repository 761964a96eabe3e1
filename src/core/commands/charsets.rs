use encoding_rs::*;

use super::{parse_arguments, CommandError, ShellCommand, ShellStatus};
use crate::core::env::Environment;

const USAGE: &str = "charsets";

/// Every encoding the shell can decode, sorted by name.
pub fn available() -> Vec<&'static Encoding> {
    let mut encodings = vec![
        BIG5, EUC_JP, EUC_KR, GB18030, GBK, IBM866, ISO_2022_JP, ISO_8859_2, ISO_8859_3,
        ISO_8859_4, ISO_8859_5, ISO_8859_6, ISO_8859_7, ISO_8859_8, ISO_8859_8_I, ISO_8859_10,
        ISO_8859_13, ISO_8859_14, ISO_8859_15, ISO_8859_16, KOI8_R, KOI8_U, MACINTOSH,
        SHIFT_JIS, UTF_16BE, UTF_16LE, UTF_8, WINDOWS_874, WINDOWS_1250, WINDOWS_1251,
        WINDOWS_1252, WINDOWS_1253, WINDOWS_1254, WINDOWS_1255, WINDOWS_1256, WINDOWS_1257,
        WINDOWS_1258, X_MAC_CYRILLIC, X_USER_DEFINED,
    ];
    encodings.sort_by_key(|encoding| encoding.name());
    encodings
}

/// Resolves a charset label such as `utf8` or `Windows-1250`.
pub fn lookup(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes()).filter(|encoding| *encoding != REPLACEMENT)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CharsetsCommand;

impl ShellCommand for CharsetsCommand {
    fn name(&self) -> &'static str {
        "charsets"
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "Usage: charsets",
            "Lists the names of all supported charsets, one per line.",
        ]
    }

    fn execute(
        &self,
        env: &mut dyn Environment,
        arguments: &str,
    ) -> Result<ShellStatus, CommandError> {
        parse_arguments(arguments, 0..=0, USAGE)?;

        for encoding in available() {
            env.writeln(encoding.name())?;
        }
        Ok(ShellStatus::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::testing::{output, setup_test_env};
    use tempfile::tempdir;

    #[test]
    fn test_lookup_labels() {
        assert_eq!(lookup("utf8"), Some(UTF_8));
        assert_eq!(lookup("UTF-8"), Some(UTF_8));
        assert_eq!(lookup("windows-1250"), Some(WINDOWS_1250));
        assert_eq!(lookup("latin2"), Some(ISO_8859_2));
        assert_eq!(lookup("no-such-charset"), None);
        assert_eq!(lookup("iso-2022-kr"), None);
    }

    #[test]
    fn test_lists_charsets() {
        let temp = tempdir().unwrap();
        let mut env = setup_test_env(temp.path());
        CharsetsCommand.execute(&mut env, "").unwrap();

        let out = output(&env);
        let names: Vec<&str> = out.lines().collect();
        assert_eq!(names.len(), available().len());
        assert!(names.contains(&"UTF-8"));
        assert!(names.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_rejects_arguments() {
        let temp = tempdir().unwrap();
        let mut env = setup_test_env(temp.path());
        assert!(matches!(
            CharsetsCommand.execute(&mut env, "x"),
            Err(CommandError::Usage(USAGE))
        ));
    }
}
