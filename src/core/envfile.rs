//! Dotenv-style file parsing and formatting.
//!
//! Local dev resolution overlays a `.env` file from the project root onto
//! the process environment. Parsing is deliberately simple: KEY=value lines,
//! comments and blanks skipped, surrounding quotes stripped.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

/// Load a `.env` file into a key-value map.
pub fn load(path: &Path) -> Result<BTreeMap<String, String>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(parse(&contents))
}

/// Parse dotenv-style contents.
pub fn parse(contents: &str) -> BTreeMap<String, String> {
    let mut pairs = BTreeMap::new();

    for line in contents.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_matches('"').trim_matches('\'');
            pairs.insert(key.to_string(), value.to_string());
        }
    }

    pairs
}

/// Format a pair as a shell `export` line.
///
/// Values with any shell-special character are double-quoted, with `\`,
/// `"`, `$`, and backticks escaped, so `eval "$(kiln env)"` reproduces the
/// value verbatim.
pub fn export_line(key: &str, value: &str) -> String {
    if !value.is_empty() && value.chars().all(is_plain) {
        return format!("export {}={}", key, value);
    }

    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("export {}=\"{}\"", key, escaped)
}

fn is_plain(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | ':' | '@' | '+' | ',')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_pairs() {
        let pairs = parse("KEY1=value1\nKEY2=value2\n");
        assert_eq!(pairs.get("KEY1").unwrap(), "value1");
        assert_eq!(pairs.get("KEY2").unwrap(), "value2");
    }

    #[test]
    fn skips_comments_and_blanks() {
        let pairs = parse("# comment\n\nKEY=value\n   \n# another\n");
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs.get("KEY").unwrap(), "value");
    }

    #[test]
    fn strips_quotes() {
        let pairs = parse("A=\"quoted value\"\nB='single quoted'\n");
        assert_eq!(pairs.get("A").unwrap(), "quoted value");
        assert_eq!(pairs.get("B").unwrap(), "single quoted");
    }

    #[test]
    fn keeps_equals_in_values() {
        let pairs = parse("URL=postgres://u:p@host/db?sslmode=require\n");
        assert_eq!(
            pairs.get("URL").unwrap(),
            "postgres://u:p@host/db?sslmode=require"
        );
    }

    #[test]
    fn export_lines_quote_when_needed() {
        assert_eq!(export_line("A", "plain"), "export A=plain");
        assert_eq!(export_line("B", "two words"), "export B=\"two words\"");
        assert_eq!(export_line("C", "a=b"), "export C=\"a=b\"");
        assert_eq!(export_line("D", ""), "export D=\"\"");
    }

    #[test]
    fn export_lines_escape_shell_specials() {
        assert_eq!(export_line("A", r#"pa"ss"#), r#"export A="pa\"ss""#);
        assert_eq!(export_line("B", "p$ss"), r#"export B="p\$ss""#);
        assert_eq!(export_line("C", "a`date`b"), r#"export C="a\`date\`b""#);
        assert_eq!(export_line("D", r"back\slash"), r#"export D="back\\slash""#);
    }
}
