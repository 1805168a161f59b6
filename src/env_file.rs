//! Reading and writing the local `KEY="value"` env file format.

use std::fs;
use std::path::Path;

use crate::types::{EnvEntry, EnvFile, Tier};
use crate::utils::error::{EnvSyncError, Result};

/// Read a local env file into an ordered entry list.
///
/// Blank lines and `#` comments are skipped. Each remaining line is split at
/// the first `=`; a line without `=` becomes a key with an empty value.
/// Values wrapped in double quotes are unquoted with `\"` unescaped.
pub fn read_env_file(path: &Path, tier: &Tier) -> Result<EnvFile> {
    if !path.exists() {
        return Err(EnvSyncError::MissingEnvFile {
            path: path.to_path_buf(),
            tier: tier.label().to_string(),
        });
    }

    let content = fs::read_to_string(path)?;
    let mut file = EnvFile::new(path.to_path_buf());

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (key, raw_value) = split_key_value(trimmed);
        file.insert(key.to_string(), unquote(raw_value));
    }

    Ok(file)
}

/// Split a line at the first `=`. `KEY` alone yields an empty value.
pub fn split_key_value(line: &str) -> (&str, &str) {
    match line.split_once('=') {
        Some((key, value)) => (key, value),
        None => (line, ""),
    }
}

fn unquote(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        raw[1..raw.len() - 1].replace("\\\"", "\"")
    } else {
        raw.to_string()
    }
}

/// Render the full file contents for a tier: the fixed two-line header, a
/// blank line, then one `KEY="value"` line per entry.
pub fn format_env_file(tier: &Tier, entries: &[EnvEntry]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "# Convex {} environment variables\n",
        tier.label()
    ));
    out.push_str("# Managed by envsync - do not commit this file\n");
    out.push('\n');

    for entry in entries {
        out.push_str(&format_entry(entry));
        out.push('\n');
    }

    out
}

pub fn format_entry(entry: &EnvEntry) -> String {
    format!("{}=\"{}\"", entry.key, escape_value(&entry.value))
}

fn escape_value(value: &str) -> String {
    value.replace('"', "\\\"")
}

/// The whole rendered file goes down in a single write, so a degraded remote
/// fetch can never leave a truncated file behind.
pub fn write_env_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn parse(content: &str) -> EnvFile {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env.convex.development");
        fs::write(&path, content).unwrap();
        read_env_file(&path, &Tier::Development).unwrap()
    }

    #[test]
    fn test_skips_comments_and_blank_lines() {
        let file = parse("# header\n\nAPI_KEY=\"abc\"\n  \n# trailing\n");
        assert_eq!(file.entries(), &[EnvEntry::new("API_KEY", "abc")]);
    }

    #[test]
    fn test_unquotes_and_unescapes_values() {
        let file = parse("GREETING=\"say \\\"hi\\\"\"\n");
        assert_eq!(file.entries()[0].value, "say \"hi\"");
    }

    #[test]
    fn test_value_may_contain_equals() {
        let file = parse("URL=\"https://example.test/?a=1&b=2\"\n");
        assert_eq!(file.entries()[0].key, "URL");
        assert_eq!(file.entries()[0].value, "https://example.test/?a=1&b=2");
    }

    #[test]
    fn test_line_without_equals_is_key_with_empty_value() {
        let file = parse("LONE_KEY\n");
        assert_eq!(file.entries(), &[EnvEntry::new("LONE_KEY", "")]);
    }

    #[test]
    fn test_unquoted_value_is_taken_verbatim() {
        let file = parse("RAW=plain text\n");
        assert_eq!(file.entries()[0].value, "plain text");
    }

    #[test]
    fn test_duplicate_key_last_occurrence_wins() {
        let file = parse("A=\"1\"\nB=\"2\"\nA=\"3\"\n");
        assert_eq!(
            file.entries(),
            &[EnvEntry::new("A", "3"), EnvEntry::new("B", "2")]
        );
    }

    #[test]
    fn test_missing_file_error_mentions_pull() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env.convex.production");
        let err = read_env_file(&path, &Tier::Production).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("envsync pull production"));
    }

    #[test]
    fn test_format_includes_header_and_quoting() {
        let entries = vec![EnvEntry::new("API_KEY", "abc")];
        let content = format_env_file(&Tier::Development, &entries);
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "# Convex development environment variables"
        );
        assert!(lines.next().unwrap().contains("do not commit"));
        assert_eq!(lines.next().unwrap(), "");
        assert_eq!(lines.next().unwrap(), "API_KEY=\"abc\"");
    }

    #[test]
    fn test_round_trip_preserves_pairs() {
        let entries = vec![
            EnvEntry::new("PLAIN", "value"),
            EnvEntry::new("QUOTED", "he said \"no\""),
            EnvEntry::new("EQUALS", "a=b=c"),
            EnvEntry::new("EMPTY", ""),
        ];

        let dir = tempdir().unwrap();
        let path = dir.path().join(".env.convex.development");
        let content = format_env_file(&Tier::Development, &entries);
        write_env_file(&path, &content).unwrap();

        let reread = read_env_file(&path, &Tier::Development).unwrap();
        assert_eq!(reread.entries(), entries.as_slice());
    }
}
