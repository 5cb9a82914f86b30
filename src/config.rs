use crate::core::{Cell, DatabaseError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Entries of a flat configuration file, keyed by name.
pub type ConfigEntries = HashMap<String, Cell>;

/// `NAME=VALUE` with exactly one separator. The name may be empty, the
/// value may not.
static ENTRY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^=]*)=([^=]+)$").expect("entry pattern is valid"));

/// Loads a flat `NAME=VALUE` configuration file.
///
/// Lines starting with `#` are comments. Any other line that does not follow
/// the pattern aborts the whole load. Later entries overwrite earlier ones.
///
/// # Example
///
/// ```no_run
/// use databaselib::config::read_configuration_file;
///
/// let entries = read_configuration_file("database.conf")?;
/// println!("{:?}", entries.get("path"));
/// # Ok::<(), databaselib::core::DatabaseError>(())
/// ```
pub fn read_configuration_file<P: AsRef<Path>>(path: P) -> Result<ConfigEntries> {
    let content = fs::read_to_string(path)?;
    parse_configuration(&content)
}

/// Parses configuration text already held in memory.
pub fn parse_configuration(content: &str) -> Result<ConfigEntries> {
    let mut entries = ConfigEntries::new();
    for line in content.lines() {
        if line.starts_with('#') {
            continue;
        }
        let captures = ENTRY_PATTERN.captures(line).ok_or_else(|| {
            DatabaseError::ConfigParse(format!(
                "Line '{}' does not follow pattern 'NAME=VALUE'",
                line
            ))
        })?;
        entries.insert(captures[1].to_string(), Cell::from(&captures[2]));
    }
    Ok(entries)
}

/// Looks up a mandatory entry.
pub fn require<'a>(entries: &'a ConfigEntries, key: &str) -> Result<&'a Cell> {
    entries.get(key).ok_or_else(|| {
        DatabaseError::ConfigParse(format!(
            "Missing entry '{}' from configuration file",
            key
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_CONFIG: &str = "\
# connection used by the nightly import
host=db.internal
port=3306
database=inventory
username=importer
password=s3cret
";

    #[test]
    fn test_parse_sample_config() {
        let entries = parse_configuration(SAMPLE_CONFIG).expect("Failed to parse sample config");
        assert_eq!(entries.len(), 5);
        assert_eq!(entries["host"], "db.internal");
        assert_eq!(entries["port"].to_int().unwrap(), 3306);
        assert_eq!(entries["password"], "s3cret");
        assert!(!entries.contains_key("# connection used by the nightly import"));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let entries = parse_configuration("path=a.db\npath=b.db\n").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries["path"], "b.db");
    }

    #[test]
    fn test_crlf_line_endings() {
        let entries = parse_configuration("path=a.db\r\nmode=rw\r\n").unwrap();
        assert_eq!(entries["path"], "a.db");
        assert_eq!(entries["mode"], "rw");
    }

    #[test]
    fn test_malformed_lines_name_the_line() {
        for line in ["path", "path=a=b", "==a.db", "path=", "=", ""] {
            let content = format!("host=x\n{}\nport=1\n", line);
            match parse_configuration(&content) {
                Err(DatabaseError::ConfigParse(msg)) => {
                    assert!(msg.contains(&format!("'{}'", line)), "message was {}", msg)
                }
                other => panic!("Expected ConfigParse for {:?}, got {:?}", line, other),
            }
        }
    }

    #[test]
    fn test_empty_name_is_accepted() {
        let entries = parse_configuration("=a.db\npath=b.db\n").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[""], "a.db");
        assert_eq!(entries["path"], "b.db");
    }

    #[test]
    fn test_comment_lines_are_not_validated() {
        let entries = parse_configuration("#a=b=c\n#\npath=x\n").unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_require_names_missing_key() {
        let entries = parse_configuration("host=x\n").unwrap();
        assert_eq!(require(&entries, "host").unwrap(), "x");
        let err = require(&entries, "port").unwrap_err();
        assert!(err.to_string().contains("Missing entry 'port'"));
    }

    #[test]
    fn test_read_configuration_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# sqlite").unwrap();
        writeln!(file, "path=/var/lib/app/data.db").unwrap();
        let entries = read_configuration_file(file.path()).unwrap();
        assert_eq!(entries["path"], "/var/lib/app/data.db");

        match read_configuration_file("/nonexistent/databaselib.conf") {
            Err(DatabaseError::Io(_)) => {}
            other => panic!("Expected Io error, got {:?}", other),
        }
    }
}
