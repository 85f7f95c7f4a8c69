use std::fmt;

use crate::duplicates::DuplicateKey;

#[derive(Debug)]
pub enum ReconcileError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// A side repeats an identity or secondary key and the options reject duplicates.
    DuplicateKeys(Vec<DuplicateKey>),
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::DuplicateKeys(dups) => {
                writeln!(f, "duplicate keys found:")?;
                for dup in dups {
                    writeln!(
                        f,
                        "  {} {} {} appears {} times",
                        dup.side.as_str(),
                        dup.kind.as_str(),
                        dup.key,
                        dup.count
                    )?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ReconcileError {}
