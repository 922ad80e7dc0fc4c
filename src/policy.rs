use crate::{error::ConfigError, line::Line};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, str::FromStr};

/// How an instruction name is recognised on a line.
///
/// Both policies compare ASCII-case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    /// The name must be the line's entire first token. Names appearing later
    /// on the line are never found.
    #[serde(alias = "token")]
    TokenEquality,
    /// The first occurrence of the name anywhere in the line counts, as long
    /// as only whitespace precedes it and no identifier character follows it.
    /// The rest of the line after the occurrence is not inspected.
    #[serde(alias = "substring")]
    SubstringIsolation,
}

impl Default for MatchPolicy {
    fn default() -> MatchPolicy {
        MatchPolicy::TokenEquality
    }
}

lazy_static! {
    static ref POLICY_MAP: HashMap<&'static str, MatchPolicy> = vec!(
        ("token", MatchPolicy::TokenEquality),
        ("token-equality", MatchPolicy::TokenEquality),
        ("substring", MatchPolicy::SubstringIsolation),
        ("substring-isolation", MatchPolicy::SubstringIsolation),
    )
    .into_iter()
    .collect();
}

impl FromStr for MatchPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<MatchPolicy, ConfigError> {
        POLICY_MAP
            .get(s.to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| ConfigError::UnknownPolicy(s.to_owned()))
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchPolicy::TokenEquality => f.write_str("token-equality"),
            MatchPolicy::SubstringIsolation => f.write_str("substring-isolation"),
        }
    }
}

impl MatchPolicy {
    /// `folded_name` must already be ASCII lower case and non-empty.
    pub(crate) fn matches(self, folded_name: &str, line: &Line) -> bool {
        match self {
            MatchPolicy::TokenEquality => line.first_token().eq_ignore_ascii_case(folded_name),
            MatchPolicy::SubstringIsolation => substring_isolated(folded_name, line.text()),
        }
    }
}

fn is_identifier_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

fn substring_isolated(folded_name: &str, text: &str) -> bool {
    // ASCII lower-casing keeps byte offsets stable.
    let folded_text = text.to_ascii_lowercase();

    let start = match folded_text.find(folded_name) {
        Some(ix) => ix,
        None => return false,
    };
    let end = start + folded_name.len();

    if let Some(&next) = folded_text.as_bytes().get(end) {
        if is_identifier_char(next) {
            return false;
        }
    }

    folded_text[..end].trim() == folded_name
}
