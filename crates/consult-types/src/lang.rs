//! Spoken-language selection.
//!
//! The agent adapts its speech pipeline (STT/TTS) to the language the caller
//! selects before starting the call. The selection travels over the `lang`
//! data-channel topic as the UTF-8 bytes of the two-letter code.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Languages the remote agent's speech pipeline supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// English (default).
    #[default]
    En,
    /// Hindi.
    Hi,
    /// Bengali.
    Bn,
}

impl Lang {
    /// The two-letter wire code sent on the `lang` topic.
    pub fn as_code(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Hi => "hi",
            Lang::Bn => "bn",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

/// Error returned when a string is not a supported language code.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported language code: {0}")]
pub struct LangParseError(pub String);

impl FromStr for Lang {
    type Err = LangParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Lang::En),
            "hi" => Ok(Lang::Hi),
            "bn" => Ok(Lang::Bn),
            other => Err(LangParseError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_round_trip() {
        for lang in [Lang::En, Lang::Hi, Lang::Bn] {
            assert_eq!(lang.as_code().parse::<Lang>().unwrap(), lang);
        }
    }

    #[test]
    fn default_is_english() {
        assert_eq!(Lang::default(), Lang::En);
    }

    #[test]
    fn rejects_unknown_code() {
        let err = "fr".parse::<Lang>().unwrap_err();
        assert_eq!(err, LangParseError("fr".to_string()));
    }

    #[test]
    fn serde_uses_lowercase_codes() {
        assert_eq!(serde_json::to_string(&Lang::Hi).unwrap(), "\"hi\"");
        let parsed: Lang = serde_json::from_str("\"bn\"").unwrap();
        assert_eq!(parsed, Lang::Bn);
    }
}
