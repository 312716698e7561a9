use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Canonical upstream service identifiers used in logs and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Reddit,
    Yahoo,
    HuggingFace,
}

impl ProviderId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reddit => "reddit",
            Self::Yahoo => "yahoo",
            Self::HuggingFace => "huggingface",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
