//! x25519 keypair used by the reality inbound.

use serde::Serialize;

use crate::domain::credentials::random_hex;

/// Prefix marking a placeholder key that must be replaced before use.
pub const REPLACE_ME_SENTINEL: &str = "REPLACE_ME_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySource {
    /// Typed in by the operator.
    Supplied,
    /// Produced by the external keypair generator.
    Generated,
    /// Random placeholder; no generator was available.
    Fallback,
}

impl KeySource {
    pub fn label(self) -> &'static str {
        match self {
            KeySource::Supplied => "supplied",
            KeySource::Generated => "generated",
            KeySource::Fallback => "placeholder (replace before use)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Keypair {
    pub private_key: String,
    pub public_key: String,
    pub source: KeySource,
}

impl Keypair {
    pub fn supplied(private_key: &str, public_key: &str) -> Self {
        Self {
            private_key: private_key.trim().to_string(),
            public_key: public_key.trim().to_string(),
            source: KeySource::Supplied,
        }
    }

    /// Random hex keys carrying [`REPLACE_ME_SENTINEL`].
    pub fn fallback() -> Self {
        Self {
            private_key: format!("{}{}", REPLACE_ME_SENTINEL, random_hex(32)),
            public_key: format!("{}{}", REPLACE_ME_SENTINEL, random_hex(32)),
            source: KeySource::Fallback,
        }
    }

    /// Parse generator output such as:
    ///
    /// ```text
    /// Private key: 6Ndc...
    /// Public key: hlt3...
    /// ```
    ///
    /// Newer generators print `PrivateKey:` and `Password:` instead; both forms are accepted.
    pub fn parse_generator_output(output: &str) -> Option<Self> {
        let mut private_key = None;
        let mut public_key = None;
        for line in output.lines() {
            let Some((label, value)) = line.split_once(':') else {
                continue;
            };
            let label: String =
                label.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_lowercase();
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match label.as_str() {
                "privatekey" => private_key = Some(value.to_string()),
                "publickey" | "password" => public_key = Some(value.to_string()),
                _ => {}
            }
        }
        Some(Self { private_key: private_key?, public_key: public_key?, source: KeySource::Generated })
    }

    pub fn is_placeholder(&self) -> bool {
        self.source == KeySource::Fallback
    }
}
