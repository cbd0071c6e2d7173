//! The two parties sharing expenses.
//!
//! Records store party *names*; the engine only ever reasons about the two
//! roles [`Party::A`] and [`Party::B`]. [`Parties`] is the startup
//! configuration mapping roles to display names and allow-listed identities.

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    A,
    B,
}

impl Party {
    pub const BOTH: [Party; 2] = [Party::A, Party::B];

    /// The counterpart of this party.
    #[must_use]
    pub const fn other(self) -> Party {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// Deployment-time description of one party.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PartyConfig {
    /// Display name, stored verbatim on records.
    pub name: String,
    /// Email the identity provider reports for this party.
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parties {
    a: PartyConfig,
    b: PartyConfig,
}

impl Parties {
    /// Validates and builds the party pair.
    ///
    /// Names must be non-empty and distinct; emails must be distinct
    /// (case-insensitive).
    pub fn new(a: PartyConfig, b: PartyConfig) -> ResultEngine<Self> {
        let a = normalize(a)?;
        let b = normalize(b)?;
        if a.name == b.name {
            return Err(EngineError::InvalidParty(format!(
                "both parties are named '{}'",
                a.name
            )));
        }
        if a.email == b.email {
            return Err(EngineError::InvalidParty(format!(
                "both parties use the identity '{}'",
                a.email
            )));
        }
        Ok(Self { a, b })
    }

    fn config(&self, party: Party) -> &PartyConfig {
        match party {
            Party::A => &self.a,
            Party::B => &self.b,
        }
    }

    /// Display name of a party.
    pub fn name(&self, party: Party) -> &str {
        &self.config(party).name
    }

    /// Allow-listed email of a party.
    pub fn email(&self, party: Party) -> &str {
        &self.config(party).email
    }

    /// Resolves a stored name into a party role, if it is one of the two.
    pub fn resolve(&self, name: &str) -> Option<Party> {
        Party::BOTH
            .into_iter()
            .find(|party| self.name(*party) == name)
    }

    /// Like [`Parties::resolve`], but reports an unknown name as an error.
    pub fn require(&self, name: &str) -> ResultEngine<Party> {
        self.resolve(name)
            .ok_or_else(|| EngineError::InvalidParty(format!("'{name}' is not a known party")))
    }

    /// Maps a signed-in identity to the party it belongs to.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Identities outside the allow-list map to `None`.
    pub fn party_for_email(&self, email: &str) -> Option<Party> {
        let email = email.trim().to_lowercase();
        Party::BOTH
            .into_iter()
            .find(|party| self.email(*party) == email)
    }
}

fn normalize(config: PartyConfig) -> ResultEngine<PartyConfig> {
    let name = config.name.trim().to_string();
    if name.is_empty() {
        return Err(EngineError::InvalidParty(
            "party name must not be empty".to_string(),
        ));
    }
    let email = config.email.trim().to_lowercase();
    if email.is_empty() {
        return Err(EngineError::InvalidParty(format!(
            "party '{name}' has no identity"
        )));
    }
    Ok(PartyConfig { name, email })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::parties;

    #[test]
    fn resolves_names_and_identities() {
        let parties = parties();
        assert_eq!(parties.resolve("Ashwin"), Some(Party::A));
        assert_eq!(parties.resolve("Pooja"), Some(Party::B));
        assert_eq!(parties.resolve("Mallory"), None);
        assert_eq!(
            parties.party_for_email(" Pooja@Example.com "),
            Some(Party::B)
        );
        assert_eq!(parties.party_for_email("mallory@example.com"), None);
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = Parties::new(
            PartyConfig {
                name: "Sam".to_string(),
                email: "a@example.com".to_string(),
            },
            PartyConfig {
                name: " Sam ".to_string(),
                email: "b@example.com".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidParty(_)));
    }

    #[test]
    fn other_is_an_involution() {
        for party in Party::BOTH {
            assert_ne!(party.other(), party);
            assert_eq!(party.other().other(), party);
        }
    }
}
