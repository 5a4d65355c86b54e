//! Bot credential.

use std::fmt;

use zeroize::Zeroizing;

/// Bot token sent as `Authorization: Bot <token>` on user lookups.
///
/// ## Invariants
/// - the token is non-empty once trimmed.
/// - the secret is wiped from memory on drop and never printed by `Debug`.
///
/// # Examples
/// ```
/// use lookup_gateway::outbound::discord::BotToken;
///
/// let token = BotToken::new("abc.def").expect("non-empty token");
/// assert_eq!(token.authorization().as_str(), "Bot abc.def");
/// assert_eq!(format!("{token:?}"), "BotToken(<redacted>)");
/// assert!(BotToken::new("  ").is_none());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BotToken(Zeroizing<String>);

impl BotToken {
    /// Wrap `raw`, trimming surrounding whitespace. Blank input yields `None`.
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// `Authorization` header value.
    #[must_use]
    pub fn authorization(&self) -> Zeroizing<String> {
        Zeroizing::new(format!("Bot {}", self.0.as_str()))
    }
}

impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BotToken(<redacted>)")
    }
}
