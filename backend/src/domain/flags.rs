//! Bitmask flag decoding.
//!
//! Upstream reports user badges and application capabilities as integer
//! bitmasks. A [`FlagTable`] maps each bit to a stable label; a
//! [`FlagDecoder`] turns a mask into the labels whose bit is set, always in
//! table order.

use serde_json::Value;

use super::snowflake::coerce_number;

/// One bit of a flag table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagEntry {
    /// Bit value; always a power of two.
    pub bits: u64,
    /// Label emitted when the bit is set.
    pub label: &'static str,
}

impl FlagEntry {
    /// Create an entry for a single bit.
    #[must_use]
    pub const fn new(bits: u64, label: &'static str) -> Self {
        Self { bits, label }
    }
}

/// Ordered, immutable table of flag entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagTable {
    entries: &'static [FlagEntry],
}

impl FlagTable {
    /// Wrap a static entry list.
    #[must_use]
    pub const fn new(entries: &'static [FlagEntry]) -> Self {
        Self { entries }
    }

    /// Entries in declaration order.
    #[must_use]
    pub const fn entries(&self) -> &'static [FlagEntry] {
        self.entries
    }
}

/// Public user flags, surfaced as profile badges.
pub const USER_FLAGS: FlagTable = FlagTable::new(&[
    FlagEntry::new(1 << 0, "STAFF"),
    FlagEntry::new(1 << 1, "PARTNER"),
    FlagEntry::new(1 << 2, "HYPESQUAD"),
    FlagEntry::new(1 << 3, "BUG_HUNTER_LEVEL_1"),
    FlagEntry::new(1 << 6, "HYPESQUAD_ONLINE_HOUSE_1"),
    FlagEntry::new(1 << 7, "HYPESQUAD_ONLINE_HOUSE_2"),
    FlagEntry::new(1 << 8, "HYPESQUAD_ONLINE_HOUSE_3"),
    FlagEntry::new(1 << 9, "PREMIUM_EARLY_SUPPORTER"),
    FlagEntry::new(1 << 10, "TEAM_PSEUDO_USER"),
    FlagEntry::new(1 << 14, "BUG_HUNTER_LEVEL_2"),
    FlagEntry::new(1 << 16, "VERIFIED_BOT"),
    FlagEntry::new(1 << 17, "VERIFIED_DEVELOPER"),
    FlagEntry::new(1 << 18, "CERTIFIED_MODERATOR"),
    FlagEntry::new(1 << 19, "BOT_HTTP_INTERACTIONS"),
    FlagEntry::new(1 << 22, "ACTIVE_DEVELOPER"),
]);

/// Application flags reported by the RPC endpoint.
pub const APPLICATION_FLAGS: FlagTable = FlagTable::new(&[
    FlagEntry::new(1 << 6, "APPLICATION_AUTO_MODERATION_RULE_CREATE_BADGE"),
    FlagEntry::new(1 << 12, "GATEWAY_PRESENCE"),
    FlagEntry::new(1 << 13, "GATEWAY_PRESENCE_LIMITED"),
    FlagEntry::new(1 << 14, "GATEWAY_GUILD_MEMBERS"),
    FlagEntry::new(1 << 15, "GATEWAY_GUILD_MEMBERS_LIMITED"),
    FlagEntry::new(1 << 16, "VERIFICATION_PENDING_GUILD_LIMIT"),
    FlagEntry::new(1 << 17, "EMBEDDED"),
    FlagEntry::new(1 << 18, "GATEWAY_MESSAGE_CONTENT"),
    FlagEntry::new(1 << 19, "GATEWAY_MESSAGE_CONTENT_LIMITED"),
    FlagEntry::new(1 << 23, "APPLICATION_COMMAND_BADGE"),
]);

/// Decodes masks against one table.
///
/// # Examples
/// ```
/// use lookup_gateway::domain::flags::{FlagDecoder, FlagEntry, FlagTable};
///
/// const TABLE: FlagTable = FlagTable::new(&[
///     FlagEntry::new(1, "A"),
///     FlagEntry::new(4, "B"),
/// ]);
/// let decoder = FlagDecoder::new(TABLE);
/// assert_eq!(decoder.decode(Some(5)), vec!["A", "B"]);
/// assert!(decoder.decode(None).is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagDecoder {
    table: FlagTable,
}

impl FlagDecoder {
    /// Build a decoder over `table`.
    #[must_use]
    pub const fn new(table: FlagTable) -> Self {
        Self { table }
    }

    /// Labels whose bit is set in `mask`, in table order. A missing mask is
    /// treated as zero.
    #[must_use]
    pub fn decode(&self, mask: Option<u64>) -> Vec<&'static str> {
        let mask = mask.unwrap_or_default();
        self.table
            .entries()
            .iter()
            .filter(|entry| mask & entry.bits != 0)
            .map(|entry| entry.label)
            .collect()
    }

    /// Decode a mask straight from an upstream JSON field.
    #[must_use]
    pub fn decode_json(&self, mask: Option<&Value>) -> Vec<&'static str> {
        self.decode(mask.and_then(mask_from_json))
    }
}

/// Read a bitmask from a JSON value.
///
/// Integers are used as-is (negative values keep their two's complement
/// bits), floats are truncated, numeric strings and booleans are coerced.
/// Anything else yields `None`.
#[must_use]
pub fn mask_from_json(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_i64().map(|signed| signed as u64))
            .or_else(|| number.as_f64().and_then(truncate_mask)),
        Value::String(text) => coerce_number(text).and_then(truncate_mask),
        Value::Bool(flag) => Some(u64::from(*flag)),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn truncate_mask(value: f64) -> Option<u64> {
    value
        .is_finite()
        .then(|| value.trunc() as i64 as u64)
}

/// Decoders for both flag domains, shared read-only by every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagTables {
    /// Decoder for `public_flags` on user profiles.
    pub user: FlagDecoder,
    /// Decoder for `flags` on application documents.
    pub application: FlagDecoder,
}

impl FlagTables {
    /// Bundle explicit tables, mainly for tests with synthetic labels.
    #[must_use]
    pub const fn new(user: FlagTable, application: FlagTable) -> Self {
        Self {
            user: FlagDecoder::new(user),
            application: FlagDecoder::new(application),
        }
    }
}

impl Default for FlagTables {
    fn default() -> Self {
        Self::new(USER_FLAGS, APPLICATION_FLAGS)
    }
}
