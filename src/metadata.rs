use std::collections::HashMap;

use self::token::{MetadataToken, TokenKind};

/// Resolved program entities (fields, methods, types, signatures).
pub mod entity;

/// Token resolution: the [`Resolver`][self::resolver::Resolver] trait and an
/// in-memory table-backed implementation.
pub mod resolver;

/// Raw metadata tokens and their table tags.
pub mod token;

/// One loaded metadata source: an identity plus the heaps operand decoding
/// needs to consult directly.
///
/// Contexts are shared immutably (wrap them in an `Arc`); two operands belong
/// to the same source iff they hold the same allocation, so identity is
/// pointer identity, never name equality.
#[derive(Debug, Default)]
pub struct MetadataContext {
    name: String,
    user_strings: HashMap<u32, String>,
}

impl MetadataContext {
    pub fn new(name: String) -> MetadataContext {
        MetadataContext {
            name,
            user_strings: HashMap::new(),
        }
    }

    /// Name of the underlying module or assembly, for diagnostics only.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a user string at the given heap offset and return its token.
    pub fn add_user_string(&mut self, rid: u32, text: String) -> MetadataToken {
        self.user_strings.insert(rid, text);
        MetadataToken::from_parts(TokenKind::UserString, rid)
    }

    /// Look up a `0x70`-tagged token on the user-string heap.
    pub fn user_string(&self, token: MetadataToken) -> Option<&str> {
        if token.kind() != Some(TokenKind::UserString) {
            return None;
        }
        self.user_strings.get(&token.rid()).map(String::as_str)
    }
}
