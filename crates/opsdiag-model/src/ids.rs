//! Identifier newtypes
//!
//! All entities are keyed by ULIDs: globally unique, lexicographically
//! sortable by creation time. Sortability matters for the log stream,
//! whose presentation order must match creation order.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub Ulid);

        impl $name {
            /// Generate a fresh id
            #[inline]
            #[must_use]
            pub fn new() -> Self {
                Self(Ulid::new())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type! {
    /// Unique agent identifier
    AgentId
}

id_type! {
    /// Unique team identifier
    TeamId
}

id_type! {
    /// Unique monitored-resource identifier
    ResourceId
}

id_type! {
    /// Unique diagnosis-session identifier
    SessionId
}

id_type! {
    /// Unique log-entry identifier
    MessageId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(AgentId::new(), AgentId::new());
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn id_display_roundtrip() {
        let id = TeamId::new();
        let text = id.to_string();
        assert_eq!(text.len(), 26);
        assert_eq!(TeamId(text.parse().unwrap()), id);
    }
}
