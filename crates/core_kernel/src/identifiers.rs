//! Typed identifiers
//!
//! `StudentId` and `BillingId` wrap UUIDs in distinct newtypes so a billing
//! record cannot accidentally be keyed by a student id. Each type carries a
//! short display prefix (`STU-`, `BIL-`) that keeps log lines greppable, and
//! the prefixed form parses back losslessly. Entities mint v7 ids, so ids
//! minted later sort later; the bill listing leans on that as its
//! same-timestamp tie break.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Display prefix, without the joining hyphen.
            pub const PREFIX: &'static str = $prefix;

            /// A random (v4) identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// A time-ordered (v7) identifier; later mints sort later.
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", Self::PREFIX, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            // Accepts both the prefixed display form and a bare UUID.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let bare = match s.strip_prefix(concat!($prefix, "-")) {
                    Some(rest) => rest,
                    None => s,
                };
                Uuid::parse_str(bare).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

entity_id!(StudentId, "STU");
entity_id!(BillingId, "BIL");
