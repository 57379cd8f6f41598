//! Typed ID wrappers for store-assigned row identifiers.
//!
//! Every table uses an auto-increment integer key. Each ID type is a newtype
//! over `i64`, preventing accidental misuse (e.g., passing a `StepId` where a
//! `ProjectId` is expected).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Generate a newtype ID wrapper over `i64`.
///
/// The macro produces a struct with:
/// - `get()` returning the raw key for binding into statements
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`,
///   `Serialize`, `Deserialize`
/// - `Display` and `FromStr` delegating to the inner integer
/// - `From<i64>` and `Into<i64>` conversions
macro_rules! typed_id {
    ($($(#[doc = $doc:expr])* $name:ident),+ $(,)?) => {
        $(
            $(#[doc = $doc])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(i64);

            impl $name {
                /// Return the raw key value.
                #[must_use]
                pub fn get(self) -> i64 {
                    self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl FromStr for $name {
                type Err = ParseIntError;

                fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                    s.trim().parse::<i64>().map(Self)
                }
            }

            impl From<i64> for $name {
                fn from(id: i64) -> Self {
                    Self(id)
                }
            }

            impl From<$name> for i64 {
                fn from(id: $name) -> Self {
                    id.0
                }
            }
        )+
    };
}

typed_id! {
    /// Identifier of a project (the aggregate root).
    ProjectId,
    /// Identifier of a material row owned by a project.
    MaterialId,
    /// Identifier of a step row owned by a project.
    StepId,
    /// Identifier of a category, shared across projects.
    CategoryId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        let id = ProjectId::from(17);
        assert_eq!(id.to_string(), "17");
        assert_eq!("17".parse::<ProjectId>().unwrap(), id);
        assert_eq!(" 17 ".parse::<ProjectId>().unwrap(), id);
        assert!("abc".parse::<ProjectId>().is_err());
    }

    #[test]
    fn test_raw_conversions() {
        let id = CategoryId::from(3);
        assert_eq!(id.get(), 3);
        assert_eq!(i64::from(id), 3);
    }

    #[test]
    fn test_serializes_transparently() {
        let json = serde_json::to_string(&StepId::from(5)).unwrap();
        assert_eq!(json, "5");
        let back: StepId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StepId::from(5));
    }

    #[test]
    fn test_ordering_follows_key() {
        assert!(MaterialId::from(1) < MaterialId::from(2));
    }
}
