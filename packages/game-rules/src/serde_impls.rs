//! Serialization and deserialization for the rule vocabulary.
//!
//! Values travel as their SCREAMING_SNAKE_CASE names (`"ROCK"`,
//! `"PLAYER_1_WIN"`, `"CLOSED"`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::hand::Hand;
use crate::outcome::{PvcOutcome, PvpOutcome};
use crate::state::GameState;

macro_rules! serde_by_name {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse::<$ty>().map_err(serde::de::Error::custom)
            }
        }
    };
}

serde_by_name!(Hand);
serde_by_name!(GameState);
serde_by_name!(PvpOutcome);
serde_by_name!(PvcOutcome);
