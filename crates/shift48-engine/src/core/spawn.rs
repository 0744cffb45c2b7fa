use std::{fmt::Write as _, str::FromStr};

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for deterministic tile spawning.
///
/// A 128-bit seed for the session's spawn RNG. Two sessions built from the
/// same seed and configuration see the same spawn cells and values, which
/// enables replayable games and deterministic tests. Serialized as a 32
/// character hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnSeed(pub(crate) [u8; 16]);

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid spawn seed: expected 32 hex characters")]
pub struct ParseSpawnSeedError;

impl FromStr for SpawnSeed {
    type Err = ParseSpawnSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSpawnSeedError);
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParseSpawnSeedError)?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for SpawnSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{num:032x}").unwrap();
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for SpawnSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid spawn seed hex: {hex_str}")))
    }
}

impl Distribution<SpawnSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SpawnSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        SpawnSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_roundtrip_preserves_the_seed() {
        let seed: SpawnSeed = rand::rng().random();
        let serialized = serde_json::to_string(&seed).unwrap();
        let deserialized: SpawnSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(seed, deserialized);
    }

    #[test]
    fn serializes_as_32_char_big_endian_hex() {
        let seed = SpawnSeed([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ]);
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");
    }

    #[test]
    fn parses_uppercase_hex() {
        let seed: SpawnSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
        assert_eq!(seed.0[0], 0x01);
        assert_eq!(seed.0[15], 0x10);
    }

    #[test]
    fn rejects_wrong_length_and_non_hex_input() {
        assert!("".parse::<SpawnSeed>().is_err());
        assert!("0123".parse::<SpawnSeed>().is_err());
        assert!(
            "0123456789abcdef0123456789abcdef0"
                .parse::<SpawnSeed>()
                .is_err()
        );
        assert!(
            "ghijklmnopqrstuvwxyzghijklmnopqr"
                .parse::<SpawnSeed>()
                .is_err()
        );

        let result: Result<SpawnSeed, _> = serde_json::from_str("\"0123\"");
        assert!(result.unwrap_err().to_string().contains("invalid spawn seed"));
    }
}
