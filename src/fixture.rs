// src/fixture.rs

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::backend::Backend;
use crate::error::{CommitmentError, Result};
use crate::hasher::{Preimage, commit};

/// Fixture handed to the circuit test suite. Every field is written as a
/// decimal string; the inputs are stored as given, not reduced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentRecord {
    #[serde(with = "decimal")]
    pub balance: BigUint,
    #[serde(with = "decimal")]
    pub nonce: BigUint,
    #[serde(with = "decimal")]
    pub account_id: BigUint,
    #[serde(with = "decimal")]
    pub old_backend_id: u64,
    #[serde(with = "decimal")]
    pub new_backend_id: u64,
    #[serde(with = "decimal")]
    pub old_commitment: BigUint,
    #[serde(with = "decimal")]
    pub new_commitment: BigUint,
}

pub const DEFAULT_OLD_BACKEND: u64 = 0;
pub const DEFAULT_NEW_BACKEND: u64 = 1;

/// Commit to `(balance, nonce, account_id)` under both backends.
pub fn generate(
    balance: impl Into<BigUint>,
    nonce: impl Into<BigUint>,
    account_id: impl Into<BigUint>,
    old_backend_id: u64,
    new_backend_id: u64,
) -> Result<CommitmentRecord> {
    let preimage = Preimage::new(balance, nonce, account_id);
    generate_for(&preimage, old_backend_id, new_backend_id)
}

pub fn generate_for(
    preimage: &Preimage,
    old_backend_id: u64,
    new_backend_id: u64,
) -> Result<CommitmentRecord> {
    let old_backend = Backend::try_from(old_backend_id)?;
    let new_backend = Backend::try_from(new_backend_id)?;

    let old_commitment = commit(old_backend, preimage)?;
    let new_commitment = commit(new_backend, preimage)?;

    tracing::info!(
        old = %old_backend,
        new = %new_backend,
        "generated commitment fixture"
    );

    Ok(CommitmentRecord {
        balance: preimage.balance.clone(),
        nonce: preimage.nonce.clone(),
        account_id: preimage.account_id.clone(),
        old_backend_id,
        new_backend_id,
        old_commitment,
        new_commitment,
    })
}

impl CommitmentRecord {
    /// Record for the fixed test vector (1000, 5, 12345; backends 0 and 1).
    pub fn default_vector() -> Result<Self> {
        generate_for(&Preimage::default(), DEFAULT_OLD_BACKEND, DEFAULT_NEW_BACKEND)
    }

    pub fn preimage(&self) -> Preimage {
        Preimage {
            balance: self.balance.clone(),
            nonce: self.nonce.clone(),
            account_id: self.account_id.clone(),
        }
    }

    /// Recompute both commitments and compare them with the stored ones.
    pub fn check(&self) -> Result<()> {
        let preimage = self.preimage();
        let pairs = [
            (self.old_backend_id, &self.old_commitment),
            (self.new_backend_id, &self.new_commitment),
        ];
        for (id, stored) in pairs {
            let backend = Backend::try_from(id)?;
            let actual = commit(backend, &preimage)?;
            if &actual != stored {
                return Err(CommitmentError::CommitmentMismatch {
                    backend,
                    expected: stored.to_string(),
                    actual: actual.to_string(),
                });
            }
        }
        Ok(())
    }

    /// JSON with 4-space indentation.
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(|e| CommitmentError::SerializationFailure(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Serde adapter writing integers as decimal strings.
mod decimal {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<T: Display, S: Serializer>(value: &T, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(d: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let s = String::deserialize(d)?;
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(D::Error::custom(format!("expected a decimal string, got {s:?}")));
        }
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_vector_fields() {
        let record = CommitmentRecord::default_vector().unwrap();
        assert_eq!(record.balance, BigUint::from(1000u32));
        assert_eq!(record.nonce, BigUint::from(5u32));
        assert_eq!(record.account_id, BigUint::from(12345u32));
        assert_eq!(record.old_backend_id, 0);
        assert_eq!(record.new_backend_id, 1);
        assert_eq!(
            record.old_commitment.to_string(),
            "3490657664724739430231687506046806507441204331719615468962663591259812403254"
        );
        assert_eq!(
            record.new_commitment.to_string(),
            "41653873300558048393226618975164328765654522142523766988021864398597318706446"
        );
    }

    #[test]
    fn json_layout() {
        let record = CommitmentRecord::default_vector().unwrap();
        let json = record.to_json_pretty().unwrap();
        assert!(json.starts_with("{\n    \"balance\": \"1000\",\n    \"nonce\": \"5\",\n"));

        let keys = [
            "balance",
            "nonce",
            "account_id",
            "old_backend_id",
            "new_backend_id",
            "old_commitment",
            "new_commitment",
        ];
        let positions: Vec<usize> = keys
            .iter()
            .map(|k| json.find(&format!("\"{k}\"")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(json.contains("\"old_backend_id\": \"0\""));
    }

    #[test]
    fn json_round_trip_large_values() {
        let big: BigUint = "340282366920938463463374607431768211457123456789".parse().unwrap();
        let record = generate(big.clone(), 1u32, big, 1, 0).unwrap();
        let back = CommitmentRecord::from_json(&record.to_json().unwrap()).unwrap();
        assert_eq!(back, record);
        back.check().unwrap();
    }

    #[test]
    fn rejects_non_decimal_fields() {
        let record = CommitmentRecord::default_vector().unwrap();
        let json = record.to_json().unwrap();

        let as_number = json.replace("\"balance\":\"1000\"", "\"balance\":1000");
        assert!(matches!(
            CommitmentRecord::from_json(&as_number),
            Err(CommitmentError::SerializationFailure(_))
        ));

        let signed = json.replace("\"nonce\":\"5\"", "\"nonce\":\"-5\"");
        assert!(CommitmentRecord::from_json(&signed).is_err());

        let underscored = json.replace("\"balance\":\"1000\"", "\"balance\":\"1_000\"");
        assert!(CommitmentRecord::from_json(&underscored).is_err());
    }

    #[test]
    fn invalid_backend_is_not_silently_replaced() {
        assert_eq!(
            generate(1000u32, 5u32, 12345u32, 0, 2),
            Err(CommitmentError::InvalidBackendId(2))
        );
        assert_eq!(
            generate(1000u32, 5u32, 12345u32, 7, 1),
            Err(CommitmentError::InvalidBackendId(7))
        );
    }

    #[test]
    fn check_detects_tampering() {
        let mut record = CommitmentRecord::default_vector().unwrap();
        record.check().unwrap();

        record.new_commitment += 1u32;
        match record.check() {
            Err(CommitmentError::CommitmentMismatch { backend, .. }) => {
                assert_eq!(backend, Backend::Bls12_381)
            }
            other => panic!("unexpected: {other:?}"),
        }

        let mut record = CommitmentRecord::default_vector().unwrap();
        record.balance += 1u32;
        assert!(matches!(
            record.check(),
            Err(CommitmentError::CommitmentMismatch { backend: Backend::Bn254, .. })
        ));
    }

    #[test]
    fn same_backend_twice() {
        let record = generate(1u32, 2u32, 3u32, 1, 1).unwrap();
        assert_eq!(record.old_commitment, record.new_commitment);
    }
}
