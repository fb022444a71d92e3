// src/backend.rs

use std::fmt;

use ark_ff::{BigInteger, PrimeField};
use num_bigint::BigUint;

use crate::error::CommitmentError;

pub type Bn254Fr = ark_bn254::Fr;
#[allow(non_camel_case_types)]
pub type Bls12_381Fr = ark_bls12_381::Fr;

/// Curve whose scalar field hosts a commitment.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Bn254,
    Bls12_381,
}

impl Backend {
    pub fn all() -> [Backend; 2] {
        [Backend::Bn254, Backend::Bls12_381]
    }

    /// Numeric id hashed as the fourth preimage element.
    pub fn id(&self) -> u64 {
        match self {
            Backend::Bn254 => 0,
            Backend::Bls12_381 => 1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Backend::Bn254 => "BN254",
            Backend::Bls12_381 => "BLS12-381",
        }
    }

    /// Nominal security level of the curve.
    pub fn security_bits(&self) -> u32 {
        match self {
            Backend::Bn254 => 100,
            Backend::Bls12_381 => 128,
        }
    }

    /// Order of the scalar field.
    pub fn modulus(&self) -> BigUint {
        match self {
            Backend::Bn254 => modulus_of::<Bn254Fr>(),
            Backend::Bls12_381 => modulus_of::<Bls12_381Fr>(),
        }
    }
}

impl TryFrom<u64> for Backend {
    type Error = CommitmentError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(Backend::Bn254),
            1 => Ok(Backend::Bls12_381),
            other => Err(CommitmentError::InvalidBackendId(other)),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn modulus_of<F: PrimeField>() -> BigUint {
    BigUint::from_bytes_le(&F::MODULUS.to_bytes_le())
}

/// Reduce an arbitrary non-negative integer into `F`.
pub fn to_field<F: PrimeField>(value: &BigUint) -> F {
    F::from_le_bytes_mod_order(&value.to_bytes_le())
}

/// Canonical integer representative of a field element.
pub fn from_field<F: PrimeField>(element: F) -> BigUint {
    BigUint::from_bytes_le(&element.into_bigint().to_bytes_le())
}
