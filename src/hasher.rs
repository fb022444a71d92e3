// src/hasher.rs

use std::sync::OnceLock;

use ark_ff::PrimeField;
use light_poseidon::{Poseidon, PoseidonHasher};
use num_bigint::BigUint;

use crate::backend::{Backend, Bls12_381Fr, Bn254Fr, from_field, to_field};
use crate::error::{CommitmentError, Result};
use crate::params::{COMMITMENT_ARITY, PoseidonConstants};

type Cached<F> = OnceLock<std::result::Result<PoseidonConstants<F>, String>>;

static BN254_CONSTANTS: Cached<Bn254Fr> = OnceLock::new();
static BLS12_381_CONSTANTS: Cached<Bls12_381Fr> = OnceLock::new();

fn cached<F: PrimeField>(
    cell: &'static Cached<F>,
    backend: Backend,
) -> Result<&'static PoseidonConstants<F>> {
    cell.get_or_init(|| PoseidonConstants::derive(COMMITMENT_ARITY + 1))
        .as_ref()
        .map_err(|reason| CommitmentError::HashBackendUnavailable {
            backend,
            reason: reason.clone(),
        })
}

/// Account values bound by a commitment, before the backend id is appended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preimage {
    pub balance: BigUint,
    pub nonce: BigUint,
    pub account_id: BigUint,
}

impl Preimage {
    pub fn new(
        balance: impl Into<BigUint>,
        nonce: impl Into<BigUint>,
        account_id: impl Into<BigUint>,
    ) -> Self {
        Self {
            balance: balance.into(),
            nonce: nonce.into(),
            account_id: account_id.into(),
        }
    }

    fn elements<F: PrimeField>(&self, backend: Backend) -> [F; COMMITMENT_ARITY] {
        [
            to_field(&self.balance),
            to_field(&self.nonce),
            to_field(&self.account_id),
            F::from(backend.id()),
        ]
    }
}

impl Default for Preimage {
    /// The fixed test vector: balance 1000, nonce 5, account 12345.
    fn default() -> Self {
        Self::new(1000u64, 5u64, 12345u64)
    }
}

/// Poseidon(balance, nonce, account_id, backend_id) over the backend's
/// scalar field, returned as the canonical integer of the field element.
pub fn commit(backend: Backend, preimage: &Preimage) -> Result<BigUint> {
    let commitment = match backend {
        Backend::Bn254 => {
            let constants = cached(&BN254_CONSTANTS, backend)?;
            from_field(hash_with::<Bn254Fr>(constants, backend, preimage)?)
        }
        Backend::Bls12_381 => {
            let constants = cached(&BLS12_381_CONSTANTS, backend)?;
            from_field(hash_with::<Bls12_381Fr>(constants, backend, preimage)?)
        }
    };

    tracing::debug!(%backend, commitment = %commitment, "computed commitment");
    Ok(commitment)
}

/// Same as [`commit`], resolving the backend from its numeric id.
pub fn commit_by_id(backend_id: u64, preimage: &Preimage) -> Result<BigUint> {
    commit(Backend::try_from(backend_id)?, preimage)
}

fn hash_with<F: PrimeField>(
    constants: &PoseidonConstants<F>,
    backend: Backend,
    preimage: &Preimage,
) -> Result<F> {
    let inputs = preimage.elements::<F>(backend);
    // The permutation keeps per-call state, so each commitment gets its own.
    let mut poseidon = Poseidon::new(constants.to_light());
    poseidon
        .hash(&inputs)
        .map_err(|e| CommitmentError::HashBackendUnavailable {
            backend,
            reason: e.to_string(),
        })
}
