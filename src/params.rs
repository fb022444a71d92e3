// src/params.rs

use ark_crypto_primitives::sponge::poseidon::find_poseidon_ark_and_mds;
use ark_ff::PrimeField;
use light_poseidon::PoseidonParameters;

/// Number of preimage elements in a commitment:
/// (balance, nonce, account_id, backend_id).
pub const COMMITMENT_ARITY: usize = 4;

pub const FULL_ROUNDS: usize = 8;
pub const ALPHA: u64 = 5;

/// Partial rounds per state width (index = width - 2), as used by circomlib
/// for 128-bit security with x^5.
const PARTIAL_ROUNDS: [usize; 16] = [56, 57, 56, 60, 60, 63, 64, 63, 60, 66, 60, 65, 70, 60, 64, 68];

pub fn partial_rounds(width: usize) -> Option<usize> {
    width.checked_sub(2).and_then(|i| PARTIAL_ROUNDS.get(i).copied())
}

/// Round constants and MDS matrix of an x^5 Poseidon permutation over `F`.
///
/// `ark` is flattened round-major: constant `i` of round `r` is
/// `ark[r * width + i]`.
#[derive(Clone, Debug)]
pub struct PoseidonConstants<F: PrimeField> {
    pub width: usize,
    pub full_rounds: usize,
    pub partial_rounds: usize,
    pub ark: Vec<F>,
    pub mds: Vec<Vec<F>>,
}

impl<F: PrimeField> PoseidonConstants<F> {
    /// Derive the constants for `width` with the Grain LFSR of the Poseidon
    /// reference generator. For the BN254 scalar field this yields exactly
    /// the constants shipped with circomlib.
    pub fn derive(width: usize) -> Result<Self, String> {
        let partial_rounds =
            partial_rounds(width).ok_or_else(|| format!("unsupported state width {width}"))?;

        tracing::debug!(
            width,
            prime_bits = F::MODULUS_BIT_SIZE,
            full_rounds = FULL_ROUNDS,
            partial_rounds,
            "deriving Poseidon constants"
        );

        // skip_matrices = 0: the first Cauchy matrix drawn from the LFSR.
        let (ark, mds) = find_poseidon_ark_and_mds::<F>(
            F::MODULUS_BIT_SIZE as u64,
            width - 1,
            FULL_ROUNDS as u64,
            partial_rounds as u64,
            0,
        );

        Self::from_parts(width, FULL_ROUNDS, partial_rounds, ark.concat(), mds)
    }

    /// Assemble constants from raw parts, checking their shape.
    pub fn from_parts(
        width: usize,
        full_rounds: usize,
        partial_rounds: usize,
        ark: Vec<F>,
        mds: Vec<Vec<F>>,
    ) -> Result<Self, String> {
        let rounds = full_rounds + partial_rounds;
        if ark.len() != rounds * width {
            return Err(format!(
                "expected {} round constants, got {}",
                rounds * width,
                ark.len()
            ));
        }
        if mds.len() != width || mds.iter().any(|row| row.len() != width) {
            return Err(format!("MDS matrix is not {width}x{width}"));
        }
        if mds.iter().flatten().any(|m| m.is_zero()) {
            return Err("MDS matrix has a zero entry".to_string());
        }

        Ok(Self {
            width,
            full_rounds,
            partial_rounds,
            ark,
            mds,
        })
    }

    /// Parameters in the form the light-poseidon permutation consumes.
    pub fn to_light(&self) -> PoseidonParameters<F> {
        PoseidonParameters::new(
            self.ark.clone(),
            self.mds.clone(),
            self.full_rounds,
            self.partial_rounds,
            self.width,
            ALPHA,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_381::Fr as BlsFr;
    use ark_bn254::Fr;

    #[test]
    fn partial_round_table() {
        assert_eq!(partial_rounds(3), Some(57));
        assert_eq!(partial_rounds(5), Some(60));
        assert_eq!(partial_rounds(1), None);
        assert_eq!(partial_rounds(18), None);
    }

    #[test]
    fn commitment_width_shape() {
        let c = PoseidonConstants::<BlsFr>::derive(COMMITMENT_ARITY + 1).unwrap();
        assert_eq!(c.width, 5);
        assert_eq!(c.ark.len(), (8 + 60) * 5);
        assert_eq!(c.mds.len(), 5);
    }

    #[test]
    fn first_round_constant_bn254_width3() {
        // C[0] of circomlib's poseidon_constants for t = 3.
        let c = PoseidonConstants::<Fr>::derive(3).unwrap();
        let expected: Fr = crate::backend::to_field(
            &"6745197990210204598374042828761989596302876299545964402857411729872131034734"
                .parse()
                .unwrap(),
        );
        assert_eq!(c.ark[0], expected);
    }

    #[test]
    fn rejects_bad_shapes() {
        let ark = vec![Fr::from(1u64); 10];
        let mds = vec![vec![Fr::from(1u64); 2]; 2];
        assert!(PoseidonConstants::from_parts(3, 8, 57, ark, mds).is_err());

        let ark = vec![Fr::from(1u64); 3 * 65];
        let mds = vec![vec![Fr::from(1u64); 3]; 2];
        assert!(PoseidonConstants::from_parts(3, 8, 57, ark, mds).is_err());
    }

    #[test]
    fn unsupported_width() {
        assert!(PoseidonConstants::<Fr>::derive(20).is_err());
    }
}
