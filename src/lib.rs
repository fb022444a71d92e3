// src/lib.rs
//! Poseidon commitment fixtures for account state that moves between the
//! BN254 and BLS12-381 proving backends.

pub mod backend;
pub mod error;
pub mod fixture;
pub mod hasher;
pub mod params;

pub use backend::Backend;
pub use error::CommitmentError;
pub use fixture::{CommitmentRecord, generate, generate_for};
pub use hasher::{Preimage, commit, commit_by_id};
