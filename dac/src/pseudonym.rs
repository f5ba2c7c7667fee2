//! Pseudonyms and signatures under them.
//!
//! A pseudonym is a Pedersen commitment to the holder's secret key, `pk_nym = g * sk + h * sk_nym`, with a fresh
//! blinding `sk_nym` each time so that pseudonyms of the same holder can't be linked. `h` is a generator
//! independent of `g` (nobody knows its discrete log to base `g`) and is supplied by the caller.
//!
//! A signature under a pseudonym is a proof of knowledge of the opening `(sk, sk_nym)` with the message bound
//! into the Fiat-Shamir challenge:
//! 1. Signer picks random `t1, t2` and computes `commitment = g * t1 + h * t2`
//! 2. Challenge `c = H(commitment || pk_nym || message)`
//! 3. Responses `res_sk = t1 + sk * c` and `res_sk_nym = t2 + sk_nym * c`
//! 4. Verifier recomputes `c` and checks `pk_nym * c + commitment == g * res_sk + h * res_sk_nym`
//!
//! `g` is the standard generator of the group.

use crate::{error::DacError, keys::SecretKey};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{rand::RngCore, vec, vec::Vec, UniformRand};
use dac_utils::{
    aliases::FullDigest,
    hashing_utils::hash_to_scalar,
    octets::{from_octets, to_octets},
    serde_utils::ArkObjectBytes,
};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use zeroize::{Zeroize, ZeroizeOnDrop};

const NYM_SIGNATURE_DST: &[u8] = b"DAC-NYM-SIGNATURE";

/// Blinding of the pseudonym
#[serde_as]
#[derive(
    Clone,
    PartialEq,
    Eq,
    Debug,
    CanonicalSerialize,
    CanonicalDeserialize,
    Serialize,
    Deserialize,
    Zeroize,
    ZeroizeOnDrop,
)]
pub struct NymSecretKey<F: PrimeField>(#[serde_as(as = "ArkObjectBytes")] pub F);

/// The pseudonym, `g * sk + h * sk_nym`
#[serde_as]
#[derive(
    Clone, Copy, PartialEq, Eq, Debug, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
pub struct NymPublicKey<G: AffineRepr>(#[serde_as(as = "ArkObjectBytes")] pub G);

#[serde_as]
#[derive(
    Clone, PartialEq, Eq, Debug, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
pub struct NymSignature<G: AffineRepr> {
    #[serde_as(as = "ArkObjectBytes")]
    pub res_sk: G::ScalarField,
    #[serde_as(as = "ArkObjectBytes")]
    pub res_sk_nym: G::ScalarField,
    #[serde_as(as = "ArkObjectBytes")]
    pub commitment: G,
}

#[derive(CanonicalSerialize, CanonicalDeserialize)]
struct NymSignatureOctets {
    res_sk: Vec<u8>,
    res_sk_nym: Vec<u8>,
    commitment: Vec<u8>,
}

/// Generate a fresh pseudonym for `secret_key`
pub fn generate_nym_keys<R: RngCore, G: AffineRepr>(
    rng: &mut R,
    secret_key: &SecretKey<G::ScalarField>,
    h: &G,
) -> (NymSecretKey<G::ScalarField>, NymPublicKey<G>) {
    let sk_nym = NymSecretKey(G::ScalarField::rand(rng));
    let pk_nym = NymPublicKey::new(secret_key, &sk_nym, h);
    (sk_nym, pk_nym)
}

impl<G: AffineRepr> NymPublicKey<G> {
    pub fn new(
        secret_key: &SecretKey<G::ScalarField>,
        nym_secret_key: &NymSecretKey<G::ScalarField>,
        h: &G,
    ) -> Self {
        Self(two_base_product(&secret_key.0, h, &nym_secret_key.0))
    }
}

/// `g * a + h * b` where `g` is the standard generator
fn two_base_product<G: AffineRepr>(a: &G::ScalarField, h: &G, b: &G::ScalarField) -> G {
    (G::generator().mul_bigint(a.into_bigint()) + h.mul_bigint(b.into_bigint())).into_affine()
}

impl<G: AffineRepr> NymSignature<G> {
    pub fn new<R: RngCore, D: FullDigest>(
        rng: &mut R,
        pk_nym: &NymPublicKey<G>,
        sk_nym: &NymSecretKey<G::ScalarField>,
        secret_key: &SecretKey<G::ScalarField>,
        h: &G,
        message: &[u8],
    ) -> Result<Self, DacError> {
        let t1 = G::ScalarField::rand(rng);
        let t2 = G::ScalarField::rand(rng);
        Self::new_with_given_randomness::<D>(t1, t2, pk_nym, sk_nym, secret_key, h, message)
    }

    /// Same as `Self::new` but the randomness `t1, t2` is passed by the caller
    pub fn new_with_given_randomness<D: FullDigest>(
        t1: G::ScalarField,
        t2: G::ScalarField,
        pk_nym: &NymPublicKey<G>,
        sk_nym: &NymSecretKey<G::ScalarField>,
        secret_key: &SecretKey<G::ScalarField>,
        h: &G,
        message: &[u8],
    ) -> Result<Self, DacError> {
        let commitment = two_base_product(&t1, h, &t2);
        let c = Self::compute_challenge::<D>(&commitment, pk_nym, message)?;
        Ok(Self {
            res_sk: t1 + secret_key.0 * c,
            res_sk_nym: t2 + sk_nym.0 * c,
            commitment,
        })
    }

    /// `H(commitment || pk_nym || message)`
    pub fn compute_challenge<D: FullDigest>(
        commitment: &G,
        pk_nym: &NymPublicKey<G>,
        message: &[u8],
    ) -> Result<G::ScalarField, DacError> {
        let mut challenge_bytes = vec![];
        commitment.serialize_compressed(&mut challenge_bytes)?;
        pk_nym.0.serialize_compressed(&mut challenge_bytes)?;
        challenge_bytes.extend_from_slice(message);
        Ok(hash_to_scalar::<G::ScalarField, D>(
            NYM_SIGNATURE_DST,
            &challenge_bytes,
        ))
    }

    /// `pk_nym * c + commitment == g * res_sk + h * res_sk_nym`
    pub fn verify<D: FullDigest>(
        &self,
        h: &G,
        pk_nym: &NymPublicKey<G>,
        message: &[u8],
    ) -> Result<(), DacError> {
        let c = Self::compute_challenge::<D>(&self.commitment, pk_nym, message)?;
        let lhs = (pk_nym.0.mul_bigint(c.into_bigint()) + self.commitment).into_affine();
        if lhs != two_base_product(&self.res_sk, h, &self.res_sk_nym) {
            return Err(DacError::InvalidNymSignature);
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DacError> {
        let record = NymSignatureOctets {
            res_sk: to_octets(&self.res_sk)?,
            res_sk_nym: to_octets(&self.res_sk_nym)?,
            commitment: to_octets(&self.commitment)?,
        };
        Ok(to_octets(&record)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DacError> {
        let record: NymSignatureOctets = from_octets(bytes)?;
        Ok(Self {
            res_sk: from_octets(&record.res_sk)?,
            res_sk_nym: from_octets(&record.res_sk_nym)?,
            commitment: from_octets(&record.commitment)?,
        })
    }
}
