//! Credential request: a public key, a nonce chosen by the issuer and a non-interactive proof of knowledge of
//! the secret key bound to that nonce.
//!
//! The proof is the Schnorr protocol for a discrete log made non-interactive with Fiat-Shamir. Given a base `g`
//! and secret key `x`:
//! 1. Prover picks a random `v` and computes `t = g * v` and `y = g * x`
//! 2. Challenge `c = H(t || y || nonce)`
//! 3. Response `r = v + x * c`
//! 4. Verifier recomputes `c` and checks `g * r - y * c == t`
//!
//! A request for a credential at level `L` uses G1 when `L` is odd and G2 otherwise, see `LevelCredRequest`.
//! The nonce is only bound into the challenge, the issuer is responsible for checking that it is fresh.

use crate::{
    error::DacError,
    group::{Group, GroupElement},
    keys::SecretKey,
};
use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
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

const CRED_REQUEST_DST: &[u8] = b"DAC-CRED-REQUEST";

#[serde_as]
#[derive(
    Clone, PartialEq, Eq, Debug, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
pub struct CredRequest<G: AffineRepr> {
    pub nonce: Vec<u8>,
    /// Public key `y = g * x`
    #[serde_as(as = "ArkObjectBytes")]
    pub pk: G,
    /// Commitment to the randomness, `t = g * v`
    #[serde_as(as = "ArkObjectBytes")]
    pub res_t: G,
    #[serde_as(as = "ArkObjectBytes")]
    pub res_r: G::ScalarField,
}

/// Credential request for a specific delegation level. The variant is picked by the level's parity and both
/// the public key and the commitment are always in that variant's group.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum LevelCredRequest<E: Pairing> {
    G1(CredRequest<E::G1Affine>),
    G2(CredRequest<E::G2Affine>),
}

/// Wire form, every field as an octet string
#[derive(CanonicalSerialize, CanonicalDeserialize)]
struct CredRequestOctets {
    nonce: Vec<u8>,
    pk: Vec<u8>,
    res_t: Vec<u8>,
    res_r: Vec<u8>,
}

impl<G: AffineRepr> CredRequest<G> {
    pub fn new<R: RngCore, D: FullDigest>(
        rng: &mut R,
        secret_key: &SecretKey<G::ScalarField>,
        nonce: &[u8],
        base: &G,
    ) -> Result<Self, DacError> {
        let v = G::ScalarField::rand(rng);
        Self::new_with_given_randomness::<D>(v, secret_key, nonce, base)
    }

    /// Same as `Self::new` but the prover's randomness `v` is passed by the caller
    pub fn new_with_given_randomness<D: FullDigest>(
        v: G::ScalarField,
        secret_key: &SecretKey<G::ScalarField>,
        nonce: &[u8],
        base: &G,
    ) -> Result<Self, DacError> {
        let res_t = base.mul_bigint(v.into_bigint()).into_affine();
        let pk = base.mul_bigint(secret_key.0.into_bigint()).into_affine();
        let c = Self::compute_challenge::<D>(&res_t, &pk, nonce)?;
        Ok(Self {
            nonce: nonce.to_vec(),
            pk,
            res_t,
            res_r: v + secret_key.0 * c,
        })
    }

    /// `H(t || y || nonce)`
    pub fn compute_challenge<D: FullDigest>(
        t: &G,
        y: &G,
        nonce: &[u8],
    ) -> Result<G::ScalarField, DacError> {
        let mut challenge_bytes = vec![];
        t.serialize_compressed(&mut challenge_bytes)?;
        y.serialize_compressed(&mut challenge_bytes)?;
        challenge_bytes.extend_from_slice(nonce);
        Ok(hash_to_scalar::<G::ScalarField, D>(
            CRED_REQUEST_DST,
            &challenge_bytes,
        ))
    }

    /// `base * r - y * c == t`
    pub fn verify<D: FullDigest>(&self, base: &G) -> Result<(), DacError> {
        let c = Self::compute_challenge::<D>(&self.res_t, &self.pk, &self.nonce)?;
        let mut expected = base.mul_bigint(self.res_r.into_bigint());
        expected -= self.pk.mul_bigint(c.into_bigint());
        if expected.into_affine() != self.res_t {
            return Err(DacError::InvalidCredRequest);
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DacError> {
        Ok(to_octets(&self.to_octet_record()?)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DacError> {
        Self::from_octet_record(from_octets(bytes)?)
    }

    fn to_octet_record(&self) -> Result<CredRequestOctets, DacError> {
        Ok(CredRequestOctets {
            nonce: self.nonce.clone(),
            pk: to_octets(&self.pk)?,
            res_t: to_octets(&self.res_t)?,
            res_r: to_octets(&self.res_r)?,
        })
    }

    fn from_octet_record(record: CredRequestOctets) -> Result<Self, DacError> {
        Ok(Self {
            pk: from_octets(&record.pk)?,
            res_t: from_octets(&record.res_t)?,
            res_r: from_octets(&record.res_r)?,
            nonce: record.nonce,
        })
    }
}

impl<E: Pairing> LevelCredRequest<E> {
    /// Create a request for a credential at `level`. The base is the standard generator of G1 for odd levels
    /// and of G2 for even levels.
    pub fn make<R: RngCore, D: FullDigest>(
        rng: &mut R,
        secret_key: &SecretKey<E::ScalarField>,
        nonce: &[u8],
        level: usize,
    ) -> Result<Self, DacError> {
        Ok(match Group::for_level(level) {
            Group::G1 => Self::G1(CredRequest::new::<R, D>(
                rng,
                secret_key,
                nonce,
                &E::G1Affine::generator(),
            )?),
            Group::G2 => Self::G2(CredRequest::new::<R, D>(
                rng,
                secret_key,
                nonce,
                &E::G2Affine::generator(),
            )?),
        })
    }

    /// Verify the proof of knowledge of the secret key. The base is the generator of the group the request is in.
    pub fn validate<D: FullDigest>(&self) -> Result<(), DacError> {
        match self {
            Self::G1(r) => r.verify::<D>(&E::G1Affine::generator()),
            Self::G2(r) => r.verify::<D>(&E::G2Affine::generator()),
        }
    }

    pub fn group(&self) -> Group {
        match self {
            Self::G1(_) => Group::G1,
            Self::G2(_) => Group::G2,
        }
    }

    pub fn nonce(&self) -> &[u8] {
        match self {
            Self::G1(r) => &r.nonce,
            Self::G2(r) => &r.nonce,
        }
    }

    pub fn public_key(&self) -> GroupElement<E> {
        match self {
            Self::G1(r) => GroupElement::G1(r.pk),
            Self::G2(r) => GroupElement::G2(r.pk),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DacError> {
        match self {
            Self::G1(r) => r.to_bytes(),
            Self::G2(r) => r.to_bytes(),
        }
    }

    /// Decode a request, identifying its group from the length of the encoded public key. The commitment
    /// must be in the same group.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DacError> {
        let record: CredRequestOctets = from_octets(bytes)?;
        let group = Group::from_encoding_len::<E>(record.pk.len())?;
        if Group::from_encoding_len::<E>(record.res_t.len())? != group {
            return Err(DacError::MixedGroups);
        }
        Ok(match group {
            Group::G1 => Self::G1(CredRequest::from_octet_record(record)?),
            Group::G2 => Self::G2(CredRequest::from_octet_record(record)?),
        })
    }
}
