//! Transcript of the non-interactive proof shown for a credential with `L` delegation levels.
//!
//! The proof holds one global challenge `c` and, for every level `i < L`, a randomized signature element
//! `r_prime[i]`, a scalar response `res_s[i]`, the commitment response `res_cpk[i]` for the level's public key
//! and one `res_t[i][j]`, `res_a[i][j]` pair per attribute `j` at that level. `res_csk` and `res_nym` are the
//! responses for the holder's secret key and pseudonym blinding.
//!
//! Creating and verifying the proof happen elsewhere. This module fixes the structure, the wire format and
//! equality. Construction and every decoder reject inconsistent dimensions.

use crate::{
    error::DacError,
    group::{
        elements_from_octets, elements_to_octets, nested_elements_from_octets,
        nested_elements_to_octets, GroupElement,
    },
};
use ark_ec::pairing::Pairing;
use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate,
};
use ark_std::vec::Vec;
use dac_utils::{
    octets::{from_octets, from_octets_list, to_octets, to_octets_list},
    serde_utils::ArkObjectBytes,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_with::serde_as;

/// Equality is structural: field by field in declaration order, lists by length first and then element-wise,
/// points with the group's equality.
#[serde_as]
#[derive(Clone, PartialEq, Eq, Debug, CanonicalSerialize, Serialize)]
#[serde(bound = "")]
pub struct Proof<E: Pairing> {
    #[serde_as(as = "ArkObjectBytes")]
    pub c: E::ScalarField,
    pub r_prime: Vec<GroupElement<E>>,
    #[serde_as(as = "Vec<ArkObjectBytes>")]
    pub res_s: Vec<E::ScalarField>,
    pub res_t: Vec<Vec<GroupElement<E>>>,
    pub res_a: Vec<Vec<GroupElement<E>>>,
    pub res_cpk: Vec<GroupElement<E>>,
    #[serde_as(as = "ArkObjectBytes")]
    pub res_csk: E::ScalarField,
    #[serde_as(as = "ArkObjectBytes")]
    pub res_nym: E::ScalarField,
}

/// Serde form of `Proof` before its dimensions are checked
#[serde_as]
#[derive(Deserialize)]
#[serde(bound = "")]
struct UncheckedProof<E: Pairing> {
    #[serde_as(as = "ArkObjectBytes")]
    c: E::ScalarField,
    r_prime: Vec<GroupElement<E>>,
    #[serde_as(as = "Vec<ArkObjectBytes>")]
    res_s: Vec<E::ScalarField>,
    res_t: Vec<Vec<GroupElement<E>>>,
    res_a: Vec<Vec<GroupElement<E>>>,
    res_cpk: Vec<GroupElement<E>>,
    #[serde_as(as = "ArkObjectBytes")]
    res_csk: E::ScalarField,
    #[serde_as(as = "ArkObjectBytes")]
    res_nym: E::ScalarField,
}

#[derive(CanonicalSerialize, CanonicalDeserialize)]
struct ProofOctets {
    c: Vec<u8>,
    r_prime: Vec<Vec<u8>>,
    res_s: Vec<Vec<u8>>,
    res_t: Vec<Vec<Vec<u8>>>,
    res_a: Vec<Vec<Vec<u8>>>,
    res_cpk: Vec<Vec<u8>>,
    res_csk: Vec<u8>,
    res_nym: Vec<u8>,
}

impl<E: Pairing> Proof<E> {
    pub fn new(
        c: E::ScalarField,
        r_prime: Vec<GroupElement<E>>,
        res_s: Vec<E::ScalarField>,
        res_t: Vec<Vec<GroupElement<E>>>,
        res_a: Vec<Vec<GroupElement<E>>>,
        res_cpk: Vec<GroupElement<E>>,
        res_csk: E::ScalarField,
        res_nym: E::ScalarField,
    ) -> Result<Self, DacError> {
        let proof = Self {
            c,
            r_prime,
            res_s,
            res_t,
            res_a,
            res_cpk,
            res_csk,
            res_nym,
        };
        proof.validate_dimensions()?;
        Ok(proof)
    }

    /// Number of delegation levels
    pub fn levels(&self) -> usize {
        self.r_prime.len()
    }

    /// Every per-level list has one entry per level, and at each level there are as many `res_t` as `res_a`
    pub fn validate_dimensions(&self) -> Result<(), DacError> {
        let levels = self.levels();
        for len in [
            self.res_s.len(),
            self.res_t.len(),
            self.res_a.len(),
            self.res_cpk.len(),
        ] {
            if len != levels {
                return Err(DacError::UnequalSizeOfSequence(len, levels));
            }
        }
        for (i, (t, a)) in self.res_t.iter().zip(self.res_a.iter()).enumerate() {
            if t.len() != a.len() {
                return Err(DacError::UnequalAttributeResponses(i, t.len(), a.len()));
            }
        }
        Ok(())
    }

    /// Check the proof against the number of attributes declared at each level
    pub fn check_attribute_counts(&self, attribute_counts: &[usize]) -> Result<(), DacError> {
        self.validate_dimensions()?;
        if attribute_counts.len() != self.levels() {
            return Err(DacError::UnequalSizeOfSequence(
                attribute_counts.len(),
                self.levels(),
            ));
        }
        for (i, (expected, t)) in attribute_counts.iter().zip(self.res_t.iter()).enumerate() {
            if *expected != t.len() {
                return Err(DacError::IncompatibleAttributeCount(i, *expected, t.len()));
            }
        }
        Ok(())
    }

    /// Encode a proof. A proof with inconsistent dimensions is not encoded.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DacError> {
        self.validate_dimensions()?;
        Ok(to_octets(&self.to_octet_record()?)?)
    }

    /// Decode a proof. Fails on malformed or truncated input and on inconsistent dimensions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DacError> {
        let record: ProofOctets = from_octets(bytes)?;
        Self::new(
            from_octets(&record.c)?,
            elements_from_octets(&record.r_prime)?,
            from_octets_list(&record.res_s)?,
            nested_elements_from_octets(&record.res_t)?,
            nested_elements_from_octets(&record.res_a)?,
            elements_from_octets(&record.res_cpk)?,
            from_octets(&record.res_csk)?,
            from_octets(&record.res_nym)?,
        )
    }

    fn to_octet_record(&self) -> Result<ProofOctets, DacError> {
        Ok(ProofOctets {
            c: to_octets(&self.c)?,
            r_prime: elements_to_octets(&self.r_prime)?,
            res_s: to_octets_list(&self.res_s)?,
            res_t: nested_elements_to_octets(&self.res_t)?,
            res_a: nested_elements_to_octets(&self.res_a)?,
            res_cpk: elements_to_octets(&self.res_cpk)?,
            res_csk: to_octets(&self.res_csk)?,
            res_nym: to_octets(&self.res_nym)?,
        })
    }
}

impl<E: Pairing> Valid for Proof<E> {
    fn check(&self) -> Result<(), SerializationError> {
        self.r_prime.check()?;
        self.res_t.check()?;
        self.res_a.check()?;
        self.res_cpk.check()?;
        self.validate_dimensions()
            .map_err(|_| SerializationError::InvalidData)
    }
}

impl<E: Pairing> CanonicalDeserialize for Proof<E> {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let proof = Self {
            c: CanonicalDeserialize::deserialize_with_mode(&mut reader, compress, validate)?,
            r_prime: CanonicalDeserialize::deserialize_with_mode(&mut reader, compress, validate)?,
            res_s: CanonicalDeserialize::deserialize_with_mode(&mut reader, compress, validate)?,
            res_t: CanonicalDeserialize::deserialize_with_mode(&mut reader, compress, validate)?,
            res_a: CanonicalDeserialize::deserialize_with_mode(&mut reader, compress, validate)?,
            res_cpk: CanonicalDeserialize::deserialize_with_mode(&mut reader, compress, validate)?,
            res_csk: CanonicalDeserialize::deserialize_with_mode(&mut reader, compress, validate)?,
            res_nym: CanonicalDeserialize::deserialize_with_mode(&mut reader, compress, validate)?,
        };
        if let Validate::Yes = validate {
            proof
                .validate_dimensions()
                .map_err(|_| SerializationError::InvalidData)?;
        }
        Ok(proof)
    }
}

impl<'de, E: Pairing> Deserialize<'de> for Proof<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let p = UncheckedProof::<E>::deserialize(deserializer)?;
        Self::new(
            p.c, p.r_prime, p.res_s, p.res_t, p.res_a, p.res_cpk, p.res_csk, p.res_nym,
        )
        .map_err(|e| serde::de::Error::custom(format_args!("invalid proof: {:?}", e)))
    }
}
