//! Group elements whose group is decided at runtime.
//!
//! Objects at delegation level `L` live in group G1 when `L` is odd and in group G2 when `L` is even. Algorithms
//! that work the same over both groups are written generically over `AffineRepr` and the level picks the
//! concrete group once, at the boundary. Containers spanning several levels (proofs, credential chains) hold
//! `GroupElement`, a tagged variant over the two groups.

use crate::error::DacError;
use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_ff::PrimeField;
use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, SerializationError, Valid, Validate,
};
use ark_std::{
    io::{Read, Write},
    ops::Neg,
    vec::Vec,
};
use dac_utils::{
    octets::{from_octets, to_octets},
    serde_utils::ArkObjectBytes,
};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

/// One of the two source groups of the pairing
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Group {
    G1,
    G2,
}

impl Group {
    /// Odd levels use G1, even levels use G2
    pub fn for_level(level: usize) -> Self {
        if level % 2 == 1 {
            Self::G1
        } else {
            Self::G2
        }
    }

    /// Size of the compressed encoding of an element of this group
    pub fn compressed_size<E: Pairing>(&self) -> usize {
        match self {
            Self::G1 => E::G1Affine::generator().compressed_size(),
            Self::G2 => E::G2Affine::generator().compressed_size(),
        }
    }

    /// Identify the group of a compressed encoding by its length
    pub fn from_encoding_len<E: Pairing>(len: usize) -> Result<Self, DacError> {
        let g1_size = Self::G1.compressed_size::<E>();
        let g2_size = Self::G2.compressed_size::<E>();
        if g1_size == g2_size {
            return Err(DacError::AmbiguousGroupEncoding(len));
        }
        if len == g1_size {
            Ok(Self::G1)
        } else if len == g2_size {
            Ok(Self::G2)
        } else {
            Err(DacError::UnrecognizedGroupElementEncoding(len))
        }
    }
}

#[serde_as]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum GroupElement<E: Pairing> {
    G1(#[serde_as(as = "ArkObjectBytes")] E::G1Affine),
    G2(#[serde_as(as = "ArkObjectBytes")] E::G2Affine),
}

impl<E: Pairing> GroupElement<E> {
    /// Standard generator of the group used at `level`
    pub fn generator_for_level(level: usize) -> Self {
        match Group::for_level(level) {
            Group::G1 => Self::G1(E::G1Affine::generator()),
            Group::G2 => Self::G2(E::G2Affine::generator()),
        }
    }

    /// Public key for secret key `sk` at `level`, i.e. `g * sk` where `g` is the level's generator
    pub fn public_key_for_level(sk: &E::ScalarField, level: usize) -> Self {
        Self::generator_for_level(level).mul(sk)
    }

    pub fn group(&self) -> Group {
        match self {
            Self::G1(_) => Group::G1,
            Self::G2(_) => Group::G2,
        }
    }

    pub fn mul(&self, scalar: &E::ScalarField) -> Self {
        let s = scalar.into_bigint();
        match self {
            Self::G1(p) => Self::G1(p.mul_bigint(s).into_affine()),
            Self::G2(p) => Self::G2(p.mul_bigint(s).into_affine()),
        }
    }

    /// Sum of 2 elements of the same group
    pub fn add(&self, other: &Self) -> Result<Self, DacError> {
        match (self, other) {
            (Self::G1(a), Self::G1(b)) => Ok(Self::G1((*a + *b).into_affine())),
            (Self::G2(a), Self::G2(b)) => Ok(Self::G2((*a + *b).into_affine())),
            _ => Err(DacError::MixedGroups),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Self::G1(p) => p.is_zero(),
            Self::G2(p) => p.is_zero(),
        }
    }

    /// Write the compressed encoding of the point, without any tag identifying the group
    pub fn serialize_point<W: Write>(&self, writer: W) -> Result<(), SerializationError> {
        match self {
            Self::G1(p) => p.serialize_compressed(writer),
            Self::G2(p) => p.serialize_compressed(writer),
        }
    }

    /// Compressed encoding of the point. The group is implied by the length.
    pub fn to_octets(&self) -> Result<Vec<u8>, DacError> {
        Ok(match self {
            Self::G1(p) => to_octets(p)?,
            Self::G2(p) => to_octets(p)?,
        })
    }

    /// Decode a point from its compressed encoding, picking the group from the encoding's length
    pub fn from_octets(bytes: &[u8]) -> Result<Self, DacError> {
        Ok(match Group::from_encoding_len::<E>(bytes.len())? {
            Group::G1 => Self::G1(from_octets(bytes)?),
            Group::G2 => Self::G2(from_octets(bytes)?),
        })
    }
}

impl<E: Pairing> Neg for GroupElement<E> {
    type Output = Self;

    fn neg(self) -> Self {
        match self {
            Self::G1(p) => Self::G1((-p.into_group()).into_affine()),
            Self::G2(p) => Self::G2((-p.into_group()).into_affine()),
        }
    }
}

pub(crate) fn elements_to_octets<E: Pairing>(
    elements: &[GroupElement<E>],
) -> Result<Vec<Vec<u8>>, DacError> {
    elements.iter().map(GroupElement::to_octets).collect()
}

pub(crate) fn elements_from_octets<E: Pairing>(
    octets: &[Vec<u8>],
) -> Result<Vec<GroupElement<E>>, DacError> {
    octets.iter().map(|o| GroupElement::from_octets(o)).collect()
}

pub(crate) fn nested_elements_to_octets<E: Pairing>(
    elements: &[Vec<GroupElement<E>>],
) -> Result<Vec<Vec<Vec<u8>>>, DacError> {
    elements.iter().map(|e| elements_to_octets(e)).collect()
}

pub(crate) fn nested_elements_from_octets<E: Pairing>(
    octets: &[Vec<Vec<u8>>],
) -> Result<Vec<Vec<GroupElement<E>>>, DacError> {
    octets.iter().map(|o| elements_from_octets(o)).collect()
}

const G1_TAG: u8 = 1;
const G2_TAG: u8 = 2;

// The canonical encoding prefixes the point with a tag for its group. This is used when the object holding the
// element is serialized with arkworks, the wire formats use `to_octets` instead.

impl<E: Pairing> CanonicalSerialize for GroupElement<E> {
    fn serialize_with_mode<W: Write>(
        &self,
        mut writer: W,
        compress: Compress,
    ) -> Result<(), SerializationError> {
        match self {
            Self::G1(p) => {
                G1_TAG.serialize_with_mode(&mut writer, compress)?;
                p.serialize_with_mode(writer, compress)
            }
            Self::G2(p) => {
                G2_TAG.serialize_with_mode(&mut writer, compress)?;
                p.serialize_with_mode(writer, compress)
            }
        }
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        1 + match self {
            Self::G1(p) => p.serialized_size(compress),
            Self::G2(p) => p.serialized_size(compress),
        }
    }
}

impl<E: Pairing> Valid for GroupElement<E> {
    fn check(&self) -> Result<(), SerializationError> {
        match self {
            Self::G1(p) => p.check(),
            Self::G2(p) => p.check(),
        }
    }
}

impl<E: Pairing> CanonicalDeserialize for GroupElement<E> {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        match u8::deserialize_with_mode(&mut reader, compress, validate)? {
            G1_TAG => Ok(Self::G1(E::G1Affine::deserialize_with_mode(
                reader, compress, validate,
            )?)),
            G2_TAG => Ok(Self::G2(E::G2Affine::deserialize_with_mode(
                reader, compress, validate,
            )?)),
            _ => Err(SerializationError::InvalidData),
        }
    }
}
