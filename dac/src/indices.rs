//! Disclosed attributes of a credential, addressed by `(level, position)`.
//!
//! The set is unordered but both prover and verifier hash it into the proof's challenge, so `hash` works on a
//! copy sorted by `(i, j)` in lexicographic order. Insertion order never affects the hash.

use crate::{error::DacError, group::GroupElement};
use ark_ec::pairing::Pairing;
use ark_serialize::CanonicalSerialize;
use ark_std::{io::Write, vec::Vec};
use serde::{Deserialize, Serialize};

/// Attribute at position `j` of level `i`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Index<E: Pairing> {
    pub i: usize,
    pub j: usize,
    pub attribute: GroupElement<E>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Indices<E: Pairing>(Vec<Index<E>>);

impl<E: Pairing> Default for Indices<E> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<E: Pairing> Indices<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute. A position can only be disclosed once.
    pub fn insert(&mut self, i: usize, j: usize, attribute: GroupElement<E>) -> Result<(), DacError> {
        if self.contains(i, j).is_some() {
            return Err(DacError::DuplicateIndex(i, j));
        }
        self.0.push(Index { i, j, attribute });
        Ok(())
    }

    /// The attribute at position `j` of level `i` if disclosed
    pub fn contains(&self, i: usize, j: usize) -> Option<&GroupElement<E>> {
        self.0
            .iter()
            .find(|idx| idx.i == i && idx.j == j)
            .map(|idx| &idx.attribute)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// In insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Index<E>> {
        self.0.iter()
    }

    /// Copy sorted by level and then by position
    pub fn sorted(&self) -> Vec<Index<E>> {
        let mut sorted = self.0.clone();
        sorted.sort_unstable_by_key(|idx| (idx.i, idx.j));
        sorted
    }

    /// Write `i || j || attribute` for every index in sorted order. `i` and `j` are written as 8 byte little
    /// endian integers and the attribute as its compressed encoding.
    pub fn challenge_contribution<W: Write>(&self, mut writer: W) -> Result<(), DacError> {
        for idx in self.sorted() {
            (idx.i as u64).serialize_compressed(&mut writer)?;
            (idx.j as u64).serialize_compressed(&mut writer)?;
            idx.attribute.serialize_point(&mut writer)?;
        }
        Ok(())
    }

    /// Canonical bytes of the set, to be hashed into a challenge
    pub fn hash(&self) -> Result<Vec<u8>, DacError> {
        let mut bytes = Vec::new();
        self.challenge_contribution(&mut bytes)?;
        Ok(bytes)
    }
}

impl<E: Pairing> TryFrom<Vec<Index<E>>> for Indices<E> {
    type Error = DacError;

    fn try_from(indices: Vec<Index<E>>) -> Result<Self, Self::Error> {
        let mut set = Self::new();
        for idx in indices {
            set.insert(idx.i, idx.j, idx.attribute)?;
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use ark_bls12_381::{Bls12_381, Fr, G1Affine, G2Affine};
    use ark_std::{
        rand::{rngs::StdRng, SeedableRng},
        UniformRand,
    };
    use blake2::Blake2b512;
    use dac_utils::hashing_utils::hash_to_scalar;

    type GE = GroupElement<Bls12_381>;

    #[test]
    fn insertion_order_does_not_matter() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let a = GE::G1(G1Affine::rand(&mut rng));
        let b = GE::G2(G2Affine::rand(&mut rng));

        let mut first = Indices::new();
        first.insert(1, 0, a).unwrap();
        first.insert(0, 2, b).unwrap();

        let mut second = Indices::new();
        second.insert(0, 2, b).unwrap();
        second.insert(1, 0, a).unwrap();

        assert_ne!(first, second);
        assert_eq!(first.hash().unwrap(), second.hash().unwrap());
        assert_eq!(
            hash_to_scalar::<Fr, Blake2b512>(b"test", &first.hash().unwrap()),
            hash_to_scalar::<Fr, Blake2b512>(b"test", &second.hash().unwrap())
        );

        let mut expected = Vec::new();
        expected.extend_from_slice(&0u64.to_le_bytes());
        expected.extend_from_slice(&2u64.to_le_bytes());
        expected.extend_from_slice(&b.to_octets().unwrap());
        expected.extend_from_slice(&1u64.to_le_bytes());
        expected.extend_from_slice(&0u64.to_le_bytes());
        expected.extend_from_slice(&a.to_octets().unwrap());
        assert_eq!(first.hash().unwrap(), expected);
    }

    #[test]
    fn lexicographic_order() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let positions = [(2, 0), (0, 5), (1, 1), (0, 1), (2, 3), (1, 0)];
        let mut indices = Indices::new();
        for (i, j) in positions {
            indices
                .insert(i, j, GE::G1(G1Affine::rand(&mut rng)))
                .unwrap();
        }
        let sorted: Vec<_> = indices.sorted().iter().map(|x| (x.i, x.j)).collect();
        assert_eq!(sorted, vec![(0, 1), (0, 5), (1, 0), (1, 1), (2, 0), (2, 3)]);

        // Every permutation hashes the same
        let reference = indices.hash().unwrap();
        let mut items: Vec<_> = indices.iter().copied().collect();
        for _ in 0..items.len() {
            items.rotate_left(1);
            let mut shuffled = items.clone();
            shuffled.reverse();
            for candidate in [items.clone(), shuffled] {
                let other = Indices::try_from(candidate).unwrap();
                assert_eq!(other.hash().unwrap(), reference);
            }
        }
    }

    #[test]
    fn positions_do_not_collide() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let attribute = GE::G1(G1Affine::rand(&mut rng));

        let mut first = Indices::new();
        first.insert(1, 12, attribute).unwrap();
        let mut second = Indices::new();
        second.insert(11, 2, attribute).unwrap();
        assert_ne!(first.hash().unwrap(), second.hash().unwrap());
    }

    #[test]
    fn lookup_and_duplicates() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let a = GE::G1(G1Affine::rand(&mut rng));
        let b = GE::G1(G1Affine::rand(&mut rng));

        let mut indices = Indices::<Bls12_381>::new();
        assert!(indices.is_empty());
        assert!(indices.hash().unwrap().is_empty());

        indices.insert(3, 1, a).unwrap();
        assert_eq!(indices.contains(3, 1), Some(&a));
        assert!(indices.contains(1, 3).is_none());

        let err = indices.insert(3, 1, b).unwrap_err();
        assert!(matches!(err, DacError::DuplicateIndex(3, 1)));
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
        assert_eq!(indices.len(), 1);
        assert_eq!(indices.contains(3, 1), Some(&a));

        assert!(Indices::try_from(vec![
            Index { i: 0, j: 0, attribute: a },
            Index { i: 0, j: 0, attribute: b },
        ])
        .is_err());

        let ser = serde_json::to_string(&indices).unwrap();
        assert_eq!(
            serde_json::from_str::<Indices<Bls12_381>>(&ser).unwrap(),
            indices
        );
    }
}
