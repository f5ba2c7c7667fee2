use crate::group::GroupElement;
use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::RngCore;
use dac_utils::{aliases::FullDigest, hashing_utils::hash_to_scalar, serde_utils::ArkObjectBytes};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Secret key of a credential holder or issuer
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
pub struct SecretKey<F: PrimeField>(#[serde_as(as = "ArkObjectBytes")] pub F);

/// `g * sk` for a generator `g` of the group the key is used in
#[serde_as]
#[derive(
    Clone, Copy, PartialEq, Eq, Debug, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
pub struct PublicKey<G: AffineRepr>(#[serde_as(as = "ArkObjectBytes")] pub G);

impl<F: PrimeField> SecretKey<F> {
    pub const DST: &'static [u8] = b"DAC-KEYGEN-SALT";

    pub fn new<R: RngCore>(rng: &mut R) -> Self {
        Self(F::rand(rng))
    }

    /// Derive the key from a seed. The seed must carry enough entropy.
    pub fn generate_using_seed<D: FullDigest>(seed: &[u8]) -> Self {
        Self(hash_to_scalar::<F, D>(Self::DST, seed))
    }
}

impl<G: AffineRepr> PublicKey<G> {
    pub fn new(secret_key: &SecretKey<G::ScalarField>, base: &G) -> Self {
        Self(base.mul_bigint(secret_key.0.into_bigint()).into_affine())
    }

    /// Public key over the group's standard generator
    pub fn new_with_generator(secret_key: &SecretKey<G::ScalarField>) -> Self {
        Self::new(secret_key, &G::generator())
    }
}

impl<E: Pairing> GroupElement<E> {
    /// Public key of `secret_key` at delegation level `level`
    pub fn from_secret_key(secret_key: &SecretKey<E::ScalarField>, level: usize) -> Self {
        Self::public_key_for_level(&secret_key.0, level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::Group;
    use ark_bls12_381::{Bls12_381, Fr, G1Affine, G2Affine};
    use ark_std::rand::{rngs::StdRng, SeedableRng};
    use blake2::Blake2b512;

    #[test]
    fn keygen() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let sk = SecretKey::<Fr>::new(&mut rng);
        let pk1 = PublicKey::<G1Affine>::new_with_generator(&sk);
        let pk2 = PublicKey::<G2Affine>::new_with_generator(&sk);
        assert_eq!(pk1.0, (G1Affine::generator() * sk.0).into_affine());
        assert_eq!(pk2.0, (G2Affine::generator() * sk.0).into_affine());

        assert_eq!(
            GroupElement::<Bls12_381>::from_secret_key(&sk, 1),
            GroupElement::G1(pk1.0)
        );
        assert_eq!(
            GroupElement::<Bls12_381>::from_secret_key(&sk, 2),
            GroupElement::G2(pk2.0)
        );
        assert_eq!(
            GroupElement::<Bls12_381>::from_secret_key(&sk, 5).group(),
            Group::G1
        );

        let seed = [0, 1, 2, 5, 10, 13];
        let sk_a = SecretKey::<Fr>::generate_using_seed::<Blake2b512>(&seed);
        let sk_b = SecretKey::<Fr>::generate_using_seed::<Blake2b512>(&seed);
        assert_eq!(sk_a, sk_b);
        let sk_c = SecretKey::<Fr>::generate_using_seed::<Blake2b512>(&[1, 2, 3]);
        assert_ne!(sk_a, sk_c);

        let ser = serde_json::to_string(&pk2).unwrap();
        assert_eq!(serde_json::from_str::<PublicKey<G2Affine>>(&ser).unwrap(), pk2);
    }
}
