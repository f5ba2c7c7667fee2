use crate::aliases::FullDigest;
use ark_ff::{
    field_hashers::{DefaultFieldHasher, HashToField},
    PrimeField,
};

/// Hash `msg` to a single element of the field `F` using the `hash_to_field` procedure of the
/// [hash-to-curve draft](https://datatracker.ietf.org/doc/html/draft-irtf-cfrg-hash-to-curve-16#section-5.2)
/// with `expand_message_xmd`. `dst` is the domain separation tag and every call site hashing into the
/// field for a different purpose must use its own tag.
pub fn hash_to_scalar<F: PrimeField, D: FullDigest>(dst: &[u8], msg: &[u8]) -> F {
    let hasher = <DefaultFieldHasher<D> as HashToField<F>>::new(dst);
    hasher.hash_to_field(msg, 1)[0]
}
