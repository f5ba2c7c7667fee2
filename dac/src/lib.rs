#![cfg_attr(not(feature = "std"), no_std)]

//! Building blocks of a delegatable anonymous credential scheme over a pairing friendly curve.
//!
//! - [Credential request](./src/cred_request.rs): a public key with a proof of knowledge of its secret key bound
//!   to an issuer chosen nonce.
//! - [Pseudonyms](./src/pseudonym.rs): unlinkable commitments to a secret key and signatures under them.
//! - [Proof](./src/proof.rs) and [Credentials](./src/credentials.rs): structure, wire format and equality of the
//!   credential showing proof and of the delegation chain of signatures.
//! - [Indices](./src/indices.rs): disclosed attributes and their canonical encoding for hashing.
//! - [Pairing evaluator](./src/pairing.rs): evaluates a matrix of pairing products, in parallel if enabled.
//!
//! Objects at an odd delegation level are in group G1 and objects at an even level in group G2, see
//! [`group`](./src/group.rs).

pub mod cred_request;
pub mod credentials;
pub mod error;
pub mod group;
pub mod indices;
pub mod keys;
pub mod pairing;
pub mod proof;
pub mod pseudonym;

#[cfg(test)]
#[macro_export]
macro_rules! test_serialization {
    ($obj_type:ty, $obj: expr) => {
        let mut serz = vec![];
        ark_serialize::CanonicalSerialize::serialize_compressed(&$obj, &mut serz).unwrap();
        let deserz: $obj_type =
            ark_serialize::CanonicalDeserialize::deserialize_compressed(&serz[..]).unwrap();
        assert_eq!(deserz, $obj);

        let mut serz = vec![];
        ark_serialize::CanonicalSerialize::serialize_uncompressed(&$obj, &mut serz).unwrap();
        let deserz: $obj_type =
            ark_serialize::CanonicalDeserialize::deserialize_uncompressed(&serz[..]).unwrap();
        assert_eq!(deserz, $obj);

        // Test JSON serialization
        let ser = serde_json::to_string(&$obj).unwrap();
        let deser = serde_json::from_str::<$obj_type>(&ser).unwrap();
        assert_eq!($obj, deser);

        // Test Message Pack serialization
        let ser = rmp_serde::to_vec_named(&$obj).unwrap();
        let deser = rmp_serde::from_slice::<$obj_type>(&ser).unwrap();
        assert_eq!($obj, deser);
    };
}
