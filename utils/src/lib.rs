#![cfg_attr(not(feature = "std"), no_std)]

//! Common code for the delegatable anonymous credential crates. Nothing in here depends on the credential
//! scheme itself: hashing to the scalar field, strict octet-string encoding of arkworks objects and serde
//! adapters for them.

pub mod aliases;
pub mod hashing_utils;
pub mod octets;
pub mod serde_utils;
