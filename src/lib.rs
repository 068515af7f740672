//! This crate implements the Paillier cryptosystem.
//!
//! Based on:
//! [Paillier, 1999](https://link.springer.com/content/pdf/10.1007/3-540-48910-X_16.pdf)
//! This crate provides key generation, encryption, decryption and additive
//! homomorphic combination of ciphertexts. The generator is fixed to `n + 1`.
//!
//! Plaintexts and ciphertexts are unsigned big-endian byte strings of minimal
//! length. Callers that need fixed-width encodings pad them themselves.
//!
//! # Example
//! ```
//! use num_bigint::BigUint;
//! use paillier::KeyPair;
//!
//! let key_pair = KeyPair::new(512).unwrap();
//! let pk = key_pair.pub_key();
//!
//! let c1 = pk.encrypt(&[42]).unwrap();
//! let c2 = pk.encrypt(&[58]).unwrap();
//! let sum = pk.homomorphic_add_two(&c1, &c2).unwrap();
//!
//! let plaintext = key_pair.priv_key().decrypt(&sum).unwrap();
//! assert_eq!(BigUint::from_bytes_be(&plaintext), BigUint::from(100u32));
//! ```

pub mod functions;
pub mod keygen;
pub mod priv_key;
pub mod pub_key;

pub use functions::FunctionError;
pub use keygen::{KeyGenError, KeyPair, DEFAULT_BIT_SIZE};
pub use priv_key::{PrivKeyError, PrivateKey};
pub use pub_key::{PubKeyError, PublicKey};
