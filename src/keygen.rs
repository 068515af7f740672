use num_bigint::BigUint;
use num_traits::One;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use thiserror::Error;

use crate::functions::{is_probable_prime, random_prime, FunctionError};
use crate::priv_key::PrivateKey;
use crate::pub_key::{PubKeyError, PublicKey};

/// Modulus size used by [`KeyPair::new_default`].
pub const DEFAULT_BIT_SIZE: usize = 2048;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyGenError {
    #[error(transparent)]
    PrimeGeneration(#[from] FunctionError),
    #[error("p and q must be distinct primes")]
    InvalidPrimes,
    #[error("failed to compute modular inverse of phi(n) mod n")]
    NoModularInverse,
    #[error("invalid public key: {0}")]
    InvalidPublicKey(#[from] PubKeyError),
}

/// A Paillier public key and its matching private key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub_key: PublicKey,
    priv_key: PrivateKey,
}

impl KeyPair {
    /// Generates a key pair with a modulus of `bit_size` bits using OS randomness.
    pub fn new(bit_size: usize) -> Result<Self, KeyGenError> {
        Self::generate(&mut OsRng, bit_size)
    }

    /// Generates a key pair with a [`DEFAULT_BIT_SIZE`] modulus.
    pub fn new_default() -> Result<Self, KeyGenError> {
        Self::new(DEFAULT_BIT_SIZE)
    }

    /// Generates a key pair from the given randomness source.
    ///
    /// Both primes are `bit_size / 2` bits long, so an odd `bit_size` gives a
    /// modulus one bit shorter than requested. Fails if `bit_size / 2 < 2`,
    /// or if both draws return the same prime, which only tiny sizes make
    /// likely.
    pub fn generate<R>(rng: &mut R, bit_size: usize) -> Result<Self, KeyGenError>
    where
        R: RngCore + CryptoRng,
    {
        let prime_size = bit_size / 2;

        let p = random_prime(rng, prime_size)?;
        let q = random_prime(rng, prime_size)?;

        let key_pair = Self::from_primes(&p, &q)?;
        log::debug!(
            "generated Paillier key: requested {} bits, modulus {} bits",
            bit_size,
            key_pair.pub_key.bit_length()
        );
        Ok(key_pair)
    }

    /// Builds a key pair from two known primes. The primes are not retained.
    ///
    /// Fails with [`KeyGenError::InvalidPrimes`] unless `p` and `q` are
    /// distinct probable primes, and with [`KeyGenError::NoModularInverse`]
    /// when `gcd(n, phi(n)) != 1`, e.g. `p = 23`, `q = 47`.
    pub fn from_primes(p: &BigUint, q: &BigUint) -> Result<Self, KeyGenError> {
        if p == q || !is_probable_prime(p) || !is_probable_prime(q) {
            return Err(KeyGenError::InvalidPrimes);
        }

        let n = p * q;
        let pub_key = PublicKey::new(n)?;

        // l = phi(n) = (p - 1)(q - 1)
        let l = (p - BigUint::one()) * (q - BigUint::one());
        let u = l
            .modinv(pub_key.n())
            .ok_or(KeyGenError::NoModularInverse)?;

        let priv_key = PrivateKey::new(pub_key.clone(), l, u);
        Ok(KeyPair { pub_key, priv_key })
    }

    #[inline]
    pub fn pub_key(&self) -> &PublicKey {
        &self.pub_key
    }

    #[inline]
    pub fn priv_key(&self) -> &PrivateKey {
        &self.priv_key
    }
}
