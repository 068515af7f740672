use num_bigint::BigUint;
use num_traits::One;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use thiserror::Error;

use crate::functions::{bytes_to_int, int_to_bytes, random_prime, FunctionError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PubKeyError {
    #[error("invalid modulus: must be greater than one")]
    InvalidModulus,
    #[error("message size must be smaller than Paillier public key size")]
    LargeMessage,
    #[error("cipher size must be smaller than Paillier public key size")]
    LargeCipher,
    #[error("random number generation failed: {0}")]
    RandomNumber(#[from] FunctionError),
}

/// Paillier public key. `g` is fixed to `n + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    n: BigUint,
    g: BigUint,
    n_squared: BigUint,
}

impl PublicKey {
    /// Builds the public key for modulus `n`, deriving `g = n + 1` and `n^2`.
    pub fn new(n: BigUint) -> Result<Self, PubKeyError> {
        if n <= BigUint::one() {
            return Err(PubKeyError::InvalidModulus);
        }
        let g = &n + BigUint::one();
        let n_squared = &n * &n;
        Ok(PublicKey { n, g, n_squared })
    }

    #[inline]
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    #[inline]
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    #[inline]
    pub fn n_squared(&self) -> &BigUint {
        &self.n_squared
    }

    /// Bit length of the modulus.
    #[inline]
    pub fn bit_length(&self) -> usize {
        self.n.bits() as usize
    }

    /// Encrypts a big-endian plaintext using OS randomness.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, PubKeyError> {
        self.encrypt_with_rng(&mut OsRng, plaintext)
    }

    /// Encrypts a big-endian plaintext, drawing the blinding factor from `rng`.
    ///
    /// The plaintext must be smaller than `n`. The returned ciphertext is
    /// `g^m * r^n mod n^2` where `r` is a fresh prime of the modulus' bit
    /// length, so encrypting the same message twice gives different outputs.
    pub fn encrypt_with_rng<R>(&self, rng: &mut R, plaintext: &[u8]) -> Result<Vec<u8>, PubKeyError>
    where
        R: RngCore + CryptoRng,
    {
        let m = bytes_to_int(plaintext);
        if m >= self.n {
            return Err(PubKeyError::LargeMessage);
        }

        let r = random_prime(rng, self.bit_length())?;
        let c = self.encrypt_fixed(&m, &r);
        Ok(int_to_bytes(&c))
    }

    pub(crate) fn encrypt_fixed(&self, m: &BigUint, r: &BigUint) -> BigUint {
        let g_m = self.g.modpow(m, &self.n_squared);
        let r_n = r.modpow(&self.n, &self.n_squared);
        (g_m * r_n) % &self.n_squared
    }

    /// Combines two ciphertexts into one that decrypts to the sum of their
    /// plaintexts modulo `n`.
    pub fn homomorphic_add_two(&self, c1: &[u8], c2: &[u8]) -> Result<Vec<u8>, PubKeyError> {
        let cipher_a = bytes_to_int(c1);
        let cipher_b = bytes_to_int(c2);
        if cipher_a >= self.n_squared || cipher_b >= self.n_squared {
            return Err(PubKeyError::LargeCipher);
        }

        let c = (cipher_a * cipher_b) % &self.n_squared;
        Ok(int_to_bytes(&c))
    }

    /// Folds any number of ciphertexts into one that decrypts to the sum of
    /// all their plaintexts modulo `n`.
    ///
    /// An empty input yields the encoding of one, the neutral element of
    /// ciphertext multiplication. Validation stops at the first oversized
    /// ciphertext with [`PubKeyError::LargeCipher`].
    pub fn homomorphic_add_many<C>(&self, ciphers: &[C]) -> Result<Vec<u8>, PubKeyError>
    where
        C: AsRef<[u8]>,
    {
        let mut sum = BigUint::one();
        for cipher in ciphers {
            let ci = bytes_to_int(cipher.as_ref());
            if ci >= self.n_squared {
                return Err(PubKeyError::LargeCipher);
            }
            sum = (sum * ci) % &self.n_squared;
        }
        Ok(int_to_bytes(&sum))
    }
}
