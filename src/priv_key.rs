use num_bigint::BigUint;
use num_bigint_dig::BigUint as SecretUint;
use num_integer::Integer;
use num_traits::{CheckedSub, One, Zero};
use std::fmt;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::pub_key::PublicKey;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrivKeyError {
    #[error("cipher size must be smaller than Paillier public key size")]
    LargeCipher,
    #[error("malformed ciphertext: not an element of Z*_(n^2)")]
    MalformedCipher,
}

/// Paillier private key.
///
/// Holds the public key it was derived from together with `l = phi(n)` and
/// `u = l^-1 mod n`. The prime factors of `n` are not kept.
///
/// `l` and `u` live in `num-bigint-dig` integers whose digit buffers are
/// overwritten with zeros when the key is dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    #[zeroize(skip)]
    pub_key: PublicKey,
    #[zeroize(skip)]
    n: SecretUint,
    #[zeroize(skip)]
    n_squared: SecretUint,
    l: SecretUint,
    u: SecretUint,
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("pub_key", &self.pub_key)
            .finish_non_exhaustive()
    }
}

fn to_secret(value: &BigUint) -> SecretUint {
    let bytes = Zeroizing::new(value.to_bytes_be());
    SecretUint::from_bytes_be(&bytes)
}

fn from_secret(value: &SecretUint) -> BigUint {
    let bytes = Zeroizing::new(value.to_bytes_be());
    BigUint::from_bytes_be(&bytes)
}

impl PrivateKey {
    /// Takes `l` and `u` by value; only the copies held by the key are wiped.
    pub(crate) fn new(pub_key: PublicKey, l: BigUint, u: BigUint) -> Self {
        let n = to_secret(pub_key.n());
        let n_squared = to_secret(pub_key.n_squared());
        PrivateKey {
            pub_key,
            n,
            n_squared,
            l: to_secret(&l),
            u: to_secret(&u),
        }
    }

    #[inline]
    pub fn pub_key(&self) -> &PublicKey {
        &self.pub_key
    }

    /// `phi(n) = (p - 1)(q - 1)`. The returned copy is not wiped on drop.
    pub fn l(&self) -> BigUint {
        from_secret(&self.l)
    }

    /// `l^-1 mod n`. The returned copy is not wiped on drop.
    pub fn u(&self) -> BigUint {
        from_secret(&self.u)
    }

    /// Decrypts a big-endian ciphertext into the minimal big-endian plaintext.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, PrivKeyError> {
        let c = SecretUint::from_bytes_be(ciphertext);
        if c >= self.n_squared {
            return Err(PrivKeyError::LargeCipher);
        }

        let a = c.modpow(&self.l, &self.n_squared);

        // L(a) = (a - 1) / n, exact for every valid ciphertext
        let a_minus_one = a
            .checked_sub(&SecretUint::one())
            .ok_or(PrivKeyError::MalformedCipher)?;
        let (l_a, rem) = a_minus_one.div_rem(&self.n);
        if !rem.is_zero() {
            return Err(PrivKeyError::MalformedCipher);
        }

        let m = (l_a * &self.u) % &self.n;
        if m.is_zero() {
            return Ok(Vec::new());
        }
        Ok(m.to_bytes_be())
    }
}
