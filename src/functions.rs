use num_bigint::BigUint;
use num_traits::Zero;
use rand::{CryptoRng, RngCore};
use rug::{integer::IsPrime, integer::Order, Integer};
use std::convert::TryInto;
use thiserror::Error;

/// Miller-Rabin rounds used when testing prime candidates.
pub const MILLER_RABIN_ROUNDS: u32 = 40;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FunctionError {
    #[error("random number generation failed")]
    RandomNumberGeneration,
    #[error("invalid prime bit length: {0} < 2")]
    InvalidBitLength(usize),
}

/// Samples a random prime of exactly `bits` bits.
///
/// Every candidate is read straight from `rng`, trimmed to `bits` bits, and
/// forced odd with the two most significant bits set; the first one passing
/// the probabilistic primality test is returned. With the top two bits set,
/// the product of two such primes has exactly `2 * bits` bits.
pub fn random_prime<R>(rng: &mut R, bits: usize) -> Result<BigUint, FunctionError>
where
    R: RngCore + CryptoRng,
{
    if bits < 2 {
        return Err(FunctionError::InvalidBitLength(bits));
    }
    let bits_u32: u32 = bits
        .try_into()
        .map_err(|_| FunctionError::InvalidBitLength(bits))?;

    let mut bytes = vec![0u8; (bits + 7) / 8];
    let excess = bytes.len() * 8 - bits;

    let mut attempts: u64 = 0;
    loop {
        attempts += 1;
        rng.try_fill_bytes(&mut bytes)
            .map_err(|_| FunctionError::RandomNumberGeneration)?;
        bytes[0] &= 0xff >> excess;

        let mut candidate = Integer::from_digits(bytes.as_slice(), Order::Msf);
        candidate.set_bit(bits_u32 - 1, true);
        candidate.set_bit(bits_u32 - 2, true);
        candidate.set_bit(0, true);
        if candidate.is_probably_prime(MILLER_RABIN_ROUNDS) != IsPrime::No {
            log::trace!("found {}-bit prime after {} candidates", bits, attempts);
            return Ok(BigUint::from_bytes_be(&candidate.to_digits::<u8>(Order::Msf)));
        }
    }
}

/// Probabilistic primality test with [`MILLER_RABIN_ROUNDS`] rounds.
pub fn is_probable_prime(value: &BigUint) -> bool {
    let value = Integer::from_digits(value.to_bytes_be().as_slice(), Order::Msf);
    value.is_probably_prime(MILLER_RABIN_ROUNDS) != IsPrime::No
}

/// Parses an unsigned big-endian byte string. Leading zero bytes are ignored
/// and the empty slice is zero.
pub fn bytes_to_int(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Minimal unsigned big-endian encoding; zero encodes as the empty vector.
pub fn int_to_bytes(value: &BigUint) -> Vec<u8> {
    if value.is_zero() {
        return Vec::new();
    }
    value.to_bytes_be()
}
