use num_bigint::BigUint;
use num_traits::One;
use paillier::{FunctionError, KeyGenError, KeyPair, PrivKeyError, PubKeyError};
use rand::{CryptoRng, RngCore};
use std::sync::Arc;
use std::thread;

// Randomness source that is always exhausted
struct ExhaustedRng;

impl RngCore for ExhaustedRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        panic!("randomness source exhausted");
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        Err(rand::Error::new(std::io::Error::new(
            std::io::ErrorKind::Other,
            "randomness source exhausted",
        )))
    }
}

impl CryptoRng for ExhaustedRng {}

fn to_int(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

#[test]
fn test_encrypted_addition() {
    // 512-bit modulus, two 256-bit primes
    let kp = KeyPair::new(512).unwrap();
    let pk = kp.pub_key();

    // Create two numbers to add
    let a = BigUint::from(42u32);
    let b = BigUint::from(58u32);
    let expected_sum = BigUint::from(100u32);

    let enc_a = pk.encrypt(&a.to_bytes_be()).unwrap();
    let enc_b = pk.encrypt(&b.to_bytes_be()).unwrap();

    // Add the encrypted numbers
    let enc_sum = pk.homomorphic_add_two(&enc_a, &enc_b).unwrap();

    let decrypted_sum = to_int(&kp.priv_key().decrypt(&enc_sum).unwrap());
    assert_eq!(
        decrypted_sum, expected_sum,
        "Homomorphic addition failed: expected {}, got {}",
        expected_sum, decrypted_sum
    );
}

#[test]
fn test_encrypted_addition_many() {
    let kp = KeyPair::new(512).unwrap();
    let pk = kp.pub_key();

    let messages = [15u32, 27, 1000, 0, 7];
    let ciphers: Vec<Vec<u8>> = messages
        .iter()
        .map(|m| pk.encrypt(&BigUint::from(*m).to_bytes_be()).unwrap())
        .collect();

    let enc_sum = pk.homomorphic_add_many(ciphers.as_slice()).unwrap();
    let decrypted_sum = to_int(&kp.priv_key().decrypt(&enc_sum).unwrap());
    assert_eq!(decrypted_sum, BigUint::from(1049u32));
}

#[test]
fn test_addition_wraps_modulo_n() {
    let kp = KeyPair::new(512).unwrap();
    let pk = kp.pub_key();
    let n_minus_one = pk.n() - BigUint::one();

    let c1 = pk.encrypt(&n_minus_one.to_bytes_be()).unwrap();
    let c2 = pk.encrypt(&[5]).unwrap();
    let enc_sum = pk.homomorphic_add_two(&c1, &c2).unwrap();

    let decrypted_sum = to_int(&kp.priv_key().decrypt(&enc_sum).unwrap());
    assert_eq!(decrypted_sum, BigUint::from(4u32));
}

#[test]
fn test_round_trip_large_message() {
    let kp = KeyPair::new(512).unwrap();
    let pk = kp.pub_key();
    let m = pk.n() - BigUint::from(12345u32);

    let ciphertext = pk.encrypt(&m.to_bytes_be()).unwrap();
    let plaintext = kp.priv_key().decrypt(&ciphertext).unwrap();
    assert_eq!(plaintext, m.to_bytes_be());
}

#[test]
fn test_encryption_is_probabilistic() {
    let kp = KeyPair::new(512).unwrap();
    let pk = kp.pub_key();

    let c1 = pk.encrypt(&[9]).unwrap();
    let c2 = pk.encrypt(&[9]).unwrap();
    assert_ne!(c1, c2);
    assert_eq!(kp.priv_key().decrypt(&c1).unwrap(), vec![9]);
    assert_eq!(kp.priv_key().decrypt(&c2).unwrap(), vec![9]);
}

#[test]
fn test_key_invariants() {
    let kp = KeyPair::new(512).unwrap();
    let pk = kp.pub_key();
    let sk = kp.priv_key();

    assert_eq!(pk.bit_length(), 512);
    assert_eq!(pk.g(), &(pk.n() + BigUint::one()));
    assert_eq!((sk.u() * sk.l()) % pk.n(), BigUint::one());
}

#[test]
fn test_bound_rejection() {
    let kp = KeyPair::new(512).unwrap();
    let pk = kp.pub_key();

    assert_eq!(pk.encrypt(&pk.n().to_bytes_be()), Err(PubKeyError::LargeMessage));
    assert_eq!(
        kp.priv_key().decrypt(&pk.n_squared().to_bytes_be()),
        Err(PrivKeyError::LargeCipher)
    );

    let valid = pk.encrypt(&[1]).unwrap();
    assert_eq!(
        pk.homomorphic_add_two(&valid, &pk.n_squared().to_bytes_be()),
        Err(PubKeyError::LargeCipher)
    );
}

#[test]
fn test_add_many_empty_is_one() {
    let kp = KeyPair::new(512).unwrap();
    let empty: Vec<Vec<u8>> = Vec::new();
    assert_eq!(kp.pub_key().homomorphic_add_many(empty.as_slice()).unwrap(), vec![1]);
}

#[test]
fn test_shared_key_across_threads() {
    let kp = Arc::new(KeyPair::new(512).unwrap());

    let handles: Vec<_> = (0..4u8)
        .map(|i| {
            let kp = Arc::clone(&kp);
            thread::spawn(move || {
                let c = kp.pub_key().encrypt(&[i]).unwrap();
                kp.priv_key().decrypt(&c).unwrap()
            })
        })
        .collect();

    let mut results: Vec<Vec<u8>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    results.sort();
    assert_eq!(results, vec![vec![], vec![1], vec![2], vec![3]]);
}

#[test]
fn test_keygen_exhausted_rng() {
    let result = KeyPair::generate(&mut ExhaustedRng, 512);
    assert_eq!(
        result,
        Err(KeyGenError::PrimeGeneration(FunctionError::RandomNumberGeneration))
    );
}

#[test]
fn test_encrypt_exhausted_rng() {
    let kp = KeyPair::new(512).unwrap();
    let result = kp.pub_key().encrypt_with_rng(&mut ExhaustedRng, &[42]);
    assert_eq!(
        result,
        Err(PubKeyError::RandomNumber(FunctionError::RandomNumberGeneration))
    );
}

#[test]
fn test_add_many_rejects_large_cipher() {
    let kp = KeyPair::new(512).unwrap();
    let pk = kp.pub_key();
    let valid = pk.encrypt(&[1]).unwrap();
    let invalid = pk.n_squared().to_bytes_be();

    assert_eq!(
        pk.homomorphic_add_many(&[invalid.clone(), valid.clone()]),
        Err(PubKeyError::LargeCipher)
    );
    assert_eq!(
        pk.homomorphic_add_many(&[valid, invalid]),
        Err(PubKeyError::LargeCipher)
    );
}
