use super::*;
use curve::Scalar;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn sk(hex_key: &str) -> SigningKey {
    let bytes: [u8; 32] = hex::decode(hex_key).unwrap().try_into().unwrap();
    SigningKey::from_be_bytes(&bytes).unwrap()
}

// Deterministic signatures for fixed keys and messages, nonces per
// RFC 6979 with SHA-256. The long message exercises the nonce retry
// path indirectly through bits2octets reduction.
#[test]
fn test_deterministic_signature_vectors() {
    let vectors: [(&str, &[u8], &str, &str); 5] = [
        (
            "0000000000000000000000000000000000000000000000000000000000000001",
            b"Satoshi Nakamoto",
            "934b1ea10a4b3c1757e2b0c017d0b6143ce3c9a7e6a4a49860d7a6ab210ee3d8",
            "2442ce9d2b916064108014783e923ec36b49743e2ffa1c4496f01a512aafd9e5",
        ),
        (
            "0000000000000000000000000000000000000000000000000000000000000001",
            b"All those moments will be lost in time, like tears in rain. Time to die...",
            "8600dbd41e348fe5c9465ab92d23e3db8b98b873beecd930736488696438cb6b",
            "547fe64427496db33bf66019dacbf0039c04199abb0122918601db38a72cfc21",
        ),
        (
            "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140",
            b"Satoshi Nakamoto",
            "fd567d121db66e382991534ada77a6bd3106f0a1098c231e47993447cd6af2d0",
            "6b39cd0eb1bc8603e159ef5c20a5c8ad685a45b06ce9bebed3f153d10d93bed5",
        ),
        (
            "f8b8af8ce3c7cca5e300d33939540c10d45ce001b8f252bfbc57ba0342904181",
            b"Alan Turing",
            "7063ae83e7f62bbb171798131b4a0564b956930092b33b07b395615d9ec7e15c",
            "58dfcc1e00a35e1572f366ffe34ba0fc47db1e7189759b9fb233c5b05ab388ea",
        ),
        (
            "e91671c46231f833a6406ccbea0e3e392c76c167bac1cb013f6f1013980455c2",
            b"There is a computer disease that anybody who works with computers knows about. \
              It's a very serious disease and it interferes completely with the work. \
              The trouble with computers is that you 'play' with them!",
            "b552edd27580141f3b2a5463048cb7cd3e047b97c9f98076c32dbdf85a68718b",
            "279fa72dd19bfae05577e06c7c0c1900c371fcd5893f7e1d56a37d30174671f6",
        ),
    ];

    for (key_hex, msg, r_hex, s_hex) in vectors {
        let signing_key = sk(key_hex);
        let sig = signing_key.sign(msg);

        assert_eq!(hex::encode(sig.r.to_be_bytes()), r_hex);
        assert_eq!(hex::encode(sig.s.to_be_bytes()), s_hex);
        assert!(!sig.s.is_high());

        let vk = signing_key.verifying_key();
        assert!(vk.verify(msg, &sig).is_ok());
    }
}

#[test]
fn test_verifying_key_of_one_is_generator() {
    let signing_key = sk("0000000000000000000000000000000000000000000000000000000000000001");
    let vk = signing_key.verifying_key();
    assert_eq!(
        hex::encode(vk.to_sec1_bytes()),
        "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
    );
}

#[test]
fn test_sign_matches_prehash() {
    use sha2::{Digest, Sha256};

    let signing_key = sk("f8b8af8ce3c7cca5e300d33939540c10d45ce001b8f252bfbc57ba0342904181");
    let msg = b"Alan Turing";
    let digest: [u8; 32] = Sha256::digest(msg).into();

    assert_eq!(signing_key.sign(msg), signing_key.sign_prehash(&digest));
}

#[test]
fn test_sign_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(42);
    let signing_key = SigningKey::random(&mut rng);

    let sig1 = signing_key.sign(b"repeatable");
    let sig2 = signing_key.sign(b"repeatable");
    assert_eq!(sig1, sig2);

    let sig3 = signing_key.sign(b"different");
    assert_ne!(sig1, sig3);
}

#[test]
fn test_verify_rejects_wrong_message() {
    let mut rng = StdRng::seed_from_u64(42);
    let signing_key = SigningKey::random(&mut rng);
    let vk = signing_key.verifying_key();

    let sig = signing_key.sign(b"genuine message");
    assert_eq!(
        vk.verify(b"forged message", &sig),
        Err(Error::InvalidSignature)
    );
}

#[test]
fn test_verify_rejects_wrong_key() {
    let mut rng = StdRng::seed_from_u64(42);
    let signing_key = SigningKey::random(&mut rng);
    let other_key = SigningKey::random(&mut rng);

    let sig = signing_key.sign(b"message");
    assert_eq!(
        other_key.verifying_key().verify(b"message", &sig),
        Err(Error::InvalidSignature)
    );
}

#[test]
fn test_verify_rejects_tampered_scalars() {
    let signing_key = sk("0000000000000000000000000000000000000000000000000000000000000001");
    let vk = signing_key.verifying_key();
    let msg = b"Satoshi Nakamoto";
    let sig = signing_key.sign(msg);

    let bad_r = Signature {
        r: sig.r + Scalar::ONE,
        s: sig.s,
    };
    assert_eq!(vk.verify(msg, &bad_r), Err(Error::InvalidSignature));

    let bad_s = Signature {
        r: sig.r,
        s: sig.s + Scalar::ONE,
    };
    assert_eq!(vk.verify(msg, &bad_s), Err(Error::InvalidSignature));
}

#[test]
fn test_verify_rejects_high_s() {
    let signing_key = sk("0000000000000000000000000000000000000000000000000000000000000001");
    let vk = signing_key.verifying_key();
    let msg = b"Satoshi Nakamoto";
    let sig = signing_key.sign(msg);

    // n - s satisfies the raw curve equation but is the high form.
    let high = Signature {
        r: sig.r,
        s: -sig.s,
    };
    assert!(high.s.is_high());
    assert_eq!(vk.verify(msg, &high), Err(Error::InvalidSignature));
}

#[test]
fn test_verify_rejects_zero_scalars() {
    let signing_key = sk("0000000000000000000000000000000000000000000000000000000000000001");
    let vk = signing_key.verifying_key();
    let msg = b"zeros";
    let sig = signing_key.sign(msg);

    let zero_r = Signature {
        r: Scalar::ZERO,
        s: sig.s,
    };
    let zero_s = Signature {
        r: sig.r,
        s: Scalar::ZERO,
    };
    assert_eq!(vk.verify(msg, &zero_r), Err(Error::InvalidSignature));
    assert_eq!(vk.verify(msg, &zero_s), Err(Error::InvalidSignature));
}

#[test]
fn test_signature_byte_roundtrip() {
    let signing_key = sk("f8b8af8ce3c7cca5e300d33939540c10d45ce001b8f252bfbc57ba0342904181");
    let sig = signing_key.sign(b"roundtrip");

    let bytes = sig.to_be_bytes();
    assert_eq!(Signature::from_be_bytes(&bytes).unwrap(), sig);
}

#[test]
fn test_signature_rejects_non_canonical_scalars() {
    // r set to the group order itself.
    let mut bytes = [0u8; SIG_SIZE];
    bytes[..32].copy_from_slice(
        &hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141")
            .unwrap(),
    );
    bytes[63] = 1;
    assert_eq!(Signature::from_be_bytes(&bytes), Err(Error::Encoding));
}

#[test]
fn test_serde_roundtrip() {
    let mut rng = StdRng::seed_from_u64(7);
    let signing_key = SigningKey::random(&mut rng);
    let vk = signing_key.verifying_key();
    let sig = signing_key.sign(b"serde");

    let sig_bytes = bincode::serialize(&sig).unwrap();
    let sig2: Signature = bincode::deserialize(&sig_bytes).unwrap();
    assert_eq!(sig, sig2);

    let vk_bytes = bincode::serialize(&vk).unwrap();
    let vk2: VerifyingKey = bincode::deserialize(&vk_bytes).unwrap();
    assert_eq!(vk, vk2);
    assert!(vk2.verify(b"serde", &sig2).is_ok());
}

#[test]
fn test_verifying_key_sec1_roundtrip() {
    let mut rng = StdRng::seed_from_u64(3);
    let vk = SigningKey::random(&mut rng).verifying_key();

    let bytes = vk.to_sec1_bytes();
    assert_eq!(VerifyingKey::from_sec1(&bytes).unwrap(), vk);
    assert_eq!(bytes.len(), PK_SIZE);
}

#[test]
fn test_signing_key_byte_roundtrip() {
    let mut rng = StdRng::seed_from_u64(11);
    let signing_key = SigningKey::random(&mut rng);

    let bytes = signing_key.to_be_bytes();
    let restored = SigningKey::from_be_bytes(&bytes).unwrap();
    assert_eq!(signing_key, restored);
    assert_eq!(restored.verifying_key(), signing_key.verifying_key());
}
