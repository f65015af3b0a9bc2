use rand::SeedableRng;
use rand::rngs::StdRng;
use schnorr::{Signature, SigningKey, VerifyingKey};

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(&mut rng);
    let vk = VerifyingKey::from(&sk);

    let sk_bytes = sk.to_be_bytes();
    let vk_bytes = bincode::serialize(&vk).expect("serialize vk");

    let msg = b"hello schnorr";
    let sig = sk.sign_with_rng(&mut rng, msg).expect("sign");
    let sig_bytes = bincode::serialize(&sig).expect("serialize sig");

    let sk2 = SigningKey::from_be_bytes(&sk_bytes).expect("deserialize sk");
    let vk2: VerifyingKey = bincode::deserialize(&vk_bytes).expect("deserialize vk");
    let sig2: Signature = bincode::deserialize(&sig_bytes).expect("deserialize sig");

    vk2.verify(msg, &sig2).expect("verify");
    assert_eq!(sk2.verifying_key(), vk2);
    println!(
        "x-only key {} signs 64-byte signatures",
        hex::encode(vk2.to_be_bytes())
    );
}
