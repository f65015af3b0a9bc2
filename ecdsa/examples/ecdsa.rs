use ecdsa::{Signature, SigningKey, VerifyingKey};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(&mut rng);
    let vk = VerifyingKey::from(&sk);

    let msg = b"hello ecdsa";
    let sig = sk.sign(msg);

    let vk_bytes = bincode::serialize(&vk).expect("serialize vk");
    let sig_bytes = bincode::serialize(&sig).expect("serialize sig");

    let vk2: VerifyingKey = bincode::deserialize(&vk_bytes).expect("deserialize vk");
    let sig2: Signature = bincode::deserialize(&sig_bytes).expect("deserialize sig");

    vk2.verify(msg, &sig2).expect("verify");
    println!("signature of {} bytes verified", sig2.to_be_bytes().len());
}
