//! Derivation tree tests against the BIP32 reference vectors.

use crate::{ChildNumber, DerivationPath, Error, Xprv, Xpub};

const SEED_ONE: &str = "000102030405060708090a0b0c0d0e0f";
const SEED_TWO: &str = "fffcf9f6f3f0edeae7e4e1dedbd8d5d2cfccc9c6c3c0bdbab7b4b1aeaba8a5a2\
                        9f9c999693908d8a8784817e7b7875726f6c696663605d5a5754514e4b484542";

fn unhex(s: &str) -> Vec<u8> {
    hex::decode(s).unwrap()
}

fn master(seed_hex: &str) -> Xprv {
    Xprv::from_seed(&unhex(seed_hex)).unwrap()
}

fn parse(path: &str) -> DerivationPath {
    path.parse().unwrap()
}

#[test]
fn test_vector_one_chain() {
    let steps = [
        (
            "m",
            "e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35",
            "873dff81c02f525623fd1fe5167eac3a55a049de3d314bb42ee227ffed37d508",
            "0339a36013301597daef41fbe593a02cc513d0b55527ec2df1050e2e8ff49c85c2",
        ),
        (
            "m/0'",
            "edb2e14f9ee77d26dd93b4ecede8d16ed408ce149b6cd80b0715a2d911a0afea",
            "47fdacbd0f1097043b78c63c20c34ef4ed9a111d980047ad16282c7ae6236141",
            "035a784662a4a20a65bf6aab9ae98a6c068a81c52e4b032c0fb5400c706cfccc56",
        ),
        (
            "m/0'/1",
            "3c6cb8d0f6a264c91ea8b5030fadaa8e538b020f0a387421a12de9319dc93368",
            "2a7857631386ba23dacac34180dd1983734e444fdbf774041578e9b6adb37c19",
            "03501e454bf00751f24b1b489aa925215d66af2234e3891c3b21a52bedb3cd711c",
        ),
        (
            "m/0'/1/2'",
            "cbce0d719ecf7431d88e6a89fa1483e02e35092af60c042b1df2ff59fa424dca",
            "04466b9cc8e161e966409ca52986c584f07e9dc81f735db683c3ff6ec7b1503f",
            "0357bfe1e341d01c69fe5654309956cbea516822fba8a601743a012a7896ee8dc2",
        ),
        (
            "m/0'/1/2'/2",
            "0f479245fb19a38a1954c5c7c0ebab2f9bdfd96a17563ef28a6a4b1a2a764ef4",
            "cfb71883f01676f587d023cc53a35bc7f88f724b1f8c2892ac1275ac822a3edd",
            "02e8445082a72f29b75ca48748a914df60622a609cacfce8ed0e35804560741d29",
        ),
        (
            "m/0'/1/2'/2/1000000000",
            "471b76e389e528d6de6d816857e012c5455051cad6660850e58372a6c3e6e7c8",
            "c783e67b921d2beb8f6b389cc646d7263b4145701dadd2161548a8b078e65e9e",
            "022a471424da5e657499d1ff51cb43c47481a03b1e77f951fe64cec9f5a48f7011",
        ),
    ];

    let root = master(SEED_ONE);
    for (path, key_hex, chain_hex, public_hex) in steps {
        let node = root.derive_path(&parse(path)).unwrap();
        assert_eq!(
            hex::encode(node.private_key().to_be_bytes()),
            key_hex,
            "private key at {path}"
        );
        assert_eq!(
            hex::encode(node.chain_code()),
            chain_hex,
            "chain code at {path}"
        );
        assert_eq!(
            hex::encode(node.public().public_key().to_compressed()),
            public_hex,
            "public key at {path}"
        );
    }
}

#[test]
fn test_vector_one_fingerprints() {
    let expected = ["3442193e", "5c1bd648", "bef5a2f9", "ee7ab90c", "d880d7d8"];
    let path = parse("m/0'/1/2'/2/1000000000");

    let mut node = master(SEED_ONE);
    for (&number, fingerprint) in path.children().iter().zip(expected) {
        let child = node.derive_child(number).unwrap();
        assert_eq!(hex::encode(node.fingerprint()), fingerprint);
        assert_eq!(child.parent_fingerprint(), node.fingerprint());
        assert_eq!(child.public().parent_fingerprint(), node.fingerprint());
        node = child;
    }
    assert_eq!(node.depth(), 5);
    assert_eq!(node.child_number().index(), 1_000_000_000);
    assert!(!node.child_number().is_hardened());
}

#[test]
fn test_vector_two_master_and_normal_child() {
    let root = master(SEED_TWO);
    assert_eq!(
        hex::encode(root.private_key().to_be_bytes()),
        "4b03d6fc340455b363f51020ad3ecca4f0850280cf436c70c727923f6db46c3e"
    );
    assert_eq!(
        hex::encode(root.chain_code()),
        "60499f801b896d83179a4374aeb7822aaeaceaa0db1f85ee3e904c4defbd9689"
    );
    assert_eq!(
        hex::encode(root.public().public_key().to_compressed()),
        "03cbcaa9c98c877a26977d00825c956a238e8dddfbd322cce4f74b0b5bd6ace4a7"
    );

    let child = root.derive_child(ChildNumber::normal(0).unwrap()).unwrap();
    assert_eq!(
        hex::encode(child.private_key().to_be_bytes()),
        "abe74a98f6c7eabee0428f53798f0ab8aa1bd37873999041703c742f15ac7e1e"
    );
    assert_eq!(
        hex::encode(child.chain_code()),
        "f0909affaa7ee7abe5dd4e100598d4dc53cd709d5a5c2cac40e7412f232f7c9c"
    );

    // The same child is reachable through the public subtree alone.
    let watch = root
        .public()
        .derive_child(ChildNumber::normal(0).unwrap())
        .unwrap();
    assert_eq!(watch, child.public());
    assert_eq!(
        hex::encode(watch.public_key().to_compressed()),
        "02fc9e5af0ac8d9b3cecfe2a888e2117ba3d089d8585886c9c826b6b22a98d12ea"
    );
}

#[test]
fn test_master_payload_serialization() {
    let root = master(SEED_ONE);
    assert_eq!(
        hex::encode(root.encode()),
        "0488ade4000000000000000000873dff81c02f525623fd1fe5167eac3a55a049\
         de3d314bb42ee227ffed37d50800e8f32e723decf4051aefac8e2c93c9c5b214\
         313817cdb01a1494b917c8436b35"
    );
    assert_eq!(
        hex::encode(root.public().encode()),
        "0488b21e000000000000000000873dff81c02f525623fd1fe5167eac3a55a049\
         de3d314bb42ee227ffed37d5080339a36013301597daef41fbe593a02cc513d0\
         b55527ec2df1050e2e8ff49c85c2"
    );
}

#[test]
fn test_payload_roundtrip() {
    let root = master(SEED_ONE);
    let node = root.derive_path(&parse("m/0'/1")).unwrap();

    let decoded = Xprv::decode(&node.encode()).unwrap();
    assert_eq!(decoded, node);
    assert_eq!(decoded.depth(), 2);
    assert_eq!(decoded.parent_fingerprint(), node.parent_fingerprint());

    let public = node.public();
    let decoded = Xpub::decode(&public.encode()).unwrap();
    assert_eq!(decoded, public);
}

#[test]
fn test_decode_rejects_malformed_payloads() {
    let root = master(SEED_ONE);
    let node = root.derive_path(&parse("m/0'")).unwrap();

    // Wrong version, including a private payload fed to the public parser.
    let mut bytes = node.encode();
    bytes[0] ^= 0x01;
    assert_eq!(Xprv::decode(&bytes), Err(Error::Encoding));
    assert_eq!(Xpub::decode(&node.encode()), Err(Error::Encoding));

    // The byte before the private key must be zero padding.
    let mut bytes = node.encode();
    bytes[45] = 0x01;
    assert_eq!(Xprv::decode(&bytes), Err(Error::Encoding));

    // A corrupted point prefix is not a valid compressed key.
    let mut bytes = node.public().encode();
    bytes[45] = 0x05;
    assert_eq!(Xpub::decode(&bytes), Err(Error::Encoding));

    // A depth-zero key cannot carry a parent fingerprint or child number.
    let mut bytes = root.encode();
    bytes[5] = 0x01;
    assert_eq!(Xprv::decode(&bytes), Err(Error::Encoding));
    let mut bytes = root.public().encode();
    bytes[12] = 0x01;
    assert_eq!(Xpub::decode(&bytes), Err(Error::Encoding));
}

#[test]
fn test_public_derivation_rejects_hardened() {
    let root = master(SEED_ONE);
    let result = root.public().derive_child(ChildNumber::hardened(0).unwrap());
    assert_eq!(result, Err(Error::Domain));
}

#[test]
fn test_public_subtree_matches_private_derivation() {
    let root = master(SEED_ONE);
    let base = root.derive_path(&parse("m/0'/1/2'")).unwrap();
    let tail = parse("m/2/1000000000");

    let from_private = base.derive_path(&tail).unwrap().public();
    let from_public = base.public().derive_path(&tail).unwrap();
    assert_eq!(from_private, from_public);
}

#[test]
fn test_seed_length_bounds() {
    assert_eq!(Xprv::from_seed(&[0x55; 15]), Err(Error::Domain));
    assert_eq!(Xprv::from_seed(&[0x55; 65]), Err(Error::Domain));
    assert!(Xprv::from_seed(&[0x55; 16]).is_ok());
    assert!(Xprv::from_seed(&[0x55; 64]).is_ok());
}

#[test]
fn test_hardened_and_normal_children_differ() {
    let root = master(SEED_ONE);
    let hardened = root.derive_child(ChildNumber::hardened(7).unwrap()).unwrap();
    let normal = root.derive_child(ChildNumber::normal(7).unwrap()).unwrap();
    assert_ne!(
        hardened.private_key().to_be_bytes(),
        normal.private_key().to_be_bytes()
    );
    assert!(hardened.child_number().is_hardened());
    assert_eq!(hardened.child_number().index(), 7);
    assert_eq!(hardened.depth(), 1);
}

#[test]
fn test_derivation_deterministic_and_index_independent() {
    let root = master(SEED_ONE);
    let a = root.derive_child(ChildNumber::normal(3).unwrap()).unwrap();
    let b = root.derive_child(ChildNumber::normal(4).unwrap()).unwrap();

    assert_eq!(
        a,
        root.derive_child(ChildNumber::normal(3).unwrap()).unwrap()
    );
    assert_ne!(a.private_key().to_be_bytes(), b.private_key().to_be_bytes());
    assert_ne!(a.chain_code(), b.chain_code());
}

#[test]
fn test_debug_output_hides_secrets() {
    let root = master(SEED_ONE);
    let rendered = format!("{root:?}");
    assert!(rendered.contains("Xprv"));
    assert!(!rendered.contains("e8f32e72"));
    assert!(!rendered.contains("873dff81"));
}
