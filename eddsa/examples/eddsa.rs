use curve::BaseField;
use eddsa::{Message, Signature, SigningKey, VerifyingKey};
use mimc::Mimc;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let mimc = Mimc::<BaseField>::default();
    let sk: SigningKey = SigningKey::random(&mut rng);
    let vk = VerifyingKey::from(&sk);

    let sk_bytes = bincode::serialize(&sk).expect("serialize sk");
    let vk_bytes = bincode::serialize(&vk).expect("serialize vk");

    let msg = Message::from_bytes(b"hello eddsa", &mimc);
    let sig = sk.sign(&mimc, &msg);
    let sig_bytes = bincode::serialize(&sig).expect("serialize sig");

    let sk2: SigningKey = bincode::deserialize(&sk_bytes).expect("deserialize sk");
    let vk2: VerifyingKey = bincode::deserialize(&vk_bytes).expect("deserialize vk");
    let sig2: Signature = bincode::deserialize(&sig_bytes).expect("deserialize sig");

    assert!(vk2.verify(&mimc, &msg, &sig2));
    assert_eq!(sk2.sign(&mimc, &msg), sig2);

    println!("public key: {}", hex(&vk2.to_bytes()));
    println!("signature:  {}", hex(&sig2.to_bytes()));
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
