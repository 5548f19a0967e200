use super::*;
use curve::{
    Affine, BabyJubjub, BaseField, CurveError, PrimeField, ScalarField, TwistedEdwardsConfig,
};
use mimc::Mimc;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn setup(seed: u64) -> (SigningKey, VerifyingKey, Mimc<BaseField>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let sk = SigningKey::random(&mut rng);
    let pk = sk.verifying_key();
    (sk, pk, Mimc::default())
}

fn deadf00d(mimc: &Mimc<BaseField>) -> Message<BaseField> {
    Message::from_bytes(&[0xde, 0xad, 0xf0, 0x0d], mimc)
}

#[test]
fn test_sign_verify() {
    let (sk, pk, mimc) = setup(42);
    let msg = deadf00d(&mimc);

    let sig = sk.sign(&mimc, &msg);
    assert!(pk.verify(&mimc, &msg, &sig));
    assert!(pk.verify_bytes(&mimc, &msg, &sig.to_bytes()));
}

#[test]
fn test_signing_is_deterministic() {
    let (sk, _pk, mimc) = setup(42);
    let msg = deadf00d(&mimc);
    assert_eq!(sk.sign(&mimc, &msg), sk.sign(&mimc, &msg));

    let other = Message::new(BaseField::from_u64(1));
    assert_ne!(sk.sign(&mimc, &msg).r, sk.sign(&mimc, &other).r);
}

#[test]
fn test_verify_rejects_wrong_message() {
    let (sk, pk, mimc) = setup(42);
    let sig = sk.sign(&mimc, &Message::new(BaseField::from_u64(10)));
    assert!(!pk.verify(&mimc, &Message::new(BaseField::from_u64(11)), &sig));
}

#[test]
fn test_verify_rejects_wrong_key() {
    let (sk, _pk, mimc) = setup(42);
    let (_, wrong_pk, _) = setup(43);
    let msg = deadf00d(&mimc);
    let sig = sk.sign(&mimc, &msg);
    assert!(!wrong_pk.verify(&mimc, &msg, &sig));
}

#[test]
fn test_verify_rejects_modified_scalar() {
    let (sk, pk, mimc) = setup(42);
    let msg = deadf00d(&mimc);
    let mut sig = sk.sign(&mimc, &msg);
    sig.s += ScalarField::ONE;
    assert!(!pk.verify(&mimc, &msg, &sig));
}

#[test]
fn test_tampered_signature_bytes_do_not_verify() {
    let (sk, pk, mimc) = setup(42);
    let msg = deadf00d(&mimc);
    let mut bytes = sk.sign(&mimc, &msg).to_bytes();
    bytes[0] ^= 0x01;

    assert!(!pk.verify_bytes(&mimc, &msg, &bytes));
    assert_eq!(
        Signature::<BabyJubjub>::from_bytes(&bytes),
        Err(EddsaError::Curve(CurveError::NotOnCurve))
    );
}

#[test]
fn test_verify_rejects_off_curve_commitment() {
    let (sk, pk, mimc) = setup(42);
    let msg = deadf00d(&mimc);
    let mut sig = sk.sign(&mimc, &msg);
    sig.r = Affine::new(sig.r.x + BaseField::ONE, sig.r.y);
    assert!(!pk.verify(&mimc, &msg, &sig));
}

#[test]
fn test_signature_rejects_scalar_above_order() {
    let (sk, _pk, mimc) = setup(42);
    let mut bytes = sk.sign(&mimc, &deadf00d(&mimc)).to_bytes();
    bytes[64..].copy_from_slice(&[0xff; 32]);
    assert_eq!(
        Signature::<BabyJubjub>::from_bytes(&bytes),
        Err(EddsaError::NonCanonicalScalar)
    );
    assert_eq!(
        Signature::<BabyJubjub>::from_bytes(&bytes[..95]),
        Err(EddsaError::InvalidLength {
            expected: SIG_SIZE,
            actual: 95
        })
    );
}

#[test]
fn test_key_bytes_round_trip() {
    let (sk, pk, _) = setup(7);
    assert_eq!(SigningKey::from_bytes(&sk.to_bytes()), Ok(sk));
    assert_eq!(VerifyingKey::from_bytes(&pk.to_bytes()), Ok(pk));
}

#[test]
fn test_verifying_key_rejects_invalid_points() {
    let identity = Affine::<BabyJubjub>::identity();
    assert_eq!(
        VerifyingKey::<BabyJubjub>::from_bytes(&identity.to_bytes()),
        Err(EddsaError::InvalidPoint)
    );

    let order_two = Affine::<BabyJubjub>::new(BaseField::ZERO, -BaseField::ONE);
    assert_eq!(
        VerifyingKey::<BabyJubjub>::from_bytes(&order_two.to_bytes()),
        Err(EddsaError::Curve(CurveError::NotInSubgroup))
    );

    let (_, pk, _) = setup(7);
    let mut bytes = pk.to_bytes();
    bytes[0] ^= 1;
    assert_eq!(
        VerifyingKey::<BabyJubjub>::from_bytes(&bytes),
        Err(EddsaError::Curve(CurveError::NotOnCurve))
    );
}

#[test]
fn test_signing_key_rejects_zero_scalar() {
    assert_eq!(
        SigningKey::<BabyJubjub>::from_bytes(&[0u8; SK_SIZE]),
        Err(EddsaError::ZeroScalar)
    );
}

#[test]
fn test_bincode_round_trip() {
    let (sk, pk, mimc) = setup(9);
    let sig = sk.sign(&mimc, &deadf00d(&mimc));

    let sk2: SigningKey = bincode::deserialize(&bincode::serialize(&sk).unwrap()).unwrap();
    let pk2: VerifyingKey = bincode::deserialize(&bincode::serialize(&pk).unwrap()).unwrap();
    let sig2: Signature = bincode::deserialize(&bincode::serialize(&sig).unwrap()).unwrap();

    assert_eq!(sk2, sk);
    assert_eq!(pk2, pk);
    assert_eq!(sig2, sig);
}

#[test]
fn test_bincode_rejects_small_order_key() {
    let order_two = Affine::<BabyJubjub>::new(BaseField::ZERO, -BaseField::ONE);
    let encoded = bincode::serialize(&order_two).unwrap();
    assert!(bincode::deserialize::<VerifyingKey>(&encoded).is_err());
}

#[test]
fn test_bincode_rejects_zero_signing_key() {
    let encoded = bincode::serialize(&(ScalarField::ZERO, [7u8; 32])).unwrap();
    assert!(bincode::deserialize::<SigningKey>(&encoded).is_err());
}

#[test]
fn test_bincode_rejects_non_canonical_signing_key() {
    let encoded = bincode::serialize(&([0xffu8; 32], [7u8; 32])).unwrap();
    assert!(bincode::deserialize::<SigningKey>(&encoded).is_err());
}

#[test]
fn test_bincode_matches_key_bytes() {
    let (sk, _pk, _mimc) = setup(10);
    let sk2: SigningKey = bincode::deserialize(&bincode::serialize(&sk).unwrap()).unwrap();
    assert_eq!(sk2.to_bytes(), sk.to_bytes());
    assert_eq!(SigningKey::<BabyJubjub>::from_bytes(&sk.to_bytes()), Ok(sk));
}

fn generic_keypair<C: TwistedEdwardsConfig>(seed: u64) -> (SigningKey<C>, VerifyingKey<C>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let sk = SigningKey::<C>::random(&mut rng);
    let pk = sk.verifying_key();
    (sk, pk)
}

#[test]
fn test_random_keys_for_any_curve_config() {
    for seed in 0..8 {
        let (sk, pk) = generic_keypair::<BabyJubjub>(seed);
        assert_eq!(SigningKey::<BabyJubjub>::from_bytes(&sk.to_bytes()), Ok(sk));
        assert_eq!(VerifyingKey::from_point(*pk.point()), Ok(pk));
        assert!(pk.point().is_in_prime_subgroup());
    }
    assert_ne!(generic_keypair::<BabyJubjub>(1).0, generic_keypair::<BabyJubjub>(2).0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_sign_then_verify(seed in any::<u64>(), msg in any::<u64>()) {
        let (sk, pk, mimc) = setup(seed);
        let msg = Message::new(BaseField::from_u64(msg));
        let sig = sk.sign(&mimc, &msg);
        prop_assert!(pk.verify(&mimc, &msg, &sig));
    }

    #[test]
    fn prop_long_messages_sign(bytes in proptest::collection::vec(any::<u8>(), 33..100)) {
        let (sk, pk, mimc) = setup(5);
        let msg = Message::from_bytes(&bytes, &mimc);
        let sig = sk.sign(&mimc, &msg);
        prop_assert!(pk.verify(&mimc, &msg, &sig));
    }
}
