use std::sync::OnceLock;

use circuit::{
    compile_verification_circuit, encode_witness, native_verify, BabyJubjub, BabyJubjubCircuit,
    BaseField, CheckingBackend, ConstraintSystem, EncodingError, Message, Mimc, PrimeField,
    ProveError, ProvingSystem, Satisfaction, SignatureVisibility, SigningKey, VerifyingKey,
    WitnessAssignment,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const DEADFOOD: [u8; 4] = [0xde, 0xad, 0xf0, 0x0d];

fn compiled() -> &'static ConstraintSystem<BaseField> {
    static CS: OnceLock<ConstraintSystem<BaseField>> = OnceLock::new();
    CS.get_or_init(compile_verification_circuit)
}

fn mimc() -> Mimc<BaseField> {
    Mimc::default()
}

fn keypair(seed: u64) -> (SigningKey<BabyJubjub>, VerifyingKey<BabyJubjub>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let sk = SigningKey::random(&mut rng);
    let pk = sk.verifying_key();
    (sk, pk)
}

fn signed(seed: u64, bytes: &[u8]) -> (VerifyingKey<BabyJubjub>, Message<BaseField>, Vec<u8>) {
    let (sk, pk) = keypair(seed);
    let msg = Message::from_bytes(bytes, &mimc());
    let sig = sk.sign(&mimc(), &msg).to_bytes().to_vec();
    (pk, msg, sig)
}

fn failing_label(cs: &ConstraintSystem<BaseField>, witness: &WitnessAssignment<BaseField>) -> String {
    match cs.is_satisfied(witness).expect("input counts match") {
        Satisfaction::Satisfied => panic!("witness satisfied the system"),
        Satisfaction::Unsatisfied(id) => cs.constraint_label(id).expect("labelled").to_owned(),
    }
}

#[test]
fn test_valid_signature_satisfies_circuit() {
    let (pk, msg, sig) = signed(1, &DEADFOOD);
    assert!(native_verify(&pk, &msg, &sig));

    let witness = encode_witness(&pk, &msg, &sig).expect("encodes");
    assert_eq!(compiled().is_satisfied(&witness), Ok(Satisfaction::Satisfied));
}

#[test]
fn test_tampered_signature_is_unsatisfied_not_an_encoding_error() {
    let (pk, msg, mut sig) = signed(1, &DEADFOOD);
    sig[0] ^= 1;

    assert!(!native_verify(&pk, &msg, &sig));

    let witness = encode_witness(&pk, &msg, &sig).expect("tampered bytes still encode");
    assert_eq!(failing_label(compiled(), &witness), "r/on_curve");

    let backend = CheckingBackend;
    let Ok((proving_key, _)) = backend.setup(compiled());
    let err = backend
        .prove(compiled(), &proving_key, &witness)
        .expect_err("no proof for a tampered signature");
    assert!(matches!(err, ProveError::Unsatisfied { ref label, .. } if label == "r/on_curve"));
}

#[test]
fn test_wrong_message_fails_final_equation() {
    let (pk, _, sig) = signed(2, &DEADFOOD);
    let other = Message::from_bytes(&[0xca, 0xfe], &mimc());

    assert!(!native_verify(&pk, &other, &sig));
    let witness = encode_witness(&pk, &other, &sig).expect("encodes");
    assert!(failing_label(compiled(), &witness).starts_with("verify/"));
}

#[test]
fn test_wrong_key_fails_final_equation() {
    let (_, msg, sig) = signed(3, &DEADFOOD);
    let (_, other_pk) = keypair(4);

    assert!(!native_verify(&other_pk, &msg, &sig));
    let witness = encode_witness(&other_pk, &msg, &sig).expect("encodes");
    assert!(failing_label(compiled(), &witness).starts_with("verify/"));
}

#[test]
fn test_long_message_is_compressed_for_both_paths() {
    let bytes: Vec<u8> = (0u8..100).collect();
    let (pk, msg, sig) = signed(5, &bytes);
    assert!(native_verify(&pk, &msg, &sig));

    let witness = encode_witness(&pk, &msg, &sig).expect("encodes");
    assert_eq!(witness.public_inputs()[2], msg.element());
    assert!(compiled().is_satisfied(&witness).expect("counts").is_satisfied());
}

#[test]
fn test_padded_message_does_not_reuse_signature() {
    let (pk, msg, sig) = signed(16, &[0x01]);
    let padded = Message::from_bytes(&[0x00, 0x01], &mimc());
    assert_ne!(msg, padded);

    assert!(native_verify(&pk, &msg, &sig));
    assert!(!native_verify(&pk, &padded, &sig));
    let witness = encode_witness(&pk, &padded, &sig).expect("encodes");
    assert!(failing_label(compiled(), &witness).starts_with("verify/"));
}

#[test]
fn test_hashed_message_bytes_do_not_reuse_signature() {
    let long: Vec<u8> = (0u8..40).collect();
    let (pk, msg, sig) = signed(17, &long);
    let mut element = msg.element().to_le_bytes();
    element.reverse();
    let replay = Message::from_bytes(&element, &mimc());
    assert_ne!(msg, replay);

    assert!(!native_verify(&pk, &replay, &sig));
    let witness = encode_witness(&pk, &replay, &sig).expect("encodes");
    assert!(failing_label(compiled(), &witness).starts_with("verify/"));
}

#[test]
fn test_encoding_errors() {
    let (pk, msg, sig) = signed(6, &DEADFOOD);

    assert_eq!(
        encode_witness(&pk, &msg, &sig[..95]),
        Err(EncodingError::SignatureLength {
            expected: 96,
            actual: 95
        })
    );

    let mut non_canonical = sig.clone();
    non_canonical[64..].copy_from_slice(&[0xff; 32]);
    assert_eq!(
        encode_witness(&pk, &msg, &non_canonical),
        Err(EncodingError::SignatureScalar)
    );
    assert!(!native_verify(&pk, &msg, &non_canonical));

    let circuit = BabyJubjubCircuit::default();
    assert!(matches!(
        circuit.assign_bytes(&[0u8; 64], &msg, &sig),
        Err(EncodingError::PublicKey(_))
    ));
    assert!(matches!(
        circuit.message_element(&[0xff; 32]),
        Err(EncodingError::Message(_))
    ));
    assert_eq!(circuit.message(&DEADFOOD), msg);
}

#[test]
fn test_encoding_is_deterministic() {
    let (pk, msg, sig) = signed(7, &DEADFOOD);
    let first = encode_witness(&pk, &msg, &sig).expect("encodes");
    let second = encode_witness(&pk, &msg, &sig).expect("encodes");
    assert_eq!(first, second);
    assert_eq!(
        first.to_bytes().expect("serialize"),
        second.to_bytes().expect("serialize")
    );

    let (pk_again, msg_again, sig_again) = signed(7, &DEADFOOD);
    assert_eq!(sig, sig_again);
    assert_eq!(encode_witness(&pk_again, &msg_again, &sig_again), Ok(first));
}

#[test]
fn test_compilation_is_deterministic() {
    let a = compile_verification_circuit();
    let b = compile_verification_circuit();
    assert_eq!(a.num_constraints(), b.num_constraints());
    assert_eq!(a.num_variables(), b.num_variables());
    assert_eq!(a.digest(), b.digest());
    assert_eq!(a, b);
}

#[test]
fn test_public_signature_mode() {
    let circuit = BabyJubjubCircuit::default().with_visibility(SignatureVisibility::Public);
    let cs = circuit.compile();
    assert_eq!(cs.num_public_inputs(), compiled().num_public_inputs() + 3);
    assert_eq!(cs.num_secret_inputs(), 0);
    assert_ne!(cs.digest(), compiled().digest());

    let (pk, msg, sig) = signed(8, &DEADFOOD);
    let witness = circuit.assign(&pk, &msg, &sig).expect("encodes");
    assert_eq!(witness.public.len(), 6);
    assert!(witness.secret.is_empty());
    assert!(cs.is_satisfied(&witness).expect("counts").is_satisfied());

    // The default layout does not accept the public-mode witness.
    assert!(compiled().is_satisfied(&witness).is_err());
}

#[test]
fn test_serialized_system_round_trips() {
    let cs = compiled();
    let bytes = cs.to_bytes().expect("serialize");
    let decoded = ConstraintSystem::<BaseField>::from_bytes(&bytes).expect("deserialize");

    assert_eq!(decoded.num_constraints(), cs.num_constraints());
    assert_eq!(decoded.num_variables(), cs.num_variables());
    assert_eq!(decoded.digest(), cs.digest());

    let (pk, msg, sig) = signed(9, &DEADFOOD);
    let witness = encode_witness(&pk, &msg, &sig).expect("encodes");
    let witness = WitnessAssignment::from_bytes(&witness.to_bytes().expect("serialize"))
        .expect("deserialize");
    assert_eq!(decoded.is_satisfied(&witness), Ok(Satisfaction::Satisfied));
}

#[test]
fn test_concurrent_solving() {
    let cs = compiled();
    let triples: Vec<_> = (10..14).map(|seed| signed(seed, &DEADFOOD)).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = triples
            .iter()
            .enumerate()
            .map(|(i, (pk, msg, sig))| {
                scope.spawn(move || {
                    let mut sig = sig.clone();
                    if i % 2 == 1 {
                        sig[0] ^= 1;
                    }
                    let witness = encode_witness(pk, msg, &sig).expect("encodes");
                    cs.is_satisfied(&witness).expect("counts").is_satisfied()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().expect("thread"), i % 2 == 0);
        }
    });
}

#[test]
fn test_backend_round_trip() {
    let backend = CheckingBackend;
    let cs = compiled();
    let Ok((proving_key, verifying_key)) = backend.setup(cs);

    let (pk, msg, sig) = signed(15, &DEADFOOD);
    let witness = encode_witness(&pk, &msg, &sig).expect("encodes");
    let proof = backend.prove(cs, &proving_key, &witness).expect("valid witness");

    assert_eq!(
        backend.verify(&proof, &verifying_key, witness.public_inputs()),
        Ok(true)
    );

    let mut wrong = witness.public_inputs().to_vec();
    wrong[2] += BaseField::ONE;
    assert_eq!(backend.verify(&proof, &verifying_key, &wrong), Ok(false));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn prop_signed_messages_satisfy(seed in any::<u64>(), bytes in prop::collection::vec(any::<u8>(), 0..80)) {
        let (pk, msg, sig) = signed(seed, &bytes);
        prop_assert!(native_verify(&pk, &msg, &sig));
        let witness = encode_witness(&pk, &msg, &sig).expect("encodes");
        prop_assert_eq!(compiled().is_satisfied(&witness), Ok(Satisfaction::Satisfied));
    }

    #[test]
    fn prop_bit_flips_are_rejected(seed in any::<u64>(), bit in 0usize..768) {
        let (pk, msg, mut sig) = signed(seed, &DEADFOOD);
        sig[bit / 8] ^= 1 << (bit % 8);

        prop_assert!(!native_verify(&pk, &msg, &sig));
        match encode_witness(&pk, &msg, &sig) {
            Err(_) => {}
            Ok(witness) => {
                let result = compiled().is_satisfied(&witness).expect("counts");
                prop_assert!(!result.is_satisfied());
            }
        }
    }
}
