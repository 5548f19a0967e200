//! Example encoding a signature, checking it against the compiled circuit
//! and running it through the checking backend, then repeating with a
//! single flipped signature bit.

use circuit::{
    compile_verification_circuit, encode_witness, native_verify, BaseField, CheckingBackend,
    Message, Mimc, ProvingSystem, Satisfaction, SigningKey,
};
use rand::rng;
use std::time::Instant;

fn main() {
    let mut rng = rng();
    let mimc = Mimc::<BaseField>::default();
    let signing_key: SigningKey = SigningKey::random(&mut rng);
    let verifying_key = signing_key.verifying_key();

    let message = Message::from_bytes(&[0xde, 0xad, 0xf0, 0x0d], &mimc);
    let signature = signing_key.sign(&mimc, &message).to_bytes();

    let compile_start = Instant::now();
    let cs = compile_verification_circuit();
    let compile_time = compile_start.elapsed();

    println!("Constraints: {}", cs.num_constraints());
    println!("Variables: {}", cs.num_variables());
    println!(
        "Inputs: {} public, {} secret",
        cs.num_public_inputs(),
        cs.num_secret_inputs()
    );
    println!("Compile time: {:?}", compile_time);

    let backend = CheckingBackend;
    let Ok((proving_key, verification_key)) = backend.setup(&cs);

    println!("Native verify: {}", native_verify(&verifying_key, &message, &signature));

    let witness = encode_witness(&verifying_key, &message, &signature).expect("encode");
    let prove_start = Instant::now();
    let proof = backend.prove(&cs, &proving_key, &witness).expect("prove");
    let prove_time = prove_start.elapsed();
    let valid = backend
        .verify(&proof, &verification_key, witness.public_inputs())
        .expect("verify");
    println!("Proving time: {:?}", prove_time);
    println!("Proof verified: {}", valid);

    let mut tampered = signature;
    tampered[0] ^= 1;
    println!(
        "Tampered native verify: {}",
        native_verify(&verifying_key, &message, &tampered)
    );

    let witness = encode_witness(&verifying_key, &message, &tampered).expect("encode");
    match cs.is_satisfied(&witness).expect("input layout") {
        Satisfaction::Satisfied => println!("Tampered witness satisfied the circuit"),
        Satisfaction::Unsatisfied(id) => println!(
            "Tampered witness fails constraint {} ({})",
            id,
            cs.constraint_label(id).unwrap_or("unlabelled")
        ),
    }
    match backend.prove(&cs, &proving_key, &witness) {
        Ok(_) => println!("Tampered proof generated"),
        Err(err) => println!("Tampered proof rejected: {}", err),
    }
}
