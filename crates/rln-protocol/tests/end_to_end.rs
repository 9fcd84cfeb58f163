//! Full request flow: room snapshot, identity and message through the
//! assembler and the mock prover.

use std::sync::Arc;
use std::time::Duration;

use rln_core::FieldElement;
use rln_crypto::{IncrementalMerkleTree, Poseidon2Hasher};
use rln_protocol::{
    derive_zero_value, rate_commitment, recover_identity_commitment, recover_identity_secret,
    AssemblyError, FixedClock, GenProofRequest, Group, Identity, ProofAssembler, Room,
    SlashingError, SystemClock, DEFAULT_DEPTH,
};
use rln_zkp::MockProver;

fn fe(v: u64) -> FieldElement {
    FieldElement::from(v)
}

fn registered_room(identity: &Identity, limit: u64) -> Room {
    let rate = rate_commitment(identity, limit).unwrap();
    Room::new("123", vec![fe(123), fe(456), rate])
}

fn fixed_assembler(epoch: u64) -> ProofAssembler<MockProver, FixedClock> {
    ProofAssembler::new(Arc::new(MockProver::default()), FixedClock::new(epoch))
}

#[test]
fn group_lookup_and_scalar_siblings() {
    let group = Group::new(fe(123), DEFAULT_DEPTH, vec![fe(123), fe(456)]).unwrap();
    assert_eq!(group.index_of(&fe(456)), Some(1));
    let proof = group.generate_merkle_proof(1).unwrap();
    assert_eq!(proof.siblings.len(), 20);
    assert_eq!(proof.path_indices.len(), 20);
}

#[test]
fn assembled_proof_verifies_against_independent_tree() {
    let identity = Identity::from_seed("end-to-end").unwrap();
    let room = registered_room(&identity, 1);
    let assembler = fixed_assembler(1);
    let input = assembler
        .assemble_input(&GenProofRequest::new(&room, "hello world", &identity))
        .unwrap();

    let mut tree = IncrementalMerkleTree::new(
        Poseidon2Hasher,
        DEFAULT_DEPTH,
        derive_zero_value(&fe(123)),
        vec![fe(123), fe(456)],
    )
    .unwrap();
    let rate = rate_commitment(&identity, 1).unwrap();
    assert_eq!(tree.insert(rate).unwrap(), 2);

    assert_eq!(input.merkle_proof.root, tree.root());
    assert_eq!(input.merkle_proof.leaf, rate);
    assert_eq!(input.merkle_proof.path_indices[..2], [0, 1]);
    assert!(tree.verify_proof(&input.merkle_proof.clone().into()));
    assert_eq!(input.identity_secret, identity.secret());
}

#[test]
fn unregistered_limit_is_member_not_found() {
    let identity = Identity::from_seed("end-to-end").unwrap();
    let room = registered_room(&identity, 1);
    let request = GenProofRequest::new(&room, "hello world", &identity).message_limit(2);
    let err = fixed_assembler(1).assemble_input(&request).unwrap_err();
    assert!(matches!(err, AssemblyError::MemberNotFound { limit: 2, .. }));
}

#[test]
fn seeded_identity_is_stable_and_round_trips() {
    let a = Identity::from_seed("hello world").unwrap();
    let b = Identity::from_seed("hello world").unwrap();
    assert_eq!(a.trapdoor(), b.trapdoor());
    assert_eq!(a.nullifier(), b.nullifier());
    assert_eq!(a.secret(), b.secret());
    assert_eq!(a.commitment(), b.commitment());

    let restored = Identity::from_serialized(&a.to_string()).unwrap();
    assert_eq!(restored, a);
}

#[tokio::test]
async fn message_id_is_proof_nullifier() {
    let identity = Identity::from_seed("alice").unwrap();
    let room = registered_room(&identity, 1);
    let assembler = fixed_assembler(1_700_000_000);
    let message = assembler
        .gen_proof(GenProofRequest::new(&room, "hello world", &identity))
        .await
        .unwrap();

    assert_eq!(message.id, message.proof.nullifier().to_string());
    assert_eq!(message.message, "hello world");
    assert_eq!(message.room_id, fe(123));
    assert_eq!(message.proof.epoch, fe(1_700_000_000));
    assert!(assembler.prover().verify(&message.proof));

    let json = serde_json::to_value(&message).unwrap();
    assert!(json.get("roomId").is_some());
}

#[tokio::test]
async fn quota_within_one_epoch_yields_distinct_nullifiers() {
    let identity = Identity::from_seed("bob").unwrap();
    let room = registered_room(&identity, 2);
    let assembler = fixed_assembler(9);
    let first = assembler
        .gen_proof(GenProofRequest::new(&room, "one", &identity).message_limit(2))
        .await
        .unwrap();
    let second = assembler
        .gen_proof(
            GenProofRequest::new(&room, "two", &identity)
                .message_limit(2)
                .message_id(1),
        )
        .await
        .unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(
        recover_identity_secret(&first.proof, &second.proof),
        Err(SlashingError::NullifierMismatch)
    );
}

#[tokio::test]
async fn double_signal_reveals_identity() {
    let identity = Identity::from_seed("spammer").unwrap();
    let room = registered_room(&identity, 1);
    let assembler = fixed_assembler(42);
    let first = assembler
        .gen_proof(GenProofRequest::new(&room, "buy now", &identity))
        .await
        .unwrap();
    let second = assembler
        .gen_proof(GenProofRequest::new(&room, "buy again", &identity))
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(
        recover_identity_secret(&first.proof, &second.proof).unwrap(),
        identity.secret()
    );
    assert_eq!(
        recover_identity_commitment(&first.proof, &second.proof).unwrap(),
        identity.commitment()
    );
}

/// Known deviation: the system clock stamps every request with its own
/// millisecond epoch, so repeated messages never share a nullifier.
#[tokio::test]
async fn wall_clock_epoch_separates_repeated_messages() {
    let identity = Identity::from_seed("carol").unwrap();
    let room = registered_room(&identity, 1);
    let assembler = ProofAssembler::new(Arc::new(MockProver::default()), SystemClock);

    let first = assembler
        .gen_proof(GenProofRequest::new(&room, "again", &identity))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = assembler
        .gen_proof(GenProofRequest::new(&room, "again", &identity))
        .await
        .unwrap();

    assert_ne!(first.proof.epoch, second.proof.epoch);
    assert_ne!(first.id, second.id);
}
