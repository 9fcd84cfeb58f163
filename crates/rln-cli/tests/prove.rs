//! Prove subcommand against the mock backend.

use rln_cli::prove::{run, Backend, ProveArgs};
use rln_core::FieldElement;
use rln_protocol::{rate_commitment, Identity};

fn write_room(dir: &std::path::Path, members: &[FieldElement]) -> std::path::PathBuf {
    let path = dir.join("room.json");
    let room = serde_json::json!({
        "id": "123",
        "membership": { "identityCommitments": members },
    });
    std::fs::write(&path, serde_json::to_vec(&room).unwrap()).unwrap();
    path
}

fn args(room: std::path::PathBuf, identity: &Identity, limit: u64) -> ProveArgs {
    ProveArgs {
        room,
        identity: identity.to_serialized(),
        message: "hello world".to_string(),
        message_id: 0,
        limit,
        backend: Backend::Mock,
    }
}

#[tokio::test]
async fn mock_backend_produces_message() {
    let dir = tempfile::tempdir().unwrap();
    let identity = Identity::from_seed("cli-prove").unwrap();
    let rate = rate_commitment(&identity, 1).unwrap();
    let room = write_room(dir.path(), &[FieldElement::from(1u64), rate]);

    let out = run(&args(room, &identity, 1)).await.unwrap();
    assert_eq!(out["message"], "hello world");
    assert_eq!(out["roomId"], "123");
    assert_eq!(
        out["id"],
        out["proof"]["snarkProof"]["publicSignals"]["nullifier"]
    );
}

#[tokio::test]
async fn unregistered_identity_fails() {
    let dir = tempfile::tempdir().unwrap();
    let identity = Identity::from_seed("cli-prove").unwrap();
    let room = write_room(dir.path(), &[FieldElement::from(1u64)]);

    let err = run(&args(room, &identity, 1)).await.unwrap_err();
    assert!(format!("{err:#}").contains("not a member"));
}
