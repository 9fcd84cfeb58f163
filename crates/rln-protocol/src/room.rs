//! Read-only room snapshot supplied by the caller.

use std::fmt;

use serde::{Deserialize, Serialize};

use rln_core::FieldElement;

use crate::error::AssemblyError;

/// A room identifier as it appears on the wire: a string (decimal or
/// `0x` hex) or a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoomId {
    Number(u64),
    Text(String),
}

impl RoomId {
    /// The room id as a field element; also the proof's `rlnIdentifier`.
    pub fn to_field(&self) -> Result<FieldElement, AssemblyError> {
        match self {
            Self::Number(n) => Ok(FieldElement::from(*n)),
            Self::Text(text) => {
                text.trim()
                    .parse()
                    .map_err(|source| AssemblyError::InvalidRoomId {
                        id: text.clone(),
                        source,
                    })
            }
        }
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<u64> for RoomId {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for RoomId {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Registered rate commitments of a room, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub identity_commitments: Vec<FieldElement>,
}

/// A room and its current membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership: Option<Membership>,
}

impl Room {
    pub fn new(id: impl Into<RoomId>, members: Vec<FieldElement>) -> Self {
        Self {
            id: id.into(),
            membership: Some(Membership {
                identity_commitments: members,
            }),
        }
    }

    /// Member list; empty when the room has no membership section.
    pub fn members(&self) -> &[FieldElement] {
        self.membership
            .as_ref()
            .map(|m| m.identity_commitments.as_slice())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_and_numeric_ids() {
        let room: Room = serde_json::from_str(
            r#"{"id": "123", "membership": {"identityCommitments": ["123", 456]}}"#,
        )
        .unwrap();
        assert_eq!(room.id.to_field().unwrap(), FieldElement::from(123u64));
        assert_eq!(
            room.members(),
            &[FieldElement::from(123u64), FieldElement::from(456u64)]
        );

        let room: Room = serde_json::from_str(r#"{"id": 77}"#).unwrap();
        assert_eq!(room.id, RoomId::Number(77));
        assert!(room.members().is_empty());
    }

    #[test]
    fn hex_room_id() {
        assert_eq!(
            RoomId::from("0x10").to_field().unwrap(),
            FieldElement::from(16u64)
        );
    }

    #[test]
    fn invalid_room_id() {
        let err = RoomId::from("lobby").to_field().unwrap_err();
        assert!(matches!(err, AssemblyError::InvalidRoomId { .. }));
    }

    #[test]
    fn invalid_member_rejected_at_parse() {
        let result: Result<Room, _> = serde_json::from_str(
            r#"{"id": "1", "membership": {"identityCommitments": ["-5"]}}"#,
        );
        assert!(result.is_err());
    }
}
