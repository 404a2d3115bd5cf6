use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ServiceError;

/// Store-assigned identifier. Never reused after deletion.
pub type UserId = u64;

/// Stored user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Create payload. Any client-supplied `id` is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Full update payload (PUT)
///
/// `id` is kept as raw JSON so any value that differs from the target id,
/// whatever its type, is reported as an immutable-field violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaceUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub name: String,
    pub email: String,
}

/// Partial update payload (PATCH)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatchUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Mutation applied to an existing record under the store lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserChange {
    Replace { name: String, email: String },
    Merge { name: Option<String>, email: Option<String> },
}

impl UserChange {
    /// Apply to `user` in place; `id` is never touched.
    pub fn apply(self, user: &mut User) {
        match self {
            UserChange::Replace { name, email } => {
                user.name = name;
                user.email = email;
            }
            UserChange::Merge { name, email } => {
                if let Some(name) = name {
                    user.name = name;
                }
                if let Some(email) = email {
                    user.email = email;
                }
            }
        }
    }
}

/// Numeric equality with `target`; `1.0` matches id 1, strings and other types never match.
fn id_matches(value: &Value, target: UserId) -> bool {
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(id) => id == target,
            None => n.as_f64() == Some(target as f64),
        },
        _ => false,
    }
}

/// Update payloads that may carry an `id` field.
pub trait IdentifiedPayload {
    fn requested_id(&self) -> Option<&Value>;

    /// Reject a payload whose `id` differs from the target id. A matching `id` passes.
    fn ensure_id_unchanged(&self, target: UserId) -> Result<(), ServiceError> {
        match self.requested_id() {
            Some(requested) if !id_matches(requested, target) => {
                Err(ServiceError::immutable("id", target, requested))
            }
            _ => Ok(()),
        }
    }
}

impl IdentifiedPayload for ReplaceUser {
    fn requested_id(&self) -> Option<&Value> { self.id.as_ref() }
}

impl IdentifiedPayload for PatchUser {
    fn requested_id(&self) -> Option<&Value> { self.id.as_ref() }
}

impl From<ReplaceUser> for UserChange {
    fn from(input: ReplaceUser) -> Self {
        UserChange::Replace { name: input.name, email: input.email }
    }
}

impl From<PatchUser> for UserChange {
    fn from(input: PatchUser) -> Self {
        UserChange::Merge { name: input.name, email: input.email }
    }
}

/// Fixture users present at startup.
pub fn seed_users() -> Vec<User> {
    vec![
        User { id: 1, name: "John Doe".into(), email: "john@example.com".into() },
        User { id: 2, name: "Jane Doe".into(), email: "jane@example.com".into() },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ann() -> User {
        User { id: 3, name: "Ann".into(), email: "ann@x.com".into() }
    }

    #[test]
    fn merge_touches_only_present_fields() {
        let mut user = ann();
        UserChange::Merge { name: Some("Annie".into()), email: None }.apply(&mut user);
        assert_eq!(user, User { id: 3, name: "Annie".into(), email: "ann@x.com".into() });
    }

    #[test]
    fn replace_overwrites_both_fields() {
        let mut user = ann();
        UserChange::Replace { name: "X".into(), email: "y@z.com".into() }.apply(&mut user);
        assert_eq!(user, User { id: 3, name: "X".into(), email: "y@z.com".into() });
    }

    #[test]
    fn patch_payload_distinguishes_absent_fields() {
        let patch: PatchUser = serde_json::from_str(r#"{"name":"X"}"#).unwrap();
        assert_eq!(patch.name.as_deref(), Some("X"));
        assert!(patch.email.is_none());
        assert!(patch.id.is_none());
    }

    #[test]
    fn replace_payload_requires_name_and_email() {
        assert!(serde_json::from_str::<ReplaceUser>(r#"{"name":"X"}"#).is_err());
        let ok: ReplaceUser = serde_json::from_str(r#"{"name":"X","email":"","id":4}"#).unwrap();
        assert_eq!(ok.id, Some(json!(4)));
        assert_eq!(ok.email, "");
    }

    #[test]
    fn differing_id_is_rejected_matching_id_passes() {
        let patch = PatchUser { id: Some(json!(99)), ..Default::default() };
        assert!(matches!(patch.ensure_id_unchanged(3), Err(ServiceError::ImmutableField(_))));
        let same = PatchUser { id: Some(json!(3)), ..Default::default() };
        assert!(same.ensure_id_unchanged(3).is_ok());
        assert!(PatchUser::default().ensure_id_unchanged(3).is_ok());
    }

    #[test]
    fn non_numeric_or_negative_id_is_rejected() {
        for bad in [json!(-5), json!("abc"), json!("3"), json!(3.5), json!(true), json!([3])] {
            let patch = PatchUser { id: Some(bad.clone()), ..Default::default() };
            assert!(
                matches!(patch.ensure_id_unchanged(3), Err(ServiceError::ImmutableField(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn float_id_equal_to_target_passes() {
        let put: ReplaceUser = serde_json::from_str(r#"{"name":"A","email":"a@x.com","id":1.0}"#).unwrap();
        assert!(put.ensure_id_unchanged(1).is_ok());
        assert!(put.ensure_id_unchanged(2).is_err());
    }

    #[test]
    fn null_id_counts_as_absent() {
        let patch: PatchUser = serde_json::from_str(r#"{"id":null,"name":"A"}"#).unwrap();
        assert!(patch.id.is_none());
        assert!(patch.ensure_id_unchanged(7).is_ok());
    }

    #[test]
    fn create_payload_ignores_client_id() {
        let input: NewUser = serde_json::from_str(r#"{"id":42,"name":"A","email":"a@x.com"}"#).unwrap();
        assert_eq!(input.name, "A");
    }

    #[test]
    fn seed_has_ids_one_and_two() {
        let ids: Vec<UserId> = seed_users().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
