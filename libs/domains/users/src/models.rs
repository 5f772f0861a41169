use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::{UserError, UserResult};

/// Allowed length of a user id, in characters.
pub const USER_ID_LENGTH: RangeInclusive<usize> = 6..=20;

/// Allowed length of a credential, in characters.
pub const CREDENTIAL_LENGTH: RangeInclusive<usize> = 8..=20;

/// Printable ASCII without the space character.
const CREDENTIAL_CHARSET: RangeInclusive<u8> = 0x21..=0x7E;

/// Custom validator for user ids: 6-20 ASCII letters or digits.
pub fn validate_user_id(id: &str) -> Result<(), ValidationError> {
    if !USER_ID_LENGTH.contains(&id.len()) || !id.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(ValidationError::new("invalid_user_id"));
    }
    Ok(())
}

/// Custom validator for credentials: 8-20 printable ASCII characters, no spaces.
pub fn validate_credential(credential: &str) -> Result<(), ValidationError> {
    if !CREDENTIAL_LENGTH.contains(&credential.len())
        || !credential.bytes().all(|b| CREDENTIAL_CHARSET.contains(&b))
    {
        return Err(ValidationError::new("invalid_credential"));
    }
    Ok(())
}

/// A stored account.
///
/// `id` and `credential` are fixed at creation; only `display_name` and
/// `note` change afterwards. Not serializable, so the credential cannot leak
/// into a response by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub credential: String,
    pub display_name: String,
    pub note: String,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("credential", &"<redacted>")
            .field("display_name", &self.display_name)
            .field("note", &self.note)
            .finish()
    }
}

impl User {
    /// Create a user, defaulting `display_name` to the id and `note` to "".
    pub fn new(
        id: String,
        credential: String,
        display_name: Option<String>,
        note: Option<String>,
    ) -> Self {
        let display_name = display_name.unwrap_or_else(|| id.clone());
        Self {
            id,
            credential,
            display_name,
            note: note.unwrap_or_default(),
        }
    }

    /// Exact comparison against the stored credential.
    pub fn authenticate(&self, credential: &str) -> UserResult<()> {
        if self.credential != credential {
            return Err(UserError::AuthenticationFailed);
        }
        Ok(())
    }

    /// Apply a profile update, all or nothing.
    ///
    /// Fails without touching `self` if the update names `id`/`credential` or
    /// carries neither `displayName` nor `note`.
    pub fn apply_update(&mut self, update: UpdateUser) -> UserResult<()> {
        if update.id.is_some() || update.credential.is_some() {
            return Err(UserError::ImmutableField);
        }
        if update.display_name.is_none() && update.note.is_none() {
            return Err(UserError::NothingToUpdate);
        }

        if let Some(display_name) = update.display_name {
            self.display_name = display_name;
        }
        if let Some(note) = update.note {
            self.note = note;
        }
        Ok(())
    }
}

/// Signup request body.
///
/// Missing `id`/`credential` deserialize as empty strings so they surface as
/// validation failures rather than JSON errors.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// 6-20 ASCII letters or digits
    #[serde(default, alias = "user_id")]
    #[validate(custom(function = "validate_user_id"))]
    #[schema(example = "TaroYamada")]
    pub id: String,
    /// 8-20 printable ASCII characters, no spaces
    #[serde(default, alias = "password")]
    #[validate(custom(function = "validate_credential"))]
    #[schema(example = "PaSSwd4TY")]
    pub credential: String,
    /// Defaults to `id`
    #[serde(default, alias = "nickname")]
    pub display_name: Option<String>,
    /// Defaults to ""
    #[serde(default, alias = "comment")]
    pub note: Option<String>,
}

/// Profile update body. Absent fields are left unchanged; an empty string is
/// a real value.
///
/// `id` and `credential` are only captured so that an attempt to change them
/// can be refused.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(default, alias = "nickname")]
    pub display_name: Option<String>,
    #[serde(default, alias = "comment")]
    pub note: Option<String>,
    #[serde(default, alias = "user_id")]
    #[schema(value_type = Option<String>, read_only)]
    pub id: Option<serde_json::Value>,
    #[serde(default, alias = "password")]
    #[schema(value_type = Option<String>, read_only)]
    pub credential: Option<serde_json::Value>,
}

/// Account summary returned by signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUser {
    pub id: String,
    pub display_name: String,
}

impl From<&User> for CreatedUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            display_name: user.display_name.clone(),
        }
    }
}

/// Full public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    pub id: String,
    pub display_name: String,
    pub note: String,
}

impl From<&User> for UserDetails {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            display_name: user.display_name.clone(),
            note: user.note.clone(),
        }
    }
}

/// The mutable part of an account, as it stands after an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub display_name: String,
    pub note: String,
}

impl From<&User> for Profile {
    fn from(user: &User) -> Self {
        Self {
            display_name: user.display_name.clone(),
            note: user.note.clone(),
        }
    }
}

/// `POST /signup` success body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignupResponse {
    pub message: String,
    pub user: CreatedUser,
}

/// `GET /users/{id}` success body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDetailsResponse {
    pub message: String,
    pub user: UserDetails,
}

/// `PATCH /users/{id}` success body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserResponse {
    pub message: String,
    pub recipe: Profile,
}

/// Body for responses that only carry a message
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
