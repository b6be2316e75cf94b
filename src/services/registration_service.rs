use crate::{database::UserStore, models::User, utils::AppError};
use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const REGISTERED_MESSAGE: &str = "User registered successfully";

/// Registration body: `email` plus any other profile fields, kept verbatim.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "a@x.com")]
    pub email: Option<String>,
    /// Client field order is kept (`serde_json` built with `preserve_order`).
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RegisterResponse {
    pub message: String,
}

impl RegisterResponse {
    pub fn created() -> Self {
        Self {
            message: REGISTERED_MESSAGE.to_string(),
        }
    }
}

/// Creates an account unless one already exists for the same email.
///
/// The lookup and the insert are separate round trips; a registration that
/// loses a race for the same email is rejected by the store's unique index
/// and comes back as `DuplicateAccount` too.
pub async fn register(store: &dyn UserStore, request: RegisterRequest) -> Result<User, AppError> {
    let email = request
        .email
        .filter(|email| !email.trim().is_empty())
        .ok_or_else(|| AppError::ValidationFailure("Email is required".to_string()))?;

    let profile = profile_document(request.profile);

    if store.find_by_email(&email).await?.is_some() {
        return Err(AppError::DuplicateAccount);
    }

    store.insert(User::new(email, profile)).await
}

fn profile_document(fields: Map<String, Value>) -> Document {
    fields.into_iter().map(|(key, value)| (key, json_to_bson(value))).collect()
}

/// Every JSON value has a BSON form. Integers outside the `i64` range are
/// stored as doubles.
fn json_to_bson(value: Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => match i32::try_from(i) {
                Ok(small) => Bson::Int32(small),
                Err(_) => Bson::Int64(i),
            },
            None => n.as_f64().map(Bson::Double).unwrap_or(Bson::Null),
        },
        Value::String(s) => Bson::String(s),
        Value::Array(items) => Bson::Array(items.into_iter().map(json_to_bson).collect()),
        Value::Object(fields) => Bson::Document(profile_document(fields)),
    }
}
