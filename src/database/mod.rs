use crate::{config::Config, models::User, utils::AppError};
use async_trait::async_trait;
use mongodb::bson::{doc, Bson, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use std::time::Duration;

#[cfg(test)]
pub mod memory;

pub const USERS_COLLECTION: &str = "users";

const DUPLICATE_KEY_CODE: i32 = 11000;

/// Persistence seam for accounts. Handlers only see this trait, so the
/// MongoDB client can be swapped for the in-memory store in tests.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Persists `user` and returns it with the store-assigned id.
    /// A second account for the same email fails with `DuplicateAccount`.
    async fn insert(&self, user: User) -> Result<User, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let mut client_options = ClientOptions::parse(&config.mongo_uri)
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

        client_options.max_pool_size = Some(config.mongo_max_pool_size);
        client_options.max_idle_time = Some(Duration::from_secs(300));
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let hosts = client_options
            .hosts
            .iter()
            .map(|host| host.to_string())
            .collect::<Vec<_>>()
            .join(",");

        // Database name from the URI path wins over MONGO_DATABASE
        let db_name = client_options
            .default_database
            .clone()
            .unwrap_or_else(|| config.mongo_database.clone());

        let client = Client::with_options(client_options)
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        let db = client.database(&db_name);

        // Test connection
        db.list_collection_names()
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

        log::info!("🍃 DB connected in {} (database: {})", hosts, db_name);

        let mongodb = Self { db };
        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Unique index on `users.email` backs the pre-insert duplicate check
    /// when two registrations for the same email race.
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("users_email_unique".to_string())
                    .build(),
            )
            .build();

        match self.users().create_index(email_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(email) unique"),
            Err(e) => log::warn!("   ⚠️  Could not create users(email) index: {}", e),
        }
    }

    fn users(&self) -> Collection<Document> {
        self.db.collection(USERS_COLLECTION)
    }
}

#[async_trait]
impl UserStore for MongoDB {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let found = self
            .users()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

        match found {
            Some(document) => User::from_document(document).map(Some).ok_or_else(|| {
                AppError::StoreUnavailable(format!("stored user for {} has no email", email))
            }),
            None => Ok(None),
        }
    }

    async fn insert(&self, mut user: User) -> Result<User, AppError> {
        let result = self
            .users()
            .insert_one(user.to_document())
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::DuplicateAccount
                } else {
                    AppError::StoreWriteError(e.to_string())
                }
            })?;

        if let Bson::ObjectId(id) = result.inserted_id {
            user.id = Some(id);
        }
        Ok(user)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.db
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))
    }
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY_CODE
    )
}
