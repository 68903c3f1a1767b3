//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use mongodb::bson::{doc, to_bson};
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{Role, User};
use crate::repository::UserRepository;

pub const USERS_COLLECTION: &str = "users";

const DUPLICATE_KEY: i32 = 11000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDocument {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    email: String,
    password_hash: String,
    #[serde(default)]
    role: Role,
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role,
        }
    }
}

impl TryFrom<UserDocument> for User {
    type Error = UserError;

    fn try_from(doc: UserDocument) -> UserResult<Self> {
        Ok(Self {
            id: Uuid::parse_str(&doc.id)
                .map_err(|e| UserError::Corrupt(format!("bad id {}: {e}", doc.id)))?,
            name: doc.name,
            email: doc.email,
            password_hash: doc.password_hash,
            role: doc.role,
        })
    }
}

fn is_duplicate_key(err: &MongoError) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY
    )
}

/// MongoDB-based user repository
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(USERS_COLLECTION),
        }
    }

    /// Unique index on `email`; concurrent signups with one address resolve
    /// to a single account.
    pub async fn create_indexes(&self) -> UserResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, email))]
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        self.collection
            .find_one(doc! { "email": email })
            .await?
            .map(User::try_from)
            .transpose()
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: User) -> UserResult<User> {
        match self.collection.insert_one(UserDocument::from(&user)).await {
            Ok(_) => Ok(user),
            Err(e) if is_duplicate_key(&e) => Err(UserError::DuplicateEmail),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn update_role(&self, id: Uuid, role: Role) -> UserResult<()> {
        let role = to_bson(&role).map_err(|e| UserError::Corrupt(e.to_string()))?;
        let result = self
            .collection
            .update_one(
                doc! { "_id": id.to_string() },
                doc! { "$set": { "role": role } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(UserError::UserNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_layout() {
        let user = User::new(
            "Asha".into(),
            "asha@example.edu".into(),
            "$argon2id$...".into(),
            Role::Admin,
        );
        let document = mongodb::bson::to_document(&UserDocument::from(&user)).unwrap();

        assert_eq!(document.get_str("_id").unwrap(), user.id.to_string());
        assert_eq!(document.get_str("passwordHash").unwrap(), "$argon2id$...");
        assert_eq!(document.get_str("role").unwrap(), "admin");
    }

    #[test]
    fn test_document_round_trip() {
        let user = User::new("Asha".into(), "asha@example.edu".into(), "h".into(), Role::Student);
        let restored = User::try_from(UserDocument::from(&user)).unwrap();
        assert_eq!(restored, user);
    }

    #[test]
    fn test_missing_role_defaults_to_student() {
        let document = doc! {
            "_id": Uuid::now_v7().to_string(),
            "name": "Old",
            "email": "old@example.edu",
            "passwordHash": "h",
        };
        let parsed: UserDocument = mongodb::bson::from_document(document).unwrap();
        assert_eq!(parsed.role, Role::Student);
    }

    #[test]
    fn test_bad_id_is_corrupt() {
        let document = UserDocument {
            id: "not-a-uuid".into(),
            name: "X".into(),
            email: "x@example.edu".into(),
            password_hash: "h".into(),
            role: Role::Student,
        };
        assert!(matches!(User::try_from(document), Err(UserError::Corrupt(_))));
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_unique_email_against_mongo() {
        let url = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let client = mongodb::Client::with_uri_str(&url).await.unwrap();
        let db = client.database(&format!("circular_test_{}", Uuid::now_v7().simple()));
        let repo = MongoUserRepository::new(&db);
        repo.create_indexes().await.unwrap();

        let user = User::new("A".into(), "a@x.edu".into(), "h".into(), Role::Student);
        repo.create(user.clone()).await.unwrap();

        let again = User::new("B".into(), "a@x.edu".into(), "h".into(), Role::Student);
        assert!(matches!(repo.create(again).await, Err(UserError::DuplicateEmail)));

        repo.update_role(user.id, Role::Admin).await.unwrap();
        let found = repo.find_by_email("a@x.edu").await.unwrap().unwrap();
        assert_eq!(found.role, Role::Admin);

        db.drop().await.unwrap();
    }
}
