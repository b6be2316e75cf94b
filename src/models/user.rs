use mongodb::bson::{oid::ObjectId, Bson, Document};

/// A registered account. `profile` holds every field other than `_id` and
/// `email`, stored exactly as received.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Option<ObjectId>,
    pub email: String,
    pub profile: Document,
}

impl User {
    pub fn new(email: String, mut profile: Document) -> Self {
        // The store assigns identifiers
        profile.remove("_id");
        profile.remove("email");
        Self { id: None, email, profile }
    }

    pub fn user_id(&self) -> Option<String> {
        self.id.map(|id| id.to_hex())
    }

    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        if let Some(id) = self.id {
            doc.insert("_id", id);
        }
        doc.insert("email", self.email.clone());
        for (key, value) in self.profile.iter() {
            doc.insert(key.clone(), value.clone());
        }
        doc
    }

    /// Returns `None` when the document has no string `email`.
    pub fn from_document(mut doc: Document) -> Option<Self> {
        let id = match doc.remove("_id") {
            Some(Bson::ObjectId(id)) => Some(id),
            _ => None,
        };
        let email = match doc.remove("email") {
            Some(Bson::String(email)) => email,
            _ => return None,
        };
        Some(Self { id, email, profile: doc })
    }
}
