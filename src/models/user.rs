use chrono::{DateTime, Utc};
use mongodb::bson::{self, doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// Perfil de usuário (armazenado no MongoDB, coleção `profiles`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    #[serde(default)]
    pub firstname: String,

    #[serde(default)]
    pub lastname: String,

    #[serde(default)]
    pub age: i64,

    /// Chave de negócio, única (índice unique + sparse)
    #[serde(default)]
    pub msisdn: String,

    /// Carimbado no update (sim, o nome está invertido com `last_update`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inserted_at: Option<bson::DateTime>,

    /// Carimbado no create
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<bson::DateTime>,
}

/// Corpo JSON de POST/PUT/DELETE. Campos ausentes viram valor zero,
/// então um PUT sem `lastname` apaga o sobrenome guardado.
/// Os timestamps enviados pelo cliente são aceitos; o handler sobrescreve
/// apenas o que ele mesmo carimba.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct UserPayload {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub age: i64,
    #[serde(default)]
    pub msisdn: String,
    #[serde(default)]
    pub inserted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_update: Option<DateTime<Utc>>,
}

impl From<UserPayload> for UserProfile {
    fn from(p: UserPayload) -> Self {
        UserProfile {
            id: None,
            firstname: p.firstname,
            lastname: p.lastname,
            age: p.age,
            msisdn: p.msisdn,
            inserted_at: p.inserted_at.map(to_bson),
            last_update: p.last_update.map(to_bson),
        }
    }
}

/// Response de perfil
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserProfileResponse {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub age: i64,
    pub msisdn: String,
    pub inserted_at: Option<DateTime<Utc>>,
    pub last_update: Option<DateTime<Utc>>,
}

fn to_bson(dt: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(dt.timestamp_millis())
}

fn to_chrono(dt: Option<bson::DateTime>) -> Option<DateTime<Utc>> {
    dt.and_then(|d| DateTime::from_timestamp_millis(d.timestamp_millis()))
}

impl From<UserProfile> for UserProfileResponse {
    fn from(u: UserProfile) -> Self {
        UserProfileResponse {
            id: u.id.map(|id| id.to_hex()).unwrap_or_default(),
            firstname: u.firstname,
            lastname: u.lastname,
            age: u.age,
            msisdn: u.msisdn,
            inserted_at: to_chrono(u.inserted_at),
            last_update: to_chrono(u.last_update),
        }
    }
}

/// Filtro tipado por `msisdn`, usado em find/replace/delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsisdnFilter {
    pub msisdn: String,
}

impl MsisdnFilter {
    pub fn new(msisdn: impl Into<String>) -> Self {
        Self { msisdn: msisdn.into() }
    }

    pub fn to_document(&self) -> Document {
        doc! { "msisdn": &self.msisdn }
    }
}
