mod store;
#[cfg(test)]
pub mod memory;

pub use store::ProfileStore;

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};

use crate::config::Config;
use crate::models::{MsisdnFilter, UserProfile};
use crate::utils::AppError;

pub const MSISDN_INDEX: &str = "msisdn_unique";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
    profiles: Collection<UserProfile>,
}

impl MongoDB {
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let mut client_options = ClientOptions::parse(&config.mongodb_uri).await?;

        client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(&config.database);

        // Test connection
        db.run_command(doc! { "ping": 1 }).await?;

        let profiles = db.collection::<UserProfile>(&config.collection);
        let mongodb = Self { db, profiles };

        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Índice unique + sparse em `msisdn`. Falha aqui é fatal no startup.
    async fn ensure_indexes(&self) -> Result<(), AppError> {
        log::info!("🔧 Creating database indexes...");

        let msisdn_index = IndexModel::builder()
            .keys(doc! { "msisdn": 1 })
            .options(
                IndexOptions::builder()
                    .name(MSISDN_INDEX.to_string())
                    .unique(true)
                    .sparse(true)
                    // sem efeito no MongoDB 4.2+; mantém a intenção de build em background
                    .background(true)
                    .build(),
            )
            .build();

        self.profiles.create_index(msisdn_index).await.map_err(|e| {
            log::error!("❌ Failed to create index {}: {}", MSISDN_INDEX, e);
            AppError::from(e)
        })?;

        log::info!("   ✅ Index ready: {}(msisdn)", self.profiles.name());
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MongoDB {
    async fn find_all(&self) -> Result<Vec<UserProfile>, AppError> {
        let cursor = self.profiles.find(doc! {}).await?;
        let profiles: Vec<UserProfile> = cursor.try_collect().await?;
        Ok(profiles)
    }

    async fn find_one(&self, filter: &MsisdnFilter) -> Result<UserProfile, AppError> {
        self.profiles
            .find_one(filter.to_document())
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn insert(&self, profile: &UserProfile) -> Result<(), AppError> {
        self.profiles.insert_one(profile).await?;
        Ok(())
    }

    async fn replace_one(&self, filter: &MsisdnFilter, profile: &UserProfile) -> Result<(), AppError> {
        let result = self.profiles.replace_one(filter.to_document(), profile).await?;
        if result.matched_count == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn delete_one(&self, filter: &MsisdnFilter) -> Result<(), AppError> {
        let result = self.profiles.delete_one(filter.to_document()).await?;
        if result.deleted_count == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
