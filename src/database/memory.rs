use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use super::ProfileStore;
use crate::models::{MsisdnFilter, UserProfile};
use crate::utils::AppError;

/// Store em memória para testes; reproduz a rejeição do índice único em `msisdn`.
#[derive(Default)]
pub struct MemoryStore {
    profiles: Mutex<Vec<UserProfile>>,
    failure: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store cujas operações falham todas com `message`
    pub fn failing(message: &str) -> Self {
        Self {
            profiles: Mutex::new(Vec::new()),
            failure: Some(message.to_string()),
        }
    }

    pub fn len(&self) -> usize {
        self.profiles.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), AppError> {
        match &self.failure {
            Some(msg) => Err(AppError::DatabaseError(msg.clone())),
            None => Ok(()),
        }
    }
}

fn same_key(filter: &MsisdnFilter, profile: &UserProfile) -> bool {
    profile.msisdn == filter.msisdn
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<UserProfile>, AppError> {
        self.check()?;
        Ok(self.profiles.lock().unwrap().clone())
    }

    async fn find_one(&self, filter: &MsisdnFilter) -> Result<UserProfile, AppError> {
        self.check()?;
        self.profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| same_key(filter, p))
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn insert(&self, profile: &UserProfile) -> Result<(), AppError> {
        self.check()?;
        let mut profiles = self.profiles.lock().unwrap();
        if profiles.iter().any(|p| p.msisdn == profile.msisdn) {
            return Err(AppError::DatabaseError(format!(
                "E11000 duplicate key error collection: usergo.profiles index: msisdn_unique dup key: {{ msisdn: \"{}\" }}",
                profile.msisdn
            )));
        }
        let mut stored = profile.clone();
        stored.id = Some(ObjectId::new());
        profiles.push(stored);
        Ok(())
    }

    async fn replace_one(&self, filter: &MsisdnFilter, profile: &UserProfile) -> Result<(), AppError> {
        self.check()?;
        let mut profiles = self.profiles.lock().unwrap();
        let clash = profiles
            .iter()
            .any(|p| p.msisdn == profile.msisdn && !same_key(filter, p));
        let slot = profiles
            .iter_mut()
            .find(|p| same_key(filter, p))
            .ok_or(AppError::NotFound)?;
        if clash {
            return Err(AppError::DatabaseError(format!(
                "E11000 duplicate key error collection: usergo.profiles index: msisdn_unique dup key: {{ msisdn: \"{}\" }}",
                profile.msisdn
            )));
        }
        let id = slot.id;
        *slot = profile.clone();
        slot.id = id;
        Ok(())
    }

    async fn delete_one(&self, filter: &MsisdnFilter) -> Result<(), AppError> {
        self.check()?;
        let mut profiles = self.profiles.lock().unwrap();
        let pos = profiles
            .iter()
            .position(|p| same_key(filter, p))
            .ok_or(AppError::NotFound)?;
        profiles.remove(pos);
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check()
    }
}
