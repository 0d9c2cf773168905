use async_trait::async_trait;

use crate::models::{MsisdnFilter, UserProfile};
use crate::utils::AppError;

/// Operações de persistência de perfis.
///
/// Os handlers recebem a implementação como `web::Data<dyn ProfileStore>`;
/// em produção é o [`MongoDB`](super::MongoDB).
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Todos os perfis, sem filtro nem paginação
    async fn find_all(&self) -> Result<Vec<UserProfile>, AppError>;

    /// Primeiro perfil com o `msisdn` exato; `AppError::NotFound` se não houver
    async fn find_one(&self, filter: &MsisdnFilter) -> Result<UserProfile, AppError>;

    /// Sem checagem prévia de unicidade: duplicatas são rejeitadas pelo índice
    async fn insert(&self, profile: &UserProfile) -> Result<(), AppError>;

    /// Substitui o documento inteiro do primeiro match
    async fn replace_one(&self, filter: &MsisdnFilter, profile: &UserProfile) -> Result<(), AppError>;

    async fn delete_one(&self, filter: &MsisdnFilter) -> Result<(), AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}
