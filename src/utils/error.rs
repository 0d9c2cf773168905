use std::fmt;

/// Erros da aplicação. O texto é devolvido cru ao cliente em `"response"`,
/// por isso `Display` não adiciona prefixos.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    DatabaseError(String),
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DatabaseError(msg) => write!(f, "{}", msg),
            AppError::NotFound => write!(f, "not found"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}
