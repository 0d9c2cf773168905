use std::env;

/// Configuração do serviço, lida uma vez no startup.
///
/// Sem variáveis de ambiente os valores padrão reproduzem a implantação padrão:
/// porta 8080 em todas as interfaces, MongoDB local, `usergo.profiles`.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub database: String,
    pub collection: String,
}

pub const DEFAULT_MONGODB_URI: &str = "mongodb://127.0.0.1:27017/?readPreference=primaryPreferred";

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            // primaryPreferred: leitura consistente por sessão, pode atrasar em relação ao primário
            mongodb_uri: DEFAULT_MONGODB_URI.to_string(),
            database: "usergo".to_string(),
            collection: "profiles".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("⚠️  Invalid PORT '{}', using {}", raw, defaults.port);
                defaults.port
            }),
            None => defaults.port,
        };

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            mongodb_uri: lookup("MONGODB_URI").unwrap_or(defaults.mongodb_uri),
            database: lookup("MONGODB_DATABASE").unwrap_or(defaults.database),
            collection: lookup("MONGODB_COLLECTION").unwrap_or(defaults.collection),
        }
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
