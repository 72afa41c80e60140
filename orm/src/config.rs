use crate::error::OrmError;

const MEMORY_DB: &str = ":memory:";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub filename: String,
    pub max_connections: u32,
}

impl DbConfig {
    pub fn from_env() -> Result<Self, OrmError> {
        // Load environment variables from .env file
        dotenvy::dotenv().ok();

        let config = Self::parse(
            std::env::var("DB_FILENAME").ok(),
            std::env::var("DB_MAX_CONNECTIONS").ok(),
        )?;

        tracing::info!(
            "Config:\nDB_FILENAME: {}\nDB_MAX_CONNECTIONS: {}",
            config.filename,
            config.max_connections
        );

        Ok(config)
    }

    /// A private in-memory database behind a single connection. While a
    /// transaction holds that connection, reads through the pool wait until
    /// it is released and time out with `PoolTimedOut` if it never is.
    pub fn in_memory() -> Self {
        DbConfig {
            filename: MEMORY_DB.to_string(),
            max_connections: 1,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.filename == MEMORY_DB
    }

    fn parse(
        db_filename: Option<String>,
        max_connections: Option<String>,
    ) -> Result<Self, OrmError> {
        let filename = db_filename
            .filter(|name| !name.is_empty())
            .ok_or_else(|| OrmError::Config("DB_FILENAME env var not found".to_string()))?;

        let max_connections = match max_connections {
            Some(val) => val.parse::<u32>().map_err(|_| {
                OrmError::Config(format!("DB_MAX_CONNECTIONS must be a number, got {val}"))
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        if max_connections == 0 {
            return Err(OrmError::Config(
                "DB_MAX_CONNECTIONS must be a positive number".to_string(),
            ));
        }

        Ok(DbConfig {
            filename,
            max_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_max_connections() {
        let config = DbConfig::parse(Some("bridge.db".to_string()), None).unwrap();
        assert_eq!(config.filename, "bridge.db");
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert!(!config.is_in_memory());
    }

    #[test]
    fn requires_filename() {
        assert!(matches!(
            DbConfig::parse(None, None),
            Err(OrmError::Config(_))
        ));
        assert!(matches!(
            DbConfig::parse(Some(String::new()), None),
            Err(OrmError::Config(_))
        ));
    }

    #[test]
    fn rejects_bad_max_connections() {
        let name = || Some("bridge.db".to_string());
        assert!(DbConfig::parse(name(), Some("0".to_string())).is_err());
        assert!(DbConfig::parse(name(), Some("many".to_string())).is_err());
        let config = DbConfig::parse(name(), Some("8".to_string())).unwrap();
        assert_eq!(config.max_connections, 8);
    }

    #[test]
    fn in_memory_uses_single_connection() {
        let config = DbConfig::in_memory();
        assert!(config.is_in_memory());
        assert_eq!(config.max_connections, 1);
    }
}
