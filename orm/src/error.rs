#[derive(Debug, thiserror::Error)]
pub enum OrmError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Integer overflow at field \"{field}\"")]
    IntegerOverflow { field: &'static str },
    #[error("Config error: {0}")]
    Config(String),
}

impl OrmError {
    pub(crate) fn overflow(field: &'static str) -> Self {
        Self::IntegerOverflow { field }
    }

    /// True when a single-row lookup matched nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Database(sqlx::Error::RowNotFound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_is_not_found() {
        assert!(OrmError::from(sqlx::Error::RowNotFound).is_not_found());
        assert!(!OrmError::from(sqlx::Error::PoolTimedOut).is_not_found());
        assert!(!OrmError::overflow("height").is_not_found());
    }

    #[test]
    fn overflow_names_the_field() {
        assert_eq!(
            OrmError::overflow("batch_index").to_string(),
            "Integer overflow at field \"batch_index\""
        );
    }
}
