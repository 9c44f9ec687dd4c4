use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::credential::errors::DirectoryError;
use crate::credential::models::DisplayName;
use crate::credential::models::EmailAddress;
use crate::credential::models::NewUser;
use crate::credential::models::User;
use crate::credential::models::UserId;
use crate::credential::ports::UserDirectory;

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    name: String,
    password_hash: String,
}

impl TryFrom<UserRow> for User {
    type Error = DirectoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            email: EmailAddress::new(row.email)
                .map_err(|e| DirectoryError::InvalidRecord(e.to_string()))?,
            name: DisplayName::new(row.name)
                .map_err(|e| DirectoryError::InvalidRecord(e.to_string()))?,
            password_hash: row.password_hash,
        })
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, DirectoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, name, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DirectoryError::Database(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn create(&self, user: NewUser) -> Result<User, DirectoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, email, name, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, name, password_hash
            "#,
        )
        .bind(UserId::new().0)
        .bind(user.email.as_str())
        .bind(user.name.as_str())
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
                {
                    return DirectoryError::DuplicateEmail(user.email.as_str().to_string());
                }
            }
            DirectoryError::Database(e.to_string())
        })?;

        User::try_from(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(email: &str, name: &str) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: name.to_string(),
            password_hash: "$2b$10$hash".to_string(),
        }
    }

    #[test]
    fn test_row_maps_to_user() {
        let source = row("a@x.com", "A");
        let id = source.id;

        let user = User::try_from(source).unwrap();

        assert_eq!(user.id, UserId(id));
        assert_eq!(user.email.as_str(), "a@x.com");
        assert_eq!(user.name.as_str(), "A");
        assert_eq!(user.password_hash, "$2b$10$hash");
    }

    #[test]
    fn test_invalid_row_is_rejected() {
        assert!(matches!(
            User::try_from(row("broken", "A")),
            Err(DirectoryError::InvalidRecord(_))
        ));
        assert!(matches!(
            User::try_from(row("a@x.com", "")),
            Err(DirectoryError::InvalidRecord(_))
        ));
    }
}
