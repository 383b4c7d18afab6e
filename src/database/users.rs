use chrono::Utc;
use sqlx::SqlitePool;

use crate::database::manager::DatabaseError;
use crate::database::models::user::{NewUser, User};

const USER_COLUMNS: &str = "id, name, email, password_hash, is_admin, created_at";

/// Emails are stored trimmed and lowercased so lookups are case-insensitive
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, DatabaseError> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, DatabaseError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
    ))
    .bind(normalize_email(email))
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>, DatabaseError> {
    let users = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))
        .fetch_all(pool)
        .await?;

    Ok(users)
}

/// Insert a user; a duplicate email is reported as `Conflict`
pub async fn create_user(pool: &SqlitePool, user: NewUser) -> Result<i64, DatabaseError> {
    let result = sqlx::query(
        "INSERT INTO users (name, email, password_hash, is_admin, created_at)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&user.name)
    .bind(normalize_email(&user.email))
    .bind(&user.password_hash)
    .bind(user.is_admin)
    .bind(Utc::now())
    .execute(pool)
    .await
    .map_err(|e| DatabaseError::from_constraint(e, "Email already registered"))?;

    Ok(result.last_insert_rowid())
}

/// Grant or revoke admin rights by email. Returns false when no user matched.
pub async fn set_admin(pool: &SqlitePool, email: &str, is_admin: bool) -> Result<bool, DatabaseError> {
    let result = sqlx::query("UPDATE users SET is_admin = ? WHERE email = ?")
        .bind(is_admin)
        .bind(normalize_email(email))
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::manager::{connect_in_memory, migrate};

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Jane".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            is_admin: false,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let pool = connect_in_memory().await.unwrap();
        migrate(&pool).await.unwrap();

        create_user(&pool, new_user("jane@example.com")).await.unwrap();
        let err = create_user(&pool, new_user("Jane@Example.com")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict(_)));
    }

    #[tokio::test]
    async fn email_lookup_ignores_case() {
        let pool = connect_in_memory().await.unwrap();
        migrate(&pool).await.unwrap();

        let id = create_user(&pool, new_user(" Jane@Example.com")).await.unwrap();
        let user = find_by_email(&pool, "JANE@example.COM").await.unwrap().unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.email, "jane@example.com");
    }

    #[tokio::test]
    async fn set_admin_promotes_existing_user() {
        let pool = connect_in_memory().await.unwrap();
        migrate(&pool).await.unwrap();

        let id = create_user(&pool, new_user("jane@example.com")).await.unwrap();
        assert!(set_admin(&pool, "jane@example.com", true).await.unwrap());
        assert!(!set_admin(&pool, "nobody@example.com", true).await.unwrap());

        let user = find_by_id(&pool, id).await.unwrap().unwrap();
        assert!(user.is_admin);
    }
}
