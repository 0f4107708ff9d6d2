//! Registration and profile form.

use sea_orm::ConnectionTrait;

use super::{max_length, require, FormData, FormErrors};
use crate::auth::password::hash_password;
use crate::constants::{
    ERROR_INVALID_USERNAME, ERROR_PASSWORD_MISMATCH, ERROR_USERNAME_TAKEN, MAX_USERNAME_LENGTH,
};
use crate::entities::user;
use crate::error::AppResult;
use crate::repositories::{NewUser, UserRepository};

/// Fields of the registration form. Passwords are never rendered back.
#[derive(Clone, Debug, Default)]
pub struct UserForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password1: String,
    pub password2: String,
    pub errors: FormErrors,
}

impl UserForm {
    pub fn from_data(data: &FormData) -> Self {
        Self {
            first_name: data.get("first_name").trim().to_string(),
            last_name: data.get("last_name").trim().to_string(),
            username: data.get("username").trim().to_string(),
            password1: data.get("password1").to_string(),
            password2: data.get("password2").to_string(),
            errors: FormErrors::default(),
        }
    }

    /// Prefilled from an existing account, for the update page.
    pub fn from_model(user: &user::Model) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
            ..Default::default()
        }
    }

    fn clean(&mut self, min_password_length: usize) {
        require(&mut self.errors, "first_name", &self.first_name);
        require(&mut self.errors, "last_name", &self.last_name);

        if require(&mut self.errors, "username", &self.username)
            && max_length(&mut self.errors, "username", &self.username, MAX_USERNAME_LENGTH)
            && !is_valid_username(&self.username)
        {
            self.errors.add("username", ERROR_INVALID_USERNAME);
        }

        let has_password1 = require(&mut self.errors, "password1", &self.password1);
        let has_password2 = require(&mut self.errors, "password2", &self.password2);
        if has_password1 && has_password2 {
            if self.password1.chars().count() < min_password_length {
                self.errors.add(
                    "password2",
                    format!(
                        "The password entered is too short. It must contain at least {} characters.",
                        min_password_length
                    ),
                );
            } else if self.password1 != self.password2 {
                self.errors.add("password2", ERROR_PASSWORD_MISMATCH);
            }
        }
    }

    /// Validate all fields; `exclude` is the account being edited.
    /// Returns the account to store when the form is valid.
    pub async fn validate<C>(
        &mut self,
        conn: &C,
        exclude: Option<i32>,
        min_password_length: usize,
    ) -> AppResult<Option<NewUser>>
    where
        C: ConnectionTrait,
    {
        self.clean(min_password_length);

        if !self.errors.has("username") && UserRepository::username_taken(conn, &self.username, exclude).await? {
            self.errors.add("username", ERROR_USERNAME_TAKEN);
        }

        if !self.errors.is_empty() {
            return Ok(None);
        }

        Ok(Some(NewUser {
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            password_hash: hash_password(&self.password1),
        }))
    }
}

/// Letters, digits and `@.+-_` only.
pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(password1: &str, password2: &str) -> UserForm {
        UserForm {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            username: "johndoe".to_string(),
            password1: password1.to_string(),
            password2: password2.to_string(),
            errors: FormErrors::default(),
        }
    }

    #[test]
    fn test_username_characters() {
        assert!(is_valid_username("john.doe+tasks@example-1_a"));
        assert!(is_valid_username("Иван"));
        assert!(!is_valid_username("john doe"));
        assert!(!is_valid_username("john/doe"));
        assert!(!is_valid_username(""));
    }

    #[test]
    fn test_short_password_reported_before_mismatch() {
        let mut short = form("ab", "cd");
        short.clean(3);
        assert_eq!(
            short.errors.field("password2"),
            vec!["The password entered is too short. It must contain at least 3 characters."]
        );

        let mut mismatch = form("abc", "abd");
        mismatch.clean(3);
        assert_eq!(mismatch.errors.field("password2"), vec![ERROR_PASSWORD_MISMATCH]);

        let mut ok = form("abc", "abc");
        ok.clean(3);
        assert!(ok.errors.is_empty());
    }

    #[test]
    fn test_required_fields() {
        let mut empty = UserForm::default();
        empty.clean(3);
        for field in ["first_name", "last_name", "username", "password1", "password2"] {
            assert!(empty.errors.has(field), "{} should be required", field);
        }
    }
}
