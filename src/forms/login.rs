//! Login form.

use super::{require, FormData, FormErrors};

#[derive(Clone, Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub errors: FormErrors,
}

impl LoginForm {
    pub fn from_data(data: &FormData) -> Self {
        let mut form = Self {
            username: data.get("username").trim().to_string(),
            password: data.get("password").to_string(),
            errors: FormErrors::default(),
        };
        require(&mut form.errors, "username", &form.username);
        require(&mut form.errors, "password", &form.password);
        form
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}
