use serde::{Deserialize, Serialize};

use crate::enums::{Gender, Role};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Answer of login, signup and e-mail verification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    pub gender: Gender,
    /// ISO date, `YYYY-MM-DD`
    pub birthday: String,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.full_name.trim().is_empty() {
            return Err("El nombre completo es obligatorio");
        }
        if !self.email.contains('@') {
            return Err("Ingresa un correo electrónico válido");
        }
        if self.password.len() < 6 {
            return Err("La contraseña debe tener al menos 6 caracteres");
        }
        if self.phone_number.trim().is_empty() {
            return Err("El número de teléfono es obligatorio");
        }
        if self.birthday.trim().is_empty() {
            return Err("La fecha de nacimiento es obligatoria");
        }
        Ok(())
    }
}
