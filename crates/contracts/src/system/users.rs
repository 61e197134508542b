use serde::{Deserialize, Serialize};

use crate::enums::{Gender, ProductCategory, Role};

/// Profile of the signed-in user (`GET /api/users/me`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "fullName", default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "phoneNumber", default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub verified: bool,
}

impl Profile {
    /// Stand-in used while only the cached role is known
    pub fn placeholder(role: Role, email: &str) -> Self {
        Self {
            role,
            email: email.to_string(),
            ..Default::default()
        }
    }

    /// Placeholder profiles lack the fields the profile page edits
    pub fn is_complete(&self) -> bool {
        !self.full_name.is_empty() && self.phone_number.is_some() && self.gender.is_some()
    }

    pub fn initial(&self) -> String {
        self.full_name
            .chars()
            .next()
            .or_else(|| self.email.chars().next())
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

/// `PUT /api/users/me` body; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(rename = "fullName", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "phoneNumber", skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
}

impl ProfileUpdate {
    pub fn from_profile(p: &Profile) -> Self {
        Self {
            full_name: Some(p.full_name.clone()),
            email: Some(p.email.clone()),
            phone_number: p.phone_number.clone(),
            gender: Some(p.gender.unwrap_or_default()),
            birthday: p.birthday.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        let blank = |v: &Option<String>| v.as_deref().map(str::trim).unwrap_or("").is_empty();
        if blank(&self.full_name) {
            return Err("El nombre completo es obligatorio");
        }
        if blank(&self.phone_number) {
            return Err("El número de teléfono es obligatorio");
        }
        if blank(&self.birthday) {
            return Err("La fecha de nacimiento es obligatoria");
        }
        Ok(())
    }

    /// Applies the update on top of a cached profile
    pub fn merge_into(&self, profile: &Profile) -> Profile {
        let mut merged = profile.clone();
        if let Some(v) = &self.full_name {
            merged.full_name = v.clone();
        }
        if let Some(v) = &self.email {
            merged.email = v.clone();
        }
        if self.phone_number.is_some() {
            merged.phone_number = self.phone_number.clone();
        }
        if self.gender.is_some() {
            merged.gender = self.gender;
        }
        if self.birthday.is_some() {
            merged.birthday = self.birthday.clone();
        }
        merged
    }
}

/// Category with the number of purchases the user made in it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCategory {
    pub category: ProductCategory,
    #[serde(default)]
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_partial_profile() {
        let p: Profile =
            serde_json::from_str(r#"{"id":4,"fullName":"Ana","email":"a@x.pe","role":"ADMIN"}"#)
                .unwrap();
        assert!(p.role.is_admin());
        assert!(!p.is_complete());
        assert_eq!(p.initial(), "A");
    }

    #[test]
    fn update_requires_name_phone_birthday() {
        let mut u = ProfileUpdate {
            full_name: Some("Ana".into()),
            phone_number: Some("999".into()),
            birthday: Some("1990-01-01".into()),
            ..Default::default()
        };
        assert!(u.validate().is_ok());
        u.phone_number = Some("  ".into());
        assert!(u.validate().is_err());
    }

    #[test]
    fn merge_keeps_untouched_fields() {
        let p = Profile {
            id: 1,
            full_name: "Ana".into(),
            email: "a@x.pe".into(),
            role: Role::Admin,
            ..Default::default()
        };
        let u = ProfileUpdate {
            phone_number: Some("123".into()),
            ..Default::default()
        };
        let merged = u.merge_into(&p);
        assert_eq!(merged.full_name, "Ana");
        assert_eq!(merged.phone_number.as_deref(), Some("123"));
        assert_eq!(merged.role, Role::Admin);
    }
}
