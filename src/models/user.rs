use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// User - The signed-in account as returned by login and `/users/me`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<serde_json::Value>,
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub photo: Option<String>,
    pub profile_slug: Option<String>,
    /// Either a plain string or an enum object `{"value": "..."}`.
    pub role: Option<serde_json::Value>,
}

impl User {
    /// The role name, unwrapping the enum-object form.
    pub fn role(&self) -> Option<&str> {
        match self.role.as_ref()? {
            serde_json::Value::String(s) => Some(s.as_str()),
            serde_json::Value::Object(map) => map.get("value").and_then(|v| v.as_str()),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some("admin")
    }

    /// Name to show in an account menu: name, then username, then email.
    pub fn display_name(&self) -> &str {
        [&self.name, &self.username, &self.email]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.is_empty())
            .unwrap_or("Account")
    }
}
