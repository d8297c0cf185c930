use serde::{Deserialize, Serialize};

/// A registered account as held by the credential store.
///
/// Only the bcrypt hash of the password is kept. It is never serialised.
#[derive(Debug, Clone)]
pub struct Account {
    pub name: String,
    /// Unique, case-sensitive identifier.
    pub useremail: String,
    pub password_hash: String,
}

/// The public projection of an account returned after login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountView {
    pub name: String,
    pub useremail: String,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            name: account.name.clone(),
            useremail: account.useremail.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_drops_password_hash() {
        let account = Account {
            name: "A".to_string(),
            useremail: "a@x.com".to_string(),
            password_hash: "$2b$04$abc".to_string(),
        };
        let json = serde_json::to_value(AccountView::from(&account)).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "A", "useremail": "a@x.com" }));
    }
}
