use std::sync::Mutex;

use super::lock;
use crate::auth::{hash_password, verify_password, SessionIssuer};
use crate::error::AppError;
use crate::models::{Account, AccountView};

/// Registered accounts, keyed by `useremail`.
///
/// Accounts are only ever added; there is no update or delete.
#[derive(Debug)]
pub struct AccountStore {
    accounts: Mutex<Vec<Account>>,
    bcrypt_cost: u32,
}

impl AccountStore {
    pub fn new(bcrypt_cost: u32) -> Self {
        Self {
            accounts: Mutex::new(Vec::new()),
            bcrypt_cost,
        }
    }

    fn exists(&self, useremail: &str) -> Result<bool, AppError> {
        Ok(lock(&self.accounts, "account")?
            .iter()
            .any(|account| account.useremail == useremail))
    }

    /// Registers a new account. Fails with `AlreadyExists` if `useremail` is taken.
    pub fn signup(&self, name: &str, useremail: &str, password: &str) -> Result<AccountView, AppError> {
        // Cheap early exit; the authoritative check is repeated under the lock below.
        if self.exists(useremail)? {
            return Err(AppError::AlreadyExists);
        }

        let password_hash = hash_password(password, self.bcrypt_cost)?;

        let mut accounts = lock(&self.accounts, "account")?;
        if accounts.iter().any(|account| account.useremail == useremail) {
            return Err(AppError::AlreadyExists);
        }
        let account = Account {
            name: name.to_string(),
            useremail: useremail.to_string(),
            password_hash,
        };
        let view = AccountView::from(&account);
        accounts.push(account);
        log::debug!("account registered: {}", useremail);
        Ok(view)
    }

    /// Checks a credential pair and returns the public view of the account.
    ///
    /// An unknown `useremail` and a wrong password produce the same error.
    pub fn authenticate(&self, useremail: &str, password: &str) -> Result<AccountView, AppError> {
        let account = lock(&self.accounts, "account")?
            .iter()
            .find(|account| account.useremail == useremail)
            .cloned()
            .ok_or(AppError::InvalidCredentials)?;

        if verify_password(password, &account.password_hash)? {
            Ok(AccountView::from(&account))
        } else {
            Err(AppError::InvalidCredentials)
        }
    }

    /// Authenticates and issues a session token for the account.
    pub fn login(
        &self,
        useremail: &str,
        password: &str,
        issuer: &SessionIssuer,
    ) -> Result<(String, AccountView), AppError> {
        let view = self.authenticate(useremail, password)?;
        let token = issuer.issue(&view.useremail)?;
        Ok((token, view))
    }

    pub fn len(&self) -> Result<usize, AppError> {
        Ok(lock(&self.accounts, "account")?.len())
    }

    pub fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.len()? == 0)
    }
}
