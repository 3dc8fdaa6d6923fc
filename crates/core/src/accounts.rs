//! Mock account directory and the signed-in session with its address book.

use std::collections::HashMap;

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::account::{
    Address, AddressId, AddressPatch, NewAddress, NewUser, User, UserId, UserPatch,
};
use crate::errors::AccountError;

pub const DEMO_EMAIL: &str = "user@example.com";
pub const DEMO_PASSWORD: &str = "password123";

#[derive(Debug)]
struct AccountRecord {
    user: User,
    password: SecretString,
}

/// In-memory user store keyed by lowercase email.
#[derive(Debug, Default)]
pub struct AccountDirectory {
    accounts: HashMap<String, AccountRecord>,
}

impl AccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory seeded with the demo account.
    pub fn demo() -> Self {
        let mut directory = Self::new();
        let user = User {
            id: UserId("1".to_owned()),
            email: DEMO_EMAIL.to_owned(),
            first_name: "John".to_owned(),
            last_name: "Doe".to_owned(),
            phone: Some("+46 70 123 45 67".to_owned()),
            addresses: vec![Address {
                id: AddressId("1".to_owned()),
                name: "Home".to_owned(),
                street: "Drottninggatan 1".to_owned(),
                city: "Stockholm".to_owned(),
                postal_code: "111 51".to_owned(),
                country: "Sweden".to_owned(),
                is_default: true,
            }],
            registered_at: Utc::now(),
        };
        directory.insert(user, SecretString::from(DEMO_PASSWORD.to_owned()));
        directory
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn contains_email(&self, email: &str) -> bool {
        self.accounts.contains_key(&normalize_email(email))
    }

    fn insert(&mut self, user: User, password: SecretString) {
        self.accounts.insert(normalize_email(&user.email), AccountRecord { user, password });
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<&User, AccountError> {
        self.accounts
            .get(&normalize_email(email))
            .filter(|record| record.password.expose_secret() == password)
            .map(|record| &record.user)
            .ok_or(AccountError::InvalidCredentials)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// The signed-in user, if any. Edits apply to this session's copy of the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthSession {
    user: Option<User>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(
        &mut self,
        directory: &AccountDirectory,
        email: &str,
        password: &str,
    ) -> Result<&User, AccountError> {
        let user = match directory.authenticate(email, password) {
            Ok(user) => user.clone(),
            Err(error) => {
                warn!(event_name = "account.login.failed", "login rejected");
                return Err(error);
            }
        };

        info!(event_name = "account.login.succeeded", user_id = %user.id.0, "user signed in");
        Ok(self.user.insert(user))
    }

    /// Creates the account and signs it in.
    pub fn register(
        &mut self,
        directory: &mut AccountDirectory,
        new_user: NewUser,
        password: &str,
    ) -> Result<&User, AccountError> {
        let email = new_user.email.trim().to_owned();
        if directory.contains_email(&email) {
            return Err(AccountError::EmailInUse(email));
        }

        let user = User {
            id: UserId(Uuid::new_v4().to_string()),
            email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            phone: new_user.phone,
            addresses: Vec::new(),
            registered_at: Utc::now(),
        };
        directory.insert(user.clone(), SecretString::from(password.to_owned()));

        info!(event_name = "account.registered", user_id = %user.id.0, "account registered");
        Ok(self.user.insert(user))
    }

    pub fn logout(&mut self) {
        self.user = None;
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn update_user(&mut self, patch: UserPatch) -> Result<&User, AccountError> {
        let user = self.user_mut()?;
        if let Some(first_name) = patch.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            user.last_name = last_name;
        }
        if let Some(phone) = patch.phone {
            user.phone = Some(phone);
        }
        Ok(user)
    }

    /// Adds an address. The first address always becomes the default.
    pub fn add_address(&mut self, new_address: NewAddress) -> Result<&Address, AccountError> {
        let user = self.user_mut()?;
        let is_default = new_address.is_default || user.addresses.is_empty();
        if is_default {
            clear_default(&mut user.addresses);
        }

        let index = user.addresses.len();
        user.addresses.push(Address {
            id: AddressId(Uuid::new_v4().to_string()),
            name: new_address.name,
            street: new_address.street,
            city: new_address.city,
            postal_code: new_address.postal_code,
            country: new_address.country,
            is_default,
        });

        Ok(&user.addresses[index])
    }

    pub fn update_address(
        &mut self,
        address_id: &AddressId,
        patch: AddressPatch,
    ) -> Result<&Address, AccountError> {
        let user = self.user_mut()?;
        let index = address_index(&user.addresses, address_id)?;

        if patch.is_default == Some(true) {
            clear_default(&mut user.addresses);
        }

        let address = &mut user.addresses[index];
        if let Some(name) = patch.name {
            address.name = name;
        }
        if let Some(street) = patch.street {
            address.street = street;
        }
        if let Some(city) = patch.city {
            address.city = city;
        }
        if let Some(postal_code) = patch.postal_code {
            address.postal_code = postal_code;
        }
        if let Some(country) = patch.country {
            address.country = country;
        }
        if let Some(is_default) = patch.is_default {
            address.is_default = is_default;
        }

        Ok(&user.addresses[index])
    }

    /// Removes an address; if it was the default, the first remaining one takes over.
    pub fn remove_address(&mut self, address_id: &AddressId) -> Result<Address, AccountError> {
        let user = self.user_mut()?;
        let index = address_index(&user.addresses, address_id)?;
        let removed = user.addresses.remove(index);

        if removed.is_default {
            if let Some(first) = user.addresses.first_mut() {
                first.is_default = true;
            }
        }

        Ok(removed)
    }

    pub fn set_default_address(&mut self, address_id: &AddressId) -> Result<&Address, AccountError> {
        let user = self.user_mut()?;
        let index = address_index(&user.addresses, address_id)?;

        clear_default(&mut user.addresses);
        user.addresses[index].is_default = true;

        Ok(&user.addresses[index])
    }

    fn user_mut(&mut self) -> Result<&mut User, AccountError> {
        self.user.as_mut().ok_or(AccountError::NotSignedIn)
    }
}

fn address_index(addresses: &[Address], address_id: &AddressId) -> Result<usize, AccountError> {
    addresses
        .iter()
        .position(|address| &address.id == address_id)
        .ok_or_else(|| AccountError::AddressNotFound(address_id.0.clone()))
}

fn clear_default(addresses: &mut [Address]) {
    for address in addresses {
        address.is_default = false;
    }
}
