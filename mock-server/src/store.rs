//! In-memory user table with the server-side validation rules.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

pub type UserId = i64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<Address>,
    pub company: Option<Company>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub suite: Option<String>,
    pub city: Option<String>,
    pub zipcode: Option<String>,
    pub geo: Option<Geo>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    pub lat: Coordinate,
    pub lng: Coordinate,
}

/// A latitude or longitude, echoed back in whichever form it was sent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Text(String),
    Number(serde_json::Number),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: Option<String>,
    pub catch_phrase: Option<String>,
    pub bs: Option<String>,
}

/// Body of both POST and PUT. On create the three identity fields are
/// required; on update every field is optional and only present ones apply.
#[derive(Debug, Default, Deserialize)]
pub struct UserInput {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<Address>,
    pub company: Option<Company>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    NotFound(UserId),
    Conflict(String),
    Invalid(Vec<String>),
}

impl StoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::Conflict(_) => StatusCode::CONFLICT,
            StoreError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            StoreError::NotFound(_) => "Resource Not Found",
            StoreError::Conflict(_) => "User Already Exists",
            StoreError::Invalid(_) => "Validation Error",
        }
    }

    pub fn into_messages(self) -> Vec<String> {
        match self {
            StoreError::NotFound(id) => vec![format!("User not found with id: {id}")],
            StoreError::Conflict(message) => vec![message],
            StoreError::Invalid(messages) => messages,
        }
    }
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: UserId,
    users: BTreeMap<UserId, User>,
}

impl Store {
    /// A store holding the three demo users.
    pub fn seeded() -> Self {
        let users: BTreeMap<UserId, User> = sample_users().into_iter().map(|u| (u.id, u)).collect();
        let next_id = users.keys().last().copied().unwrap_or_default();
        Store { next_id, users }
    }

    pub fn list(&self) -> Vec<User> {
        self.users.values().cloned().collect()
    }

    pub fn get(&self, id: UserId) -> Result<User, StoreError> {
        self.users.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    pub fn create(&mut self, input: UserInput) -> Result<User, StoreError> {
        let mut messages = Vec::new();
        let name = required(&mut messages, "name", input.name);
        let username = required(&mut messages, "username", input.username);
        let email = required(&mut messages, "email", input.email);
        if let Some(email) = email.as_deref() {
            check_email(&mut messages, email);
        }

        let (Some(name), Some(username), Some(email)) = (name, username, email) else {
            return Err(StoreError::Invalid(messages));
        };
        if !messages.is_empty() {
            return Err(StoreError::Invalid(messages));
        }
        self.check_unique(None, Some(&username), Some(&email))?;

        self.next_id += 1;
        let user = User {
            id: self.next_id,
            name,
            username,
            email,
            phone: input.phone,
            website: input.website,
            address: input.address,
            company: input.company,
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    pub fn update(&mut self, id: UserId, input: UserInput) -> Result<User, StoreError> {
        let mut messages = Vec::new();
        for (field, value) in [
            ("name", &input.name),
            ("username", &input.username),
            ("email", &input.email),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                messages.push(format!("{field} is required"));
            }
        }
        if let Some(email) = input.email.as_deref().filter(|e| !e.trim().is_empty()) {
            check_email(&mut messages, email);
        }
        if !messages.is_empty() {
            return Err(StoreError::Invalid(messages));
        }

        if !self.users.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        self.check_unique(Some(id), input.username.as_deref(), input.email.as_deref())?;
        let user = self.users.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if let Some(name) = input.name {
            user.name = name;
        }
        if let Some(username) = input.username {
            user.username = username;
        }
        if let Some(email) = input.email {
            user.email = email;
        }
        if input.phone.is_some() {
            user.phone = input.phone;
        }
        if input.website.is_some() {
            user.website = input.website;
        }
        if input.address.is_some() {
            user.address = input.address;
        }
        if input.company.is_some() {
            user.company = input.company;
        }
        Ok(user.clone())
    }

    pub fn delete(&mut self, id: UserId) -> Result<(), StoreError> {
        self.users.remove(&id).map(|_| ()).ok_or(StoreError::NotFound(id))
    }

    /// Username and email must not belong to any user other than `owner`.
    fn check_unique(
        &self,
        owner: Option<UserId>,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<(), StoreError> {
        let taken = |matches: &dyn Fn(&User) -> bool| {
            self.users.values().any(|u| Some(u.id) != owner && matches(u))
        };
        if let Some(username) = username {
            if taken(&|u| u.username == username) {
                return Err(StoreError::Conflict(format!("Username already exists: {username}")));
            }
        }
        if let Some(email) = email {
            if taken(&|u| u.email == email) {
                return Err(StoreError::Conflict(format!("Email already exists: {email}")));
            }
        }
        Ok(())
    }
}

fn required(messages: &mut Vec<String>, field: &str, value: Option<String>) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            messages.push(format!("{field} is required"));
            None
        }
    }
}

fn check_email(messages: &mut Vec<String>, email: &str) {
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty() && !domain.contains('@'));
    if !valid {
        messages.push("email is invalid".to_string());
    }
}

#[allow(clippy::too_many_arguments)]
fn sample(
    id: UserId,
    name: &str,
    username: &str,
    email: &str,
    phone: &str,
    website: &str,
    address: [&str; 4],
    geo: [&str; 2],
    company: [&str; 3],
) -> User {
    let [street, suite, city, zipcode] = address.map(|s| Some(s.to_string()));
    let [cname, catch_phrase, bs] = company.map(|s| Some(s.to_string()));
    User {
        id,
        name: name.to_string(),
        username: username.to_string(),
        email: email.to_string(),
        phone: Some(phone.to_string()),
        website: Some(website.to_string()),
        address: Some(Address {
            street,
            suite,
            city,
            zipcode,
            geo: Some(Geo {
                lat: Coordinate::Text(geo[0].to_string()),
                lng: Coordinate::Text(geo[1].to_string()),
            }),
        }),
        company: Some(Company {
            name: cname,
            catch_phrase,
            bs,
        }),
    }
}

fn sample_users() -> Vec<User> {
    vec![
        sample(
            1,
            "Leanne Graham",
            "Bret",
            "Sincere@april.biz",
            "1-770-736-8031 x56442",
            "hildegard.org",
            ["Kulas Light", "Apt. 556", "Gwenborough", "92998-3874"],
            ["-37.3159", "81.1496"],
            ["Romaguera-Crona", "Multi-layered client-server neural-net", "harness real-time e-markets"],
        ),
        sample(
            2,
            "Ervin Howell",
            "Antonette",
            "Shanna@melissa.tv",
            "010-692-6593 x09125",
            "anastasia.net",
            ["Victor Plains", "Suite 879", "Wisokyburgh", "90566-7771"],
            ["-43.9509", "-34.4618"],
            ["Deckow-Crist", "Proactive didactic contingency", "synergize scalable supply-chains"],
        ),
        sample(
            3,
            "Clementine Bauch",
            "Samantha",
            "Nathan@yesenia.net",
            "1-463-123-4447",
            "ramiro.info",
            ["Douglas Extension", "Suite 847", "McKenziehaven", "59590-4157"],
            ["-68.6102", "-47.0653"],
            ["Romaguera-Jacobson", "Face to face bifurcated interface", "e-enable strategic applications"],
        ),
    ]
}
