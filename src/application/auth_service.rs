use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::Rng;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::ports::{AdminAuthenticator, UserRepository, VerificationMailer};
use crate::domain::user::{ClientProfile, NewClient, ProfilePatch};

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
}

/// Registration waiting for its emailed code. Nothing is stored in the user
/// repository until the code is confirmed.
#[derive(Debug, Clone)]
struct PendingRegistration {
    client: NewClient,
    code: String,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn generate_code() -> String {
    rand::thread_rng().gen_range(100_000..1_000_000).to_string()
}

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

pub struct AuthService {
    admin: Arc<dyn AdminAuthenticator>,
    users: Arc<dyn UserRepository>,
    mailer: Arc<dyn VerificationMailer>,
    admin_sessions: Mutex<HashSet<Uuid>>,
    pending: Mutex<HashMap<String, PendingRegistration>>,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        admin: Arc<dyn AdminAuthenticator>,
        users: Arc<dyn UserRepository>,
        mailer: Arc<dyn VerificationMailer>,
    ) -> Self {
        Self::with_cost(admin, users, mailer, bcrypt::DEFAULT_COST)
    }

    pub fn with_cost(
        admin: Arc<dyn AdminAuthenticator>,
        users: Arc<dyn UserRepository>,
        mailer: Arc<dyn VerificationMailer>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            admin,
            users,
            mailer,
            admin_sessions: Mutex::new(HashSet::new()),
            pending: Mutex::new(HashMap::new()),
            bcrypt_cost,
        }
    }

    // ── Admin ────────────────────────────────────────────────────────────────

    /// Check admin credentials and issue a session token.
    pub fn admin_login(&self, email: &str, password: &str) -> Result<Uuid, DomainError> {
        if !self.admin.verify(email, password) {
            log::warn!("rejected admin login for {}", email);
            return Err(DomainError::Unauthorized);
        }
        let token = Uuid::new_v4();
        lock(&self.admin_sessions).insert(token);
        Ok(token)
    }

    pub fn admin_logout(&self, token: Uuid) -> bool {
        lock(&self.admin_sessions).remove(&token)
    }

    pub fn is_admin(&self, token: Uuid) -> bool {
        lock(&self.admin_sessions).contains(&token)
    }

    // ── Clients ──────────────────────────────────────────────────────────────

    /// Start a registration: hash the password, email a 6-digit code and keep
    /// the data pending until [`AuthService::verify`] succeeds.
    pub async fn register(&self, registration: Registration) -> Result<(), DomainError> {
        if registration.name.trim().is_empty() {
            return Err(DomainError::ValidationFailed("name must not be empty".into()));
        }
        if !registration.email.contains('@') {
            return Err(DomainError::ValidationFailed("email address is invalid".into()));
        }
        if registration.password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::ValidationFailed(format!(
                "password must have at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        if self.users.find_by_email(&registration.email).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "email {} is already registered",
                registration.email
            )));
        }

        let password_hash = self.hash_password(registration.password).await?;
        let code = generate_code();
        let client = NewClient {
            name: registration.name,
            email: registration.email.trim().to_string(),
            password_hash,
            address: registration.address,
            city: registration.city,
            phone: registration.phone,
        };
        let (email, name) = (client.email.clone(), client.name.clone());
        lock(&self.pending).insert(
            email_key(&email),
            PendingRegistration {
                client,
                code: code.clone(),
            },
        );

        self.deliver_code(&email, &name, &code).await;
        Ok(())
    }

    async fn hash_password(&self, password: String) -> Result<String, DomainError> {
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::RemoteUnavailable(e.to_string()))?
            .map_err(|e| DomainError::ValidationFailed(e.to_string()))
    }

    async fn deliver_code(&self, email: &str, name: &str, code: &str) {
        if self.mailer.send_verification_code(email, name, code).await {
            log::info!("verification code sent to {}", email);
        } else {
            log::warn!("[fallback] verification code for {}: {}", email, code);
        }
    }

    /// Issue a fresh code for a pending registration.
    pub async fn resend_code(&self, email: &str) -> Result<(), DomainError> {
        let code = generate_code();
        let name = {
            let mut pending = lock(&self.pending);
            let entry = pending
                .get_mut(&email_key(email))
                .ok_or_else(|| DomainError::NotFound(format!("pending registration {email}")))?;
            entry.code = code.clone();
            entry.client.name.clone()
        };
        self.deliver_code(email, &name, &code).await;
        Ok(())
    }

    /// Confirm a pending registration and create the client account.
    pub async fn verify(&self, email: &str, code: &str) -> Result<ClientProfile, DomainError> {
        let key = email_key(email);
        let client = {
            let pending = lock(&self.pending);
            let entry = pending
                .get(&key)
                .ok_or_else(|| DomainError::NotFound(format!("pending registration {email}")))?;
            if entry.code != code.trim() {
                return Err(DomainError::ValidationFailed("verification code does not match".into()));
            }
            entry.client.clone()
        };

        let profile = self.users.create(client).await?;
        lock(&self.pending).remove(&key);
        log::info!("client {} verified and registered", profile.id);
        Ok(profile)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<ClientProfile, DomainError> {
        let Some(account) = self.users.find_by_email(email.trim()).await? else {
            if lock(&self.pending).contains_key(&email_key(email)) {
                return Err(DomainError::ValidationFailed(
                    "email address has not been verified".into(),
                ));
            }
            return Err(DomainError::Unauthorized);
        };

        let password = password.to_string();
        let hash = account.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::RemoteUnavailable(e.to_string()))?
            .unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized);
        }
        Ok(account.profile)
    }

    pub async fn profile(&self, id: Uuid) -> Result<ClientProfile, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user {id}")))
    }

    pub async fn update_profile(
        &self,
        id: Uuid,
        patch: ProfilePatch,
    ) -> Result<ClientProfile, DomainError> {
        if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(DomainError::ValidationFailed("name must not be empty".into()));
        }
        self.users.update_profile(id, patch).await
    }
}
