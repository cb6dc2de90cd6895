use uuid::Uuid;

/// A registered, verified storefront client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
}

/// Stored client together with its credential hash.
#[derive(Debug, Clone)]
pub struct ClientAccount {
    pub profile: ClientProfile,
    pub password_hash: String,
}

#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
}

impl ClientProfile {
    pub fn apply(&mut self, patch: ProfilePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if patch.address.is_some() {
            self.address = patch.address;
        }
        if patch.city.is_some() {
            self.city = patch.city;
        }
        if patch.phone.is_some() {
            self.phone = patch.phone;
        }
    }
}
