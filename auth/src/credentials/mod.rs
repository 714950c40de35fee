pub mod errors;
pub mod models;
pub mod ports;
pub mod verifier;

pub use errors::AuthenticationError;
pub use models::Credentials;
pub use models::Gender;
pub use models::NewUser;
pub use models::Profile;
pub use models::StoredUser;
pub use models::UserId;
pub use ports::UserStore;
pub use ports::UserStoreError;
pub use verifier::CredentialVerifier;
