//! Authentication collaborators for SplitPay.
//!
//! The allocation core never needs a signed-in user; this crate covers the screens
//! around it. Form validation, the credential store capability, the client for the
//! external auth API and the session flow that ties them together all live here.

pub mod client;
pub mod error;
pub mod session;
pub mod store;
pub mod validation;

pub use client::{AuthApi, AuthTokens, HttpAuthApi, LoginRequest, RegisterRequest};
pub use error::{AuthError, AuthResult, FieldError};
pub use session::{SessionManager, SessionStatus};
pub use store::{CredentialStore, InMemoryCredentialStore, keys};
pub use validation::{SignInForm, SignUpForm};
