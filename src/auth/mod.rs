//! Auth feature: request/response types and session lifecycle operations.

pub mod service;
pub mod types;

pub use service::{SignedIn, get_me, login, logout, register, rehydrate_session};
pub use types::{AuthResponse, AuthUser, LoginInput, MeResponse, RegisterInput, UserStats};
