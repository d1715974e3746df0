//! Sociality client core: the backend request pipeline and the edge route
//! guard, plus the auth/session plumbing they share.

pub mod api;
pub mod auth;
pub mod config;
pub mod guard;
pub mod paths;
pub mod posts;
pub mod retry;
pub mod routes;
pub mod session;
pub mod state;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;
