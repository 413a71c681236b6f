//! `myfit-client`: typed client for the gym HTTP API.
//!
//! Endpoint groups are exposed as traits ([`AuthApi`], [`MemberApi`],
//! [`TrainerApi`], [`AdminApi`]) implemented by [`ApiClient`]; views depend on
//! the traits so they can run against in-memory fakes.

pub mod admin;
pub mod auth;
pub mod client;
pub mod config;
pub mod dto;
pub mod error;
pub mod member;
pub mod trainer;

pub use admin::AdminApi;
pub use auth::AuthApi;
pub use client::ApiClient;
pub use config::ClientConfig;
pub use dto::{ClassRequest, LoginRequest, NewTrainer, NewUser, PlanRequest, TrainerUpdate, UserUpdate};
pub use error::{ApiError, ConfigError};
pub use member::MemberApi;
pub use trainer::TrainerApi;
