//! Client SDK for the Mambo gamification REST API.
//!
//! [`MamboClient`] signs every request with two-legged OAuth 1.0 and hands
//! it to a [`Transport`]. Endpoints are grouped into services reached from
//! the client:
//!
//! ```ignore
//! use mambo::{MamboClient, UserListOptions};
//!
//! let client = MamboClient::new("https://api.mambo.io", "public", "private");
//! let users = client.users().list("acme", &UserListOptions::default())?;
//! ```
//!
//! Request bodies are typed in [`data`]; responses are returned as
//! [`serde_json::Value`].

mod client;
pub mod data;
mod error;
mod services;
mod url_builder;

pub use client::{IncomingResponse, MamboClient, Method, OutgoingRequest, Transport, UreqTransport};
pub use error::MamboError;
pub use services::{
    ActivityOptions, Analytics, AnalyticsQuery, Behaviours, Coupons, CustomFields, DataStores,
    Languages, LeaderboardOptions, Leaderboards, ListOptions, NotificationOptions, Rewards, Tags,
    UserListOptions, UserRewardOptions, Users,
};
pub use url_builder::{ApiUrlBuilder, Order, OrderBy, Period};
