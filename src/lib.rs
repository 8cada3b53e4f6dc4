//! Resource server for the colllect API: authenticates every inbound call
//! from an RS256 access token (bearer header or `colllect_oauth2` cookie)
//! and hands the verified identity to downstream handlers.
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
