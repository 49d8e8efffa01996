//! Client for the remote workshop API.
//!
//! DESIGN
//! ======
//! The portal holds no data of its own: identity, customers, workers, and
//! cars all live behind one REST backend. Routes and services talk to it
//! through the [`WorkshopApi`] trait; `HttpApi` is the reqwest-backed
//! implementation, configured from environment variables.

pub mod config;
pub mod http;
pub mod types;

pub use config::ApiConfig;
pub use http::HttpApi;
pub use types::WorkshopApi;
