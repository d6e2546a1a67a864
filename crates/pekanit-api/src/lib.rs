// pekanit-api: Async Rust client for the Pekan IT queue and questionnaire backend

pub mod antrian;
pub mod auth;
pub mod client;
pub mod error;
pub mod kuesioner;
pub mod models;
pub mod report;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use models::{
    Audience, ClassQueueEntry, GuestQuestionnaire, GuestResponse, LoginResponse, LoginUser,
    QueueNumber, Rating, Ratings, StudentQuestionnaire, StudentResponse,
};
pub use transport::{TlsMode, TransportConfig};
