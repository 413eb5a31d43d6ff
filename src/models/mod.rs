pub mod sentiment_types;
pub mod session_types;
