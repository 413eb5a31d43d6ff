pub mod busy;
pub mod distribution;
pub mod orchestrator;
pub mod presenter;
pub mod sentiment_api;
pub mod session;
