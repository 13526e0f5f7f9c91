//! Slack slash-command endpoint that answers a query with the best
//! Knowledge Graph match, after authenticating the request signature.

pub mod app;
pub mod config;
pub mod handler;
pub mod resolve;
pub mod slack;
pub mod types;
pub mod validate;
