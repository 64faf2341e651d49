pub mod analytics;
pub mod asset;
pub mod config;
pub mod effects;
pub mod http;
pub mod page;
pub mod provider;
pub mod release;
pub mod site;
