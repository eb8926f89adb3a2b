pub mod config;
pub mod logging;

pub mod cookie_jar;
pub mod fetch;
pub mod fingerprint;
pub mod pipeline;
pub mod registry;
pub mod report;
pub mod request;
