pub mod config;
pub mod logging;

pub mod checksum;
pub mod fetch;
pub mod input;
pub mod pipeline;
pub mod storage;
pub mod url_model;
