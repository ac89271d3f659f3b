pub mod charts;
pub mod columns;
pub mod compare;
pub mod config;
pub mod csv_table;
pub mod document;
pub mod extract;
pub mod http_client;
pub mod logging;
pub mod persist;
pub mod pipeline;
pub mod server;
pub mod stats;
pub mod web_table;
