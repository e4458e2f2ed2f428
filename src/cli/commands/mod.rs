pub mod config;
pub mod exercise;
pub mod init;
pub mod session;
