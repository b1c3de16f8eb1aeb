pub mod config;
pub mod domain;
pub mod error;
pub mod jobs;
pub mod repository;
pub mod services;
