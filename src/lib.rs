//! Shipping Lead Intake API Library
//!
//! Receives shipping-quote leads, stores them in Postgres and notifies the
//! sales inbox by email, degrading to email-only delivery when the store is
//! unavailable or rejects the insert.
//!
//! # Modules
//!
//! - `api`: API definitions.
//! - `core`: Core business logic.
//! - `data`: Data access layer.
//! - `integrations`: External service integrations.
//! - `app`: Router and middleware assembly.
//! - `config`: Configuration management.
//! - `db`: Database connection and pool management.
//! - `db_storage`: Lead record store.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `lead_intake`: Sanitization, validation and derived attributes.
//! - `models`: Core data models.
//! - `notification`: Lead notification email rendering.
//! - `openapi`: OpenAPI document and Swagger UI.
//! - `outcome`: Submission outcome decision.
//! - `resend_client`: Resend email API client.
//! - `services`: Lead submission pipeline.

pub mod api;
pub mod core;
pub mod data;
pub mod integrations;

// Re-export primary modules for shared use in tests and other binaries
pub mod app;
pub mod config;
pub mod db;
pub mod db_storage;
pub mod errors;
pub mod handlers;
pub mod lead_intake;
pub mod models;
pub mod notification;
pub mod openapi;
pub mod outcome;
pub mod resend_client;
pub mod services;
