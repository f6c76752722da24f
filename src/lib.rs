//! Therapair - Guided therapist matching
//!
//! A branching questionnaire collects a user's needs, a deterministic engine
//! ranks a therapist roster against the answers, and a booking endpoint
//! turns the chosen match into notification emails.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
