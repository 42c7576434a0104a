//! HTTP handlers

pub mod admin;
pub mod auth;
pub mod complaints;
pub mod dashboard;
pub mod health;
pub mod institution;
pub mod sector;
