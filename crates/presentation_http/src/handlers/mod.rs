//! HTTP request handlers

pub mod coach;
pub mod health;
pub mod languages;
