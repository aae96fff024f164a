//! Vendor Match - Guided conversational search for data vendors
//!
//! A short dialogue fills eight search criteria; the matching pipeline then
//! summarizes the search, filters the vendor catalog by model-derived topics
//! and ranks the candidates.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
