//! FreshPod site core
//!
//! Logic behind the FreshPod marketing site: the shared catalog engine used
//! by the blog index and the gallery, the world map of active markets, the
//! contact form client and the distributor ROI calculator.

pub mod cache;
pub mod calculator;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod content;
pub mod error;
pub mod geo;
