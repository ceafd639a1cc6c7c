//! Utility modules for common functionality
//!
//! This module provides logging and XML helpers used throughout the application.

pub mod logger;
pub(crate) mod xml_utils;
