//! Presentation Layer
//!
//! HTTP handlers, DTOs and the embeddable quota middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
