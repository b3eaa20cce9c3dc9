//! # vidtube-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    validation_messages, AuthService, ProfileService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, TokenService, UserService,
};
