//! Domain models and request/response types

pub mod customer;
pub mod dashboard;
pub mod employee;
pub mod enums;
pub mod maintenance;
pub mod otp;
pub mod payment;
pub mod reservation;
pub mod room;
