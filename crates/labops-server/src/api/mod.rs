//! API-level types shared by every feature

pub mod response;
