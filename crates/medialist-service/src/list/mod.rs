//! List lifecycle and the ownership-consistency protocol.

pub mod service;

pub use service::ListService;
