pub mod classify;
pub mod error;
pub mod interfaces;
pub mod path_allocator;
pub mod service;
