#[cfg(any(test, feature = "testing"))]
pub mod memory_photo_store;
pub mod photo_store;
