//! HTTP surface outside the booking API

pub mod frontend;
pub mod proxy;
