//! Request and response bodies

pub mod prediction;
