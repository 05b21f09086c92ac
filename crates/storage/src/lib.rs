#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod local_storage;
pub mod record;
