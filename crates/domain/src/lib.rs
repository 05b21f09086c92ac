#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod exercise;
mod matcher;
mod name;
mod service;
mod session;
mod set_data;
mod summary;
mod timestamp;
mod user;
mod workout;

pub use error::*;
pub use exercise::*;
pub use matcher::*;
pub use name::*;
pub use service::*;
pub use session::*;
pub use set_data::*;
pub use summary::*;
pub use timestamp::*;
pub use user::*;
pub use workout::*;
