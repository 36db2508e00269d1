#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod catalog;
mod error;
mod materializer;
mod name;
mod program;
mod reps;
mod resolver;
mod service;
mod set;
mod similarity;
mod user;

pub use catalog::*;
pub use error::*;
pub use materializer::*;
pub use name::*;
pub use program::*;
pub use reps::*;
pub use resolver::*;
pub use service::*;
pub use set::*;
pub use similarity::*;
pub use user::*;
