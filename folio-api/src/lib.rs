extern crate chrono;
extern crate serde;
#[macro_use]
extern crate serde_derive;

pub mod authors;
pub mod comments;
pub mod notifications;
pub mod posts;
pub mod reactions;
pub mod reports;
pub mod users;
