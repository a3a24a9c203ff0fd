pub mod links;
pub mod users;
pub mod votes;
