pub mod contact;
pub mod project;
pub mod skill;
pub mod stats;
pub mod user;
