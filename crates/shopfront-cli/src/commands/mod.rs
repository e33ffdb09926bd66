pub mod add;
pub mod common;
pub mod delete;
pub mod edit;
pub mod list;
pub mod login;
pub mod maintenance;
pub mod restore;
pub mod show;
