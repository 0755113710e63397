pub mod alert;
pub mod auth;
pub mod component;
pub mod hierarchy;
pub mod movement;
pub mod product;
