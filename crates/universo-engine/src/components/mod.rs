pub mod body;
pub mod logo;
