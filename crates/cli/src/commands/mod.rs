pub mod chat;
pub mod gateway;
