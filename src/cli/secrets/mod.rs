//! Secret commands: list remote names and push a .env file.

pub mod list;
pub mod push;
