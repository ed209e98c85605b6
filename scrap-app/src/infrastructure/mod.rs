pub mod openrouter;
pub mod security;
