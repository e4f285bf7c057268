pub mod errors;
pub mod groq;
pub mod listing;
pub mod post;
