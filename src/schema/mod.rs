pub mod record;
pub mod score;
