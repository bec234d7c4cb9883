pub mod song;
pub mod training_pair;
