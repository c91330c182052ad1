// Game modules

pub mod characters;
