// src/utils/mod.rs
pub mod round;
