pub mod computer;
pub mod games;
