//! SeaORM adapters; functions return `DbErr`.

pub mod games_sea;
