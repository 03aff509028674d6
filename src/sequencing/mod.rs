pub mod generator;
pub mod genre;
pub mod grid;
pub mod scale;
pub mod tempo;

pub use generator::{generate, Generated};
pub use genre::{Genre, GenreProfile};
pub use grid::Grid;
pub use scale::Scale;
pub use tempo::Tempo;
