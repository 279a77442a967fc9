mod properties;
mod puzzles;
