//! Headless Snake simulation.
//!
//! A [`game::Game`] owns a [`grid::Grid`] and a [`snake::Snake`] and asks a
//! [`controller::Controller`] for a direction on every tick. Obstacles are
//! laid out up front by a [`wall::WallBuilder`].

pub mod config;
pub mod controller;
pub mod direction;
pub mod error;
pub mod eval;
pub mod game;
pub mod grid;
pub mod snake;
pub mod tile;
pub mod wall;
