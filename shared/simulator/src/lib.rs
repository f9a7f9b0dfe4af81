pub mod ball;
pub mod collision;
pub mod controller;
pub mod debug;
pub mod engine;
pub mod error;
pub mod game;
pub mod math;
pub mod orchestrator;
pub mod player;
pub mod rng;
pub mod scenario;
pub mod simulation;
pub mod snapshot;

pub use controller::{ControlLimits, ControllerConfig, SteeringStrategy};
pub use engine::{BodyHandle, BodyState, PhysicsEngine};
pub use error::{Error, Result};
pub use game::Game;
pub use orchestrator::{Anomaly, Orchestrator, TickReport};
