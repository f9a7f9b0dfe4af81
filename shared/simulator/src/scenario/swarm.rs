use super::prelude::*;

const PLAYERS: u32 = 100;
const MAX_DRIFT: f64 = 10.0;

/// A crowded pitch. Every player starts drifting and spinning, so the first
/// seconds are mostly collisions.
pub struct Swarm {}

impl Swarm {
    pub fn new() -> Self {
        Self {}
    }
}

impl Scenario for Swarm {
    fn name(&self) -> String {
        "swarm".into()
    }

    fn human_name(&self) -> String {
        "Swarm".into()
    }

    fn init(&mut self, sim: &mut Simulation, seed: u32) -> Lineup {
        add_walls(sim);

        let mut rng = stream_rng(seed, "players");
        let players = kick_off(sim, &mut rng, PLAYERS, Some(MAX_DRIFT));

        let mut rng = stream_rng(seed, "ball");
        let position = random_position(&mut rng, sim.arena(), BallData::default().radius);
        let ball = place_ball(sim, &mut rng, position, 0.0);

        Lineup { players, ball }
    }

    fn max_ticks(&self) -> u32 {
        60 * 20
    }
}
