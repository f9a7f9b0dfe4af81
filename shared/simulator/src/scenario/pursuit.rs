use super::prelude::*;

const PLAYERS: u32 = 4;

/// A fast ball and a few players that both turn and run after it.
pub struct Pursuit {
    kicks: u32,
}

impl Pursuit {
    const KICK_INTERVAL: u32 = 60 * 5;
    const KICK_SPEED: f64 = 8.0;

    pub fn new() -> Self {
        Self { kicks: 0 }
    }
}

impl Scenario for Pursuit {
    fn name(&self) -> String {
        "pursuit".into()
    }

    fn human_name(&self) -> String {
        "Pursuit".into()
    }

    fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            strategy: SteeringStrategy::Combined,
            ..Default::default()
        }
    }

    fn init(&mut self, sim: &mut Simulation, seed: u32) -> Lineup {
        add_walls(sim);
        self.kicks = 0;

        let mut rng = stream_rng(seed, "players");
        let players = kick_off(sim, &mut rng, PLAYERS, None);

        let mut rng = stream_rng(seed, "ball");
        let ball = place_ball(sim, &mut rng, vector![0.0, 0.0], Self::KICK_SPEED);

        Lineup { players, ball }
    }

    /// Re-kicks the ball along its current direction every few seconds so the
    /// players never quite settle.
    fn tick(&mut self, sim: &mut Simulation) {
        let tick = sim.tick();
        if tick == 0 || tick % Self::KICK_INTERVAL != 0 {
            return;
        }
        let handle = match sim.ball() {
            Some(handle) => handle,
            None => return,
        };
        if let Some(body) = sim.body_mut(handle) {
            let velocity = *body.linvel();
            let direction = if velocity.norm() > 1e-6 {
                velocity.normalize()
            } else {
                vector![1.0, 0.0]
            };
            body.set_linvel(direction * Self::KICK_SPEED, true);
            self.kicks += 1;
            log::debug!("Kick {} at tick {}", self.kicks, tick);
        }
    }
}
