use super::prelude::*;

const PLAYERS: u32 = 10;

/// A handful of players chasing a rolling ball.
pub struct Kickabout {
    name: &'static str,
    config: ControllerConfig,
}

impl Kickabout {
    pub fn new() -> Self {
        Self {
            name: "kickabout",
            config: ControllerConfig::default(),
        }
    }

    /// The same match with the older braking threshold and per-axis clamping.
    pub fn legacy() -> Self {
        Self {
            name: "legacy",
            config: ControllerConfig {
                strategy: SteeringStrategy::Combined,
                braking: BrakingLaw::Legacy,
                clamp: ForceClamp::PerAxis,
                ..Default::default()
            },
        }
    }
}

impl Scenario for Kickabout {
    fn name(&self) -> String {
        self.name.into()
    }

    fn human_name(&self) -> String {
        match self.name {
            "legacy" => "Kickabout (legacy controller)".into(),
            _ => "Kickabout".into(),
        }
    }

    fn controller_config(&self) -> ControllerConfig {
        self.config
    }

    fn init(&mut self, sim: &mut Simulation, seed: u32) -> Lineup {
        add_walls(sim);

        let mut rng = stream_rng(seed, "players");
        let players = kick_off(sim, &mut rng, PLAYERS, None);

        let mut rng = stream_rng(seed, "ball");
        let speed = rng.gen_range(3.0..6.0);
        let ball = place_ball(sim, &mut rng, vector![0.0, 0.0], speed);

        log::info!("Kickabout seed {} ball speed {:.2}", seed, speed);
        Lineup { players, ball }
    }
}
