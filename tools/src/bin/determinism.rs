use clap::Parser;
use pitch_simulator::scenario::{self, Status};
use pitch_simulator::snapshot::Snapshot;
use pitch_simulator::Game;

#[derive(Parser, Debug)]
#[clap()]
struct Arguments {
    scenario: String,

    #[clap(short, long, default_value_t = 0)]
    seed: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Arguments::parse();
    if scenario::load_safe(&args.scenario).is_none() {
        anyhow::bail!("Unknown scenario {:?}", args.scenario);
    }

    let mut games = [0, 1]
        .iter()
        .map(|_| Game::new(&args.scenario, args.seed))
        .collect::<Result<Vec<_>, _>>()?;
    while games[0].status() == Status::Running {
        let hashes = games.iter().map(|game| game.hash()).collect::<Vec<_>>();
        if hashes[0] != hashes[1] {
            println!("hashes differ at tick {}", games[0].simulation().tick());
            diff_snapshots(&games[0].snapshot(), &games[1].snapshot());
            return Ok(());
        }
        games.iter_mut().for_each(|game| game.tick());
    }
    log::info!(
        "{} seed {} is deterministic over {} ticks",
        args.scenario,
        args.seed,
        games[0].simulation().tick()
    );
    Ok(())
}

fn diff_snapshots(a: &Snapshot, b: &Snapshot) {
    if a.players.len() != b.players.len() {
        println!("player count differs");
        println!("  a: {}", a.players.len());
        println!("  b: {}", b.players.len());
    }

    for (a, b) in a.players.iter().zip(b.players.iter()) {
        if a.position != b.position {
            println!("player {} position differs", a.number);
            println!("  a: {:?}", a.position);
            println!("  b: {:?}", b.position);
        }

        if a.velocity != b.velocity {
            println!("player {} velocity differs", a.number);
            println!("  a: {:?}", a.velocity);
            println!("  b: {:?}", b.velocity);
        }

        if a.heading != b.heading {
            println!("player {} heading differs", a.number);
            println!("  a: {:?}", a.heading);
            println!("  b: {:?}", b.heading);
        }

        if a.angular_velocity != b.angular_velocity {
            println!("player {} angular velocity differs", a.number);
            println!("  a: {:?}", a.angular_velocity);
            println!("  b: {:?}", b.angular_velocity);
        }
    }

    if let (Some(a), Some(b)) = (&a.ball, &b.ball) {
        if a.position != b.position || a.velocity != b.velocity {
            println!("ball differs");
            println!("  a: {:?} {:?}", a.position, a.velocity);
            println!("  b: {:?} {:?}", b.position, b.velocity);
        }
    }
}
