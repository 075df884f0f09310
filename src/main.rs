//! Self-play simulation driver: runs seeded CPU-vs-CPU rounds through the
//! full engine, with optional suspension to a save file and resumption from
//! one. Useful for exercising the machine end to end and for producing
//! checkpoints to inspect.

use std::path::PathBuf;

use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use build_up::data::{load_round, save_round};
use build_up::{setup_logging, CpuStrategy, Round, RoundPhase};

#[derive(Parser, Debug)]
#[command(name = "build_up")]
struct Config {
    /// RNG seed for shuffles; the same seed replays the same tournament
    #[arg(short = 's', long, default_value_t = 0)]
    seed: u64,

    /// Number of rounds to play
    #[arg(short = 'r', long, default_value_t = 1)]
    rounds: u32,

    /// Save file path for suspension and resumption
    #[arg(long, default_value = "buildup_save.txt")]
    save: PathBuf,

    /// Resume from the save file if it exists
    #[arg(long, default_value_t = false)]
    resume: bool,

    /// Suspend the current round after this many placements
    #[arg(long)]
    suspend_after: Option<u32>,

    /// Directory for log files
    #[arg(long, default_value = "logs")]
    log_dir: String,
}

fn main() -> build_up::Result<()> {
    let config = Config::parse();
    setup_logging(&config.log_dir);

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut human_wins = 0u32;
    let mut cpu_wins = 0u32;

    let mut resumed = if config.resume {
        load_round(&config.save)?.map(|snapshot| {
            human_wins = snapshot.human_wins;
            cpu_wins = snapshot.cpu_wins;
            snapshot.into_round()
        })
    } else {
        None
    };

    for _ in 0..config.rounds {
        let round_number = human_wins + cpu_wins + 1;
        let mut round = match resumed.take() {
            Some(round) => {
                info!("resuming round {round_number}");
                round
            }
            None => {
                info!("starting round {round_number}");
                Round::start(&mut rng)
            }
        };

        let mut human = CpuStrategy::new();
        let mut cpu = CpuStrategy::new();
        let mut placements = 0u32;
        let suspend_after = config.suspend_after;
        let phase = round.play(&mut rng, &mut human, &mut cpu, &mut |_| {
            placements += 1;
            suspend_after.map_or(true, |limit| placements < limit)
        })?;

        if phase == RoundPhase::Suspended {
            save_round(&config.save, &round, human_wins, cpu_wins)?;
            println!("{}", serde_json::to_string_pretty(&round.view()).expect("view is serializable"));
            return Ok(());
        }

        if round.human.score > round.cpu.score {
            human_wins += 1;
        } else if round.cpu.score > round.human.score {
            cpu_wins += 1;
        } else {
            // A drawn round credits both sides.
            human_wins += 1;
            cpu_wins += 1;
        }
        info!(
            "round {round_number} finished: human {} computer {} (wins {human_wins}-{cpu_wins})",
            round.human.score, round.cpu.score
        );
        println!("{}", serde_json::to_string_pretty(&round.view()).expect("view is serializable"));
    }

    Ok(())
}
