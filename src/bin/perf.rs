use log::{info, LevelFilter};
use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use structopt::StructOpt;

use std::{cmp, time};

use rbset::Set;

/// Command line options.
#[derive(Clone, StructOpt)]
pub struct Opt {
    #[structopt(long = "seed")]
    seed: Option<u64>,

    #[structopt(long = "range", default_value = "100000000")] // values in [0, range)
    range: u32,

    #[structopt(long = "points", default_value = "6")] // 10^2 .. 10^(points+1)
    points: u32,

    #[structopt(long = "probes", default_value = "1000000")] // searches per point
    probes: u32,

    #[structopt(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
}

fn main() {
    let opts = Opt::from_args();
    TermLogger::init(
        opts.log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .ok();

    let seed = opts.seed.unwrap_or_else(random);
    info!("perf seed {}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let range = cmp::max(opts.range, 1);
    let probes = cmp::min(cmp::max(opts.probes, 1), range);

    for point in 0..opts.points {
        let sample_size = 10_usize.pow(point + 2);

        let start = time::Instant::now();
        let set = generate_set(&mut rng, sample_size, range);
        let load = start.elapsed();

        let (elapsed, hits) = search_range(&set, range, probes);
        info!(
            "elements:{} loaded in {:?}; {} searches, {} hits, average search time {:?}",
            set.len(),
            load,
            probes,
            hits,
            elapsed / probes
        );
    }
}

// Insert `sample_size` random values from [0, range), duplicates are
// dropped by the set.
fn generate_set(rng: &mut SmallRng, sample_size: usize, range: u32) -> Set<u32> {
    let mut set = Set::new();
    for _i in 0..sample_size {
        set.insert(rng.gen_range(0..range));
    }
    set
}

// Search `probes` values spread evenly over [0, range).
fn search_range(set: &Set<u32>, range: u32, probes: u32) -> (time::Duration, usize) {
    let step = range / probes;

    let start = time::Instant::now();
    let mut hits = 0;
    for i in 0..probes {
        if !set.search(&(i * step)).is_end() {
            hits += 1;
        }
    }
    (start.elapsed(), hits)
}
