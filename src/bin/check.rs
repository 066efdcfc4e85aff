use log::{error, info, LevelFilter};
use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use structopt::StructOpt;

use std::{cmp, collections::BTreeSet, fmt, process};

use rbset::Set;

/// Command line options.
#[derive(Clone, StructOpt)]
pub struct Opt {
    #[structopt(long = "seed")]
    seed: Option<u64>,

    #[structopt(long = "samples", default_value = "10000")]
    samples: usize,

    #[structopt(long = "range", default_value = "1000")] // for insert check
    range: u32,

    #[structopt(long = "search-range", default_value = "20000")] // for search check
    search_range: u32,

    #[structopt(long = "verbose")]
    verbose: bool,

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
    info!("check seed {}", seed);

    let ok_insert = check_insert(seed, &opts);
    info!("insert check: {}", yes_no(ok_insert));
    let ok_search = check_search(seed, &opts);
    info!("search check: {}", yes_no(ok_search));

    if !(ok_insert && ok_search) {
        error!("check failed for seed {}", seed);
        process::exit(1);
    }
}

// Insert random values into both sets, both must agree on whether each
// value was added.
fn check_insert(seed: u64, opts: &Opt) -> bool {
    let mut rng = SmallRng::seed_from_u64(seed);
    let range = cmp::max(opts.range, 1);

    let mut set: Set<u32> = Set::new();
    let mut btset: BTreeSet<u32> = BTreeSet::new();

    let mut ok = true;
    for _i in 0..opts.samples {
        let value = rng.gen_range(0..range);

        let bt_added = btset.insert(value);
        let added = !set.insert(value).is_end();
        if opts.verbose {
            info!(
                "[adding {:5}] btset added:{:5} set added:{:5} same:{}",
                value,
                bt_added,
                added,
                yes_no(bt_added == added)
            );
        }
        ok = ok && (bt_added == added);
    }

    ok && same_walk(&set, &btset)
}

// Load random values, then probe every value in range, both sets must
// agree on presence.
fn check_search(seed: u64, opts: &Opt) -> bool {
    let mut rng = SmallRng::seed_from_u64(seed);
    let range = cmp::max(opts.search_range, 1);

    let mut set: Set<u32> = Set::new();
    let mut btset: BTreeSet<u32> = BTreeSet::new();
    for _i in 0..opts.samples {
        let value = rng.gen_range(0..range);
        set.insert(value);
        btset.insert(value);
    }

    let mut ok = true;
    for value in 0..range {
        let bt_found = btset.contains(&value);
        let found = set.search(&value) != set.end();
        if opts.verbose {
            info!(
                "[checking {:5}] btset found:{:5} set found:{:5} same:{}",
                value,
                bt_found,
                found,
                yes_no(bt_found == found)
            );
        }
        ok = ok && (bt_found == found);
    }

    ok && same_walk(&set, &btset)
}

// Cursor walk from begin to end must match the reference, and the tree
// must validate.
fn same_walk<T>(set: &Set<T>, btset: &BTreeSet<T>) -> bool
where
    T: Ord + Clone + fmt::Debug,
{
    let mut values = Vec::with_capacity(set.len());
    let mut cursor = set.begin();
    while cursor != set.end() {
        match cursor.fetch_next() {
            Ok(old) => match old.get() {
                Ok(value) => values.push(value.clone()),
                Err(err) => {
                    error!("{}", err);
                    return false;
                }
            },
            Err(err) => {
                error!("{}", err);
                return false;
            }
        }
    }

    let refs: Vec<T> = btset.iter().cloned().collect();
    if values != refs {
        error!("walk mismatch, {} values != {} values", values.len(), refs.len());
        return false;
    }

    if let Err(err) = set.validate() {
        error!("{}", err);
        return false;
    }
    set.len() == btset.len()
}

fn yes_no(condition: bool) -> &'static str {
    if condition {
        "YES"
    } else {
        "NO"
    }
}
