use clap::Parser;
use clap::ValueEnum;
use long_map::Config;
use long_map::LongMap;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Pattern {
    /// 0, 1, 2, ...
    Sequential,
    /// Multiples of the initial capacity, which all share a home slot
    /// until the map grows.
    Strided,
    /// Uniformly random i64 keys.
    Random,
}

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'n', long = "keys", default_value_t = 1000)]
    keys: usize,

    #[arg(short = 'p', long = "pattern", value_enum, default_value_t = Pattern::Random)]
    pattern: Pattern,

    /// Fraction of inserted keys to remove afterwards.
    #[arg(short = 'r', long = "remove", default_value_t = 0.0)]
    remove: f64,

    #[arg(short = 'l', long = "load_factor", default_value_t = Config::DEFAULT_LOAD_FACTOR)]
    load_factor: f64,

    #[arg(short = 's', long = "seed", default_value_t = 0x5eed)]
    seed: u64,
}

fn main() {
    let args = Args::parse();

    let config = Config::new().load_factor(args.load_factor);
    let mut map: LongMap<u64> = match LongMap::try_with_config(config) {
        Ok(map) => map,
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(2);
        }
    };

    let mut rng = SmallRng::seed_from_u64(args.seed);
    let stride = config.get_initial_capacity() as i64;
    let keys: Vec<i64> = (0..args.keys as i64)
        .map(|i| match args.pattern {
            Pattern::Sequential => i,
            Pattern::Strided => i.wrapping_mul(stride),
            Pattern::Random => rng.random(),
        })
        .collect();

    println!(
        "Filling LongMap with {} {:?} keys (load factor {})",
        args.keys, args.pattern, args.load_factor
    );

    for (value, &key) in keys.iter().enumerate() {
        map.insert(key, value as u64);
    }

    let to_remove = (keys.len() as f64 * args.remove.clamp(0.0, 1.0)) as usize;
    for &key in keys.iter().take(to_remove) {
        map.remove(key);
    }

    println!("Inserted {} keys, removed {}", keys.len(), to_remove);
    println!("Final capacity: {} slots", map.capacity());
    println!(
        "Final load factor: {:.2}%",
        (map.len() as f64 / map.capacity() as f64) * 100.0
    );

    let histogram = map.probe_histogram();
    histogram.print();
    println!("Mean probe length: {:.3}", histogram.mean());
    map.debug_stats().print();
}
