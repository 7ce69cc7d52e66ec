use std::hint::black_box;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use eyre::{ensure, Result, WrapErr};
use log::debug;
use structopt::StructOpt;

use aoc2023::input::Source;

const YEAR: u16 = 2023;

const W_DAY: usize = 10;
const W_PART: usize = 16;

#[derive(Debug, StructOpt)]
struct Args {
    #[structopt(help = "Day: 2 to 7. If not selected, all days are used.")]
    pub day: Option<u8>,
    #[structopt(long, short, requires("day"), help = "Part of the day: 1 or 2.")]
    pub part: Option<u8>,
    #[structopt(long, short, help = "Use the worked example from the puzzle text as input.")]
    pub example: bool,
    #[structopt(
        long,
        short,
        parse(from_os_str),
        conflicts_with("example"),
        help = "Root of the input cache, laid out as <root>/<year>/<day>. \
                [default: $AOC_INPUT_DIR or /tmp/aoc]"
    )]
    pub input_dir: Option<PathBuf>,
    #[structopt(long, short, help = "Log what each day does (RUST_LOG overrides).")]
    pub verbose: bool,
    #[structopt(long, short, help = "Print benchmark times instead of problem answers.")]
    pub bench: bool,
    #[structopt(
        long,
        short,
        requires("bench"),
        help = "Time in seconds allowed for timing each problem part. [default: 1.0]"
    )]
    pub seconds: Option<f64>,
    #[structopt(
        long,
        short,
        requires("bench"),
        help = "Fraction of time used for warmup before benching (0-0.5). [default: 0.2]"
    )]
    pub warmup: Option<f64>,
}

/// Everything a run needs to know besides which days and parts to run.
#[derive(Clone, Debug)]
struct Config {
    source: Source,
    year: u16,
}

impl Config {
    fn from_args(args: &Args) -> Self {
        let source =
            if args.example { Source::Example } else { Source::cache(args.input_dir.clone()) };
        Self { source, year: YEAR }
    }
}

type Solver = fn(&str) -> aoc2023::Result<String>;

struct Day {
    number: u8,
    example: &'static str,
    parts: [Solver; 2],
}

macro_rules! day {
    ($number:expr, $module:ident) => {
        Day {
            number: $number,
            example: aoc2023::$module::EXAMPLE,
            parts: [
                |s| Ok(aoc2023::$module::part1(s)?.to_string()),
                |s| Ok(aoc2023::$module::part2(s)?.to_string()),
            ],
        }
    };
}

fn all_days() -> Vec<Day> {
    vec![
        day!(2, day02),
        day!(3, day03),
        day!(4, day04),
        day!(5, day05),
        day!(6, day06),
        day!(7, day07),
    ]
}

impl Day {
    fn load(&self, config: &Config) -> Result<String> {
        config
            .source
            .load(config.year, self.number, self.example)
            .wrap_err_with(|| format!("cannot load input for day {}", self.number))
    }

    fn run(&self, part: u8, input: &str, times: usize) -> Result<(Duration, String)> {
        let solve = self.parts[part as usize - 1];
        let context = || format!("day {} part {} failed", self.number, part);
        let t0 = Instant::now();
        let out = black_box(solve(black_box(input))).wrap_err_with(context)?;
        for _ in 1..times {
            black_box(solve(black_box(input))).wrap_err_with(context)?;
        }
        Ok((t0.elapsed(), out))
    }
}

fn print_header(parts: &[u8]) {
    print!("{:<w$}", "day", w = W_DAY);
    for part in parts {
        print!("{:<w$}", format!("part {}", part), w = W_PART);
    }
    println!();
    println!("{:-<w$}", "", w = W_DAY + W_PART * parts.len());
}

fn print_day(day: u8) {
    print!("{:<w$}", format!("day {:02}", day), w = W_DAY);
}

fn run_output(config: &Config, days: &[Day], parts: &[u8]) -> Result<()> {
    print_header(parts);
    for day in days {
        let input = day.load(config)?;
        let answers =
            parts.iter().map(|&part| Ok(day.run(part, &input, 1)?.1)).collect::<Result<Vec<_>>>()?;
        print_day(day.number);
        for answer in answers {
            print!("{:<w$}", answer, w = W_PART);
        }
        println!();
    }
    Ok(())
}

fn format_time(seconds: f64) -> String {
    let mics = seconds * 1e6;
    let prec = match mics {
        m if m < 10. => 2,
        m if m < 100. => 1,
        _ => 0,
    };
    format!("{:.p$} μs", mics, p = prec)
}

/// Mean seconds per call, after spending `warmup` of the time budget unmeasured.
fn bench_one(day: &Day, part: u8, input: &str, seconds: f64, warmup: f64) -> Result<f64> {
    const SPINNER: [char; 8] = ['↑', '↗', '→', '↘', '↓', '↙', '←', '↖'];
    const N_CHUNKS: usize = SPINNER.len() * 2;

    let (mut n_estimate, mut elapsed) = (1, day.run(part, input, 1)?.0.as_secs_f64());
    while elapsed < 0.01 {
        n_estimate *= 2;
        elapsed = day.run(part, input, n_estimate)?.0.as_secs_f64();
    }
    let n_total = (seconds / elapsed * (n_estimate as f64)).ceil();
    let n_warmup = (n_total * warmup).ceil().min(n_total - 1.) as usize;
    let n_chunk = ((n_total * (1. - warmup) / N_CHUNKS as f64).ceil() as usize).max(1);
    debug!(
        "day {} part {}: {} warmup runs, {} x {} timed",
        day.number, part, n_warmup, N_CHUNKS, n_chunk
    );

    day.run(part, input, n_warmup.max(1))?;
    let mut total = Duration::default();
    for i in 0..N_CHUNKS {
        print!("\r");
        print_day(day.number);
        print!("{}", SPINNER[i % SPINNER.len()]);
        std::io::stdout().flush()?;
        total += day.run(part, input, n_chunk)?.0;
    }
    print!("\r");
    Ok(total.as_secs_f64() / ((N_CHUNKS * n_chunk) as f64))
}

fn run_bench(config: &Config, days: &[Day], parts: &[u8], seconds: f64, warmup: f64) -> Result<()> {
    print_header(parts);
    let mut grand_total = 0.;
    for day in days {
        let input = day.load(config)?;
        let times = parts
            .iter()
            .map(|&part| bench_one(day, part, &input, seconds, warmup))
            .collect::<Result<Vec<_>>>()?;
        grand_total += times.iter().sum::<f64>();
        print_day(day.number);
        for time in times {
            print!("{:<w$}", format_time(time), w = W_PART);
        }
        println!();
    }
    if days.len() > 1 && parts.len() == 2 {
        println!("{:-<w$}", "", w = W_DAY + W_PART * 2);
        println!("total time = {}", format_time(grand_total));
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let args = Args::from_args_safe()?;
    init_logging(args.verbose);

    let mut days = all_days();
    if let Some(day) = args.day {
        ensure!(
            days.iter().any(|d| d.number == day),
            "day must be one of {:?}",
            days.iter().map(|d| d.number).collect::<Vec<_>>()
        );
        days.retain(|d| d.number == day);
    }
    if let Some(part) = args.part {
        ensure!((1..=2).contains(&part), "part must be 1..=2");
    }
    let parts = match args.part {
        Some(part) => vec![part],
        None => vec![1, 2],
    };

    let config = Config::from_args(&args);
    debug!("{:?}", config);
    if args.bench {
        let seconds = args.seconds.unwrap_or(1.0);
        ensure!(seconds > 0., "seconds must be a positive number");
        let warmup = args.warmup.unwrap_or(0.2);
        ensure!((0.0..=0.5).contains(&warmup), "warmup must be in [0.0; 0.5]");
        run_bench(&config, &days, &parts, seconds, warmup)
    } else {
        run_output(&config, &days, &parts)
    }
}
