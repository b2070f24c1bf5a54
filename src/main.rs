//! CFOP Cross and F2L Solver
//!
//! Scrambles a cube (or reads one from facelet strings), then searches for
//! the cross and the four F2L pairs. Can also compare crosses across all six
//! faces, or just show a cube and how far it is through CFOP.

use std::process::ExitCode;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use env_logger::TimestampPrecision;
use log::LevelFilter;
use thiserror::Error;

use cfop_astar::facelets::FaceletError;
use cfop_astar::goal::GoalError;
use cfop_astar::moves::ParseMoveError;
use cfop_astar::solver::FaceReport;
use cfop_astar::{
    format_moves, parse_moves, progress, Cube, PairSlot, SearchOptions, SolveError, Solver,
    SolverConfig,
};

/// Finds CFOP cross and F2L solutions with A* search.
#[derive(Parser)]
#[command(name = "cfop")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Longest cross solution to look for.
    #[arg(long, global = true, default_value_t = 10)]
    depth_cap: usize,

    /// Longest solution to look for per F2L pair.
    #[arg(long, global = true, default_value_t = 14)]
    pair_depth_cap: usize,

    /// Weight of the move count in the search priority.
    #[arg(long, global = true, default_value_t = 1)]
    len_weight: u32,

    /// Heuristic cost of each flipped piece.
    #[arg(long, global = true, default_value_t = 2)]
    flip_weight: u32,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Args)]
struct CubeArgs {
    /// Scramble applied to the starting cube, e.g. "R U' F2".
    #[arg(default_value = "")]
    scramble: String,

    /// Start from six facelet strings in U,L,F,R,B,D order instead of a
    /// solved cube.
    #[arg(long, value_delimiter = ',', value_name = "FACES")]
    facelets: Option<Vec<String>>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve the cross and the four F2L pairs.
    Solve {
        #[command(flatten)]
        cube: CubeArgs,

        /// Pair order as color letter pairs, e.g. "go,gr,bo,br".
        #[arg(long, value_delimiter = ',')]
        pairs: Option<Vec<PairSlot>>,
    },
    /// Solve the cross with each of the six centers on the bottom.
    Cross {
        #[command(flatten)]
        cube: CubeArgs,
    },
    /// Print the cube and the next CFOP step.
    Show {
        #[command(flatten)]
        cube: CubeArgs,
    },
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Facelets(#[from] FaceletError),
    #[error(transparent)]
    Moves(#[from] ParseMoveError),
    #[error(transparent)]
    Goal(#[from] GoalError),
    #[error(transparent)]
    Solve(#[from] SolveError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let result = match &cli.command {
        Command::Solve { cube, pairs } => run_solve(&cli, cube, pairs.as_deref()),
        Command::Cross { cube } => run_cross(&cli, cube),
        Command::Show { cube } => run_show(cube),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

impl Cli {
    fn solver(&self) -> Solver {
        let options = SearchOptions::default()
            .with_len_weight(self.len_weight)
            .with_flip_penalty_weight(self.flip_weight);
        Solver::new(
            SolverConfig::default()
                .with_cross(options.with_depth_cap(self.depth_cap))
                .with_pairs(options.with_depth_cap(self.pair_depth_cap)),
        )
    }
}

impl CubeArgs {
    /// The starting cube with the scramble applied.
    fn build(&self) -> Result<Cube, CliError> {
        let mut cube = match &self.facelets {
            Some(faces) => Cube::from_facelets(faces.as_slice())?,
            None => Cube::solved(),
        };
        cube.apply_all(&parse_moves(&self.scramble)?);
        Ok(cube)
    }
}

/// Solves cross and F2L, printing each stage as it is reported.
fn run_solve(cli: &Cli, args: &CubeArgs, pairs: Option<&[PairSlot]>) -> Result<(), CliError> {
    let mut cube = args.build()?;
    let report = cli.solver().solve(&mut cube, pairs)?;

    for stage in report.stages() {
        println!("{stage}");
    }
    let moves = report.moves();
    println!();
    println!("Total: {} moves", moves.len());
    println!("{}", format_moves(&moves));
    println!();
    print!("{}", format_show(&cube)?);
    Ok(())
}

/// Solves the cross on every face and prints per-face results with averages.
fn run_cross(cli: &Cli, args: &CubeArgs) -> Result<(), CliError> {
    let cube = args.build()?;
    let reports = cli.solver().cross_per_face(&cube)?;
    print!("{}", format_cross_table(&reports));
    Ok(())
}

fn run_show(args: &CubeArgs) -> Result<(), CliError> {
    print!("{}", format_show(&args.build()?)?);
    Ok(())
}

fn format_show(cube: &Cube) -> Result<String, CliError> {
    Ok(format!("{}\nNext step: {}\n", cube.format_net(), progress(cube)?))
}

fn format_cross_table(reports: &[FaceReport]) -> String {
    let mut output = String::new();
    for report in reports {
        let rotations: Vec<String> = report.rotations.iter().map(ToString::to_string).collect();
        let moves = if report.cross.moves.is_empty() {
            "(solved)".to_owned()
        } else {
            format_moves(&report.cross.moves)
        };
        output.push_str(&format!(
            "{} down {:<3} {moves} [{} moves, {} expanded]\n",
            report.down,
            rotations.join(" "),
            report.cross.moves.len(),
            report.cross.stats.expanded
        ));
    }

    if !reports.is_empty() {
        let count = reports.len();
        let total_moves: usize = reports.iter().map(|r| r.cross.moves.len()).sum();
        let total_expanded: usize = reports.iter().map(|r| r.cross.stats.expanded).sum();
        let total_time: Duration = reports.iter().map(|r| r.cross.elapsed).sum();
        output.push_str(&format!(
            "Average: {:.2} moves, {:.1} expanded, {:.2?} per face\n",
            total_moves as f64 / count as f64,
            total_expanded as f64 / count as f64,
            total_time / count as u32
        ));
    }
    output
}
