use std::io::{stdin, stdout};
use std::path::PathBuf;

use structopt::StructOpt;

use platsched::occupation::detect_conflicts;
use platsched::parser::{self, ScheduleSource};
use platsched::problem::{instance1, Problem};
use platsched::solver::resolve_conflicts;

#[derive(StructOpt, Debug)]
#[structopt(name = "platsched")]
struct Opt {
    /// Input mode: fixture, interactive or fetch
    #[structopt(name = "MODE", default_value = "interactive")]
    mode: String,

    /// Problem file (fixture mode) or schedule document (fetch mode)
    #[structopt(name = "FILE", parse(from_os_str))]
    file: Option<PathBuf>,

    /// Train ids to look up in the schedule document
    #[structopt(short, long)]
    trains: Vec<String>,

    /// Platform set to resolve against (fetch mode)
    #[structopt(short, long)]
    platforms: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
enum InputMode {
    Fixture,
    Interactive,
    Fetch,
}

pub fn main() {
    pretty_env_logger::init();
    let opt = Opt::from_args();

    let mode = match opt.mode.as_str() {
        "fixture" => InputMode::Fixture,
        "interactive" => InputMode::Interactive,
        "fetch" => InputMode::Fetch,
        _ => panic!("unknown input mode"),
    };

    println!("\nRAILWAY TIMETABLE CONFLICT DETECTION SYSTEM");
    println!("------------------------------------------");

    let mut problem = collect_problem(mode, &opt);

    let conflicts = detect_conflicts(&problem.trains);
    println!("\nDETECTED CONFLICTS");
    println!("-----------------");
    if conflicts.is_empty() {
        println!("No conflicts detected.");
    } else {
        for (a, b) in &conflicts {
            println!(
                "Train {} conflicts with Train {} on Platform {}",
                problem.trains[*a].id, problem.trains[*b].id, problem.trains[*a].platform
            );
        }
    }

    resolve_conflicts(&mut problem.trains, &problem.platforms);

    println!("\nUPDATED TIMETABLE (Resolved)");
    println!("----------------------------");
    for train in &problem.trains {
        println!("{}", train);
    }
}

fn collect_problem(mode: InputMode, opt: &Opt) -> Problem {
    match mode {
        InputMode::Fixture => match &opt.file {
            Some(file) => parser::read_problem_file(&file.to_string_lossy()).unwrap(),
            None => instance1(),
        },
        InputMode::Interactive => {
            let stdin = stdin();
            let stdout = stdout();
            parser::read_problem(&mut stdin.lock(), &mut stdout.lock()).unwrap()
        }
        InputMode::Fetch => {
            let file = match &opt.file {
                Some(file) => file,
                None => panic!("fetch mode needs a schedule document"),
            };
            let text = std::fs::read_to_string(file).unwrap();
            let source = ScheduleSource::from_json(&text).unwrap();

            let mut trains = Vec::new();
            for id in &opt.trains {
                match source.lookup(id) {
                    Some(train) => trains.push(train),
                    None => println!("No schedule entry for train {}", id),
                }
            }
            Problem {
                platforms: opt.platforms.clone(),
                trains,
            }
        }
    }
}
