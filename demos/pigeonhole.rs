use clap::Parser;

use fd_solver::solver::{Solver, SolverConfig};
use fd_solver::types::Var;

/// Pairwise-distinct registers: satisfiable iff `vars <= 2^width`.
#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of registers.
    #[arg(long, value_name = "INT", default_value = "5")]
    vars: usize,

    /// Register width in bits.
    #[arg(long, value_name = "INT", default_value = "2")]
    width: u32,

    /// Pin the first registers to the values `0, 1, ...`.
    #[arg(long, value_name = "INT", default_value = "0")]
    fixed: usize,

    /// Disable the pigeonhole shortcut.
    #[arg(long)]
    no_pigeonhole: bool,

    /// Log level (off, error, warn, info, debug, trace).
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: simplelog::LevelFilter,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        args.log_level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    println!("args = {:?}", args);

    let time_total = std::time::Instant::now();

    let regs: Vec<Var> = (0..args.vars).map(|i| Var::new(format!("r{}", i), args.width)).collect();

    let config = SolverConfig::default().with_pigeonhole(!args.no_pigeonhole);
    let mut solver = Solver::with_config(config);
    for r in &regs {
        solver.add_variable(r);
    }
    for (i, x) in regs.iter().enumerate() {
        for y in &regs[i + 1..] {
            solver.add_var_equation(x, y, false);
        }
    }
    for (value, r) in regs.iter().take(args.fixed).enumerate() {
        solver.add_value_equation(r, value as u64, true);
    }

    println!("{}", solver);

    let sat = solver.solve();
    println!("{} registers of {} bits: {}", args.vars, args.width, if sat { "SAT" } else { "UNSAT" });

    println!("Total time: {:.3} s", time_total.elapsed().as_secs_f64());
    Ok(())
}
