use r1cs_compiler::cfg::{
    self,
    clap::{self, Parser, ValueEnum},
    CompileOpt,
};
use r1cs_compiler::front::{
    circuits::{hint_functions, Sample},
    compile,
};
use r1cs_compiler::target::r1cs::Solver;

#[derive(Debug, Parser)]
#[command(name = "r1cs", about = "Compiles and solves a sample circuit")]
struct Options {
    /// Which circuit
    #[arg(long, value_enum, default_value = "cubic")]
    circuit: CircuitKind,
    /// Rounds of the square-chain circuit
    #[arg(long, default_value = "8")]
    size: usize,
    /// The secret input
    #[arg(long, default_value = "3")]
    x: u64,
    /// Do not solve the constraint system
    #[arg(long)]
    no_solve: bool,
    /// Print the constraint system as JSON
    #[arg(long)]
    json: bool,
    #[command(flatten)]
    compile: CompileOpt,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, ValueEnum)]
enum CircuitKind {
    Cubic,
    Reciprocal,
    SquareChain,
}

fn main() {
    env_logger::Builder::from_default_env()
        .format_level(false)
        .format_timestamp(None)
        .init();
    let opts = Options::parse();
    cfg::set(&opts.compile);
    let cfg = cfg::cfg();

    let sample = match opts.circuit {
        CircuitKind::Cubic => Sample::Cubic,
        CircuitKind::Reciprocal => Sample::Reciprocal,
        CircuitKind::SquareChain => Sample::SquareChain(opts.size),
    };
    let mut circuit = sample.circuit();
    let r1cs = match compile(cfg.field().clone(), cfg.r1cs.clone(), &mut *circuit) {
        Ok(r1cs) => r1cs,
        Err(e) => {
            eprintln!("Compilation failed: {}", e);
            std::process::exit(1);
        }
    };

    if opts.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&r1cs).expect("serialize constraint system")
        );
    } else {
        println!(
            "{} constraints, {} levels; {} public, {} secret, {} internal wires",
            r1cs.constraints().len(),
            r1cs.levels().len(),
            r1cs.num_public(),
            r1cs.num_secret(),
            r1cs.num_internal()
        );
        for c in r1cs.counters() {
            println!("{}", c);
        }
    }

    if !opts.no_solve {
        let fns = hint_functions();
        let (public, secret) = sample.inputs(cfg.field(), opts.x);
        let solver = Solver::new(&r1cs, &fns).parallel(cfg.solver.parallel);
        match solver.solve(&public, &secret) {
            Ok(values) => {
                if let Err(e) = r1cs.check_all(&values) {
                    eprintln!("Witness check failed: {}", e);
                    std::process::exit(1);
                }
                println!("Solved {} wires", values.len());
            }
            Err(e) => {
                eprintln!("Solving failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}
