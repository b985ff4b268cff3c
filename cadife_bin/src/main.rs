use cadife::analysis::{core_dead_with_assumptions, get_solution, has_solution};
use cadife::parser::{build_cnf, parse_dimacs};
use cadife::{
    AnalysisError, AtomicSetComputation, AtomicSets, CadicalOracle, Cnf, EnumerationOracle,
    Literal, SatOracle, Variable,
};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::fs::File;
use std::io::{self, stdin, stdout, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "cadife", version, arg_required_else_help(true))]
struct Cli {
    /// Input path of a formula in DIMACS CNF, stdin when not given.
    /// Variables may be named by comments of the form 'c INDEX NAME'.
    #[arg(short, long, global = true, verbatim_doc_comment)]
    input: Option<PathBuf>,

    /// Output path, stdout when not given.
    #[arg(short, long, global = true, verbatim_doc_comment)]
    output: Option<PathBuf>,

    /// Time limit for each query of the SAT oracle in seconds.
    /// 0 means no time limit.
    #[arg(short, long, global = true, default_value_t = 0, verbatim_doc_comment)]
    timeout: u64,

    /// The SAT oracle answering the queries.
    #[arg(long, global = true, value_enum, default_value_t = OracleKind::Cadical)]
    oracle: OracleKind,

    /// Path to the cadical binary.
    #[arg(long, global = true, env = "CADIFE_CADICAL", default_value = "cadical")]
    cadical: PathBuf,

    /// Path to the cadiback binary.
    #[arg(long, global = true, env = "CADIFE_CADIBACK", default_value = "cadiback")]
    cadiback: PathBuf,

    /// How to print the result.
    #[arg(short, long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Choose one of the available
    #[clap(subcommand)]
    operation: Operation,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OracleKind {
    /// Runs cadical and cadiback as external processes.
    Cadical,
    /// Enumerates all assignments. Only feasible for small formulas.
    Enumeration,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One set per line, literals separated by whitespace.
    Text,
    /// One row per set and one column per variable.
    Csv,
    /// A list of lists of literals.
    Json,
}

#[derive(Debug, Clone, Subcommand)]
enum Operation {
    /// Computes the atomic sets of the formula.
    /// The first set holds the core and dead variables.
    #[clap(verbatim_doc_comment)]
    AtomicSets {
        /// Omits sets with only one element.
        #[arg(long)]
        omit_singles: bool,
        /// Omits the set containing the core and dead variables.
        #[arg(long)]
        omit_core: bool,
        /// Restricts the computation to these variables, given by index or by name,
        /// and determines the order of the resulting sets.
        /// The default are all variables of the formula.
        #[arg(short, long, num_args = 0.., verbatim_doc_comment)]
        variables: Vec<String>,
    },
    /// Computes the core and dead variables.
    Core {
        /// Literals that are assumed to hold, given by index or by name.
        /// A leading '-' negates a literal.
        #[arg(short, long, num_args = 0.., allow_hyphen_values = true, verbatim_doc_comment)]
        assumptions: Vec<String>,
    },
    /// Computes one solution of the formula, 'false' if there is none.
    Solution,
    /// Checks whether the formula has a solution.
    HasSolution,
}

/// What an operation produced.
enum Outcome {
    Sets(AtomicSets),
    Flag(bool),
}

fn main() {
    let cli = Cli::parse();

    pretty_env_logger::init();

    if let Err(error) = run(cli) {
        eprintln!("{error}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AnalysisError> {
    let time = Instant::now();

    let cnf = if let Some(path) = &cli.input {
        build_cnf(path)?
    } else {
        let mut input = String::new();
        stdin().lock().read_to_string(&mut input)?;
        parse_dimacs(&input)?
    };

    info!(
        "Parsed {} variables and {} clauses in {:.3}s.",
        cnf.num_variables,
        cnf.clauses.len(),
        time.elapsed().as_secs_f32()
    );

    let oracle: Box<dyn SatOracle> = match cli.oracle {
        OracleKind::Cadical => Box::new(CadicalOracle::new(
            cli.cadical.clone(),
            cli.cadiback.clone(),
        )),
        OracleKind::Enumeration => Box::new(EnumerationOracle::default()),
    };
    let timeout = Duration::from_secs(cli.timeout);

    let time = Instant::now();
    let outcome = match &cli.operation {
        Operation::AtomicSets {
            omit_singles,
            omit_core,
            variables,
        } => {
            let variables = variables
                .iter()
                .map(|token| resolve_variable(&cnf, token))
                .collect::<Result<Vec<Variable>, AnalysisError>>()?;

            Outcome::Sets(
                AtomicSetComputation::new()
                    .variables_of_interest(variables)
                    .omit_core(*omit_core)
                    .omit_single_sets(*omit_singles)
                    .timeout(timeout)
                    .compute(&oracle, &cnf)?,
            )
        }
        Operation::Core { assumptions } => {
            let assumptions = assumptions
                .iter()
                .map(|token| resolve_literal(&cnf, token))
                .collect::<Result<Vec<Literal>, AnalysisError>>()?;

            let core = core_dead_with_assumptions(&oracle, &cnf, &assumptions, timeout)?;
            Outcome::Sets(AtomicSets::new(vec![core], &cnf))
        }
        Operation::Solution => match get_solution(&oracle, &cnf, timeout)? {
            Some(solution) => Outcome::Sets(AtomicSets::new(vec![solution], &cnf)),
            None => Outcome::Flag(false),
        },
        Operation::HasSolution => Outcome::Flag(has_solution(&oracle, &cnf, timeout)?),
    };

    info!("Runtime: {:.3}s.", time.elapsed().as_secs_f64());

    // nothing is written before the operation succeeded
    let mut writer: Box<dyn Write> = if let Some(path) = &cli.output {
        Box::new(BufWriter::new(File::create(path)?))
    } else {
        Box::new(BufWriter::new(stdout()))
    };

    match (outcome, cli.format) {
        (Outcome::Sets(sets), Format::Text) => sets.write_text(&mut writer)?,
        (Outcome::Sets(sets), Format::Csv) => sets.write_csv(&mut writer)?,
        (Outcome::Sets(sets), Format::Json) => {
            serde_json::to_writer(&mut writer, &sets).map_err(io::Error::from)?;
            writeln!(writer)?;
        }
        (Outcome::Flag(flag), _) => writeln!(writer, "{flag}")?,
    }

    writer.flush()?;
    Ok(())
}

/// Looks up a variable by name, falling back to its index.
fn resolve_variable(cnf: &Cnf, token: &str) -> Result<Variable, AnalysisError> {
    cnf.variable_map
        .resolve(token)
        .ok_or_else(|| AnalysisError::UnknownVariable(token.to_string()))
}

/// Like [resolve_variable], with a leading '-' negating the literal.
fn resolve_literal(cnf: &Cnf, token: &str) -> Result<Literal, AnalysisError> {
    // a name may itself start with '-'
    if let Some(variable) = cnf.variable_map.variable(token) {
        return Ok(variable as Literal);
    }

    match token.strip_prefix('-') {
        Some(negated) => resolve_variable(cnf, negated).map(|variable| -(variable as Literal)),
        None => resolve_variable(cnf, token).map(|variable| variable as Literal),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn cnf() -> Cnf {
        let mut cnf = Cnf::with_variables(3);
        cnf.variable_map.insert(2, "Gui");
        cnf
    }

    #[test]
    fn resolve_tokens() {
        let cnf = cnf();

        assert_eq!(resolve_variable(&cnf, "Gui").unwrap(), 2);
        assert_eq!(resolve_variable(&cnf, "3").unwrap(), 3);
        assert!(resolve_variable(&cnf, "Cli").is_err());

        assert_eq!(resolve_literal(&cnf, "-Gui").unwrap(), -2);
        assert_eq!(resolve_literal(&cnf, "-1").unwrap(), -1);
        assert_eq!(resolve_literal(&cnf, "Gui").unwrap(), 2);
    }

    #[test]
    fn cli_parses() {
        let cli = Cli::parse_from([
            "cadife",
            "-i",
            "model.dimacs",
            "--oracle",
            "enumeration",
            "-f",
            "csv",
            "atomic-sets",
            "--omit-singles",
            "-v",
            "Gui",
            "3",
        ]);

        assert_eq!(cli.oracle, OracleKind::Enumeration);
        assert_eq!(cli.format, Format::Csv);
        match cli.operation {
            Operation::AtomicSets {
                omit_singles,
                omit_core,
                variables,
            } => {
                assert!(omit_singles);
                assert!(!omit_core);
                assert_eq!(variables, vec!["Gui", "3"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn cli_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
