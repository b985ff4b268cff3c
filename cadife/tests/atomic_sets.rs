use cadife::parser::build_cnf;
use cadife::{AnalysisError, AtomicSetComputation, Cnf, EnumerationOracle};
use file_diff::diff_files;
use itertools::Itertools;
use std::fs::{self, File};
use std::path::Path;

fn load(path: &str) -> Cnf {
    build_cnf(Path::new(path)).unwrap()
}

#[test]
fn atomic_sets_of_model() {
    let cnf = load("./tests/data/model.dimacs");
    let atomic_sets = AtomicSetComputation::new()
        .compute(&EnumerationOracle::default(), &cnf)
        .unwrap();

    assert_eq!(
        atomic_sets.to_vec(),
        vec![vec![1, 2], vec![3, -4, 5], vec![6, 7], vec![8]]
    );

    let mut text = Vec::new();
    atomic_sets.write_text(&mut text).unwrap();
    assert_eq!(
        String::from_utf8(text).unwrap(),
        "Root Base\nGui -Cli Theme\nLogging Debug\nExtra\n"
    );
}

#[test]
fn atomic_sets_of_model_as_csv() {
    let cnf = load("./tests/data/model.dimacs");
    let atomic_sets = AtomicSetComputation::new()
        .compute(&EnumerationOracle::default(), &cnf)
        .unwrap();

    let csv_out = "./tests/data/model_atomic_sets_out.csv";
    atomic_sets.write_csv(File::create(csv_out).unwrap()).unwrap();

    let mut should = File::open("./tests/data/model_atomic_sets.csv").unwrap();
    let mut is = File::open(csv_out).unwrap();

    // diff_files is true if the files are identical
    assert!(diff_files(&mut should, &mut is));
    let _res = fs::remove_file(csv_out);
}

#[test]
fn omission_flags() {
    let cnf = load("./tests/data/model.dimacs");
    let oracle = EnumerationOracle::default();

    let without_core = AtomicSetComputation::new()
        .omit_core(true)
        .compute(&oracle, &cnf)
        .unwrap();
    assert_eq!(
        without_core.to_vec(),
        vec![vec![3, -4, 5], vec![6, 7], vec![8]]
    );

    let without_singles = AtomicSetComputation::new()
        .omit_single_sets(true)
        .compute(&oracle, &cnf)
        .unwrap();
    assert_eq!(
        without_singles.to_vec(),
        vec![vec![1, 2], vec![3, -4, 5], vec![6, 7]]
    );
}

#[test]
fn variables_of_interest_by_name() {
    let cnf = load("./tests/data/model.dimacs");
    let variables = ["Extra", "Theme", "Gui"]
        .iter()
        .map(|name| cnf.variable_map.variable(name).unwrap())
        .collect_vec();

    let atomic_sets = AtomicSetComputation::new()
        .variables_of_interest(variables)
        .compute(&EnumerationOracle::default(), &cnf)
        .unwrap();

    assert_eq!(
        atomic_sets.to_vec(),
        vec![vec![1, 2], vec![8], vec![3, -4, 5]]
    );
}

#[test]
fn equivalent_variables_never_stand_alone() {
    let cnf = load("./tests/data/equivalence.dimacs");
    let atomic_sets = AtomicSetComputation::new()
        .compute(&EnumerationOracle::default(), &cnf)
        .unwrap();

    assert_eq!(atomic_sets.to_vec(), vec![vec![], vec![1, 2]]);
    assert!(atomic_sets.iter().all(|set| set.len() != 1));
}

#[test]
fn free_variable() {
    let cnf = load("./tests/data/free.dimacs");
    let oracle = EnumerationOracle::default();

    let with_singles = AtomicSetComputation::new()
        .omit_core(true)
        .compute(&oracle, &cnf)
        .unwrap();
    assert_eq!(with_singles.to_vec(), vec![vec![1]]);

    let without_singles = AtomicSetComputation::new()
        .omit_core(true)
        .omit_single_sets(true)
        .compute(&oracle, &cnf)
        .unwrap();
    assert!(without_singles.is_empty());
}

#[test]
fn unsatisfiable_formula() {
    let cnf = load("./tests/data/unsat.dimacs");

    assert!(matches!(
        AtomicSetComputation::new().compute(&EnumerationOracle::default(), &cnf),
        Err(AnalysisError::Unsatisfiable)
    ));
}
