use crate::util::format_assignment;
use cadife_cnf::{Assignment, Cnf, Literal, VariableMap};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::io::{self, Write};

/// The outcome of an atomic set computation: the sets in the order they were found,
/// together with the variable universe they refer to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtomicSets {
    sets: Vec<Assignment>,
    num_variables: usize,
    variable_map: VariableMap,
}

impl AtomicSets {
    pub fn new(sets: Vec<Assignment>, cnf: &Cnf) -> Self {
        Self {
            sets,
            num_variables: cnf.num_variables,
            variable_map: cnf.variable_map.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Assignment> {
        self.sets.iter()
    }

    pub fn variable_map(&self) -> &VariableMap {
        &self.variable_map
    }

    /// The literals of every set.
    pub fn to_vec(&self) -> Vec<Vec<Literal>> {
        self.sets
            .iter()
            .map(|set| set.literals().to_vec())
            .collect()
    }

    pub fn into_sets(self) -> Vec<Assignment> {
        self.sets
    }

    /// Writes one set per line, naming variables where possible.
    pub fn write_text(&self, mut output: impl Write) -> io::Result<()> {
        for set in self.sets.iter() {
            writeln!(output, "{}", format_assignment(set, &self.variable_map))?;
        }
        Ok(())
    }

    /// Writes one row per set with a column per variable,
    /// holding `+` or `-` for the variables in the set.
    pub fn write_csv(&self, output: impl Write) -> io::Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(output);

        let mut header = vec![String::from("Set")];
        header.extend(
            (1..=self.num_variables).map(|variable| self.variable_map.display_variable(variable)),
        );
        writer.write_record(&header)?;

        for (index, set) in self.sets.iter().enumerate() {
            let mut row = vec![String::new(); self.num_variables + 1];
            row[0] = index.to_string();
            for &literal in set.literals() {
                if let Some(cell) = row.get_mut(literal.unsigned_abs()) {
                    *cell = String::from(if literal.is_positive() { "+" } else { "-" });
                }
            }
            writer.write_record(&row)?;
        }

        writer.flush()
    }
}

impl Serialize for AtomicSets {
    /// A list of sets, each a list of literals by name.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut sequence = serializer.serialize_seq(Some(self.sets.len()))?;
        for set in self.sets.iter() {
            let named: Vec<String> = set
                .literals()
                .iter()
                .map(|&literal| self.variable_map.display_literal(literal))
                .collect();
            sequence.serialize_element(&named)?;
        }
        sequence.end()
    }
}
