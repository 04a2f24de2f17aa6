use crate::{ClusterError, Dataset, Primitive, Result};
use std::{fs::File, io::{BufRead, BufReader}, path::Path};

fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | ',')
}

/// Parse one point per line. Fields are separated by any run of spaces, tabs or commas.
///
/// Points get the ids `1, 2, 3, ...` in the order they appear. Blank lines are skipped and
/// do not consume an id.
pub fn read_dataset<T: Primitive, R: BufRead>(reader: R) -> Result<Dataset<T>> {
    let mut rows = Vec::new();
    for (line_idx, line) in reader.lines().enumerate() {
        let line = line?;
        let coords = line.trim_end_matches(['\r', '\n'])
            .split(is_separator)
            .filter(|field| !field.is_empty())
            .map(|field| field.parse::<f64>()
                .map(T::constant)
                .map_err(|source| ClusterError::Parse { line: line_idx + 1, field: field.to_string(), source }))
            .collect::<Result<Vec<T>>>()?;
        if !coords.is_empty() {
            rows.push(coords);
        }
    }
    Ok(Dataset::from_rows(rows))
}

/// Load a dataset from a delimited text file, see [`read_dataset`].
pub fn load_dataset<T: Primitive>(path: impl AsRef<Path>) -> Result<Dataset<T>> {
    read_dataset(BufReader::new(File::open(path)?))
}
