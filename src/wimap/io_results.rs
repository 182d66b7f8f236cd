// Primitives for reading the election results (CSV files).

use std::fs::File;
use std::io::Read;

use county_choropleth::builder::ResultsBuilder;

use crate::wimap::*;

pub fn read_results_file(path: &str) -> MapResult<ResultsTable> {
    info!("Attempting to read results file {:?}", path);
    let file = File::open(path).context(FileNotFoundSnafu { path })?;
    read_results(file, path)
}

/// Reads results from any source. `path` is only used in error messages.
///
/// The first line is a header. Names are kept verbatim; for a repeated name the last
/// row wins.
pub fn read_results<R: Read>(input: R, path: &str) -> MapResult<ResultsTable> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let mut builder = ResultsBuilder::new();
    let mut num_rows: usize = 0;
    for (idx, line_r) in rdr.into_records().enumerate() {
        let line = line_r.context(CsvReadSnafu { path })?;
        // The header takes the first line.
        let lineno = line
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);
        debug!("read_results: lineno: {:?} row: {:?}", lineno, line);

        if line.len() < 4 {
            return MalformedResultsSnafu {
                path,
                line: lineno,
                message: format!("expected 4 fields, found {}", line.len()),
            }
            .fail();
        }
        if let Some(extra) = line.iter().skip(4).find(|s| !s.trim().is_empty()) {
            return MalformedResultsSnafu {
                path,
                line: lineno,
                message: format!("unexpected field {:?} after the vote counts", extra),
            }
            .fail();
        }

        let name = &line[0];
        let votes = |idx: usize, what: &str| -> MapResult<u64> {
            let field = &line[idx];
            field.trim().parse::<u64>().ok().context(MalformedResultsSnafu {
                path,
                line: lineno,
                message: format!("{} votes for {:?}: {:?} is not a vote count", what, name, field),
            })
        };
        let record = ResultRecord {
            name: name.to_string(),
            republican_votes: votes(1, "republican")?,
            democrat_votes: votes(2, "democrat")?,
            other_votes: votes(3, "other")?,
        };
        builder.add_record(record);
        num_rows += 1;
    }

    let table = builder.build();
    info!(
        "Read {} rows, {} counties from {:?}",
        num_rows,
        table.len(),
        path
    );
    if table.replaced_rows() > 0 {
        warn!(
            "{} rows of {:?} were replaced by a later row for the same county",
            table.replaced_rows(),
            path
        );
    }
    Ok(table)
}
