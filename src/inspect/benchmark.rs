/// Benchmark source inspection
use crate::config::types::{Result, WrapperError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Thread-creation primitive whose presence marks a concurrent benchmark
pub const THREAD_CREATE_TOKEN: &[u8] = b"pthread_create";

/// Scan a benchmark line by line for the thread-creation primitive.
///
/// The scan works on raw bytes so non-UTF-8 sources and `\r\n` line endings
/// give the same answer as their plain `\n` counterparts.
pub fn benchmark_uses_threads(path: &Path) -> Result<bool> {
    let unreadable = |source: std::io::Error| WrapperError::BenchmarkUnreadable {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(unreadable)?;
    let reader = BufReader::new(file);

    for line in reader.split(b'\n') {
        let line = line.map_err(unreadable)?;
        if contains_token(&line, THREAD_CREATE_TOKEN) {
            log::debug!("Thread creation found in {}", path.display());
            return Ok(true);
        }
    }

    Ok(false)
}

fn contains_token(line: &[u8], token: &[u8]) -> bool {
    line.windows(token.len()).any(|window| window == token)
}
