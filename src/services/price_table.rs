use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;
use tracing::{info, warn};

/// Static price data loaded once at startup from a `static-data` file of
/// comma-separated `id,price` lines. Loading failures are logged and the
/// table stays empty; the running service only reads it for diagnostics, the
/// product pricing rule never consults it.
#[derive(Debug, Default)]
pub struct PriceTable {
    prices: HashMap<u32, Decimal>,
}

impl PriceTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the table from disk. A missing file is normal (the benchmark
    /// harness does not always ship one); malformed lines are skipped.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.is_file() {
            info!(path = %path.display(), "No static price data, starting with empty table");
            return Self::empty();
        }

        let start = Instant::now();
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read static price data");
                return Self::empty();
            }
        };

        let mut prices = HashMap::new();
        for (lineno, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match Self::parse_line(line) {
                Some((id, price)) => {
                    prices.insert(id, price);
                }
                None => {
                    warn!(line = lineno + 1, "Skipping malformed price line");
                }
            }
        }

        info!(
            entries = prices.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Static price data loaded"
        );
        Self { prices }
    }

    fn parse_line(line: &str) -> Option<(u32, Decimal)> {
        let (id, price) = line.split_once(',')?;
        let id = id.trim().parse().ok()?;
        let price = Decimal::from_str(price.trim()).ok()?;
        Some((id, price))
    }

    pub fn get(&self, id: u32) -> Option<Decimal> {
        self.prices.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
