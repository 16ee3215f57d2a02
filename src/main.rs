//! code-excerpt: Turn a source tree into a bounded code excerpt
//!
//! This tool scans a source tree, strips comments, orders files so the
//! excerpt opens with program entry logic and closes with tests, and fits
//! the result into a fixed line/page budget.

use anyhow::Result;

fn main() -> Result<()> {
    code_excerpt::cli::run()
}
