//! Thin CLI wrapper around the `solrecon` library crate.

use anyhow::Result;

fn main() -> Result<()> {
    let code = solrecon::entry_point::run_with_args(std::env::args().skip(1).collect())?;
    std::process::exit(code);
}
