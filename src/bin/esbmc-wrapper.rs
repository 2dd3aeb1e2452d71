use anyhow::Result;

fn main() -> Result<()> {
    bmcwrap::cli::run()
}
