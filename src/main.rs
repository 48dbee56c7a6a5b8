use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = ordir::cli::parse();
    app::run(args)
}
