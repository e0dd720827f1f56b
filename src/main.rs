use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = taskmate::cli::parse();
    app::run(args)
}
