use venue_calendar::Cli;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    Cli::run()
}
