mod command;
mod record;
mod util;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    command::run()
}
