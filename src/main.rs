use minish::Interpreter;
use minish::config::{Cli, ShellConfig};

fn main() -> anyhow::Result<()> {
    let cli: Cli = argh::from_env();
    let config = ShellConfig::from_env(cli)?;
    minish::log::set_max_level(config.log_level);

    let mut shell = Interpreter::new(&config);
    minish::info!(
        "{} entries on the search path, working directory {:?}",
        shell.index().len(),
        shell.state().current_dir
    );

    if config.commands.is_empty() {
        shell.repl()
    } else {
        shell.run_lines(config.commands.as_slice(), &mut std::io::stdout().lock())
    }
}
