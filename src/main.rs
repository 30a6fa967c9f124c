use build_identity::cli::{run, Invocation};
use build_identity::util::log::log_init_with_config;
use build_identity::{load_config, BUILD};

fn main() -> anyhow::Result<()> {
    let invocation = Invocation::parse(std::env::args().skip(1))?;

    let loaded = load_config(invocation.config_path.as_deref())?;
    let _guard = log_init_with_config(&loaded.config.logging)?;
    loaded.log_warnings();

    run(&invocation, &loaded.config, &BUILD, &mut std::io::stdout().lock())
}
