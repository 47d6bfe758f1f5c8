use clap::Parser;
use java2objc_gen::interface::cli::{Cli, Commands, GenerateArgs};
use java2objc_gen::interface::output::print_usage_info;
use java2objc_gen::interface::{generate_from_config, init_config, resolve_config};
use java2objc_gen::GenerateConfig;

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Init {
            config_file, force, ..
        } => {
            let config = GenerateConfig::from(&cli.command);
            init_config(config_file, &config, *force).map(|()| {
                println!("✓ Wrote {}", config_file.display());
                true
            })
        }
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Returns false when some unit failed to generate.
fn run_generate(args: &GenerateArgs) -> java2objc_gen::Result<bool> {
    let config = resolve_config(args)?;
    let summary = generate_from_config(&config)?;

    if config.is_verbose() {
        let suffix = &config.translation.implementation_suffix;
        let units = summary.files.iter().filter(|f| f.ends_with(suffix.as_str())).count();
        print_usage_info(&config.output_path, &summary.files, units);
    }
    Ok(summary.is_success())
}
