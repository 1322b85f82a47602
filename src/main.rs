use clap::Parser;

use school_orm::cli::Args;
use school_orm::db::DatabaseConfig;
use school_orm::orm::SchoolContext;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = DatabaseConfig::resolve(args.db.as_deref())?;

    // The context is dropped, closing the engine, before anything is printed
    let output = {
        let ctx = SchoolContext::connect(&config)
            .map_err(|e| format!("{}: {}", config.describe(), e))?;
        args.command.unwrap_or_default().run(&ctx, args.format)?
    };

    println!("{}", output);
    Ok(())
}
