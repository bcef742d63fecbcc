use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use clap::Parser;

use stencil::{rules::ObjectPath, Engine};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Engine definition file path (ron)
    #[arg(short, long, group = "engine_def")]
    config: Option<PathBuf>,

    /// Directly provided engine definition (ron format)
    #[arg(long, group = "engine_def")]
    config_string: Option<String>,

    /// Json file bound as object path rule after configured rules
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// File to fill. Reads from stdin if unset
    #[arg(short, long)]
    file: Option<PathBuf>,
}

fn read_engine(args: &Args) -> Result<Engine, String> {
    let engine_string = if let Some(config) = &args.config {
        fs::read_to_string(config).map_err(|err| format!("reading config file: {err}"))?
    } else {
        args.config_string
            .clone()
            .ok_or("expected either --config or --config-string")?
    };

    ron::from_str::<Engine>(&engine_string).map_err(|err| format!("parsing config: {err}"))
}

fn read_data(path: &Path) -> Result<ObjectPath, String> {
    let content = fs::read_to_string(path).map_err(|err| format!("reading data file: {err}"))?;

    let value = serde_json::from_str::<serde_json::Value>(&content)
        .map_err(|err| format!("parsing data file: {err}"))?;

    ObjectPath::try_from(value).map_err(|err| format!("binding data: {err}"))
}

fn read_input(file: Option<&Path>) -> Result<String, String> {
    match file {
        Some(filename) => {
            fs::read_to_string(filename).map_err(|err| format!("reading input file: {err}"))
        }
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .map_err(|err| format!("reading stdin: {err}"))?;

            Ok(input)
        }
    }
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let mut engine = read_engine(&args)?;

    if let Some(data) = &args.data {
        engine.rules_mut().push(Box::new(read_data(data)?));
    }

    let input = read_input(args.file.as_deref())?;

    print!("{}", engine.process(&input));

    Ok(())
}
