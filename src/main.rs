use clap::{Arg, ArgAction, Command};
use log::LevelFilter;
use std::path::PathBuf;
use gis_regions::{default_document_path, process_file, TaggingOptions};

fn main() {
    let matches = Command::new("GIS Regions")
        .version("1.0")
        .author("Jesper Fjellin")
        .about("Tags every feature of a GeoJSON collection with the continent it lies on")
        .arg(
            Arg::new("input")
                .index(1)
                .value_name("INPUT")
                .help("GeoJSON file to update (defaults to world.geojson one directory above the executable)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Write the tagged collection here instead of overwriting the input"),
        )
        .arg(
            Arg::new("name-property")
                .long("name-property")
                .value_name("KEY")
                .default_value("name")
                .help("Property holding each feature's display name"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Tag and report without writing anything"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .conflicts_with("quiet")
                .help("Log every feature"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Only log warnings and errors"),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else if matches.get_flag("quiet") {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    // Fall back to the sibling-directory convention
    let input = match matches.get_one::<String>("input") {
        Some(path) => PathBuf::from(path),
        None => match default_document_path() {
            Ok(path) => path,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    };

    let output = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .unwrap_or_else(|| input.clone());

    let options = TaggingOptions {
        name_property: matches
            .get_one::<String>("name-property")
            .cloned()
            .unwrap_or_else(|| "name".to_string()),
    };

    let dry_run = matches.get_flag("dry-run");
    let result = process_file(&input, (!dry_run).then_some(output.as_path()), &options);

    match result {
        Ok(summary) if dry_run => {
            println!("Dry run: {} features tagged, {} unknown.", summary.features, summary.degraded())
        }
        Ok(_) => println!("Updated {} with region properties.", output.display()),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
