#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use slip21::util::hex;

fn main() {
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(global_verbose_definition())
        .subcommand(derive_command_definition())
        .subcommand(check_command_definition())
        .get_matches();

    configure_logger(&matches);

    let result = match matches.subcommand() {
        (DERIVE_COMMAND, Some(matches)) => subcommand_derive(matches),
        (CHECK_COMMAND, Some(matches)) => subcommand_check(matches),
        _ => Err(matches.usage().to_owned()),
    };

    if let Err(msg) = result {
        eprintln!("{}", msg);
        ::std::process::exit(1)
    }
}

/* ------------------------------------------------------------------------- *
 *            Global options and helpers                                     *
 * ------------------------------------------------------------------------- */

const APPLICATION_ENVIRONMENT_SEED: &str = "SLIP21_SEED";

fn global_verbose_definition<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("VERBOSE")
        .short("v")
        .multiple(true)
        .global(true)
        .help("increase the log verbosity, repeat for more")
}
fn global_verbose_option<'a>(matches: &ArgMatches<'a>) -> log::LevelFilter {
    match matches.occurrences_of("VERBOSE") {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn configure_logger<'a>(matches: &ArgMatches<'a>) {
    let mut builder = env_logger::Builder::from_default_env();
    if ::std::env::var_os("RUST_LOG").is_none() || matches.occurrences_of("VERBOSE") > 0 {
        builder.filter_level(global_verbose_option(matches));
    }
    builder.init();
}

fn path_argument_definition<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("PATH")
        .help("the derivation path, e.g. `m/SLIP-0021/Master encryption key`")
}

/* ------------------------------------------------------------------------- *
 *            Derive command                                                 *
 * ------------------------------------------------------------------------- */

const DERIVE_COMMAND: &str = "derive";

fn derive_argument_seed_definition<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("SEED")
        .long("seed")
        .takes_value(true)
        .value_name("HEX")
        .required(true)
        .env(APPLICATION_ENVIRONMENT_SEED)
        .hide_env_values(true)
        .help("the hexadecimal seed the hierarchy is derived from")
}
fn derive_argument_seed_match<'a>(matches: &ArgMatches<'a>) -> Result<Vec<u8>, String> {
    match matches.value_of("SEED") {
        Some(seed) => hex::decode(seed).map_err(|err| format!("invalid seed: {}", err)),
        // `SEED` is required, clap already refused the command line
        None => unreachable!(),
    }
}

fn derive_command_definition<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name(DERIVE_COMMAND)
        .about("print the hexadecimal symmetric key at the given path")
        .arg(derive_argument_seed_definition())
        .arg(path_argument_definition().default_value(slip21::PREFIX))
}

fn subcommand_derive<'a>(matches: &ArgMatches<'a>) -> Result<(), String> {
    let seed = derive_argument_seed_match(matches)?;
    let path = matches.value_of("PATH").unwrap_or(slip21::PREFIX);

    info!("deriving symmetric key at `{}`", path);
    let node = slip21::derive_for_path(path, &seed).map_err(|err| err.to_string())?;
    println!("{}", hex::encode(node.symmetric_key()));
    Ok(())
}

/* ------------------------------------------------------------------------- *
 *            Check command                                                  *
 * ------------------------------------------------------------------------- */

const CHECK_COMMAND: &str = "check";

fn check_command_definition<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name(CHECK_COMMAND)
        .about("tell whether the given derivation path is well formed")
        .arg(path_argument_definition().required(true))
}

fn subcommand_check<'a>(matches: &ArgMatches<'a>) -> Result<(), String> {
    let path = matches.value_of("PATH").unwrap_or_default();
    match slip21::path::validate(path) {
        Ok(()) => {
            println!("valid");
            Ok(())
        }
        Err(err) => {
            debug!("`{}`: {}", path, err);
            Err("invalid".to_owned())
        }
    }
}
