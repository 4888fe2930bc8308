#[macro_use]
extern crate log;

use std::process;

use clap::{App, Arg, ArgMatches};
use log::LevelFilter;
use smbus::{capability, Bus, BusId};

fn setup_logger(verbosity: u64) -> Result<(), fern::InitError> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;

    Ok(())
}

fn run(matches: &ArgMatches) -> smbus::Result<()> {
    // BusId parsing cannot fail, clap guarantees the value is present
    let id: BusId = matches
        .value_of("BUS")
        .unwrap_or_default()
        .parse()
        .unwrap_or_else(|never| match never {});
    info!("Querying {}", id);

    let mut bus = Bus::open_path(id.path())?;
    let funcs = bus.funcs();

    if matches.is_present("raw") {
        println!("{}", funcs);
    } else {
        println!("Functionalities of {} ({}):", bus.path().display(), funcs);
        for name in funcs.names() {
            println!("  {}", name);
        }
        if funcs.unrecognized() != 0 {
            println!("  {}", capability::name_of(funcs.unrecognized()));
        }
    }

    bus.close()
}

fn main() {
    let matches = App::new("smbus-funcs")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Lists the functionality an I2C adapter reports")
        .arg(
            Arg::with_name("BUS")
                .help("Bus number or device path, e.g. 1 or /dev/i2c-1")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("raw")
                .long("raw")
                .help("Prints only the functionality mask"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Raises the log level, repeat for more"),
        )
        .get_matches();

    if let Err(error) = setup_logger(matches.occurrences_of("verbose")) {
        eprintln!("Error: could not set up logging: {}", error);
        process::exit(1);
    }

    trace!("Setting up main");

    match run(&matches) {
        Ok(()) => {}
        Err(error) => {
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    }
}
