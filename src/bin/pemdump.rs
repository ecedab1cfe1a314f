//! Prints the PEM-encoded objects in a file as text.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use log::error;
use structopt::StructOpt;


//------------ main ----------------------------------------------------------

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn")
    ).init();
    if let Err(()) = Options::from_args().run() {
        std::process::exit(1)
    }
}


//------------ Options -------------------------------------------------------

#[derive(StructOpt)]
#[structopt(
    name="pemdump",
    about="Prints PEM-encoded certificates, requests, and keys as text."
)]
struct Options {
    /// Write the text to this file instead of standard output.
    #[structopt(long, parse(from_os_str))]
    out: Option<PathBuf>,

    /// The file to read PEM blocks from.
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

impl Options {
    fn run(self) -> Result<(), ()> {
        let data = read_file(&self.input)?;
        let text = match pemdump::dump(&data) {
            Ok(text) => text,
            Err(err) => {
                error!("{}: {}", self.input.display(), err);
                return Err(())
            }
        };
        match self.out {
            Some(ref path) => {
                let mut file = match File::create(path) {
                    Ok(file) => file,
                    Err(err) => {
                        error!(
                            "Failed to create {}: {}", path.display(), err
                        );
                        return Err(())
                    }
                };
                write_text(&mut file, &text).map_err(|err| {
                    error!("Failed to write {}: {}", path.display(), err)
                })
            }
            None => {
                write_text(&mut io::stdout().lock(), &text).map_err(|err| {
                    error!("Failed to write output: {}", err)
                })
            }
        }
    }
}


//------------ Helper Functions ----------------------------------------------

fn read_file(path: &Path) -> Result<Vec<u8>, ()> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            error!("Failed to open {}: {}", path.display(), err);
            return Err(())
        }
    };
    let mut data = Vec::new();
    if let Err(err) = file.read_to_end(&mut data) {
        error!("Failed to read {}: {}", path.display(), err);
        return Err(())
    }
    Ok(data)
}

fn write_text(target: &mut impl Write, text: &str) -> Result<(), io::Error> {
    target.write_all(text.as_bytes())?;
    target.flush()
}
