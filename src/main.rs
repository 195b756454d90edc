use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use nsfinfo::Error;
use nsfinfo::digest::{self, DigestSet};
use nsfinfo::formats::nsf::NsfHeader;
use nsfinfo::report::{OutputFormat, Report};

// sysexits(3)
const EX_USAGE: u8 = 64;
const EX_DATAERR: u8 = 65;
const EX_NOINPUT: u8 = 66;
const EX_OSERR: u8 = 71;
const EX_IOERR: u8 = 74;

/// Environment variable holding the log filter, e.g. `NSFINFO_LOG=debug`.
const LOG_ENV: &str = "NSFINFO_LOG";

const USAGE: &str = concat!(
    "Usage: nsfinfo [options] filename\n",
    "\n",
    "Options:\n",
    "  -J            JSON-formatted output\n",
    "  -d SET        digest pair: md5-sha256 (default) or md5-sha1\n",
    "  -h            print this message\n",
    "\n",
    env!("CARGO_PKG_REPOSITORY"),
    "\n",
    "Report bugs at ",
    env!("CARGO_PKG_REPOSITORY"),
    "/issues\n",
);

/// Print NSF header fields and file digests.
#[derive(Parser, Debug)]
#[command(name = "nsfinfo", disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// JSON-formatted output
    #[arg(short = 'J')]
    json: bool,

    /// Digest pair to compute
    #[arg(short = 'd', long = "digests", value_enum, default_value_t = DigestChoice::Md5Sha256)]
    digests: DigestChoice,

    /// Print usage and exit
    #[arg(short = 'h')]
    help: bool,

    /// NSF file to inspect
    file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DigestChoice {
    Md5Sha256,
    Md5Sha1,
}

impl From<DigestChoice> for DigestSet {
    fn from(choice: DigestChoice) -> Self {
        match choice {
            DigestChoice::Md5Sha256 => DigestSet::Md5Sha256,
            DigestChoice::Md5Sha1 => DigestSet::Md5Sha1,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn usage() -> ExitCode {
    eprint!("{USAGE}");
    ExitCode::from(EX_USAGE)
}

fn exit_code(err: &Error) -> u8 {
    match err {
        Error::Open(_) => EX_NOINPUT,
        e if e.is_data_error() => EX_DATAERR,
        _ => EX_OSERR,
    }
}

/// Decode, digest and render; nothing reaches stdout unless all succeed.
fn run(path: &Path, format: OutputFormat, set: DigestSet) -> nsfinfo::Result<Vec<u8>> {
    info!(path = %path.display(), "inspecting");
    let header = NsfHeader::open(path)?;
    debug!(
        region = ?header.region_kind(),
        expansion = ?header.expansion_audio(),
        bankswitched = header.uses_bankswitching(),
        ntsc_hz = ?header.ntsc_rate_hz(),
        "header details"
    );
    let digests = digest::digest_file(set, path)?;
    Ok(Report::new(&header, &digests).render(format)?)
}

fn main() -> ExitCode {
    init_tracing();

    let args = match Args::try_parse() {
        Ok(args) if !args.help => args,
        _ => return usage(),
    };
    let Some(path) = args.file.as_deref() else {
        return usage();
    };
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    match run(path, format, args.digests.into()) {
        Ok(report) => {
            let mut stdout = io::stdout().lock();
            if let Err(e) = stdout.write_all(&report).and_then(|()| stdout.flush()) {
                eprintln!("nsfinfo: cannot write report: {e}");
                return ExitCode::from(EX_IOERR);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("nsfinfo: {e}");
            ExitCode::from(exit_code(&e))
        }
    }
}
