extern crate eit_nfo as eit;

mod error;
mod nfo;

use std::fs;
use std::path::Path;
use std::process;
use std::sync::Arc;

use clap::{App, Arg, ArgMatches, ErrorKind as ClapErrorKind};

use eit::{EventRecord, RecordStore};

use error::{Error, Kind as ErrorKind, Result};

const EXT_EIT: &str = ".eit";

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("eit2nfo")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Ivan Egorov <vany.egorov@gmail.com>")
        .about("Writes a Kodi .nfo next to every enigma2 .eit record")
        .arg(
            Arg::with_name("language")
                .short("l")
                .long("language")
                .help("Preferred language of title and plot (ISO 639)")
                .takes_value(true)
                .default_value("de"),
        )
        .arg(
            Arg::with_name("dry-run")
                .short("n")
                .long("dry-run")
                .help("Print the documents and their paths instead of writing them"),
        )
        .arg(
            Arg::with_name("directory")
                .help("Directories searched recursively for .eit files")
                .multiple(true),
        )
}

/// `Err((exit-code, message))` when the process should stop right away:
/// 0 for help/version, 2 for usage errors.
fn matches_from<I, T>(args: I) -> std::result::Result<ArgMatches<'static>, (i32, String)>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    app().get_matches_from_safe(args).map_err(|err| match err.kind {
        ClapErrorKind::HelpDisplayed | ClapErrorKind::VersionDisplayed => (0, err.message),
        _ => (2, format!("{}\nfor help use --help", err.message)),
    })
}

struct Generator {
    store: RecordStore,
    language: String,
    dry_run: bool,

    written: usize,
    failed: usize,
}

impl Generator {
    fn new<S: Into<String>>(language: S, dry_run: bool) -> Generator {
        Generator {
            store: RecordStore::new(),
            language: language.into(),
            dry_run,

            written: 0,
            failed: 0,
        }
    }

    fn walk(&mut self, dir: &Path) -> Result<()> {
        if !dir.is_dir() {
            return Err(Error::new_with_details(
                ErrorKind::NotADirectory,
                dir.display().to_string(),
            ));
        }

        let mut entries = fs::read_dir(dir)
            .map_err(|err| Error::from(err).with_details(dir.display().to_string()))?
            .filter_map(|res| match res.and_then(|e| Ok((e.path(), e.file_type()?))) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    log::warn!("(eit2nfo) skip entry of {}: {}", dir.display(), err);
                    None
                }
            })
            .collect::<Vec<_>>();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        // symlinked directories are not descended into; files behind links are
        for (path, file_type) in entries {
            if file_type.is_dir() {
                if let Err(err) = self.walk(&path) {
                    log::warn!("(eit2nfo) {}", err);
                }
            } else if file_type.is_symlink() && path.is_dir() {
                log::debug!("(eit2nfo) skip directory link {}", path.display());
            } else if is_eit(&path) {
                match self.process(&path) {
                    Ok(()) => self.written += 1,
                    Err(err) => {
                        log::warn!("(eit2nfo) {}", err);
                        self.failed += 1;
                    }
                }
            }
        }

        Ok(())
    }

    fn process(&self, path: &Path) -> Result<()> {
        log::info!("(eit2nfo) {}", path.display());

        let record = self.record(path);
        let nfo_path = nfo::path_for(path);

        if self.dry_run {
            println!("{}", nfo::render(&record));
            println!("{}", nfo_path.display());
            return Ok(());
        }

        nfo::write(&nfo_path, &record)
    }

    /// Unreadable files give the empty record.
    fn record(&self, path: &Path) -> Arc<EventRecord> {
        let key = path.to_string_lossy();

        let modified = match fs::metadata(path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(err) => {
                log::warn!("(eit2nfo) stat {}: {}", path.display(), err);
                return Arc::new(EventRecord::default());
            }
        };

        if let Some(record) = self.store.lookup(&key, modified, &self.language) {
            return record;
        }

        match fs::read(path) {
            Ok(buf) => self.store.parse(&buf, &key, modified, &self.language),
            Err(err) => {
                log::warn!("(eit2nfo) read {}: {}", path.display(), err);
                Arc::new(EventRecord::default())
            }
        }
    }
}

#[inline(always)]
fn is_eit(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().ends_with(EXT_EIT))
        .unwrap_or(false)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = match matches_from(std::env::args_os()) {
        Ok(matches) => matches,
        Err((code, msg)) => {
            if code == 0 {
                println!("{}", msg);
            } else {
                eprintln!("{}", msg);
            }
            process::exit(code);
        }
    };

    let language = eit::iso639_2to3(matches.value_of("language").unwrap_or("de")).to_string();
    let mut generator = Generator::new(language, matches.is_present("dry-run"));

    for dir in matches.values_of_os("directory").into_iter().flatten() {
        if let Err(err) = generator.walk(Path::new(dir)) {
            log::warn!("(eit2nfo) {}", err);
        }
    }

    log::info!(
        "(eit2nfo) written: {} failed: {}",
        generator.written,
        generator.failed
    );

    if generator.failed > 0 {
        process::exit(1);
    }
}
