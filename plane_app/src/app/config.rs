//! Command line configuration
//! Uses library `clap`

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command, ValueHint};
use cutplane_lib::editor::{defaults, EditorSettings, ResetPolicy};

fn is_number<T: std::str::FromStr>(num: &str) -> Result<(), String> {
    match num.parse::<T>() {
        Ok(_) => Ok(()),
        Err(_) => Err("Number required".into()),
    }
}

pub fn get_command<'a>() -> Command<'a> {
    Command::new("plane_app")
        .version("0.1.0")
        .about("Headless cutting plane editor, reads commands from stdin")
        .arg(
            Arg::new("volume")
                .help(".dat volume to load on start")
                .value_name("FILE")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("bins")
                .help("Number of histogram bins")
                .long("bins")
                .short('b')
                .value_name("N")
                .validator(is_number::<usize>),
        )
        .arg(
            Arg::new("plane-delay")
                .help("Debounce of plane updates in milliseconds")
                .long("plane-delay")
                .value_name("MS")
                .validator(is_number::<u64>),
        )
        .arg(
            Arg::new("histogram-delay")
                .help("Debounce of histogram updates in milliseconds")
                .long("histogram-delay")
                .value_name("MS")
                .validator(is_number::<u64>),
        )
        .arg(
            Arg::new("preserve")
                .help("Keep plane orientation when a new volume is loaded")
                .long("preserve"),
        )
}

/// App configuration
/// Config is built from args parsed by `clap`
#[derive(Debug)]
pub struct Config {
    pub volume: Option<PathBuf>,
    pub settings: EditorSettings,
}

impl Config {
    pub fn from_args(args: &ArgMatches) -> Result<Config> {
        let volume = args.value_of_os("volume").map(PathBuf::from);

        let millis = |key: &str, default: Duration| -> Result<Duration> {
            match args.value_of(key) {
                Some(v) => Ok(Duration::from_millis(
                    v.parse().with_context(|| format!("bad {key}"))?,
                )),
                None => Ok(default),
            }
        };
        let bins = match args.value_of("bins") {
            Some(v) => v.parse().context("bad bins")?,
            None => defaults::HISTOGRAM_BINS,
        };
        let reset_policy = if args.is_present("preserve") {
            ResetPolicy::Preserve
        } else {
            defaults::RESET_POLICY
        };

        let settings = EditorSettings::builder()
            .plane_delay(millis("plane-delay", defaults::PLANE_DELAY)?)
            .histogram_delay(millis("histogram-delay", defaults::HISTOGRAM_DELAY)?)
            .histogram_bins(bins)
            .reset_policy(reset_policy)
            .build()?;

        Ok(Config { volume, settings })
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn defaults_without_args() {
        let args = get_command().try_get_matches_from(["plane_app"]).unwrap();
        let cfg = Config::from_args(&args).unwrap();

        assert_eq!(cfg.volume, None);
        assert_eq!(cfg.settings, EditorSettings::default());
    }

    #[test]
    fn overrides() {
        let args = get_command()
            .try_get_matches_from([
                "plane_app",
                "vol.dat",
                "--bins",
                "20",
                "--histogram-delay",
                "50",
                "--preserve",
            ])
            .unwrap();
        let cfg = Config::from_args(&args).unwrap();

        assert_eq!(cfg.volume, Some(PathBuf::from("vol.dat")));
        assert_eq!(cfg.settings.histogram_bins, 20);
        assert_eq!(cfg.settings.histogram_delay, Duration::from_millis(50));
        assert_eq!(cfg.settings.reset_policy, ResetPolicy::Preserve);
    }

    #[test]
    fn zero_bins_rejected() {
        let args = get_command()
            .try_get_matches_from(["plane_app", "--bins", "0"])
            .unwrap();
        assert!(Config::from_args(&args).is_err());
    }
}
