use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// Maps `-v` occurrences to a level; `--quiet` keeps only errors.
fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    match (quiet, verbosity) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::WARN,
        (false, 1) => LevelFilter::INFO,
        (false, 2) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    }
}

/// Console output. Kept on stderr so selections written to stdout stay parseable CSV.
fn console_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
}

/// Plain-text log file with module targets, for archiving alongside a campaign round.
fn file_layer<S>(file: File) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_target(true)
}

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let file = log_file
        .map(|path| File::create(&path).map_err(CliError::Io))
        .transpose()?;

    tracing_subscriber::registry()
        .with(level_filter(verbosity, quiet))
        .with(console_layer())
        .with(file.map(file_layer))
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use examol::io::predictions::read_predictions;
    use examol::select::policy::Greedy;
    use examol::select::{RankingSelector, Selector};
    use serial_test::serial;

    #[test]
    fn verbosity_maps_to_level_filters() {
        assert_eq!(level_filter(0, false), LevelFilter::WARN);
        assert_eq!(level_filter(1, false), LevelFilter::INFO);
        assert_eq!(level_filter(2, false), LevelFilter::DEBUG);
        assert_eq!(level_filter(9, false), LevelFilter::TRACE);
        assert_eq!(level_filter(3, true), LevelFilter::ERROR);
    }

    #[test]
    #[serial]
    fn file_layer_records_selector_round_restart() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("round.log");
        let subscriber = tracing_subscriber::registry()
            .with(LevelFilter::INFO)
            .with(file_layer(File::create(&log_path).unwrap()));

        let first = read_predictions("key,m0\nCCO,1.0\nCCN,2.0\n".as_bytes()).unwrap();
        let second = read_predictions("key,m0\nCCCC,3.0\n".as_bytes()).unwrap();

        tracing::subscriber::with_default(subscriber, || {
            let mut selector = RankingSelector::new(1, true, Greedy);
            selector
                .add_possibilities(first.keys, first.samples.view().into_dyn())
                .unwrap();
            let dispensed: Vec<_> = selector.dispense().collect();
            assert_eq!(dispensed, vec![("CCN".to_string(), 2.0)]);
            let restarted = selector
                .add_possibilities(second.keys, second.samples.view().into_dyn())
                .unwrap();
            assert!(restarted);
        });

        let content = std::fs::read_to_string(log_path).unwrap();
        let notice = content
            .lines()
            .find(|line| line.contains("Switching selector back to gathering phase"))
            .expect("restart notice missing from log file");
        assert!(notice.contains("INFO"));
        assert!(notice.contains("examol::select::base"));
        assert!(!content.contains("Merged batch into ranked options."));
    }

    #[test]
    #[serial]
    fn unwritable_log_file_is_an_io_error() {
        let temp_dir = tempfile::tempdir().unwrap();

        let result = setup_logging(0, false, Some(temp_dir.path().to_path_buf()));

        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
