use tracing::{debug, error, info};

use proc_mem_check::{cli, format_bytes, load_config, CheckError, MemoryCollector, SysinfoSource};

/// Reported when the process table itself cannot be read.
const EXIT_SCAN_FAILED: i32 = 2;

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let args = match cli::parse_args_from(std::env::args_os()) {
        Ok(args) => args,
        Err(err) => return fail(&err),
    };
    init_tracing(args.debug);

    let cfg = match load_config(args) {
        Ok(cfg) => cfg,
        Err(err) => return fail(&err),
    };
    debug!("Debugging output turned on");
    let format = cfg.size_format();
    debug!(
        "Minimum: {} Maximum: {}",
        format_bytes(cfg.range.minimum(), cfg.symbols, &format),
        format_bytes(cfg.range.maximum(), cfg.symbols, &format)
    );

    let mut source = SysinfoSource::new();
    let report = match MemoryCollector::new(&cfg).collect(&mut source) {
        Ok(report) => report,
        Err(err) => {
            error!("{:#}", err);
            println!("CRITICAL {:#}", err);
            return EXIT_SCAN_FAILED;
        }
    };

    let summary = report.summary();
    if summary.has_issues() {
        info!(
            "{} processes over threshold: {} warnings, {} criticals",
            summary.total_issues(),
            summary.warning_count,
            summary.critical_count
        );
    } else {
        info!("No process over threshold");
    }

    let verdict = report.verdict();
    println!("{}", verdict.message);
    verdict.exit_code()
}

/// Prints the problem and the usage text; configuration errors never exit 0.
fn fail(err: &CheckError) -> i32 {
    if *err != CheckError::UsageRequested {
        println!("\n{}\n", err);
    }
    println!("{}", cli::usage());
    err.exit_code()
}

fn init_tracing(debug: bool) {
    // stdout carries the status line, so logs only go there when asked for
    if debug {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
            .with_target(false)
            .with_ansi(false)
            .with_writer(std::io::stdout)
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }
}
