use blocksmoke::config::CheckConfig;
use blocksmoke::models::CheckFailure;
use blocksmoke::session::CheckSession;
use blocksmoke::DEFAULT_DEVICE;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    // One optional positional argument: the device name.
    let device = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DEVICE.to_string());
    let config = CheckConfig::new(device);
    if let Err(err) = config.validate() {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }

    let mut session = CheckSession::new(config);
    let report = match session.run().await {
        Ok(report) => report,
        Err(err) => {
            // Failures recorded before the abort still reach the console.
            render_failures(session.failures());
            // Command-not-found class failures have no recovery policy
            // beyond a nonzero exit.
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
    };

    render_failures(&report.failures);
    if let Some(line) = report.summary_line() {
        println!("{}", line);
    }

    std::process::exit(report.status);
}

fn render_failures(failures: &[CheckFailure]) {
    for failure in failures {
        eprintln!("{}", failure.error_line());
        for line in failure.output_lines() {
            println!("{}", line);
        }
    }
}

fn init_tracing() {
    // Traces go to stderr at warn by default so the pass/fail console
    // contract on stdout stays untouched.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
