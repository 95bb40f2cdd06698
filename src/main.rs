use pagewatch::application::shutdown_channel;
use pagewatch::application::usecases::{PollUseCase, RunTickUseCase};
use pagewatch::infrastructure::{
    http_page_checker::HttpPageChecker, twilio_notifier::TwilioNotifier,
};
use pagewatch::interfaces::cli::Args;
use pagewatch::interfaces::config::Config;
use pagewatch::interfaces::logging::init_logging;

#[tokio::main]
async fn main() {
    if let Err(e) = init_logging() {
        eprintln!("{e}");
    }
    // a missing .env is fine; real environment variables win anyway
    let _ = dotenvy::dotenv();
    let args = Args::parse_normalized();

    // 1) resolve config once
    let cfg = match Config::from_env(&args) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    // 2) build infra
    let checker = HttpPageChecker::new();
    let notifier = TwilioNotifier::with_api_base(cfg.credentials, cfg.api_base);

    if cfg.dry_run {
        tracing::warn!("--dryrun enabled: notifications will be logged, not sent");
    }

    // first Ctrl-C stops at the next wait, a second one exits right away
    let (trigger, shutdown) = shutdown_channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, stopping before the next check");
            trigger.trigger();
            if tokio::signal::ctrl_c().await.is_ok() {
                std::process::exit(130);
            }
        }
    });

    // 3) usecases
    let poll = PollUseCase {
        tick: RunTickUseCase {
            checker: &checker,
            notifier: &notifier,
            target: &cfg.target,
            route: &cfg.route,
            dry_run: cfg.dry_run,
        },
        interval: cfg.interval,
    };

    // 4) run
    tracing::info!(
        url = %cfg.target.url,
        phrase = %cfg.target.phrase,
        interval_secs = cfg.interval.as_secs(),
        "polling started"
    );
    let exit = poll.run(shutdown).await;
    tracing::info!(?exit, "polling finished");
    std::process::exit(exit.exit_code());
}
