use intake_axum::start_server;
use intake_core::SubmissionHandler;
use intake_notify::{EmailNotifier, SmsMessenger};
use intake_sqlite::Db;
use intaked::{AppConfig, Cli, Commands, commands};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // By convention, we leverage `tracing` to instrument and log various
    // operations throughout this project.
    // Accordingly, we likely want to subscribe to these events so we can
    // write them to stdio and possibly some durable location.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::import()?;

    // Create config with proper layering of file and environment
    let AppConfig {
        server,
        database,
        form,
        email,
        sms,
    } = AppConfig::load(&cli)?;

    let db = Db::open(&database).await?;

    match cli.command() {
        Commands::Serve => {
            let notifier = EmailNotifier::new(&email)?;
            let handler = SubmissionHandler::new(form, db, notifier);

            // The handler type depends on whether short messages are enabled
            match SmsMessenger::new(&sms)? {
                Some(messenger) => start_server(server, handler.with_messenger(messenger)).await?,
                None => start_server(server, handler).await?,
            }
        }
        Commands::TestSetup => {
            let notifier = EmailNotifier::new(&email)?;
            commands::test_setup(&form, db, notifier).await?;
        }
        Commands::Dump { sheet } => {
            let sheet = sheet.unwrap_or(form.store_name);
            commands::dump(&db, &sheet, std::io::stdout().lock()).await?;
            println!();
        }
    }

    Ok(())
}
