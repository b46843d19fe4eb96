use clap::{value_parser, Arg, Command};
use futures::StreamExt;
use opsdiag_engine::{provision_teams, DiagnosisEngine, EngineConfig};
use opsdiag_model::{Resource, ResourceKind, Scope};
use opsdiag_narrate::{GeminiClient, ScriptedNarrator};
use opsdiag_store::{LogStream, SessionLedger, TeamRoster};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

fn demo_resources() -> Vec<Resource> {
    vec![
        Resource::new("Order DB", ResourceKind::Database),
        Resource::new("Payments API", ResourceKind::Service),
        Resource::new("Edge Network", ResourceKind::Network),
        Resource::new("Session Cache", ResourceKind::Cache),
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Command::new("opsdiag")
        .version(opsdiag_engine::VERSION)
        .about("Multi-agent infrastructure diagnosis engine")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("diagnose")
                .about("Run a scripted diagnosis over the demo inventory")
                .arg(
                    Arg::new("query")
                        .long("query")
                        .required(true)
                        .help("Diagnosis query, e.g. \"check Order DB consistency\""),
                )
                .arg(
                    Arg::new("delay-ms")
                        .long("delay-ms")
                        .default_value("30")
                        .value_parser(value_parser!(u64))
                        .help("Per-token narration delay in milliseconds"),
                ),
        )
        .subcommand(
            Command::new("chat")
                .about("Stream a live Gemini reply (requires GEMINI_API_KEY)")
                .arg(
                    Arg::new("prompt")
                        .long("prompt")
                        .required(true)
                        .help("Chat prompt"),
                )
                .arg(
                    Arg::new("model")
                        .long("model")
                        .default_value("gemini-2.0-flash")
                        .help("Model name"),
                ),
        );

    match cli.get_matches().subcommand() {
        Some(("diagnose", args)) => {
            let query = args.get_one::<String>("query").cloned().unwrap_or_default();
            let delay_ms = *args.get_one::<u64>("delay-ms").unwrap_or(&30);

            let roster = Arc::new(TeamRoster::from_teams(provision_teams(&demo_resources())));
            let log = Arc::new(LogStream::new());
            let ledger = Arc::new(SessionLedger::new());

            let engine = DiagnosisEngine::new(
                EngineConfig::new(),
                Arc::clone(&roster),
                Arc::clone(&log),
                Arc::clone(&ledger),
            )
            .with_narrator(Arc::new(
                ScriptedNarrator::new().with_token_delay(Duration::from_millis(delay_ms)),
            ));

            let scope_teams = roster.teams();
            let session_id = engine
                .run_diagnosis(&query, &Scope::Global, &scope_teams)
                .await?;

            for entry in log.entries() {
                let recipient = entry
                    .to
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("[{}] {} -> {}", entry.timestamp, entry.from.name, recipient);
                println!("{}", entry.content);
                println!();
            }

            let session = ledger
                .session(session_id)
                .ok_or_else(|| anyhow::anyhow!("session record missing"))?;
            println!(
                "session {} {:?}: {} warning(s), {} critical",
                session.id, session.status, session.findings.warnings, session.findings.critical
            );
        }
        Some(("chat", args)) => {
            let prompt = args.get_one::<String>("prompt").cloned().unwrap_or_default();
            let model = args
                .get_one::<String>("model")
                .cloned()
                .unwrap_or_else(|| "gemini-2.0-flash".to_string());

            let client = GeminiClient::from_env()?;
            let mut stream = client.stream_chat(&prompt, &model);
            let mut stdout = std::io::stdout();
            while let Some(fragment) = stream.next().await {
                write!(stdout, "{fragment}")?;
                stdout.flush()?;
            }
            writeln!(stdout)?;
        }
        _ => {}
    }

    Ok(())
}
