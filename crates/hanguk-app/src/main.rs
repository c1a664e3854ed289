//! Hanguk binary - composition root.
//!
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Initialize tracing on stderr
//! 3. Assemble the skill from the configured locale bundles
//! 4. Serve one JSON envelope (`invoke`) or an interactive session (`converse`)

mod cli;

use std::io::{self, BufRead, Read, Write};

use clap::Parser;

use hanguk_core::config::SkillConfig;
use hanguk_core::types::{intents, Request, RequestKind, Response};
use hanguk_skill::{decode_request, encode_response, InMemorySessionStore, SessionStore, Skill};

use cli::{CliArgs, Command};

/// Filter directive for the subscriber.
///
/// Priority: --log-level flag > RUST_LOG > HANGUK_LOG_LEVEL / config level.
fn filter_directive(flag: Option<&str>, rust_log: Option<String>, resolved: &str) -> String {
    if let Some(level) = flag {
        return level.to_string();
    }
    match rust_log {
        Some(directive) if !directive.trim().is_empty() => directive,
        _ => resolved.to_string(),
    }
}

fn init_tracing(directive: &str) {
    let filter = tracing_subscriber::EnvFilter::try_new(directive)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Serve one request envelope from a file or stdin.
fn run_invoke(skill: &Skill, command: &Command) -> Result<(), Box<dyn std::error::Error>> {
    let json = match command.request_path() {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let mut envelope = decode_request(&json, skill.translator().fallback_locale())?;
    tracing::debug!(
        session_id = ?envelope.session_id,
        new_session = envelope.new_session,
        "Envelope decoded"
    );
    let response = skill.invoke(&envelope.request, &mut envelope.attributes)?;
    println!("{}", encode_response(&response, &envelope.attributes)?);
    Ok(())
}

/// Map one line typed at the prompt to a request kind.
fn parse_utterance(line: &str) -> Option<RequestKind> {
    let word = line.trim();
    let kind = match word.to_ascii_lowercase().as_str() {
        "" => return None,
        "launch" | "open" => RequestKind::Launch,
        "end" => RequestKind::SessionEnded {
            reason: Some("USER_INITIATED".to_string()),
        },
        "fact" => intent(intents::KOREA_FACTS),
        "help" => intent(intents::HELP),
        "stop" => intent(intents::STOP),
        "cancel" => intent(intents::CANCEL),
        "fallback" => intent(intents::FALLBACK),
        _ => intent(word),
    };
    Some(kind)
}

fn intent(name: &str) -> RequestKind {
    RequestKind::Intent {
        name: name.to_string(),
    }
}

fn print_response(out: &mut impl Write, response: &Response) -> io::Result<()> {
    match &response.speech {
        Some(speech) => writeln!(out, "< {}", speech)?,
        None => writeln!(out, "< (silence)")?,
    }
    if let Some(reprompt) = &response.reprompt {
        writeln!(out, "  ({})", reprompt)?;
    }
    out.flush()
}

/// Interactive session on stdin until the skill ends it or input runs out.
fn run_converse(skill: &Skill, locale: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = InMemorySessionStore::new();
    let session_id = format!("hanguk.session.{}", uuid::Uuid::new_v4());
    tracing::info!(%session_id, %locale, "Conversation started");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let Some(kind) = parse_utterance(&line) else {
            continue;
        };
        let request = Request::new(
            format!("hanguk.request.{}", uuid::Uuid::new_v4()),
            locale,
            kind,
        )
        .with_timestamp(chrono::Utc::now());

        let response = skill.invoke_with_store(&request, &session_id, &store)?;
        print_response(&mut stdout, &response)?;
        if response.should_end_session {
            break;
        }
    }

    let attributes = store.get(&session_id)?;
    tracing::info!(
        %session_id,
        attributes = %serde_json::to_string(&attributes)?,
        "Conversation finished"
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config is read before tracing exists so its log level can apply.
    let config_file = args.resolve_config_path();
    let loaded = SkillConfig::load(&config_file);
    let config_level = match &loaded {
        Ok(config) => config.general.log_level.clone(),
        Err(_) => SkillConfig::default().general.log_level,
    };
    init_tracing(&filter_directive(
        args.log_level.as_deref(),
        std::env::var("RUST_LOG").ok(),
        &args.resolve_log_level(&config_level),
    ));

    tracing::info!("Starting Hanguk v{}", env!("CARGO_PKG_VERSION"));
    let config = match loaded {
        Ok(config) => {
            tracing::info!(path = %config_file.display(), "Configuration loaded");
            config
        }
        Err(e) => {
            tracing::warn!(
                path = %config_file.display(),
                error = %e,
                "Failed to load config. Using defaults."
            );
            SkillConfig::default()
        }
    };

    let skill = Skill::from_config(&config)?;

    match &args.command {
        Command::Invoke { .. } => run_invoke(&skill, &args.command),
        Command::Converse { locale } => {
            let locale = locale
                .clone()
                .unwrap_or_else(|| config.session.default_locale.clone());
            run_converse(&skill, &locale)
        }
    }
}
