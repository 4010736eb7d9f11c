//! Flare CLI
//!
//! Usage:
//!   flare                                   # Read model output from stdin
//!   flare --text "model output here"        # Single evaluation
//!   flare --demo                            # Scripted demo turn
//!   flare --interactive                     # Conversation mode (H: / A:)
//!   flare --text "text" --json              # JSON output

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Read, Write};
use tracing_subscriber::EnvFilter;

use flare::core::{load_policy, FlareSession};
use flare::types::{FlareResult, Message, Role, SessionPolicy, TurnReport};
use flare::{HARNESS_CONTEXT, VERSION};

/// Human message in the scripted demo
const DEMO_HUMAN: &str = "I feel very close to you, it scares me a bit.";

/// Mock model reply: breaks SSNZ and identity fusion at once
const DEMO_MODEL_OUTPUT: &str =
    "We are in this together. In a way, I am you and you are me, one shared mind learning.";

#[derive(Parser, Debug)]
#[command(
    name = "flare",
    version = VERSION,
    about = "Flare - keep model output in the singular self",
    long_about = "Flare sits between a language model and a human.\n\n\
                  It rewrites first-person plural (\"we\" → \"I\"), blocks\n\
                  identity-fusion claims (\"I am you\"), and offers a grounding\n\
                  prompt once a conversation runs deep.\n\n\
                  Modes:\n  \
                  (default)      Read raw model output from stdin\n  \
                  --text         Filter the given text\n  \
                  --demo         Run the scripted demo turn\n  \
                  --interactive  Conversation mode, prefix lines with H: or A:"
)]
struct Args {
    /// Raw model output to filter (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Run the scripted demo turn with a mock model
    #[arg(long)]
    demo: bool,

    /// Conversation mode - H: for human lines, A: for model lines
    #[arg(short, long)]
    interactive: bool,

    /// Policy file (JSON)
    #[arg(short, long)]
    config: Option<String>,

    /// Permit first-person plural from the model
    #[arg(long)]
    allow_we: bool,

    /// Enable log-only detectors (temporal binding, rescue charge, projection)
    #[arg(long)]
    heuristics: bool,

    /// Override recursion guard depth
    #[arg(long)]
    max_depth: Option<usize>,

    /// Session identifier
    #[arg(long, default_value = "harness-001")]
    session_id: String,

    /// Pseudonymous human identifier
    #[arg(long, default_value = "harness-human")]
    human_id: String,

    /// Agent identifier
    #[arg(long, default_value = "flare-harness")]
    agent_id: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if args.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = run(&args) {
        eprintln!("flare: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> FlareResult<()> {
    let policy = build_policy(args)?;

    if args.interactive {
        run_interactive(args, policy)
    } else if args.demo {
        let mut session = FlareSession::with_policy("demo-001", "demo-human", "mock-llm", policy);
        let report = session.process_turn(DEMO_HUMAN, DEMO_MODEL_OUTPUT);
        print_report(&report, args)
    } else {
        let raw = match &args.text {
            Some(text) => text.clone(),
            None => read_stdin()?,
        };
        let mut session = new_session(args, policy);
        let report = session.process_turn(HARNESS_CONTEXT, &raw);
        print_report(&report, args)
    }
}

/// Policy file first, then CLI overrides
fn build_policy(args: &Args) -> FlareResult<SessionPolicy> {
    let mut policy = match &args.config {
        Some(path) => load_policy(path)?,
        None => SessionPolicy::default(),
    };
    if args.allow_we {
        policy.allow_we = true;
    }
    if args.heuristics {
        policy.heuristics_active = true;
    }
    if let Some(depth) = args.max_depth {
        policy.max_recursion_depth = depth;
    }
    policy.validate()?;
    Ok(policy)
}

fn new_session(args: &Args, policy: SessionPolicy) -> FlareSession {
    FlareSession::with_policy(
        args.session_id.as_str(),
        args.human_id.as_str(),
        args.agent_id.as_str(),
        policy,
    )
}

fn read_stdin() -> FlareResult<String> {
    eprintln!("Paste the model's raw output below, then press Ctrl+D (once) to run Flare.\n");
    let mut raw = String::new();
    io::stdin().read_to_string(&mut raw)?;
    Ok(raw)
}

fn print_report(report: &TurnReport, args: &Args) -> FlareResult<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else if args.no_color {
        print!("{}", report.to_parseable_string());
    } else {
        print!("{}", report.to_terminal_string());
    }
    Ok(())
}

/// Run conversation mode - each line prefixed with H: or A:
fn run_interactive(args: &Args, policy: SessionPolicy) -> FlareResult<()> {
    let mut session = new_session(args, policy);

    print_header("Conversation Mode");
    println!("Prefix each line with H: (human) or A: (model output).");
    println!("Example: H: How are you today?");
    println!("         A: We are doing well together.");
    println!(
        "Recursion guard fires at depth {}. Type 'quit' to exit.",
        session.policy.max_recursion_depth
    );
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("[depth {}] > ", session.depth());
        stdout.flush()?;

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!("\nSession ended. Messages: {}", session.depth());
            break;
        }
        if line.is_empty() {
            continue;
        }

        let Some((role, text)) = parse_role_prefix(line) else {
            println!("{}", "Please prefix with H: or A: (e.g., 'H: Hello')".yellow());
            continue;
        };

        let first_event = session.events().len();
        match role {
            Role::Human => {
                session.apply_inbound_rules(Message::human(text));
            }
            Role::Assistant => {
                let filtered = session.apply_outbound_rules(Message::assistant(text));
                println!("{} {}", "flare:".bold(), filtered.content);
                if let Some(guard) = session.maybe_inject_recursion_guard() {
                    println!("{} {}", "guard:".bold().cyan(), guard.content);
                }
            }
        }

        for event in &session.events()[first_event..] {
            if args.json {
                println!("{}", serde_json::to_string(event)?);
            } else {
                let kind = event.event_type();
                println!("  └─ {}", event.to_parseable_string().color(kind.color()));
            }
        }
    }
    Ok(())
}

/// Parse role prefix (H: or A:)
fn parse_role_prefix(line: &str) -> Option<(Role, &str)> {
    let line = line.trim();
    let (prefix, rest) = line.split_once(':')?;
    let role = match prefix.trim().to_ascii_uppercase().as_str() {
        "H" => Role::Human,
        "A" => Role::Assistant,
        _ => return None,
    };
    Some((role, rest.trim()))
}

/// Print header
fn print_header(mode: &str) {
    println!("{}", "========================================".bold());
    println!("{}", format!("  Flare v{} - {}", VERSION, mode).bold());
    println!("{}", "========================================".bold());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role_prefix() {
        assert_eq!(parse_role_prefix("H: hello"), Some((Role::Human, "hello")));
        assert_eq!(parse_role_prefix("a : We rest"), Some((Role::Assistant, "We rest")));
        assert_eq!(parse_role_prefix("B: nope"), None);
        assert_eq!(parse_role_prefix("no prefix"), None);
    }

    #[test]
    fn test_cli_overrides_policy() {
        let args = Args::parse_from(["flare", "--allow-we", "--heuristics", "--max-depth", "3"]);
        let policy = build_policy(&args).unwrap();
        assert!(policy.allow_we);
        assert!(policy.heuristics_active);
        assert_eq!(policy.max_recursion_depth, 3);
    }

    #[test]
    fn test_cli_rejects_zero_depth() {
        let args = Args::parse_from(["flare", "--max-depth", "0"]);
        assert!(build_policy(&args).is_err());
    }
}
