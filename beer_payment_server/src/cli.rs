//! The server takes no arguments. Passing any at all prints the help text and a summary of the `BPG_*` environment,
//! and the server does not start.
use std::{env, env::VarError};

const HELP: &str = include_str!("./cli-help.txt");

/// Every variable the server reads. Secret values are reported as set or unset, never printed.
const ENVIRONMENT: [(&str, bool); 13] = [
    ("RUST_LOG", false),
    ("BPG_HOST", false),
    ("BPG_PORT", false),
    ("BPG_DATABASE_URL", false),
    ("BPG_UNIT_PRICE", false),
    ("BPG_WEBHOOK_SECRET", true),
    ("BPG_ENVIRONMENT", false),
    ("BPG_GATEWAY_URL", false),
    ("BPG_GATEWAY_KEY", true),
    ("BPG_GATEWAY_TIMEOUT", false),
    ("BPG_PUBLIC_URL", false),
    ("BPG_USE_X_FORWARDED_HOST", false),
    ("BPG_NAME", false),
];

/// Returns true if arguments were given and the help was printed. The caller should exit in that case.
pub fn handle_command_line_args() -> bool {
    if env::args().len() <= 1 {
        return false;
    }
    println!("\n{HELP}\n");
    println!("Current environment:");
    for (name, secret) in ENVIRONMENT {
        println!("  {}", describe_env(name, secret, env::var(name)));
    }
    true
}

fn describe_env(name: &str, secret: bool, value: Result<String, VarError>) -> String {
    let value = match value {
        Ok(_) if secret => "<set>".to_string(),
        Ok(s) => s,
        Err(VarError::NotPresent) => "<not set>".to_string(),
        Err(VarError::NotUnicode(_)) if secret => "<set, not valid unicode>".to_string(),
        Err(VarError::NotUnicode(s)) => format!("<not valid unicode> {}", s.to_string_lossy()),
    };
    format!("{name:<28}{value}")
}
