//! hrdesk gateway demo binary.
//!
//! Reads commands from stdin, one per line:
//! - `role <ROLE>`: print permission decisions for ROLE
//! - `file <mime> <size> <name>`: validate an upload and print its stored name
//! - `bar <a> <b>`: print the two-segment percentage split
//! - anything else: typed into the debounced `search` field
//!
//! Usage: `hrdesk-gateway [config.yaml]` (built-in defaults without a path).

use std::time::Duration;

use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, EnvFilter};

use hrdesk_core::meter::SplitBar;
use hrdesk_core::policy::Permission;
use hrdesk_core::upload::FileCandidate;
use hrdesk_core::Result;
use hrdesk_gateway::config::{self, DeskConfig};
use hrdesk_gateway::debounce::DebounceGateway;
use hrdesk_gateway::runtime::DeskRuntime;

const SEARCH_FIELD: &str = "search";

fn handle_line(rt: &DeskRuntime, search: &DebounceGateway, line: &str) -> Result<()> {
    let mut parts = line.split_whitespace();
    match parts.next() {
        Some("role") => {
            let role = parts.next();
            let mut decisions = serde_json::Map::new();
            for p in Permission::ALL {
                decisions.insert(p.as_str().into(), json!(rt.check(p, role)));
            }
            println!("{}", json!({ "role": role, "permissions": decisions }));
        }
        Some("file") => {
            let (Some(mime), Some(size), Some(name)) = (parts.next(), parts.next(), parts.next())
            else {
                println!("{}", json!({ "error": "usage: file <mime> <size> <name>" }));
                return Ok(());
            };
            let Ok(size) = size.parse::<u64>() else {
                println!("{}", json!({ "error": format!("invalid size: {size}") }));
                return Ok(());
            };
            let file = FileCandidate::new(mime, size, name);
            let result = rt.validate_upload(&file);
            let stored = result
                .is_valid()
                .then(|| rt.upload_filename("demo", &file.name));
            println!(
                "{}",
                json!({ "isValid": result.is_valid(), "error": result.error(), "storedAs": stored })
            );
        }
        Some("bar") => {
            let a = parts.next().and_then(|s| s.parse().ok()).unwrap_or(0);
            let b = parts.next().and_then(|s| s.parse().ok()).unwrap_or(0);
            let bar = SplitBar::new(a, b);
            println!("{}", json!({ "first": bar.first_percent(), "second": bar.second_percent() }));
        }
        _ => search.submit(line)?,
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = match std::env::args().nth(1) {
        Some(path) => config::load_from_file(&path).expect("config load failed"),
        None => DeskConfig::default(),
    };
    let rt = DeskRuntime::new(cfg).expect("runtime init failed");

    let search = rt.registry().register(SEARCH_FIELD, |value: String| {
        tracing::info!(field = SEARCH_FIELD, %value, "search settled");
        println!("{}", json!({ "settled": value }));
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if let Err(e) = handle_line(&rt, &search, line.trim_end()) {
                    tracing::warn!(error = %e, code = e.code().as_str(), "command failed");
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "stdin read failed");
                break;
            }
        }
    }

    // Let the last keystroke settle before tearing down.
    tokio::time::sleep(search.delay() + Duration::from_millis(50)).await;
    tokio::task::yield_now().await;
    rt.registry().dispose_all();

    print!("{}", rt.metrics().render());
}
