mod auth;
mod db;
mod ipc;
mod session;
mod students;

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    // stdout carries the protocol; diagnostics go to stderr.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_level(true)
                .with_target(false),
        )
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let db_path = Path::new(db::DB_FILE_NAME);
    let store = match db::Store::open(db_path) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(path = %db_path.display(), error = %format!("{e:#}"), "failed to open store");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(path = %db_path.display(), "store ready");

    let mut state = ipc::AppState::new(store);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match input.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::error!(error = %e, "failed to read stdin");
                return ExitCode::FAILURE;
            }
        }
        if buf.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        // Raw bytes: a line that is not UTF-8 is just another bad_json.
        let req: ipc::Request = match serde_json::from_slice(&buf) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply without id.
                let resp = serde_json::json!({
                    "ok": false,
                    "error": { "code": "bad_json", "message": e.to_string() }
                });
                let _ = writeln!(stdout, "{}", resp);
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();

        if let Some(reason) = state.fatal.as_deref() {
            tracing::error!(error = %reason, "shutting down after store failure");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
