//! `issue` and `verify` subcommands.
//!
//! User-facing output uses writeln! to stdout (this is a CLI binary, not debug output).

use std::io::Write;
use std::process::ExitCode;

use chrono::{Duration, SecondsFormat};
use tracing::warn;

use simplebank_token::{Maker, Payload};

/// Mint a token and print it with its payload.
pub fn issue(
    maker: &dyn Maker,
    username: &str,
    duration: Duration,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let (token, payload) = maker.create_token(username, duration)?;
    writeln!(out, "{token}")?;
    write_payload(&payload, out)?;
    Ok(())
}

/// Verify a token; a rejected token is reported and yields a failure exit code.
pub fn verify(maker: &dyn Maker, token: &str, out: &mut impl Write) -> anyhow::Result<ExitCode> {
    match maker.verify_token(token) {
        Ok(payload) => {
            writeln!(out, "valid")?;
            write_payload(&payload, out)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            warn!(error = %e, "Token rejected");
            writeln!(out, "rejected: {e}")?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn write_payload(payload: &Payload, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "  id:         {}", payload.id())?;
    writeln!(out, "  username:   {}", payload.username())?;
    writeln!(
        out,
        "  issued_at:  {}",
        payload.issued_at().to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;
    writeln!(
        out,
        "  expired_at: {}",
        payload.expired_at().to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use simplebank_token::{TokenScheme, new_maker};

    use super::*;

    const KEY: &str = "0123456789abcdef0123456789abcdef";

    fn run_issue(maker: &dyn Maker, duration: Duration) -> String {
        let mut out = Vec::new();
        issue(maker, "alice", duration, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn issue_prints_token_then_payload() {
        let maker = new_maker(TokenScheme::Jwt, KEY).unwrap();
        let output = run_issue(maker.as_ref(), Duration::minutes(1));

        let mut lines = output.lines();
        let token = lines.next().unwrap();
        assert_eq!(token.split('.').count(), 3);
        assert!(output.contains("username:   alice"));
        assert!(!output.contains(KEY));
    }

    #[test]
    fn issued_token_verifies() {
        for scheme in [TokenScheme::Jwt, TokenScheme::Paseto] {
            let maker = new_maker(scheme, KEY).unwrap();
            let output = run_issue(maker.as_ref(), Duration::minutes(1));
            let token = output.lines().next().unwrap();

            let mut out = Vec::new();
            let code = verify(maker.as_ref(), token, &mut out).unwrap();
            let printed = String::from_utf8(out).unwrap();
            assert_eq!(code, ExitCode::SUCCESS);
            assert!(printed.starts_with("valid"));
            assert!(printed.contains("username:   alice"));
        }
    }

    #[test]
    fn expired_token_reports_rejection() {
        let maker = new_maker(TokenScheme::Paseto, KEY).unwrap();
        let output = run_issue(maker.as_ref(), -Duration::minutes(1));
        let token = output.lines().next().unwrap();

        let mut out = Vec::new();
        let code = verify(maker.as_ref(), token, &mut out).unwrap();
        assert_eq!(code, ExitCode::FAILURE);
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed, "rejected: token has expired\n");
    }

    #[test]
    fn garbage_reports_invalid() {
        let maker = new_maker(TokenScheme::Jwt, KEY).unwrap();
        let mut out = Vec::new();
        let code = verify(maker.as_ref(), "garbage", &mut out).unwrap();
        assert_eq!(code, ExitCode::FAILURE);
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed, "rejected: token is invalid\n");
    }
}
