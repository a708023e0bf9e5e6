use std::io::BufRead;

use anyhow::Context;

/// Use the flag value if given, otherwise read one line from stdin.
pub fn password_or_stdin(given: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = given {
        return Ok(password);
    }

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        anyhow::bail!("no password given (pass --password or pipe it on stdin)");
    }
    Ok(password)
}
