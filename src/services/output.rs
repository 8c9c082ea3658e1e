use crate::domain::models::{ErrorBody, JsonErr, JsonOut};
use serde::Serialize;

/// Render one result on stdout: the JSON envelope, or a single human line.
pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

/// Render a failure. In JSON mode the envelope goes to stdout so callers
/// parse one document either way; text mode reports on stderr.
pub fn print_error(json: bool, code: &str, err: &anyhow::Error) {
    if json {
        let body = JsonErr {
            ok: false,
            error: ErrorBody {
                code: code.to_string(),
                message: format!("{err:#}"),
            },
        };
        match serde_json::to_string_pretty(&body) {
            Ok(rendered) => println!("{rendered}"),
            Err(_) => eprintln!("error: {err:#}"),
        }
    } else {
        eprintln!("error: {err:#}");
    }
}
