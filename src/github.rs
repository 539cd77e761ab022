//! GitHub Actions workflow commands. Printed on stdout, where the runner picks them up.

/// Escape a message for `::command::message`, as the Actions toolkit does.
pub fn escape_data(message: &str) -> String {
    message.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

/// Report a failed step. The caller still has to exit non-zero.
pub fn set_failed(message: &str) {
    println!("{}", error_command(message));
}

pub fn group<T>(title: &str, f: impl FnOnce() -> T) -> T {
    println!("::group::{}", escape_data(title));
    let out = f();
    println!("::endgroup::");
    out
}
