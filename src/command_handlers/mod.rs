pub mod configure;
pub mod deploy;
pub mod dispatch;
pub mod environments;

use crate::github;
use crate::runner::ToolOutput;

/// Echo captured tool output into the log, folded under `title`.
pub(crate) fn emit(title: &str, output: &ToolOutput) {
    github::group(title, || {
        print!("{}", output.stdout);
        if !output.stdout.ends_with('\n') {
            println!();
        }
    });
}
