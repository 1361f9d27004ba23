//! Prompt template helpers.
//!
//! Templates carry numbered `!<INPUT n>!` placeholders and may prefix the
//! usable body with a comment block terminated by a marker line; only the
//! part after the marker is sent to the endpoint.

use std::fs;
use std::io;
use std::path::Path;

const COMMENT_BLOCK_MARKER: &str = "<commentblockmarker>###</commentblockmarker>";

/// Fill a template's `!<INPUT n>!` placeholders with `inputs`, drop any
/// leading comment block, and trim surrounding whitespace.
pub fn fill_prompt(inputs: &[&str], template: &str) -> String {
    let mut prompt = template.to_string();
    for (i, input) in inputs.iter().enumerate() {
        prompt = prompt.replace(&format!("!<INPUT {i}>!"), input);
    }
    if let Some((_, body)) = prompt.split_once(COMMENT_BLOCK_MARKER) {
        prompt = body.to_string();
    }
    prompt.trim().to_string()
}

/// Read a prompt template from disk.
pub fn load_prompt_template(path: impl AsRef<Path>) -> io::Result<String> {
    fs::read_to_string(path)
}
