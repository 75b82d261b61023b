//! C10 — deterministic textual quick-fixes applied to generated source
//! before it reaches the static validator (§4.10). Each rewrite either
//! applies cleanly and records what it did, or leaves the source
//! untouched; quick-fix never fails the pipeline by itself.

use regex::Regex;
use std::sync::LazyLock;

#[derive(Debug, Clone, Default)]
pub struct QuickFixResult {
    pub source: String,
    pub fixes_applied: Vec<String>,
}

static HANDLER_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"handler\s*\(\s*[^,]+,\s*async\b").unwrap());

static MAIN_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*function\s+main\s*\(").unwrap());

static FORBIDDEN_IMPORTS: &[&str] = &["fs", "child_process", "net", "http", "https", "crypto"];

/// Strips `async` from the handler callback's declaration and every
/// `await` inside its body, found via brace-counting from the callback
/// arrow/function token to its matching closing brace.
fn strip_async_handler(source: &str) -> Option<(String, String)> {
    let m = HANDLER_CALL.find(source)?;
    let callback_start = m.end();
    let open = source[..callback_start].rfind('{')?;
    let mut depth = 0i32;
    let mut close = None;
    for (i, c) in source[open..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(open + i);
                    break;
                }
            }
            _ => {}
        }
    }
    let close = close?;
    let body = &source[open..=close];
    let fixed_body = body.replace("await ", "").replace("await(", "(");
    let without_async = source[..m.start()].to_string()
        + &source[m.start()..m.end()].replacen("async", "", 1)
        + &source[m.end()..open]
        + &fixed_body
        + &source[close + 1..];
    Some((without_async, "stripped async/await from handler callback".to_string()))
}

fn strip_forbidden_imports(source: &str) -> Option<(String, Vec<String>)> {
    let mut out = String::new();
    let mut fixes = Vec::new();
    let mut changed = false;
    for line in source.lines() {
        let is_forbidden = FORBIDDEN_IMPORTS.iter().any(|m| {
            (line.contains("import") || line.contains("require"))
                && (line.contains(&format!("\"{m}\"")) || line.contains(&format!("'{m}'")))
        });
        if is_forbidden {
            changed = true;
            fixes.push(format!("removed forbidden import: {}", line.trim()));
            continue;
        }
        out.push_str(line);
        out.push('\n');
    }
    if changed {
        Some((out, fixes))
    } else {
        None
    }
}

fn export_unexported_main(source: &str) -> Option<(String, String)> {
    if source.contains("export function main") || source.contains("export async function main") {
        return None;
    }
    let m = MAIN_DECL.find(source)?;
    let fixed = format!("{}export {}", &source[..m.start()], &source[m.start()..]);
    Some((fixed, "added missing `export` to top-level main".to_string()))
}

/// Apply every quick-fix in order; each stage operates on the previous
/// stage's output.
pub fn apply(source: &str) -> QuickFixResult {
    let mut current = source.to_string();
    let mut fixes = Vec::new();

    if let Some((fixed, removed)) = strip_forbidden_imports(&current) {
        current = fixed;
        fixes.extend(removed);
    }
    if let Some((fixed, note)) = strip_async_handler(&current) {
        current = fixed;
        fixes.push(note);
    }
    if let Some((fixed, note)) = export_unexported_main(&current) {
        current = fixed;
        fixes.push(note);
    }

    QuickFixResult {
        source: current,
        fixes_applied: fixes,
    }
}

#[cfg(test)]
#[path = "quickfix_tests.rs"]
mod tests;
