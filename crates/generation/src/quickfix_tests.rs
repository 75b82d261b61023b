use super::*;

#[test]
fn strips_async_and_await_from_handler_callback() {
    let source = "handler(trigger, async (payload) => {\n  const x = await fetch();\n  return x;\n});";
    let result = apply(source);
    assert!(!result.source.contains("async"));
    assert!(!result.source.contains("await"));
    assert!(result
        .fixes_applied
        .iter()
        .any(|f| f.contains("handler callback")));
}

#[test]
fn leaves_synchronous_handler_untouched() {
    let source = "handler(trigger, (payload) => {\n  return payload;\n});";
    let result = apply(source);
    assert_eq!(result.source, source);
    assert!(result.fixes_applied.is_empty());
}

#[test]
fn removes_forbidden_import_lines() {
    let source = "import fs from \"fs\";\nexport function main() {}\n";
    let result = apply(source);
    assert!(!result.source.contains("import fs"));
    assert!(result
        .fixes_applied
        .iter()
        .any(|f| f.contains("forbidden import")));
}

#[test]
fn adds_export_to_unexported_main() {
    let source = "function main() {\n  return 1;\n}\n";
    let result = apply(source);
    assert!(result.source.contains("export function main"));
    assert!(result.fixes_applied.iter().any(|f| f.contains("export")));
}

#[test]
fn already_exported_main_is_not_double_exported() {
    let source = "export function main() {\n  return 1;\n}\n";
    let result = apply(source);
    assert_eq!(result.source.matches("export function main").count(), 1);
}
