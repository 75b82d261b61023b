use super::*;

#[tokio::test]
async fn missing_binary_reports_not_ok() {
    let checker = CliTypeChecker::new("/nonexistent/tsc-binary-for-tests");
    let outcome = checker.check("export const main = () => {};").await;
    assert!(!outcome.ok);
    assert!(outcome.output.contains("failed to launch type checker"));
}

#[tokio::test]
async fn nonzero_exit_reports_not_ok_with_combined_output() {
    let checker = CliTypeChecker::new("false");
    let outcome = checker.check("export const main = () => {};").await;
    assert!(!outcome.ok);
}
