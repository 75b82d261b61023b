use super::*;
use std::collections::BTreeMap;

#[tokio::test]
async fn run_simulator_surfaces_not_found_for_a_missing_binary() {
    let runner = CliProcessRunner::new("/nonexistent/cre-binary-for-tests");
    let dir = tempfile::tempdir().unwrap();
    let err = runner
        .run_simulator(dir.path(), &BTreeMap::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}
