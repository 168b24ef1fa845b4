use tempfile::TempDir;
use vigil_core::WorkflowBuilder;

/// Helper function to create a test workflow
pub async fn create_test_workflow() -> (TempDir, vigil_core::Workflow) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let workflow = WorkflowBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create workflow");
    (temp_dir, workflow)
}
