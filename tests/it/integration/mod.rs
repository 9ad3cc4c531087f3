//! Multi-component workflow tests.

mod crop_workflow_tests;
