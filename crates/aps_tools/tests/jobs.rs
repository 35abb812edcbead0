//! Job files on disk through to rendered reports.

use std::path::PathBuf;

use aps_core::context::CannonContext;
use aps_core::error::ShellError;
use aps_core::job::OptimizeJob;
use aps_core::optimizer::DiameterPolicy;
use aps_test_utils::fixtures::{INCOMPLETE_JOB_RON, SAMPLE_JOB_RON};
use aps_tools::job::{load_ron, resolve_job, JobOverrides};
use aps_tools::report::{bbcode_table, html_table, DEFAULT_COLUMNS};
use aps_tools::ToolError;
use tempfile::{tempdir, TempDir};

struct JobFile {
    _dir: TempDir,
    path: PathBuf,
}

impl JobFile {
    fn path(&self) -> &std::path::Path {
        &self.path
    }
}

fn write_job(contents: &str) -> JobFile {
    let dir = tempdir().unwrap();
    let path = dir.path().join("job.ron");
    std::fs::write(&path, contents).unwrap();
    JobFile { _dir: dir, path }
}

fn shipped_job(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../jobs")
        .join(name)
}

#[test]
fn test_job_file_round_trip_to_html() {
    let file = write_job(SAMPLE_JOB_RON);
    let job = resolve_job(Some(file.path()), &JobOverrides::default()).unwrap();
    assert_eq!(job.max_results, 3);
    assert_eq!(job.context.loaders, 2);

    let outcome = job.run().unwrap();
    let rows: Vec<_> = outcome.shells.iter().map(|s| s.item.clone()).collect();
    let html = html_table(rows.as_slice(), job.columns.as_slice()).unwrap();
    assert!(html.starts_with("<table><tr><td><b>DPS</b></td>"));
    assert_eq!(html.matches("<tr>").count(), 1 + rows.len().max(1));
}

#[test]
fn test_flags_fill_missing_job_values() {
    let file = write_job(INCOMPLETE_JOB_RON);
    let overrides = JobOverrides {
        max_modules: Some(3),
        max_results: Some(2),
        ..JobOverrides::default()
    };
    let job = resolve_job(Some(file.path()), &overrides).unwrap();
    let outcome = job.run().unwrap();
    assert_eq!(outcome.shells.len(), 2);
}

#[test]
fn test_missing_field_propagates() {
    let file = write_job(INCOMPLETE_JOB_RON);
    let job = resolve_job(Some(file.path()), &JobOverrides::default()).unwrap();
    assert_eq!(
        job.run().unwrap_err(),
        ShellError::MissingField {
            field: "max_modules"
        }
    );
}

#[test]
fn test_malformed_job_file() {
    let file = write_job("(loader_length: Some(2.0), max_modules: )");
    let result = resolve_job(Some(file.path()), &JobOverrides::default());
    assert!(matches!(result, Err(ToolError::ParseError(_))));
}

#[test]
fn test_context_file() {
    let file = write_job("(loaders: 3, belt: true)");
    let ctx: CannonContext = load_ron(file.path()).unwrap();
    assert_eq!(ctx.loaders, 3);
    assert!(ctx.belt);
    assert_eq!(ctx.effective_clips(), 0);
}

#[test]
fn test_shipped_jobs_load() {
    let railgun: OptimizeJob = load_ron(shipped_job("railgun.ron")).unwrap();
    assert_eq!(railgun.context.vel_charge, 2000.0);

    let flak: OptimizeJob = load_ron(shipped_job("flak.ron")).unwrap();
    assert_eq!(flak.diameter, DiameterPolicy::Fixed(0.15));
    assert!(flak.generator.validate().is_ok());
    let outcome = flak.run().unwrap();
    assert!(outcome.shells.iter().all(|s| s.item.diameter() == 0.15));
}

#[test]
fn test_unknown_job_column() {
    let file = write_job(
        r#"(loader_length: Some(1.0), max_modules: Some(2), columns: ["dps", "muzzle_flash"])"#,
    );
    let job = resolve_job(Some(file.path()), &JobOverrides::default()).unwrap();
    let rows: Vec<_> = job.run().unwrap().shells.into_iter().map(|s| s.item).collect();
    let err = bbcode_table(rows.as_slice(), job.columns.as_slice()).unwrap_err();
    assert_eq!(err, ShellError::UnknownField("muzzle_flash".to_string()));
    assert!(html_table(rows.as_slice(), &DEFAULT_COLUMNS).is_ok());
}
