//! Integration tests for the public create pipeline API.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use sprout::cache::{DiskTemplateCache, TemplateCache, TemplateLocation, TemplateState};
use sprout::create::{
    CreatePipeline, CreateRequest, EmptyDirValidator, FsProjectMaterializer, PipelineEvent,
    ProjectMaterializer, Stage,
};
use sprout::fetch::{CachedTemplateFetcher, Downloader, TemplateFetcher};
use sprout::SproutError;
use tempfile::TempDir;

const URL_PATTERN: &str = "https://templates.test/{version}.tar.gz";

/// Writes a minimal valid template instead of talking to the network.
#[derive(Default)]
struct RecordingDownloader {
    fail: bool,
    calls: Mutex<Vec<String>>,
}

impl RecordingDownloader {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Downloader for RecordingDownloader {
    fn download(&self, url: &str, destination: &Path) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(url.to_string());
        if self.fail {
            anyhow::bail!("network unreachable");
        }
        write_template(destination);
        Ok(())
    }
}

/// Counts calls and forwards to the real filesystem materializer.
struct CountingMaterializer {
    inner: FsProjectMaterializer,
    calls: Mutex<usize>,
}

impl ProjectMaterializer for CountingMaterializer {
    fn create(&self, request: &CreateRequest) -> sprout::Result<()> {
        *self.calls.lock().unwrap() += 1;
        self.inner.create(request)
    }
}

/// Fails the test if the fetch stage is ever reached.
struct UnreachableFetcher;

impl TemplateFetcher for UnreachableFetcher {
    fn ensure(&self, version: &str) -> sprout::Result<()> {
        panic!("fetch should not run for {}", version);
    }
}

struct Fixture {
    _temp: TempDir,
    workspace: PathBuf,
    cache: Arc<DiskTemplateCache>,
    downloader: Arc<RecordingDownloader>,
    materializer: Arc<CountingMaterializer>,
    pipeline: CreatePipeline,
}

impl Fixture {
    fn new(downloader: RecordingDownloader) -> Self {
        let temp = TempDir::new().unwrap();
        let workspace = temp.path().join("work");
        fs::create_dir_all(&workspace).unwrap();

        let cache = Arc::new(DiskTemplateCache::new(temp.path().join("templates")));
        let downloader = Arc::new(downloader);
        let materializer = Arc::new(CountingMaterializer {
            inner: FsProjectMaterializer::new(cache.clone()),
            calls: Mutex::new(0),
        });
        let fetcher = CachedTemplateFetcher::new(cache.clone(), downloader.clone(), URL_PATTERN);
        let pipeline = CreatePipeline::new(
            Arc::new(EmptyDirValidator),
            Arc::new(fetcher),
            materializer.clone(),
        );

        Self {
            _temp: temp,
            workspace,
            cache,
            downloader,
            materializer,
            pipeline,
        }
    }

    fn location(&self, version: &str) -> TemplateLocation {
        self.cache.locate(version)
    }

    fn materialize_calls(&self) -> usize {
        *self.materializer.calls.lock().unwrap()
    }
}

fn write_template(location: &Path) {
    let www = location.join("www");
    fs::create_dir_all(&www).unwrap();
    fs::write(www.join("config.xml"), "<widget id=\"com.example.hello\"/>").unwrap();
    fs::write(www.join("index.html"), "<html></html>").unwrap();
}

fn collect_events(
    task: &mut sprout::create::CreateTask,
) -> Arc<Mutex<Vec<String>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    task.on_event(move |event| {
        let label = match event {
            PipelineEvent::Stage(stage) => format!("stage:{:?}", stage),
            PipelineEvent::Complete => "complete".to_string(),
            PipelineEvent::Error(_) => "error".to_string(),
        };
        sink.lock().unwrap().push(label);
    });
    events
}

#[test]
fn cached_template_is_copied_without_download() {
    let fixture = Fixture::new(RecordingDownloader::default());
    write_template(fixture.location("3.3.0").path());
    let dest = fixture.workspace.join("app");

    let mut task = fixture.pipeline.create(&dest, "3.3.0").unwrap();
    let events = collect_events(&mut task);
    task.run().unwrap();

    assert!(fixture.downloader.calls().is_empty());
    assert_eq!(fixture.materialize_calls(), 1);
    assert!(dest.join("www/index.html").exists());
    assert!(dest.join("config.xml").exists());
    assert!(!dest.join("www/config.xml").exists());
    assert_eq!(
        *events.lock().unwrap(),
        [
            "stage:Validating",
            "stage:Fetching",
            "stage:Materializing",
            "complete"
        ]
    );
}

#[test]
fn absent_template_is_downloaded_then_copied() {
    let fixture = Fixture::new(RecordingDownloader::default());
    let dest = fixture.workspace.join("app");

    fixture.pipeline.create(&dest, "3.3.0").unwrap().run().unwrap();

    assert_eq!(
        fixture.downloader.calls(),
        ["https://templates.test/3.3.0.tar.gz"]
    );
    assert_eq!(
        fixture.cache.state(&fixture.location("3.3.0")),
        TemplateState::Valid
    );
    assert!(dest.join("www/index.html").exists());
    for dir in sprout::create::SKELETON_DIRS {
        assert!(dest.join(dir).is_dir(), "missing {}", dir);
    }
}

#[test]
fn second_create_reuses_downloaded_template() {
    let fixture = Fixture::new(RecordingDownloader::default());

    for name in ["first", "second"] {
        let dest = fixture.workspace.join(name);
        fixture.pipeline.create(&dest, "3.3.0").unwrap().run().unwrap();
    }

    assert_eq!(fixture.downloader.calls().len(), 1);
    assert_eq!(fixture.materialize_calls(), 2);
}

#[test]
fn corrupt_template_is_evicted_and_downloaded_again() {
    let fixture = Fixture::new(RecordingDownloader::default());
    let location = fixture.location("3.3.0");
    fs::create_dir_all(location.path()).unwrap();
    fs::write(location.path().join("partial.tmp"), "half").unwrap();

    let dest = fixture.workspace.join("app");
    fixture.pipeline.create(&dest, "3.3.0").unwrap().run().unwrap();

    assert_eq!(fixture.downloader.calls().len(), 1);
    assert!(!location.path().join("partial.tmp").exists());
    assert!(dest.join("config.xml").exists());
}

#[test]
fn download_failure_stops_before_materializing() {
    let fixture = Fixture::new(RecordingDownloader::failing());
    let dest = fixture.workspace.join("app");

    let mut task = fixture.pipeline.create(&dest, "3.3.0").unwrap();
    let events = collect_events(&mut task);
    let err = task.run().unwrap_err();

    assert!(matches!(err, SproutError::FetchFailure { .. }));
    assert!(err.to_string().contains("network unreachable"));
    assert_eq!(fixture.materialize_calls(), 0);
    assert!(!dest.exists());
    assert_eq!(events.lock().unwrap().last().unwrap(), "error");
}

#[test]
fn filesystem_failure_while_copying_ends_the_run_with_an_error() {
    let fixture = Fixture::new(RecordingDownloader::default());
    write_template(fixture.location("3.3.0").path());
    let blocker = fixture.workspace.join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    let dest = blocker.join("app");

    let mut task = fixture.pipeline.create(&dest, "3.3.0").unwrap();
    let events = collect_events(&mut task);
    let err = task.run().unwrap_err();

    assert!(matches!(err, SproutError::MaterializationFailure { .. }));
    assert_eq!(fixture.materialize_calls(), 1);
    assert_eq!(
        *events.lock().unwrap(),
        [
            "stage:Validating",
            "stage:Fetching",
            "stage:Materializing",
            "error"
        ]
    );
}

#[test]
fn non_empty_destination_is_rejected_before_fetching() {
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("app");
    fs::create_dir_all(&dest).unwrap();
    fs::write(dest.join("file.js"), "console.log(1)").unwrap();

    let cache = Arc::new(DiskTemplateCache::new(temp.path().join("templates")));
    let pipeline = CreatePipeline::new(
        Arc::new(EmptyDirValidator),
        Arc::new(UnreachableFetcher),
        Arc::new(FsProjectMaterializer::new(cache)),
    );

    let err = pipeline.create(&dest, "3.3.0").unwrap().run().unwrap_err();

    assert!(matches!(err, SproutError::InvalidDestination { .. }));
    assert_eq!(fs::read_dir(&dest).unwrap().count(), 1);
}

#[test]
fn empty_destination_directory_is_accepted() {
    let fixture = Fixture::new(RecordingDownloader::default());
    let dest = fixture.workspace.join("app");
    fs::create_dir_all(&dest).unwrap();

    fixture.pipeline.create(&dest, "3.3.0").unwrap().run().unwrap();

    assert!(dest.join("config.xml").exists());
}

#[test]
fn invalid_request_fails_without_a_task() {
    let fixture = Fixture::new(RecordingDownloader::default());

    let missing_version = fixture.pipeline.create(fixture.workspace.join("app"), "");
    assert!(matches!(
        missing_version,
        Err(SproutError::InvalidRequest { .. })
    ));

    let missing_path = fixture.pipeline.create("", "3.3.0");
    assert!(matches!(missing_path, Err(SproutError::InvalidRequest { .. })));

    assert!(fixture.downloader.calls().is_empty());
}

#[test]
fn spawned_task_reports_stages_in_order() {
    let fixture = Fixture::new(RecordingDownloader::default());
    let dest = fixture.workspace.join("app");

    let handle = fixture.pipeline.create(&dest, "3.3.0").unwrap().spawn();
    let mut stages = Vec::new();
    let mut terminals = 0;
    let result = handle.wait_with(|event| match event {
        PipelineEvent::Stage(stage) => stages.push(*stage),
        _ => terminals += 1,
    });

    result.unwrap();
    assert_eq!(
        stages,
        [Stage::Validating, Stage::Fetching, Stage::Materializing]
    );
    assert_eq!(terminals, 1);
    assert!(dest.join("www/index.html").exists());
}

#[test]
fn spawned_task_surfaces_errors() {
    let fixture = Fixture::new(RecordingDownloader::failing());

    let err = fixture
        .pipeline
        .create(fixture.workspace.join("app"), "3.3.0")
        .unwrap()
        .spawn()
        .wait()
        .unwrap_err();

    assert!(matches!(err, SproutError::FetchFailure { .. }));
}
