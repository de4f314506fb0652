use super::*;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn file(package: &str, name: &str, contents: &str) -> GeneratedFile {
    GeneratedFile {
        package: package.to_string(),
        type_name: name.to_string(),
        contents: contents.to_string(),
    }
}

#[test]
fn sources_land_under_their_package() {
    let dir = tempdir().unwrap();
    let mut filer = DirectoryFiler::new(dir.path());

    filer
        .write_source(&file("com.example", "AvatarStyleApplier", "class A {}\n"))
        .unwrap();

    let written =
        fs::read_to_string(dir.path().join("com/example/AvatarStyleApplier.java")).unwrap();
    assert_eq!(written, "class A {}\n");
}

#[test]
fn a_source_is_written_once_per_run() {
    let dir = tempdir().unwrap();
    let mut filer = DirectoryFiler::new(dir.path());
    let source = file("com.example", "Paris", "class Paris {}\n");

    filer.write_source(&source).unwrap();
    let second = filer.write_source(&source);

    assert!(matches!(second, Err(FilerError::AlreadyWritten { .. })));
}

#[test]
fn manifest_is_json_under_meta_inf() {
    let dir = tempdir().unwrap();
    let mut filer = DirectoryFiler::new(dir.path());
    let manifest = ModuleManifest::new("app");

    filer
        .write_output(&RoundOutput {
            files: vec![file("com.example", "AvatarStyleApplier", "")],
            manifest: Some(manifest.clone()),
            diagnostics: vec![],
        })
        .unwrap();

    let json = fs::read_to_string(dir.path().join("META-INF/paris/app.json")).unwrap();
    let read: ModuleManifest = serde_json::from_str(&json).unwrap();
    assert_eq!(read, manifest);

    let mut written: Vec<PathBuf> = filer.written().map(Path::to_path_buf).collect();
    written.sort();
    assert_eq!(
        written,
        vec![
            PathBuf::from("META-INF/paris/app.json"),
            PathBuf::from("com/example/AvatarStyleApplier.java"),
        ]
    );
}

#[test]
fn io_errors_name_the_path() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("com");
    fs::write(&blocker, "not a directory").unwrap();
    let mut filer = DirectoryFiler::new(dir.path());

    let err = filer
        .write_source(&file("com.example", "Paris", ""))
        .unwrap_err();

    assert!(matches!(err, FilerError::Io { .. }));
    assert!(err.to_string().contains("Paris.java"));
}
