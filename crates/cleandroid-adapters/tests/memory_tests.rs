//! Core services over the in-memory filesystem.

use std::path::Path;

use cleandroid_adapters::MemoryFilesystem;
use cleandroid_core::{
    domain::{PackageName, PermissionLevel, find_dependency, layers},
    prelude::*,
};

const MANIFEST: &str = "<manifest>\n    <application />\n</manifest>\n";
const GROOVY_SCRIPT: &str = "android {\n}\n\ndependencies {\n    implementation 'androidx.core:core-ktx:1.12.0'\n}\n";

#[test]
fn scaffold_dry_run_then_real_run() {
    let fs = MemoryFilesystem::new();
    let service = ScaffoldService::new(Box::new(fs.clone()));
    let package = PackageName::parse("com.example.notes").unwrap();
    let source_root = Path::new("app/src/main/java");

    let planned = service.generate(source_root, &package, layers(), true).unwrap();
    assert!(fs.list_files().is_empty());

    let applied = service.generate(source_root, &package, layers(), false).unwrap();
    assert_eq!(planned, applied);
    assert_eq!(fs.list_files().len(), 3);
    assert!(
        fs.read_file(Path::new("app/src/main/java/com/example/notes/data/README.md"))
            .unwrap()
            .starts_with("# Data layer")
    );
}

#[test]
fn manifest_patch_in_memory() {
    let path = Path::new("app/src/main/AndroidManifest.xml");
    let fs = MemoryFilesystem::new().with_file(path, MANIFEST);

    let outcome = ManifestService::new(Box::new(fs.clone()))
        .add_permissions(path, &[PermissionLevel::Basic.category()], false)
        .unwrap();

    assert!(outcome.was_written());
    assert_eq!(outcome.report.added.len(), 4);
    let text = fs.read_file(path).unwrap();
    assert!(text.contains("android.permission.ACCESS_WIFI_STATE"));
}

#[test]
fn groovy_script_gets_groovy_syntax() {
    let path = Path::new("app/build.gradle");
    let fs = MemoryFilesystem::new().with_file(path, GROOVY_SCRIPT);
    let glide = find_dependency("glide").unwrap();

    DependencyService::new(Box::new(fs.clone()))
        .add_dependencies(path, &[glide], DependencyMethod::GradleDirect, false)
        .unwrap();

    let text = fs.read_file(path).unwrap();
    assert!(text.contains("    implementation 'com.github.bumptech.glide:glide:4.16.0'"));
}
