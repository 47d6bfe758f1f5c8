use crate::common::*;
use crate::{assert_generated_contains, assert_generated_not_contains};
use java2objc_gen::ast::{JavaType, LiteralValue};
use java2objc_gen::{generate_from_config, MemoryManagement, TranslationOptions};
use std::fs;

const STALE_HEADER: &str = "//\n//  Generated by java2objc-gen.  DO NOT EDIT!\n//  source: Old.java\n//\n";

fn bar() -> java2objc_gen::ast::CompilationUnit {
    let mut decl = class("com.foo.Bar");
    decl.body = vec![
        constant("LIMIT", JavaType::int(), LiteralValue::Int(10)),
        method("run", vec![call("com.foo.Bar", "step")]),
    ];
    compilation_unit("com.foo.Bar", vec![decl])
}

#[test]
fn test_generates_pair_per_ast_file() {
    let project = TestProject::new();
    project
        .write_unit("com/foo/Bar.json", &bar())
        .write_unit(
            "com/foo/Baz.json",
            &compilation_unit("com.foo.Baz", vec![subclass("com.foo.Baz", "com.foo.Bar")]),
        );

    let summary = project.generate(plain_options());

    assert!(summary.is_success());
    assert!(summary.skipped.is_empty());
    assert_eq!(
        summary.files,
        vec!["com/foo/Bar.h", "com/foo/Bar.m", "com/foo/Baz.h", "com/foo/Baz.m"]
    );

    let header = project.read_output("com/foo/Bar.h");
    assert_generated_contains!(header, "#define ComFooBar_LIMIT 10");
    assert_generated_contains!(header, "- (void)run;");

    let source = project.read_output("com/foo/Bar.m");
    assert_generated_contains!(source, "- (void)run {\n  [self step];\n}\n");

    let baz = project.read_output("com/foo/Baz.h");
    assert_generated_contains!(baz, "#include \"com/foo/Bar.h\"");
    assert_generated_contains!(baz, "@interface ComFooBaz : ComFooBar");
}

#[test]
fn test_hand_written_ast_json() {
    let project = TestProject::new();
    project.write_file(
        "Greeter.json",
        r#"{
          "source_path": "com/example/Greeter.java",
          "package": "com.example",
          "main_type": "com.example.Greeter",
          "types": [
            { "name": "com.example.Greeter", "kind": "interface", "modifiers": ["public"] }
          ]
        }"#,
    );

    let summary = project.generate(plain_options());

    assert!(summary.is_success());
    let header = project.read_output("com/example/Greeter.h");
    assert_generated_contains!(header, "@protocol ComExampleGreeter");
    assert_generated_contains!(header, "#ifndef _ComExampleGreeter_H_");
}

#[test]
fn test_broken_file_is_skipped_and_others_still_written() {
    let project = TestProject::new();
    project
        .write_unit("Bar.json", &bar())
        .write_file("Broken.json", "{ \"source_path\": ");

    let summary = project.generate(plain_options());

    assert_eq!(summary.skipped, vec!["Broken.json"]);
    assert!(summary.failed.is_empty());
    assert!(project.output_exists("com/foo/Bar.h"));
    assert!(project.output_exists("com/foo/Bar.m"));
    assert!(!project.output_exists("Broken.h"));
}

#[test]
fn test_non_json_files_are_ignored() {
    let project = TestProject::new();
    project
        .write_unit("Bar.json", &bar())
        .write_file("README.txt", "not an AST");

    let summary = project.generate(plain_options());

    assert!(summary.skipped.is_empty());
    assert_eq!(summary.files.len(), 2);
}

#[test]
fn test_failed_unit_is_reported() {
    let project = TestProject::new();
    project.write_unit(
        "Cycle.json",
        &compilation_unit(
            "com.foo.A",
            vec![subclass("com.foo.A", "com.foo.B"), subclass("com.foo.B", "com.foo.A")],
        ),
    );

    let summary = project.generate(plain_options());

    assert!(!summary.is_success());
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].0, "Cycle.json");
    assert!(summary.failed[0].1.contains("Circular"));
    assert!(!project.output_exists("com/foo/A.h"));
}

#[test]
fn test_stale_generated_files_are_cleaned() {
    let project = TestProject::new();
    project.write_unit("Bar.json", &bar());
    let output = project.output_dir.path();
    fs::write(output.join("Old.h"), STALE_HEADER).unwrap();
    fs::write(output.join("notes.h"), "// hand written\n").unwrap();

    let summary = project.generate(plain_options());

    assert_eq!(summary.cleaned, vec!["Old.h"]);
    assert!(!project.output_exists("Old.h"));
    assert!(project.output_exists("notes.h"));
}

#[test]
fn test_stale_files_survive_incomplete_run() {
    let project = TestProject::new();
    project
        .write_unit("Bar.json", &bar())
        .write_file("Broken.json", "[");
    fs::write(project.output_dir.path().join("Old.h"), STALE_HEADER).unwrap();

    let summary = project.generate(plain_options());

    assert!(summary.cleaned.is_empty());
    assert!(project.output_exists("Old.h"));
}

#[test]
fn test_excluded_paths_are_not_loaded() {
    let project = TestProject::new();
    project
        .write_unit("main/Bar.json", &bar())
        .write_file("test/Broken.json", "[");
    let mut config = project.config(plain_options());
    config.exclude_patterns = Some(vec!["/test/".to_string()]);

    let summary = generate_from_config(&config).unwrap();

    assert!(summary.skipped.is_empty());
    assert!(summary.is_success());
    assert!(project.output_exists("com/foo/Bar.h"));
}

#[test]
fn test_reference_counting_and_arc_guards() {
    let project = TestProject::new();
    project.write_unit("Bar.json", &bar());

    project.generate(TranslationOptions {
        memory_management: MemoryManagement::Arc,
        ..plain_options()
    });
    let arc = project.read_output("com/foo/Bar.m");
    assert_generated_contains!(arc, "#if !__has_feature(objc_arc)");

    project.generate(TranslationOptions {
        memory_management: MemoryManagement::ReferenceCounting,
        ..plain_options()
    });
    let manual = project.read_output("com/foo/Bar.m");
    assert_generated_contains!(manual, "#if __has_feature(objc_arc)");
    assert_generated_not_contains!(manual, "#if !__has_feature(objc_arc)");
}

#[test]
fn test_invalid_exclude_pattern_is_rejected() {
    let project = TestProject::new();
    let mut config = project.config(plain_options());
    config.exclude_patterns = Some(vec!["(".to_string()]);

    assert!(generate_from_config(&config).is_err());
}
