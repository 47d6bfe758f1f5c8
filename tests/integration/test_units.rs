use crate::common::*;
use crate::{assert_generated_contains, assert_generated_not_contains};
use java2objc_gen::ast::{CompilationUnit, TypeDeclaration};
use java2objc_gen::build::{GenerationUnit, GenerationUnitBuilder};
use java2objc_gen::generators::base::name_table::NameTable;
use java2objc_gen::{Error, TranslationOptions};
use std::collections::BTreeMap;

/// One generation unit built from several compilation units.
fn combined(name: &str, units: Vec<CompilationUnit>) -> GenerationUnit {
    let mut builder = GenerationUnitBuilder::new(name);
    for unit in &units {
        builder.add_input_file(&unit.source_path);
    }
    for unit in units {
        builder.add_compilation_unit(unit).unwrap();
    }
    builder.assign_output_path(name);
    builder.build().unwrap()
}

fn single(types: Vec<TypeDeclaration>) -> GenerationUnit {
    let unit = compilation_unit("com.foo.Bar", types);
    combined("com/foo/Bar", vec![unit])
}

#[test]
fn test_supertype_from_a_later_file_is_declared_first() {
    let unit = combined(
        "Combined",
        vec![
            compilation_unit("com.foo.Sub", vec![subclass("com.foo.Sub", "com.bar.Base")]),
            compilation_unit("com.bar.Base", vec![class("com.bar.Base")]),
        ],
    );
    let generated = unit.generate(&plain_options(), &NameTable::new()).unwrap();
    let header = &generated.headers[0].contents;
    let source = &generated.implementation.contents;

    assert_eq!(generated.headers[0].path, "Combined.h");
    assert_eq!(generated.implementation.path, "Combined.m");
    assert!(header.find("@interface ComBarBase").unwrap() < header.find("@interface ComFooSub").unwrap());
    assert!(
        source.find("@implementation ComBarBase").unwrap()
            < source.find("@implementation ComFooSub").unwrap()
    );
    // Types declared in the unit are never included from elsewhere.
    assert_generated_not_contains!(header, "#include \"com/bar/Base.h\"");
    assert_generated_not_contains!(source, "#include \"com/bar/Base.h\"");
}

#[test]
fn test_external_superclass_is_included() {
    let generated = generate_unit(
        &plain_options(),
        compilation_unit("com.foo.Bar", vec![subclass("com.foo.Bar", "com.bar.Base")]),
    );
    let header = &generated.headers[0].contents;

    assert_generated_contains!(header, "#include \"com/bar/Base.h\"");
    assert_generated_contains!(header, "@interface ComFooBar : ComBarBase");
}

#[test]
fn test_circular_hierarchy_fails_the_unit() {
    let unit = single(vec![
        subclass("com.foo.Bar", "com.foo.Bar$Inner"),
        subclass("com.foo.Bar$Inner", "com.foo.Bar"),
    ]);
    let err = unit.generate(&plain_options(), &NameTable::new()).unwrap_err();

    assert!(matches!(err, Error::CircularType(_)));
}

#[test]
fn test_same_type_in_two_files_fails_the_unit() {
    let unit = combined(
        "Combined",
        vec![
            compilation_unit("com.foo.Bar", vec![class("com.foo.Bar")]),
            compilation_unit("com.foo.Bar", vec![class("com.foo.Bar")]),
        ],
    );
    let err = unit.generate(&plain_options(), &NameTable::new()).unwrap_err();

    assert!(matches!(err, Error::DuplicateType(_)));
}

#[test]
fn test_unit_can_be_generated_repeatedly() {
    let unit = single(vec![
        class("com.foo.Bar"),
        subclass("com.foo.Bar$Inner", "com.foo.Bar"),
    ]);
    let options = TranslationOptions::default();
    let names = NameTable::new();

    let first = unit.generate(&options, &names).unwrap();
    let second = unit.generate(&options, &names).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_every_file_has_banner_and_single_trailing_newline() {
    let generated = generate_unit(
        &TranslationOptions::default(),
        compilation_unit("com.foo.Bar", vec![class("com.foo.Bar")]),
    );

    for file in generated.files() {
        assert!(
            file.contents
                .starts_with("//\n//  Generated by java2objc-gen.  DO NOT EDIT!\n//  source: com/foo/Bar.java\n"),
            "{}",
            file.path
        );
        assert!(file.contents.ends_with("\n"), "{}", file.path);
        assert!(!file.contents.ends_with("\n\n"), "{}", file.path);
    }
}

#[test]
fn test_package_prefix_renames_types() {
    let mut prefixes = BTreeMap::new();
    prefixes.insert("com.foo".to_string(), "CF".to_string());
    let unit = single(vec![class("com.foo.Bar")]);
    let generated = unit
        .generate(&plain_options(), &NameTable::with_prefixes(prefixes))
        .unwrap();

    assert_generated_contains!(generated.headers[0].contents, "@interface CFBar : NSObject");
    assert_generated_contains!(generated.implementation.contents, "@implementation CFBar");
    assert_generated_not_contains!(generated.headers[0].contents, "ComFooBar");
}

#[test]
fn test_line_directives_follow_statements() {
    let mut decl = class("com.foo.Bar");
    let mut step = call("com.foo.Bar", "step");
    step.line = Some(12);
    decl.body = vec![method("run", vec![step])];
    let options = TranslationOptions {
        emit_line_directives: true,
        ..plain_options()
    };
    let generated = generate_unit(&options, compilation_unit("com.foo.Bar", vec![decl]));

    assert_generated_contains!(generated.implementation.contents, "\n#line 12\n  [self step];\n");
}
