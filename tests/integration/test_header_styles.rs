use crate::common::*;
use crate::{assert_generated_contains, assert_generated_not_contains};
use java2objc_gen::ast::CompilationUnit;
use java2objc_gen::{HeaderStyle, TranslationOptions};

fn bar_with_inner() -> CompilationUnit {
    compilation_unit(
        "com.foo.Bar",
        vec![
            class("com.foo.Bar"),
            subclass("com.foo.Bar$Inner", "com.foo.Bar"),
        ],
    )
}

fn styled(header_style: HeaderStyle) -> TranslationOptions {
    TranslationOptions {
        header_style,
        ..plain_options()
    }
}

#[test]
fn test_monolithic_header_has_one_guard() {
    let generated = generate_unit(&styled(HeaderStyle::Monolithic), bar_with_inner());
    assert_eq!(generated.headers.len(), 1);
    let header = &generated.headers[0].contents;

    assert_generated_contains!(header, "#ifndef _ComFooBar_H_\n#define _ComFooBar_H_\n");
    assert_generated_contains!(header, "#include \"J2ObjC_header.h\"");
    assert_generated_contains!(header, "@interface ComFooBar : NSObject");
    assert_generated_contains!(header, "@interface ComFooBar_Inner : ComFooBar");
    assert!(header.ends_with("#endif // _ComFooBar_H_\n"));
}

#[test]
fn test_segmented_header_guards_each_type() {
    let generated = generate_unit(&styled(HeaderStyle::Segmented), bar_with_inner());
    assert_eq!(generated.headers.len(), 1);
    let header = &generated.headers[0].contents;

    assert_generated_contains!(header, "#define INCLUDE_ALL_ComFooBar 1");
    assert_generated_contains!(
        header,
        "#if !defined (ComFooBar_) && (INCLUDE_ALL_ComFooBar || defined(INCLUDE_ComFooBar))\n#define ComFooBar_\n"
    );
    assert_generated_contains!(header, "#if !defined (ComFooBar_Inner_)");
    // The nested subclass needs its superclass segment.
    assert_generated_contains!(header, "#if defined(INCLUDE_ComFooBar_Inner)\n#define INCLUDE_ComFooBar 1\n#endif\n");
    assert_generated_not_contains!(header, "_ComFooBar_H_");
}

#[test]
fn test_multi_file_headers_per_nested_type() {
    let generated = generate_unit(&styled(HeaderStyle::MultiFile), bar_with_inner());
    let paths: Vec<&str> = generated.headers.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["com/foo/Bar.h", "com/foo/Bar_Inner.h"]);

    let outer = &generated.headers[0].contents;
    let inner = &generated.headers[1].contents;
    assert_generated_not_contains!(outer, "@interface ComFooBar_Inner");
    assert_generated_contains!(outer, "#include \"com/foo/Bar_Inner.h\"");
    assert_generated_contains!(inner, "#ifndef _ComFooBar_Inner_H_");
    assert_generated_contains!(inner, "#include \"com/foo/Bar.h\"");

    // A single implementation file still covers every type.
    let source = &generated.implementation.contents;
    assert_eq!(generated.implementation.path, "com/foo/Bar.m");
    assert_generated_contains!(source, "@implementation ComFooBar\n");
    assert_generated_contains!(source, "@implementation ComFooBar_Inner\n");
}

#[test]
fn test_declarations_do_not_depend_on_style() {
    let monolithic = generate_unit(&styled(HeaderStyle::Monolithic), bar_with_inner());
    let multi = generate_unit(&styled(HeaderStyle::MultiFile), bar_with_inner());

    assert_eq!(monolithic.implementation, multi.implementation);
}

#[test]
fn test_alias_header_at_source_path() {
    let mut unit = bar_with_inner();
    unit.source_path = "src/main/java/com/foo/Bar.java".to_string();
    let options = TranslationOptions {
        source_alias: true,
        ..plain_options()
    };
    let generated = generate_unit(&options, unit);
    let alias = generated.alias.expect("alias header");

    assert_eq!(alias.path, "src/main/java/com/foo/Bar.h");
    assert_eq!(alias.contents, "#include \"com/foo/Bar.h\"\n");
}

#[test]
fn test_no_alias_when_paths_coincide() {
    let options = TranslationOptions {
        source_alias: true,
        ..plain_options()
    };
    let generated = generate_unit(&options, bar_with_inner());

    assert!(generated.alias.is_none());
    assert_eq!(generated.files().count(), 2);
}
