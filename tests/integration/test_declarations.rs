use crate::common::*;
use crate::{assert_generated_contains, assert_generated_not_contains};
use java2objc_gen::ast::{BodyDeclaration, FieldDeclaration, JavaType, LiteralValue, Modifier, VariableFragment};

const BAR: &str = "com.foo.Bar";

fn bar_with(members: Vec<BodyDeclaration>) -> java2objc_gen::ast::CompilationUnit {
    let mut decl = class(BAR);
    decl.body = members;
    compilation_unit(BAR, vec![decl])
}

#[test]
fn test_primitive_constant_is_a_define_without_storage() {
    let generated = generate_unit(
        &plain_options(),
        bar_with(vec![constant("X", JavaType::int(), LiteralValue::Int(5))]),
    );
    let header = &generated.headers[0].contents;
    let source = &generated.implementation.contents;

    assert_generated_contains!(header, "#define ComFooBar_X 5\n");
    assert_generated_contains!(header, "J2OBJC_STATIC_FIELD_CONSTANT(ComFooBar, X, jint)");
    assert_generated_not_contains!(source, "ComFooBar_X");
}

#[test]
fn test_static_double_gets_storage_and_accessors() {
    let generated = generate_unit(
        &plain_options(),
        bar_with(vec![static_field("Y", JavaType::double())]),
    );
    let header = &generated.headers[0].contents;
    let source = &generated.implementation.contents;

    assert_generated_contains!(header, "FOUNDATION_EXPORT jdouble ComFooBar_Y;\n");
    assert_generated_contains!(header, "J2OBJC_STATIC_FIELD_PRIMITIVE(ComFooBar, Y, jdouble)");
    assert_generated_not_contains!(header, "#define ComFooBar_Y");
    assert_generated_contains!(source, "\njdouble ComFooBar_Y;\n");
}

#[test]
fn test_min_values_are_casts_of_hex_literals() {
    let generated = generate_unit(
        &plain_options(),
        bar_with(vec![
            constant("IMIN", JavaType::int(), LiteralValue::Int(i32::MIN)),
            constant("LMIN", JavaType::long(), LiteralValue::Long(i64::MIN)),
            constant("LMINUS", JavaType::long(), LiteralValue::Long(-5)),
        ]),
    );
    let header = &generated.headers[0].contents;

    assert_generated_contains!(header, "#define ComFooBar_IMIN ((jint) 0x80000000)\n");
    assert_generated_contains!(header, "#define ComFooBar_LMIN ((jlong) 0x8000000000000000LL)\n");
    assert_generated_contains!(header, "#define ComFooBar_LMINUS -5LL\n");
}

#[test]
fn test_private_field_lives_in_the_class_extension() {
    let field = FieldDeclaration::new(
        &[Modifier::Private],
        JavaType::class("java.util.List"),
        vec![VariableFragment::named("items")],
    );
    let generated = generate_unit(
        &plain_options(),
        bar_with(vec![BodyDeclaration::Field(field)]),
    );
    let header = &generated.headers[0].contents;
    let source = &generated.implementation.contents;

    assert_generated_not_contains!(header, "items");
    assert_generated_contains!(source, "@interface ComFooBar ()");
    assert_generated_contains!(source, "#include \"java/util/List.h\"");
}

#[test]
fn test_header_forward_declares_field_types() {
    let field = FieldDeclaration::new(
        &[Modifier::Public],
        JavaType::class("java.io.File"),
        vec![VariableFragment::named("file")],
    );
    let generated = generate_unit(
        &plain_options(),
        bar_with(vec![BodyDeclaration::Field(field)]),
    );
    let header = &generated.headers[0].contents;

    assert_generated_contains!(header, "@class JavaIoFile;");
    assert_generated_not_contains!(header, "#include \"java/io/File.h\"");
}

#[test]
fn test_reflection_metadata_unless_stripped() {
    let unit = bar_with(vec![method("run", vec![])]);
    let with_metadata = generate_unit(&Default::default(), unit.clone());
    let stripped = generate_unit(&plain_options(), unit);

    assert_generated_contains!(with_metadata.implementation.contents, "__metadata");
    assert_generated_not_contains!(stripped.implementation.contents, "__metadata");
}
