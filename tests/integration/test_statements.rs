use crate::assert_generated_contains;
use crate::common::*;
use java2objc_gen::ast::{
    Block, CatchClause, CompilationUnit, Expression, JavaType, Parameter, Statement, StatementKind,
};
use java2objc_gen::build::GenerationUnitBuilder;
use java2objc_gen::generators::base::name_table::NameTable;
use java2objc_gen::Error;

const BAR: &str = "com.foo.Bar";

fn bar_running(statements: Vec<Statement>) -> CompilationUnit {
    let mut decl = class(BAR);
    decl.body = vec![method("run", statements)];
    compilation_unit(BAR, vec![decl])
}

fn labeled_while(body: Vec<Statement>) -> Statement {
    StatementKind::Labeled {
        label: "outer".to_string(),
        body: Box::new(
            StatementKind::While {
                condition: local("flag", JavaType::boolean()),
                body: block(body),
            }
            .into(),
        ),
    }
    .into()
}

fn labeled(kind: fn(Option<String>) -> StatementKind) -> Statement {
    kind(Some("outer".to_string())).into()
}

fn break_to(label: Option<String>) -> StatementKind {
    StatementKind::Break { label }
}

fn continue_to(label: Option<String>) -> StatementKind {
    StatementKind::Continue { label }
}

#[test]
fn test_labeled_break_becomes_goto_after_loop() {
    let generated = generate_unit(
        &plain_options(),
        bar_running(vec![labeled_while(vec![labeled(break_to)])]),
    );

    assert_generated_contains!(
        generated.implementation.contents,
        "- (void)run {\n  while (flag) {\n    goto outer;\n  }\n  outer: ;\n}\n"
    );
}

#[test]
fn test_break_and_continue_on_one_label() {
    let generated = generate_unit(
        &plain_options(),
        bar_running(vec![labeled_while(vec![
            call(BAR, "step"),
            labeled(continue_to),
            labeled(break_to),
        ])]),
    );
    let source = &generated.implementation.contents;

    assert_generated_contains!(source, "goto outer_continue;");
    assert_generated_contains!(source, "goto outer;");
    assert_eq!(source.matches("outer_continue: ;").count(), 1);
    assert_eq!(source.matches(" outer: ;").count(), 1);
}

#[test]
fn test_multi_catch_in_method_body() {
    let try_statement: Statement = StatementKind::Try {
        resources: vec![],
        body: Block::new(vec![call(BAR, "work")]),
        catch_clauses: vec![CatchClause {
            exception: Parameter::new(
                "e",
                JavaType::Union {
                    alternatives: vec![
                        JavaType::class("java.io.IOException"),
                        JavaType::class("java.sql.SQLException"),
                    ],
                },
            ),
            body: Block::new(vec![call(BAR, "handle")]),
            line: None,
        }],
        finally: None,
    }
    .into();
    let generated = generate_unit(&plain_options(), bar_running(vec![try_statement]));
    let source = &generated.implementation.contents;

    assert_generated_contains!(
        source,
        "- (void)run {\n  @try {\n    [self work];\n  }\n\
         \x20 @catch (JavaIoIOException *e) {\n    [self handle];\n  }\n\
         \x20 @catch (JavaSqlSQLException *e) {\n    [self handle];\n  }\n}\n"
    );
    assert_generated_contains!(source, "#include \"java/io/IOException.h\"");
    assert_generated_contains!(source, "#include \"java/sql/SQLException.h\"");
}

#[test]
fn test_unlowered_lambda_fails_the_unit() {
    let unit = bar_running(vec![StatementKind::Expression {
        expression: Expression::Lambda,
    }
    .into()]);

    let mut builder = GenerationUnitBuilder::new(&unit.source_path);
    builder.add_input_file(&unit.source_path);
    builder.add_compilation_unit(unit).unwrap();
    builder.assign_output_path("com/foo/Bar");
    let err = builder
        .build()
        .unwrap()
        .generate(&plain_options(), &NameTable::new())
        .unwrap_err();

    assert!(matches!(err, Error::NotRewritten { .. }));
    assert!(err.to_string().contains("LambdaExpression"));
}
