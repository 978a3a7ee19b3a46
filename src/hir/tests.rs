use super::*;
use crate::base::{LineIndex, Span};
use crate::parser::{AstNode, SourceFile, parse};
use rstest::rstest;

fn with_file<T>(text: &str, f: impl FnOnce(&SourceFile, &LineIndex) -> T) -> T {
    let parse = parse(text);
    let file = SourceFile::cast(parse.syntax()).expect("root is a source file");
    let index = LineIndex::new(text);
    f(&file, &index)
}

fn functions(text: &str) -> Vec<FunctionDefinition> {
    with_file(text, function_definitions)
}

fn variables(text: &str) -> Vec<Variable> {
    with_file(text, global_variables)
}

fn span(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Span {
    Span::from_coords(start_line, start_col, end_line, end_col)
}

fn function(name: &str, return_type: Type, args: Vec<Argument>, range: Span) -> FunctionDefinition {
    FunctionDefinition {
        range,
        return_type,
        name: name.into(),
        args,
    }
}

fn arg(name: &str, ty: Type) -> Argument {
    Argument {
        name: name.into(),
        ty,
        default_value: None,
    }
}

fn arg_with_default(name: &str, ty: Type, default: &str) -> Argument {
    Argument {
        name: name.into(),
        ty,
        default_value: Some(default.to_string()),
    }
}

fn variable(name: &str, ty: Type, range: Span, has_initial_value: bool) -> Variable {
    Variable {
        range,
        ty,
        name: name.into(),
        has_initial_value,
    }
}

const VOID: Type = Type::BuiltIn(BuiltInType::Void);
const INT: Type = Type::BuiltIn(BuiltInType::Int);
const FLOAT: Type = Type::BuiltIn(BuiltInType::Float);
const CHAR: Type = Type::BuiltIn(BuiltInType::Char);
const BOOL: Type = Type::BuiltIn(BuiltInType::Bool);

fn array(depth: usize, element: BuiltInType) -> Type {
    Type::dimensional(depth, ElementType::BuiltIn(element))
}

// ============================================================================
// Functions
// ============================================================================

#[test]
fn test_functions_without_arguments() {
    let text = "void MyFunc1() {}
      int MyFunc2() {}
      float MyFunc3() {}
      char MyFunc4() {}
      bool MyFunc5() {}
      Handle MyFunc6() {}";

    assert_eq!(
        functions(text),
        vec![
            function("MyFunc1", VOID, vec![], span(0, 0, 0, 17)),
            function("MyFunc2", INT, vec![], span(1, 6, 1, 22)),
            function("MyFunc3", FLOAT, vec![], span(2, 6, 2, 24)),
            function("MyFunc4", CHAR, vec![], span(3, 6, 3, 23)),
            function("MyFunc5", BOOL, vec![], span(4, 6, 4, 23)),
            function("MyFunc6", Type::custom("Handle"), vec![], span(5, 6, 5, 25)),
        ]
    );
}

#[test]
fn test_functions_with_single_argument() {
    let text = "void MyFunc1(int a) {}
      void MyFunc2(float a) {}
      void MyFunc3(char a) {}
      void MyFunc4(bool a) {}
      void MyFunc5(DataPack a) {}";

    assert_eq!(
        functions(text),
        vec![
            function("MyFunc1", VOID, vec![arg("a", INT)], span(0, 0, 0, 22)),
            function("MyFunc2", VOID, vec![arg("a", FLOAT)], span(1, 6, 1, 30)),
            function("MyFunc3", VOID, vec![arg("a", CHAR)], span(2, 6, 2, 29)),
            function("MyFunc4", VOID, vec![arg("a", BOOL)], span(3, 6, 3, 29)),
            function(
                "MyFunc5",
                VOID,
                vec![arg("a", Type::custom("DataPack"))],
                span(4, 6, 4, 33)
            ),
        ]
    );
}

#[rstest]
#[case("void MyFunc(int a = 5) {}", INT, "5")]
#[case("void MyFunc(float a = 2.0) {}", FLOAT, "2.0")]
#[case("void MyFunc(char a = 'c') {}", CHAR, "'c'")]
#[case("void MyFunc(bool a = true) {}", BOOL, "true")]
#[case("void MyFunc(Handle a = null) {}", Type::custom("Handle"), "null")]
fn test_default_value_is_raw_text(#[case] text: &str, #[case] ty: Type, #[case] default: &str) {
    let found = functions(text);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].args, vec![arg_with_default("a", ty, default)]);
    assert_eq!(found[0].range, span(0, 0, 0, text.len() as u32));
}

#[test]
fn test_function_with_multiple_arguments() {
    let text = "MyFunc(int a, float b, char c, bool d, Action e = Plugin_Handled) {}";

    assert_eq!(
        functions(text),
        vec![function(
            "MyFunc",
            INT,
            vec![
                arg("a", INT),
                arg("b", FLOAT),
                arg("c", CHAR),
                arg("d", BOOL),
                arg_with_default("e", Type::custom("Action"), "Plugin_Handled"),
            ],
            span(0, 0, 0, 68)
        )]
    );
}

#[test]
fn test_argument_dimensions() {
    let text = "void MyFunc1(float vec[3]) {}
      void MyFunc2(float vecs[16][3]) {}
      void MyFunc3(char[] str) {}";

    assert_eq!(
        functions(text),
        vec![
            function(
                "MyFunc1",
                VOID,
                vec![arg("vec", array(1, BuiltInType::Float))],
                span(0, 0, 0, 29)
            ),
            function(
                "MyFunc2",
                VOID,
                vec![arg("vecs", array(2, BuiltInType::Float))],
                span(1, 6, 1, 40)
            ),
            function(
                "MyFunc3",
                VOID,
                vec![arg("str", array(1, BuiltInType::Char))],
                span(2, 6, 2, 33)
            ),
        ]
    );
}

#[test]
fn test_legacy_function_with_implicit_return_type() {
    assert_eq!(
        functions("MyFunc() {}"),
        vec![function("MyFunc", INT, vec![], span(0, 0, 0, 11))]
    );
}

#[test]
fn test_legacy_function_with_tagged_return_type() {
    let text = "_:MyFunc1() {}
      Float:MyFunc2() {}
      String:MyFunc3() {}
      bool:MyFunc4() {}
      Action:MyFunc5() {}";

    assert_eq!(
        functions(text),
        vec![
            function("MyFunc1", INT, vec![], span(0, 0, 0, 14)),
            function("MyFunc2", FLOAT, vec![], span(1, 6, 1, 24)),
            function("MyFunc3", CHAR, vec![], span(2, 6, 2, 25)),
            function("MyFunc4", BOOL, vec![], span(3, 6, 3, 23)),
            function("MyFunc5", Type::custom("Action"), vec![], span(4, 6, 4, 25)),
        ]
    );
}

#[test]
fn test_legacy_function_with_tagged_arguments() {
    // The stray `)` on the second line is tolerated
    let text = "MyFunc1(a) {}
      MyFunc2(_:a)) {}
      MyFunc3(Float:a) {}
      MyFunc4(String:a) {}
      MyFunc5(bool:a) {}
      MyFunc6(Action:a) {}";

    assert_eq!(
        functions(text),
        vec![
            function("MyFunc1", INT, vec![arg("a", INT)], span(0, 0, 0, 13)),
            function("MyFunc2", INT, vec![arg("a", INT)], span(1, 6, 1, 22)),
            function("MyFunc3", INT, vec![arg("a", FLOAT)], span(2, 6, 2, 25)),
            function("MyFunc4", INT, vec![arg("a", CHAR)], span(3, 6, 3, 26)),
            function("MyFunc5", INT, vec![arg("a", BOOL)], span(4, 6, 4, 24)),
            function(
                "MyFunc6",
                INT,
                vec![arg("a", Type::custom("Action"))],
                span(5, 6, 5, 26)
            ),
        ]
    );
}

#[test]
fn test_unnamed_argument_is_skipped() {
    let found = functions("void F(int a, ) {}");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].args, vec![arg("a", INT)]);
}

#[test]
fn test_return_type_ignores_dimensions() {
    let found = functions("int[] Numbers() {}");
    assert_eq!(found[0].return_type, INT);
}

#[test]
fn test_callbacks_and_prototypes_are_not_definitions() {
    let text = "public void OnPluginStart() {}
native int GetMaxClients();
forward void OnMapStart();
void Helper() {}";

    let found = functions(text);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Helper");
}

#[test]
fn test_errors_elsewhere_do_not_hide_functions() {
    let text = "int a;\n}}}\nvoid F() {}";
    let found = functions(text);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].range, span(2, 0, 2, 11));
}

// ============================================================================
// Callbacks and prototypes
// ============================================================================

#[test]
fn test_callback_implementation() {
    let found = with_file("public void OnPluginStart() {}", callback_implementations);
    assert_eq!(
        found,
        vec![CallbackImplementation {
            range: span(0, 0, 0, 30),
            return_type: VOID,
            name: "OnPluginStart".into(),
            args: vec![],
        }]
    );
}

#[test]
fn test_callback_with_legacy_tag() {
    let found = with_file(
        "public Action:Command_Test(client, args) { return Plugin_Handled; }",
        callback_implementations,
    );
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].return_type, Type::custom("Action"));
    assert_eq!(found[0].args, vec![arg("client", INT), arg("args", INT)]);
}

#[test]
fn test_prototypes() {
    let text = "native int GetClientCount(bool inGameOnly = true);
native void PrintToServer(const char[] format, any ...);
forward void OnPluginStart();";

    let found = with_file(text, function_prototypes);
    let names: Vec<_> = found.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["GetClientCount", "PrintToServer", "OnPluginStart"]);
    assert_eq!(
        found[0].args,
        vec![arg_with_default("inGameOnly", BOOL, "true")]
    );
    // Variadic `...` has no name
    assert_eq!(
        found[1].args,
        vec![arg("format", array(1, BuiltInType::Char))]
    );
}

// ============================================================================
// Global variables
// ============================================================================

#[test]
fn test_simple_variables() {
    let text = "int a;
      float b;
      bool c;
      char d;
      Action e;";

    assert_eq!(
        variables(text),
        vec![
            variable("a", INT, span(0, 0, 0, 6), false),
            variable("b", FLOAT, span(1, 6, 1, 14), false),
            variable("c", BOOL, span(2, 6, 2, 13), false),
            variable("d", CHAR, span(3, 6, 3, 13), false),
            variable("e", Type::custom("Action"), span(4, 6, 4, 15), false),
        ]
    );
}

#[test]
fn test_variables_with_initial_value() {
    let text = "int a = 2;
      float b = 7.14;
      bool c = true;
      char d = 'a';
      Action e = Plugin_Continue;";

    assert_eq!(
        variables(text),
        vec![
            variable("a", INT, span(0, 0, 0, 10), true),
            variable("b", FLOAT, span(1, 6, 1, 21), true),
            variable("c", BOOL, span(2, 6, 2, 20), true),
            variable("d", CHAR, span(3, 6, 3, 19), true),
            variable("e", Type::custom("Action"), span(4, 6, 4, 33), true),
        ]
    );
}

#[test]
fn test_local_variables_are_not_globals() {
    let text = "void Test() {
        int a = 0;
      }";

    assert!(variables(text).is_empty());
}

#[test]
fn test_operator_overloads_are_skipped() {
    let text = "native float operator*(float oper1, float oper2) = FloatMul;
stock Float:operator-(Float:a) { return a; }
stock bool operator!=(Float:a, Float:b) { return true; }
int real;
void After() {}";

    let names: Vec<_> = variables(text).iter().map(|v| v.name.to_string()).collect();
    assert_eq!(names, vec!["real"]);
    assert!(with_file(text, function_prototypes).is_empty());

    let found = functions(text);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "After");
}

#[test]
fn test_array_variables() {
    let text = "int[] a;
      float[][] b;
      char c[];
      bool d[20];";

    assert_eq!(
        variables(text),
        vec![
            variable("a", array(1, BuiltInType::Int), span(0, 0, 0, 8), false),
            variable("b", array(2, BuiltInType::Float), span(1, 6, 1, 18), false),
            variable("c", array(1, BuiltInType::Char), span(2, 6, 2, 15), false),
            variable("d", array(1, BuiltInType::Bool), span(3, 6, 3, 17), false),
        ]
    );
}

#[test]
fn test_array_initialisation() {
    let text = "char[] text = \"Hello world\";
      int numbers[] = { 1, 2, 3 };
      float vec[3] = { 0.0, 14.2, 13.22 };
      bool client_has_stuff[MAXPLAYERS] = { true, ... };";

    assert_eq!(
        variables(text),
        vec![
            variable("text", array(1, BuiltInType::Char), span(0, 0, 0, 28), true),
            variable("numbers", array(1, BuiltInType::Int), span(1, 6, 1, 34), true),
            variable("vec", array(1, BuiltInType::Float), span(2, 6, 2, 42), true),
            variable(
                "client_has_stuff",
                array(1, BuiltInType::Bool),
                span(3, 6, 3, 56),
                true
            ),
        ]
    );
}

#[test]
fn test_multiple_variables_in_one_statement() {
    let text = "int a, b;
      bool c, d = true;
      float e = 12.92, f = 1.2, g = 82.00;
      char h = 'c', i;
      char j[10] = \"whatever!\", k[256];";

    assert_eq!(
        variables(text),
        vec![
            variable("a", INT, span(0, 4, 0, 5), false),
            variable("b", INT, span(0, 7, 0, 8), false),
            variable("c", BOOL, span(1, 11, 1, 12), false),
            variable("d", BOOL, span(1, 14, 1, 22), true),
            variable("e", FLOAT, span(2, 12, 2, 21), true),
            variable("f", FLOAT, span(2, 23, 2, 30), true),
            variable("g", FLOAT, span(2, 32, 2, 41), true),
            variable("h", CHAR, span(3, 11, 3, 18), true),
            variable("i", CHAR, span(3, 20, 3, 21), false),
            variable("j", array(1, BuiltInType::Char), span(4, 11, 4, 30), true),
            variable("k", array(1, BuiltInType::Char), span(4, 32, 4, 38), false),
        ]
    );
}

#[test]
fn test_declarator_brackets_extend_shared_dimensions() {
    let found = variables("char[] names[4];");
    assert_eq!(found[0].ty, array(2, BuiltInType::Char));
}

#[test]
fn test_legacy_variables() {
    let text = "new Float:g_fSpeed = 1.0, g_iCount;
new String:g_sName[64];
new Handle:g_hTimer = INVALID_HANDLE;";

    assert_eq!(
        variables(text),
        vec![
            variable("g_fSpeed", FLOAT, span(0, 4, 0, 24), true),
            variable("g_iCount", INT, span(0, 26, 0, 34), false),
            variable("g_sName", array(1, BuiltInType::Char), span(1, 0, 1, 23), false),
            variable("g_hTimer", Type::custom("Handle"), span(2, 0, 2, 37), true),
        ]
    );
}

#[test]
fn test_unnamed_declarator_is_skipped() {
    assert_eq!(variables("int a, ;"), vec![variable("a", INT, span(0, 4, 0, 5), false)]);
}

// ============================================================================
// Dependencies
// ============================================================================

#[rstest]
#[case("#include <sourcemod>", IncludeType::Global, true, "sourcemod.inc")]
#[case("#include \"../mylib\"", IncludeType::Relative, true, "../mylib.inc")]
#[case("#include \"../mylib.inc\"", IncludeType::Relative, true, "../mylib.inc")]
#[case("#tryinclude <sourcemod>", IncludeType::Global, false, "sourcemod.inc")]
#[case("#tryinclude \"../mylib\"", IncludeType::Relative, false, "../mylib.inc")]
#[case("#tryinclude \"../mylib.inc\"", IncludeType::Relative, false, "../mylib.inc")]
fn test_include_directives(
    #[case] text: &str,
    #[case] include_type: IncludeType,
    #[case] required: bool,
    #[case] path: &str,
) {
    assert_eq!(
        with_file(text, dependencies),
        vec![Dependency {
            include_type,
            required,
            path: path.to_string(),
            range: span(0, 0, 0, text.len() as u32),
        }]
    );
}

#[test]
fn test_dependencies_in_source_order() {
    let text = "#include <sourcemod>
#pragma semicolon 1
#include <sdktools/trace>
#tryinclude \"helpers\"

public void OnPluginStart() {}";

    let paths: Vec<_> = with_file(text, dependencies)
        .into_iter()
        .map(|d| d.path)
        .collect();
    assert_eq!(
        paths,
        vec!["sourcemod.inc", "sdktools/trace.inc", "helpers.inc"]
    );
}

#[test]
fn test_include_without_path_is_skipped() {
    assert!(with_file("#include\nint a;", dependencies).is_empty());
}

// ============================================================================
// Visible symbols
// ============================================================================

#[test]
fn test_visible_symbols_of_file() {
    let text = "int g_count;
native int GetMaxClients();
void Helper() {}
public void OnPluginStart() {}";

    let symbols = with_file(text, VisibleSymbols::of_file);
    let functions: Vec<_> = symbols.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(functions, vec!["Helper", "GetMaxClients"]);
    assert_eq!(symbols.callbacks.len(), 1);
    assert_eq!(symbols.variables.len(), 1);
    assert!(!symbols.is_empty());
}
