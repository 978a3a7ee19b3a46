use super::*;
use rstest::rstest;

fn child_kinds(text: &str) -> Vec<SyntaxKind> {
    parse(text).syntax().children().map(|n| n.kind()).collect()
}

fn first_child_text(text: &str) -> String {
    parse(text)
        .syntax()
        .first_child()
        .map(|n| n.text().to_string())
        .unwrap_or_default()
}

#[rstest]
#[case("")]
#[case("int a;")]
#[case("  // leading comment\nvoid F() {\n  /* body */ return;\n}\n")]
#[case("#define MAX \\\n  10\nint a[MAX];")]
#[case("}}} garbage ((( \"unterminated")]
#[case("public void OnPluginStart()\n{\n  char s[] = \"\u{e9}\";\n}")]
fn test_parse_is_lossless(#[case] text: &str) {
    assert_eq!(parse(text).text(), text);
}

#[rstest]
#[case("void F() {}", SyntaxKind::FUNCTION_DECLARATION)]
#[case("stock int F() { return 1; }", SyntaxKind::FUNCTION_DECLARATION)]
#[case("OnMapStart() {}", SyntaxKind::FUNCTION_DECLARATION)]
#[case("public void OnPluginStart() {}", SyntaxKind::CALLBACK_IMPLEMENTATION)]
#[case("public Action:Command_Test(client, args) {}", SyntaxKind::CALLBACK_IMPLEMENTATION)]
#[case("native int GetMaxClients();", SyntaxKind::FUNCTION_PROTOTYPE)]
#[case("forward void OnClientConnected(int client);", SyntaxKind::FUNCTION_PROTOTYPE)]
#[case("void Declared();", SyntaxKind::FUNCTION_PROTOTYPE)]
#[case("int a;", SyntaxKind::VARIABLE_DECLARATION)]
#[case("char[] s = \"x\";", SyntaxKind::VARIABLE_DECLARATION)]
#[case("new Handle:g_hTimer = INVALID_HANDLE;", SyntaxKind::VARIABLE_DECLARATION)]
#[case("#include <sourcemod>", SyntaxKind::PREPROC_INCLUDE)]
#[case("#tryinclude \"helpers\"", SyntaxKind::PREPROC_INCLUDE)]
#[case("#pragma newdecls required", SyntaxKind::PREPROC_DIRECTIVE)]
#[case("enum Color { Red, Blue };", SyntaxKind::ITEM)]
#[case("methodmap Player { public Player() {} };", SyntaxKind::ITEM)]
#[case("typedef Callback = function void ();", SyntaxKind::ITEM)]
#[case("native float operator*(float a, float b) = FloatMul;", SyntaxKind::ITEM)]
#[case("stock Float:operator-(Float:a) { return a; }", SyntaxKind::ITEM)]
#[case("int operator;", SyntaxKind::VARIABLE_DECLARATION)]
fn test_top_level_kind(#[case] text: &str, #[case] kind: SyntaxKind) {
    let parsed = parse(text);
    assert!(parsed.ok(), "errors: {:?}", parsed.errors);
    assert_eq!(child_kinds(text), vec![kind]);
}

#[test]
fn test_nodes_exclude_surrounding_trivia() {
    let text = "  // comment\n  int a;  /* trailing */\n";
    assert_eq!(first_child_text(text), "int a;");

    let root = parse(text).syntax();
    let decl = root.first_child().unwrap();
    assert_eq!(decl.text_range(), TextRange::new(TextSize::from(15), TextSize::from(21)));
}

#[test]
fn test_directive_ends_at_line_end() {
    assert_eq!(
        child_kinds("#define MAX 10\nint a;"),
        vec![SyntaxKind::PREPROC_DIRECTIVE, SyntaxKind::VARIABLE_DECLARATION]
    );
    // A trailing backslash continues the directive
    assert_eq!(
        child_kinds("#define MAX \\\n  10\nint a;"),
        vec![SyntaxKind::PREPROC_DIRECTIVE, SyntaxKind::VARIABLE_DECLARATION]
    );
}

#[test]
fn test_include_path_stays_on_its_line() {
    let parsed = parse("#include\n<sourcemod>");
    assert!(!parsed.ok());
    let include = parsed.syntax().first_child().unwrap();
    assert_eq!(include.kind(), SyntaxKind::PREPROC_INCLUDE);
    assert!(
        include
            .children()
            .all(|n| n.kind() != SyntaxKind::INCLUDE_PATH)
    );
}

#[test]
fn test_recovers_after_stray_braces() {
    let parsed = parse("int a;\n}}}\nvoid F() {}");

    assert_eq!(parsed.errors.len(), 3);
    assert_eq!(
        child_kinds("int a;\n}}}\nvoid F() {}"),
        vec![
            SyntaxKind::VARIABLE_DECLARATION,
            SyntaxKind::ERROR,
            SyntaxKind::ERROR,
            SyntaxKind::ERROR,
            SyntaxKind::FUNCTION_DECLARATION,
        ]
    );
}

#[test]
fn test_unclosed_body_reports_error() {
    let parsed = parse("void F() {\n  int a;\n");

    assert!(!parsed.ok());
    assert_eq!(child_kinds("void F() {\n  int a;\n"), vec![SyntaxKind::FUNCTION_DECLARATION]);
}

#[test]
fn test_unclosed_item_reports_error() {
    let parsed = parse("enum E { A { };\nvoid Z() {}\n");

    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.errors[0].message, "unclosed '{'");
    assert_eq!(child_kinds("enum E { A { };\nvoid Z() {}\n"), vec![SyntaxKind::ITEM]);
}

#[test]
fn test_statement_blocks_nest() {
    let text = "void F() {\n  if (x) {\n    int a;\n  } else {\n    int b;\n  }\n}";
    let parsed = parse(text);
    assert!(parsed.ok(), "errors: {:?}", parsed.errors);

    let locals = parsed
        .syntax()
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::VARIABLE_DECLARATION)
        .count();
    assert_eq!(locals, 2);
}

#[test]
fn test_argument_structure() {
    let parsed = parse("void F(const int[] values, Float:x = 0.5) {}");
    assert!(parsed.ok(), "errors: {:?}", parsed.errors);

    let args: Vec<_> = parsed
        .syntax()
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::ARGUMENT)
        .collect();
    assert_eq!(args.len(), 2);
    assert_eq!(args[0].text().to_string(), "const int[] values");
    assert!(
        args[1]
            .children()
            .any(|n| n.kind() == SyntaxKind::DEFAULT_VALUE)
    );
}

#[test]
fn test_missing_argument_name_is_an_error() {
    let parsed = parse("void F(int a, ) {}");
    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.errors[0].message, "expected argument name");
}
