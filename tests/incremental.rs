//! Incremental edits must always agree with a fresh parse of the final text.

use rstest::rstest;
use sourcepawn::{ContentChange, Document, Span};
use sourcepawn::hir::{BuiltInType, ElementType, Type};

use crate::helpers::source_fixtures::{LEGACY_PLUGIN, PLUGIN};
use crate::helpers::{assert_matches_fresh, replace_first};

/// Edits applied one after another to [`PLUGIN`].
const PLUGIN_EDITS: &[(&str, &str)] = &[
    // Inside a function body
    ("int local = 5;", "int local = 5;\n    float extra;"),
    // Default value of an argument
    ("allowBots = false", "allowBots = true"),
    // Argument rename inside a callback
    ("int client, int args)", "int client, int argc)"),
    // Variable rename
    ("g_iCount", "g_iTotal"),
    // Remove a directive
    ("#pragma semicolon 1\n", ""),
    // Insert a whole new function before another
    ("stock bool", "stock bool IsFirst() { return true; }\nstock bool"),
    // Unbalance a body
    ("return Plugin_Continue;\n}", "return Plugin_Continue;\n"),
    // And balance it again
    ("return Plugin_Continue;\n", "return Plugin_Continue;\n}"),
    // Comment out a declaration, then close the comment
    ("int g_iTotal", "/* int g_iTotal"),
    ("g_iTotal = 0;", "g_iTotal = 0; */"),
    // Add an include
    ("#include \"helpers\"", "#include \"helpers\"\n#tryinclude <extras>"),
    // Unicode in a string literal
    ("\"Test\"", "\"T\u{e9}st \u{1D11E}\""),
    // Edit after the unicode on the same line
    ("st \u{1D11E}\"", "st \u{1D11E}!\""),
];

const LEGACY_EDITS: &[(&str, &str)] = &[
    ("g_iTicks;", "g_iTicks, g_iMax = 10;"),
    ("Float:value", "Float:value[]"),
    ("factor = 2", "factor = 3"),
    ("g_iTicks++;", "g_iTicks += 2;"),
    ("public Action:Timer_Tick", "Action:Timer_Tick"),
    ("new Handle:g_hTimer", "new Handle:g_hTimer[2]"),
];

fn run_one_by_one(source: &str, edits: &[(&str, &str)]) -> Document {
    let mut document = Document::new(source);
    for (needle, replacement) in edits {
        let change = replace_first(document.text(), needle, replacement);
        document.apply_changes(&[change]);
        assert_matches_fresh(&document);
    }
    document
}

#[rstest]
#[case(PLUGIN, PLUGIN_EDITS)]
#[case(LEGACY_PLUGIN, LEGACY_EDITS)]
fn test_edit_sequence_matches_fresh_parse(#[case] source: &str, #[case] edits: &[(&str, &str)]) {
    let document = run_one_by_one(source, edits);

    let mut expected = source.to_string();
    for (needle, replacement) in edits {
        expected = expected.replacen(needle, replacement, 1);
    }
    assert_eq!(document.text(), expected);
}

#[rstest]
#[case(PLUGIN, PLUGIN_EDITS)]
#[case(LEGACY_PLUGIN, LEGACY_EDITS)]
fn test_batched_changes_apply_in_order(#[case] source: &str, #[case] edits: &[(&str, &str)]) {
    let mut shadow = source.to_string();
    let mut changes = Vec::new();
    for (needle, replacement) in edits {
        changes.push(replace_first(&shadow, needle, replacement));
        shadow = shadow.replacen(needle, replacement, 1);
    }

    let mut document = Document::new(source);
    document.apply_changes(&changes);

    assert_eq!(document.text(), shadow);
    assert_matches_fresh(&document);
}

#[test]
fn test_records_after_edits() {
    let document = run_one_by_one(PLUGIN, PLUGIN_EDITS);

    let functions: Vec<_> = document.functions().into_iter().map(|f| f.name).collect();
    assert_eq!(functions, vec!["IsFirst", "IsValidClient"]);

    let callbacks: Vec<_> = document.callbacks().into_iter().map(|c| c.name).collect();
    assert_eq!(callbacks, vec!["OnPluginStart", "Command_Test"]);
    assert_eq!(document.callbacks()[1].args[1].name, "argc");

    let valid = &document.functions()[1];
    assert_eq!(valid.args[1].default_value.as_deref(), Some("true"));

    // g_iTotal is commented out
    let variables: Vec<_> = document.variables().into_iter().map(|v| v.name).collect();
    assert_eq!(variables, vec!["myinfo", "g_fSpeed", "g_sName"]);

    let dependencies: Vec<_> = document.dependencies().into_iter().map(|d| d.path).collect();
    assert_eq!(dependencies, vec!["sourcemod.inc", "helpers.inc", "extras.inc"]);
    assert!(!document.dependencies()[2].required);
}

#[test]
fn test_legacy_records_after_edits() {
    let document = run_one_by_one(LEGACY_PLUGIN, LEGACY_EDITS);

    let variables = document.variables();
    let names: Vec<_> = variables.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["g_hTimer", "g_fDelay", "g_iTicks", "g_iMax"]);
    assert_eq!(variables[0].ty, Type::dimensional(1, ElementType::Custom("Handle".into())));
    assert!(variables[3].has_initial_value);

    // Without `public` the former callback is a plain function
    let functions: Vec<_> = document.functions().into_iter().map(|f| f.name).collect();
    assert_eq!(functions, vec!["Timer_Tick", "Scale"]);

    let scale = &document.functions()[1];
    assert_eq!(scale.return_type, Type::BuiltIn(BuiltInType::Float));
    assert_eq!(scale.args[0].ty.to_string(), "float[]");
    assert_eq!(scale.args[1].default_value.as_deref(), Some("3"));
}

#[test]
fn test_full_replacement_between_ranged_edits() {
    let mut document = Document::new(PLUGIN);
    let first = replace_first(document.text(), "g_iCount", "g_iFirst");
    document.apply_changes(&[
        first,
        ContentChange::full(LEGACY_PLUGIN),
        ContentChange::ranged(Span::from_coords(2, 11, 2, 19), "g_hOther"),
    ]);

    assert!(document.text().contains("new Handle:g_hOther = INVALID_HANDLE;"));
    assert_matches_fresh(&document);
}
