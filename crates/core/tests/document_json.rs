//! End-to-end checks of the serialized document shape.

use graphlang_core::{compile_with_provider, CompileOptions, InMemoryProvider};
use serde_json::{json, Value};

fn compile_json(src: &str) -> Value {
    compile_with_provider(src, &CompileOptions::default(), &InMemoryProvider::default())
        .unwrap()
        .to_json_value()
}

#[test]
fn formula_defaults() {
    let v = compile_json("x = 5");
    assert_eq!(
        v["expressions"]["list"][0],
        json!({
            "type": "expression",
            "id": 1,
            "color": "#c74440",
            "latex": "x=5",
            "lineStyle": "SOLID",
            "lineOpacity": "1",
            "lineWidth": "2.5",
            "folderId": 0
        })
    );
}

#[test]
fn folder_ids_serialize_as_strings() {
    let v = compile_json("a = 1\nns shapes {\n  r = 3\n}\n'done'");
    let list = v["expressions"]["list"].as_array().unwrap();
    assert_eq!(list.len(), 4);
    assert_eq!(list[1], json!({"type": "folder", "id": 2, "title": "shapes"}));
    assert_eq!(list[2]["folderId"], json!("2"));
    assert_eq!(list[2]["latex"], json!("s_{hapesr}=3"));
    assert_eq!(list[3], json!({"type": "text", "id": 4, "text": "done"}));
}

#[test]
fn pretty_and_compact_agree() {
    let doc = compile_with_provider(
        "fn f(a,b){a+b}",
        &CompileOptions::default(),
        &InMemoryProvider::default(),
    )
    .unwrap();
    let compact: Value = serde_json::from_str(&doc.to_json_string(false).unwrap()).unwrap();
    let pretty: Value = serde_json::from_str(&doc.to_json_string(true).unwrap()).unwrap();
    assert_eq!(compact, pretty);
    assert_eq!(
        compact["expressions"]["list"][0]["latex"],
        json!("f\\left(f_{a},f_{b}\\right)=f_{a}+f_{b}")
    );
}

#[test]
fn rollback_leaves_no_residue_across_macro_calls() {
    let src = "macro two!(n){ {n} = 2 }\np = (1, 2)\ntwo!(w)\nq = (w + 1) * 3";
    let v = compile_json(src);
    let latex: Vec<&str> = v["expressions"]["list"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|item| item["latex"].as_str())
        .filter(|l| !l.is_empty())
        .collect();
    assert_eq!(
        latex,
        vec!["p=\\left(1,2\\right)", "w=2", "q=\\left(w+1\\right)*3"]
    );
}
